//! Client for the CSSWG Bikeshed conversion service.
//!
//! A source file is uploaded twice, once asking for rendered HTML and once
//! for the error report. The HTML lands next to the source as `<name>.html`;
//! a non-empty error report marks the build as failed.

pub mod api;
pub mod client;
pub mod converter;
pub mod error;
pub mod outputs;

pub use api::Api;
pub use client::{BikeshedClient, OutputFormat, RemoteResponse, DEFAULT_ENDPOINT};
pub use converter::{console_message, ConversionReport, Converter, HtmlOutcome};
pub use error::ConvertError;
pub use outputs::OutputPaths;
pub use reqwest::StatusCode;

use std::path::Path;

/// Convert `path` against the public endpoint with default settings.
///
/// This is a convenience wrapper around the builder API:
/// ```rust,ignore
/// Api::new().converter().convert(path).await
/// ```
pub async fn convert<P: AsRef<Path>>(path: P) -> Result<ConversionReport, ConvertError> {
    Api::new().converter().convert(path).await
}
