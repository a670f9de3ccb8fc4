use std::path::{Path, PathBuf};

use reqwest::StatusCode;
use tracing::{debug, info, warn};

use crate::client::{BikeshedClient, OutputFormat, RemoteResponse};
use crate::error::ConvertError;
use crate::outputs::OutputPaths;

/// What happened to the HTML half of a conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlOutcome {
    /// Status 200; the body was written to this path.
    Written(PathBuf),
    /// Any other status; nothing was written.
    Rejected(StatusCode),
}

/// Result of converting one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    /// Absolute path of the source.
    pub source: PathBuf,
    /// Decoded error report, `None` when Bikeshed returned an empty one.
    pub diagnostics: Option<String>,
    pub html: HtmlOutcome,
}

impl ConversionReport {
    /// `true` when Bikeshed reported no errors.
    pub fn succeeded(&self) -> bool {
        self.diagnostics.is_none()
    }
}

/// Uploads Bikeshed sources and writes the results next to them.
///
/// Usually obtained from [`crate::Api::converter`].
#[derive(Debug, Clone)]
pub struct Converter {
    pub(crate) client: BikeshedClient,
    pub(crate) save_err_to_txt: bool,
    pub(crate) show_progress: bool,
}

impl Converter {
    /// Convert the file at `raw_path`.
    ///
    /// The HTML and error requests run concurrently and both are always
    /// attempted. Each outcome is applied on its own before the first
    /// transport error, if any, is returned.
    pub async fn convert<P: AsRef<Path>>(
        &self,
        raw_path: P,
    ) -> Result<ConversionReport, ConvertError> {
        let raw_path = raw_path.as_ref();
        let paths = OutputPaths::derive(raw_path)?;

        let source = tokio::fs::read(&paths.source)
            .await
            .map_err(|source| ConvertError::ReadInput {
                path: paths.source.clone(),
                source,
            })?;

        debug!(source = %paths.source.display(), bytes = source.len(), "read Bikeshed source");

        let (html, err) = tokio::join!(
            self.client.submit(&source, OutputFormat::Html),
            self.client.submit(&source, OutputFormat::Err),
        );

        let diagnostics = err.and_then(|resp| self.apply_err(raw_path, &paths, &resp));
        let html = html.and_then(|resp| self.apply_html(&paths, resp));

        Ok(ConversionReport {
            diagnostics: diagnostics?,
            html: html?,
            source: paths.source,
        })
    }

    fn apply_err(
        &self,
        raw_path: &Path,
        paths: &OutputPaths,
        resp: &RemoteResponse,
    ) -> Result<Option<String>, ConvertError> {
        if resp.body.is_empty() {
            paths.remove_stale_err()?;
            info!(source = %paths.source.display(), "conversion succeeded");
            if self.show_progress {
                println!("{}", console_message(raw_path, None));
            }
            return Ok(None);
        }

        let text = resp.text();
        warn!(source = %paths.source.display(), status = %resp.status, "Bikeshed reported errors");
        if self.show_progress {
            println!("{}", console_message(raw_path, Some(&text)));
        }
        if self.save_err_to_txt {
            paths.write_err(&resp.body)?;
        }
        Ok(Some(text))
    }

    fn apply_html(
        &self,
        paths: &OutputPaths,
        resp: RemoteResponse,
    ) -> Result<HtmlOutcome, ConvertError> {
        if resp.status != StatusCode::OK {
            debug!(status = %resp.status, "HTML request rejected; leaving output untouched");
            return Ok(HtmlOutcome::Rejected(resp.status));
        }
        paths.write_html(&resp.body)?;
        Ok(HtmlOutcome::Written(paths.html.clone()))
    }
}

/// Line printed for a build: the decoded report on failure, otherwise a
/// success notice naming `raw_path` exactly as the caller gave it.
pub fn console_message(raw_path: &Path, diagnostics: Option<&str>) -> String {
    match diagnostics {
        Some(text) => text.to_string(),
        None => format!("Successfully built \"{}\"", raw_path.display()),
    }
}
