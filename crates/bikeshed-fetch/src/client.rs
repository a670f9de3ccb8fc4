use std::fmt;
use std::time::Duration;

use reqwest::header::ACCEPT_CHARSET;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use crate::error::ConvertError;

/// Public Bikeshed conversion endpoint run by the CSSWG.
pub const DEFAULT_ENDPOINT: &str = "https://api.csswg.org/bikeshed/";

/// Value of the `output` form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Rendered HTML document.
    Html,
    /// Error report only; empty when the source converts cleanly.
    Err,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Html => "html",
            OutputFormat::Err => "err",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status and raw body of one Bikeshed response.
#[derive(Debug, Clone)]
pub struct RemoteResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl RemoteResponse {
    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Thin wrapper over a [`reqwest::Client`] bound to one endpoint.
#[derive(Debug, Clone)]
pub struct BikeshedClient {
    pub endpoint: String,
    client: Client,
}

impl BikeshedClient {
    pub fn new(endpoint: &str, proxy: Option<&str>, timeout: Option<Duration>) -> Self {
        let mut builder =
            Client::builder().user_agent(concat!("bikeshed-fetch/", env!("CARGO_PKG_VERSION")));

        if let Some(proxy_url) = proxy {
            match reqwest::Proxy::all(proxy_url) {
                Ok(p) => {
                    builder = builder.proxy(p);
                }
                Err(e) => {
                    warn!(proxy = %proxy_url, error = %e, "ignoring invalid proxy URL");
                }
            }
        }

        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().unwrap_or_else(|e| {
            warn!(error = %e, "failed to configure HTTP client; falling back to defaults without proxy or timeout");
            Client::default()
        });

        Self {
            endpoint: endpoint.to_string(),
            client,
        }
    }

    /// Upload `source` and ask for `format`.
    ///
    /// Any HTTP status is returned as-is; only transport failures are errors.
    pub async fn submit(
        &self,
        source: &[u8],
        format: OutputFormat,
    ) -> Result<RemoteResponse, ConvertError> {
        let form = Form::new()
            .part("file", Part::bytes(source.to_vec()).file_name("file"))
            .text("output", format.as_str());

        debug!(endpoint = %self.endpoint, output = %format, bytes = source.len(), "submitting source");

        let resp = self
            .client
            .post(&self.endpoint)
            .header(ACCEPT_CHARSET, "utf-8")
            .multipart(form)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.bytes().await?.to_vec();

        debug!(output = %format, %status, bytes = body.len(), "received response");

        Ok(RemoteResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_field_values() {
        assert_eq!(OutputFormat::Html.as_str(), "html");
        assert_eq!(OutputFormat::Err.as_str(), "err");
        assert_eq!(OutputFormat::Err.to_string(), "err");
    }

    #[test]
    fn test_response_text_is_lossy() {
        let resp = RemoteResponse {
            status: StatusCode::OK,
            body: vec![b'o', b'k', 0xff],
        };
        assert_eq!(resp.text(), "ok\u{fffd}");
    }

    #[test]
    #[tracing_test::traced_test]
    fn test_invalid_proxy_is_ignored() {
        let client = BikeshedClient::new(DEFAULT_ENDPOINT, Some("not a url"), None);
        assert_eq!(client.endpoint, DEFAULT_ENDPOINT);
        assert!(logs_contain("ignoring invalid proxy URL"));
    }
}
