use std::env;
use std::time::Duration;

use crate::client::{BikeshedClient, DEFAULT_ENDPOINT};
use crate::converter::Converter;

/// Top-level builder for the bikeshed-fetch API.
///
/// # Example
/// ```rust,no_run
/// # async fn run() -> Result<(), bikeshed_fetch::ConvertError> {
/// use bikeshed_fetch::Api;
/// let report = Api::new()
///     .save_err_to_txt(true)
///     .converter()
///     .convert("css-grid/Overview.bs")
///     .await?;
/// assert!(report.succeeded());
/// # Ok(())
/// # }
/// ```
pub struct Api {
    pub(crate) endpoint: String,
    pub(crate) proxy: Option<String>,
    pub(crate) timeout: Option<Duration>,
    pub(crate) save_err_to_txt: bool,
    pub(crate) show_progress: bool,
}

impl Default for Api {
    fn default() -> Self {
        Self::new()
    }
}

impl Api {
    /// Create a new `Api` instance targeting the public CSSWG endpoint.
    ///
    /// Proxy is automatically read from `HTTP_PROXY` / `HTTPS_PROXY` environment variables.
    pub fn new() -> Self {
        let proxy = env::var("HTTP_PROXY")
            .ok()
            .or_else(|| env::var("HTTPS_PROXY").ok());

        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            proxy,
            timeout: None,
            save_err_to_txt: false,
            show_progress: true,
        }
    }

    /// Override the conversion endpoint.
    pub fn set_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Override the HTTP/HTTPS proxy URL.
    pub fn set_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Give up on a request after `timeout` (default: wait forever).
    pub fn set_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Persist non-empty error reports to `<name>.txt` (default: `false`).
    pub fn save_err_to_txt(mut self, enabled: bool) -> Self {
        self.save_err_to_txt = enabled;
        self
    }

    /// Disable console output.
    pub fn no_progress(mut self) -> Self {
        self.show_progress = false;
        self
    }

    /// Build the [`Converter`].
    pub fn converter(self) -> Converter {
        Converter {
            client: BikeshedClient::new(&self.endpoint, self.proxy.as_deref(), self.timeout),
            save_err_to_txt: self.save_err_to_txt,
            show_progress: self.show_progress,
        }
    }
}
