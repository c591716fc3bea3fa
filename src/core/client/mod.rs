//! Public client surface + builder.
//! Endpoint defaults live in `constants`.

pub(crate) mod constants;

use crate::core::BvbError;
use crate::core::transport::{HttpTransport, Request, Transport};
use constants::{
    DEFAULT_BASE_WAPI, DEFAULT_BASE_WWW, PATH_HISTORY, PATH_INSTRUMENT_DETAILS, PATH_SHARES_LIST,
    PATH_SYMBOL_INFO, USER_AGENT,
};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Immutable handle to the exchange endpoints.
///
/// Cloning is cheap: the transport is shared. A client holds no per-call state, so
/// the same value can serve any number of concurrent operations.
#[derive(Debug, Clone)]
pub struct BvbClient {
    transport: Arc<dyn Transport>,
    base_www: Url,
    base_wapi: Url,
}

impl Default for BvbClient {
    fn default() -> Self {
        Self::builder().build().expect("default client")
    }
}

impl BvbClient {
    /// Create a new builder.
    pub fn builder() -> BvbClientBuilder {
        BvbClientBuilder::default()
    }

    /* -------- internal helpers used by other modules -------- */

    pub(crate) async fn send(&self, req: Request) -> Result<String, BvbError> {
        self.transport.execute(req).await
    }

    pub(crate) fn shares_list_url(&self) -> Result<Url, BvbError> {
        Ok(self.base_www.join(PATH_SHARES_LIST)?)
    }

    pub(crate) fn details_url(&self, symbol: &str) -> Result<Url, BvbError> {
        let mut url = self.base_www.join(PATH_INSTRUMENT_DETAILS)?;
        url.query_pairs_mut().append_pair("s", symbol);
        Ok(url)
    }

    pub(crate) fn symbol_info_url(&self, symbol: &str) -> Result<Url, BvbError> {
        let mut url = self.base_wapi.join(PATH_SYMBOL_INFO)?;
        url.query_pairs_mut().append_pair("symbol", symbol);
        Ok(url)
    }

    pub(crate) fn history_url(&self) -> Result<Url, BvbError> {
        Ok(self.base_wapi.join(PATH_HISTORY)?)
    }
}

/* ----------------------- Builder ----------------------- */

/// Configures a [`BvbClient`].
#[derive(Default)]
pub struct BvbClientBuilder {
    user_agent: Option<String>,
    base_www: Option<Url>,
    base_wapi: Option<Url>,
    transport: Option<Arc<dyn Transport>>,

    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl BvbClientBuilder {
    /// Override the User-Agent.
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Override the main site base (e.g., `https://www.bvb.ro/`).
    #[must_use]
    pub fn base_www(mut self, url: Url) -> Self {
        self.base_www = Some(url);
        self
    }

    /// Override the web API base (e.g., `https://wapi.bvb.ro/`).
    #[must_use]
    pub fn base_wapi(mut self, url: Url) -> Self {
        self.base_wapi = Some(url);
        self
    }

    /// Replace the reqwest transport. User agent and timeouts are then ignored.
    #[must_use]
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Set a global request timeout (overall). Default: none.
    #[must_use]
    pub const fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    #[must_use]
    pub const fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns `BvbError` if a default base URL fails to parse or the HTTP client
    /// cannot be constructed.
    pub fn build(self) -> Result<BvbClient, BvbError> {
        let base_www = ensure_trailing_slash(match self.base_www {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_WWW)?,
        });
        let base_wapi = ensure_trailing_slash(match self.base_wapi {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_WAPI)?,
        });

        let transport: Arc<dyn Transport> = match self.transport {
            Some(t) => t,
            None => {
                let mut httpb = reqwest::Client::builder()
                    .user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT))
                    .cookie_store(true);

                if let Some(t) = self.timeout {
                    httpb = httpb.timeout(t);
                }
                if let Some(ct) = self.connect_timeout {
                    httpb = httpb.connect_timeout(ct);
                }

                Arc::new(HttpTransport::new(httpb.build()?))
            }
        };

        Ok(BvbClient {
            transport,
            base_www,
            base_wapi,
        })
    }
}

// `Url::join` drops the last path segment unless the base ends with '/'.
fn ensure_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
