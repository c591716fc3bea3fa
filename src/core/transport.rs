//! The outbound HTTP seam.
//!
//! Everything above this module builds [`Request`] descriptors and hands them to a
//! [`Transport`]. The default implementation is [`HttpTransport`] (reqwest); tests
//! can inject their own.

use std::future::Future;
use std::pin::Pin;

use url::Url;

use crate::core::BvbError;

/// HTTP verbs used against the exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Plain GET.
    Get,
    /// Form-encoded POST (ASP.NET postbacks).
    Post,
}

/// A fully built outbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Verb.
    pub method: Method,
    /// Absolute URL including query string.
    pub url: Url,
    /// Extra headers (name, value).
    pub headers: Vec<(String, String)>,
    /// Form fields for POST requests, in submission order.
    pub form: Vec<(String, String)>,
}

impl Request {
    /// A GET request with no extra headers.
    #[must_use]
    pub fn get(url: Url) -> Self {
        Self {
            method: Method::Get,
            url,
            headers: Vec::new(),
            form: Vec::new(),
        }
    }

    /// A form POST.
    #[must_use]
    pub fn post_form(url: Url, form: Vec<(String, String)>) -> Self {
        Self {
            method: Method::Post,
            url,
            headers: Vec::new(),
            form,
        }
    }

    /// Adds a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Boxed future returned by [`Transport::execute`].
pub type TransportFuture<'a> = Pin<Box<dyn Future<Output = Result<String, BvbError>> + Send + 'a>>;

/// Executes requests and yields the response body as text.
///
/// Implementations must surface non-2xx responses as [`BvbError::Status`] and
/// network failures as-is; nothing above this trait retries.
pub trait Transport: Send + Sync + std::fmt::Debug {
    /// Sends `req` and returns the body of a successful response.
    fn execute(&self, req: Request) -> TransportFuture<'_>;
}

/// Default transport backed by a shared `reqwest::Client` with a cookie store
/// (the details page postback needs the session cookie from the initial GET).
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    /// Wraps an already configured reqwest client.
    #[must_use]
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }
}

impl Transport for HttpTransport {
    fn execute(&self, req: Request) -> TransportFuture<'_> {
        Box::pin(async move {
            let url = req.url.to_string();
            let mut builder = match req.method {
                Method::Get => self.http.get(req.url),
                Method::Post => self.http.post(req.url).form(&req.form),
            };
            for (name, value) in &req.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }

            #[cfg(feature = "tracing")]
            tracing::debug!(%url, method = ?req.method, "sending request");
            let resp = builder.send().await?;
            if !resp.status().is_success() {
                return Err(BvbError::Status {
                    status: resp.status().as_u16(),
                    url,
                });
            }
            let body = resp.text().await?;
            #[cfg(feature = "tracing")]
            tracing::debug!(%url, bytes = body.len(), "received response");
            Ok(body)
        })
    }
}
