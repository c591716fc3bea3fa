use std::fmt;

use thiserror::Error;

/// Identifies which upstream payload a parse failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Schema {
    /// The `;`-separated shares listing CSV.
    ShareListing,
    /// The `wapi` symbol-info JSON.
    SymbolInfo,
    /// The issuer profile tab of the instrument details page.
    CompanyDetail,
    /// The overview tab of the instrument details page.
    IssueInfo,
    /// The `wapi` price history JSON.
    TradingHistory,
}

impl Schema {
    /// Stable tag used in error messages and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ShareListing => "share-listing",
            Self::SymbolInfo => "symbol-info",
            Self::CompanyDetail => "company-detail",
            Self::IssueInfo => "issue-info",
            Self::TradingHistory => "trading-history",
        }
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The primary error type for all fallible operations in this crate.
#[derive(Debug, Error)]
pub enum BvbError {
    /// An error occurred during an HTTP request.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A provided URL could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The server returned an unexpected or unsuccessful HTTP status code.
    #[error("Unexpected response status: {status} at {url}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error.
        url: String,
    },

    /// A response body did not have the expected shape.
    #[error("{schema}: invalid or missing field `{field}`: {reason}")]
    Parse {
        /// Which payload was being parsed.
        schema: Schema,
        /// The field (column, element id, JSON key) that failed.
        field: String,
        /// Human readable detail.
        reason: String,
    },

    /// A value could not be converted to or from its JSON info mapping.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The caller supplied parameters that cannot be turned into a request.
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    /// An invalid date range was provided for a historical data request (start must not be after end).
    #[error("invalid date range: start must not be after end")]
    InvalidDates,
}

impl BvbError {
    pub(crate) fn parse(schema: Schema, field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse {
            schema,
            field: field.into(),
            reason: reason.into(),
        }
    }
}
