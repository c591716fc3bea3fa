//! Centralized constants for default endpoints and UA.

/// Default desktop UA; the exchange serves a reduced page to unknown agents.
pub(crate) const USER_AGENT: &str = concat!(
    "Mozilla/5.0 (X11; Linux x86_64) ",
    "AppleWebKit/537.36 (KHTML, like Gecko) ",
    "Chrome/122.0.0.0 Safari/537.36"
);

/// Main site base (listing CSV and instrument detail pages).
pub(crate) const DEFAULT_BASE_WWW: &str = "https://www.bvb.ro/";

/// Web API base (symbol info and price history).
pub(crate) const DEFAULT_BASE_WAPI: &str = "https://wapi.bvb.ro/";

/// Referer the web API expects; requests without it are rejected.
pub(crate) const WAPI_REFERER: &str = "https://www.bvb.ro/";

/// Listing CSV, relative to the `www` base.
pub(crate) const PATH_SHARES_LIST: &str = "FinancialInstruments/Markets/SharesListForDownload.ashx";

/// Instrument details page, relative to the `www` base (`?s=SYMBOL`).
pub(crate) const PATH_INSTRUMENT_DETAILS: &str =
    "FinancialInstruments/Details/FinancialInstrumentsDetails.aspx";

/// Symbol info JSON, relative to the `wapi` base (`?symbol=SYMBOL`).
pub(crate) const PATH_SYMBOL_INFO: &str = "api/symbols";

/// Price history JSON, relative to the `wapi` base.
pub(crate) const PATH_HISTORY: &str = "api/history";

/// Default number of per-share enrichment requests kept in flight.
pub(crate) const DEFAULT_CONCURRENCY: usize = 4;
