//! bvb-rs: share metadata, issuer profiles and price history from the Bucharest
//! Stock Exchange web platform.
//!
//! Every operation goes through a [`BvbClient`], an immutable handle carrying the
//! endpoint bases and an injectable [`Transport`]. The builders ([`SharesBuilder`],
//! [`HistoryBuilder`]) expose all options; [`get_share_info`] and
//! [`get_trading_history`] are shortcuts for the common cases.
//!
//! ```no_run
//! # async fn run() -> Result<(), bvb_rs::BvbError> {
//! let client = bvb_rs::BvbClient::default();
//! let shares = bvb_rs::get_share_info(&client, ["AAG", "TLV"]).await?;
//! let history =
//!     bvb_rs::get_trading_history(&client, &shares[0], Some("1y"), None, None).await?;
//! println!("{} bars", history.len());
//! # Ok(())
//! # }
//! ```

pub mod company;
pub mod core;
pub mod history;
mod info;
pub mod shares;

pub use crate::company::{Company, Shareholder};
pub use crate::core::{
    BvbClient, BvbClientBuilder, BvbError, HttpTransport, Method, Request, Schema, Symbol,
    SymbolSelector, Transport, TransportFuture,
};
pub use crate::history::{HistoryBuilder, Interval, Period, ShareRef, TradingHistoryEntry};
pub use crate::info::{flatten_info, nest_info};
pub use crate::shares::{Market, Segment, Share, ShareStatus, SharesBuilder, Tier, parse_filter};

/// Fetches shares for a symbol, a list of symbols, or `"ALL"`.
///
/// Symbol info enrichment is on; issue info and issuer profiles are off (use
/// [`SharesBuilder`] to change that). Unknown symbols are silently left out.
///
/// # Errors
///
/// Transport and parse failures; see [`SharesBuilder::fetch`].
pub async fn get_share_info(
    client: &BvbClient,
    symbols: impl Into<SymbolSelector>,
) -> Result<Vec<Share>, BvbError> {
    SharesBuilder::new(client).symbols(symbols).fetch().await
}

/// Fetches daily price history for a symbol or a [`Share`].
///
/// `period` is one of `1d, 5d, 1m, 3m, 6m, 1y, 2y, 5y, 10y, ytd, max`; dates are
/// `YYYY-MM-DD`, and `end_date` may also be `"now"`. When both a period and a start
/// date are given, the start date wins and the period is not parsed at all.
///
/// # Errors
///
/// `InvalidParams` for an unknown period (when it is used) or a malformed date, `InvalidDates` when the
/// start falls after the end, plus transport and parse failures.
pub async fn get_trading_history(
    client: &BvbClient,
    share: impl Into<ShareRef>,
    period: Option<&str>,
    start_date: Option<&str>,
    end_date: Option<&str>,
) -> Result<Vec<TradingHistoryEntry>, BvbError> {
    let mut builder = HistoryBuilder::new(client, share);
    match start_date {
        Some(s) => builder = builder.start(history::parse_date(s, "start date")?),
        None => {
            if let Some(p) = period {
                builder = builder.period(p.parse()?);
            }
        }
    }
    if let Some(e) = end_date.filter(|e| !e.trim().eq_ignore_ascii_case("now")) {
        builder = builder.end(history::parse_date(e, "end date")?);
    }
    builder.fetch().await
}

/// Installs a compact `tracing` subscriber filtered by `RUST_LOG` (default `info`).
/// Does nothing if a global subscriber is already set.
#[cfg(feature = "tracing-subscriber")]
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .try_init();
}
