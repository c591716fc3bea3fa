use crate::core::client::constants::WAPI_REFERER;
use crate::core::conversions::{exchange_day_end, exchange_day_start};
use crate::core::{BvbClient, BvbError, Request, Symbol};
use crate::history::params::{Interval, Window};
use crate::history::wire::{HistoryEnvelope, decode_history};

/// Builds the `api/history` request covering `window` (whole exchange-local days).
///
/// `from` never goes below the Unix epoch: local midnight of 1970-01-01 is
/// 22:00 UTC the day before.
pub(crate) fn history_request(
    client: &BvbClient,
    symbol: &Symbol,
    window: Window,
    interval: Interval,
    adjusted: bool,
) -> Result<Request, BvbError> {
    let mut url = client.history_url()?;
    url.query_pairs_mut()
        .append_pair("symbol", symbol.as_str())
        .append_pair("dt", interval.dt())
        .append_pair("p", interval.p())
        .append_pair("ajust", if adjusted { "1" } else { "0" })
        .append_pair("from", &exchange_day_start(window.start).max(0).to_string())
        .append_pair("to", &exchange_day_end(window.end).to_string());
    Ok(Request::get(url).header("Referer", WAPI_REFERER))
}

pub(crate) async fn fetch_history(
    client: &BvbClient,
    symbol: &Symbol,
    window: Window,
    interval: Interval,
    adjusted: bool,
) -> Result<Option<HistoryEnvelope>, BvbError> {
    let req = history_request(client, symbol, window, interval, adjusted)?;
    let body = client.send(req).await?;
    decode_history(&body)
}
