use crate::core::conversions::{exchange_date, json_to_decimal, json_to_u64};
use crate::core::{BvbError, Schema, Symbol};
use crate::history::model::TradingHistoryEntry;
use crate::history::params::{Interval, Window};
use crate::history::wire::HistoryEnvelope;

/// Turns the columnar payload into entries: incomplete bars dropped, sorted by
/// timestamp, one bar per timestamp, restricted to bars overlapping `window`.
pub(crate) fn assemble_entries(
    symbol: &Symbol,
    env: &HistoryEnvelope,
    window: Window,
    interval: Interval,
) -> Result<Vec<TradingHistoryEntry>, BvbError> {
    let schema = Schema::TradingHistory;
    let mut out = Vec::with_capacity(env.t.len());
    let mut incomplete = 0usize;

    for (i, &t) in env.t.iter().enumerate() {
        let open = json_to_decimal(&env.o[i], schema, "o")?;
        let high = json_to_decimal(&env.h[i], schema, "h")?;
        let low = json_to_decimal(&env.l[i], schema, "l")?;
        let close = json_to_decimal(&env.c[i], schema, "c")?;
        let volume = json_to_u64(&env.v[i], schema, "v")?;

        let (Some(open), Some(high), Some(low), Some(close), Some(volume)) =
            (open, high, low, close, volume)
        else {
            incomplete += 1;
            continue;
        };
        if !window.covers_bar(exchange_date(t), interval) {
            continue;
        }
        out.push(TradingHistoryEntry {
            symbol: symbol.clone(),
            timestamp: t,
            open,
            high,
            low,
            close,
            volume,
            status: env.s.clone(),
        });
    }

    if incomplete > 0 {
        #[cfg(feature = "tracing")]
        tracing::warn!(%symbol, incomplete, "dropped bars with missing values");
    }

    out.sort_by_key(|e| e.timestamp);
    out.dedup_by_key(|e| e.timestamp);
    Ok(out)
}
