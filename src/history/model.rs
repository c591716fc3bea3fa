use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::Symbol;
use crate::core::conversions::{exchange_date, i64_to_datetime};
use crate::shares::Share;

/// One bar of a share's price history.
///
/// Serializes with the exchange's short keys (`t`, `o`, `h`, `l`, `c`, `v`, `s`)
/// plus `symbol`. Consumers that only want OHLCV can ignore `s`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradingHistoryEntry {
    pub symbol: Symbol,
    /// Bar timestamp, Unix seconds.
    #[serde(rename = "t")]
    pub timestamp: i64,
    #[serde(rename = "o")]
    pub open: Decimal,
    #[serde(rename = "h")]
    pub high: Decimal,
    #[serde(rename = "l")]
    pub low: Decimal,
    #[serde(rename = "c")]
    pub close: Decimal,
    #[serde(rename = "v")]
    pub volume: u64,
    /// Status flag of the response the bar came from (`"ok"`).
    #[serde(rename = "s")]
    pub status: String,
}

impl TradingHistoryEntry {
    /// Bar timestamp as a UTC datetime.
    #[must_use]
    pub fn datetime(&self) -> DateTime<Utc> {
        i64_to_datetime(self.timestamp)
    }

    /// Trading day of the bar in the exchange timezone.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        exchange_date(self.timestamp)
    }
}

/// The share a history request is for: a bare symbol, or a [`Share`] whose known
/// first trading day anchors the `max` period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareRef {
    pub(crate) symbol: String,
    pub(crate) start_trading_date: Option<NaiveDate>,
}

impl From<&str> for ShareRef {
    fn from(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            start_trading_date: None,
        }
    }
}

impl From<String> for ShareRef {
    fn from(symbol: String) -> Self {
        Self {
            symbol,
            start_trading_date: None,
        }
    }
}

impl From<Symbol> for ShareRef {
    fn from(symbol: Symbol) -> Self {
        Self::from(String::from(symbol))
    }
}

impl From<&Share> for ShareRef {
    fn from(share: &Share) -> Self {
        Self {
            symbol: share.symbol.to_string(),
            start_trading_date: share.start_trading_date,
        }
    }
}
