mod assemble;
mod fetch;

use chrono::NaiveDate;

use crate::core::conversions::exchange_today;
use crate::core::{BvbClient, BvbError, Symbol};
use crate::history::model::{ShareRef, TradingHistoryEntry};
use crate::history::params::{Interval, Period, resolve_window};

use assemble::assemble_entries;
use fetch::fetch_history;

#[cfg(test)]
pub(crate) use fetch::history_request;

/// A builder for fetching the price history of a single share.
///
/// Either a [`Period`] or a start date must be set. When both are set the explicit
/// start date wins and the period is ignored. The end date defaults to today in
/// the exchange timezone.
#[derive(Debug, Clone)]
pub struct HistoryBuilder {
    #[doc(hidden)]
    pub(crate) client: BvbClient,
    #[doc(hidden)]
    pub(crate) share: ShareRef,
    #[doc(hidden)]
    pub(crate) period: Option<Period>,
    #[doc(hidden)]
    pub(crate) start: Option<NaiveDate>,
    #[doc(hidden)]
    pub(crate) end: Option<NaiveDate>,
    #[doc(hidden)]
    pub(crate) interval: Interval,
    #[doc(hidden)]
    pub(crate) adjusted: bool,
    #[doc(hidden)]
    pub(crate) as_of: Option<NaiveDate>,
}

impl HistoryBuilder {
    /// Creates a new `HistoryBuilder` for a symbol or a [`Share`](crate::Share).
    pub fn new(client: &BvbClient, share: impl Into<ShareRef>) -> Self {
        Self {
            client: client.clone(),
            share: share.into(),
            period: None,
            start: None,
            end: None,
            interval: Interval::D1,
            adjusted: true,
            as_of: None,
        }
    }

    /// Sets a named relative range (e.g., `1y`, `ytd`, `max`).
    pub fn period(mut self, period: Period) -> Self {
        self.period = Some(period);
        self
    }

    /// Sets the first day to include. Takes precedence over `period`.
    pub fn start(mut self, date: NaiveDate) -> Self {
        self.start = Some(date);
        self
    }

    /// Sets the last day to include. (Default: today)
    pub fn end(mut self, date: NaiveDate) -> Self {
        self.end = Some(date);
        self
    }

    /// Sets both bounds, inclusive.
    pub fn between(self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start(start).end(end)
    }

    /// Sets the bar size. (Default: one day)
    pub fn interval(mut self, interval: Interval) -> Self {
        self.interval = interval;
        self
    }

    /// Sets whether prices are adjusted for corporate actions. (Default: `true`)
    pub fn adjusted(mut self, yes: bool) -> Self {
        self.adjusted = yes;
        self
    }

    /// Uses `date` instead of the current exchange date as "today".
    pub fn as_of(mut self, date: NaiveDate) -> Self {
        self.as_of = Some(date);
        self
    }

    /// Executes the request.
    ///
    /// A symbol that is not a plausible ticker, or for which the exchange reports no
    /// data, yields an empty vector.
    ///
    /// # Errors
    ///
    /// `InvalidParams`/`InvalidDates` for an unusable window, transport errors as-is,
    /// and `Parse` for an unexpected payload.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(symbol = %self.share.symbol)))]
    pub async fn fetch(self) -> Result<Vec<TradingHistoryEntry>, BvbError> {
        let today = self.as_of.unwrap_or_else(exchange_today);
        let window = resolve_window(
            self.period,
            self.start,
            self.end,
            today,
            self.share.start_trading_date,
        )?;

        let Some(symbol) = Symbol::parse(&self.share.symbol) else {
            #[cfg(feature = "tracing")]
            tracing::warn!("not a valid symbol, returning no history");
            return Ok(Vec::new());
        };

        let Some(env) =
            fetch_history(&self.client, &symbol, window, self.interval, self.adjusted).await?
        else {
            #[cfg(feature = "tracing")]
            tracing::debug!("no data in window");
            return Ok(Vec::new());
        };

        let entries = assemble_entries(&symbol, &env, window, self.interval)?;
        #[cfg(feature = "tracing")]
        tracing::debug!(entries = entries.len(), "history assembled");
        Ok(entries)
    }
}
