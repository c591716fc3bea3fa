use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::core::BvbError;

/// Named relative range ending at the request's end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    D1,
    D5,
    M1,
    M3,
    M6,
    Y1,
    Y2,
    Y5,
    Y10,
    /// From January 1st of the end date's year.
    Ytd,
    /// From the share's first trading day (or 1970-01-01 when unknown).
    Max,
}

impl Period {
    /// Canonical lower-case spelling (`"1y"`, `"ytd"`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::D1 => "1d",
            Self::D5 => "5d",
            Self::M1 => "1m",
            Self::M3 => "3m",
            Self::M6 => "6m",
            Self::Y1 => "1y",
            Self::Y2 => "2y",
            Self::Y5 => "5y",
            Self::Y10 => "10y",
            Self::Ytd => "ytd",
            Self::Max => "max",
        }
    }

    /// First day of the period ending at `end`.
    pub(crate) fn start(self, end: NaiveDate, first_trading_day: Option<NaiveDate>) -> NaiveDate {
        let months_back = |n: u32| end.checked_sub_months(Months::new(n)).unwrap_or(min_start_date());
        match self {
            Self::D1 => end.checked_sub_days(Days::new(1)).unwrap_or(end),
            Self::D5 => end.checked_sub_days(Days::new(5)).unwrap_or(end),
            Self::M1 => months_back(1),
            Self::M3 => months_back(3),
            Self::M6 => months_back(6),
            Self::Y1 => months_back(12),
            Self::Y2 => months_back(24),
            Self::Y5 => months_back(60),
            Self::Y10 => months_back(120),
            Self::Ytd => NaiveDate::from_ymd_opt(end.year(), 1, 1).unwrap_or(end),
            Self::Max => first_trading_day.unwrap_or(min_start_date()),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = BvbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "1d" => Self::D1,
            "5d" => Self::D5,
            "1m" => Self::M1,
            "3m" => Self::M3,
            "6m" => Self::M6,
            "1y" => Self::Y1,
            "2y" => Self::Y2,
            "5y" => Self::Y5,
            "10y" => Self::Y10,
            "ytd" => Self::Ytd,
            "max" => Self::Max,
            _ => return Err(BvbError::InvalidParams(format!("invalid period '{s}'"))),
        })
    }
}

/// Bar size of the price history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Interval {
    Min1,
    Min5,
    Min15,
    Min30,
    H1,
    #[default]
    D1,
    W1,
    /// One month.
    Mo1,
}

impl Interval {
    /// Value of the `dt` query parameter.
    pub(crate) const fn dt(self) -> &'static str {
        match self {
            Self::Min1 | Self::Min5 | Self::Min15 | Self::Min30 | Self::H1 => "INTRA",
            Self::D1 | Self::W1 => "DAILY",
            Self::Mo1 => "MONTH",
        }
    }

    /// Value of the `p` query parameter.
    pub(crate) const fn p(self) -> &'static str {
        match self {
            Self::Min1 => "intraday_1",
            Self::Min5 => "intraday_5",
            Self::Min15 => "intraday_15",
            Self::Min30 => "intraday_30",
            Self::H1 => "intraday_60",
            Self::D1 => "day",
            Self::W1 => "week",
            Self::Mo1 => "month",
        }
    }
}

impl FromStr for Interval {
    type Err = BvbError;

    /// Accepts `1min`, `5min`, `15min`, `30min`, `1h`, `1D`, `1W`, `1M` (case-insensitive;
    /// `1M` is one month).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_uppercase().as_str() {
            "1MIN" => Self::Min1,
            "5MIN" => Self::Min5,
            "15MIN" => Self::Min15,
            "30MIN" => Self::Min30,
            "1H" => Self::H1,
            "1D" => Self::D1,
            "1W" => Self::W1,
            "1M" => Self::Mo1,
            _ => return Err(BvbError::InvalidParams(format!("invalid interval '{s}'"))),
        })
    }
}

/// Earliest start date the history endpoint accepts (1970-01-01).
pub(crate) fn min_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default()
}

/// Inclusive date window of a history request, in exchange-local dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Window {
    pub(crate) start: NaiveDate,
    pub(crate) end: NaiveDate,
}

impl Window {
    pub(crate) fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Whether a bar stamped `date` overlaps the window. Weekly and monthly bars are
    /// stamped with their first day, so the bar in progress at `start` is kept.
    pub(crate) fn covers_bar(&self, date: NaiveDate, interval: Interval) -> bool {
        match interval {
            Interval::W1 => {
                date <= self.end
                    && date
                        .checked_add_days(Days::new(6))
                        .is_none_or(|last| last >= self.start)
            }
            Interval::Mo1 => {
                date <= self.end
                    && (date.year(), date.month()) >= (self.start.year(), self.start.month())
            }
            _ => self.contains(date),
        }
    }
}

/// Resolves the request window. An explicit start date wins over `period`; the end
/// defaults to `today`.
pub(crate) fn resolve_window(
    period: Option<Period>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    today: NaiveDate,
    first_trading_day: Option<NaiveDate>,
) -> Result<Window, BvbError> {
    let end = end.unwrap_or(today);
    let start = match (start, period) {
        (Some(s), _overridden) => {
            #[cfg(feature = "tracing")]
            if let Some(p) = _overridden {
                tracing::debug!(period = %p, start = %s, "explicit start date overrides period");
            }
            s
        }
        (None, Some(p)) => p.start(end, first_trading_day),
        (None, None) => {
            return Err(BvbError::InvalidParams(
                "a period or a start date must be provided".into(),
            ));
        }
    };

    if start < min_start_date() {
        return Err(BvbError::InvalidParams(format!(
            "start date {start} is before {}",
            min_start_date()
        )));
    }
    if start > end {
        return Err(BvbError::InvalidDates);
    }
    Ok(Window { start, end })
}

/// Parses a caller supplied `YYYY-MM-DD` date.
pub(crate) fn parse_date(raw: &str, what: &str) -> Result<NaiveDate, BvbError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|e| BvbError::InvalidParams(format!("{what} `{raw}` is not a YYYY-MM-DD date: {e}")))
}
