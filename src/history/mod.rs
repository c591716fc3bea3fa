//! Price history from the exchange web API.

mod builder;
mod model;
mod params;
mod wire;

pub use builder::HistoryBuilder;
pub use model::{ShareRef, TradingHistoryEntry};
pub use params::{Interval, Period};

pub(crate) use params::parse_date;
