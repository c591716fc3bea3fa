use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::company::Company;
use crate::core::{BvbError, Symbol};

/// A listed share and its exchange metadata.
///
/// Serialized field names follow the flattened info view; see [`Share::info`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Share {
    pub symbol: Symbol,
    /// 12-character ISIN, e.g. `ROAAGEACNOR4`.
    pub isin: Option<String>,
    /// Security name (not necessarily the issuer's name).
    #[serde(rename = "share_name")]
    pub name: Option<String>,
    /// Number of shares issued.
    pub total_shares: Option<u64>,
    /// Nominal value per share.
    pub face_value: Option<Decimal>,
    pub segment: Option<Segment>,
    pub market: Option<Market>,
    pub tier: Option<Tier>,
    pub status: Option<ShareStatus>,
    /// First trading day, when the issue info was scraped.
    pub start_trading_date: Option<NaiveDate>,
    pub company: Company,
}

/// Exchange segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Segment {
    /// Main segment.
    #[serde(rename = "BSE")]
    Bse,
    /// Bucharest Equity Restricted.
    #[serde(rename = "BER")]
    Ber,
    /// Alternative trading system.
    #[serde(rename = "ATS")]
    Ats,
}

impl Segment {
    /// Code as it appears in the listing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Bse => "BSE",
            Self::Ber => "BER",
            Self::Ats => "ATS",
        }
    }

    pub(crate) fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "BSE" => Some(Self::Bse),
            "BER" => Some(Self::Ber),
            "ATS" => Some(Self::Ats),
            _ => None,
        }
    }
}

/// Main market a share trades on.
///
/// Parses from the filter abbreviations `REGS`, `AERO` and `MTS`; serializes as the
/// exchange's own codes (`REGS`, `XRS1`, `XRSI`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Market {
    /// Regulated market.
    #[serde(rename = "REGS")]
    Regulated,
    /// AeRO (SME growth market).
    #[serde(rename = "XRS1")]
    Aero,
    /// International MTS.
    #[serde(rename = "XRSI")]
    MtsIntl,
}

impl Market {
    /// Code as it appears in the listing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Regulated => "REGS",
            Self::Aero => "XRS1",
            Self::MtsIntl => "XRSI",
        }
    }

    pub(crate) fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "REGS" => Some(Self::Regulated),
            "XRS1" => Some(Self::Aero),
            "XRSI" => Some(Self::MtsIntl),
            _ => None,
        }
    }
}

impl FromStr for Market {
    type Err = BvbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "REGS" => Ok(Self::Regulated),
            "AERO" => Ok(Self::Aero),
            "MTS" => Ok(Self::MtsIntl),
            _ => Err(BvbError::InvalidParams(format!(
                "the provided '{s}' market abbreviation is not valid"
            ))),
        }
    }
}

/// Market tier.
///
/// Parses from the filter abbreviations (`INTL`, `PREMIUM`, `AERO_BASE`, ...);
/// serializes as the listing codes (`INT'L`, `AERO BASE`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    #[serde(rename = "INT'L")]
    Intl,
    #[serde(rename = "PREMIUM")]
    Premium,
    #[serde(rename = "STANDARD")]
    Standard,
    #[serde(rename = "AERO PREMIUM")]
    AeroPremium,
    #[serde(rename = "AERO STANDARD")]
    AeroStandard,
    #[serde(rename = "AERO BASE")]
    AeroBase,
    #[serde(rename = "INTL-MTS")]
    MtsIntl,
    #[serde(rename = "III-R")]
    ThirdR,
}

impl Tier {
    /// Code as it appears in the English listing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Intl => "INT'L",
            Self::Premium => "PREMIUM",
            Self::Standard => "STANDARD",
            Self::AeroPremium => "AERO PREMIUM",
            Self::AeroStandard => "AERO STANDARD",
            Self::AeroBase => "AERO BASE",
            Self::MtsIntl => "INTL-MTS",
            Self::ThirdR => "III-R",
        }
    }

    /// Accepts English and Romanian listing codes.
    pub(crate) fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "INT'L" => Some(Self::Intl),
            "PREMIUM" => Some(Self::Premium),
            "STANDARD" => Some(Self::Standard),
            "AERO PREMIUM" => Some(Self::AeroPremium),
            "AERO STANDARD" => Some(Self::AeroStandard),
            "AERO BASE" | "AERO BAZA" => Some(Self::AeroBase),
            "INTL-MTS" | "INTL-SMT" => Some(Self::MtsIntl),
            "III-R" => Some(Self::ThirdR),
            _ => None,
        }
    }
}

impl FromStr for Tier {
    type Err = BvbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INTL" => Ok(Self::Intl),
            "PREMIUM" => Ok(Self::Premium),
            "STANDARD" => Ok(Self::Standard),
            "AERO_PREMIUM" => Ok(Self::AeroPremium),
            "AERO_STANDARD" => Ok(Self::AeroStandard),
            "AERO_BASE" => Ok(Self::AeroBase),
            "MTS_INTL" => Ok(Self::MtsIntl),
            "III_R" => Ok(Self::ThirdR),
            _ => Err(BvbError::InvalidParams(format!(
                "the provided '{s}' tier abbreviation is not valid"
            ))),
        }
    }
}

/// Trading status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShareStatus {
    Tradeable,
    Suspended,
}

impl ShareStatus {
    /// Accepts English and Romanian listing values.
    pub(crate) fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "TRADEABLE" | "TRANZACTIONABILA" => Some(Self::Tradeable),
            "SUSPENDED" | "SUSPENDATA" => Some(Self::Suspended),
            _ => None,
        }
    }
}

macro_rules! display_code {
    ($($t:ty),*) => {$(
        impl fmt::Display for $t {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.code())
            }
        }
    )*};
}

display_code!(Segment, Market, Tier);

impl ShareStatus {
    /// English listing value.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Tradeable => "TRADEABLE",
            Self::Suspended => "SUSPENDED",
        }
    }
}

display_code!(ShareStatus);
