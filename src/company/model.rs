use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::conversions::non_placeholder;
use crate::core::{BvbError, Schema};

/// The issuer behind a listed share.
///
/// Core fields come from the shares listing; `sector`, `industry` and `timezone`
/// from the symbol info endpoint; the rest only when the issuer profile page was
/// scraped (see `SharesBuilder::company_details`).
///
/// Serialized field names follow the flattened info view (`company_name`,
/// `headquarters`), so [`Company::info`](crate::Company::info) and
/// [`Company::from_info`](crate::Company::from_info) are exact inverses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Registered issuer name.
    #[serde(rename = "company_name")]
    pub name: String,
    /// Fiscal / unique registration code (CUI).
    pub fiscal_code: String,
    /// Four digit NACE (CAEN) activity code.
    pub nace_code: Option<String>,
    /// County / district of the headquarters.
    pub district: Option<String>,
    /// ISO 3166-1 alpha-2 country code, upper-case.
    pub country_iso2: Option<String>,
    /// Sector, upper-case.
    pub sector: Option<String>,
    /// Industry, upper-case.
    pub industry: Option<String>,
    /// IANA timezone the exchange reports for the symbol.
    pub timezone: Option<String>,
    /// Trade registry number, e.g. `J40/1234/1991`.
    pub commerce_registry_code: Option<String>,
    /// Headquarters address.
    #[serde(rename = "headquarters")]
    pub address: Option<String>,
    pub website: Option<String>,
    pub email: Option<String>,
    /// Field of activity, upper-case.
    pub activity_field: Option<String>,
    pub description: Option<String>,
    /// Shareholder structure, when published.
    pub shareholders: Option<Vec<Shareholder>>,
}

/// One row of an issuer's shareholder structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shareholder {
    pub name: String,
    /// Number of shares held.
    pub shares: Option<u64>,
    /// Percentage of the share capital, e.g. `51.35`.
    pub percentage: Option<Decimal>,
}

impl Company {
    /// Creates a company with only the required fields set.
    ///
    /// # Errors
    ///
    /// Returns `BvbError::Parse` (attributed to `schema`) when the name or the fiscal
    /// code is blank.
    pub fn new(
        name: &str,
        fiscal_code: &str,
        schema: Schema,
    ) -> Result<Self, BvbError> {
        let name = non_placeholder(name)
            .ok_or_else(|| BvbError::parse(schema, "Issuer", "company name must be given"))?;
        let fiscal_code = non_placeholder(fiscal_code).ok_or_else(|| {
            BvbError::parse(schema, "Fiscal / Unique Code", "fiscal code must be given")
        })?;
        Ok(Self {
            name: name.to_string(),
            fiscal_code: fiscal_code.to_string(),
            nace_code: None,
            district: None,
            country_iso2: None,
            sector: None,
            industry: None,
            timezone: None,
            commerce_registry_code: None,
            address: None,
            website: None,
            email: None,
            activity_field: None,
            description: None,
            shareholders: None,
        })
    }
}

/* ---------------- field normalizers ---------------- */

/// Keeps the code only when it is exactly four digits (dashes removed).
pub(crate) fn normalize_nace(raw: &str) -> Option<String> {
    let code: String = raw.chars().filter(|c| *c != '-').collect();
    let code = code.trim();
    (code.len() == 4 && code.bytes().all(|b| b.is_ascii_digit())).then(|| code.to_string())
}

/// Two ASCII letters, upper-cased; anything else is rejected.
pub(crate) fn normalize_country(
    raw: &str,
    schema: Schema,
    field: &str,
) -> Result<Option<String>, BvbError> {
    let Some(t) = non_placeholder(raw) else {
        return Ok(None);
    };
    let code = t.to_ascii_uppercase();
    if code.len() == 2 && code.bytes().all(|b| b.is_ascii_uppercase()) {
        Ok(Some(code))
    } else {
        Err(BvbError::parse(
            schema,
            field,
            format!("`{t}` is not a two letter country code"),
        ))
    }
}

/// Trimmed and upper-cased; blank and `-` become `None`.
pub(crate) fn upper(raw: &str) -> Option<String> {
    non_placeholder(raw).map(str::to_uppercase)
}

/// Keeps values starting with `[JCF]NN/<digits>/YYYY`.
pub(crate) fn normalize_registry_code(raw: &str) -> Option<String> {
    let code = non_placeholder(raw)?.to_ascii_uppercase();
    let mut parts = code.splitn(3, '/');
    let (Some(head), Some(number), Some(tail)) = (parts.next(), parts.next(), parts.next()) else {
        return None;
    };
    let head_ok = head.len() == 3
        && matches!(head.as_bytes()[0], b'J' | b'C' | b'F')
        && head.bytes().skip(1).all(|b| b.is_ascii_digit());
    let number_ok = !number.is_empty() && number.bytes().all(|b| b.is_ascii_digit());
    let year_ok = tail.len() >= 4 && tail.bytes().take(4).all(|b| b.is_ascii_digit());
    (head_ok && number_ok && year_ok).then_some(code)
}

/// Keeps values shaped like `local@domain.tld`.
pub(crate) fn normalize_email(raw: &str) -> Option<String> {
    let t = non_placeholder(raw)?;
    let plausible = t.char_indices().any(|(i, c)| {
        if c != '@' || i == 0 {
            return false;
        }
        let domain = &t[i + 1..];
        domain
            .char_indices()
            .any(|(j, d)| d == '.' && j > 0 && j + 1 < domain.len())
    });
    plausible.then(|| t.to_string())
}
