//! Parser for the `SharesListForDownload.ashx` CSV.
//!
//! The file is `;`-separated with `\r\n` line endings. Depending on the session
//! language the header row is English or Romanian; Romanian headers are mapped to
//! their English names before columns are located.

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::company::Company;
use crate::company::model::{normalize_country, normalize_nace};
use crate::core::conversions::{non_placeholder, parse_count, parse_decimal_text};
use crate::core::{BvbError, Schema, Symbol};

use super::model::{Market, Segment, Share, ShareStatus, Tier};

const SCHEMA: Schema = Schema::ShareListing;

const RO_EN_HEADERS: &[(&str, &str)] = &[
    ("Simbol", "Symbol"),
    ("Denumire emisiune", "Security name"),
    ("ISIN", "ISIN"),
    ("Emitent", "Issuer"),
    ("Cod Fiscal / CUI", "Fiscal / Unique Code"),
    ("Actiuni", "Shares"),
    ("Valoare nominala", "Face value"),
    ("Cod CAEN", "CAEN Code"),
    ("Judet", "District"),
    ("Tara", "Country"),
    ("Sectiune bursa", "Exchange segment"),
    ("Piata Principala", "Main Market"),
    ("Categoria", "Tier"),
    ("Stare", "Status"),
    ("Model tranzactionare", "Trading Model Type"),
    ("Lista pasi de pret", "Price steps list"),
];

/// Column indices of every field the parser reads.
struct Columns {
    symbol: usize,
    name: usize,
    isin: usize,
    issuer: usize,
    fiscal_code: usize,
    shares: usize,
    face_value: usize,
    nace_code: usize,
    district: usize,
    country: usize,
    segment: usize,
    market: usize,
    tier: usize,
    status: usize,
}

fn normalize_headers(record: &StringRecord) -> Vec<String> {
    let headers: Vec<String> = record
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    if !headers.iter().any(|h| h.eq_ignore_ascii_case("Simbol")) {
        return headers;
    }

    headers
        .into_iter()
        .map(|h| {
            match RO_EN_HEADERS
                .iter()
                .find(|(ro, _)| ro.eq_ignore_ascii_case(&h))
            {
                Some((_, en)) => (*en).to_string(),
                None => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(header = %h, "no English mapping for Romanian listing header");
                    h
                }
            }
        })
        .collect()
}

impl Columns {
    fn locate(headers: &[String]) -> Result<Self, BvbError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.eq_ignore_ascii_case(name))
                .ok_or_else(|| BvbError::parse(SCHEMA, name, "expected column not found in header"))
        };
        Ok(Self {
            symbol: find("Symbol")?,
            name: find("Security name")?,
            isin: find("ISIN")?,
            issuer: find("Issuer")?,
            fiscal_code: find("Fiscal / Unique Code")?,
            shares: find("Shares")?,
            face_value: find("Face value")?,
            nace_code: find("CAEN Code")?,
            district: find("District")?,
            country: find("Country")?,
            segment: find("Exchange segment")?,
            market: find("Main Market")?,
            tier: find("Tier")?,
            status: find("Status")?,
        })
    }
}

/// Parses the whole listing, in file order.
///
/// # Errors
///
/// Fails with `BvbError::Parse` when a required column is missing or any row holds
/// a value that does not validate; no partial listing is returned.
pub(crate) fn parse_listing(body: &str) -> Result<Vec<Share>, BvbError> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(body.as_bytes());

    let mut records = reader.records();
    let header = match records.next() {
        Some(rec) => rec.map_err(|e| BvbError::parse(SCHEMA, "header", e.to_string()))?,
        None => return Err(BvbError::parse(SCHEMA, "header", "empty listing")),
    };
    let cols = Columns::locate(&normalize_headers(&header))?;

    let mut shares = Vec::new();
    for (line, rec) in records.enumerate() {
        let rec = rec.map_err(|e| BvbError::parse(SCHEMA, "row", e.to_string()))?;
        if rec.len() <= 1 {
            continue;
        }
        let share = parse_row(&rec, &cols).map_err(|e| in_row(e, line + 2, rec.get(cols.symbol)))?;
        shares.push(share);
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(rows = shares.len(), "parsed shares listing");
    Ok(shares)
}

fn in_row(err: BvbError, line: usize, symbol: Option<&str>) -> BvbError {
    match err {
        BvbError::Parse {
            schema,
            field,
            reason,
        } => BvbError::Parse {
            schema,
            field,
            reason: format!("line {line} ({}): {reason}", symbol.unwrap_or("?")),
        },
        other => other,
    }
}

fn parse_row(rec: &StringRecord, cols: &Columns) -> Result<Share, BvbError> {
    let cell = |i: usize| rec.get(i).unwrap_or("");

    let symbol = Symbol::parse(cell(cols.symbol)).ok_or_else(|| {
        BvbError::parse(
            SCHEMA,
            "Symbol",
            format!("`{}` is not a valid symbol", cell(cols.symbol)),
        )
    })?;

    let isin = match non_placeholder(cell(cols.isin)) {
        Some(v) if is_isin(v) => Some(v.to_string()),
        Some(v) => {
            return Err(BvbError::parse(SCHEMA, "ISIN", format!("invalid ISIN code `{v}`")));
        }
        None => None,
    };

    let total_shares = parse_count(cell(cols.shares), SCHEMA, "Shares")?;
    if total_shares == Some(0) {
        return Err(BvbError::parse(SCHEMA, "Shares", "total shares must be positive"));
    }

    let mut company = Company::new(cell(cols.issuer), cell(cols.fiscal_code), SCHEMA)?;
    company.nace_code = normalize_nace(cell(cols.nace_code));
    company.district = non_placeholder(cell(cols.district)).map(str::to_string);
    company.country_iso2 = normalize_country(cell(cols.country), SCHEMA, "Country")?;

    Ok(Share {
        symbol,
        isin,
        name: non_placeholder(cell(cols.name)).map(str::to_string),
        total_shares,
        face_value: parse_decimal_text(cell(cols.face_value), SCHEMA, "Face value")?,
        segment: coded(cell(cols.segment), "Exchange segment", Segment::from_code)?,
        market: coded(cell(cols.market), "Main Market", Market::from_code)?,
        tier: coded(cell(cols.tier), "Tier", Tier::from_code)?,
        status: coded(cell(cols.status), "Status", ShareStatus::from_code)?,
        start_trading_date: None,
        company,
    })
}

/// `-`/blank → `None`; a known code → `Some`; anything else is a parse error.
fn coded<T>(raw: &str, field: &str, from_code: fn(&str) -> Option<T>) -> Result<Option<T>, BvbError> {
    match non_placeholder(raw) {
        None => Ok(None),
        Some(v) => from_code(v)
            .map(Some)
            .ok_or_else(|| BvbError::parse(SCHEMA, field, format!("unknown value `{v}`"))),
    }
}

/// Two letters, nine letters/digits, one check digit.
pub(crate) fn is_isin(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 12
        && b[..2].iter().all(u8::is_ascii_uppercase)
        && b[2..11]
            .iter()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        && b[11].is_ascii_digit()
}
