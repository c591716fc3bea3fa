use serde::Deserialize;

use crate::company::model::upper;
use crate::core::{BvbError, Schema};

/// `wapi` symbol info payload. Only the fields the crate keeps are modelled.
#[derive(Deserialize)]
pub(crate) struct SymbolInfoWire {
    #[serde(default)]
    pub(crate) s: Option<String>,
    #[serde(default)]
    pub(crate) errmsg: Option<String>,
    #[serde(default)]
    pub(crate) sector: Option<String>,
    #[serde(default)]
    pub(crate) industry: Option<String>,
    #[serde(default)]
    pub(crate) timezone: Option<String>,
}

/// Normalized symbol info.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct SymbolInfo {
    pub(crate) sector: Option<String>,
    pub(crate) industry: Option<String>,
    pub(crate) timezone: Option<String>,
}

pub(crate) fn decode_symbol_info(_symbol: &str, body: &str) -> Result<SymbolInfo, BvbError> {
    let wire: SymbolInfoWire = serde_json::from_str(body)
        .map_err(|e| BvbError::parse(Schema::SymbolInfo, "body", format!("json parse error: {e}")))?;

    if wire.s.as_deref() == Some("error") {
        #[cfg(feature = "tracing")]
        tracing::warn!(
            symbol = %_symbol,
            errmsg = wire.errmsg.as_deref().unwrap_or(""),
            "symbol info unavailable"
        );
        return Ok(SymbolInfo::default());
    }

    Ok(SymbolInfo {
        sector: wire.sector.as_deref().and_then(upper),
        industry: wire.industry.as_deref().and_then(upper),
        timezone: wire
            .timezone
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty()),
    })
}
