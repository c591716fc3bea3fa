use serde::Deserialize;
use serde_json::Value;

use crate::core::{BvbError, Schema};

/// Columnar history payload: one array per field, aligned by index.
#[derive(Debug, Deserialize)]
pub(crate) struct HistoryEnvelope {
    pub(crate) s: String,
    #[serde(default)]
    pub(crate) errmsg: Option<String>,
    #[serde(default)]
    pub(crate) t: Vec<i64>,
    #[serde(default)]
    pub(crate) o: Vec<Value>,
    #[serde(default)]
    pub(crate) h: Vec<Value>,
    #[serde(default)]
    pub(crate) l: Vec<Value>,
    #[serde(default)]
    pub(crate) c: Vec<Value>,
    #[serde(default)]
    pub(crate) v: Vec<Value>,
}

/// Decodes a history body. `"s":"no_data"` yields `None`.
pub(crate) fn decode_history(body: &str) -> Result<Option<HistoryEnvelope>, BvbError> {
    let schema = Schema::TradingHistory;
    let env: HistoryEnvelope = serde_json::from_str(body)
        .map_err(|e| BvbError::parse(schema, "body", format!("json parse error: {e}")))?;

    match env.s.as_str() {
        "ok" => {}
        "no_data" => return Ok(None),
        "error" => {
            return Err(BvbError::parse(
                schema,
                "s",
                env.errmsg.unwrap_or_else(|| "upstream error".into()),
            ));
        }
        other => {
            return Err(BvbError::parse(schema, "s", format!("unexpected status `{other}`")));
        }
    }

    let n = env.t.len();
    for (name, len) in [
        ("o", env.o.len()),
        ("h", env.h.len()),
        ("l", env.l.len()),
        ("c", env.c.len()),
        ("v", env.v.len()),
    ] {
        if len != n {
            return Err(BvbError::parse(
                schema,
                name,
                format!("length {len} does not match {n} timestamps"),
            ));
        }
    }
    Ok(Some(env))
}
