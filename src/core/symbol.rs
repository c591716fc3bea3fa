use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// A normalized BVB ticker: upper-case ASCII letters and digits only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Normalizes `input` (spaces removed, upper-cased) and returns `None` when the
    /// result is empty or contains anything but ASCII letters and digits.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let normalized: String = input
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_uppercase();
        if normalized.is_empty() || !normalized.chars().all(|c| c.is_ascii_alphanumeric()) {
            return None;
        }
        Some(Self(normalized))
    }

    /// The ticker as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Symbol {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("invalid symbol `{value}`"))
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.0
    }
}

/// Which shares a listing query should return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolSelector {
    /// Every share currently listed, in listing order.
    All,
    /// The given symbols, in this order. Never contains duplicates.
    List(Vec<Symbol>),
}

impl SymbolSelector {
    /// Builds a list selector, keeping the first occurrence of each plausible
    /// ticker and silently discarding empty or malformed entries.
    pub fn list<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<Symbol> = Vec::new();
        for raw in symbols {
            if let Some(sym) = Symbol::parse(raw.as_ref())
                && !out.contains(&sym)
            {
                out.push(sym);
            }
        }
        Self::List(out)
    }

    /// Interprets a dynamic value: a string (`"ALL"` or `""` meaning every share,
    /// otherwise one ticker) or an array whose non-string elements are ignored.
    /// Any other JSON type selects nothing.
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(s) => Self::from(s.as_str()),
            serde_json::Value::Array(items) => {
                Self::list(items.iter().filter_map(serde_json::Value::as_str))
            }
            _ => Self::List(Vec::new()),
        }
    }

    /// True for the wildcard selector.
    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl From<&str> for SymbolSelector {
    fn from(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("ALL") {
            Self::All
        } else {
            Self::list([trimmed])
        }
    }
}

impl From<String> for SymbolSelector {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<Vec<&str>> for SymbolSelector {
    fn from(value: Vec<&str>) -> Self {
        Self::list(value)
    }
}

impl From<Vec<String>> for SymbolSelector {
    fn from(value: Vec<String>) -> Self {
        Self::list(value)
    }
}

impl<const N: usize> From<[&str; N]> for SymbolSelector {
    fn from(value: [&str; N]) -> Self {
        Self::list(value)
    }
}
