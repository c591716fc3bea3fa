use std::collections::{HashMap, HashSet};

use crate::core::{Symbol, SymbolSelector};

use super::model::{Market, Share, Tier};

/// Market/tier restriction applied to listing rows. Empty lists match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ListingFilter {
    pub(crate) markets: Vec<Market>,
    pub(crate) tiers: Vec<Tier>,
}

impl ListingFilter {
    pub(crate) fn matches(&self, share: &Share) -> bool {
        let market_ok =
            self.markets.is_empty() || share.market.is_some_and(|m| self.markets.contains(&m));
        let tier_ok = self.tiers.is_empty() || share.tier.is_some_and(|t| self.tiers.contains(&t));
        market_ok && tier_ok
    }
}

/// Lookup-or-skip: picks the requested shares out of the listing.
///
/// The wildcard keeps listing order (first row per symbol wins). A list keeps the
/// caller's order and silently drops symbols the listing does not contain.
pub(crate) fn select(listing: Vec<Share>, selector: &SymbolSelector, filter: &ListingFilter) -> Vec<Share> {
    let rows = listing.into_iter().filter(|s| filter.matches(s));

    match selector {
        SymbolSelector::All => {
            let mut seen: HashSet<Symbol> = HashSet::new();
            let mut out = Vec::new();
            for share in rows {
                if !seen.insert(share.symbol.clone()) {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(symbol = %share.symbol, "duplicate listing row ignored");
                    continue;
                }
                out.push(share);
            }
            out
        }
        SymbolSelector::List(wanted) => {
            let mut by_symbol: HashMap<Symbol, Share> = HashMap::new();
            for share in rows {
                by_symbol.entry(share.symbol.clone()).or_insert(share);
            }
            wanted
                .iter()
                .filter_map(|sym| {
                    let hit = by_symbol.remove(sym);
                    if hit.is_none() {
                        #[cfg(feature = "tracing")]
                        tracing::debug!(symbol = %sym, "symbol not listed, skipped");
                    }
                    hit
                })
                .collect()
        }
    }
}
