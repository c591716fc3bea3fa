//! Share metadata: the listing, symbol info enrichment and details page scraping.

mod api;
mod assemble;
mod issue;
mod listing;
mod model;
mod wire;

use std::str::FromStr;

use futures::{StreamExt, TryStreamExt, stream};

use crate::company::details::{fetch_issuer_profile, fetch_overview};
use crate::company::parse::parse_issuer_profile;
use crate::core::client::constants::DEFAULT_CONCURRENCY;
use crate::core::{BvbClient, BvbError, SymbolSelector};

pub use model::{Market, Segment, Share, ShareStatus, Tier};

use assemble::{ListingFilter, select};

/// Parses caller filter values (`"AERO"`, `"MTS_INTL"`, ...) into typed filters.
///
/// An empty input, or any element equal to `""` or `"ALL"` (case-insensitive), means
/// "no restriction" and yields an empty vector.
///
/// # Errors
///
/// Returns `BvbError::InvalidParams` for any unknown abbreviation.
pub fn parse_filter<T>(values: &[&str]) -> Result<Vec<T>, BvbError>
where
    T: FromStr<Err = BvbError> + PartialEq,
{
    if values
        .iter()
        .any(|v| v.trim().is_empty() || v.trim().eq_ignore_ascii_case("ALL"))
    {
        return Ok(Vec::new());
    }
    let mut out: Vec<T> = Vec::with_capacity(values.len());
    for v in values {
        let parsed = v.parse::<T>()?;
        if !out.contains(&parsed) {
            out.push(parsed);
        }
    }
    Ok(out)
}

/// A builder for fetching share metadata.
///
/// One listing download serves the whole request; per-share enrichment (symbol info,
/// issue info, issuer profile) then runs with bounded concurrency while the result
/// keeps the requested order.
#[derive(Debug, Clone)]
pub struct SharesBuilder {
    client: BvbClient,
    selector: SymbolSelector,
    filter: ListingFilter,
    symbol_info: bool,
    issue_info: bool,
    company_details: bool,
    concurrency: usize,
}

#[derive(Debug, Clone, Copy)]
struct Enrichment {
    symbol_info: bool,
    issue_info: bool,
    company_details: bool,
}

impl SharesBuilder {
    /// Creates a builder selecting every listed share.
    pub fn new(client: &BvbClient) -> Self {
        Self {
            client: client.clone(),
            selector: SymbolSelector::All,
            filter: ListingFilter::default(),
            symbol_info: true,
            issue_info: false,
            company_details: false,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Which shares to return: a symbol, a list of symbols, or `"ALL"`.
    pub fn symbols(mut self, selector: impl Into<SymbolSelector>) -> Self {
        self.selector = selector.into();
        self
    }

    /// Restricts the listing to these markets. Empty means all markets.
    pub fn markets(mut self, markets: impl IntoIterator<Item = Market>) -> Self {
        self.filter.markets = markets.into_iter().collect();
        self
    }

    /// Restricts the listing to these tiers. Empty means all tiers.
    pub fn tiers(mut self, tiers: impl IntoIterator<Item = Tier>) -> Self {
        self.filter.tiers = tiers.into_iter().collect();
        self
    }

    /// Fill `sector`, `industry` and `timezone` from the symbol info endpoint. (Default: `true`)
    pub fn symbol_info(mut self, yes: bool) -> Self {
        self.symbol_info = yes;
        self
    }

    /// Fill `start_trading_date` from the details page Overview tab. (Default: `false`)
    pub fn issue_info(mut self, yes: bool) -> Self {
        self.issue_info = yes;
        self
    }

    /// Fill the extended company fields from the issuer profile tab. (Default: `false`)
    pub fn company_details(mut self, yes: bool) -> Self {
        self.company_details = yes;
        self
    }

    /// Maximum number of shares enriched at once. (Default: 4, minimum 1)
    pub fn concurrency(mut self, n: usize) -> Self {
        self.concurrency = n.max(1);
        self
    }

    /// Executes the request.
    ///
    /// # Errors
    ///
    /// Transport failures and parse failures abort the whole call; symbols the
    /// exchange does not list are not errors and are simply absent from the result.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(selector = ?self.selector)))]
    pub async fn fetch(self) -> Result<Vec<Share>, BvbError> {
        if matches!(&self.selector, SymbolSelector::List(l) if l.is_empty()) {
            return Ok(Vec::new());
        }

        let listing = api::fetch_listing(&self.client).await?;
        let selected = select(listing, &self.selector, &self.filter);
        #[cfg(feature = "tracing")]
        tracing::debug!(selected = selected.len(), "shares selected from listing");

        let how = Enrichment {
            symbol_info: self.symbol_info,
            issue_info: self.issue_info,
            company_details: self.company_details,
        };
        if !(how.symbol_info || how.issue_info || how.company_details) {
            return Ok(selected);
        }

        let client = &self.client;
        stream::iter(selected)
            .map(|share| enrich(client, share, how))
            .buffered(self.concurrency)
            .try_collect()
            .await
    }
}

async fn enrich(client: &BvbClient, mut share: Share, how: Enrichment) -> Result<Share, BvbError> {
    if how.symbol_info {
        let info = api::fetch_symbol_info(client, &share.symbol).await?;
        share.company.sector = info.sector;
        share.company.industry = info.industry;
        share.company.timezone = info.timezone;
    }

    if how.issue_info || how.company_details {
        let page = fetch_overview(client, &share.symbol).await?;
        if how.issue_info {
            share.start_trading_date = issue::parse_start_trading_date(&page.html)?;
        }
        if how.company_details {
            let html = fetch_issuer_profile(client, &page).await?;
            parse_issuer_profile(&html)?.apply_to(&mut share.company);
        }
    }

    Ok(share)
}
