use crate::core::client::constants::WAPI_REFERER;
use crate::core::{BvbClient, BvbError, Request, Symbol};

use super::listing::parse_listing;
use super::model::Share;
use super::wire::{SymbolInfo, decode_symbol_info};

/// Downloads and parses the full shares listing.
pub(crate) async fn fetch_listing(client: &BvbClient) -> Result<Vec<Share>, BvbError> {
    let body = client.send(Request::get(client.shares_list_url()?)).await?;
    parse_listing(&body)
}

pub(crate) async fn fetch_symbol_info(
    client: &BvbClient,
    symbol: &Symbol,
) -> Result<SymbolInfo, BvbError> {
    let req = Request::get(client.symbol_info_url(symbol.as_str())?).header("Referer", WAPI_REFERER);
    let body = client.send(req).await?;
    decode_symbol_info(symbol.as_str(), &body)
}
