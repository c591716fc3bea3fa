use crate::common;
use bvb_rs::{BvbError, Market, SharesBuilder, Tier, parse_filter};

#[tokio::test]
async fn market_filter_restricts_the_listing() {
    let server = common::setup_server();
    let _listing = common::mock_listing(&server, "shares_list_en.csv");
    let client = common::client_for(&server);

    let markets: Vec<Market> = parse_filter(&["AERO", "MTS"]).unwrap();
    let shares = SharesBuilder::new(&client)
        .markets(markets)
        .symbol_info(false)
        .fetch()
        .await
        .unwrap();

    let symbols: Vec<&str> = shares.iter().map(|s| s.symbol.as_str()).collect();
    assert_eq!(symbols, ["ALW", "AMZN"]);
}

#[tokio::test]
async fn tier_filter_applies_to_explicit_lists() {
    let server = common::setup_server();
    let _listing = common::mock_listing(&server, "shares_list_en.csv");
    let client = common::client_for(&server);

    let shares = SharesBuilder::new(&client)
        .symbols(["AAG", "TLV", "BRK"])
        .tiers([Tier::Premium])
        .symbol_info(false)
        .fetch()
        .await
        .unwrap();

    assert_eq!(shares.len(), 1);
    assert_eq!(shares[0].symbol.as_str(), "TLV");
}

#[test]
fn unknown_filter_value_is_rejected() {
    let err = parse_filter::<Market>(&["NASDAQ"]).unwrap_err();
    assert!(matches!(err, BvbError::InvalidParams(_)));
}
