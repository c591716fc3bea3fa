use crate::common;
use bvb_rs::{BvbError, Market, Schema, ShareStatus, SharesBuilder, Tier, get_share_info};
use httpmock::Method::GET;
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::str::FromStr;

#[tokio::test]
async fn unknown_symbols_are_left_out() {
    let server = common::setup_server();
    let listing = common::mock_listing(&server, "shares_list_en.csv");
    let info = common::mock_symbol_info(&server, "AAG", "symbols_AAG.json");
    let client = common::client_for(&server);

    let shares = get_share_info(&client, ["AAG", "GOOGL"]).await.unwrap();

    listing.assert();
    info.assert();
    assert_eq!(shares.len(), 1);
    let aag = &shares[0];
    assert_eq!(aag.symbol.as_str(), "AAG");
    assert_eq!(aag.isin.as_deref(), Some("ROAAGEACNOR4"));
    assert_eq!(aag.total_shares, Some(11_578_902));
    assert_eq!(aag.face_value, Some(Decimal::from_str("2.5").unwrap()));
    assert_eq!(aag.market, Some(Market::Regulated));
    assert_eq!(aag.tier, Some(Tier::Standard));
    assert_eq!(aag.company.name, "AAGES S.A.");
    assert_eq!(aag.company.fiscal_code, "1754206");
    assert_eq!(aag.company.sector.as_deref(), Some("INDUSTRIALS"));
    assert_eq!(aag.company.industry.as_deref(), Some("ELECTRICAL EQUIPMENT"));
    assert_eq!(aag.company.timezone.as_deref(), Some("Europe/Bucharest"));
    assert_eq!(aag.start_trading_date, None);
}

#[tokio::test]
async fn list_keeps_caller_order() {
    let server = common::setup_server();
    let _listing = common::mock_listing(&server, "shares_list_en.csv");
    let client = common::client_for(&server);

    let shares = SharesBuilder::new(&client)
        .symbols(vec!["brk", "TLV", "AAG", "tlv"])
        .symbol_info(false)
        .fetch()
        .await
        .unwrap();

    let symbols: Vec<&str> = shares.iter().map(|s| s.symbol.as_str()).collect();
    assert_eq!(symbols, ["BRK", "TLV", "AAG"]);
    assert_eq!(shares[0].status, Some(ShareStatus::Suspended));
}

#[tokio::test]
async fn all_returns_unique_symbols_in_listing_order() {
    let server = common::setup_server();
    let _listing = common::mock_listing(&server, "shares_list_en.csv");
    let client = common::client_for(&server);

    let shares = SharesBuilder::new(&client)
        .symbols("ALL")
        .symbol_info(false)
        .fetch()
        .await
        .unwrap();

    let symbols: Vec<&str> = shares.iter().map(|s| s.symbol.as_str()).collect();
    assert_eq!(symbols, ["AAG", "TLV", "ALW", "AMZN", "BRK"]);
    let unique: HashSet<&str> = symbols.iter().copied().collect();
    assert_eq!(unique.len(), symbols.len());
}

#[tokio::test]
async fn romanian_listing_is_understood() {
    let server = common::setup_server();
    let _listing = common::mock_listing(&server, "shares_list_ro.csv");
    let client = common::client_for(&server);

    let shares = SharesBuilder::new(&client)
        .symbol_info(false)
        .fetch()
        .await
        .unwrap();

    assert_eq!(shares.len(), 2);
    assert_eq!(shares[0].face_value, Some(Decimal::from_str("2.5").unwrap()));
    assert_eq!(shares[0].status, Some(ShareStatus::Tradeable));
    assert_eq!(shares[1].tier, Some(Tier::AeroBase));
    assert_eq!(shares[1].company.nace_code, None);
}

#[tokio::test]
async fn empty_selection_makes_no_request() {
    let server = common::setup_server();
    let listing = common::mock_listing(&server, "shares_list_en.csv");
    let client = common::client_for(&server);

    let shares = get_share_info(&client, vec!["", "BR-D"]).await.unwrap();

    assert!(shares.is_empty());
    listing.assert_calls(0);
}

#[tokio::test]
async fn consecutive_calls_are_identical() {
    let server = common::setup_server();
    let _listing = common::mock_listing(&server, "shares_list_en.csv");
    let _aag = common::mock_symbol_info(&server, "AAG", "symbols_AAG.json");
    let _tlv = common::mock_symbol_info(&server, "TLV", "symbols_TLV.json");
    let client = common::client_for(&server);

    let first = get_share_info(&client, ["TLV", "AAG"]).await.unwrap();
    let second = get_share_info(&client, ["TLV", "AAG"]).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first[0].company.sector.as_deref(), Some("FINANCIALS"));
}

#[tokio::test]
async fn invalid_listing_row_fails_the_call() {
    let server = common::setup_server();
    let body = common::fixture("shares_list_en.csv").replace("ROTLVAACNOR1", "TLV-ISIN");
    let _listing = server.mock(|when, then| {
        when.method(GET).path(common::LISTING_PATH);
        then.status(200).body(body);
    });
    let client = common::client_for(&server);

    let err = get_share_info(&client, "AAG").await.unwrap_err();
    match err {
        BvbError::Parse { schema, field, reason } => {
            assert_eq!(schema, Schema::ShareListing);
            assert_eq!(field, "ISIN");
            assert!(reason.contains("TLV"), "reason was {reason}");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[tokio::test]
async fn listing_http_error_is_reported() {
    let server = common::setup_server();
    let _listing = server.mock(|when, then| {
        when.method(GET).path(common::LISTING_PATH);
        then.status(503);
    });
    let client = common::client_for(&server);

    let err = get_share_info(&client, "AAG").await.unwrap_err();
    assert!(matches!(err, BvbError::Status { status: 503, .. }));
}
