use crate::common;
use bvb_rs::{BvbError, Schema, SharesBuilder};
use chrono::NaiveDate;
use httpmock::Method::GET;
use rust_decimal::Decimal;
use std::str::FromStr;

#[tokio::test]
async fn issue_info_sets_start_trading_date() {
    let server = common::setup_server();
    let _listing = common::mock_listing(&server, "shares_list_en.csv");
    let overview = common::mock_overview(&server, "AAG", "details_AAG.html");
    let issuer = common::mock_issuer_profile(&server, "AAG", "issuer_AAG.html");
    let client = common::client_for(&server);

    let shares = SharesBuilder::new(&client)
        .symbols("AAG")
        .symbol_info(false)
        .issue_info(true)
        .fetch()
        .await
        .unwrap();

    overview.assert();
    issuer.assert_calls(0);
    assert_eq!(shares[0].start_trading_date, NaiveDate::from_ymd_opt(1996, 11, 8));
    assert_eq!(shares[0].company.website, None);
}

#[tokio::test]
async fn company_details_come_from_issuer_profile_postback() {
    let server = common::setup_server();
    let _listing = common::mock_listing(&server, "shares_list_en.csv");
    let _info = common::mock_symbol_info(&server, "AAG", "symbols_AAG.json");
    let overview = common::mock_overview(&server, "AAG", "details_AAG.html");
    let issuer = common::mock_issuer_profile(&server, "AAG", "issuer_AAG.html");
    let client = common::client_for(&server);

    let shares = SharesBuilder::new(&client)
        .symbols("AAG")
        .issue_info(true)
        .company_details(true)
        .fetch()
        .await
        .unwrap();

    overview.assert_calls(1);
    issuer.assert_calls(1);

    let company = &shares[0].company;
    assert_eq!(company.commerce_registry_code.as_deref(), Some("J08/1/1991"));
    assert_eq!(company.address.as_deref(), Some("Str. Bucegi nr. 12, Brasov"));
    assert_eq!(company.website.as_deref(), Some("http://www.aages.ro"));
    assert_eq!(company.email.as_deref(), Some("OFFICE@AAGES.RO"));
    assert_eq!(
        company.activity_field.as_deref(),
        Some("MANUFACTURE OF ELECTRIC MOTORS, GENERATORS AND TRANSFORMERS")
    );
    assert_eq!(
        company.description.as_deref(),
        Some("AAGES manufactures electrical equipment for industrial use.")
    );
    assert_eq!(company.sector.as_deref(), Some("INDUSTRIALS"));

    let holders = company.shareholders.as_ref().unwrap();
    let names: Vec<&str> = holders.iter().map(|h| h.name.as_str()).collect();
    assert_eq!(names, ["UTILAJ GREU SA", "Legal persons", "Individuals"]);
    assert_eq!(holders[0].shares, Some(7_437_200));
    assert_eq!(holders[0].percentage, Some(Decimal::from_str("64.2304").unwrap()));
    assert_eq!(shares[0].start_trading_date, NaiveDate::from_ymd_opt(1996, 11, 8));
}

#[tokio::test]
async fn symbol_info_error_leaves_fields_absent() {
    let server = common::setup_server();
    let _listing = common::mock_listing(&server, "shares_list_en.csv");
    let info = common::mock_symbol_info(&server, "BRK", "symbols_error.json");
    let client = common::client_for(&server);

    let shares = SharesBuilder::new(&client).symbols("BRK").fetch().await.unwrap();

    info.assert();
    assert_eq!(shares.len(), 1);
    assert_eq!(shares[0].company.sector, None);
    assert_eq!(shares[0].company.timezone, None);
}

#[tokio::test]
async fn details_page_without_issue_table_is_a_parse_error() {
    let server = common::setup_server();
    let _listing = common::mock_listing(&server, "shares_list_en.csv");
    let _overview = server.mock(|when, then| {
        when.method(GET).path(common::DETAILS_PATH).query_param("s", "AAG");
        then.status(200).body("<html><body><p>Maintenance</p></body></html>");
    });
    let client = common::client_for(&server);

    let err = SharesBuilder::new(&client)
        .symbols("AAG")
        .symbol_info(false)
        .issue_info(true)
        .fetch()
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        BvbError::Parse {
            schema: Schema::IssueInfo,
            ..
        }
    ));
}

#[tokio::test]
async fn bounded_concurrency_keeps_order() {
    let server = common::setup_server();
    let _listing = common::mock_listing(&server, "shares_list_en.csv");
    let _aag = common::mock_symbol_info(&server, "AAG", "symbols_AAG.json");
    let _tlv = common::mock_symbol_info(&server, "TLV", "symbols_TLV.json");
    let _brk = common::mock_symbol_info(&server, "BRK", "symbols_error.json");
    let client = common::client_for(&server);

    let shares = SharesBuilder::new(&client)
        .symbols(["TLV", "BRK", "AAG"])
        .concurrency(1)
        .fetch()
        .await
        .unwrap();

    let symbols: Vec<&str> = shares.iter().map(|s| s.symbol.as_str()).collect();
    assert_eq!(symbols, ["TLV", "BRK", "AAG"]);
    assert_eq!(shares[0].company.industry.as_deref(), Some("BANKS"));
    assert_eq!(shares[2].company.industry.as_deref(), Some("ELECTRICAL EQUIPMENT"));
}
