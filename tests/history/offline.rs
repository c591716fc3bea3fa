use crate::common;
use bvb_rs::{BvbError, HistoryBuilder, Period, Schema, get_share_info, get_trading_history};
use chrono::NaiveDate;
use httpmock::Method::GET;
use rust_decimal::Decimal;
use std::str::FromStr;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn explicit_window_is_inclusive_and_ascending() {
    let server = common::setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/history")
            .query_param("symbol", "AAG")
            .query_param("dt", "DAILY")
            .query_param("p", "day")
            .query_param("ajust", "1")
            .query_param("from", "1672696800")
            .query_param("to", "1704059999")
            .header("referer", "https://www.bvb.ro/");
        then.status(200)
            .header("content-type", "application/json")
            .body(common::fixture("history_AAG.json"));
    });
    let client = common::client_for(&server);

    let bars = get_trading_history(&client, "AAG", None, Some("2023-01-03"), Some("2023-12-31"))
        .await
        .unwrap();

    mock.assert();
    let dates: Vec<NaiveDate> = bars.iter().map(|b| b.date()).collect();
    assert_eq!(dates, [ymd(2023, 1, 3), ymd(2023, 1, 4), ymd(2023, 1, 5)]);
    assert!(bars.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
    assert!(bars.iter().all(|b| b.symbol.as_str() == "AAG" && b.status == "ok"));

    let first = &bars[0];
    assert_eq!(first.timestamp, 1_672_729_200);
    assert_eq!(first.open, Decimal::from_str("6.06").unwrap());
    assert_eq!(first.close, Decimal::from_str("6.1").unwrap());
    assert_eq!(first.volume, 2755);
}

#[tokio::test]
async fn start_date_makes_period_irrelevant() {
    let server = common::setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/history")
            .query_param("symbol", "AAG")
            .query_param("from", "1672696800")
            .query_param("to", "1704059999");
        then.status(200).body(common::fixture("history_AAG.json"));
    });
    let client = common::client_for(&server);

    let bars = get_trading_history(&client, "AAG", Some("2w"), Some("2023-01-03"), Some("2023-12-31"))
        .await
        .unwrap();

    mock.assert();
    assert_eq!(bars.len(), 3);
    assert_eq!(bars[0].date(), ymd(2023, 1, 3));
}

#[tokio::test]
async fn unknown_period_without_start_date_is_rejected() {
    let server = common::setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/history");
        then.status(200).body(common::fixture("history_AAG.json"));
    });
    let client = common::client_for(&server);

    let err = get_trading_history(&client, "AAG", Some("2w"), None, Some("2023-12-31"))
        .await
        .unwrap_err();
    assert!(matches!(err, BvbError::InvalidParams(_)), "got {err:?}");
    mock.assert_calls(0);
}

#[tokio::test]
async fn max_matches_explicit_first_trading_day() {
    let server = common::setup_server();
    let _listing = common::mock_listing(&server, "shares_list_en.csv");
    let _overview = common::mock_overview(&server, "AAG", "details_AAG.html");
    let history = server.mock(|when, then| {
        when.method(GET)
            .path("/api/history")
            .query_param("symbol", "AAG")
            .query_param("from", "847404000")
            .query_param("to", "1672955999");
        then.status(200).body(common::fixture("history_AAG.json"));
    });
    let client = common::client_for(&server);

    let share = bvb_rs::SharesBuilder::new(&client)
        .symbols("AAG")
        .symbol_info(false)
        .issue_info(true)
        .fetch()
        .await
        .unwrap()
        .remove(0);
    let first_day = share.start_trading_date.unwrap();

    let by_period = HistoryBuilder::new(&client, &share)
        .period(Period::Max)
        .as_of(ymd(2023, 1, 5))
        .fetch()
        .await
        .unwrap();
    let by_dates = HistoryBuilder::new(&client, "AAG")
        .between(first_day, ymd(2023, 1, 5))
        .fetch()
        .await
        .unwrap();

    history.assert_calls(2);
    assert_eq!(by_period, by_dates);
    assert_eq!(by_period.len(), 4);
    assert_eq!(by_period[0].date(), ymd(2022, 12, 30));
}

#[tokio::test]
async fn repeated_requests_return_equal_results() {
    let server = common::setup_server();
    let _history = server.mock(|when, then| {
        when.method(GET).path("/api/history").query_param("symbol", "AAG");
        then.status(200).body(common::fixture("history_AAG.json"));
    });
    let client = common::client_for(&server);
    let builder = HistoryBuilder::new(&client, "AAG").between(ymd(2023, 1, 1), ymd(2023, 1, 31));

    let first = builder.clone().fetch().await.unwrap();
    let second = builder.fetch().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
}

#[tokio::test]
async fn no_data_yields_empty_history() {
    let server = common::setup_server();
    let _history = server.mock(|when, then| {
        when.method(GET).path("/api/history");
        then.status(200).body(common::fixture("history_no_data.json"));
    });
    let client = common::client_for(&server);

    let bars = get_trading_history(&client, "AAG", Some("1y"), None, Some("now"))
        .await
        .unwrap();
    assert!(bars.is_empty());
}

#[tokio::test]
async fn upstream_error_status_is_a_parse_error() {
    let server = common::setup_server();
    let _history = server.mock(|when, then| {
        when.method(GET).path("/api/history");
        then.status(200).body(r#"{"s":"error","errmsg":"invalid symbol"}"#);
    });
    let client = common::client_for(&server);

    let err = get_trading_history(&client, "AAG", Some("5d"), None, None)
        .await
        .unwrap_err();
    match err {
        BvbError::Parse { schema, reason, .. } => {
            assert_eq!(schema, Schema::TradingHistory);
            assert_eq!(reason, "invalid symbol");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[tokio::test]
async fn implausible_symbol_makes_no_request() {
    let server = common::setup_server();
    let history = server.mock(|when, then| {
        when.method(GET).path("/api/history");
        then.status(200).body(common::fixture("history_AAG.json"));
    });
    let client = common::client_for(&server);

    let bars = get_trading_history(&client, "BR-D", Some("1m"), None, None)
        .await
        .unwrap();

    assert!(bars.is_empty());
    history.assert_calls(0);
}

#[tokio::test]
async fn share_from_listing_can_be_passed_directly() {
    let server = common::setup_server();
    let _listing = common::mock_listing(&server, "shares_list_en.csv");
    let _info = common::mock_symbol_info(&server, "AAG", "symbols_AAG.json");
    let _history = server.mock(|when, then| {
        when.method(GET).path("/api/history").query_param("symbol", "AAG");
        then.status(200).body(common::fixture("history_AAG.json"));
    });
    let client = common::client_for(&server);

    let shares = get_share_info(&client, "AAG").await.unwrap();
    let bars = get_trading_history(&client, &shares[0], None, Some("2023-01-04"), Some("2023-01-04"))
        .await
        .unwrap();

    assert_eq!(bars.len(), 1);
    assert_eq!(bars[0].volume, 4120);
}

#[tokio::test]
async fn server_failure_surfaces_status() {
    let server = common::setup_server();
    let _history = server.mock(|when, then| {
        when.method(GET).path("/api/history");
        then.status(500);
    });
    let client = common::client_for(&server);

    let err = get_trading_history(&client, "AAG", Some("ytd"), None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, BvbError::Status { status: 500, .. }));
}
