use bvb_rs::{BvbClient, BvbError, HistoryBuilder, get_trading_history};
use chrono::NaiveDate;
use url::Url;

// Points nowhere: every case here must fail before a request is sent.
fn offline_client() -> BvbClient {
    BvbClient::builder()
        .base_wapi(Url::parse("http://127.0.0.1:9/").unwrap())
        .build()
        .unwrap()
}

#[tokio::test]
async fn unknown_period_is_invalid_params() {
    let client = offline_client();
    for bad in ["2w", "1mo", "forever"] {
        let err = get_trading_history(&client, "AAG", Some(bad), None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, BvbError::InvalidParams(_)), "{bad}: {err:?}");
    }
}

#[tokio::test]
async fn malformed_dates_are_invalid_params() {
    let client = offline_client();
    let err = get_trading_history(&client, "AAG", None, Some("03/01/2023"), None)
        .await
        .unwrap_err();
    assert!(matches!(err, BvbError::InvalidParams(_)));

    let err = get_trading_history(&client, "AAG", None, Some("2023-01-03"), Some("yesterday"))
        .await
        .unwrap_err();
    assert!(matches!(err, BvbError::InvalidParams(_)));
}

#[tokio::test]
async fn missing_period_and_start_is_invalid_params() {
    let err = get_trading_history(&offline_client(), "AAG", None, None, Some("2023-01-03"))
        .await
        .unwrap_err();
    assert!(matches!(err, BvbError::InvalidParams(_)));
}

#[tokio::test]
async fn start_after_end_is_invalid_dates() {
    let err = HistoryBuilder::new(&offline_client(), "AAG")
        .between(
            NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
            NaiveDate::from_ymd_opt(2023, 1, 3).unwrap(),
        )
        .fetch()
        .await
        .unwrap_err();
    assert!(matches!(err, BvbError::InvalidDates));
}

#[tokio::test]
async fn start_before_epoch_is_invalid_params() {
    let err = get_trading_history(&offline_client(), "AAG", None, Some("1969-12-31"), Some("2023-01-03"))
        .await
        .unwrap_err();
    assert!(matches!(err, BvbError::InvalidParams(_)));
}
