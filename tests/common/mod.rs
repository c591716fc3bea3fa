#![allow(dead_code)]

use std::path::PathBuf;

use bvb_rs::BvbClient;
use httpmock::{Method::GET, Method::POST, Mock, MockServer};
use url::Url;

pub const LISTING_PATH: &str = "/FinancialInstruments/Markets/SharesListForDownload.ashx";
pub const DETAILS_PATH: &str = "/FinancialInstruments/Details/FinancialInstrumentsDetails.aspx";

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

pub fn fixture(name: &str) -> String {
    let path = fixtures_dir().join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {}", path.display(), e))
}

pub fn setup_server() -> MockServer {
    MockServer::start()
}

/// A client whose `www` and `wapi` bases both point at the mock server.
pub fn client_for(server: &MockServer) -> BvbClient {
    let base = Url::parse(&server.base_url()).unwrap();
    BvbClient::builder()
        .base_www(base.clone())
        .base_wapi(base)
        .build()
        .unwrap()
}

pub fn mock_listing<'a>(server: &'a MockServer, fixture_name: &str) -> Mock<'a> {
    let body = fixture(fixture_name);
    server.mock(|when, then| {
        when.method(GET).path(LISTING_PATH);
        then.status(200)
            .header("content-type", "text/csv; charset=utf-8")
            .body(body);
    })
}

pub fn mock_symbol_info<'a>(server: &'a MockServer, symbol: &str, fixture_name: &str) -> Mock<'a> {
    let body = fixture(fixture_name);
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/symbols")
            .query_param("symbol", symbol)
            .header("referer", "https://www.bvb.ro/");
        then.status(200)
            .header("content-type", "application/json")
            .body(body);
    })
}

pub fn mock_overview<'a>(server: &'a MockServer, symbol: &str, fixture_name: &str) -> Mock<'a> {
    let body = fixture(fixture_name);
    server.mock(|when, then| {
        when.method(GET).path(DETAILS_PATH).query_param("s", symbol);
        then.status(200)
            .header("content-type", "text/html; charset=utf-8")
            .body(body);
    })
}

pub fn mock_issuer_profile<'a>(server: &'a MockServer, symbol: &str, fixture_name: &str) -> Mock<'a> {
    let body = fixture(fixture_name);
    server.mock(|when, then| {
        when.method(POST)
            .path(DETAILS_PATH)
            .query_param("s", symbol)
            .header("content-type", "application/x-www-form-urlencoded");
        then.status(200)
            .header("content-type", "text/plain; charset=utf-8")
            .body(body);
    })
}
