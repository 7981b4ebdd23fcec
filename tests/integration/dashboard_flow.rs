//! End-to-end tests for the dashboard pipeline against a mock sheets
//! upstream.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use revenue_dash::api::SheetsClient;
use revenue_dash::dashboard::{load_all_dashboards, DashboardService};
use revenue_dash::models::{Config, DashboardData, COMPANIES, NOT_AVAILABLE};

use crate::common::{fixtures, logging::init_test_logging};

fn service_for(server: &MockServer) -> Arc<DashboardService> {
    let config = Config {
        base_url: Url::parse(&server.uri()).unwrap(),
        request_timeout_secs: 5,
    };
    let client = SheetsClient::new(&config).expect("client builds");
    Arc::new(DashboardService::new(Arc::new(client)))
}

#[tokio::test]
async fn test_full_pipeline_over_http() {
    init_test_logging();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/$AAPL"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::quarterly_sheet()))
        .expect(1)
        .mount(&server)
        .await;

    let service = service_for(&server);
    let data = service.company_dashboard("$AAPL").await;

    assert_eq!(data.card_data.revenue, "1.234");
    assert_eq!(data.card_data.change, "234");
    assert_eq!(data.card_data.percentage_change, "23,40%");
    assert_eq!(data.card_data.numeric_percentage_change, Some(0.234));
    assert_eq!(data.card_data.revenue_label, "Q4 2023");

    let net_income = &data.historical_data["Net Income"];
    assert_eq!(net_income.len(), 2);
    assert_eq!(net_income[0].period, "30 Sep 23");
    assert_eq!(net_income[0].value, -50.0);
    assert_eq!(net_income[1].value, 200.0);

    assert_eq!(data.all_rows.len(), 3);
}

#[tokio::test]
async fn test_empty_payload_degrades_to_placeholders() {
    init_test_logging();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/$XYZ"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let service = service_for(&server);
    let data = service.company_dashboard("$XYZ").await;

    assert_eq!(data.card_data.revenue, NOT_AVAILABLE);
    assert_eq!(data.card_data.percentage_change, NOT_AVAILABLE);
    assert_eq!(data.card_data.numeric_percentage_change, None);
    assert!(data.historical_data.is_empty());
    assert!(data.all_rows.is_empty());
}

#[tokio::test]
async fn test_server_error_is_absorbed_and_cached() {
    init_test_logging();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/$FAIL"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let service = service_for(&server);

    let first = service.company_dashboard("$FAIL").await;
    assert_eq!(*first, DashboardData::placeholder());

    // Degraded results are terminal: the second call hits the cache, not
    // the upstream (the mock expects exactly one request).
    let second = service.company_dashboard("$FAIL").await;
    assert!(Arc::ptr_eq(&first, &second));
}

#[tokio::test]
async fn test_second_call_returns_cached_data_without_refetch() {
    init_test_logging();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/$MSFT"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::quarterly_sheet()))
        .expect(1)
        .mount(&server)
        .await;

    let service = service_for(&server);

    let first = service.company_dashboard("$MSFT").await;
    let second = service.company_dashboard("$MSFT").await;

    assert!(Arc::ptr_eq(&first, &second));
}

#[tokio::test]
async fn test_cache_clear_forces_a_second_fetch() {
    init_test_logging();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/$AMZN"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::quarterly_sheet()))
        .expect(2)
        .mount(&server)
        .await;

    let service = service_for(&server);

    service.company_dashboard("$AMZN").await;
    service.cache().clear();
    service.company_dashboard("$AMZN").await;
}

#[tokio::test]
async fn test_load_all_returns_every_tracked_company() {
    init_test_logging();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::quarterly_sheet()))
        .mount(&server)
        .await;

    let service = service_for(&server);
    let dashboards = load_all_dashboards(service).await.expect("join succeeds");

    assert_eq!(dashboards.len(), COMPANIES.len());
    for (i, (company, data)) in dashboards.iter().enumerate() {
        assert_eq!(*company, COMPANIES[i]);
        assert_eq!(data.card_data.revenue, "1.234");
    }
}
