//! Integration tests for `DiscoveryClient::search_candidates`.
//!
//! Uses `wiremock` to stand up a local SerpApi stand-in per test so no real
//! network traffic is made.

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pricescout_discovery::{DiscoveryClient, DiscoveryError};

fn test_client(server: &MockServer) -> DiscoveryClient {
    DiscoveryClient::with_base_url("test-key", 5, &server.uri())
        .expect("failed to build test DiscoveryClient")
}

fn organic_result(source: &str, link: &str) -> serde_json::Value {
    json!({
        "position": 1,
        "title": "Some listing",
        "source": source,
        "link": link,
        "snippet": "Buy now"
    })
}

#[tokio::test]
async fn search_candidates_parses_organic_results() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .and(query_param("engine", "google"))
        .and(query_param("q", "iphone 16 buy online"))
        .and(query_param("location", "India"))
        .and(query_param("api_key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "organic_results": [
                organic_result("Amazon", "https://www.amazon.in/dp/B0X"),
                organic_result("Flipkart", "https://www.flipkart.com/iphone-16/p/itm1"),
            ]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let candidates = client.search_candidates("iphone 16", "IN").await.unwrap();

    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0].site_name, "Amazon");
    assert_eq!(candidates[0].url, "https://www.amazon.in/dp/B0X");
    assert_eq!(candidates[1].site_name, "Flipkart");
}

#[tokio::test]
async fn search_candidates_caps_at_ten_results() {
    let server = MockServer::start().await;

    let results: Vec<serde_json::Value> = (0..15)
        .map(|i| organic_result(&format!("Shop {i}"), &format!("https://shop{i}.example.com/p")))
        .collect();

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(&json!({"organic_results": results})),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let candidates = client.search_candidates("widget", "US").await.unwrap();

    assert_eq!(candidates.len(), 10, "only the top 10 results are kept");
    assert_eq!(candidates[0].site_name, "Shop 0");
    assert_eq!(candidates[9].site_name, "Shop 9");
}

#[tokio::test]
async fn missing_source_falls_back_to_the_link_host() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "organic_results": [
                {"link": "https://shop.example.com/product/1"},
                {"title": "no link at all"},
            ]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let candidates = client.search_candidates("widget", "US").await.unwrap();

    assert_eq!(candidates.len(), 1, "results without a link are skipped");
    assert_eq!(candidates[0].site_name, "shop.example.com");
}

#[tokio::test]
async fn empty_organic_results_yield_an_empty_vec() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "search_metadata": {"status": "Success"}
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let candidates = client.search_candidates("obscure thing", "US").await.unwrap();

    assert!(candidates.is_empty(), "no results is a normal outcome");
}

#[tokio::test]
async fn api_error_in_body_is_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "error": "Your account has run out of searches."
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client.search_candidates("widget", "US").await;

    match result.unwrap_err() {
        DiscoveryError::Api(msg) => {
            assert_eq!(msg, "Your account has run out of searches.");
        }
        other => panic!("expected DiscoveryError::Api, got: {other:?}"),
    }
}

#[tokio::test]
async fn http_error_status_is_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client.search_candidates("widget", "US").await;

    assert!(
        matches!(result.unwrap_err(), DiscoveryError::Http(_)),
        "expected DiscoveryError::Http for a 500 response"
    );
}

#[tokio::test]
async fn unknown_country_searches_the_default_market() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .and(query_param("location", "United States"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "organic_results": [organic_result("Shop", "https://shop.example.com/p")]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let candidates = client.search_candidates("widget", "ZZ").await.unwrap();

    assert_eq!(candidates.len(), 1);
}
