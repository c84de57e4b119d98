use assert_matches::assert_matches;
use catalog_client::CatalogClient;
use catalog_client::ClientConfig;
use catalog_client::HttpCatalogClient;
use catalog_protocol::AssetKey;
use catalog_protocol::CatalogError;
use catalog_protocol::Query;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;
use wiremock::matchers::method;
use wiremock::matchers::path;

fn client_for(server: &MockServer) -> HttpCatalogClient {
    client_with(server, |_| {})
}

fn client_with(server: &MockServer, tweak: impl FnOnce(&mut ClientConfig)) -> HttpCatalogClient {
    let mut config = ClientConfig {
        base_url: server.uri(),
        ..Default::default()
    };
    tweak(&mut config);
    HttpCatalogClient::new(&config).unwrap()
}

#[tokio::test]
async fn search_translates_capitalized_records() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/1/search/2/forest/tree"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"Name": "forest", "Class": "tree", "Subclass": "oak", "Description": "tall"},
            {"Name": "forest", "Class": "tree", "Subclass": "pine", "Description": ""}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let query = Query::from_terms(["forest", "tree"]).unwrap();
    let rows = client_for(&server).search(&query, 2).await.unwrap();

    let subclasses: Vec<&str> = rows.iter().map(|row| row.subclass.as_str()).collect();
    assert_eq!(subclasses, vec!["oak", "pine"]);
    assert_eq!(rows[0].description, "tall");
}

#[tokio::test]
async fn search_route_is_configurable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/1/suggest/0/forest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_with(&server, |config| config.search_route = "suggest".into());
    let query = Query::from_terms(["forest"]).unwrap();
    assert!(client.search(&query, 0).await.unwrap().is_empty());
}

#[tokio::test]
async fn null_page_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/1/search/9/forest"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&server)
        .await;

    let query = Query::from_terms(["forest"]).unwrap();
    let rows = client_for(&server).search(&query, 9).await.unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn server_error_is_fetch_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/1/search/0/forest"))
        .respond_with(ResponseTemplate::new(500).set_body_string("db offline"))
        .mount(&server)
        .await;

    let query = Query::from_terms(["forest"]).unwrap();
    let err = client_for(&server).search(&query, 0).await.unwrap_err();
    assert_matches!(
        err,
        CatalogError::FetchFailed { operation: "search", ref message } if message.contains("db offline")
    );
}

#[tokio::test]
async fn non_json_body_is_fetch_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/1/suggest"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).suggest().await.unwrap_err();
    assert_matches!(err, CatalogError::FetchFailed { operation: "suggest", .. });
}

#[tokio::test]
async fn wrong_shape_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/1/search/0/forest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"rows": []})))
        .mount(&server)
        .await;

    let query = Query::from_terms(["forest"]).unwrap();
    let err = client_for(&server).search(&query, 0).await.unwrap_err();
    assert_matches!(err, CatalogError::MalformedResponse { operation: "search", .. });
}

#[tokio::test]
async fn suggest_accepts_names_and_records() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/1/suggest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            "props",
            {"Name": "forest", "Class": "", "Subclass": "", "Description": ""}
        ])))
        .mount(&server)
        .await;

    let terms = client_for(&server).suggest().await.unwrap();
    assert_eq!(terms, vec!["props".to_string(), "forest".to_string()]);
}

#[tokio::test]
async fn fetch_returns_full_detail() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/1/fetch/forest/tree/oak"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Data": {"Name": "forest", "Class": "tree", "Subclass": "oak", "Description": "tall"},
            "Attributes": {"height": "30m", "leaves": "lobed"},
            "Version": 7,
            "Thumbnail": "thumbs/oak.png",
            "Linked": [{"Name": "forest", "Class": "tree", "Subclass": "acorn", "Description": ""}],
            "Resources": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let key = AssetKey {
        name: "forest".into(),
        class: "tree".into(),
        subclass: "oak".into(),
    };
    let detail = client_for(&server).fetch(&key).await.unwrap();

    assert_eq!(detail.description.key(), key);
    assert_eq!(detail.version, 7);
    assert_eq!(detail.thumbnail.as_deref(), Some("thumbs/oak.png"));
    assert_eq!(detail.attributes.get("height").map(String::as_str), Some("30m"));
    assert_eq!(detail.linked.len(), 1);
    assert!(detail.resources.is_empty());
}

#[tokio::test]
async fn fetch_without_description_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/1/fetch/forest/tree/oak"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Data": null, "Version": 1})))
        .mount(&server)
        .await;

    let key = AssetKey {
        name: "forest".into(),
        class: "tree".into(),
        subclass: "oak".into(),
    };
    let err = client_for(&server).fetch(&key).await.unwrap_err();
    assert_matches!(err, CatalogError::MalformedResponse { operation: "fetch", .. });
}

#[tokio::test]
async fn slow_response_times_out_as_fetch_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/1/suggest"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!(["props"]))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client = client_with(&server, |config| config.timeout_secs = 1);
    let err = client.suggest().await.unwrap_err();
    assert_matches!(err, CatalogError::FetchFailed { operation: "suggest", .. });
}
