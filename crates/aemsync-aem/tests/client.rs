//! Integration tests for `AemClient` using wiremock HTTP mocks.

use aemsync_aem::{collect_product_entries, AemClient, AemError};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(instance_url: &str) -> AemClient {
    AemClient::new(instance_url, "admin", "admin", 30, "aemsync-test/0.1")
        .expect("client construction should not fail")
}

fn catalog_body() -> serde_json::Value {
    serde_json::json!({
        "jcr:primaryType": "sling:OrderedFolder",
        "men": {
            "jcr:primaryType": "sling:Folder",
            "jcr:title": "Men",
            "shorts": {
                "jcr:primaryType": "sling:Folder",
                "eqbisucos": {
                    "jcr:primaryType": "nt:unstructured",
                    "jcr:title": "Cosmos Bike Shorts",
                    "sling:resourceType": "commerce/components/product",
                    "identifier": "eqbisucos",
                    "price": 135.0
                }
            }
        }
    })
}

#[tokio::test]
async fn fetch_products_gets_infinity_json_with_basic_auth() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/etc/commerce/products.infinity.json"))
        // "admin:admin" in basic-auth form.
        .and(header("authorization", "Basic YWRtaW46YWRtaW4="))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let tree = client
        .fetch_products("/etc/commerce/products")
        .await
        .expect("should fetch and parse");

    let entries = collect_product_entries(&tree).expect("should walk");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].node.identifier, "eqbisucos");
    assert_eq!(entries[0].category, "men");
}

#[tokio::test]
async fn rejected_credentials_surface_as_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/etc/commerce/products.infinity.json"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .fetch_products("/etc/commerce/products")
        .await
        .expect_err("401 should fail");

    match err {
        AemError::Http(e) => {
            assert_eq!(e.status().map(|s| s.as_u16()), Some(401));
        }
        other => panic!("expected Http error, got: {other:?}"),
    }
}

#[tokio::test]
async fn server_error_surfaces_as_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/etc/commerce/products.infinity.json"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .fetch_products("/etc/commerce/products")
        .await
        .expect_err("503 should fail");
    assert!(matches!(err, AemError::Http(_)));
}

#[tokio::test]
async fn malformed_body_surfaces_as_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/etc/commerce/products.infinity.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .fetch_products("/etc/commerce/products")
        .await
        .expect_err("html body should fail");
    assert!(matches!(err, AemError::Deserialize { .. }));
}

#[tokio::test]
async fn empty_export_walks_to_zero_entries() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/etc/commerce/products.infinity.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let tree = client
        .fetch_products("/etc/commerce/products")
        .await
        .expect("should fetch");
    let entries = collect_product_entries(&tree).expect("should walk");
    assert!(entries.is_empty());
}
