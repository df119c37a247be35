//! Catalog cache behavior and the error taxonomy for catalog reads.

#![allow(clippy::unwrap_used)]

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use clementine_client::api::CatalogClient;
use clementine_client::error::ApiError;
use clementine_integration_tests::{TestShop, category_json, product_json};

#[tokio::test]
async fn product_list_is_served_from_cache() {
    let shop = TestShop::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([product_json(7, "Widget", "100.00", 5)])),
        )
        .expect(1)
        .mount(&shop.server)
        .await;

    let catalog = CatalogClient::new(shop.api.clone());
    let first = catalog.products().await.unwrap();
    let second = catalog.products().await.unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 1);
}

#[tokio::test]
async fn invalidate_all_forces_a_refetch() {
    let shop = TestShop::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(2)
        .mount(&shop.server)
        .await;

    let catalog = CatalogClient::new(shop.api.clone());
    catalog.products().await.unwrap();
    catalog.invalidate_all().await;
    catalog.products().await.unwrap();
}

#[tokio::test]
async fn both_list_envelope_shapes_parse() {
    let shop = TestShop::start().await;

    // Paginated envelope on one endpoint, plain array on another.
    Mock::given(method("GET"))
        .and(path("/api/categories/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 2,
            "next": null,
            "previous": null,
            "results": [category_json(1, "Widgets"), category_json(2, "Gadgets")]
        })))
        .mount(&shop.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/products/featured/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([product_json(7, "Widget", "100.00", 5)])),
        )
        .mount(&shop.server)
        .await;

    let catalog = CatalogClient::new(shop.api.clone());
    let categories = catalog.categories().await.unwrap();
    assert_eq!(categories.len(), 2);
    assert_eq!(categories.first().unwrap().name, "Widgets");

    let featured = catalog.featured().await.unwrap();
    assert_eq!(featured.len(), 1);
}

#[tokio::test]
async fn search_is_always_live() {
    let shop = TestShop::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products/search/"))
        .and(query_param("q", "widget"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([product_json(7, "Widget", "100.00", 5)])),
        )
        .expect(2)
        .mount(&shop.server)
        .await;

    let catalog = CatalogClient::new(shop.api.clone());
    assert_eq!(catalog.search("widget").await.unwrap().len(), 1);
    assert_eq!(catalog.search("widget").await.unwrap().len(), 1);
}

#[tokio::test]
async fn server_errors_are_classified_and_kept_generic() {
    let shop = TestShop::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("stack trace here"))
        .mount(&shop.server)
        .await;

    let catalog = CatalogClient::new(shop.api.clone());
    let result = catalog.products().await;
    let Err(ApiError::Server(status)) = result else {
        panic!("expected a server error");
    };
    assert_eq!(status, 500);
    // Upstream detail never reaches display copy.
    assert!(!ApiError::Server(status).display_message().contains("500"));
}

#[tokio::test]
async fn missing_product_is_a_validation_error() {
    let shop = TestShop::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products/99/"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Not found."})))
        .mount(&shop.server)
        .await;

    let catalog = CatalogClient::new(shop.api.clone());
    let result = catalog.product(clementine_core::ProductId::new(99)).await;
    let Err(ApiError::Validation { status, message }) = result else {
        panic!("expected a validation error");
    };
    assert_eq!(status, 404);
    assert_eq!(message, "Not found.");
}
