//! Handler tests for Products domain
//!
//! These drive the products router the way a client would:
//! - request parsing (malformed vs invalid bodies)
//! - response bodies and HTTP status codes
//! - the JSON error envelope
//!
//! The router is mounted under `/products` on a fresh in-memory repository.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_products::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

fn app(repository: InMemoryProductRepository) -> Router {
    Router::new().nest("/products", handlers::router(ProductService::new(repository)))
}

fn json_request(method: &str, uri: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn violated_fields(body: &Value) -> Vec<&str> {
    body["details"]["validation_errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["field"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_create_get_update_delete_scenario() {
    let app = app(InMemoryProductRepository::new());

    let (status, created) = send(
        &app,
        json_request(
            "POST",
            "/products",
            json!({"name": "Widget", "price": 9.999, "stock": 3, "category": "Misc"}).to_string(),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["price"], json!(10.0));
    assert_eq!(created["name"], "Widget");
    assert!(created["description"].is_null());
    let id = created["id"].as_str().unwrap().to_string();
    assert!(!id.is_empty());

    let uri = format!("/products/{id}");

    let (status, fetched) = send(&app, empty_request("GET", &uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, updated) = send(
        &app,
        json_request("PUT", &uri, json!({"stock": 0}).to_string()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["stock"], 0);
    for field in ["id", "name", "description", "price", "category", "created_at"] {
        assert_eq!(updated[field], created[field], "{field} changed");
    }
    assert_ne!(updated["updated_at"], created["updated_at"]);

    let (status, deleted) = send(&app, empty_request("DELETE", &uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["id"], id.as_str());
    assert!(deleted["message"].as_str().unwrap().contains(&id));

    let (status, body) = send(&app, empty_request("GET", &uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 1004);
    assert!(body["error"].as_str().unwrap().contains(&id));
}

#[tokio::test]
async fn test_list_returns_count_and_products() {
    let app = app(InMemoryProductRepository::with_sample_data());

    let (status, body) = send(&app, empty_request("GET", "/products")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 3);
    let names: Vec<&str> = body["products"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec![
            "Laptop Dell XPS 13",
            "Mouse Logitech MX Master 3",
            "Teclado Mecanico Keychron K2"
        ]
    );
}

#[tokio::test]
async fn test_list_empty_catalog() {
    let app = app(InMemoryProductRepository::new());

    let (status, body) = send(&app, empty_request("GET", "/products")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"count": 0, "products": []}));
}

#[tokio::test]
async fn test_create_with_malformed_json_returns_400() {
    let app = app(InMemoryProductRepository::new());

    for payload in ["{\"name\": ", "not json", "[1, 2]", "\"Widget\"", ""] {
        let (status, body) = send(&app, json_request("POST", "/products", payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload {payload:?}");
        assert_eq!(body["code"], 1002);
        assert!(body["error"].is_string());
    }
}

#[tokio::test]
async fn test_create_with_invalid_fields_returns_422_and_stores_nothing() {
    let repository = InMemoryProductRepository::new();
    let app = app(repository.clone());

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/products",
            json!({"name": "", "price": -1, "stock": -1, "category": ""}).to_string(),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Validation error");
    assert_eq!(
        violated_fields(&body),
        vec!["category", "name", "price", "stock"]
    );
    assert_eq!(repository.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_create_with_wrong_types_returns_422() {
    let app = app(InMemoryProductRepository::new());

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/products",
            json!({"name": "Widget", "price": "cheap", "stock": 1.5, "category": "Misc"})
                .to_string(),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(violated_fields(&body), vec!["price", "stock"]);
}

#[tokio::test]
async fn test_create_ignores_client_supplied_id() {
    let app = app(InMemoryProductRepository::new());

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/products",
            json!({
                "id": "my-own-id",
                "name": "Widget",
                "price": 1,
                "stock": 0,
                "category": "Misc"
            })
            .to_string(),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_ne!(body["id"], "my-own-id");
}

#[tokio::test]
async fn test_update_validates_before_lookup() {
    let repository = InMemoryProductRepository::with_sample_data();
    let id = repository.get_all().await.unwrap()[0].id;
    let app = app(repository.clone());
    let uri = format!("/products/{id}");

    let (status, body) = send(
        &app,
        json_request("PUT", &uri, json!({"price": 0}).to_string()),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(violated_fields(&body), vec!["price"]);

    let stored = repository.get_by_id(id).await.unwrap().unwrap();
    assert_eq!(stored.price, 1299.99);

    let (status, _) = send(&app, json_request("PUT", &uri, "{oops")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_can_clear_description() {
    let repository = InMemoryProductRepository::with_sample_data();
    let id = repository.get_all().await.unwrap()[0].id;
    let app = app(repository);

    let (status, body) = send(
        &app,
        json_request(
            "PUT",
            &format!("/products/{id}"),
            json!({"description": null}).to_string(),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["description"].is_null());
    assert_eq!(body["name"], "Laptop Dell XPS 13");
}

#[tokio::test]
async fn test_unknown_and_malformed_ids_return_404() {
    let app = app(InMemoryProductRepository::with_sample_data());
    let unknown = uuid::Uuid::new_v4();

    for id in [unknown.to_string(), "not-a-uuid".to_string(), "42".to_string()] {
        let uri = format!("/products/{id}");

        let (status, body) = send(&app, empty_request("GET", &uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "GET {uri}");
        assert_eq!(body["code"], 1004);

        let (status, _) = send(&app, json_request("PUT", &uri, "{\"stock\": 1}")).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "PUT {uri}");

        let (status, _) = send(&app, empty_request("DELETE", &uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "DELETE {uri}");
    }
}

#[tokio::test]
async fn test_delete_twice_returns_404_the_second_time() {
    let repository = InMemoryProductRepository::with_sample_data();
    let id = repository.get_all().await.unwrap()[1].id;
    let app = app(repository.clone());
    let uri = format!("/products/{id}");

    let (status, _) = send(&app, empty_request("DELETE", &uri)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, empty_request("DELETE", &uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(repository.count().await.unwrap(), 2);
}
