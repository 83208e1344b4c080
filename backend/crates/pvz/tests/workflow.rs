//! End-to-end flows over the combined auth and PVZ routers

use std::sync::Arc;

use auth::{AccessGate, AuthConfig, InMemoryUserRepository, TokenService, auth_router_generic};
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use pvz::{InMemoryPvzRepository, PvzConfig, pvz_router_generic};
use serde_json::{Value, json};
use tower::ServiceExt;

fn app() -> Router {
    let auth_config = Arc::new(AuthConfig::new("workflow-secret"));
    let gate = AccessGate::new(Arc::new(TokenService::new(&auth_config)));

    auth_router_generic(
        InMemoryUserRepository::default(),
        auth_config,
        gate.clone(),
    )
    .merge(pvz_router_generic(
        InMemoryPvzRepository::default(),
        Arc::new(PvzConfig::default()),
        gate,
    ))
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn token(app: &Router, role: &str) -> String {
    let (status, body) = send(app, "POST", "/dummyLogin", None, Some(json!({"role": role}))).await;
    assert_eq!(status, StatusCode::OK);
    body.as_str().unwrap().to_string()
}

async fn create_pvz(app: &Router, moderator: &str, city: &str) -> String {
    let (status, body) = send(app, "POST", "/pvz", Some(moderator), Some(json!({"city": city}))).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_str().unwrap().to_string()
}

async fn open_reception(app: &Router, employee: &str, pvz_id: &str) -> (StatusCode, Value) {
    send(
        app,
        "POST",
        "/receptions",
        Some(employee),
        Some(json!({"pvzId": pvz_id})),
    )
    .await
}

async fn add_product(
    app: &Router,
    employee: &str,
    pvz_id: &str,
    product_type: &str,
) -> (StatusCode, Value) {
    send(
        app,
        "POST",
        "/products",
        Some(employee),
        Some(json!({"type": product_type, "pvzId": pvz_id})),
    )
    .await
}

#[tokio::test]
async fn test_full_reception_of_fifty_products() {
    let app = app();
    let moderator = token(&app, "moderator").await;
    let employee = token(&app, "employee").await;

    let pvz_id = create_pvz(&app, &moderator, "Казань").await;

    let (status, reception) = open_reception(&app, &employee, &pvz_id).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(reception["status"], "in_progress");
    assert_eq!(reception["pvzId"], pvz_id.as_str());

    let types = ["электроника", "одежда", "обувь"];
    let mut added = Vec::new();
    for i in 0..50 {
        let (status, product) = add_product(&app, &employee, &pvz_id, types[i % 3]).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(product["receptionId"], reception["id"]);
        added.push(product["id"].clone());
    }

    let (status, closed) = send(
        &app,
        "POST",
        &format!("/pvz/{pvz_id}/close_last_reception"),
        Some(&employee),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(closed["id"], reception["id"]);
    assert_eq!(closed["status"], "close");

    let (status, listing) = send(&app, "GET", "/pvz", Some(&employee), None).await;
    assert_eq!(status, StatusCode::OK);
    let listing = listing.as_array().unwrap();
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0]["pvz"]["city"], "Казань");

    let receptions = listing[0]["receptions"].as_array().unwrap();
    assert_eq!(receptions.len(), 1);
    assert_eq!(receptions[0]["reception"]["status"], "close");

    let products = receptions[0]["products"].as_array().unwrap();
    assert_eq!(products.len(), 50);
    for (i, product) in products.iter().enumerate() {
        assert_eq!(product["type"], types[i % 3], "product {i}");
        assert_eq!(product["id"], added[i], "product {i}");
    }
}

#[tokio::test]
async fn test_role_checks() {
    let app = app();
    let moderator = token(&app, "moderator").await;
    let employee = token(&app, "employee").await;

    let (status, _) = send(&app, "POST", "/pvz", Some(&employee), Some(json!({"city": "Москва"}))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let pvz_id = create_pvz(&app, &moderator, "Москва").await;

    let (status, _) = open_reception(&app, &moderator, &pvz_id).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app, "GET", "/pvz", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["message"].is_string());

    let (status, _) = send(&app, "GET", "/pvz", Some("not-a-token"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Both roles may list
    let (status, _) = send(&app, "GET", "/pvz", Some(&moderator), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_lifecycle_violations() {
    let app = app();
    let moderator = token(&app, "moderator").await;
    let employee = token(&app, "employee").await;
    let pvz_id = create_pvz(&app, &moderator, "Санкт-Петербург").await;

    let (status, _) = add_product(&app, &employee, &pvz_id, "обувь").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = open_reception(&app, &employee, &pvz_id).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, body) = open_reception(&app, &employee, &pvz_id).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());

    let delete_uri = format!("/pvz/{pvz_id}/delete_last_product");
    let (status, _) = send(&app, "POST", &delete_uri, Some(&employee), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let close_uri = format!("/pvz/{pvz_id}/close_last_reception");
    let (status, _) = send(&app, "POST", &close_uri, Some(&employee), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = add_product(&app, &employee, &pvz_id, "обувь").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = send(&app, "POST", &close_uri, Some(&employee), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let unknown = uuid::Uuid::new_v4();
    let (status, _) = open_reception(&app, &employee, &unknown.to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        "/pvz/not-a-uuid/close_last_reception",
        Some(&employee),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = add_product(&app, &employee, &pvz_id, "мебель").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_last_product_order() {
    let app = app();
    let moderator = token(&app, "moderator").await;
    let employee = token(&app, "employee").await;
    let pvz_id = create_pvz(&app, &moderator, "Москва").await;
    open_reception(&app, &employee, &pvz_id).await;

    let (_, first) = add_product(&app, &employee, &pvz_id, "электроника").await;
    let (_, second) = add_product(&app, &employee, &pvz_id, "одежда").await;

    let delete_uri = format!("/pvz/{pvz_id}/delete_last_product");
    let (status, body) = send(&app, "POST", &delete_uri, Some(&employee), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);

    let (_, listing) = send(&app, "GET", "/pvz", Some(&employee), None).await;
    let products = listing[0]["receptions"][0]["products"].as_array().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["id"], first["id"]);
    assert_ne!(products[0]["id"], second["id"]);
}

#[tokio::test]
async fn test_concurrent_opens_admit_one() {
    let app = app();
    let moderator = token(&app, "moderator").await;
    let employee = token(&app, "employee").await;
    let pvz_id = create_pvz(&app, &moderator, "Казань").await;

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let app = app.clone();
            let employee = employee.clone();
            let pvz_id = pvz_id.clone();
            tokio::spawn(async move { open_reception(&app, &employee, &pvz_id).await.0 })
        })
        .collect();

    let mut created = 0;
    for handle in handles {
        match handle.await.unwrap() {
            StatusCode::CREATED => created += 1,
            status => assert_eq!(status, StatusCode::BAD_REQUEST),
        }
    }
    assert_eq!(created, 1);
}

#[tokio::test]
async fn test_listing_parameters() {
    let app = app();
    let moderator = token(&app, "moderator").await;
    let employee = token(&app, "employee").await;

    for day in 1..=3 {
        let (status, _) = send(
            &app,
            "POST",
            "/pvz",
            Some(&moderator),
            Some(json!({
                "city": "Москва",
                "registrationDate": format!("2024-01-0{day}T00:00:00Z"),
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, page) = send(&app, "GET", "/pvz?page=2&limit=2", Some(&employee), None).await;
    assert_eq!(status, StatusCode::OK);
    let page = page.as_array().unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0]["pvz"]["registrationDate"], "2024-01-03T00:00:00Z");

    let (status, page) = send(&app, "GET", "/pvz?pageSize=2", Some(&employee), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page.as_array().unwrap().len(), 2);

    for uri in [
        "/pvz?limit=31",
        "/pvz?limit=0",
        "/pvz?page=0",
        "/pvz?page=abc",
        "/pvz?startDate=yesterday",
        "/pvz?startDate=2024-02-01T00:00:00Z&endDate=2024-01-01T00:00:00Z",
    ] {
        let (status, body) = send(&app, "GET", uri, Some(&employee), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(body["message"].is_string(), "{uri}");
    }

    // None of the points has a reception yet
    let (status, filtered) = send(
        &app,
        "GET",
        "/pvz?startDate=2000-01-01T00:00:00Z&endDate=2100-01-01T00:00:00Z",
        Some(&employee),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(filtered.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_register_then_login_reaches_pvz() {
    let app = app();

    let (status, user) = send(
        &app,
        "POST",
        "/register",
        None,
        Some(json!({"email": "clerk@example.com", "password": "s3cret-pass", "role": "employee"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(user["role"], "employee");

    let (status, token) = send(
        &app,
        "POST",
        "/login",
        None,
        Some(json!({"email": "clerk@example.com", "password": "s3cret-pass"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = token.as_str().unwrap();

    let (status, _) = send(&app, "GET", "/pvz", Some(token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "POST", "/pvz", Some(token), Some(json!({"city": "Казань"}))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
