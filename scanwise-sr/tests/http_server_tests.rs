//! HTTP surface tests
//!
//! Drives the router with `tower::ServiceExt::oneshot` against an
//! in-memory store. The Open Food Facts client points at an unroutable
//! local port, so the nutrition tier exercises the unreachable-source-
//! becomes-absent contract on every scan.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use scanwise_common::{db, Category, Product};
use scanwise_sr::cache::ProductCache;
use scanwise_sr::resolver::Resolver;
use scanwise_sr::sources::{CosmeticsSource, FallbackTable, OpenFoodFactsClient, StoreAdapter};
use scanwise_sr::{build_router, AppState};
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tower::util::ServiceExt;

async fn test_state() -> AppState {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");
    db::create_schema(&pool).await.expect("Failed to create schema");

    let cache = ProductCache::new(None);
    let nutrition_api = OpenFoodFactsClient::new(
        "http://127.0.0.1:1", // nothing listens here
        Duration::from_millis(500),
    )
    .expect("Failed to build client");
    let fallback = FallbackTable::new();
    let fallback_size = fallback.len();

    let resolver = Arc::new(Resolver::new(
        cache.clone(),
        StoreAdapter::new(pool.clone()),
        nutrition_api,
        CosmeticsSource::new(),
        fallback,
    ));

    AppState::new(pool, cache, resolver, fallback_size)
}

async fn get(state: &AppState, uri: &str) -> (StatusCode, Value) {
    let response = build_router(state.clone())
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn post_json(state: &AppState, uri: &str, body: &Value) -> (StatusCode, Value) {
    let response = build_router(state.clone())
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn test_health_check() {
    let state = test_state().await;
    let (status, body) = get(&state, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "scanwise-sr");
}

#[tokio::test]
async fn test_scan_fallback_barcode_then_cache() {
    let state = test_state().await;

    let (status, body) = get(&state, "/api/scan/7891000100103").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "fallback");
    assert_eq!(body["product"]["name"], "Coca-Cola Original 2L");
    assert_eq!(body["product"]["category"], "food");
    assert_eq!(body["product"]["nutriScore"], "E");

    // Write-back persisted the fallback hit into the durable store
    let stored = db::load_product_by_barcode(&state.db, "7891000100103")
        .await
        .unwrap();
    assert!(stored.is_some());

    // Second scan serves from the cache
    let (status, body) = get(&state, "/api/scan/7891000100103").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "cache");
}

#[tokio::test]
async fn test_scan_unknown_barcode_is_404() {
    let state = test_state().await;

    // Unknown everywhere; the nutrition tier is unreachable and absorbed
    let (status, body) = get(&state, "/api/scan/0000000000000").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");

    // No write-back happened
    let counts = db::count_products(&state.db).await.unwrap();
    assert_eq!(counts.total, 0);
}

#[tokio::test]
async fn test_scan_resolves_from_store_after_cache_clear() {
    let state = test_state().await;

    // Populate store + cache via a fallback scan, then clear the cache
    let (status, _) = get(&state, "/api/scan/7891024135105").await;
    assert_eq!(status, StatusCode::OK);

    let response = build_router(state.clone())
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/cache")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let (status, body) = get(&state, "/api/scan/7891024135105").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "durable-store");
}

#[tokio::test]
async fn test_analyze_cosmetic_scores_without_persisting() {
    let state = test_state().await;

    let request = json!({
        "barcode": "5000000000001",
        "name": "Facial Cleanser",
        "brand": "DermaCo",
        "ingredients": ["Water", "Fragrance"]
    });

    let (status, body) = post_json(&state, "/api/cosmetics/analyze", &request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["score"], 65);
    assert_eq!(body["category"], "cosmetic");
    assert_eq!(body["additives"].as_array().unwrap().len(), 1);
    assert_eq!(body["additives"][0]["risk"], "moderate");

    // Analysis alone does not persist
    let counts = db::count_products(&state.db).await.unwrap();
    assert_eq!(counts.total, 0);
}

#[tokio::test]
async fn test_analyze_rejects_blank_barcode() {
    let state = test_state().await;

    let request = json!({
        "barcode": "  ",
        "name": "X",
        "brand": "Y",
        "ingredients": []
    });

    let (status, body) = post_json(&state, "/api/cosmetics/analyze", &request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_save_product_then_search() {
    let state = test_state().await;

    let product = Product {
        barcode: "5000000000002".to_string(),
        name: "Hydrating Serum".to_string(),
        brand: "DermaCo".to_string(),
        category: Category::Cosmetic,
        score: 80,
        ingredients: vec!["Water".to_string(), "Hyaluronic Acid".to_string()],
        additives: vec![],
        allergens: vec![],
        warnings: vec![],
        benefits: vec!["Contains hyaluronic acid".to_string()],
        image: None,
    };

    let (status, _) = post_json(
        &state,
        "/api/products",
        &serde_json::to_value(&product).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = get(&state, "/api/products?name=serum").await;
    assert_eq!(status, StatusCode::OK);
    let hits = body.as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["barcode"], "5000000000002");

    let (status, body) = get(&state, "/api/products?brand=dermaco").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    // Admin save also primed the cache
    let (status, body) = get(&state, "/api/scan/5000000000002").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "cache");
}

#[tokio::test]
async fn test_save_rejects_out_of_range_score() {
    let state = test_state().await;

    let mut record = serde_json::to_value(Product {
        barcode: "5000000000003".to_string(),
        name: "Bad Record".to_string(),
        brand: "Brand".to_string(),
        category: Category::Cosmetic,
        score: 0,
        ingredients: vec![],
        additives: vec![],
        allergens: vec![],
        warnings: vec![],
        benefits: vec![],
        image: None,
    })
    .unwrap();
    record["score"] = json!(150);

    let (status, body) = post_json(&state, "/api/products", &record).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");

    // Rejected before touching the store or the cache: a scan finds nothing
    let (status, _) = get(&state, "/api/scan/5000000000003").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let counts = db::count_products(&state.db).await.unwrap();
    assert_eq!(counts.total, 0);
}

#[tokio::test]
async fn test_search_without_filter_is_400() {
    let state = test_state().await;
    let (status, body) = get(&state, "/api/products").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_search_unknown_category_is_400() {
    let state = test_state().await;
    let (status, _) = get(&state, "/api/products?category=toys").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_ingredient_lookup() {
    let state = test_state().await;

    let (status, body) = get(&state, "/api/ingredients/glycerin").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["risk"], "low");

    let (status, body) = get(&state, "/api/ingredients/unobtainium").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["risk"], "unknown");
}

#[tokio::test]
async fn test_stats_reflect_store_cache_and_fallback() {
    let state = test_state().await;

    let (status, _) = get(&state, "/api/scan/7896004700014").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get(&state, "/api/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["store"]["total"], 1);
    assert_eq!(body["store"]["food"], 1);
    assert_eq!(body["cache"]["size"], 1);
    assert_eq!(body["cache"]["barcodes"][0], "7896004700014");
    assert_eq!(body["fallback"]["size"], 4);
}
