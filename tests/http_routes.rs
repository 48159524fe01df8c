//! In-process tests for the chat API router.

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use floatchat::ResponseEngine;
use floatchat::config::Config;
use floatchat::http::{HttpState, router};
use serde_json::{Value, json};
use tower::ServiceExt;

fn app_with_limit(limit: usize) -> Router {
    app_with_state(HttpState::new(ResponseEngine::new(Some(3)), limit, 1000))
}

fn app_with_state(state: HttpState) -> Router {
    router(state, &Config::default())
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn post_chat(app: &Router, body: Value) -> (StatusCode, Value) {
    post_json(app, "/api/chat/", body).await
}

async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn root_and_health() {
    let app = app_with_limit(10);

    let (status, body) = get_json(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "FloatChat API is running");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));

    let (status, body) = get_json(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "healthy"}));
}

#[tokio::test]
async fn chat_returns_response_document() {
    let app = app_with_limit(10);
    let (status, body) = post_chat(&app, json!({"message": "Show temperature anomaly"})).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].as_str().unwrap().contains("3 temperature anomalies"));
    assert_eq!(body["data"]["statistics"]["total_anomalies"], 3);
    assert_eq!(body["suggestions"].as_array().unwrap().len(), 4);
    let viz = body["visualizations"].as_array().unwrap();
    assert_eq!(viz.len(), 1);
    assert_eq!(viz[0]["type"], "plot");
    assert!(viz[0]["data"]["data"].is_array());
}

#[tokio::test]
async fn chat_without_trailing_slash() {
    let app = app_with_limit(10);
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/chat")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"message": "atlantic"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["visualizations"][0]["type"], "map");
}

#[tokio::test]
async fn malformed_chat_body_is_rejected() {
    let app = app_with_limit(10);
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/chat/")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"text": "missing message"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn history_is_kept_per_user() {
    let app = app_with_limit(10);
    post_chat(&app, json!({"message": "salinity", "user_id": "alice"})).await;
    post_chat(&app, json!({"message": "pacific", "user_id": "alice"})).await;
    post_chat(&app, json!({"message": "ocean current", "user_id": "bob"})).await;
    post_chat(&app, json!({"message": "hello"})).await;

    let (status, body) = get_json(&app, "/api/chat/history?user_id=alice").await;
    assert_eq!(status, StatusCode::OK);
    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["message"], "salinity");
    assert_eq!(messages[0]["intent"], "salinity");
    assert_eq!(messages[1]["intent"], "region_pacific");
    assert_eq!(messages[1]["has_visualizations"], true);

    let (_, body) = get_json(&app, "/api/chat/history").await;
    let anonymous = body["messages"].as_array().unwrap();
    assert_eq!(anonymous.len(), 1);
    assert_eq!(anonymous[0]["user_id"], "anonymous");

    let (_, body) = get_json(&app, "/api/chat/history?user_id=nobody").await;
    assert!(body["messages"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn history_is_bounded() {
    let app = app_with_limit(2);
    for message in ["first", "second", "third"] {
        post_chat(&app, json!({"message": message, "user_id": "carol"})).await;
    }

    let (_, body) = get_json(&app, "/api/chat/history?user_id=carol").await;
    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["message"], "second");
    assert_eq!(messages[1]["message"], "third");
}

#[tokio::test]
async fn distinct_users_do_not_grow_history_without_bound() {
    let state = HttpState::new(ResponseEngine::new(Some(3)), 1, 16);
    let app = app_with_state(state.clone());
    for i in 0..200 {
        post_chat(&app, json!({"message": "salinity", "user_id": format!("user-{i}")})).await;
    }

    assert_eq!(state.history.lock().await.tracked_users(), 16);
    let (_, body) = get_json(&app, "/api/chat/history?user_id=user-0").await;
    assert!(body["messages"].as_array().unwrap().is_empty());
    let (_, body) = get_json(&app, "/api/chat/history?user_id=user-199").await;
    assert_eq!(body["messages"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn dashboard_reflects_recorded_queries() {
    let app = app_with_limit(10);
    post_chat(&app, json!({"message": "salinity", "user_id": "alice"})).await;
    post_chat(&app, json!({"message": "Show temperature anomaly", "user_id": "bob"})).await;

    let (status, body) = get_json(&app, "/api/dashboard/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stats"]["total_queries"], 2);
    assert_eq!(body["stats"]["queries_this_week"], 2);
    assert_eq!(body["stats"]["active_floats"], 3847);
    assert_eq!(body["recent_queries"].as_array().unwrap().len(), 2);
    assert_eq!(body["popular_parameters"].as_array().unwrap().len(), 4);
    assert_eq!(body["popular_regions"][0]["name"], "North Atlantic");
}

#[tokio::test]
async fn analytics_counts_by_intent() {
    let app = app_with_limit(10);
    for (message, user) in [("salinity", "a"), ("salinity levels", "b"), ("pacific", "a")] {
        post_chat(&app, json!({"message": message, "user_id": user})).await;
    }

    let (status, body) = get_json(&app, "/api/dashboard/analytics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["intent_distribution"],
        json!([
            {"intent": "salinity", "count": 2},
            {"intent": "region_pacific", "count": 1}
        ])
    );
    let timeline = body["query_timeline"].as_array().unwrap();
    let total: u64 = timeline.iter().map(|d| d["count"].as_u64().unwrap()).sum();
    assert_eq!(total, 3);
    assert_eq!(body["total_users"], json!(["a", "b"]));
    assert_eq!(body["most_active_hours"].as_array().unwrap().len(), 8);
}

#[tokio::test]
async fn saved_queries_round_trip_per_user() {
    let app = app_with_limit(10);
    let (status, body) = post_json(
        &app,
        "/api/dashboard/save-query",
        json!({"query": "salinity near Sri Lanka", "user_id": "dana"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Query saved successfully");
    let id = body["id"].clone();
    post_json(
        &app,
        "/api/dashboard/save-query",
        json!({"query": "pacific trench temperatures", "user_id": "dana"}),
    )
    .await;
    post_json(&app, "/api/dashboard/save-query", json!({"query": "anonymous one"})).await;

    let (_, body) = get_json(&app, "/api/dashboard/saved-queries?user_id=dana").await;
    let queries = body["queries"].as_array().unwrap();
    assert_eq!(queries.len(), 2);
    assert_eq!(queries[0]["query"], "pacific trench temperatures");
    assert_eq!(queries[1]["id"], id);

    let (_, body) = get_json(&app, "/api/dashboard/saved-queries").await;
    assert_eq!(body["queries"][0]["query"], "anonymous one");
}

#[tokio::test]
async fn floats_filter_by_bounding_box() {
    let app = app_with_limit(10);
    let (status, body) = get_json(&app, "/api/data/floats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["count"], 4);
    assert_eq!(body["query_params"], json!({}));

    let (_, body) = get_json(
        &app,
        "/api/data/floats?lat_min=10&lat_max=20&lon_min=60&lon_max=70&parameters=temperature,salinity",
    )
    .await;
    let ids: Vec<&str> = body["data"]["floats"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["float_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["2902746", "2902770"]);
    assert_eq!(body["query_params"]["latitude_range"], json!([10.0, 20.0]));
    assert_eq!(
        body["query_params"]["parameters"],
        json!(["temperature", "salinity"])
    );
}

#[tokio::test]
async fn analysis_routes_map_to_engine_records() {
    let app = app_with_limit(10);
    let (status, body) = get_json(&app, "/api/data/analysis/trend?region=pacific").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"]["trend_slope"], 0.015);
    assert_eq!(body["parameters"]["region"], "pacific");
    assert_eq!(body["parameters"]["time_period"], "30d");

    let (_, body) = get_json(&app, "/api/data/analysis/anomaly").await;
    assert_eq!(body["results"]["statistics"]["total_anomalies"], 3);
    assert_eq!(body["parameters"]["region"], "global");

    let (status, body) = get_json(&app, "/api/data/analysis/forecast").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("comparison"));
}

#[tokio::test]
async fn visualization_routes() {
    let app = app_with_limit(10);
    let (status, body) = get_json(&app, "/api/data/visualizations/depth_profile").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["type"], "plot");
    assert_eq!(body["data"]["data"]["layout"]["yaxis"]["autorange"], "reversed");
    assert_eq!(body["metadata"]["parameter"], "temperature");

    let (_, body) = get_json(&app, "/api/data/visualizations/map").await;
    assert_eq!(body["data"]["type"], "map");
    assert_eq!(body["data"]["data"]["markers"].as_array().unwrap().len(), 4);

    let (_, body) = get_json(&app, "/api/data/visualizations/time_series").await;
    assert_eq!(body["data"]["data"]["data"][0]["x"].as_array().unwrap().len(), 30);

    let (status, body) = get_json(&app, "/api/data/visualizations/heatmap").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].is_null());

    let (status, _) = get_json(&app, "/api/data/visualizations/sankey").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
