//! HTTP surface tests over the real router and a seeded SQLite store

mod common;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use axum_test::TestServer;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

use common::seeded_store;
use epg_service::web::{AppState, create_router};

async fn test_app() -> (TempDir, Router) {
    let (dir, config, database) = seeded_store().await;
    (dir, create_router(AppState { database, config }))
}

async fn test_server() -> (TempDir, TestServer) {
    let (dir, app) = test_app().await;
    (dir, TestServer::new(app).unwrap())
}

// Helper function to send requests to the app
async fn send_request(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request_builder = Request::builder().method(method).uri(uri);

    let request = if let Some(body) = body {
        request_builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap()
    } else {
        request_builder.body(Body::empty()).unwrap()
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap_or(json!({}));

    (status, json)
}

fn sample_event() -> Value {
    json!({
        "channel_id": 1,
        "start_time": "2025-02-01T10:00:00Z",
        "end_time": "2025-02-01T10:30:00Z",
        "title": "Morning Magazine",
        "short_description": "Daily round-up",
        "genre_id": 4,
        "category_id": 3,
        "rating_value_ids": [1, 2]
    })
}

#[tokio::test]
async fn test_health_reports_connected_store() {
    let (_dir, server) = test_server().await;

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "healthy");
    assert_eq!(body["data"]["database"], "connected");
}

#[tokio::test]
async fn test_country_lookup_by_code_is_case_insensitive() {
    let (_dir, app) = test_app().await;

    let (status, body) = send_request(&app, Method::GET, "/api/v1/countries/code/gb", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["code"], "GB");
    assert_eq!(body["data"]["name"], "United Kingdom");

    let (status, body) = send_request(&app, Method::GET, "/api/v1/countries/code/zz", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_country_crud() {
    let (_dir, server) = test_server().await;

    let created = server
        .post("/api/v1/countries")
        .json(&json!({"code": "nz", "name": "New Zealand", "region": "Oceania"}))
        .await;
    created.assert_status(StatusCode::CREATED);
    let body: Value = created.json();
    assert_eq!(body["data"]["code"], "NZ");
    let id = body["data"]["id"].as_i64().unwrap();

    server
        .post("/api/v1/countries")
        .json(&json!({"code": "NZ", "name": "Duplicate", "region": "Oceania"}))
        .await
        .assert_status(StatusCode::CONFLICT);

    server
        .post("/api/v1/countries")
        .json(&json!({"code": "NZL", "name": "Too long", "region": "Oceania"}))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let updated = server
        .put(&format!("/api/v1/countries/{}", id))
        .json(&json!({"name": "Aotearoa New Zealand"}))
        .await;
    updated.assert_status_ok();
    assert_eq!(updated.json::<Value>()["data"]["name"], "Aotearoa New Zealand");

    server
        .delete(&format!("/api/v1/countries/{}", id))
        .await
        .assert_status_ok();
    server
        .get(&format!("/api/v1/countries/{}", id))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    server
        .delete(&format!("/api/v1/countries/{}", id))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_deleting_country_with_dependents_conflicts() {
    let (_dir, server) = test_server().await;
    server
        .post("/api/v1/events/synthesize")
        .json(&json!({"day_start": "2025-01-01T00:00:00Z"}))
        .await
        .assert_status_ok();

    let gb: Value = server.get("/api/v1/countries/code/GB").await.json();
    let id = gb["data"]["id"].as_i64().unwrap();

    let rejected = server.delete(&format!("/api/v1/countries/{}", id)).await;
    rejected.assert_status(StatusCode::CONFLICT);
    assert_eq!(rejected.json::<Value>()["success"], false);

    server
        .get(&format!("/api/v1/countries/{}", id))
        .await
        .assert_status_ok();
    let networks: Value = server.get("/api/v1/networks").await.json();
    assert_eq!(networks["data"].as_array().unwrap().len(), 1);
    let channels: Value = server.get("/api/v1/channels").await.json();
    assert_eq!(channels["data"].as_array().unwrap().len(), 2);
    let timezones: Value = server.get("/api/v1/timezones").await.json();
    assert_eq!(timezones["data"].as_array().unwrap().len(), 8);
    let events: Value = server.get("/api/v1/events").await.json();
    assert_eq!(events["data"].as_array().unwrap().len(), 34);
}

#[tokio::test]
async fn test_reference_data_endpoints() {
    let (_dir, server) = test_server().await;

    let timezones: Value = server.get("/api/v1/timezones").await.json();
    assert_eq!(timezones["data"].as_array().unwrap().len(), 8);

    let genres: Value = server.get("/api/v1/genres").await.json();
    let genres = genres["data"].as_array().unwrap();
    let uncolored = genres
        .iter()
        .find(|g| g["description"] == "Original Language")
        .unwrap();
    assert_eq!(uncolored["color_hex"], "#A0A0A0");

    let categories: Value = server.get("/api/v1/categories/5").await.json();
    assert_eq!(categories["data"]["description"], "Film");

    let systems: Value = server.get("/api/v1/rating-systems").await.json();
    let bbfc = systems["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["description"] == "BBFC")
        .unwrap()
        .clone();
    assert_eq!(bbfc["rating_values"].as_array().unwrap().len(), 5);

    server
        .get("/api/v1/rating-values/99")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_channels_filter_by_network() {
    let (_dir, server) = test_server().await;

    let on_network: Value = server
        .get("/api/v1/channels")
        .add_query_param("network_id", 1)
        .await
        .json();
    assert_eq!(on_network["data"].as_array().unwrap().len(), 2);
    assert_eq!(on_network["data"][0]["network_name"], "Freeview London");

    let elsewhere: Value = server
        .get("/api/v1/channels")
        .add_query_param("network_id", 5)
        .await
        .json();
    assert_eq!(elsewhere["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_event_lifecycle_with_soft_delete() {
    let (_dir, server) = test_server().await;

    let created = server.post("/api/v1/events").json(&sample_event()).await;
    created.assert_status(StatusCode::CREATED);
    let id = created.json::<Value>()["data"]["id"].as_i64().unwrap();

    let fetched: Value = server.get(&format!("/api/v1/events/{}", id)).await.json();
    assert_eq!(fetched["data"]["event"]["title"], "Morning Magazine");

    let updated = server
        .put(&format!("/api/v1/events/{}", id))
        .json(&json!({"title": "Weekend Magazine"}))
        .await;
    updated.assert_status_ok();
    assert_eq!(updated.json::<Value>()["data"]["title"], "Weekend Magazine");

    server
        .put(&format!("/api/v1/events/{}", id))
        .json(&json!({"end_time": "2025-02-01T09:00:00Z"}))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    server
        .delete(&format!("/api/v1/events/{}", id))
        .await
        .assert_status_ok();
    server
        .get(&format!("/api/v1/events/{}", id))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    server
        .delete(&format!("/api/v1/events/{}", id))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let listed: Value = server.get("/api/v1/events").await.json();
    assert_eq!(listed["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_event_with_unknown_channel_conflicts() {
    let (_dir, server) = test_server().await;
    let mut event = sample_event();
    event["channel_id"] = json!(999);

    server
        .post("/api/v1/events")
        .json(&event)
        .await
        .assert_status(StatusCode::CONFLICT);

    let listed: Value = server.get("/api/v1/events").await.json();
    assert_eq!(listed["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_event_rating_endpoints() {
    let (_dir, server) = test_server().await;
    let created: Value = server
        .post("/api/v1/events")
        .json(&sample_event())
        .await
        .json();
    let event_id = created["data"]["id"].as_i64().unwrap();

    server
        .get(&format!("/api/v1/event-ratings/{}/1", event_id))
        .await
        .assert_status_ok();

    let moved = server
        .put(&format!("/api/v1/event-ratings/{}/1", event_id))
        .json(&json!({"rating_value_id": 3}))
        .await;
    moved.assert_status_ok();
    assert_eq!(moved.json::<Value>()["data"]["rating_value_id"], 3);

    server
        .get(&format!("/api/v1/event-ratings/{}/1", event_id))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    server
        .post("/api/v1/event-ratings")
        .json(&json!({"event_id": event_id, "rating_value_id": 2}))
        .await
        .assert_status(StatusCode::CONFLICT);

    server
        .delete(&format!("/api/v1/event-ratings/{}/3", event_id))
        .await
        .assert_status_ok();

    let remaining: Value = server.get("/api/v1/event-ratings").await.json();
    assert_eq!(remaining["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_related_rows_are_preloaded() {
    let (_dir, server) = test_server().await;
    let created: Value = server
        .post("/api/v1/events")
        .json(&sample_event())
        .await
        .json();
    let event_id = created["data"]["id"].as_i64().unwrap();

    let us: Value = server.get("/api/v1/countries/code/US").await.json();
    let zones: Vec<&str> = us["data"]["timezones"]
        .as_array()
        .unwrap()
        .iter()
        .map(|tz| tz["timezone_name"].as_str().unwrap())
        .collect();
    assert_eq!(zones, vec!["Central", "Eastern", "Pacific"]);

    let countries: Value = server.get("/api/v1/countries").await.json();
    let japan = countries["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["code"] == "JP")
        .unwrap()
        .clone();
    assert_eq!(japan["timezones"][0]["timezone_name"], "Asia/Tokyo");

    let event: Value = server.get(&format!("/api/v1/events/{}", event_id)).await.json();
    let listing = &event["data"];
    assert_eq!(listing["event"]["title"], "Morning Magazine");
    assert_eq!(listing["channel"]["id"], 1);
    assert_eq!(listing["channel"]["network_name"], "Freeview London");
    assert_eq!(listing["category"]["description"], "Live");
    assert_eq!(listing["genre"]["description"], "News/Current Affairs");
    assert_eq!(listing["genre"]["color_hex"], "#3A7BD5");
    let ratings: Vec<&str> = listing["ratings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["value"].as_str().unwrap())
        .collect();
    assert_eq!(ratings, vec!["U", "PG"]);

    let listed: Value = server.get("/api/v1/events").await.json();
    assert_eq!(listed["data"][0]["category"]["description"], "Live");

    let live: Value = server.get("/api/v1/categories/3").await.json();
    assert_eq!(live["data"]["events"].as_array().unwrap().len(), 1);
    assert_eq!(live["data"]["events"][0]["id"], event_id);
    let film: Value = server.get("/api/v1/categories/5").await.json();
    assert_eq!(film["data"]["events"].as_array().unwrap().len(), 0);

    let channel: Value = server.get("/api/v1/channels/1").await.json();
    assert_eq!(channel["data"]["events"][0]["title"], "Morning Magazine");
    let other: Value = server.get("/api/v1/channels/2").await.json();
    assert_eq!(other["data"]["events"].as_array().unwrap().len(), 0);

    let link: Value = server
        .get(&format!("/api/v1/event-ratings/{}/2", event_id))
        .await
        .json();
    assert_eq!(link["data"]["event_rating"]["rating_value_id"], 2);
    assert_eq!(link["data"]["event"]["title"], "Morning Magazine");
    assert_eq!(link["data"]["rating_value"]["value"], "PG");

    let value: Value = server.get("/api/v1/rating-values/8").await.json();
    assert_eq!(value["data"]["rating_value"]["value"], "TV-PG");
    assert_eq!(value["data"]["rating_system"]["description"], "TV Parental Guidelines");

    let values: Value = server.get("/api/v1/rating-values").await.json();
    assert_eq!(values["data"].as_array().unwrap().len(), 10);
    assert_eq!(values["data"][0]["rating_system"]["description"], "BBFC");
}

#[tokio::test]
async fn test_deleted_event_drops_out_of_preloads() {
    let (_dir, server) = test_server().await;
    let created: Value = server
        .post("/api/v1/events")
        .json(&sample_event())
        .await
        .json();
    let event_id = created["data"]["id"].as_i64().unwrap();

    server
        .delete(&format!("/api/v1/events/{}", event_id))
        .await
        .assert_status_ok();

    let channel: Value = server.get("/api/v1/channels/1").await.json();
    assert_eq!(channel["data"]["events"].as_array().unwrap().len(), 0);
    let live: Value = server.get("/api/v1/categories/3").await.json();
    assert_eq!(live["data"]["events"].as_array().unwrap().len(), 0);

    let link: Value = server
        .get(&format!("/api/v1/event-ratings/{}/1", event_id))
        .await
        .json();
    assert!(link["data"]["event"].is_null());
    assert_eq!(link["data"]["rating_value"]["value"], "U");
}

#[tokio::test]
async fn test_synthesize_then_events_since() {
    let (_dir, server) = test_server().await;
    let request = json!({"day_start": "2025-01-01T00:00:00Z"});

    let first: Value = server
        .post("/api/v1/events/synthesize")
        .json(&request)
        .await
        .json();
    assert_eq!(first["data"]["inserted"], 34);

    let second: Value = server
        .post("/api/v1/events/synthesize")
        .json(&request)
        .await
        .json();
    assert_eq!(second["data"]["inserted"], 0);

    let since = server.get("/api/v1/events/since/2025-01-01%2022:00:00").await;
    since.assert_status_ok();
    let listings: Value = since.json();
    let listings = listings["data"].as_array().unwrap();
    assert_eq!(listings.len(), 6);
    assert_eq!(listings[0]["event"]["title"], "Match of the Week");
    assert_eq!(listings[0]["genre"]["description"], "Football/Soccer");

    server
        .get("/api/v1/events/since/yesterday")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_html_pages() {
    let (_dir, server) = test_server().await;

    let index = server.get("/").await;
    index.assert_status_ok();
    assert!(index.text().contains("2 channels"));

    server
        .post("/api/v1/events")
        .json(&sample_event())
        .await
        .assert_status(StatusCode::CREATED);
    let channel = server.get("/channels/1").await;
    channel.assert_status_ok();
    assert!(channel.text().contains("Morning Magazine"));
    assert!(server.get("/categories/3").await.text().contains("Scheduled events: 1"));

    let network = server.get("/networks/1").await;
    network.assert_status_ok();
    let html = network.text();
    assert!(html.contains("Europe/London"));
    assert!(html.contains("EPG One"));

    let missing = server.get("/networks/99").await;
    missing.assert_status(StatusCode::NOT_FOUND);
    assert!(missing.text().contains("Network 99 was not found"));

    assert!(server.get("/genres").await.text().contains("#A0A0A0"));
    assert!(server.get("/ratings").await.text().contains("TV-MA"));
}

#[tokio::test]
async fn test_static_assets_and_openapi() {
    let (_dir, server) = test_server().await;

    let css = server.get("/static/css/epg.css").await;
    css.assert_status_ok();
    assert_eq!(css.header("content-type"), "text/css; charset=utf-8");

    server
        .get("/static/js/missing.js")
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let spec: Value = server.get("/api/openapi.json").await.json();
    assert!(spec["paths"]["/api/v1/events/since/{time}"].is_object());
    assert!(spec["paths"]["/health"].is_object());
}
