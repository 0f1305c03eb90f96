//! Integration tests for `ApiClient` against a local mock server.
//!
//! Stands up an axum router serving canned JSON on an ephemeral port and
//! drives the client through the success, bad-status, and bad-body paths.

use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use grimoire_api::client::{ApiClient, ApiError};
use serde_json::json;

async fn races() -> impl IntoResponse {
    Json(json!([
        {
            "id": 1,
            "name": "Orcs",
            "icon": "orc.png",
            "ability": {
                "id": 9,
                "name": "Bloodlust",
                "description": "Attack speed bonus.",
                "icon": "blood.png"
            }
        }
    ]))
}

async fn hero_detail() -> impl IntoResponse {
    Json(json!({
        "id": 7,
        "name": "Thrall",
        "icon": "thrall.png",
        "move": 3,
        "damage": 12,
        "health": 100,
        "cost": 5,
        "attack_type": "melee",
        "raceId": 1,
        "ability": [
            { "id": 21, "name": "Chain Lightning", "description": "Zap.", "icon": "cl.png" }
        ]
    }))
}

async fn broken_hero() -> impl IntoResponse {
    StatusCode::INTERNAL_SERVER_ERROR
}

async fn garbage() -> impl IntoResponse {
    "this is not json"
}

async fn start_server() -> String {
    let app = Router::new()
        .route("/races", get(races))
        .route("/hero/7", get(hero_detail))
        .route("/hero/13", get(broken_hero))
        .route("/creeps", get(garbage));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock server");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock server");
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn test_races_success() {
    let base = start_server().await;
    let client = ApiClient::new(base);

    let races = client.races().await.expect("races should load");
    assert_eq!(races.len(), 1);
    assert_eq!(races[0].name, "Orcs");
    assert_eq!(races[0].ability.as_ref().unwrap().name, "Bloodlust");
}

#[tokio::test]
async fn test_hero_detail_abilities() {
    let base = start_server().await;
    let client = ApiClient::new(base);

    let hero = client.hero(7).await.expect("hero should load");
    assert_eq!(hero.ability.len(), 1);
    assert_eq!(hero.ability[0].name, "Chain Lightning");
}

#[tokio::test]
async fn test_http_error_status_message() {
    let base = start_server().await;
    let client = ApiClient::new(base);

    let err = client.hero(13).await.unwrap_err();
    assert!(matches!(err, ApiError::Status(500)));
    assert_eq!(err.to_string(), "HTTP error! status: 500");
}

#[tokio::test]
async fn test_unknown_route_is_status_error() {
    let base = start_server().await;
    let client = ApiClient::new(base);

    let err = client.units("orcs").await.unwrap_err();
    assert_eq!(err.to_string(), "HTTP error! status: 404");
}

#[tokio::test]
async fn test_malformed_body_is_transport_error() {
    let base = start_server().await;
    let client = ApiClient::new(base);

    let err = client.creeps().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}
