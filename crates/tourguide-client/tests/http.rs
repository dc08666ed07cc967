//! `HttpTourBackend` against an in-process stub server.

use axum::extract::{Json, Query, RawQuery};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use serde_json::{Value, json};
use std::collections::HashMap;
use tokio::net::TcpListener;
use tourguide_client::HttpTourBackend;
use tourguide_core::backend::{SpeakQuery, TourBackend};
use tourguide_core::error::TourError;

async fn attractions(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    Json(json!({
        "attractions": [
            {"name": "Red Fort", "lat": 28.6562, "lon": 77.241, "type": "attraction"},
            {"name": format!("{},{}", params["lat"], params["lon"]), "latitude": 1.0, "longitude": 2.0}
        ]
    }))
}

async fn speak(RawQuery(query): RawQuery) -> Json<Value> {
    Json(json!({"speak": false, "message": query.unwrap_or_default()}))
}

async fn explain(Query(params): Query<HashMap<String, String>>) -> (StatusCode, String) {
    match params.get("name").map(String::as_str) {
        Some("Red Fort") => (
            StatusCode::OK,
            json!({"explanation": "**Red Fort** is a fort."}).to_string(),
        ),
        Some("Broken") => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".into()),
        _ => (
            StatusCode::NOT_FOUND,
            json!({"explanation": "No information found."}).to_string(),
        ),
    }
}

async fn ask(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({"response": format!("You asked: {}", body["query"].as_str().unwrap_or_default())}))
}

async fn spawn_stub() -> String {
    let app = Router::new()
        .route("/attractions", get(attractions))
        .route("/speak", get(speak))
        .route("/explain", get(explain))
        .route("/ask", post(ask));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/")
}

#[tokio::test]
async fn test_attractions_sends_coordinates_and_parses_both_key_spellings() {
    // Arrange
    let backend = HttpTourBackend::new(spawn_stub().await).unwrap();

    // Act
    let response = backend.attractions(28.614, 77.2091).await.unwrap().unwrap();

    // Assert
    let attractions = response.into_attractions().unwrap();
    assert_eq!(attractions.len(), 2);
    assert_eq!(attractions[0].name, "Red Fort");
    assert_eq!(attractions[0].category.as_deref(), Some("attraction"));
    assert_eq!(attractions[1].name, "28.614,77.2091");
}

#[tokio::test]
async fn test_speak_repeats_spoken_parameter() {
    // Arrange
    let backend = HttpTourBackend::new(spawn_stub().await).unwrap();
    let query = SpeakQuery {
        latitude: 28.614,
        longitude: 77.2091,
        radius: 100.0,
        spoken: vec!["red fort".into(), "india gate".into()],
    };

    // Act
    let response = backend.speak(&query).await.unwrap().unwrap();

    // Assert
    assert!(!response.speak);
    assert_eq!(
        response.message.as_deref(),
        Some("lat=28.614&lon=77.2091&radius=100&spoken=red+fort&spoken=india+gate")
    );
}

#[tokio::test]
async fn test_explain_parses_body() {
    let backend = HttpTourBackend::new(spawn_stub().await).unwrap();

    let response = backend.explain("Red Fort").await.unwrap().unwrap();

    assert_eq!(response.explanation.as_deref(), Some("**Red Fort** is a fort."));
}

#[tokio::test]
async fn test_error_status_with_json_body_is_still_parsed() {
    let backend = HttpTourBackend::new(spawn_stub().await).unwrap();

    let response = backend.explain("Atlantis").await.unwrap().unwrap();

    assert_eq!(response.explanation.as_deref(), Some("No information found."));
}

#[tokio::test]
async fn test_non_json_body_is_no_data() {
    let backend = HttpTourBackend::new(spawn_stub().await).unwrap();

    let response = backend.explain("Broken").await.unwrap();

    assert!(response.is_none());
}

#[tokio::test]
async fn test_ask_posts_query_as_json() {
    let backend = HttpTourBackend::new(spawn_stub().await).unwrap();

    let response = backend.ask("What year was it built?").await.unwrap().unwrap();

    assert_eq!(
        response.response.as_deref(),
        Some("You asked: What year was it built?")
    );
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    // Arrange
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let backend = HttpTourBackend::new(format!("http://{addr}")).unwrap();

    // Act
    let result = backend.explain("Red Fort").await;

    // Assert
    assert!(matches!(result, Err(TourError::Network(_))));
}
