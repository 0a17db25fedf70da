//! HTTP clients against local stand-ins for the Gemini and Maps services.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use gmap_buddy::agent::build_agent;
use gmap_buddy::config::Config;
use gmap_buddy::llm::{ChatMessage, GeminiClient, LlmClient, LlmError, ToolSchema};
use gmap_buddy::tools::{FindPlaceById, GetDirections, MapsClient, Tool, ToolError};
use serde_json::{json, Value};

const GEMINI_KEY: &str = "gemini-test-key";
const MAPS_KEY: &str = "maps-test-key";

async fn spawn_stub(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub runs");
    });
    format!("http://{}", addr)
}

fn gemini_error(status: StatusCode, message: &str) -> Response {
    let body = json!({ "error": { "code": status.as_u16(), "message": message } });
    (status, Json(body)).into_response()
}

/// `POST /v1beta/models/{model}:generateContent`.
///
/// Asks for `get_weather` until a function response comes back, then
/// answers with the tool output.
async fn generate_content(
    Path(model): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if headers.get("x-goog-api-key").and_then(|v| v.to_str().ok()) != Some(GEMINI_KEY) {
        return gemini_error(StatusCode::FORBIDDEN, "API key not valid");
    }

    match model.as_str() {
        "stub-model:generateContent" => {}
        "garbled-model:generateContent" => {
            return (StatusCode::OK, "<html>oops</html>").into_response()
        }
        other => return gemini_error(StatusCode::NOT_FOUND, &format!("{} is not found", other)),
    }

    if body["systemInstruction"]["parts"][0]["text"].as_str().is_none() {
        return gemini_error(StatusCode::BAD_REQUEST, "missing system instruction");
    }
    if body["tools"][0]["functionDeclarations"][0]["name"] != "get_weather" {
        return gemini_error(StatusCode::BAD_REQUEST, "get_weather not declared");
    }

    let last_turn = body["contents"]
        .as_array()
        .and_then(|c| c.last())
        .cloned()
        .unwrap_or_default();

    let part = match last_turn["parts"][0]["functionResponse"]["response"]["result"].as_str() {
        Some(result) => json!({ "text": format!("Here you go! {}", result) }),
        None => json!({ "functionCall": { "name": "get_weather", "args": { "city": "Paris" } } }),
    };

    Json(json!({
        "candidates": [{
            "content": { "role": "model", "parts": [part] },
            "finishReason": "STOP"
        }]
    }))
    .into_response()
}

async fn spawn_gemini() -> String {
    spawn_stub(Router::new().route("/v1beta/models/:model", post(generate_content))).await
}

async fn directions(Query(query): Query<HashMap<String, String>>) -> Json<Value> {
    if query.get("key").map(String::as_str) != Some(MAPS_KEY) {
        return Json(json!({
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid."
        }));
    }
    let mode = query.get("mode").cloned().unwrap_or_default();
    Json(json!({
        "status": "OK",
        "routes": [{
            "summary": format!("I-80 E ({})", mode),
            "legs": [{
                "start_address": query.get("origin"),
                "end_address": query.get("destination"),
                "distance": { "text": "218 mi" },
                "duration": { "text": "3 hours 20 mins" },
                "steps": [
                    { "html_instructions": "Head <b>east</b> on Market St", "distance": { "text": "0.4 mi" } }
                ]
            }]
        }]
    }))
}

async fn place_details(Query(query): Query<HashMap<String, String>>) -> Response {
    if query.get("key").map(String::as_str) != Some(MAPS_KEY) {
        return Json(json!({ "status": "REQUEST_DENIED" })).into_response();
    }
    match query.get("place_id").map(String::as_str) {
        Some("broken") => (StatusCode::INTERNAL_SERVER_ERROR, "backend exploded").into_response(),
        Some("garbled") => (StatusCode::OK, "<html>oops</html>").into_response(),
        _ => Json(json!({
            "status": "OK",
            "result": {
                "name": "Ferry Building",
                "formatted_address": "1 Ferry Building, San Francisco, CA",
                "rating": 4.6
            }
        }))
        .into_response(),
    }
}

async fn spawn_maps() -> String {
    spawn_stub(
        Router::new()
            .route("/maps/api/directions/json", get(directions))
            .route("/maps/api/place/details/json", get(place_details)),
    )
    .await
}

fn maps_client(key: &str, base: &str) -> Arc<MapsClient> {
    Arc::new(MapsClient::with_base_url(key.to_string(), base).unwrap())
}

#[tokio::test]
async fn gemini_client_sends_key_and_parses_function_calls() {
    let base = spawn_gemini().await;
    let client = GeminiClient::new(GEMINI_KEY.to_string(), base).unwrap();
    let tools = vec![ToolSchema {
        name: "get_weather".to_string(),
        description: "weather".to_string(),
        parameters: json!({ "type": "object" }),
    }];
    let messages = [ChatMessage::system("be brief"), ChatMessage::user("Paris?")];

    let response = client
        .chat_completion("stub-model", &messages, Some(tools.as_slice()))
        .await
        .unwrap();

    let calls = response.tool_calls.expect("function call parsed");
    assert_eq!(calls[0].name, "get_weather");
    assert_eq!(calls[0].arguments, json!({ "city": "Paris" }));
}

#[tokio::test]
async fn gemini_error_bodies_map_to_api_errors() {
    let base = spawn_gemini().await;
    let messages = [ChatMessage::user("hi")];

    let wrong_key = GeminiClient::new("nope".to_string(), base.clone()).unwrap();
    let err = wrong_key
        .chat_completion("stub-model", &messages, None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        LlmError::Api { status: 403, ref message } if message == "API key not valid"
    ));

    let client = GeminiClient::new(GEMINI_KEY.to_string(), base).unwrap();
    let err = client
        .chat_completion("models/missing-model", &messages, None)
        .await
        .unwrap_err();
    assert!(matches!(err, LlmError::Api { status: 404, .. }));
    assert_eq!(
        err.to_string(),
        "reasoning engine returned 404: missing-model:generateContent is not found"
    );
}

#[tokio::test]
async fn gemini_non_json_success_is_an_invalid_response() {
    let base = spawn_gemini().await;
    let client = GeminiClient::new(GEMINI_KEY.to_string(), base).unwrap();

    let err = client
        .chat_completion("garbled-model", &[ChatMessage::user("hi")], None)
        .await
        .unwrap_err();

    assert!(matches!(err, LlmError::InvalidResponse(_)));
}

#[tokio::test]
async fn configured_agent_runs_a_tool_round_trip_over_http() {
    let base = spawn_gemini().await;
    let config = Config::from_lookup(|key: &str| match key {
        "GOOGLE_API_KEY" => Some(GEMINI_KEY.to_string()),
        "GEMINI_BASE_URL" => Some(base.clone()),
        "DEFAULT_MODEL" => Some("stub-model".to_string()),
        "AGENT_PROFILE" => Some("weather".to_string()),
        _ => None,
    })
    .unwrap();

    let llm = Arc::new(
        GeminiClient::new(config.api_key.clone(), config.gemini_base_url.clone()).unwrap(),
    );
    let agent = build_agent(&config, llm).unwrap();

    let reply = agent.process("How is Paris today?").await.unwrap();

    assert_eq!(
        reply,
        "Here you go! The weather in Paris is: Partly cloudy, 65°F (18°C)"
    );
}

#[tokio::test]
async fn directions_are_fetched_with_key_and_mode() {
    let base = spawn_maps().await;
    let tool = GetDirections::new(maps_client(MAPS_KEY, &base));

    let summary = tool
        .execute(json!({
            "origin": "San Francisco, CA",
            "destination": "Lake Tahoe, CA",
            "mode": "driving"
        }))
        .await
        .unwrap();

    assert!(summary.starts_with("Route via I-80 E (driving)"));
    assert!(summary.contains("Leg 1: San Francisco, CA → Lake Tahoe, CA"));
    assert!(summary.contains("Distance: 218 mi, Duration: 3 hours 20 mins"));
    assert!(summary.contains("1. Head east on Market St (0.4 mi)"));
}

#[tokio::test]
async fn rejected_maps_key_is_a_tool_error() {
    let base = spawn_maps().await;
    let tool = GetDirections::new(maps_client("wrong", &base));

    let err = tool
        .execute(json!({ "origin": "A", "destination": "B" }))
        .await
        .unwrap_err();

    assert!(matches!(err, ToolError::Execution(ref m) if m.contains("REQUEST_DENIED")));
}

#[tokio::test]
async fn place_details_cover_success_and_failure_statuses() {
    let base = spawn_maps().await;
    let tool = FindPlaceById::new(maps_client(MAPS_KEY, &base));

    let summary = tool.execute(json!({ "place_id": "ChIJ123" })).await.unwrap();
    assert_eq!(
        summary,
        "Ferry Building\nAddress: 1 Ferry Building, San Francisco, CA\nRating: 4.6"
    );

    let err = tool.execute(json!({ "place_id": "broken" })).await.unwrap_err();
    assert!(matches!(err, ToolError::Execution(ref m) if m.starts_with("maps API HTTP error: 500")));

    let err = tool.execute(json!({ "place_id": "garbled" })).await.unwrap_err();
    assert!(matches!(err, ToolError::Execution(ref m) if m.starts_with("invalid maps response")));
}
