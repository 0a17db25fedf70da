//! Route and place tools backed by the Google Maps web services.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{required_str, Tool, ToolError};

const DEFAULT_MAPS_BASE_URL: &str = "https://maps.googleapis.com";

/// Step instructions listed per leg before the rest are elided.
const MAX_STEPS_PER_LEG: usize = 12;

const TRAVEL_MODES: &[&str] = &["driving", "walking", "bicycling", "transit"];

const PLACE_FIELDS: &str =
    "name,formatted_address,rating,formatted_phone_number,website,opening_hours";

/// Shared HTTP client for the maps endpoints.
pub struct MapsClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl MapsClient {
    pub fn new(api_key: String) -> Result<Self, ToolError> {
        Self::with_base_url(api_key, DEFAULT_MAPS_BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Result<Self, ToolError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ToolError::Execution(format!("maps client setup failed: {}", e)))?;
        Ok(Self {
            http,
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T>(&self, path: &str, query: &[(&str, &str)]) -> Result<T, ToolError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .get(&url)
            .query(query)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| ToolError::Execution(format!("maps request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ToolError::Execution(format!("maps API HTTP error: {}", status)));
        }

        response
            .json()
            .await
            .map_err(|e| ToolError::Execution(format!("invalid maps response: {}", e)))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Directions
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    status: String,
    error_message: Option<String>,
    #[serde(default)]
    routes: Vec<Route>,
}

#[derive(Debug, Deserialize)]
struct Route {
    #[serde(default)]
    summary: String,
    #[serde(default)]
    legs: Vec<Leg>,
}

#[derive(Debug, Deserialize)]
struct Leg {
    #[serde(default)]
    start_address: String,
    #[serde(default)]
    end_address: String,
    distance: Option<TextValue>,
    duration: Option<TextValue>,
    #[serde(default)]
    steps: Vec<Step>,
}

#[derive(Debug, Deserialize)]
struct Step {
    #[serde(default)]
    html_instructions: String,
    distance: Option<TextValue>,
}

#[derive(Debug, Deserialize)]
struct TextValue {
    text: String,
}

/// Driving (or other mode) directions between two places.
pub struct GetDirections {
    maps: Arc<MapsClient>,
}

impl GetDirections {
    pub fn new(maps: Arc<MapsClient>) -> Self {
        Self { maps }
    }
}

#[async_trait]
impl Tool for GetDirections {
    fn name(&self) -> &str {
        "get_directions"
    }

    fn description(&self) -> &str {
        "Get directions between an origin and a destination. Returns distance, travel time and step-by-step instructions for each leg of the route."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "origin": {
                    "type": "string",
                    "description": "Starting address or place name"
                },
                "destination": {
                    "type": "string",
                    "description": "Destination address or place name"
                },
                "mode": {
                    "type": "string",
                    "description": "Travel mode: driving (default), walking, bicycling or transit"
                }
            },
            "required": ["origin", "destination"]
        })
    }

    async fn execute(&self, args: Value) -> Result<String, ToolError> {
        let origin = required_str(&args, "origin")?;
        let destination = required_str(&args, "destination")?;
        let mode = match args.get("mode") {
            None | Some(Value::Null) => "driving",
            Some(v) => v
                .as_str()
                .filter(|m| TRAVEL_MODES.contains(m))
                .ok_or_else(|| {
                    ToolError::InvalidArgs(format!(
                        "mode must be one of {}",
                        TRAVEL_MODES.join(", ")
                    ))
                })?,
        };

        tracing::info!(origin, destination, mode, "Requesting directions");

        let response: DirectionsResponse = self
            .maps
            .get_json(
                "/maps/api/directions/json",
                &[("origin", origin), ("destination", destination), ("mode", mode)],
            )
            .await?;

        summarize_directions(response)
    }
}

fn summarize_directions(response: DirectionsResponse) -> Result<String, ToolError> {
    match response.status.as_str() {
        "OK" => {}
        "ZERO_RESULTS" => return Ok("No route found between those places.".to_string()),
        other => {
            return Err(ToolError::Execution(format!(
                "directions request failed: {}{}",
                other,
                response
                    .error_message
                    .map(|m| format!(" ({})", m))
                    .unwrap_or_default()
            )))
        }
    }

    let Some(route) = response.routes.into_iter().next() else {
        return Ok("No route found between those places.".to_string());
    };

    let mut out = String::new();
    if !route.summary.is_empty() {
        out.push_str(&format!("Route via {}\n", route.summary));
    }

    for (i, leg) in route.legs.iter().enumerate() {
        out.push_str(&format!(
            "\nLeg {}: {} → {}\nDistance: {}, Duration: {}\n",
            i + 1,
            leg.start_address,
            leg.end_address,
            text_or_unknown(&leg.distance),
            text_or_unknown(&leg.duration),
        ));
        for (n, step) in leg.steps.iter().take(MAX_STEPS_PER_LEG).enumerate() {
            out.push_str(&format!(
                "  {}. {} ({})\n",
                n + 1,
                strip_html(&step.html_instructions),
                text_or_unknown(&step.distance),
            ));
        }
        if leg.steps.len() > MAX_STEPS_PER_LEG {
            out.push_str(&format!(
                "  ... {} more steps\n",
                leg.steps.len() - MAX_STEPS_PER_LEG
            ));
        }
    }

    Ok(out.trim_end().to_string())
}

// ─────────────────────────────────────────────────────────────────────────────
// Place details
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct PlaceDetailsResponse {
    status: String,
    error_message: Option<String>,
    result: Option<PlaceDetails>,
}

#[derive(Debug, Deserialize)]
struct PlaceDetails {
    name: Option<String>,
    formatted_address: Option<String>,
    rating: Option<f64>,
    formatted_phone_number: Option<String>,
    website: Option<String>,
    opening_hours: Option<OpeningHours>,
}

#[derive(Debug, Deserialize)]
struct OpeningHours {
    #[serde(default)]
    weekday_text: Vec<String>,
}

/// Details for a place identified by its Google place ID.
pub struct FindPlaceById {
    maps: Arc<MapsClient>,
}

impl FindPlaceById {
    pub fn new(maps: Arc<MapsClient>) -> Self {
        Self { maps }
    }
}

#[async_trait]
impl Tool for FindPlaceById {
    fn name(&self) -> &str {
        "find_place_by_id"
    }

    fn description(&self) -> &str {
        "Look up a place by its Google place ID. Returns name, address, rating, phone number, website and opening hours."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "place_id": {
                    "type": "string",
                    "description": "Google Maps place ID"
                }
            },
            "required": ["place_id"]
        })
    }

    async fn execute(&self, args: Value) -> Result<String, ToolError> {
        let place_id = required_str(&args, "place_id")?;

        tracing::info!(place_id, "Requesting place details");

        let response: PlaceDetailsResponse = self
            .maps
            .get_json(
                "/maps/api/place/details/json",
                &[("place_id", place_id), ("fields", PLACE_FIELDS)],
            )
            .await?;

        summarize_place(response)
    }
}

fn summarize_place(response: PlaceDetailsResponse) -> Result<String, ToolError> {
    if response.status != "OK" {
        return Err(ToolError::Execution(format!(
            "place details request failed: {}{}",
            response.status,
            response
                .error_message
                .map(|m| format!(" ({})", m))
                .unwrap_or_default()
        )));
    }
    let place = response
        .result
        .ok_or_else(|| ToolError::Execution("place details response had no result".to_string()))?;

    let mut lines = vec![place.name.unwrap_or_else(|| "Unnamed place".to_string())];
    if let Some(address) = place.formatted_address {
        lines.push(format!("Address: {}", address));
    }
    if let Some(rating) = place.rating {
        lines.push(format!("Rating: {:.1}", rating));
    }
    if let Some(phone) = place.formatted_phone_number {
        lines.push(format!("Phone: {}", phone));
    }
    if let Some(website) = place.website {
        lines.push(format!("Website: {}", website));
    }
    if let Some(hours) = place.opening_hours.filter(|h| !h.weekday_text.is_empty()) {
        lines.push("Opening hours:".to_string());
        lines.extend(hours.weekday_text.into_iter().map(|d| format!("  {}", d)));
    }
    Ok(lines.join("\n"))
}

fn text_or_unknown(value: &Option<TextValue>) -> &str {
    value.as_ref().map(|v| v.text.as_str()).unwrap_or("unknown")
}

/// Drop tags from the instruction markup and decode common entities.
fn strip_html(html: &str) -> String {
    let mut result = String::new();
    let mut in_tag = false;

    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => {
                in_tag = false;
                result.push(' ');
            }
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }

    result
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace("&amp;", "&")
        .replace("&nbsp;", " ")
        .replace("&#39;", "'")
        .replace("&quot;", "\"")
}
