//! Sample weather tool backed by a fixed table.

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{required_str, Tool, ToolError};

/// Lower-cased city name to conditions.
const WEATHER_TABLE: &[(&str, &str)] = &[
    ("new york", "Sunny, 72°F (22°C)"),
    ("london", "Cloudy, 60°F (15°C)"),
    ("tokyo", "Rainy, 68°F (20°C)"),
    ("paris", "Partly cloudy, 65°F (18°C)"),
    ("sydney", "Sunny, 75°F (24°C)"),
];

/// Look up current weather for a city.
pub struct GetWeather;

impl GetWeather {
    /// Report for `city`. Unknown cities get a hint, not an error.
    pub fn report(city: &str) -> String {
        let city = city.trim();
        let key = city.to_lowercase();
        match WEATHER_TABLE.iter().find(|(name, _)| *name == key) {
            Some((_, conditions)) => format!("The weather in {} is: {}", city, conditions),
            None => format!(
                "Weather data not available for {}. Try cities like New York, London, Tokyo, Paris, or Sydney.",
                city
            ),
        }
    }
}

#[async_trait]
impl Tool for GetWeather {
    fn name(&self) -> &str {
        "get_weather"
    }

    fn description(&self) -> &str {
        "Get current weather information for a specified city"
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "city": {
                    "type": "string",
                    "description": "Name of the city, e.g. 'New York'"
                }
            },
            "required": ["city"]
        })
    }

    async fn execute(&self, args: Value) -> Result<String, ToolError> {
        let city = required_str(&args, "city")?;
        tracing::debug!(city, "Looking up weather");
        Ok(Self::report(city))
    }
}
