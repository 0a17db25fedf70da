//! Agent module - the conversational agent and its presets.
//!
//! The agent follows a "tools in a loop" pattern:
//! 1. Build context with the instruction and the user message
//! 2. Call the reasoning engine with the available tools
//! 3. If the engine requests tool calls, execute them in order and feed results back
//! 4. Repeat until the engine produces a final reply or max iterations is reached

mod agent_loop;
mod prompt;

use std::sync::Arc;

use thiserror::Error;

use crate::config::{AgentProfile, Config};
use crate::llm::{LlmClient, LlmError};
use crate::tools::{FindPlaceById, GetDirections, GetWeather, MapsClient, ToolError};

pub use agent_loop::{Agent, AgentBuilder, AgentInfo};
pub use prompt::{build_system_prompt, ROAD_TRIP_INSTRUCTION, WEATHER_INSTRUCTION};

/// Why `Agent::process` produced no reply.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("tool '{name}' failed: {source}")]
    Tool {
        name: String,
        #[source]
        source: ToolError,
    },

    #[error("reasoning engine returned an empty response")]
    EmptyResponse,

    #[error("max iterations ({0}) reached without a final response")]
    MaxIterations(usize),
}

/// Build the agent selected by `config.profile`.
pub fn build_agent(config: &Config, llm: Arc<dyn LlmClient>) -> Result<Agent, ToolError> {
    let builder = match config.profile {
        AgentProfile::RoadTrip => {
            let mut builder = Agent::builder("road_trip_assistant", llm)
                .description(
                    "An enthusiastic road trip planner that builds day-by-day itineraries with stops, weather and packing advice.",
                )
                .instruction(ROAD_TRIP_INSTRUCTION)
                .tool(Arc::new(GetWeather));

            match &config.maps_api_key {
                Some(key) => {
                    let maps = Arc::new(MapsClient::new(key.clone())?);
                    builder = builder
                        .tool(Arc::new(GetDirections::new(maps.clone())))
                        .tool(Arc::new(FindPlaceById::new(maps)));
                }
                None => {
                    tracing::warn!("GOOGLE_MAPS_API_KEY not set; directions and place tools disabled");
                }
            }
            builder
        }
        AgentProfile::Weather => Agent::builder("weather_assistant", llm)
            .description(
                "A helpful weather assistant that provides current weather information for cities around the world.",
            )
            .instruction(WEATHER_INSTRUCTION)
            .tool(Arc::new(GetWeather)),
    };

    builder
        .model(config.default_model.clone())
        .max_iterations(config.max_iterations)
        .build()
}
