//! Configuration management for gmap-buddy.
//!
//! Configuration can be set via environment variables:
//! - `GOOGLE_API_KEY` - Required (or `GEMINI_API_KEY`). Key for the Gemini API.
//! - `DEFAULT_MODEL` - Optional. Model used by the agent. Defaults to `gemini-2.0-flash`.
//! - `GEMINI_BASE_URL` - Optional. Gemini API endpoint.
//! - `GOOGLE_MAPS_API_KEY` - Optional. Enables the directions and place tools.
//! - `HOST` - Optional. Server host. Defaults to `0.0.0.0`.
//! - `PORT` - Optional. Server port. Defaults to `8080`.
//! - `STATIC_DIR` - Optional. Prebuilt UI bundle directory. Defaults to `adk-ui`.
//! - `AGENT_PROFILE` - Optional. `road_trip` (default) or `weather`.
//! - `MAX_ITERATIONS` - Optional. Maximum agent loop iterations. Defaults to `10`.
//! - `AGENT_TIMEOUT_SECS` - Optional. Upper bound on one agent run. Defaults to `60`.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// Service name reported by the health endpoint.
pub const SERVICE_NAME: &str = "gmap-buddy";

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Which agent persona the server runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentProfile {
    /// Road trip planner with weather and maps tools.
    RoadTrip,
    /// Small weather assistant with only `get_weather`.
    Weather,
}

impl FromStr for AgentProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "road_trip" | "road-trip" | "roadtrip" => Ok(Self::RoadTrip),
            "weather" => Ok(Self::Weather),
            other => Err(format!("unknown agent profile: {}", other)),
        }
    }
}

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Gemini API key
    pub api_key: String,

    /// Model identifier passed to the Gemini API
    pub default_model: String,

    /// Base URL of the Gemini API
    pub gemini_base_url: String,

    /// Google Maps API key; maps tools are registered only when set
    pub maps_api_key: Option<String>,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Directory holding the prebuilt UI
    pub static_dir: PathBuf,

    /// Agent persona
    pub profile: AgentProfile,

    /// Maximum iterations for the agent loop
    pub max_iterations: usize,

    /// How long the gateway waits for one agent run
    pub agent_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if neither `GOOGLE_API_KEY` nor
    /// `GEMINI_API_KEY` is set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("GOOGLE_API_KEY")
            .or_else(|| lookup("GEMINI_API_KEY"))
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("GOOGLE_API_KEY".to_string()))?;

        let default_model =
            lookup("DEFAULT_MODEL").unwrap_or_else(|| "gemini-2.0-flash".to_string());

        let gemini_base_url =
            lookup("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string());

        let maps_api_key = lookup("GOOGLE_MAPS_API_KEY").filter(|k| !k.trim().is_empty());

        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let port = parse_or(&lookup, "PORT", 8080u16)?;

        let static_dir = lookup("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("adk-ui"));

        let profile = match lookup("AGENT_PROFILE") {
            Some(v) => v
                .parse::<AgentProfile>()
                .map_err(|e| ConfigError::InvalidValue("AGENT_PROFILE".to_string(), e))?,
            None => AgentProfile::RoadTrip,
        };

        let max_iterations = parse_or(&lookup, "MAX_ITERATIONS", 10usize)?;
        if max_iterations == 0 {
            return Err(ConfigError::InvalidValue(
                "MAX_ITERATIONS".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        let timeout_secs = parse_or(&lookup, "AGENT_TIMEOUT_SECS", 60u64)?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "AGENT_TIMEOUT_SECS".to_string(),
                "must be at least 1".to_string(),
            ));
        }
        let agent_timeout = Duration::from_secs(timeout_secs);

        Ok(Self {
            api_key,
            default_model,
            gemini_base_url,
            maps_api_key,
            host,
            port,
            static_dir,
            profile,
            max_iterations,
            agent_timeout,
        })
    }

    /// Create a config with custom values (useful for testing).
    pub fn new(api_key: String, default_model: String) -> Self {
        Self {
            api_key,
            default_model,
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            maps_api_key: None,
            host: "127.0.0.1".to_string(),
            port: 8080,
            static_dir: PathBuf::from("adk-ui"),
            profile: AgentProfile::RoadTrip,
            max_iterations: 10,
            agent_timeout: Duration::from_secs(60),
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidValue(key.to_string(), format!("{}", e))),
        None => Ok(default),
    }
}
