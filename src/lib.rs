//! # gmap-buddy
//!
//! A road trip planning assistant exposed over a small JSON API.
//!
//! This library provides:
//! - An HTTP gateway (`/health`, `/api/chat`, `/api/agent`, static UI)
//! - A tool-calling agent driven by an external reasoning engine (Gemini)
//! - Sample tools: a fixed weather table and Google Maps directions/places
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use gmap_buddy::{agent::build_agent, config::Config, llm::GeminiClient};
//!
//! let config = Config::from_env()?;
//! let llm = Arc::new(GeminiClient::new(config.api_key.clone(), config.gemini_base_url.clone())?);
//! let agent = build_agent(&config, llm)?;
//! let reply = agent.process("Plan a weekend from LA to San Diego").await?;
//! ```

pub mod agent;
pub mod api;
pub mod config;
pub mod llm;
pub mod tools;

pub use config::Config;
