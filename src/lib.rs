//! `TripWeaver` - AI-assisted travel itinerary planning
//!
//! This library turns free-text travel preferences into a day-by-day
//! itinerary by chaining three completion calls against the Gemini API:
//! preference extraction, attraction lookup, and itinerary synthesis.

pub mod config;
pub mod error;
pub mod extract;
pub mod gemini;
pub mod models;
pub mod pipeline;
pub mod web;

// Re-export core types for public API
pub use config::PlannerConfig;
pub use error::PlannerError;
pub use gemini::{CompletionClient, GeminiClient};
pub use models::{Attraction, DailyPlan, Preferences, TravelPlan};
pub use pipeline::Planner;
pub use web::AppState;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, PlannerError>;
