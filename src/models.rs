//! Data types flowing through the planning pipeline
//!
//! All of these are request-scoped: built while handling a single form
//! submission and discarded after rendering. Nothing here is persisted.

use serde::{Deserialize, Serialize};

/// Structured travel preferences extracted from free-form user text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    pub destination: String,
    pub budget: f64,
    pub days: u32,
    pub interests: Vec<String>,
}

/// A single attraction suggested for the destination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attraction {
    pub name: String,
    pub description: String,
}

/// Activities planned for one day of the trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPlan {
    pub day: u32,
    pub activities: Vec<String>,
}

/// The finished plan handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TravelPlan {
    pub destination: String,
    pub itinerary: Vec<DailyPlan>,
}
