//! Three-stage itinerary planning pipeline
//!
//! Each stage builds one prompt, makes one completion call, and decodes the
//! response. The stages run strictly in sequence because each consumes the
//! previous stage's output: free text becomes [`Preferences`], preferences
//! pick the attractions, and both feed the day-by-day plan. There is no
//! retry and no partial result; the first error wins and discards the rest.

use std::sync::Arc;

use tracing::debug;

use crate::error::PlannerError;
use crate::extract;
use crate::gemini::CompletionClient;
use crate::models::{Attraction, DailyPlan, Preferences, TravelPlan};

/// Interest used for attraction lookup when the user named none
const FALLBACK_INTEREST: &str = "tourist attractions";

/// The planning pipeline, parameterized over the completion service.
pub struct Planner {
    client: Arc<dyn CompletionClient>,
}

impl Planner {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    /// Stage 1: free-form user text into structured preferences.
    pub async fn extract_preferences(&self, user_input: &str) -> Result<Preferences, PlannerError> {
        debug!(input_len = user_input.len(), "Extracting preferences");
        let response = self.client.complete(&preference_prompt(user_input)).await?;
        extract::decode(&response)
    }

    /// Stage 2: up to three attractions for the destination.
    ///
    /// Only the first interest guides the lookup; an empty interest list
    /// falls back to a generic phrase.
    pub async fn lookup_attractions(
        &self,
        destination: &str,
        interests: &[String],
    ) -> Result<Vec<Attraction>, PlannerError> {
        let interest = interests
            .first()
            .map_or(FALLBACK_INTEREST, String::as_str);
        debug!(%destination, %interest, "Looking up attractions");
        let response = self
            .client
            .complete(&attraction_prompt(destination, interest))
            .await?;
        extract::decode(&response)
    }

    /// Stage 3: preferences plus attractions into a day-by-day plan.
    pub async fn build_itinerary(
        &self,
        preferences: &Preferences,
        attractions: &[Attraction],
    ) -> Result<Vec<DailyPlan>, PlannerError> {
        debug!(days = preferences.days, "Building itinerary");
        let response = self
            .client
            .complete(&itinerary_prompt(preferences, attractions)?)
            .await?;
        extract::decode(&response)
    }

    /// Run all three stages in sequence for one form submission.
    pub async fn plan(&self, user_input: &str) -> Result<TravelPlan, PlannerError> {
        let preferences = self.extract_preferences(user_input).await?;
        let attractions = self
            .lookup_attractions(&preferences.destination, &preferences.interests)
            .await?;
        let itinerary = self.build_itinerary(&preferences, &attractions).await?;

        Ok(TravelPlan {
            destination: preferences.destination,
            itinerary,
        })
    }
}

fn preference_prompt(user_input: &str) -> String {
    format!(
        "Extract travel preferences from the following input in JSON format:\n\
         Input: \"{user_input}\"\n\
         Output format: {{ \"destination\": \"\", \"budget\": 0, \"days\": 0, \"interests\": [] }}"
    )
}

fn attraction_prompt(destination: &str, interest: &str) -> String {
    format!(
        "List 3 {interest} in {destination} as a JSON array of objects with \
         'name' and 'description' fields.\n\
         Example: [{{\"name\": \"Louvre Museum\", \"description\": \"World-famous art museum\"}}]"
    )
}

fn itinerary_prompt(
    preferences: &Preferences,
    attractions: &[Attraction],
) -> Result<String, PlannerError> {
    // The attraction list goes into the prompt as JSON text; embedding the
    // in-memory representation produced malformed prompts.
    let attractions_json = serde_json::to_string(attractions)
        .map_err(|e| PlannerError::malformed(format!("Failed to serialize attractions: {e}")))?;

    Ok(format!(
        "Create a {days}-day itinerary for {destination} with a budget of ${budget}.\n\
         Include activities related to {interests} and these attractions: {attractions_json}.\n\
         Output as a JSON list of daily plans with fields: day, activities (list of strings).\n\
         Example: [{{\"day\": 1, \"activities\": [\"Visit Louvre\", \"Dinner at Le Bistro\"]}}]",
        days = preferences.days,
        destination = preferences.destination,
        budget = preferences.budget,
        interests = preferences.interests.join(", "),
    ))
}
