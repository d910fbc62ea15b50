//! End-to-end tests for the planning routes, driven against the axum
//! router with a scripted completion service in place of Gemini.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use tripweaver::error::PlannerError;
use tripweaver::gemini::CompletionClient;
use tripweaver::pipeline::Planner;
use tripweaver::web::{self, AppState};

/// Scripted stand-in for the Gemini client: hands out queued responses and
/// counts how often it was called.
struct ScriptedOracle {
    responses: Mutex<VecDeque<String>>,
    calls: Mutex<usize>,
}

impl ScriptedOracle {
    fn new(responses: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.iter().map(|s| s.to_string()).collect()),
            calls: Mutex::new(0),
        })
    }

    fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl CompletionClient for ScriptedOracle {
    async fn complete(&self, _prompt: &str) -> Result<String, PlannerError> {
        *self.calls.lock().unwrap() += 1;
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| PlannerError::upstream("no scripted response left"))
    }
}

fn app_with(oracle: Arc<ScriptedOracle>) -> axum::Router {
    let state = AppState::new(Planner::new(oracle)).unwrap();
    web::router(state)
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn plan_request() -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(
            "user_input=5+days+in+Paris%2C+budget+%242000%2C+love+art+and+food",
        ))
        .unwrap()
}

#[tokio::test]
async fn test_happy_path_renders_five_day_itinerary() {
    let oracle = ScriptedOracle::new(&[
        "```json\n{\"destination\":\"Paris\",\"budget\":2000,\"days\":5,\"interests\":[\"art\",\"food\"]}\n```",
        "```json\n[{\"name\":\"Louvre Museum\",\"description\":\"World-famous art museum\"}]\n```",
        "```json\n[\
            {\"day\":1,\"activities\":[\"Visit Louvre\"]},\
            {\"day\":2,\"activities\":[\"Musee d'Orsay\"]},\
            {\"day\":3,\"activities\":[\"Montmartre\"]},\
            {\"day\":4,\"activities\":[\"Versailles\"]},\
            {\"day\":5,\"activities\":[\"Seine cruise\"]}\
        ]\n```",
    ]);
    let app = app_with(oracle.clone());

    let response = app.oneshot(plan_request()).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Paris"));
    for day in 1..=5 {
        assert!(html.contains(&format!("Day {day}")), "missing day {day}");
    }
    assert!(html.contains("Visit Louvre"));
    assert_eq!(oracle.call_count(), 3);
}

#[tokio::test]
async fn test_prose_response_shows_form_with_error() {
    let oracle = ScriptedOracle::new(&[
        "I'd love to help you plan a trip! Where would you like to go?",
    ]);
    let app = app_with(oracle.clone());

    let response = app.oneshot(plan_request()).await.unwrap();

    // Pipeline failures are reported in-page, not as HTTP errors.
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("class=\"error\""));
    assert!(html.contains("name=\"user_input\""));
    assert_eq!(oracle.call_count(), 1);
}

#[tokio::test]
async fn test_get_renders_empty_form_without_calling_oracle() {
    let oracle = ScriptedOracle::new(&[]);
    let app = app_with(oracle.clone());

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("name=\"user_input\""));
    assert!(!html.contains("class=\"error\""));
    assert_eq!(oracle.call_count(), 0);
}

#[tokio::test]
async fn test_stage_two_failure_discards_partial_results() {
    let oracle = ScriptedOracle::new(&[
        "{\"destination\":\"Rome\",\"budget\":1500,\"days\":3,\"interests\":[\"history\"]}",
        "Sorry, I can't produce a list right now.",
    ]);
    let app = app_with(oracle.clone());

    let response = app.oneshot(plan_request()).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("class=\"error\""));
    // The stage-1 destination must not leak into the error view.
    assert!(!html.contains("Rome"));
    assert_eq!(oracle.call_count(), 2);
}
