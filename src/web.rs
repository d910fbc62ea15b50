//! HTTP surface: the input form, the planning endpoint, and rendering
//!
//! One route handles both verbs: GET renders the empty form, POST runs the
//! planning pipeline and renders either the finished itinerary or the form
//! again with an error message. Pipeline failures are reported in-page at
//! HTTP 200; the distinction between error kinds is logged but not shown.

use std::sync::Arc;

use axum::{Form, Router, extract::State, response::Html, routing::get};
use minijinja::{Environment, context};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::error::PlannerError;
use crate::models::TravelPlan;
use crate::pipeline::Planner;

/// Process-wide state: the configured planner and the compiled templates.
/// Built once at startup, read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    planner: Arc<Planner>,
    templates: Arc<Environment<'static>>,
}

impl AppState {
    pub fn new(planner: Planner) -> Result<Self, PlannerError> {
        let mut templates = Environment::new();
        templates
            .add_template("index.html", include_str!("../templates/index.html"))
            .map_err(|e| PlannerError::config(format!("Bad index template: {e}")))?;
        templates
            .add_template("result.html", include_str!("../templates/result.html"))
            .map_err(|e| PlannerError::config(format!("Bad result template: {e}")))?;

        Ok(Self {
            planner: Arc::new(planner),
            templates: Arc::new(templates),
        })
    }

    fn render_index(&self, error: Option<String>) -> String {
        self.templates
            .get_template("index.html")
            .and_then(|t| t.render(context! { error }))
            .unwrap_or_else(|e| format!("Template error: {e}"))
    }

    fn render_result(&self, plan: &TravelPlan) -> String {
        self.templates
            .get_template("result.html")
            .and_then(|t| {
                t.render(context! {
                    destination => &plan.destination,
                    itinerary => &plan.itinerary,
                })
            })
            .unwrap_or_else(|e| format!("Template error: {e}"))
    }
}

#[derive(Deserialize)]
struct PlanRequest {
    user_input: String,
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(show_form).post(submit))
        .nest_service("/static", ServeDir::new("static"))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn show_form(State(state): State<AppState>) -> Html<String> {
    Html(state.render_index(None))
}

async fn submit(State(state): State<AppState>, Form(form): Form<PlanRequest>) -> Html<String> {
    match state.planner.plan(&form.user_input).await {
        Ok(plan) => Html(state.render_result(&plan)),
        Err(err) => {
            warn!(kind = err.kind(), error = %err, "Planning failed");
            Html(state.render_index(Some(err.user_message())))
        }
    }
}

pub async fn run(state: AppState, port: u16) -> Result<(), PlannerError> {
    let app = router(state);
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Web server running at http://localhost:{port}");
    axum::serve(listener, app).await?;
    Ok(())
}
