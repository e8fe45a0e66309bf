//! manasooth-server
//!
//! HTTP API over the questionnaires, stored progress, goals, mood journal,
//! and the AI flows.

pub mod config;
pub mod error;
pub mod middleware;
pub mod report;
pub mod routes;
pub mod state;

use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{delete, get, post};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

pub use state::AppState;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        // Questionnaires (static definitions)
        .route("/questionnaires", get(routes::questionnaires::list_questionnaires))
        .route(
            "/questionnaires/{id}",
            get(routes::questionnaires::get_questionnaire_detail),
        )
        // Assessment session
        .route(
            "/assessments/flow",
            get(routes::assessments::get_flow).post(routes::assessments::select_flow),
        )
        .route(
            "/assessments/{id}/submit",
            post(routes::assessments::submit_answers),
        )
        .route("/assessments/current", get(routes::assessments::current_scores))
        .route("/assessments/results", post(routes::assessments::results))
        .route("/assessments/report", get(routes::assessments::get_report))
        .route(
            "/assessments/report.md",
            get(routes::assessments::get_report_markdown),
        )
        // Progress and goals
        .route("/progress", get(routes::progress::get_progress))
        .route(
            "/goals",
            get(routes::goals::list_goals).post(routes::goals::create_goal),
        )
        .route(
            "/goals/{id}",
            get(routes::goals::get_goal)
                .put(routes::goals::update_goal)
                .delete(routes::goals::delete_goal),
        )
        .route("/goals/{id}/status", post(routes::goals::set_goal_status))
        // Mood journal
        .route(
            "/mood",
            get(routes::mood::list_mood).post(routes::mood::add_mood),
        )
        .route("/mood/{id}", delete(routes::mood::delete_mood))
        // Support
        .route("/helplines", get(routes::helplines::list_helplines))
        .route("/helplines/{id}", get(routes::helplines::get_helpline))
        .route("/chat", post(routes::chat::chat))
        .route("/consultations", post(routes::consultations::book))
        .route("/conversations", post(routes::conversations::start))
        .route(
            "/conversations/{id}",
            get(routes::conversations::get_conversation),
        )
        .route(
            "/conversations/{id}/messages",
            post(routes::conversations::send_message),
        )
        .route("/data", delete(routes::data::clear_data))
        .layer(
            ServiceBuilder::new()
                .layer(cors)
                .layer(axum_mw::from_fn(middleware::audit::audit_log)),
        )
        .with_state(state)
}
