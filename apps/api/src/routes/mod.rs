pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::auth::handlers as auth_handlers;
use crate::interview::handlers as interview_handlers;
use crate::state::AppState;
use crate::support::handlers as support_handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Auth API
        .route("/auth/register", post(auth_handlers::register))
        .route("/auth/login", post(auth_handlers::login))
        .route("/auth/profile", get(auth_handlers::profile))
        // Interview API
        .route(
            "/interviews",
            post(interview_handlers::create_interview).get(interview_handlers::list_interviews),
        )
        .route(
            "/interviews/:id/start",
            post(interview_handlers::start_interview),
        )
        .route(
            "/interviews/:id/chat",
            post(interview_handlers::post_chat).get(interview_handlers::get_chat),
        )
        .route(
            "/interviews/:id/feedback",
            get(interview_handlers::get_feedback),
        )
        .route("/interviews/:id", delete(interview_handlers::delete_interview))
        // Support API
        .route(
            "/support/chats",
            post(support_handlers::post_chat).get(support_handlers::get_chats),
        )
        .with_state(state)
}
