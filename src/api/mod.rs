mod handlers;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::engine::Directory;

pub fn create_router(directory: Directory) -> Router {
    let api = Router::new()
        // Roster
        .route("/employees", get(handlers::list_employees))
        .route("/employees/visible", get(handlers::list_visible_employees))
        .route("/reload", post(handlers::reload))
        .route("/refresh", post(handlers::refresh_presence))
        // Filtering
        .route("/criteria", get(handlers::get_criteria))
        .route("/criteria", put(handlers::update_criteria))
        .route("/criteria", delete(handlers::reset_criteria))
        .route("/departments", get(handlers::list_departments))
        .route("/job-titles", get(handlers::list_job_titles))
        // Org chart
        .route("/org-chart", get(handlers::get_org_chart))
        // Health
        .route("/health", get(handlers::health));

    Router::new()
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(directory)
}
