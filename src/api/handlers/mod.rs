use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use crate::engine::Directory;
use crate::models::{Criteria, CriteriaUpdate, Employee, OrgNode};
use crate::sources::LoadError;

// ============================================================
// Error Handling
// ============================================================

/// Load failures are the only user-visible error state; everything below the
/// roster-load level is absorbed inside the engine. The upstream failure is
/// reported as a gateway error with its message.
fn load_error(e: LoadError) -> (StatusCode, String) {
    tracing::error!("Directory load failed: {}", e);
    (StatusCode::BAD_GATEWAY, e.to_string())
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Roster
// ============================================================

pub async fn list_employees(State(directory): State<Directory>) -> Json<Vec<Employee>> {
    Json(directory.current_roster())
}

pub async fn list_visible_employees(State(directory): State<Directory>) -> Json<Vec<Employee>> {
    Json(directory.visible_employees())
}

#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub loaded: usize,
}

/// Re-run the directory loader. On failure the previous roster stays in
/// place and the error is surfaced to the caller.
pub async fn reload(
    State(directory): State<Directory>,
) -> Result<Json<ReloadResponse>, (StatusCode, String)> {
    directory
        .load()
        .await
        .map(|loaded| Json(ReloadResponse { loaded }))
        .map_err(load_error)
}

/// Run one presence enrichment pass immediately and return the refreshed
/// roster. Never fails: per-employee lookup errors default to offline and a
/// pass-level failure keeps last-known statuses.
pub async fn refresh_presence(State(directory): State<Directory>) -> Json<Vec<Employee>> {
    directory.refresh_presence().await;
    Json(directory.current_roster())
}

// ============================================================
// Filtering
// ============================================================

pub async fn get_criteria(State(directory): State<Directory>) -> Json<Criteria> {
    Json(directory.criteria())
}

pub async fn update_criteria(
    State(directory): State<Directory>,
    Json(update): Json<CriteriaUpdate>,
) -> Json<Vec<Employee>> {
    directory.set_criteria(update);
    Json(directory.visible_employees())
}

pub async fn reset_criteria(State(directory): State<Directory>) -> Json<Vec<Employee>> {
    directory.reset_criteria();
    Json(directory.visible_employees())
}

pub async fn list_departments(State(directory): State<Directory>) -> Json<Vec<String>> {
    Json(directory.departments())
}

pub async fn list_job_titles(State(directory): State<Directory>) -> Json<Vec<String>> {
    Json(directory.job_titles())
}

// ============================================================
// Org Chart
// ============================================================

/// The derived reporting tree, built fresh per request. `null` when no
/// employee lacks a manager reference.
pub async fn get_org_chart(State(directory): State<Directory>) -> Json<Option<OrgNode>> {
    Json(directory.org_chart())
}
