use std::io::Cursor;

use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::Utc;
use cop_backoffice::dashboard::{
    DashboardEvent, DashboardReport, DashboardSnapshot, DashboardState,
};
use cop_backoffice::error::AppError;
use cop_backoffice::export::{export_document, export_workbook};
use cop_backoffice::import::RosterImporter;
use cop_backoffice::store::EventStore;
use serde_json::json;

use crate::infra::AppState;

pub(crate) fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/dashboard", get(dashboard_endpoint))
        .route("/api/v1/dashboard/refresh", post(refresh_endpoint))
        .route("/api/v1/export/workbook", post(export_workbook_endpoint))
        .route("/api/v1/export/document", post(export_document_endpoint))
        .route("/api/v1/import/roster", post(import_roster_endpoint))
        .layer(Extension(state))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Pull a fresh snapshot from every store and run a full aggregation pass.
/// The resulting report replaces whatever the dashboard held before.
pub(crate) async fn refresh_endpoint(
    Extension(state): Extension<AppState>,
) -> Result<impl IntoResponse, AppError> {
    transition(&state, DashboardEvent::RefreshRequested { at: Utc::now() });

    let center = state.center.as_ref();
    let loaded = DashboardSnapshot::load(center, center, center, center, center);

    match loaded {
        Ok(snapshot) => {
            let report = DashboardReport::from_snapshot(snapshot, Utc::now());
            let payload = json!({
                "generated_at": report.generated_at,
                "metrics": report.metrics,
            });
            let mut guard = state.dashboard.lock().expect("dashboard mutex poisoned");
            *guard = DashboardState::Ready(report);
            Ok(Json(payload))
        }
        Err(err) => {
            transition(
                &state,
                DashboardEvent::FetchFailed {
                    reason: err.to_string(),
                },
            );
            Err(AppError::Store(err))
        }
    }
}

pub(crate) async fn dashboard_endpoint(
    Extension(state): Extension<AppState>,
) -> impl IntoResponse {
    let guard = state.dashboard.lock().expect("dashboard mutex poisoned");
    match &*guard {
        DashboardState::Ready(report) => (
            StatusCode::OK,
            Json(json!({
                "phase": "ready",
                "generated_at": report.generated_at,
                "metrics": report.metrics,
            })),
        ),
        DashboardState::Loading { since } => {
            let stalled = guard.is_stalled(Utc::now(), state.loading_timeout);
            let message = if stalled {
                "toujours en attente des données"
            } else {
                "chargement en cours"
            };
            (
                StatusCode::ACCEPTED,
                Json(json!({
                    "phase": "loading",
                    "since": since,
                    "stalled": stalled,
                    "message": message,
                })),
            )
        }
        DashboardState::Idle => (
            StatusCode::CONFLICT,
            Json(json!({
                "phase": "idle",
                "error": "aucune actualisation n'a été demandée",
            })),
        ),
        DashboardState::Failed { reason } => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "phase": "failed",
                "error": reason,
            })),
        ),
    }
}

pub(crate) async fn export_workbook_endpoint(
    Extension(state): Extension<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let guard = state.dashboard.lock().expect("dashboard mutex poisoned");
    let workbook = export_workbook(&guard)?;
    Ok(Json(workbook))
}

pub(crate) async fn export_document_endpoint(
    Extension(state): Extension<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let guard = state.dashboard.lock().expect("dashboard mutex poisoned");
    let document = export_document(&guard)?;
    Ok(Json(document))
}

/// Ingest a roster CSV into the event store. A successful import resets the
/// dashboard to idle: mutations are followed by a full re-fetch and
/// re-aggregation, never an incremental update.
pub(crate) async fn import_roster_endpoint(
    Extension(state): Extension<AppState>,
    body: String,
) -> Result<impl IntoResponse, AppError> {
    let events = RosterImporter::from_reader(Cursor::new(body.into_bytes()))?;
    let imported = state.center.add_events(events)?;

    let mut guard = state.dashboard.lock().expect("dashboard mutex poisoned");
    *guard = DashboardState::Idle;

    Ok((StatusCode::CREATED, Json(json!({ "imported": imported }))))
}

fn transition(state: &AppState, event: DashboardEvent) {
    let mut guard = state.dashboard.lock().expect("dashboard mutex poisoned");
    *guard = std::mem::take(&mut *guard).apply(event);
}
