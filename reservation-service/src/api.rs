use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{delete, get},
    Router,
};
use chrono::Utc;
use serde::Deserialize;
use shared::*;
use tokio::sync::Mutex;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::debug;

use crate::error::StoreError;
use crate::store::ReservationStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<ReservationStore>>,
    pub public_dir: PathBuf,
}

impl AppState {
    pub fn new(store: ReservationStore, public_dir: impl Into<PathBuf>) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            public_dir: public_dir.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignableTablesQuery {
    pub current_reservation: Option<String>,
}

pub fn create_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.public_dir);

    Router::new()
        .route("/tables", get(list_tables))
        .route("/available-tables", get(list_assignable_tables))
        .route(
            "/reservations",
            get(list_reservations).post(upsert_reservation),
        )
        .route("/reservations/:id", delete(cancel_reservation))
        .route("/health", get(health_check))
        .fallback_service(static_files)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

pub async fn list_tables(State(state): State<AppState>) -> Json<Vec<TableSummary>> {
    let store = state.store.lock().await;
    Json(store.list_available_tables())
}

pub async fn list_assignable_tables(
    State(state): State<AppState>,
    Query(query): Query<AssignableTablesQuery>,
) -> Json<Vec<Table>> {
    // A blank or garbled id just means "not editing".
    let excluding = query
        .current_reservation
        .as_deref()
        .and_then(|raw| raw.trim().parse::<ReservationId>().ok());
    debug!("Listing assignable tables, editing {:?}", excluding);

    let store = state.store.lock().await;
    Json(store.list_assignable_tables(excluding))
}

pub async fn list_reservations(State(state): State<AppState>) -> Json<Vec<Reservation>> {
    let store = state.store.lock().await;
    Json(store.list_reservations().to_vec())
}

pub async fn upsert_reservation(
    State(state): State<AppState>,
    Json(request): Json<ReservationRequest>,
) -> Result<Json<ReservationResponse>, StoreError> {
    let mut store = state.store.lock().await;
    let (reservation, outcome) = store.upsert_reservation(request, Utc::now())?;
    Ok(Json(ReservationResponse::new(outcome, reservation)))
}

pub async fn cancel_reservation(
    State(state): State<AppState>,
    Path(id): Path<ReservationId>,
) -> Result<Json<CancelResponse>, StoreError> {
    let mut store = state.store.lock().await;
    store.cancel_reservation(id)?;
    Ok(Json(CancelResponse::cancelled()))
}

pub async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
#[path = "tests/api_tests.rs"]
mod tests;
