use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use serde_json::{json, Value};
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::error::AppError;
use crate::item::{Item, NewItem};
use crate::state::AppState;
use crate::store::{ItemStore, StoreError};

pub const INFO_MESSAGE: &str = "Items API is running";

// Store calls are synchronous; keep them off the async workers.
async fn with_store<T, F>(store: &ItemStore, op: F) -> Result<T, AppError>
where
    F: FnOnce(&ItemStore) -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    let store = store.clone();
    let result = tokio::task::spawn_blocking(move || op(&store))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(result?)
}

// Handler for GET /
async fn info_handler() -> Json<Value> {
    Json(json!({ "message": INFO_MESSAGE }))
}

// Handler for GET /api/items
async fn list_items(State(state): State<AppState>) -> Result<Json<Vec<Item>>, AppError> {
    let items = with_store(&state.store, |store| store.list()).await?;
    Ok(Json(items))
}

// Handler for POST /api/items
async fn create_item(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Item>), AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        warn!("Rejected create body: {rejection}");
        AppError::MalformedBody
    })?;

    let new_item = NewItem::from_payload(&payload).inspect_err(|e| {
        warn!("Invalid item: {e}");
    })?;

    let item = with_store(&state.store, move |store| store.insert(new_item)).await?;
    info!(id = %item.id, name = %item.name, "Item created");
    Ok((StatusCode::CREATED, Json(item)))
}

// Handler for DELETE /api/items/{id}
async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let target = id.clone();
    with_store(&state.store, move |store| store.delete(&target)).await?;
    info!(%id, "Delete handled");
    Ok(Json(json!({ "message": "Item deleted" })))
}

pub fn create_app(state: AppState, static_dir: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/", get(info_handler))
        .route("/api/items", get(list_items).post(create_item))
        .route("/api/items/{id}", delete(delete_item))
        // serve the built client bundle for everything else
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
