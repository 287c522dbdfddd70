use std::sync::Arc;

use axum::extract::State;
use axum::response::Json;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/packs
///
/// List every pack that can be opened.
pub async fn list_packs(State(state): State<Arc<AppState>>) -> Result<Json<Value>, AppError> {
    let packs = state.sdk.packs().await?;

    let count = packs.len();
    Ok(Json(json!({ "data": packs, "count": count })))
}
