use std::sync::Arc;

use axum::extract::State;
use axum::response::Json;
use md_pull_sdk::{PullRequest, PullResponse};

use crate::config::MAX_PACKS_PER_REQUEST;
use crate::error::AppError;
use crate::state::AppState;

/// POST /api/pull
///
/// Body: `{"pack_name": "...", "num_packs": 10}` with an optional `"seed"`.
pub async fn perform_pulls(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PullRequest>,
) -> Result<Json<PullResponse>, AppError> {
    if request.pack_name.trim().is_empty() {
        return Err(AppError::bad_request("pack_name must not be empty"));
    }
    if !(1..=MAX_PACKS_PER_REQUEST).contains(&request.num_packs) {
        return Err(AppError::bad_request(format!(
            "num_packs must be between 1 and {MAX_PACKS_PER_REQUEST}"
        )));
    }

    let response = state.sdk.simulate(request).await?;
    Ok(Json(response))
}
