use axum::response::Json;
use serde_json::{json, Value};

/// GET /api/version
///
/// Returns the service version and, when built with `GIT_HASH` set, the
/// commit it was built from.
pub async fn get_version() -> Json<Value> {
    Json(json!({
        "version": env!("CARGO_PKG_VERSION"),
        "hash": option_env!("GIT_HASH").unwrap_or("unknown"),
    }))
}
