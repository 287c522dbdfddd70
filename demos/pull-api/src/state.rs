/// Shared application state available to all route handlers via Axum's
/// `State` extractor.
pub struct AppState {
    /// The async SDK. Dispatches blocking catalog calls to a thread pool
    /// internally.
    pub sdk: md_pull_sdk::AsyncPullSdk,
}
