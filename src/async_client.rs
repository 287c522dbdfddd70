//! Async wrapper around [`PullSdk`] for use in async runtimes (Tokio, etc.).
//!
//! Catalog calls are blocking HTTP requests, so every SDK operation runs on
//! the blocking thread pool via [`tokio::task::spawn_blocking`].
//!
//! # Example
//!
//! ```no_run
//! use md_pull_sdk::{AsyncPullSdk, PullRequest};
//!
//! # async fn demo() -> md_pull_sdk::Result<()> {
//! let sdk = AsyncPullSdk::builder().build().await?;
//!
//! let result = sdk
//!     .simulate(PullRequest::new("Rapid Aircraft Advancement", 10))
//!     .await?;
//! println!("{} URs", result.total_ultra_rare_count);
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use crate::error::{PullError, Result};
use crate::fixups::FixupTable;
use crate::models::{PackDefinition, PullRequest, PullResponse};
use crate::{config, CatalogClient, PullSdk};

// ---------------------------------------------------------------------------
// AsyncPullSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncPullSdk`] instance.
pub struct AsyncPullSdkBuilder {
    cache_dir: Option<PathBuf>,
    offline: bool,
    timeout: Duration,
    cache_ttl: Duration,
    fixups: Option<FixupTable>,
    catalog: Option<Box<dyn CatalogClient + Send>>,
    seed: Option<u64>,
}

impl Default for AsyncPullSdkBuilder {
    fn default() -> Self {
        Self {
            cache_dir: None,
            offline: false,
            timeout: config::DEFAULT_TIMEOUT,
            cache_ttl: config::DEFAULT_CACHE_TTL,
            fixups: None,
            catalog: None,
            seed: None,
        }
    }
}

impl AsyncPullSdkBuilder {
    /// Set a custom cache directory.
    pub fn cache_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.cache_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Enable or disable offline mode.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Set the HTTP request timeout for catalog calls.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn fixups(mut self, fixups: FixupTable) -> Self {
        self.fixups = Some(fixups);
        self
    }

    pub fn catalog<C: CatalogClient + Send + 'static>(mut self, catalog: C) -> Self {
        self.catalog = Some(Box::new(catalog));
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build the async SDK on the blocking thread pool.
    pub async fn build(self) -> Result<AsyncPullSdk> {
        tokio::task::spawn_blocking(move || {
            let mut builder = PullSdk::builder()
                .offline(self.offline)
                .timeout(self.timeout)
                .cache_ttl(self.cache_ttl);
            if let Some(dir) = self.cache_dir {
                builder = builder.cache_dir(dir);
            }
            if let Some(fixups) = self.fixups {
                builder = builder.fixups(fixups);
            }
            if let Some(catalog) = self.catalog {
                builder = builder.catalog(catalog);
            }
            if let Some(seed) = self.seed {
                builder = builder.seed(seed);
            }
            let sdk = builder.build()?;
            Ok(AsyncPullSdk {
                inner: Arc::new(Mutex::new(sdk)),
            })
        })
        .await
        .map_err(|e| PullError::Internal(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncPullSdk
// ---------------------------------------------------------------------------

/// Async wrapper around [`PullSdk`].
///
/// The live catalog keeps its cache behind a `RefCell`, so the SDK is
/// guarded by a [`Mutex`] and operations are serialized.
#[derive(Clone)]
pub struct AsyncPullSdk {
    inner: Arc<Mutex<PullSdk>>,
}

impl AsyncPullSdk {
    /// Create a new builder for configuring the async SDK.
    pub fn builder() -> AsyncPullSdkBuilder {
        AsyncPullSdkBuilder::default()
    }

    /// Run a sync SDK operation on the blocking thread pool.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&PullSdk) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sdk = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            // A panicking closure leaves no partial state in the SDK.
            let guard = sdk.lock().unwrap_or_else(PoisonError::into_inner);
            f(&guard)
        })
        .await
        .map_err(|e| PullError::Internal(format!("Task join error: {e}")))?
    }

    /// List openable packs asynchronously.
    pub async fn packs(&self) -> Result<Vec<PackDefinition>> {
        self.run(|s| s.packs()).await
    }

    /// Simulate a pull request asynchronously.
    pub async fn simulate(&self, request: PullRequest) -> Result<PullResponse> {
        self.run(move |s| s.simulate(&request)).await
    }

    /// Drop cached catalog responses.
    pub async fn clear_cache(&self) -> Result<()> {
        self.run(|s| s.clear_cache()).await
    }
}
