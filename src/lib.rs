//! Master Duel pack pull SDK for Rust.
//!
//! Simulates opening Secret, Selection and Master packs. Pack metadata and
//! card lists come from the Master Duel Meta catalog (cached locally); the
//! rarity and foil of every slot are rolled from a fixed odds table and a
//! concrete card is drawn from the pack's pool.
//!
//! # Quick start
//!
//! ```no_run
//! use md_pull_sdk::{PullRequest, PullSdk};
//!
//! let sdk = PullSdk::builder().build().unwrap();
//!
//! // List openable packs
//! let packs = sdk.packs().unwrap();
//!
//! // Open ten packs
//! let result = sdk.simulate(&PullRequest::new("Rapid Aircraft Advancement", 10)).unwrap();
//! println!("{} URs", result.total_ultra_rare_count);
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod fixups;
pub mod models;
pub mod odds;
pub mod pool;
pub mod pulls;

#[cfg(feature = "async")]
pub use async_client::AsyncPullSdk;
pub use cache::CacheManager;
pub use catalog::{CatalogClient, InMemoryCatalog, MasterDuelMetaClient};
pub use error::{CatalogError, PullError, Result};
pub use fixups::{Fixup, FixupTable};
pub use models::{
    CardRecord, Foil, PackDefinition, PackKind, PullRequest, PullResponse, PulledOutcome, Rarity,
    ResultCard,
};
pub use odds::{RollSource, ScriptedRolls};
pub use pool::CardPool;
pub use pulls::PullSimulator;

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

// ---------------------------------------------------------------------------
// PullSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`PullSdk`] instance.
///
/// Use [`PullSdk::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](PullSdkBuilder::build) to create the SDK.
pub struct PullSdkBuilder {
    cache_dir: Option<PathBuf>,
    offline: bool,
    timeout: Duration,
    cache_ttl: Duration,
    fixups: Option<FixupTable>,
    catalog: Option<Box<dyn CatalogClient + Send>>,
    seed: Option<u64>,
}

impl Default for PullSdkBuilder {
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

impl PullSdkBuilder {
    /// Set a custom cache directory for catalog responses.
    ///
    /// If not set, the platform-appropriate default cache directory is used
    /// (e.g. `~/.cache/md-pull-sdk` on Linux).
    pub fn cache_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.cache_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Enable or disable offline mode.
    ///
    /// When offline, the SDK never contacts the catalog API and only uses
    /// previously cached responses. Defaults to `false`.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Set the HTTP request timeout for catalog calls. Defaults to 120 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// How long cached catalog responses are reused. Defaults to 6 hours.
    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Replace the built-in fixup table.
    pub fn fixups(mut self, fixups: FixupTable) -> Self {
        self.fixups = Some(fixups);
        self
    }

    /// Use a custom catalog instead of the live Master Duel Meta API.
    ///
    /// Cache settings are ignored when a catalog is supplied.
    pub fn catalog<C: CatalogClient + Send + 'static>(mut self, catalog: C) -> Self {
        self.catalog = Some(Box::new(catalog));
        self
    }

    /// Seed every simulation that does not carry its own seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build the SDK.
    ///
    /// Creates the cache directory when the live catalog is used, but does
    /// not contact the catalog; data is fetched on first use.
    pub fn build(self) -> Result<PullSdk> {
        let (catalog, source): (Box<dyn CatalogClient + Send>, String) = match self.catalog {
            Some(catalog) => (catalog, "custom".to_string()),
            None => {
                let cache =
                    CacheManager::new(self.cache_dir, self.offline, self.timeout, self.cache_ttl)?;
                let source = format!(
                    "masterduelmeta(cache_dir={}, offline={})",
                    cache.cache_dir.display(),
                    cache.offline
                );
                (Box::new(MasterDuelMetaClient::new(cache)), source)
            }
        };

        Ok(PullSdk {
            catalog,
            source,
            fixups: self.fixups.unwrap_or_else(FixupTable::builtin),
            seed: self.seed,
        })
    }
}

// ---------------------------------------------------------------------------
// PullSdk
// ---------------------------------------------------------------------------

/// The main entry point for simulating pack pulls.
///
/// Owns the catalog collaborator and the fixup table; every simulation builds
/// its pools afresh and uses its own random generator.
///
/// Created via [`PullSdk::builder()`].
pub struct PullSdk {
    catalog: Box<dyn CatalogClient + Send>,
    source: String,
    fixups: FixupTable,
    seed: Option<u64>,
}

impl PullSdk {
    /// Create a new builder for configuring the SDK.
    pub fn builder() -> PullSdkBuilder {
        PullSdkBuilder::default()
    }

    /// Access the pull simulator.
    ///
    /// Returns a lightweight wrapper borrowing the catalog and fixups.
    pub fn simulator(&self) -> PullSimulator<'_> {
        PullSimulator::new(&*self.catalog, &self.fixups)
    }

    /// List every pack that can be opened.
    pub fn packs(&self) -> Result<Vec<PackDefinition>> {
        self.simulator().list_packs()
    }

    /// Simulate a pull request.
    ///
    /// Uses the request's seed, else the SDK's seed, else fresh entropy.
    pub fn simulate(&self, request: &PullRequest) -> Result<PullResponse> {
        let mut rng = match request.seed.or(self.seed) {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.simulator().simulate(request, &mut rng)
    }

    /// Simulate a pull request with caller-supplied randomness.
    pub fn simulate_with<S: RollSource + ?Sized>(
        &self,
        request: &PullRequest,
        rolls: &mut S,
    ) -> Result<PullResponse> {
        self.simulator().simulate(request, rolls)
    }

    /// The fixup table applied when building pools.
    pub fn fixups(&self) -> &FixupTable {
        &self.fixups
    }

    /// Return a reference to the underlying catalog for advanced usage.
    pub fn catalog(&self) -> &dyn CatalogClient {
        &*self.catalog
    }

    /// Drop all cached catalog responses so the next call refetches.
    pub fn clear_cache(&self) -> Result<()> {
        self.catalog.clear_cache()?;
        tracing::info!(source = %self.source, "catalog cache cleared");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for PullSdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PullSdk(catalog={}, fixup_packs={}, global_fixups={}, seed={})",
            self.source,
            self.fixups.packs.len(),
            self.fixups.global.len(),
            self.seed
                .map(|s| s.to_string())
                .unwrap_or_else(|| "none".to_string())
        )
    }
}
