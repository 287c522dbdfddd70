use std::env;
use std::path::PathBuf;

/// Largest number of packs a single request may open.
pub const MAX_PACKS_PER_REQUEST: usize = 1000;

/// Service settings read from the environment.
pub struct ServiceConfig {
    /// `PORT`, default 4000.
    pub port: u16,
    /// `PULL_CACHE_DIR`: catalog cache directory.
    pub cache_dir: Option<PathBuf>,
    /// `PULL_OFFLINE`: serve only cached catalog responses.
    pub offline: bool,
    /// `PULL_FIXUPS`: JSON fixup table replacing the built-in one.
    pub fixups_path: Option<PathBuf>,
    /// `PULL_CATALOG_FILE`: JSON catalog snapshot used instead of the live API.
    pub catalog_path: Option<PathBuf>,
}

impl ServiceConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(4000),
            cache_dir: env::var_os("PULL_CACHE_DIR").map(PathBuf::from),
            offline: env::var("PULL_OFFLINE")
                .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            fixups_path: env::var_os("PULL_FIXUPS").map(PathBuf::from),
            catalog_path: env::var_os("PULL_CATALOG_FILE").map(PathBuf::from),
        }
    }
}
