//! On-disk cache for catalog API responses.
//!
//! Responses are stored gzip-compressed under the cache directory and served
//! from disk while younger than the configured TTL. In offline mode cached
//! responses are used regardless of age and nothing is downloaded.

use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config;
use crate::error::{CatalogError, CatalogResult};

/// Downloads catalog responses and caches them on disk.
pub struct CacheManager {
    /// Directory where cached responses are stored.
    pub cache_dir: PathBuf,
    /// If true, never hit the network (use cached responses only).
    pub offline: bool,
    /// How long a cached response stays fresh.
    pub ttl: Duration,
    timeout: Duration,
    client: Option<Client>,
}

impl CacheManager {
    /// Create a new cache manager.
    ///
    /// If `cache_dir` is `None`, uses the platform-appropriate default cache directory.
    /// Creates the cache directory if it does not exist.
    pub fn new(
        cache_dir: Option<PathBuf>,
        offline: bool,
        timeout: Duration,
        ttl: Duration,
    ) -> CatalogResult<Self> {
        let dir = cache_dir.unwrap_or_else(config::default_cache_dir);
        fs::create_dir_all(&dir)?;
        Ok(Self {
            cache_dir: dir,
            offline,
            ttl,
            timeout,
            client: None,
        })
    }

    /// Lazy HTTP client, created on first use.
    pub fn client(&mut self) -> CatalogResult<&Client> {
        if self.client.is_none() {
            let client = Client::builder()
                .timeout(self.timeout)
                .redirect(reqwest::redirect::Policy::limited(10))
                .build()?;
            self.client = Some(client);
        }
        self.client
            .as_ref()
            .ok_or_else(|| CatalogError::Malformed("HTTP client not initialised".into()))
    }

    /// Local path for a cache key. Bytes outside `[A-Za-z0-9-]` are hex
    /// escaped so distinct keys never share a file.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let mut file = String::with_capacity(key.len() + 8);
        for b in key.bytes() {
            if b.is_ascii_alphanumeric() || b == b'-' {
                file.push(b as char);
            } else {
                file.push_str(&format!("_{:02x}", b));
            }
        }
        file.push_str(".json.gz");
        self.cache_dir.join(file)
    }

    fn is_fresh(&self, path: &Path) -> bool {
        fs::metadata(path)
            .and_then(|m| m.modified())
            .ok()
            .and_then(|modified| SystemTime::now().duration_since(modified).ok())
            .map(|age| age < self.ttl)
            .unwrap_or(false)
    }

    fn read_cached<T: DeserializeOwned>(&self, path: &Path) -> CatalogResult<T> {
        let file = fs::File::open(path)?;
        let mut contents = String::new();
        GzDecoder::new(file).read_to_string(&mut contents)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Write to a temp file first and rename on success, so an interrupted
    /// write never leaves a corrupt entry behind.
    fn write_cached(&self, path: &Path, bytes: &[u8]) -> CatalogResult<()> {
        let tmp = path.with_extension("gz.tmp");
        let result = (|| -> CatalogResult<()> {
            let mut encoder = GzEncoder::new(fs::File::create(&tmp)?, Compression::default());
            encoder.write_all(bytes)?;
            encoder.finish()?;
            fs::rename(&tmp, path)?;
            Ok(())
        })();

        if result.is_err() {
            let _ = fs::remove_file(&tmp);
        }
        result
    }

    /// Store a value under `key`, e.g. to prime the cache for offline use.
    pub fn store_json<T: Serialize>(&self, key: &str, value: &T) -> CatalogResult<()> {
        let bytes = serde_json::to_vec(value)?;
        self.write_cached(&self.path_for(key), &bytes)
    }

    /// Fetch `url` with `query` as JSON, going through the cache under `key`.
    ///
    /// A cached entry that fails to parse is deleted; online, the response is
    /// then downloaded again.
    pub fn get_json<T: DeserializeOwned>(
        &mut self,
        url: &str,
        query: &[(&str, String)],
        key: &str,
    ) -> CatalogResult<T> {
        let path = self.path_for(key);

        if path.exists() && (self.offline || self.is_fresh(&path)) {
            match self.read_cached(&path) {
                Ok(value) => {
                    tracing::debug!(key, "catalog cache hit");
                    return Ok(value);
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "corrupt cache file, removing");
                    let _ = fs::remove_file(&path);
                }
            }
        }

        if self.offline {
            return Err(CatalogError::Offline(format!(
                "'{}' is not cached and offline mode is enabled",
                key
            )));
        }

        tracing::debug!(url, ?query, "catalog request");
        let client = self.client()?.clone();
        let bytes = client
            .get(url)
            .query(query)
            .send()?
            .error_for_status()?
            .bytes()?;
        let value: T = serde_json::from_slice(&bytes)?;

        if let Err(e) = self.write_cached(&path, &bytes) {
            tracing::warn!(key, error = %e, "failed to write catalog cache entry");
        }
        Ok(value)
    }

    /// Remove all cached files and recreate the cache directory.
    pub fn clear(&self) -> CatalogResult<()> {
        if self.cache_dir.exists() {
            fs::remove_dir_all(&self.cache_dir)?;
            fs::create_dir_all(&self.cache_dir)?;
        }
        Ok(())
    }

    /// Close the HTTP client, if open.
    pub fn close(&mut self) {
        self.client = None;
    }
}
