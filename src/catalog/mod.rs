//! Pack and card catalog collaborators.
//!
//! The simulator only needs two reads: the list of openable packs, and the
//! raw card list for one pack. [`CatalogClient`] is that seam;
//! [`MasterDuelMetaClient`] talks to the live catalog and [`InMemoryCatalog`]
//! serves static data.

pub mod mdm;

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CatalogResult;
use crate::models::{CardRecord, PackDefinition};

pub use mdm::MasterDuelMetaClient;

pub trait CatalogClient {
    /// All packs that can be opened.
    fn list_packs(&self) -> CatalogResult<Vec<PackDefinition>>;

    /// Raw card rows for a pack, in catalog order. May contain one row per
    /// print variant of the same card. An empty list is valid.
    fn list_cards(&self, pack_id: &str) -> CatalogResult<Vec<CardRecord>>;

    /// Drop any locally cached responses. A no-op for uncached catalogs.
    fn clear_cache(&self) -> CatalogResult<()> {
        Ok(())
    }
}

impl<C: CatalogClient + ?Sized> CatalogClient for Box<C> {
    fn list_packs(&self) -> CatalogResult<Vec<PackDefinition>> {
        (**self).list_packs()
    }

    fn list_cards(&self, pack_id: &str) -> CatalogResult<Vec<CardRecord>> {
        (**self).list_cards(pack_id)
    }

    fn clear_cache(&self) -> CatalogResult<()> {
        (**self).clear_cache()
    }
}

impl<C: CatalogClient + ?Sized> CatalogClient for &C {
    fn list_packs(&self) -> CatalogResult<Vec<PackDefinition>> {
        (**self).list_packs()
    }

    fn list_cards(&self, pack_id: &str) -> CatalogResult<Vec<CardRecord>> {
        (**self).list_cards(pack_id)
    }

    fn clear_cache(&self) -> CatalogResult<()> {
        (**self).clear_cache()
    }
}

// ---------------------------------------------------------------------------
// InMemoryCatalog
// ---------------------------------------------------------------------------

/// A fixed catalog held in memory, keyed by pack id.
///
/// Serializes as `{"packs": [...], "cards": {"<pack id>": [...]}}`, so a
/// snapshot of the live catalog can be saved and replayed offline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryCatalog {
    #[serde(default)]
    packs: Vec<PackDefinition>,
    #[serde(default)]
    cards: HashMap<String, Vec<CardRecord>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pack(mut self, pack: PackDefinition, cards: Vec<CardRecord>) -> Self {
        self.cards.insert(pack.id.clone(), cards);
        self.packs.push(pack);
        self
    }

    pub fn from_json(json: &str) -> CatalogResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> CatalogResult<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Copy everything another catalog knows into memory.
    pub fn snapshot<C: CatalogClient + ?Sized>(source: &C) -> CatalogResult<Self> {
        let packs = source.list_packs()?;
        let mut cards = HashMap::with_capacity(packs.len());
        for pack in &packs {
            cards.insert(pack.id.clone(), source.list_cards(&pack.id)?);
        }
        Ok(Self { packs, cards })
    }
}

impl CatalogClient for InMemoryCatalog {
    fn list_packs(&self) -> CatalogResult<Vec<PackDefinition>> {
        Ok(self.packs.clone())
    }

    fn list_cards(&self, pack_id: &str) -> CatalogResult<Vec<CardRecord>> {
        Ok(self.cards.get(pack_id).cloned().unwrap_or_default())
    }
}
