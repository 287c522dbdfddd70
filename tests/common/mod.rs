//! Shared test fixtures for the pull SDK integration tests.
//!
//! Provides `sample_catalog()`, an in-memory catalog with one pack of each
//! kind, plus catalog wrappers for counting calls and simulating outages.

#![allow(dead_code)]

use std::cell::Cell;

use md_pull_sdk::error::{CatalogError, CatalogResult};
use md_pull_sdk::{CardRecord, CatalogClient, InMemoryCatalog, PackDefinition, PackKind, Rarity};

pub const MASTER_PACK: &str = "Master Pack";
pub const SECRET_PACK: &str = "Rapid Aircraft Advancement";
pub const SELECTION_PACK: &str = "Selection Pack Alpha";

/// `ur`/`sr`/`r`/`n` cards named `"{prefix} {RARITY} {i}"`, with ids and images.
pub fn card_set(prefix: &str, ur: usize, sr: usize, r: usize, n: usize) -> Vec<CardRecord> {
    let mut cards = Vec::new();
    for (rarity, count) in [
        (Rarity::UltraRare, ur),
        (Rarity::SuperRare, sr),
        (Rarity::Rare, r),
        (Rarity::Common, n),
    ] {
        for i in 0..count {
            let name = format!("{} {} {}", prefix, rarity.code(), i);
            cards.push(
                CardRecord::new(name.clone(), rarity)
                    .with_id(format!("{}-{}-{}", prefix.to_lowercase(), rarity.code(), i))
                    .with_image(format!("https://img.test/{}.webp", name.replace(' ', "_"))),
            );
        }
    }
    cards
}

/// A catalog with a baseline, an augmented and a curated pack. Every pack
/// has cards of every rarity; names are prefixed `Master`, `Secret` and
/// `Selection` respectively.
pub fn sample_catalog() -> InMemoryCatalog {
    InMemoryCatalog::new()
        .with_pack(
            PackDefinition::new("mp", PackKind::Baseline, MASTER_PACK),
            card_set("Master", 6, 8, 20, 40),
        )
        .with_pack(
            PackDefinition::new("sp-raa", PackKind::Augmented, SECRET_PACK),
            card_set("Secret", 4, 4, 6, 8),
        )
        .with_pack(
            PackDefinition::new("sel-a", PackKind::Curated, SELECTION_PACK),
            card_set("Selection", 5, 5, 10, 15),
        )
}

/// Wraps a catalog and counts calls to each method.
pub struct CountingCatalog<C> {
    pub inner: C,
    pub pack_calls: Cell<usize>,
    pub card_calls: Cell<usize>,
}

impl<C> CountingCatalog<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            pack_calls: Cell::new(0),
            card_calls: Cell::new(0),
        }
    }
}

impl<C: CatalogClient> CatalogClient for CountingCatalog<C> {
    fn list_packs(&self) -> CatalogResult<Vec<PackDefinition>> {
        self.pack_calls.set(self.pack_calls.get() + 1);
        self.inner.list_packs()
    }

    fn list_cards(&self, pack_id: &str) -> CatalogResult<Vec<CardRecord>> {
        self.card_calls.set(self.card_calls.get() + 1);
        self.inner.list_cards(pack_id)
    }
}

/// A catalog whose pack list works but whose card fetches fail, as when the
/// upstream API times out mid-request.
pub struct FlakyCatalog {
    pub packs: Vec<PackDefinition>,
}

impl CatalogClient for FlakyCatalog {
    fn list_packs(&self) -> CatalogResult<Vec<PackDefinition>> {
        Ok(self.packs.clone())
    }

    fn list_cards(&self, _pack_id: &str) -> CatalogResult<Vec<CardRecord>> {
        Err(CatalogError::Offline("upstream timed out".into()))
    }
}

/// Rolls that force every common slot to `common_roll` and the anchor slot
/// to `anchor_roll`, with every foil draw at 50 (no foil).
pub fn forced_rolls(common_roll: f64, anchor_roll: f64) -> Vec<f64> {
    let mut rolls = Vec::with_capacity(16);
    for _ in 0..7 {
        rolls.push(common_roll);
        rolls.push(50.0);
    }
    rolls.push(anchor_roll);
    rolls.push(50.0);
    rolls
}
