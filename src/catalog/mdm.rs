//! Master Duel Meta catalog client.
//!
//! Pack metadata and card lists come from the Master Duel Meta API. Cards
//! that the API lists without a Konami id are resolved against YGOPRODeck by
//! name.

use std::cell::RefCell;

use serde::Deserialize;

use super::CatalogClient;
use crate::cache::CacheManager;
use crate::config;
use crate::error::{CatalogError, CatalogResult};
use crate::models::{CardRecord, PackDefinition, PackKind, Rarity};

/// Card names the catalog is known to misspell, with their correct form.
const NAME_CORRECTIONS: &[(&str, &str)] = &[("GranSolfacord Coolia", "GranSolfachord Coolia")];

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct MdmSet {
    #[serde(rename = "_id")]
    id: String,
    name: String,
    #[serde(rename = "type", default)]
    set_type: String,
}

#[derive(Debug, Deserialize)]
struct MdmCard {
    #[serde(rename = "_id", default)]
    id: Option<String>,
    name: String,
    #[serde(default)]
    rarity: String,
    #[serde(rename = "konamiID", default)]
    konami_id: Option<KonamiId>,
}

/// Konami ids arrive either as a JSON number or as a numeric string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum KonamiId {
    Number(u64),
    Text(String),
}

impl KonamiId {
    fn as_u64(&self) -> Option<u64> {
        let id = match self {
            KonamiId::Number(n) => Some(*n),
            KonamiId::Text(s) => s.trim().parse().ok(),
        };
        // The catalog uses 0 for "unknown".
        id.filter(|id| *id != 0)
    }
}

#[derive(Debug, Default, Deserialize)]
struct YgoProDeckResponse {
    #[serde(default)]
    data: Vec<YgoProDeckCard>,
}

#[derive(Debug, Deserialize)]
struct YgoProDeckCard {
    id: u64,
}

// ---------------------------------------------------------------------------
// MasterDuelMetaClient
// ---------------------------------------------------------------------------

/// Live catalog backed by the Master Duel Meta API, with responses cached by
/// a [`CacheManager`].
pub struct MasterDuelMetaClient {
    cache: RefCell<CacheManager>,
}

impl MasterDuelMetaClient {
    pub fn new(cache: CacheManager) -> Self {
        Self {
            cache: RefCell::new(cache),
        }
    }

    fn fetch_cards_page(&self, pack_id: &str, page: usize) -> CatalogResult<Vec<MdmCard>> {
        self.cache.borrow_mut().get_json(
            &config::cards_url(),
            &config::cards_query(pack_id, page),
            &format!("cards-{}-p{}", pack_id, page),
        )
    }

    /// Look up a card's Konami id on YGOPRODeck by exact name.
    fn lookup_konami_id(&self, name: &str) -> CatalogResult<Option<u64>> {
        let response: YgoProDeckResponse = self.cache.borrow_mut().get_json(
            config::YGOPRODECK_CARD_INFO_URL,
            &[("name", name.to_string())],
            &format!("ygoprodeck-{}", name),
        )?;
        Ok(response.data.first().map(|c| c.id))
    }

    fn to_record(&self, card: MdmCard) -> Option<CardRecord> {
        let Some(rarity) = Rarity::from_code(&card.rarity) else {
            tracing::warn!(card = %card.name, rarity = %card.rarity, "skipping card with unknown rarity");
            return None;
        };

        let name = NAME_CORRECTIONS
            .iter()
            .find(|(wrong, _)| *wrong == card.name)
            .map(|(_, right)| right.to_string())
            .unwrap_or(card.name);

        let konami_id = match card.konami_id.as_ref().and_then(KonamiId::as_u64) {
            Some(id) => Some(id),
            None => match self.lookup_konami_id(&name) {
                Ok(id) => id,
                Err(e) => {
                    tracing::warn!(card = %name, error = %e, "Konami id lookup failed");
                    None
                }
            },
        };

        let mut record = CardRecord::new(name, rarity);
        if let Some(id) = konami_id {
            record = record.with_id(id.to_string());
        }
        if let Some(catalog_id) = card.id.as_deref() {
            record = record.with_image(config::card_image_url(catalog_id));
        }
        Some(record)
    }
}

impl CatalogClient for MasterDuelMetaClient {
    fn list_packs(&self) -> CatalogResult<Vec<PackDefinition>> {
        let sets: Vec<MdmSet> = self.cache.borrow_mut().get_json(
            &config::sets_url(),
            &config::sets_query(),
            "sets",
        )?;

        Ok(sets
            .into_iter()
            .filter_map(|set| {
                PackKind::from_catalog_type(&set.set_type)
                    .map(|kind| PackDefinition::new(set.id, kind, set.name))
            })
            .collect())
    }

    fn list_cards(&self, pack_id: &str) -> CatalogResult<Vec<CardRecord>> {
        if pack_id.is_empty() {
            return Err(CatalogError::Malformed("empty pack id".into()));
        }

        let mut raw = Vec::new();
        let mut page = 1;
        loop {
            let batch = self.fetch_cards_page(pack_id, page)?;
            if batch.is_empty() {
                break;
            }
            let short_page = batch.len() < config::CARDS_PAGE_SIZE;
            raw.extend(batch);
            page += 1;
            if short_page {
                break;
            }
        }

        tracing::debug!(pack_id, rows = raw.len(), pages = page - 1, "fetched pack cards");
        Ok(raw.into_iter().filter_map(|c| self.to_record(c)).collect())
    }

    fn clear_cache(&self) -> CatalogResult<()> {
        let mut cache = self.cache.borrow_mut();
        cache.clear()?;
        cache.close();
        Ok(())
    }
}
