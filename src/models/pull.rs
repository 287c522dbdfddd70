use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::card::{CardRecord, Foil, Rarity};

// ---------------------------------------------------------------------------
// PulledOutcome
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PulledOutcome {
    pub rarity: Rarity,
    pub foil: Foil,
}

// ---------------------------------------------------------------------------
// ResultCard
// ---------------------------------------------------------------------------

/// A pulled card as returned to API callers.
///
/// `card_id` and `card_img` are empty strings when the catalog has no
/// identifier or image for the card (e.g. cards inserted by a fixup).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultCard {
    pub card_id: String,
    pub card_name: String,
    pub card_img: String,
    pub card_rarity: Rarity,
    pub card_foil: Foil,
}

impl ResultCard {
    /// Combine a selected card with the rolled outcome. The rolled rarity is
    /// authoritative, even for records that came from another bucket's data.
    pub fn from_record(record: &CardRecord, outcome: PulledOutcome) -> Self {
        Self {
            card_id: record.id.clone().unwrap_or_default(),
            card_name: record.name.clone(),
            card_img: record.image.clone().unwrap_or_default(),
            card_rarity: outcome.rarity,
            card_foil: outcome.foil,
        }
    }
}

// ---------------------------------------------------------------------------
// PullRequest / PullResponse
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    pub pack_name: String,
    pub num_packs: usize,
    /// Fixed seed for a reproducible simulation. A fresh entropy-seeded
    /// generator is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl PullRequest {
    pub fn new(pack_name: impl Into<String>, num_packs: usize) -> Self {
        Self {
            pack_name: pack_name.into(),
            num_packs,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullResponse {
    pub pack_name: String,
    #[serde(rename = "num_urs")]
    pub total_ultra_rare_count: usize,
    pub pulls: Vec<Vec<ResultCard>>,
}

impl PullResponse {
    /// Tally the pulled cards by rarity and by foil.
    pub fn summary(&self) -> PullSummary {
        let mut by_rarity: BTreeMap<Rarity, usize> =
            Rarity::ALL.iter().map(|r| (*r, 0)).collect();
        let mut by_foil: BTreeMap<Foil, usize> = Foil::ALL.iter().map(|f| (*f, 0)).collect();

        for card in self.pulls.iter().flatten() {
            *by_rarity.entry(card.card_rarity).or_default() += 1;
            *by_foil.entry(card.card_foil).or_default() += 1;
        }

        PullSummary {
            packs: self.pulls.len(),
            cards: self.pulls.iter().map(Vec::len).sum(),
            by_rarity,
            by_foil,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PullSummary {
    pub packs: usize,
    pub cards: usize,
    pub by_rarity: BTreeMap<Rarity, usize>,
    pub by_foil: BTreeMap<Foil, usize>,
}
