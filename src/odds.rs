//! Slot probability model.
//!
//! Every pack has eight slots. Slots 0-6 share one rarity table; the last
//! ("anchor") slot uses a more generous table that never yields a Common, and
//! on every tenth pack of a batch it is guaranteed to be Super Rare or better.
//! Foil is an independent second draw.

use rand::Rng;

use crate::models::{Foil, PulledOutcome, Rarity};

pub const SLOTS_PER_PACK: usize = 8;
pub const ANCHOR_SLOT: usize = SLOTS_PER_PACK - 1;
/// Every `PITY_INTERVAL`-th pack (0-indexed position 9, 19, ...) is a pity pack.
pub const PITY_INTERVAL: usize = 10;

pub const ROYAL_BELOW: f64 = 1.0;
pub const GLOSSY_BELOW: f64 = 10.0;

// ---------------------------------------------------------------------------
// RollSource
// ---------------------------------------------------------------------------

/// Source of the uniform draws consumed by a simulation.
///
/// Implemented for every [`rand::Rng`], so a seeded `StdRng` can be passed
/// directly. [`ScriptedRolls`] replays a fixed sequence instead.
pub trait RollSource {
    /// A uniform draw in `[0, 100)`.
    fn roll(&mut self) -> f64;

    /// A uniform index in `[0, len)`. Callers never pass `len == 0`.
    fn pick(&mut self, len: usize) -> usize;
}

impl<R: Rng> RollSource for R {
    fn roll(&mut self) -> f64 {
        self.gen::<f64>() * 100.0
    }

    fn pick(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }
}

/// Replays fixed roll and pick values, cycling when exhausted.
///
/// Useful for forcing specific outcomes: with rolls `[0.0, 50.0]` every
/// rarity draw is `0.0` and every foil draw is `50.0`.
#[derive(Debug, Clone)]
pub struct ScriptedRolls {
    rolls: Vec<f64>,
    picks: Vec<usize>,
    next_roll: usize,
    next_pick: usize,
}

impl ScriptedRolls {
    pub fn new(rolls: impl Into<Vec<f64>>) -> Self {
        Self {
            rolls: rolls.into(),
            picks: Vec::new(),
            next_roll: 0,
            next_pick: 0,
        }
    }

    /// Set the indices returned by [`RollSource::pick`] (reduced modulo the
    /// bucket length). Defaults to always picking the first card.
    pub fn with_picks(mut self, picks: impl Into<Vec<usize>>) -> Self {
        self.picks = picks.into();
        self
    }

    /// Number of rolls consumed so far.
    pub fn rolls_consumed(&self) -> usize {
        self.next_roll
    }
}

impl RollSource for ScriptedRolls {
    fn roll(&mut self) -> f64 {
        if self.rolls.is_empty() {
            return 0.0;
        }
        let value = self.rolls[self.next_roll % self.rolls.len()];
        self.next_roll += 1;
        value
    }

    fn pick(&mut self, len: usize) -> usize {
        let index = if self.picks.is_empty() {
            0
        } else {
            self.picks[self.next_pick % self.picks.len()]
        };
        self.next_pick += 1;
        index % len.max(1)
    }
}

// ---------------------------------------------------------------------------
// Rarity tables
// ---------------------------------------------------------------------------

/// Cumulative thresholds checked in order: the first `(below, rarity)` with
/// `roll < below` wins, otherwise `fallback`.
#[derive(Debug)]
pub struct OddsTable {
    thresholds: &'static [(f64, Rarity)],
    fallback: Rarity,
}

pub static COMMON_SLOT_TABLE: OddsTable = OddsTable {
    thresholds: &[
        (2.5, Rarity::UltraRare),
        (10.0, Rarity::SuperRare),
        (45.0, Rarity::Rare),
    ],
    fallback: Rarity::Common,
};

pub static ANCHOR_SLOT_TABLE: OddsTable = OddsTable {
    thresholds: &[(2.5, Rarity::UltraRare), (10.0, Rarity::SuperRare)],
    fallback: Rarity::Rare,
};

pub static PITY_ANCHOR_TABLE: OddsTable = OddsTable {
    thresholds: &[(20.0, Rarity::UltraRare)],
    fallback: Rarity::SuperRare,
};

impl OddsTable {
    pub fn rarity_for(&self, roll: f64) -> Rarity {
        self.thresholds
            .iter()
            .find(|(below, _)| roll < *below)
            .map(|(_, rarity)| *rarity)
            .unwrap_or(self.fallback)
    }

    /// Probability (in percent) that this table yields `rarity`.
    pub fn chance_of(&self, rarity: Rarity) -> f64 {
        let mut lower = 0.0;
        let mut chance = 0.0;
        for (below, r) in self.thresholds {
            if *r == rarity {
                chance += below - lower;
            }
            lower = *below;
        }
        if self.fallback == rarity {
            chance += 100.0 - lower;
        }
        chance
    }
}

pub fn is_pity_pack(pack_index: usize) -> bool {
    pack_index % PITY_INTERVAL == PITY_INTERVAL - 1
}

/// The rarity table governing a given slot of a given pack.
pub fn table_for(pack_index: usize, slot_index: usize) -> &'static OddsTable {
    if slot_index != ANCHOR_SLOT {
        &COMMON_SLOT_TABLE
    } else if is_pity_pack(pack_index) {
        &PITY_ANCHOR_TABLE
    } else {
        &ANCHOR_SLOT_TABLE
    }
}

pub fn rarity_for_roll(pack_index: usize, slot_index: usize, roll: f64) -> Rarity {
    table_for(pack_index, slot_index).rarity_for(roll)
}

pub fn foil_for_roll(rarity: Rarity, roll: f64) -> Foil {
    if roll < ROYAL_BELOW && rarity.allows_royal() {
        Foil::Royal
    } else if roll < GLOSSY_BELOW {
        Foil::Glossy
    } else {
        Foil::Normal
    }
}

/// Roll the rarity and then the foil for one slot. Consumes exactly two
/// draws from `rolls`.
pub fn roll_outcome<S: RollSource + ?Sized>(
    pack_index: usize,
    slot_index: usize,
    rolls: &mut S,
) -> PulledOutcome {
    let rarity = rarity_for_roll(pack_index, slot_index, rolls.roll());
    let foil = foil_for_roll(rarity, rolls.roll());
    PulledOutcome { rarity, foil }
}
