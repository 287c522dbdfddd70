//! Pack pull simulator.
//!
//! Resolves the requested pack against the catalog, builds its card pool
//! (plus the baseline pool for augmented packs), rolls every slot of every
//! pack and materializes the chosen cards.

use crate::catalog::CatalogClient;
use crate::error::{PullError, Result};
use crate::fixups::FixupTable;
use crate::models::{PackDefinition, PackKind, PullRequest, PullResponse, Rarity, ResultCard};
use crate::odds::{self, RollSource, SLOTS_PER_PACK};
use crate::pool::CardPool;

/// Slots `0..BASELINE_SLOTS` of an augmented pack draw from the baseline pool.
pub const BASELINE_SLOTS: usize = 4;

// ---------------------------------------------------------------------------
// PackPools
// ---------------------------------------------------------------------------

/// The pools one simulation draws from.
#[derive(Debug, Clone)]
pub struct PackPools {
    pub target: CardPool,
    /// Present only when the pack uses baseline fallback.
    pub baseline: Option<CardPool>,
}

impl PackPools {
    pub fn new(target: CardPool) -> Self {
        Self {
            target,
            baseline: None,
        }
    }

    pub fn with_baseline(mut self, baseline: CardPool) -> Self {
        self.baseline = Some(baseline);
        self
    }

    /// Pool that supplies the card for `slot_index`.
    pub fn source_for(&self, slot_index: usize) -> &CardPool {
        match &self.baseline {
            Some(baseline) if slot_index < BASELINE_SLOTS => baseline,
            _ => &self.target,
        }
    }

    /// Open `num_packs` packs. Pack `i` of the result is treated as position
    /// `first_pack_index + i` of the batch for the pity rule (wrapping).
    ///
    /// Returns the packs and the number of Ultra Rare outcomes. Fails on the
    /// first slot whose rolled rarity has no cards in its source pool.
    pub fn open<S: RollSource + ?Sized>(
        &self,
        num_packs: usize,
        first_pack_index: usize,
        rolls: &mut S,
    ) -> Result<(Vec<Vec<ResultCard>>, usize)> {
        let mut packs = Vec::with_capacity(num_packs);
        let mut ultra_rares = 0;

        for i in 0..num_packs {
            let pack_index = first_pack_index.wrapping_add(i);
            let mut pack = Vec::with_capacity(SLOTS_PER_PACK);

            for slot in 0..SLOTS_PER_PACK {
                let outcome = odds::roll_outcome(pack_index, slot, rolls);
                if outcome.rarity == Rarity::UltraRare {
                    ultra_rares += 1;
                }
                let card = self.source_for(slot).pick(outcome.rarity, rolls)?;
                pack.push(ResultCard::from_record(card, outcome));
            }

            packs.push(pack);
        }

        Ok((packs, ultra_rares))
    }
}

// ---------------------------------------------------------------------------
// PullSimulator
// ---------------------------------------------------------------------------

/// Simulates opening packs against a catalog.
///
/// Holds no state between calls: pools are rebuilt from the catalog for every
/// simulation and randomness is supplied by the caller.
pub struct PullSimulator<'a> {
    catalog: &'a dyn CatalogClient,
    fixups: &'a FixupTable,
}

impl<'a> PullSimulator<'a> {
    /// Create a new `PullSimulator` bound to the given catalog and fixups.
    pub fn new(catalog: &'a dyn CatalogClient, fixups: &'a FixupTable) -> Self {
        Self { catalog, fixups }
    }

    /// Return every pack that can be opened.
    pub fn list_packs(&self) -> Result<Vec<PackDefinition>> {
        Ok(self.catalog.list_packs()?)
    }

    /// Find a pack by exact name.
    pub fn resolve_pack(&self, pack_name: &str) -> Result<PackDefinition> {
        find_pack(&self.list_packs()?, pack_name)
    }

    /// Fetch a pack's cards and build its pool.
    pub fn build_pool(&self, pack: &PackDefinition) -> Result<CardPool> {
        let raw = self.catalog.list_cards(&pack.id)?;
        Ok(CardPool::build(raw, &pack.name, self.fixups))
    }

    /// Resolve the pools a simulation of `pack_name` draws from.
    pub fn pools_for(&self, pack_name: &str) -> Result<(PackDefinition, PackPools)> {
        let packs = self.list_packs()?;
        let pack = find_pack(&packs, pack_name)?;
        let mut pools = PackPools::new(self.build_pool(&pack)?);

        if pack.kind.uses_baseline_fallback() {
            let baseline = packs
                .iter()
                .find(|p| p.kind == PackKind::Baseline)
                .ok_or(PullError::BaselinePackNotFound)?;
            pools = pools.with_baseline(self.build_pool(baseline)?);
        }

        Ok((pack, pools))
    }

    /// Simulate `request.num_packs` pack openings, starting a fresh batch.
    pub fn simulate<S: RollSource + ?Sized>(
        &self,
        request: &PullRequest,
        rolls: &mut S,
    ) -> Result<PullResponse> {
        self.simulate_from(request, 0, rolls)
    }

    /// Like [`simulate`](Self::simulate), but the first pack sits at
    /// `first_pack_index` within its ten-pack batch. Use this to continue a
    /// session that has already opened some packs.
    pub fn simulate_from<S: RollSource + ?Sized>(
        &self,
        request: &PullRequest,
        first_pack_index: usize,
        rolls: &mut S,
    ) -> Result<PullResponse> {
        if request.num_packs == 0 {
            return Err(PullError::InvalidArgument(
                "num_packs must be at least 1".into(),
            ));
        }

        let (pack, pools) = self.pools_for(&request.pack_name)?;
        let (pulls, total_ultra_rare_count) =
            pools.open(request.num_packs, first_pack_index, rolls)?;

        tracing::info!(
            pack = %pack.name,
            kind = ?pack.kind,
            packs = request.num_packs,
            ultra_rares = total_ultra_rare_count,
            "simulated pulls"
        );

        Ok(PullResponse {
            pack_name: request.pack_name.clone(),
            total_ultra_rare_count,
            pulls,
        })
    }
}

// ---------------------------------------------------------------------------
// Free-standing helpers
// ---------------------------------------------------------------------------

fn find_pack(packs: &[PackDefinition], pack_name: &str) -> Result<PackDefinition> {
    packs
        .iter()
        .find(|p| p.name == pack_name)
        .cloned()
        .ok_or_else(|| PullError::PackNotFound(pack_name.to_string()))
}
