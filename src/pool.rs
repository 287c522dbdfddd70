//! Rarity-bucketed card pools built from raw catalog card lists.

use std::collections::{BTreeMap, HashMap};

use crate::error::{PullError, Result};
use crate::fixups::{Fixup, FixupTable};
use crate::models::{CardRecord, Rarity};
use crate::odds::RollSource;

/// Cards eligible for selection from one pack, grouped by rarity.
///
/// No bucket holds two records with the same name. Buckets may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardPool {
    buckets: BTreeMap<Rarity, Vec<CardRecord>>,
}

impl CardPool {
    /// Deduplicate `raw` by name (first seen wins), bucket by rarity, then
    /// apply the fixups declared for `pack_name`.
    pub fn build<I>(raw: I, pack_name: &str, fixups: &FixupTable) -> Self
    where
        I: IntoIterator<Item = CardRecord>,
    {
        let mut pool = CardPool::default();
        let mut seen: HashMap<String, Rarity> = HashMap::new();
        let mut duplicates = 0usize;

        for card in raw {
            if let Some(first) = seen.get(&card.name) {
                if *first != card.rarity {
                    tracing::warn!(
                        pack = pack_name,
                        card = %card.name,
                        kept = %first,
                        dropped = %card.rarity,
                        "catalog lists a card under two rarities; keeping the first"
                    );
                }
                duplicates += 1;
                continue;
            }
            seen.insert(card.name.clone(), card.rarity);
            pool.buckets.entry(card.rarity).or_default().push(card);
        }

        let mut applied = 0usize;
        for fixup in fixups.for_pack(pack_name) {
            if pool.apply(fixup) {
                applied += 1;
            }
        }

        tracing::debug!(
            pack = pack_name,
            cards = pool.len(),
            duplicates,
            fixups_applied = applied,
            "built card pool"
        );
        pool
    }

    /// Apply one fixup, returning whether the pool changed.
    fn apply(&mut self, fixup: &Fixup) -> bool {
        match fixup {
            Fixup::AddIfAbsent { card_name, rarity } => {
                if self.contains(card_name) {
                    return false;
                }
                self.buckets
                    .entry(*rarity)
                    .or_default()
                    .push(CardRecord::new(card_name.clone(), *rarity));
                true
            }
            Fixup::RemoveIfPresent { card_name } => {
                let before = self.len();
                for bucket in self.buckets.values_mut() {
                    bucket.retain(|c| &c.name != card_name);
                }
                self.len() != before
            }
        }
    }

    pub fn bucket(&self, rarity: Rarity) -> &[CardRecord] {
        self.buckets.get(&rarity).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.buckets.values().flatten().any(|c| c.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&CardRecord> {
        self.buckets.values().flatten().find(|c| c.name == name)
    }

    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Choose a card of `rarity` uniformly at random.
    ///
    /// Fails with [`PullError::PoolExhausted`] when the bucket is empty.
    pub fn pick<S: RollSource + ?Sized>(&self, rarity: Rarity, rolls: &mut S) -> Result<&CardRecord> {
        let bucket = self.bucket(rarity);
        if bucket.is_empty() {
            return Err(PullError::PoolExhausted(rarity));
        }
        let index = rolls.pick(bucket.len()) % bucket.len();
        Ok(&bucket[index])
    }
}

/// Free-function form of [`CardPool::build`].
pub fn build_pool<I>(raw: I, pack_name: &str, fixups: &FixupTable) -> CardPool
where
    I: IntoIterator<Item = CardRecord>,
{
    CardPool::build(raw, pack_name, fixups)
}
