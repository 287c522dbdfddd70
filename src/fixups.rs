//! Declarative corrections applied to upstream catalog data.
//!
//! The catalog occasionally omits cards that are obtainable from a pack, or
//! lists cards that are not. A [`FixupTable`] records those corrections as
//! data so they can be reviewed and changed without touching pool building.
//!
//! Tables deserialize from JSON:
//!
//! ```json
//! {
//!   "packs": {
//!     "Singular Strike Overthrow": [
//!       { "op": "add_if_absent", "card_name": "Aileron", "rarity": "SR" }
//!     ]
//!   },
//!   "global": [
//!     { "op": "remove_if_present", "card_name": "Some Card", "except": ["Pack A"] }
//!   ]
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PullError, Result};
use crate::models::Rarity;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Fixup {
    /// Insert a minimal record unless a card with this name already exists
    /// in any bucket.
    AddIfAbsent { card_name: String, rarity: Rarity },
    /// Delete every record with this name from every bucket.
    RemoveIfPresent { card_name: String },
}

impl Fixup {
    pub fn add_if_absent(card_name: impl Into<String>, rarity: Rarity) -> Self {
        Fixup::AddIfAbsent {
            card_name: card_name.into(),
            rarity,
        }
    }

    pub fn remove_if_present(card_name: impl Into<String>) -> Self {
        Fixup::RemoveIfPresent {
            card_name: card_name.into(),
        }
    }
}

/// A fixup applied to every pack except the named ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalFixup {
    #[serde(flatten)]
    pub fixup: Fixup,
    #[serde(default)]
    pub except: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixupTable {
    #[serde(default)]
    pub packs: BTreeMap<String, Vec<Fixup>>,
    #[serde(default)]
    pub global: Vec<GlobalFixup>,
}

impl FixupTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Corrections known to be needed against the live catalog.
    pub fn builtin() -> Self {
        Self::empty()
            .with_pack_fixup(
                "Singular Strike Overthrow",
                Fixup::add_if_absent("Surgical Striker - H.A.M.P.", Rarity::UltraRare),
            )
            .with_pack_fixup(
                "Singular Strike Overthrow",
                Fixup::add_if_absent("Mathmech Circular", Rarity::UltraRare),
            )
            .with_pack_fixup(
                "Singular Strike Overthrow",
                Fixup::add_if_absent("Sky Striker Mobilize - Linkage!", Rarity::UltraRare),
            )
            .with_pack_fixup(
                "Singular Strike Overthrow",
                Fixup::add_if_absent("Aileron", Rarity::SuperRare),
            )
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| PullError::InvalidArgument(format!("Invalid fixup table: {e}")))
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            PullError::InvalidArgument(format!(
                "Cannot read fixup table {}: {e}",
                path.display()
            ))
        })?;
        Self::from_json(&contents)
    }

    pub fn with_pack_fixup(mut self, pack_name: impl Into<String>, fixup: Fixup) -> Self {
        self.packs.entry(pack_name.into()).or_default().push(fixup);
        self
    }

    pub fn with_global_fixup(mut self, fixup: Fixup, except: &[&str]) -> Self {
        self.global.push(GlobalFixup {
            fixup,
            except: except.iter().map(|s| s.to_string()).collect(),
        });
        self
    }

    /// Fixups that apply to `pack_name`, in application order: global entries
    /// (unless the pack is exempt) followed by the pack's own entries.
    pub fn for_pack(&self, pack_name: &str) -> Vec<&Fixup> {
        let global = self
            .global
            .iter()
            .filter(|g| !g.except.iter().any(|p| p == pack_name))
            .map(|g| &g.fixup);
        let own = self.packs.get(pack_name).into_iter().flatten();
        global.chain(own).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.packs.values().all(Vec::is_empty) && self.global.is_empty()
    }
}
