use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// PackKind
// ---------------------------------------------------------------------------

/// Selection rule that applies to a pack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackKind {
    /// The shared, always-available pool ("Master Pack").
    Baseline,
    /// A themed pack whose first slots also draw from the baseline pool
    /// ("Secret Pack").
    Augmented,
    /// A self-contained pack that only draws from its own cards
    /// ("Selection Pack").
    Curated,
}

impl PackKind {
    /// Map a Master Duel Meta set `type` onto a pack kind. Set types that
    /// cannot be opened (structure decks, bundles, ...) map to `None`.
    pub fn from_catalog_type(set_type: &str) -> Option<PackKind> {
        match set_type {
            "Normal Pack" => Some(PackKind::Baseline),
            "Secret Pack" => Some(PackKind::Augmented),
            "Selection Pack" => Some(PackKind::Curated),
            _ => None,
        }
    }

    pub fn uses_baseline_fallback(&self) -> bool {
        matches!(self, PackKind::Augmented)
    }
}

// ---------------------------------------------------------------------------
// PackDefinition
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackDefinition {
    pub id: String,
    pub kind: PackKind,
    pub name: String,
}

impl PackDefinition {
    pub fn new(id: impl Into<String>, kind: PackKind, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            name: name.into(),
        }
    }
}
