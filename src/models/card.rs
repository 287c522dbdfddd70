use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Rarity
// ---------------------------------------------------------------------------

/// Card rarity tier. Ordering is for reporting only.
///
/// The wire encoding (`"N"`, `"R"`, `"SR"`, `"UR"`) matches the codes used by
/// the Master Duel Meta catalog and is the only encoding this crate emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rarity {
    #[serde(rename = "N")]
    Common,
    #[serde(rename = "R")]
    Rare,
    #[serde(rename = "SR")]
    SuperRare,
    #[serde(rename = "UR")]
    UltraRare,
}

impl Rarity {
    pub const ALL: [Rarity; 4] = [
        Rarity::Common,
        Rarity::Rare,
        Rarity::SuperRare,
        Rarity::UltraRare,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Rarity::Common => "N",
            Rarity::Rare => "R",
            Rarity::SuperRare => "SR",
            Rarity::UltraRare => "UR",
        }
    }

    /// Parse a catalog rarity code. Returns `None` for anything unrecognised.
    pub fn from_code(code: &str) -> Option<Rarity> {
        match code.trim() {
            "N" => Some(Rarity::Common),
            "R" => Some(Rarity::Rare),
            "SR" => Some(Rarity::SuperRare),
            "UR" => Some(Rarity::UltraRare),
            _ => None,
        }
    }

    /// Whether a card of this rarity can receive the Royal finish.
    pub fn allows_royal(&self) -> bool {
        matches!(self, Rarity::SuperRare | Rarity::UltraRare)
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ---------------------------------------------------------------------------
// Foil
// ---------------------------------------------------------------------------

/// Foil finish applied to a pulled card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Foil {
    /// No foil treatment.
    Normal,
    Glossy,
    Royal,
}

impl Foil {
    pub const ALL: [Foil; 3] = [Foil::Normal, Foil::Glossy, Foil::Royal];

    pub fn code(&self) -> &'static str {
        match self {
            Foil::Normal => "normal",
            Foil::Glossy => "glossy",
            Foil::Royal => "royal",
        }
    }
}

impl fmt::Display for Foil {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ---------------------------------------------------------------------------
// CardRecord
// ---------------------------------------------------------------------------

/// A concrete card eligible for selection from a pack.
///
/// `name` is the identity key inside a pool: the catalog lists a card once
/// per print variant, so two rows with the same name are the same card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    pub rarity: Rarity,
}

impl CardRecord {
    /// A minimal record with no id or image, as produced by fixups.
    pub fn new(name: impl Into<String>, rarity: Rarity) -> Self {
        Self {
            id: None,
            name: name.into(),
            image: None,
            rarity,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}
