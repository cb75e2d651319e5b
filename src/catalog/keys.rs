//! Constants for the app-metadata document and raw card fields.

// Metadata categories
pub const UPGRADE_TYPES: &str = "upgrade_types";
pub const FORCE_AFFILIATION: &str = "force_affiliation";
pub const CARD_STATS: &str = "card_stats";
pub const CARD_ACTION_TYPES: &str = "card_action_types";
pub const SHIP_TYPES: &str = "ship_types";
pub const SHIP_SIZE: &str = "ship_size";
pub const FACTIONS: &str = "factions";

/// Upgrade type id the API uses for the "Special" pseudo-slot.
pub const SPECIAL_SLOT_ID: i64 = 999;

/// Statistic group tag marking a primary weapon.
pub const ATTACK_GROUP: &str = "attack";

/// Side effect that turns an action red.
pub const STRESS_SIDE_EFFECT: &str = "stress";

/// Delimiter between pilot and ship ability inside `ability_text`.
pub const SHIP_ABILITY_MARKER: &str = "<shipability>";

/// Typed representation of the metadata categories the converter reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    UpgradeTypes,
    ForceAffiliation,
    CardStats,
    CardActionTypes,
    ShipTypes,
    ShipSize,
    Factions,
}

impl Category {
    /// All known categories.
    pub const ALL: &[Category] = &[
        Self::UpgradeTypes,
        Self::ForceAffiliation,
        Self::CardStats,
        Self::CardActionTypes,
        Self::ShipTypes,
        Self::ShipSize,
        Self::Factions,
    ];

    /// The raw key used in the app-metadata document.
    pub fn key(&self) -> &'static str {
        match self {
            Self::UpgradeTypes => UPGRADE_TYPES,
            Self::ForceAffiliation => FORCE_AFFILIATION,
            Self::CardStats => CARD_STATS,
            Self::CardActionTypes => CARD_ACTION_TYPES,
            Self::ShipTypes => SHIP_TYPES,
            Self::ShipSize => SHIP_SIZE,
            Self::Factions => FACTIONS,
        }
    }

    pub fn from_key(key: &str) -> Option<Category> {
        Self::ALL.iter().copied().find(|category| category.key() == key)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UpgradeTypes => write!(f, "upgrade type"),
            Self::ForceAffiliation => write!(f, "force affiliation"),
            Self::CardStats => write!(f, "card stat"),
            Self::CardActionTypes => write!(f, "action"),
            Self::ShipTypes => write!(f, "ship type"),
            Self::ShipSize => write!(f, "ship size"),
            Self::Factions => write!(f, "faction"),
        }
    }
}

