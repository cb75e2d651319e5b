//! Output records in the xwing-data layout.
//!
//! Field order of every struct matches the order of keys in the persisted JSON.

use bon::Builder;
use serde::{Deserialize, Serialize};

/// A ship-level statistic. Serialized with its kind under `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Stat {
    Attack { value: i64, arc: String },
    Agility { value: i64 },
    Hull { value: i64 },
    Shields { value: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Charges {
    pub value: i64,
    pub recovers: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Force {
    pub value: i64,
    pub recovers: u8,
    pub side: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    White,
    Red,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub difficulty: Difficulty,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked: Option<Box<Action>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipAbility {
    pub name: String,
    pub text: String,
}

/// Pilot ability text. Generic pilots carry flavour `text`, named pilots an `ability`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PilotText {
    Text(String),
    Ability(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[serde(rename_all = "camelCase")]
pub struct Pilot {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    pub initiative: i64,
    pub limited: u8,
    pub cost: i64,
    pub image: String,
    /// Serialized as `null` when the card has none.
    #[serde(default)]
    pub artwork: Option<String>,
    pub ffg: i64,
    pub slots: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force: Option<Force>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charges: Option<Charges>,
    #[serde(flatten)]
    pub text: PilotText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ship_ability: Option<ShipAbility>,
}

/// All pilots of one ship in one faction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ship {
    pub name: String,
    pub xws: String,
    pub ffg: i64,
    pub size: String,
    pub faction: String,
    pub stats: Vec<Stat>,
    pub actions: Vec<Action>,
    pub pilots: Vec<Pilot>,
}

impl Ship {
    /// Orders pilots by name, case-sensitively.
    pub fn sort_pilots(&mut self) {
        self.pilots.sort_by(|a, b| a.name.cmp(&b.name));
    }
}
