//! Turns raw cards into [`crate::model`] records by resolving their metadata ids.

mod ability;
mod actions;
mod pilot;
mod slots;
mod stats;

pub use ability::{SplitAbility, split_ability};
pub use actions::{parse_action, parse_actions};
pub use pilot::{PilotCard, build_pilot};
pub use slots::parse_slots;
pub use stats::{ParsedStats, parse_stats};

#[cfg(test)]
pub(crate) mod fixtures {
    use serde_json::json;

    use crate::catalog::MetadataIndex;
    use crate::catalog::raw::{CatalogCard, RawCard};

    pub const HULL_ID: i64 = 3;

    /// A small slice of the real app metadata.
    pub fn metadata() -> MetadataIndex {
        let document = json!({
            "upgrade_types": [
                {"id": 2, "name": "Astromech"},
                {"id": 10, "name": "Torpedo"},
                {"id": 1, "name": "Talent"},
                {"id": 17, "name": "Force Power"}
            ],
            "force_affiliation": [
                {"id": 1, "name": "Light"},
                {"id": 2, "name": "Dark"}
            ],
            "card_stats": [
                {"id": 1, "name": "Front Arc", "groups": ["attack"]},
                {"id": 2, "name": "Agility", "groups": []},
                {"id": HULL_ID, "name": "Hull", "groups": []},
                {"id": 4, "name": "Shields", "groups": []},
                {"id": 5, "name": "Charge", "groups": []},
                {"id": 6, "name": "Force", "groups": []},
                {"id": 7, "name": "Single Turret Arc", "groups": ["attack", "turret"]},
                {"id": 8, "name": "Energy", "groups": []}
            ],
            "card_action_types": [
                {"id": 1, "name": "Focus"},
                {"id": 2, "name": "Target Lock"},
                {"id": 3, "name": "Barrel Roll"},
                {"id": 4, "name": "Boost"}
            ],
            "ship_types": [
                {"id": 12, "name": "T-65 X-wing"},
                {"id": 44, "name": "Scavenged YT-1300 Light Freighter"},
                {"id": 13, "name": "TIE/ln Fighter"}
            ],
            "ship_size": [
                {"id": 1, "name": "Small"},
                {"id": 3, "name": "Large"}
            ],
            "factions": [
                {"id": 1, "name": "Rebel Alliance"},
                {"id": 2, "name": "Galactic Empire"},
                {"id": 4, "name": "Resistance"}
            ]
        });
        let serde_json::Value::Object(document) = document else {
            unreachable!()
        };
        MetadataIndex::from_document(document).unwrap()
    }

    pub fn luke() -> RawCard {
        serde_json::from_value(luke_listing()).unwrap()
    }

    pub fn blue_squadron() -> RawCard {
        serde_json::from_value(blue_squadron_listing()).unwrap()
    }

    /// Listed card for Luke Skywalker in a T-65 X-wing.
    pub fn luke_listing() -> CatalogCard {
        json!({
            "id": 4,
            "card_type_id": 1,
            "name": "\u{2022}Luke Skywalker",
            "is_unique": true,
            "initiative": 5,
            "cost": "54",
            "ability_text": "Fly casual<shipability>X-wing: Astromech bonus",
            "subtitle": "",
            "card_image": "https://cdn.example/luke.png",
            "image": "https://cdn.example/luke-art.jpg",
            "available_upgrades": [999, 10],
            "available_actions": [{"base_action_id": 1, "base_action_side_effect": null}],
            "ship_type": 12,
            "ship_size": 1,
            "faction_id": 1,
            "force_side": null,
            "statistics": [{"statistic_id": HULL_ID, "value": "3", "recurring": false}]
        })
    }

    /// A generic X-wing pilot with a different stat line than [`luke_listing`].
    pub fn blue_squadron_listing() -> CatalogCard {
        json!({
            "id": 9,
            "card_type_id": 1,
            "name": "Blue Squadron Escort",
            "is_unique": false,
            "initiative": 2,
            "cost": 41,
            "ability_text": "Designed by Incom.",
            "subtitle": "",
            "card_image": null,
            "image": "https://cdn.example/blue-art.jpg",
            "available_upgrades": [10, 2],
            "available_actions": [{"base_action_id": 3, "base_action_side_effect": "stress"}],
            "ship_type": 12,
            "ship_size": 1,
            "faction_id": 1,
            "statistics": [
                {"statistic_id": 1, "value": "3", "recurring": false},
                {"statistic_id": HULL_ID, "value": "4", "recurring": false}
            ]
        })
    }
}
