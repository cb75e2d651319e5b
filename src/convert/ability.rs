use itertools::Itertools;

use crate::catalog::keys::SHIP_ABILITY_MARKER;
use crate::model::ShipAbility;
use crate::text::TextNormalizer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitAbility {
    pub pilot_ability: String,
    pub ship_ability: Option<ShipAbility>,
}

/// Separates the pilot ability from a trailing `<shipability>Name: text` section.
pub fn split_ability(ability_text: &str, text: &dyn TextNormalizer) -> SplitAbility {
    let (pilot_ability, ship_ability) = match ability_text.split_once(SHIP_ABILITY_MARKER) {
        Some((pilot, ship)) => (pilot, Some(ship)),
        None => (ability_text, None),
    };

    SplitAbility {
        pilot_ability: text.replace(pilot_ability),
        ship_ability: ship_ability
            .filter(|raw| !raw.is_empty())
            .map(|raw| parse_ship_ability(raw, text)),
    }
}

fn parse_ship_ability(raw: &str, text: &dyn TextNormalizer) -> ShipAbility {
    let normalized = text.replace(raw);
    let mut parts = normalized.split(':');
    let name = parts.next().unwrap_or_default().to_string();

    ShipAbility {
        name,
        text: parts.join(": ").trim().to_string(),
    }
}
