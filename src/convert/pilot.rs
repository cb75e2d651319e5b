use crate::catalog::MetadataIndex;
use crate::catalog::raw::RawCard;
use crate::error::{ErrorKind, IResult};
use crate::model::{Pilot, PilotText, Stat};
use crate::text::TextNormalizer;

use super::{parse_slots, parse_stats, split_ability};

/// A pilot together with the ship stat line printed on its card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PilotCard {
    pub pilot: Pilot,
    pub stats: Vec<Stat>,
}

/// Builds the pilot record for a ship card.
pub fn build_pilot(
    card: &RawCard,
    metadata: &MetadataIndex,
    text: &dyn TextNormalizer,
) -> IResult<PilotCard> {
    // Unique names are printed with a leading bullet.
    let name = if card.is_unique {
        card.name.chars().skip(1).collect::<String>()
    } else {
        card.name.clone()
    };
    let caption = (!card.subtitle.is_empty()).then(|| text.replace(&card.subtitle));
    let cost = card
        .cost
        .as_ref()
        .ok_or(ErrorKind::MissingField("cost"))?
        .parse_int()?;
    let slots = parse_slots(&card.available_upgrades, metadata)?;

    let stats = parse_stats(&card.statistics, card.force_side, metadata, text)?;

    let ability = split_ability(&card.ability_text, text);
    let pilot_text = if card.is_unique {
        PilotText::Ability(ability.pilot_ability)
    } else {
        PilotText::Text(ability.pilot_ability)
    };

    let pilot = Pilot::builder()
        .name(text.replace(&name))
        .maybe_caption(caption)
        .initiative(card.initiative.unwrap_or(0))
        .limited(u8::from(card.is_unique))
        .cost(cost)
        .image(card.card_image.clone().unwrap_or_default())
        .maybe_artwork(card.image.clone())
        .ffg(card.id)
        .slots(slots)
        .maybe_force(stats.force)
        .maybe_charges(stats.charges)
        .text(pilot_text)
        .maybe_ship_ability(ability.ship_ability)
        .build();

    Ok(PilotCard {
        pilot,
        stats: stats.stats,
    })
}
