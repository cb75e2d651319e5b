//! Groups pilots into ships.
//!
//! The API has no ship records of its own: every pilot card repeats its ship's
//! type, size, faction, stat line and actions. A ship is keyed by its xws id and
//! faction id, and its ship-level fields come from the first pilot card seen for
//! that key. Later cards of the same ship only add their pilot; their ship-level
//! fields are not compared against the stored ones.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::{debug, trace};

use crate::catalog::MetadataIndex;
use crate::catalog::keys::Category;
use crate::catalog::raw::RawCard;
use crate::convert::{PilotCard, parse_actions};
use crate::error::{ErrorKind, IResult};
use crate::model::Ship;
use crate::text::TextNormalizer;

/// Vendor ship names that differ from the names used by xwing-data.
const SHIP_RENAMES: &[(&str, &str)] = &[
    ("Scavenged YT-1300 Light Freighter", "Scavenged YT-1300"),
    ("TIE/in Interceptor", "TIE Interceptor"),
    ("Upsilon-class Shuttle", "Upsilon-class command shuttle"),
];

/// Normalized display name of a ship type.
pub fn ship_name(vendor_name: &str, text: &dyn TextNormalizer) -> String {
    let name = text.replace(vendor_name);
    SHIP_RENAMES
        .iter()
        .find(|(from, _)| *from == name)
        .map(|(_, to)| to.to_string())
        .unwrap_or(name)
}

/// Lowercase alphanumeric identifier, e.g. `"T-65 X-wing"` -> `"t65xwing"`.
pub fn generate_xws(name: &str, text: &dyn TextNormalizer) -> String {
    text.replace(name)
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

#[derive(Debug, Default)]
pub struct ShipRegistry {
    keys: HashMap<String, usize>,
    ships: Vec<Ship>,
}

impl ShipRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `pilot_card` to the ship flown on `card`, creating the ship on first sight.
    pub fn upsert(
        &mut self,
        card: &RawCard,
        pilot_card: PilotCard,
        metadata: &MetadataIndex,
        text: &dyn TextNormalizer,
    ) -> IResult<()> {
        let ship_type = card.ship_type.ok_or(ErrorKind::MissingField("ship_type"))?;
        let faction_id = card.faction_id.ok_or(ErrorKind::MissingField("faction_id"))?;

        let name = ship_name(metadata.name(Category::ShipTypes, ship_type)?, text);
        let xws = generate_xws(&name, text);
        let key = format!("{xws}-{faction_id}");

        let index = match self.keys.entry(key) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => {
                let ship_size = card.ship_size.ok_or(ErrorKind::MissingField("ship_size"))?;
                debug!("Creating ship {name} ({})", entry.key());

                let ship = Ship {
                    size: metadata.name(Category::ShipSize, ship_size)?.to_string(),
                    faction: metadata.name(Category::Factions, faction_id)?.to_string(),
                    stats: pilot_card.stats,
                    actions: parse_actions(&card.available_actions, metadata, text)?,
                    pilots: Vec::new(),
                    name,
                    xws,
                    ffg: ship_type,
                };
                self.ships.push(ship);
                *entry.insert(self.ships.len() - 1)
            }
        };

        let ship = &mut self.ships[index];
        trace!("Adding pilot {} ({})", pilot_card.pilot.name, ship.name);
        ship.pilots.push(pilot_card.pilot);

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.ships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }

    /// Ships in the order their first pilot was seen.
    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn into_ships(self) -> Vec<Ship> {
        self.ships
    }
}
