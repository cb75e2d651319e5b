//! The conversion run: fetch the catalog, group pilots into ships, merge every ship
//! into its file.

use std::path::PathBuf;

use bon::Builder;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::catalog::{CardKind, CatalogCard, CatalogSource, MetadataIndex, RawCard};
use crate::convert::build_pilot;
use crate::error::{ErrorKind, IResult};
use crate::registry::ShipRegistry;
use crate::store::{FsShipStore, ShipStore, upsert_ship};
use crate::text::TextNormalizer;

#[derive(Debug, Clone, Builder)]
pub struct ConvertOptions {
    /// Root of the xwing-data checkout; ship files live under `pilots/`.
    #[builder(into)]
    pub data_root: PathBuf,
    #[builder(default = true)]
    pub pretty_print: bool,
}

impl ConvertOptions {
    pub fn store(&self) -> FsShipStore {
        FsShipStore::new(&self.data_root, self.pretty_print)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertSummary {
    pub pilots: usize,
    pub upgrades_skipped: usize,
    /// Written files, relative to the store root.
    pub ships_written: Vec<PathBuf>,
}

/// State of one conversion run. Nothing outlives the run except the files written
/// by [`RunContext::persist`].
pub struct RunContext<'a> {
    metadata: MetadataIndex,
    text: &'a dyn TextNormalizer,
    registry: ShipRegistry,
    summary: ConvertSummary,
}

impl<'a> RunContext<'a> {
    pub fn new(metadata: MetadataIndex, text: &'a dyn TextNormalizer) -> Self {
        Self {
            metadata,
            text,
            registry: ShipRegistry::new(),
            summary: ConvertSummary::default(),
        }
    }

    /// Dispatches a listed card on its type. Only ship cards are decoded past
    /// `card_type_id`.
    pub fn process_card(&mut self, card: &CatalogCard) -> IResult<()> {
        match CardKind::of(card)? {
            CardKind::Ship => self.process_ship(&RawCard::deserialize(card)?)?,
            CardKind::Upgrade => {
                let name = card.get("name").and_then(Value::as_str).unwrap_or_default();
                debug!("skipping upgrade {name}");
                self.summary.upgrades_skipped += 1;
            }
            CardKind::Unknown(card_type_id) => {
                return Err(ErrorKind::UnknownCardType(card_type_id));
            }
        }

        Ok(())
    }

    pub fn process_ship(&mut self, card: &RawCard) -> IResult<()> {
        let pilot = build_pilot(card, &self.metadata, self.text)?;
        self.registry
            .upsert(card, pilot, &self.metadata, self.text)?;
        self.summary.pilots += 1;

        Ok(())
    }

    /// Processes cards in order, stopping at the first failure.
    pub fn process_cards<'c>(
        &mut self,
        cards: impl IntoIterator<Item = &'c CatalogCard>,
    ) -> IResult<()> {
        cards
            .into_iter()
            .try_for_each(|card| self.process_card(card))
    }

    pub fn registry(&self) -> &ShipRegistry {
        &self.registry
    }

    /// Merges every ship into `store`, one at a time.
    ///
    /// Ships written before a failure stay written.
    pub fn persist(self, store: &dyn ShipStore) -> IResult<ConvertSummary> {
        let mut summary = self.summary;
        for ship in self.registry.into_ships() {
            summary.ships_written.push(upsert_ship(store, ship)?);
        }

        Ok(summary)
    }
}

/// Runs a full conversion from `source` into `store`.
pub fn convert(
    source: &dyn CatalogSource,
    text: &dyn TextNormalizer,
    store: &dyn ShipStore,
) -> IResult<ConvertSummary> {
    let metadata = source.app_metadata()?;
    let cards = source.cards()?;

    let mut context = RunContext::new(MetadataIndex::from_document(metadata)?, text);
    context.process_cards(&cards)?;
    info!(
        "Collected {} ships from {} cards",
        context.registry().len(),
        cards.len()
    );

    let summary = context.persist(store)?;
    info!(
        "Wrote {} ships ({} pilots, {} upgrades skipped)",
        summary.ships_written.len(),
        summary.pilots,
        summary.upgrades_skipped
    );

    Ok(summary)
}

#[cfg(test)]
mod test {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::path::Path;

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::convert::fixtures;
    use crate::store::ShipRecord;
    use crate::text::KeywordTable;

    /// Store backed by a map, seeded with empty ship files.
    #[derive(Default)]
    struct MemoryStore {
        files: RefCell<HashMap<PathBuf, ShipRecord>>,
    }

    impl MemoryStore {
        fn seeded(paths: &[&str]) -> Self {
            let store = MemoryStore::default();
            for path in paths {
                let Value::Object(record) = json!({"pilots": []}) else {
                    unreachable!()
                };
                store.files.borrow_mut().insert(PathBuf::from(path), record);
            }
            store
        }
    }

    impl ShipStore for MemoryStore {
        fn read(&self, path: &Path) -> IResult<ShipRecord> {
            self.files
                .borrow()
                .get(path)
                .cloned()
                .ok_or_else(|| ErrorKind::MissingPersistedShipFile(path.to_path_buf()))
        }

        fn write(&self, path: &Path, record: &ShipRecord) -> IResult<()> {
            self.files
                .borrow_mut()
                .insert(path.to_path_buf(), record.clone());
            Ok(())
        }
    }

    #[test]
    fn unknown_card_type_aborts() {
        let text = KeywordTable::default();
        let mut context = RunContext::new(fixtures::metadata(), &text);
        let cards = [
            fixtures::luke_listing(),
            json!({"card_type_id": 3, "name": "Damage"}),
            fixtures::blue_squadron_listing(),
        ];

        let result = context.process_cards(&cards);

        assert!(matches!(result, Err(ErrorKind::UnknownCardType(3))));
        // The card after the failure was never processed.
        assert_eq!(context.registry().ships()[0].pilots.len(), 1);
    }

    #[test]
    fn upgrades_are_skipped() {
        let text = KeywordTable::default();
        let mut context = RunContext::new(fixtures::metadata(), &text);
        let cards = [
            json!({"id": 51, "card_type_id": 2, "name": "Proton Torpedoes", "available_upgrades": [404]}),
            json!({
                "id": 70,
                "card_type_id": 2,
                "statistics": [{"statistic_id": 5, "value": null}],
                "available_actions": [{"base_action_id": null}]
            }),
        ];

        context.process_cards(&cards).unwrap();

        assert!(context.registry().is_empty());
        let summary = context.persist(&MemoryStore::default()).unwrap();
        assert_eq!(summary.upgrades_skipped, 2);
        assert!(summary.ships_written.is_empty());
    }

    #[test]
    fn persists_every_ship() {
        let text = KeywordTable::builtin().unwrap();
        let mut context = RunContext::new(fixtures::metadata(), &text);
        let mut tie = fixtures::blue_squadron_listing();
        tie["name"] = json!("Academy Pilot");
        tie["ship_type"] = json!(13);
        tie["faction_id"] = json!(2);

        context
            .process_cards(&[
                fixtures::blue_squadron_listing(),
                tie,
                fixtures::luke_listing(),
            ])
            .unwrap();

        let store = MemoryStore::seeded(&[
            "pilots/rebel-alliance/t-65-x-wing.json",
            "pilots/galactic-empire/tie-ln-fighter.json",
        ]);
        let summary = context.persist(&store).unwrap();

        assert_eq!(summary.pilots, 3);
        assert_eq!(
            summary.ships_written,
            [
                PathBuf::from("pilots/rebel-alliance/t-65-x-wing.json"),
                PathBuf::from("pilots/galactic-empire/tie-ln-fighter.json"),
            ]
        );
        let files = store.files.borrow();
        let xwing = &files[Path::new("pilots/rebel-alliance/t-65-x-wing.json")];
        let names: Vec<_> = xwing["pilots"]
            .as_array()
            .unwrap()
            .iter()
            .map(|pilot| pilot["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, ["Blue Squadron Escort", "Luke Skywalker"]);
    }

    #[test]
    fn missing_ship_file_stops_the_run() {
        let text = KeywordTable::default();
        let mut context = RunContext::new(fixtures::metadata(), &text);
        context.process_ship(&fixtures::luke()).unwrap();

        let result = context.persist(&MemoryStore::default());

        assert!(matches!(result, Err(ErrorKind::MissingPersistedShipFile(_))));
    }
}
