use std::collections::HashMap;

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{ErrorKind, IResult};

use super::keys::{Category, ATTACK_GROUP};

/// The `/app-metadata/` response: category key to a list of records.
pub type RawAppMetadata = serde_json::Map<String, serde_json::Value>;

/// A metadata record that only matters to us by its display name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NamedRecord {
    pub id: i64,
    #[serde(default)]
    pub name: String,
}

/// A `card_stats` record. `groups` tags the statistic, e.g. `"attack"` for weapons.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatRecord {
    #[serde(flatten)]
    pub record: NamedRecord,
    #[serde(default)]
    pub groups: Vec<String>,
}

impl StatRecord {
    pub fn name(&self) -> &str {
        &self.record.name
    }

    pub fn is_attack(&self) -> bool {
        self.groups.iter().any(|group| group == ATTACK_GROUP)
    }
}

/// Id-keyed lookup tables over the app metadata, built once per run.
#[derive(Debug, Default)]
pub struct MetadataIndex {
    named: HashMap<Category, HashMap<i64, NamedRecord>>,
    card_stats: HashMap<i64, StatRecord>,
}

impl MetadataIndex {
    pub fn from_document(document: RawAppMetadata) -> IResult<MetadataIndex> {
        let mut index = MetadataIndex::default();

        for (key, records) in document {
            let Some(category) = Category::from_key(&key) else {
                debug!("skipping unused metadata section {key}");
                continue;
            };
            info!("Parsing {key}");

            match category {
                Category::CardStats => {
                    let records: Vec<StatRecord> = serde_json::from_value(records)?;
                    index.card_stats = records
                        .into_iter()
                        .map(|record| (record.record.id, record))
                        .collect();
                }
                _ => {
                    let records: Vec<NamedRecord> = serde_json::from_value(records)?;
                    index.named.insert(
                        category,
                        records
                            .into_iter()
                            .map(|record| (record.id, record))
                            .collect(),
                    );
                }
            }
        }

        Ok(index)
    }

    pub fn get(&self, category: Category, id: i64) -> IResult<&NamedRecord> {
        let found = match category {
            Category::CardStats => self.card_stats.get(&id).map(|stat| &stat.record),
            _ => self
                .named
                .get(&category)
                .and_then(|records| records.get(&id)),
        };

        found.ok_or(ErrorKind::MissingMetadata { category, id })
    }

    /// Display name of the record `id` in `category`.
    pub fn name(&self, category: Category, id: i64) -> IResult<&str> {
        self.get(category, id).map(|record| record.name.as_str())
    }

    pub fn statistic(&self, id: i64) -> IResult<&StatRecord> {
        self.card_stats.get(&id).ok_or(ErrorKind::MissingMetadata {
            category: Category::CardStats,
            id,
        })
    }
}
