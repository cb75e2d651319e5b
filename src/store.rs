//! Persisting ships into an existing xwing-data checkout.
//!
//! Ship files are never created from scratch: each ship is merged into the file
//! already on disk so that hand-maintained fields (dials, xws ids of pilots, ...)
//! survive a conversion run.

use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind as IoErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::ser::Error as _;
use serde_json::{Map, Value};
use tracing::info;

use crate::error::{ErrorKind, IResult};
use crate::model::Ship;

/// A persisted JSON object with its key order preserved.
pub type ShipRecord = Map<String, Value>;

const PILOTS_KEY: &str = "pilots";
const PILOT_NAME_KEY: &str = "name";

/// Lowercases and replaces spaces and slashes with dashes.
pub fn str_to_filename(s: &str) -> String {
    s.to_lowercase().replace([' ', '/'], "-")
}

/// Path of a ship's file relative to the data root.
pub fn ship_path(ship: &Ship) -> PathBuf {
    PathBuf::from(PILOTS_KEY)
        .join(str_to_filename(&ship.faction))
        .join(format!("{}.json", str_to_filename(&ship.name)))
}

pub trait ShipStore {
    /// Reads the record at `path`. A missing record is an error.
    fn read(&self, path: &Path) -> IResult<ShipRecord>;
    fn write(&self, path: &Path, record: &ShipRecord) -> IResult<()>;
}

/// Ship files under a data directory.
pub struct FsShipStore {
    root: PathBuf,
    pretty_print: bool,
}

impl FsShipStore {
    pub fn new(root: impl Into<PathBuf>, pretty_print: bool) -> Self {
        Self {
            root: root.into(),
            pretty_print,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ShipStore for FsShipStore {
    fn read(&self, path: &Path) -> IResult<ShipRecord> {
        let full_path = self.root.join(path);
        let file = match File::open(&full_path) {
            Ok(file) => file,
            Err(err) if err.kind() == IoErrorKind::NotFound => {
                return Err(ErrorKind::MissingPersistedShipFile(full_path));
            }
            Err(err) => return Err(err.into()),
        };

        match serde_json::from_reader(BufReader::new(file))? {
            Value::Object(record) => Ok(record),
            _ => Err(ErrorKind::MalformedPersistedRecord {
                path: full_path,
                reason: "top level is not an object".to_string(),
            }),
        }
    }

    fn write(&self, path: &Path, record: &ShipRecord) -> IResult<()> {
        let full_path = self.root.join(path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut writer = BufWriter::new(File::create(&full_path)?);
        if self.pretty_print {
            serde_json::to_writer_pretty(&mut writer, record)?;
        } else {
            serde_json::to_writer(&mut writer, record)?;
        }
        writer.write_all(b"\n")?;
        writer.flush()?;

        Ok(())
    }
}

fn malformed(path: &Path, reason: &str) -> ErrorKind {
    ErrorKind::MalformedPersistedRecord {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

/// Pilots are matched by the JSON rendering of their name, so a missing name and a
/// `null` name stay distinct from each other and from every string name.
fn pilot_key(pilot: &ShipRecord) -> String {
    pilot
        .get(PILOT_NAME_KEY)
        .map(Value::to_string)
        .unwrap_or_default()
}

/// Merges `ship` into `persisted`.
///
/// Top-level fields of the ship replace the persisted ones; fields only present on
/// disk are kept where they are. Pilots are matched by name and merged field by
/// field: persisted pilots keep their position, new pilots are appended in the
/// order they appear on `ship`.
pub fn merge_ship(ship: &Ship, mut persisted: ShipRecord, path: &Path) -> IResult<ShipRecord> {
    let Value::Object(mut fresh) = serde_json::to_value(ship)? else {
        return Err(serde_json::Error::custom("ship did not serialize to an object").into());
    };
    let fresh_pilots = match fresh.remove(PILOTS_KEY) {
        Some(Value::Array(pilots)) => pilots,
        _ => Vec::new(),
    };

    let persisted_pilots = match persisted.get_mut(PILOTS_KEY) {
        None => Vec::new(),
        Some(Value::Array(pilots)) => std::mem::take(pilots),
        Some(_) => return Err(malformed(path, "`pilots` is not an array")),
    };

    for (key, value) in fresh {
        persisted.insert(key, value);
    }

    let mut pilots_by_name = ShipRecord::new();
    for pilot in persisted_pilots.into_iter().chain(fresh_pilots) {
        let Value::Object(pilot) = pilot else {
            return Err(malformed(path, "pilot entry is not an object"));
        };

        let merged = pilots_by_name
            .entry(pilot_key(&pilot))
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(merged) = merged {
            merged.extend(pilot);
        }
    }

    persisted.insert(
        PILOTS_KEY.to_string(),
        Value::Array(pilots_by_name.into_iter().map(|(_, pilot)| pilot).collect()),
    );

    Ok(persisted)
}

/// Sorts the ship's pilots, merges it into its persisted file and writes it back.
pub fn upsert_ship(store: &dyn ShipStore, mut ship: Ship) -> IResult<PathBuf> {
    let path = ship_path(&ship);
    info!("Writing {} ({})", ship.name, ship.faction);

    ship.sort_pilots();
    let persisted = store.read(&path)?;
    let merged = merge_ship(&ship, persisted, &path)?;
    store.write(&path, &merged)?;

    Ok(path)
}
