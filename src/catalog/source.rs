use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::IResult;

use super::metadata::RawAppMetadata;
use super::raw::{CardsDocument, CatalogCard};

/// Where the converter gets the catalog from.
pub trait CatalogSource {
    fn app_metadata(&self) -> IResult<RawAppMetadata>;
    /// Every listed card, undecoded past its JSON shape.
    fn cards(&self) -> IResult<Vec<CatalogCard>>;
}

/// Reads previously downloaded `/app-metadata/` and `/cards/` responses from disk.
pub struct FileSource {
    metadata_path: PathBuf,
    cards_path: PathBuf,
}

impl FileSource {
    pub fn new(metadata_path: impl Into<PathBuf>, cards_path: impl Into<PathBuf>) -> Self {
        Self {
            metadata_path: metadata_path.into(),
            cards_path: cards_path.into(),
        }
    }

    fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> IResult<T> {
        info!("Reading {}", path.display());
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}

impl CatalogSource for FileSource {
    fn app_metadata(&self) -> IResult<RawAppMetadata> {
        Self::read_json(&self.metadata_path)
    }

    fn cards(&self) -> IResult<Vec<CatalogCard>> {
        Self::read_json::<CardsDocument>(&self.cards_path).map(|document| document.cards)
    }
}

#[cfg(feature = "fetch")]
pub use http::HttpSource;

#[cfg(feature = "fetch")]
mod http {
    use reqwest::blocking::Client;
    use tracing::info;

    use crate::catalog::metadata::RawAppMetadata;
    use crate::catalog::raw::{CardsDocument, CatalogCard};
    use crate::error::IResult;

    use super::CatalogSource;

    pub const DEFAULT_API_BASE: &str = "https://squadbuilder.fantasyflightgames.com/api";

    /// Fetches the catalog from the squad builder API.
    pub struct HttpSource {
        client: Client,
        base: String,
    }

    impl HttpSource {
        pub fn new(base: impl Into<String>) -> Self {
            Self {
                client: Client::new(),
                base: base.into().trim_end_matches('/').to_string(),
            }
        }

        fn get<T: serde::de::DeserializeOwned>(&self, endpoint: &str) -> IResult<T> {
            let url = format!("{}{endpoint}", self.base);
            info!("Fetching {endpoint}");
            Ok(self.client.get(url).send()?.error_for_status()?.json()?)
        }
    }

    impl Default for HttpSource {
        fn default() -> Self {
            Self::new(DEFAULT_API_BASE)
        }
    }

    impl CatalogSource for HttpSource {
        fn app_metadata(&self) -> IResult<RawAppMetadata> {
            self.get("/app-metadata/")
        }

        fn cards(&self) -> IResult<Vec<CatalogCard>> {
            self.get::<CardsDocument>("/cards/")
                .map(|document| document.cards)
        }
    }
}

#[cfg(feature = "fetch")]
pub use http::DEFAULT_API_BASE;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn reads_both_documents_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let metadata_path = dir.path().join("app-metadata.json");
        let cards_path = dir.path().join("cards.json");
        std::fs::write(&metadata_path, r#"{"factions": [{"id": 1, "name": "Rebel Alliance"}]}"#)
            .unwrap();
        std::fs::write(
            &cards_path,
            r#"{"cards": [{"id": 7, "card_type_id": 2, "name": "Proton Torpedoes"}]}"#,
        )
        .unwrap();

        let source = FileSource::new(&metadata_path, &cards_path);
        let metadata = source.app_metadata().unwrap();
        let cards = source.cards().unwrap();

        assert!(metadata.contains_key("factions"));
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0]["name"], "Proton Torpedoes");
    }

    #[test]
    fn missing_dump_is_an_io_error() {
        let source = FileSource::new("does/not/exist.json", "nor/this.json");
        assert!(matches!(
            source.app_metadata(),
            Err(crate::error::ErrorKind::IoError(_))
        ));
    }
}
