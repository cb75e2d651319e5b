use std::path::PathBuf;

use thiserror::Error;

use crate::catalog::keys::Category;

#[derive(Error, Debug)]
pub enum ErrorKind {
    #[error("Could not find {category} entry with id {id}")]
    MissingMetadata { category: Category, id: i64 },
    #[error("Unknown card type: {0}")]
    UnknownCardType(i64),
    #[error("Unknown statistic \"{0}\"")]
    UnknownStatistic(String),
    #[error("Persisted ship file does not exist: {}", .0.display())]
    MissingPersistedShipFile(PathBuf),
    #[error("Persisted ship file {} is malformed: {reason}", .path.display())]
    MalformedPersistedRecord { path: PathBuf, reason: String },
    #[error("Card is missing required field `{0}`")]
    MissingField(&'static str),
    #[error("Could not parse an integer from {0:?}")]
    InvalidInteger(String),
    #[error("Invalid keyword pattern: {err}")]
    InvalidKeywordPattern {
        #[from]
        err: regex::Error,
    },
    #[error("Error serializing or deserializing json: {err}")]
    SerdeJson {
        #[from]
        err: serde_json::Error,
    },
    #[error("IO error")]
    IoError(#[from] std::io::Error),
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {err}")]
    Http {
        #[from]
        err: reqwest::Error,
    },
}

pub type IResult<T> = Result<T, ErrorKind>;
