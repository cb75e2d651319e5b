/// Metadata categories and well-known raw values
pub mod keys;
/// Id-keyed lookups over the app metadata
pub mod metadata;
/// Raw card records
pub mod raw;
/// Where the catalog comes from (HTTP or local dumps)
pub mod source;

pub use metadata::{MetadataIndex, RawAppMetadata};
pub use raw::{CardKind, CatalogCard, RawCard};
pub use source::{CatalogSource, FileSource};

#[cfg(feature = "fetch")]
pub use source::{DEFAULT_API_BASE, HttpSource};
