/// Raw catalog records and where they come from
pub mod catalog;
/// Card-to-record conversion: stats, slots, actions, abilities and pilots
pub mod convert;
/// The conversion run
pub mod converter;
/// Error definitions
pub mod error;
/// Output records in the xwing-data layout
pub mod model;
/// Grouping pilots into ships
pub mod registry;
/// Merging ships into their persisted files
pub mod store;
/// Keyword substitution for card text
pub mod text;

pub use converter::{ConvertOptions, ConvertSummary, RunContext, convert};
pub use error::{ErrorKind, IResult};
