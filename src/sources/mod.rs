//! Upstream listing feeds. Each source returns raw records; normalization happens once,
//! after a source has produced something.

mod cached;
mod database;
mod fallback;
mod sheet;
mod snapshot;
mod source_error;

pub use cached::CachedMatchesSource;
pub use database::DatabaseSource;
pub use fallback::{load_working_set, sources_for, LoadReport};
pub use sheet::SheetSource;
pub use snapshot::SnapshotSource;
pub use source_error::SourceError;

use serde_json::Value;

pub trait ListingSource {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    fn fetch(&self) -> Result<Vec<Value>, SourceError>;
}
