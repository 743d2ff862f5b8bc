use super::{ListingSource, SourceError};
use crate::db::listings::fetch_cached_matches;
use crate::db::Database;
use serde_json::Value;

/// Precomputed matches for one buyer, looked up by match id.
pub struct CachedMatchesSource {
    db: Database,
    match_id: String,
}

impl CachedMatchesSource {
    pub fn new(db: Database, match_id: impl Into<String>) -> Self {
        Self {
            db,
            match_id: match_id.into(),
        }
    }
}

impl ListingSource for CachedMatchesSource {
    fn name(&self) -> &'static str {
        "cached_matches"
    }

    /// An unknown id yields no rows rather than an error.
    fn fetch(&self) -> Result<Vec<Value>, SourceError> {
        Ok(fetch_cached_matches(&self.db, &self.match_id)?.unwrap_or_default())
    }
}
