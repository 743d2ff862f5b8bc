use super::{ListingSource, SourceError};
use crate::db::listings::fetch_property_rows;
use crate::db::Database;
use serde_json::Value;

pub struct DatabaseSource {
    db: Database,
    limit: usize,
}

impl DatabaseSource {
    pub fn new(db: Database, limit: usize) -> Self {
        Self { db, limit }
    }
}

impl ListingSource for DatabaseSource {
    fn name(&self) -> &'static str {
        "database"
    }

    fn fetch(&self) -> Result<Vec<Value>, SourceError> {
        Ok(fetch_property_rows(&self.db, self.limit)?)
    }
}
