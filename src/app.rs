use crate::config::Config;
use crate::db::Database;
use crate::sources::{load_working_set, sources_for};
use crate::working_set::WorkingSet;
use serde::Serialize;

/// Everything a request handler needs, shared across the server's worker threads.
pub struct AppState {
    pub config: Config,
    pub db: Database,
    pub working_set: WorkingSet,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReloadSummary {
    pub source: Option<&'static str>,
    pub count: usize,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let db = Database::new(config.db_path.clone());
        Self {
            config,
            db,
            working_set: WorkingSet::default(),
        }
    }

    /// Runs the fallback chain and swaps the result in as the new working set.
    pub fn reload(&self, match_id: Option<&str>) -> ReloadSummary {
        let sources = sources_for(&self.config, &self.db, match_id);
        let report = load_working_set(&sources);
        let summary = ReloadSummary {
            source: report.source,
            count: report.properties.len(),
        };
        self.working_set.replace(report.properties);
        summary
    }
}
