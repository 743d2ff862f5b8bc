use super::{CachedMatchesSource, DatabaseSource, ListingSource, SheetSource, SnapshotSource};
use crate::config::Config;
use crate::db::Database;
use crate::domain::normalize::normalize_all;
use crate::domain::property::Property;

#[derive(Debug, Default)]
pub struct LoadReport {
    pub properties: Vec<Property>,
    /// Name of the source that supplied the listings, `None` when all came back empty.
    pub source: Option<&'static str>,
}

/// The fallback chain for one load: cached matches (when a match id is given), then the
/// database, the sheet when one is configured, and finally the snapshot file.
pub fn sources_for(config: &Config, db: &Database, match_id: Option<&str>) -> Vec<Box<dyn ListingSource>> {
    let mut sources: Vec<Box<dyn ListingSource>> = Vec::new();

    if let Some(id) = match_id.map(str::trim).filter(|id| !id.is_empty()) {
        sources.push(Box::new(CachedMatchesSource::new(db.clone(), id)));
    }
    sources.push(Box::new(DatabaseSource::new(db.clone(), config.fetch_limit)));

    if let Some(url) = &config.sheet_csv_url {
        match SheetSource::new(url.as_str(), config.http_timeout) {
            Ok(sheet) => sources.push(Box::new(sheet)),
            Err(e) => tracing::warn!(error = %e, "sheet source unavailable"),
        }
    }
    sources.push(Box::new(SnapshotSource::new(config.snapshot_path.clone())));

    sources
}

/// Tries each source in order and keeps the first non-empty result. A failing source is
/// logged and treated as empty.
pub fn load_working_set(sources: &[Box<dyn ListingSource>]) -> LoadReport {
    for source in sources {
        match source.fetch() {
            Ok(rows) if !rows.is_empty() => {
                tracing::info!(source = source.name(), rows = rows.len(), "listings loaded");
                return LoadReport {
                    properties: normalize_all(&rows),
                    source: Some(source.name()),
                };
            }
            Ok(_) => tracing::debug!(source = source.name(), "source returned no listings"),
            Err(e) => tracing::warn!(source = source.name(), error = %e, "source failed"),
        }
    }

    tracing::warn!("every listing source came back empty");
    LoadReport::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::SourceError;
    use serde_json::{json, Value};

    struct Fixed {
        name: &'static str,
        rows: Result<Vec<Value>, &'static str>,
    }

    impl Fixed {
        fn boxed(name: &'static str, rows: Result<Vec<Value>, &'static str>) -> Box<dyn ListingSource> {
            Box::new(Fixed { name, rows })
        }
    }

    impl ListingSource for Fixed {
        fn name(&self) -> &'static str {
            self.name
        }

        fn fetch(&self) -> Result<Vec<Value>, SourceError> {
            self.rows
                .clone()
                .map_err(|msg| SourceError::UnexpectedShape(msg.to_string()))
        }
    }

    #[test]
    fn first_non_empty_source_wins() {
        let sources = vec![
            Fixed::boxed("down", Err("timeout")),
            Fixed::boxed("empty", Ok(vec![])),
            Fixed::boxed("sheet", Ok(vec![json!({"id": "a", "priceINR": "₹45,00,000"})])),
            Fixed::boxed("snapshot", Ok(vec![json!({"id": "b"})])),
        ];

        let report = load_working_set(&sources);
        assert_eq!(report.source, Some("sheet"));
        assert_eq!(report.properties.len(), 1);
        assert_eq!(report.properties[0].price_inr, Some(4_500_000.0));
    }

    #[test]
    fn all_empty_yields_empty_working_set() {
        let sources = vec![Fixed::boxed("down", Err("boom")), Fixed::boxed("empty", Ok(vec![]))];
        let report = load_working_set(&sources);
        assert!(report.properties.is_empty());
        assert_eq!(report.source, None);
    }

    #[test]
    fn chain_order_follows_configuration() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(dir.path().join("chain.sqlite3").to_string_lossy());
        let config = Config {
            sheet_csv_url: Some("http://127.0.0.1:9/sheet.csv".to_string()),
            ..Config::default()
        };

        let names: Vec<&str> = sources_for(&config, &db, Some("m-42")).iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["cached_matches", "database", "sheet", "snapshot"]);

        let names: Vec<&str> = sources_for(&Config::default(), &db, Some("  ")).iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["database", "snapshot"]);
    }
}
