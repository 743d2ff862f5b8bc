use super::{ListingSource, SourceError};
use serde_json::Value;
use std::path::PathBuf;

/// Static JSON file shipped next to the binary, used when every live source is empty.
pub struct SnapshotSource {
    path: PathBuf,
}

impl SnapshotSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ListingSource for SnapshotSource {
    fn name(&self) -> &'static str {
        "snapshot"
    }

    fn fetch(&self) -> Result<Vec<Value>, SourceError> {
        let text = std::fs::read_to_string(&self.path)?;
        parse_snapshot(&text)
    }
}

/// Accepts either a top-level array or `{ "properties": [...] }`. Any other shape holds
/// no listings.
pub fn parse_snapshot(text: &str) -> Result<Vec<Value>, SourceError> {
    let json: Value = serde_json::from_str(text)?;
    Ok(match json {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("properties") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    })
}
