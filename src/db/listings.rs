use crate::db::connection::Database;
use crate::errors::ServerError;
use rusqlite::types::ValueRef;
use rusqlite::{params, OptionalExtension, Row};
use serde_json::{Map, Value};

/// Raw `properties` rows as JSON objects keyed by column name, ready for the normalizer.
pub fn fetch_property_rows(db: &Database, limit: usize) -> Result<Vec<Value>, ServerError> {
    db.with_conn(|conn| {
        let mut stmt = conn
            .prepare("SELECT * FROM properties LIMIT ?1")
            .map_err(|e| ServerError::DbError(e.to_string()))?;

        let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        let rows = stmt
            .query_map(params![limit], |row| row_to_json(row, &columns))
            .map_err(|e| ServerError::DbError(e.to_string()))?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
        }
        Ok(out)
    })
}

/// The cached `results` array for one match id. `Ok(None)` when the id is unknown.
///
/// A stored value that is not a JSON array is reported as a database error.
pub fn fetch_cached_matches(db: &Database, match_id: &str) -> Result<Option<Vec<Value>>, ServerError> {
    let stored: Option<String> = db.with_conn(|conn| {
        conn.query_row(
            "SELECT results FROM cached_matches WHERE id = ?1",
            params![match_id],
            |row| row.get(0),
        )
        .optional()
        .map_err(ServerError::from)
    })?;

    let Some(stored) = stored else {
        return Ok(None);
    };

    match serde_json::from_str::<Value>(&stored) {
        Ok(Value::Array(items)) => Ok(Some(items)),
        Ok(_) => Err(ServerError::DbError(format!(
            "cached_matches {match_id}: results is not an array"
        ))),
        Err(e) => Err(ServerError::DbError(format!(
            "cached_matches {match_id}: {e}"
        ))),
    }
}

pub fn save_cached_matches(db: &Database, match_id: &str, results: &[Value]) -> Result<(), ServerError> {
    let encoded = serde_json::to_string(results)
        .map_err(|e| ServerError::DbError(format!("encode results failed: {e}")))?;

    db.with_conn(|conn| {
        conn.execute(
            "INSERT INTO cached_matches (id, results) VALUES (?1, ?2)
             ON CONFLICT(id) DO UPDATE SET results = excluded.results",
            params![match_id, encoded],
        )?;
        Ok(())
    })
}

/// SQLite has no boolean type, so integer `is_*` columns become JSON booleans.
/// Blobs carry nothing the listing schema uses and are dropped.
fn row_to_json(row: &Row<'_>, columns: &[String]) -> rusqlite::Result<Value> {
    let mut map = Map::new();
    for (idx, name) in columns.iter().enumerate() {
        let value = match row.get_ref(idx)? {
            ValueRef::Null => Value::Null,
            ValueRef::Integer(i) if name.starts_with("is_") => Value::Bool(i != 0),
            ValueRef::Integer(i) => Value::from(i),
            ValueRef::Real(f) => serde_json::Number::from_f64(f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            ValueRef::Text(bytes) => Value::String(String::from_utf8_lossy(bytes).into_owned()),
            ValueRef::Blob(_) => continue,
        };
        map.insert(name.clone(), value);
    }
    Ok(Value::Object(map))
}
