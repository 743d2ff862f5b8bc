use crate::app::AppState;
use crate::config::Config;
use crate::db::connection::init_db;
use crate::errors::ServerError;
use astra::{Body, Request, Response};
use http::Method;
use rusqlite::params;
use serde_json::Value;
use std::io::Read;
use tempfile::TempDir;

/// App state backed by a throwaway database and snapshot path. The directory lives as long
/// as the returned value.
pub struct TestApp {
    pub dir: TempDir,
    pub state: AppState,
}

pub fn test_app() -> TestApp {
    let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir failed: {e}"));
    let config = Config {
        db_path: dir.path().join("test.sqlite3").to_string_lossy().into_owned(),
        snapshot_path: dir.path().join("data.json"),
        ..Config::default()
    };

    let state = AppState::new(config);
    init_db(&state.db).unwrap_or_else(|e| panic!("Database initialization failed: {e}"));

    TestApp { dir, state }
}

pub struct Seed<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub city: &'a str,
    pub locality: &'a str,
    pub kind: &'a str,
    pub price: Option<f64>,
    pub area: Option<f64>,
    pub bedrooms: Option<i64>,
}

impl Default for Seed<'_> {
    fn default() -> Self {
        Seed {
            id: "",
            title: "Flat",
            city: "Chennai",
            locality: "Adyar",
            kind: "Apartment",
            price: None,
            area: None,
            bedrooms: None,
        }
    }
}

pub fn insert_listing(app: &TestApp, seed: Seed<'_>) {
    app.state
        .db
        .with_conn(|conn| {
            conn.execute(
                "INSERT INTO properties (id, title, city, locality, property_type, price_inr, carpet_area_sqft, bedrooms)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    seed.id,
                    seed.title,
                    seed.city,
                    seed.locality,
                    seed.kind,
                    seed.price,
                    seed.area,
                    seed.bedrooms
                ],
            )?;
            Ok::<_, ServerError>(())
        })
        .unwrap_or_else(|e| panic!("insert failed: {e}"));
}

pub fn request(method: Method, uri: &str) -> Request {
    let mut req = Request::new(Body::empty());
    *req.method_mut() = method;
    *req.uri_mut() = uri.parse().unwrap_or_else(|e| panic!("bad uri {uri}: {e}"));
    req
}

pub fn body_json(mut resp: Response) -> Value {
    let mut bytes = Vec::new();
    resp.body_mut()
        .reader()
        .read_to_end(&mut bytes)
        .unwrap_or_else(|e| panic!("read body failed: {e}"));
    serde_json::from_slice(&bytes).unwrap_or_else(|e| panic!("body is not JSON: {e}"))
}
