// src/tests/router_tests/reload_tests.rs
use crate::db::listings::save_cached_matches;
use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{body_json, insert_listing, request, test_app, Seed};
use http::Method;
use serde_json::json;

#[test]
fn reload_prefers_database_over_snapshot() -> Result<(), Box<dyn std::error::Error>> {
    let app = test_app();
    std::fs::write(
        app.dir.path().join("data.json"),
        r#"{"properties": [{"id": "snap1"}]}"#,
    )?;

    let json = body_json(handle(request(Method::POST, "/api/reload"), &app.state)?);
    assert_eq!(json["source"], "snapshot");
    assert_eq!(json["count"], 1);

    insert_listing(&app, Seed { id: "db1", ..Seed::default() });
    let json = body_json(handle(request(Method::POST, "/api/reload"), &app.state)?);
    assert_eq!(json["source"], "database");
    assert_eq!(app.state.working_set.snapshot()[0].id, "db1");
    Ok(())
}

#[test]
fn match_id_loads_cached_matches_first() -> Result<(), Box<dyn std::error::Error>> {
    let app = test_app();
    insert_listing(&app, Seed { id: "db1", ..Seed::default() });
    save_cached_matches(
        &app.state.db,
        "buyer-7",
        &[
            json!({"id": "m1", "priceINR": "₹45,00,000", "carpetAreaSqft": "900"}),
            json!({"id": "m2"}),
        ],
    )?;

    let json = body_json(handle(
        request(Method::POST, "/api/reload?matchId=buyer-7"),
        &app.state,
    )?);
    assert_eq!(json["source"], "cached_matches");
    assert_eq!(json["count"], 2);

    let snapshot = app.state.working_set.snapshot();
    assert_eq!(snapshot[0].price_per_sqft_inr, Some(5000.0));

    // An unknown match id falls through to the database.
    let json = body_json(handle(
        request(Method::POST, "/api/reload?matchId=missing"),
        &app.state,
    )?);
    assert_eq!(json["source"], "database");
    Ok(())
}

#[test]
fn every_source_empty_leaves_an_empty_set() -> Result<(), Box<dyn std::error::Error>> {
    let app = test_app();
    let json = body_json(handle(request(Method::POST, "/api/reload"), &app.state)?);
    assert_eq!(json["source"], serde_json::Value::Null);
    assert_eq!(json["count"], 0);
    assert!(app.state.working_set.is_empty());
    Ok(())
}

#[test]
fn reload_requires_post() {
    let app = test_app();
    let err = handle(request(Method::GET, "/api/reload"), &app.state).unwrap_err();
    assert!(matches!(err, ServerError::NotFound));
}
