// src/tests/router_tests/listings_tests.rs
use crate::router::handle;
use crate::tests::utils::{body_json, insert_listing, request, test_app, Seed};
use http::Method;

fn seeded_app() -> crate::tests::utils::TestApp {
    let app = test_app();
    let prices = [
        ("P0", "Chennai", Some(6_500_000.0)),
        ("P1", "Chennai", Some(4_000_000.0)),
        ("P2", "Pune", Some(9_000_000.0)),
        ("P3", "Chennai", None),
        ("P4", "Chennai", Some(5_000_000.0)),
        ("P5", "Bengaluru", Some(5_500_000.0)),
        ("P6", "Chennai", Some(12_000_000.0)),
        ("P7", "Mumbai", Some(8_000_000.0)),
        ("P8", "Pune", Some(1_000_000.0)),
        ("P9", "Chennai", Some(4_999_999.0)),
    ];
    for (id, city, price) in prices {
        insert_listing(
            &app,
            Seed {
                id,
                city,
                price,
                ..Seed::default()
            },
        );
    }
    app.state.reload(None);
    app
}

#[test]
fn city_and_min_price_deep_link() -> Result<(), Box<dyn std::error::Error>> {
    let app = seeded_app();

    let resp = handle(
        request(Method::GET, "/api/listings?city=Chennai&minPrice=5000000&sort=priceLow"),
        &app.state,
    )?;
    assert_eq!(resp.status(), 200);

    let json = body_json(resp);
    assert_eq!(json["status"], "page");
    assert_eq!(json["total"], 3);
    let ids: Vec<&str> = json["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["property"]["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["P4", "P0", "P6"]);

    assert_eq!(json["activeFilters"][0]["label"], "city");
    assert_eq!(json["priceRange"]["min"], 5_000_000.0);
    assert_eq!(json["priceRange"]["minLabel"], "₹50L");
    Ok(())
}

fn ids(json: &serde_json::Value) -> Vec<&str> {
    json["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["property"]["id"].as_str().unwrap())
        .collect()
}

#[test]
fn inverted_price_link_filters_by_the_settled_range() -> Result<(), Box<dyn std::error::Error>> {
    let app = seeded_app();

    let json = body_json(handle(
        request(Method::GET, "/api/listings?minPrice=9000000&maxPrice=4000000"),
        &app.state,
    )?);
    assert_eq!(json["priceRange"]["min"], 3_800_000.0);
    assert_eq!(json["priceRange"]["max"], 4_000_000.0);
    assert_eq!(ids(&json), vec!["P1"]);
    Ok(())
}

#[test]
fn price_link_bounds_snap_and_open_at_the_edges() -> Result<(), Box<dyn std::error::Error>> {
    let app = seeded_app();

    let json = body_json(handle(
        request(Method::GET, "/api/listings?minPrice=4999999&maxPrice=99000000&sort=priceLow"),
        &app.state,
    )?);
    assert_eq!(json["priceRange"]["min"], 5_000_000.0);
    assert_eq!(json["priceRange"]["max"], 20_000_000.0);
    assert_eq!(ids(&json), vec!["P4", "P5", "P0", "P7", "P2", "P6"]);
    Ok(())
}

#[test]
fn no_match_is_reported_explicitly() -> Result<(), Box<dyn std::error::Error>> {
    let app = seeded_app();

    let resp = handle(request(Method::GET, "/api/listings?city=Delhi"), &app.state)?;
    let json = body_json(resp);
    assert_eq!(json["status"], "no_results");
    assert!(json.get("items").is_none());
    Ok(())
}

#[test]
fn pages_are_clamped_and_sized() -> Result<(), Box<dyn std::error::Error>> {
    let app = seeded_app();

    let json = body_json(handle(request(Method::GET, "/api/listings?page=7"), &app.state)?);
    assert_eq!(json["total"], 10);
    assert_eq!(json["pageCount"], 2);
    assert_eq!(json["page"], 2);
    assert_eq!(json["pageSize"], 9);
    assert_eq!(json["items"].as_array().unwrap().len(), 1);
    Ok(())
}

#[test]
fn empty_working_set_has_no_results() -> Result<(), Box<dyn std::error::Error>> {
    let app = test_app();
    app.state.reload(None);

    let json = body_json(handle(request(Method::GET, "/api/listings"), &app.state)?);
    assert_eq!(json["status"], "no_results");
    Ok(())
}
