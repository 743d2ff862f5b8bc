// src/tests/router_tests/detail_tests.rs
use crate::errors::ServerError;
use crate::responses::error_to_response;
use crate::router::handle;
use crate::tests::utils::{body_json, insert_listing, request, test_app, Seed};
use http::Method;

#[test]
fn detail_includes_summary_and_similar() -> Result<(), Box<dyn std::error::Error>> {
    let app = test_app();
    insert_listing(
        &app,
        Seed {
            id: "a1",
            title: "Sea view flat",
            bedrooms: Some(3),
            area: Some(1200.0),
            price: Some(9_000_000.0),
            ..Seed::default()
        },
    );
    for id in ["a2", "a3", "a4"] {
        insert_listing(&app, Seed { id, ..Seed::default() });
    }
    insert_listing(
        &app,
        Seed {
            id: "b1",
            city: "Pune",
            ..Seed::default()
        },
    );
    app.state.reload(None);

    let json = body_json(handle(request(Method::GET, "/api/listings/a1"), &app.state)?);
    assert_eq!(json["property"]["id"], "a1");
    assert_eq!(json["property"]["pricePerSqftINR"], 7500.0);
    assert_eq!(json["property"]["priceDisplay"], "₹90,00,000");
    assert!(json["smartSummary"]
        .as_str()
        .unwrap()
        .starts_with("Located in Adyar, Chennai."));

    let similar: Vec<&str> = json["similar"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap())
        .collect();
    assert_eq!(similar, vec!["a2", "a3", "a4"]);
    Ok(())
}

#[test]
fn encoded_ids_are_decoded_before_lookup() -> Result<(), Box<dyn std::error::Error>> {
    let app = test_app();
    insert_listing(&app, Seed { id: "flat 7", ..Seed::default() });
    insert_listing(&app, Seed { id: "फ्लैट-1", ..Seed::default() });
    insert_listing(&app, Seed { id: "a+b", ..Seed::default() });
    app.state.reload(None);

    let json = body_json(handle(request(Method::GET, "/api/listings/flat%207"), &app.state)?);
    assert_eq!(json["property"]["id"], "flat 7");

    let uri = format!("/api/listings/{}", urlencoding::encode("फ्लैट-1"));
    let json = body_json(handle(request(Method::GET, &uri), &app.state)?);
    assert_eq!(json["property"]["id"], "फ्लैट-1");

    let json = body_json(handle(request(Method::GET, "/api/listings/a+b"), &app.state)?);
    assert_eq!(json["property"]["id"], "a+b");
    Ok(())
}

#[test]
fn id_that_is_not_utf8_is_rejected() {
    let app = test_app();
    app.state.reload(None);

    let err = handle(request(Method::GET, "/api/listings/%FF%FE"), &app.state).unwrap_err();
    assert!(matches!(err, ServerError::BadRequest(_)));
    assert_eq!(err.status_code(), 400);
}

#[test]
fn unknown_id_is_not_found() {
    let app = test_app();
    app.state.reload(None);

    let err = handle(request(Method::GET, "/api/listings/nope"), &app.state).unwrap_err();
    assert!(matches!(err, ServerError::NotFound));

    let resp = error_to_response(err);
    assert_eq!(resp.status(), 404);
    assert_eq!(body_json(resp)["error"], "Not Found");
}

#[test]
fn unknown_route_is_not_found() {
    let app = test_app();
    let err = handle(request(Method::DELETE, "/api/listings"), &app.state).unwrap_err();
    assert_eq!(err.status_code(), 404);
}
