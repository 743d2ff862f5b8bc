// src/tests/router_tests/facets_tests.rs
use crate::router::handle;
use crate::tests::utils::{body_json, insert_listing, request, test_app, Seed};
use http::Method;

#[test]
fn localities_narrow_to_the_selected_city() -> Result<(), Box<dyn std::error::Error>> {
    let app = test_app();
    for (id, city, locality) in [
        ("1", "Chennai", "Adyar"),
        ("2", "Chennai", "Velachery"),
        ("3", "Pune", "Baner"),
        ("4", "Pune", "Baner"),
    ] {
        insert_listing(
            &app,
            Seed {
                id,
                city,
                locality,
                ..Seed::default()
            },
        );
    }
    app.state.reload(None);

    let json = body_json(handle(request(Method::GET, "/api/facets"), &app.state)?);
    assert_eq!(json["cities"], serde_json::json!(["Chennai", "Pune"]));
    assert_eq!(
        json["localities"],
        serde_json::json!(["Adyar", "Baner", "Velachery"])
    );

    let json = body_json(handle(request(Method::GET, "/api/facets?city=Pune"), &app.state)?);
    assert_eq!(json["localities"], serde_json::json!(["Baner"]));
    Ok(())
}
