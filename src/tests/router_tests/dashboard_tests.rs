// src/tests/router_tests/dashboard_tests.rs

use crate::errors::ServerError;
use crate::responses::html_error_response;
use crate::router::handle;
use crate::service::Stats;
use crate::templates::components::LOAD_ERROR_TEXT;
use crate::tests::utils::{body_string, get, test_app, FakeService};
use http::Method;
use std::sync::Arc;

#[test]
fn dashboard_shows_grouped_counters() {
    let mut fake = FakeService::default();
    fake.stats = Some(Stats {
        buildings: 125_430,
        companies: 2_311,
        with_phone: 1_900,
        with_email: 1_204,
        linked: 98_000,
    });
    let app = test_app(Arc::new(fake));

    let mut resp = handle(get("/"), &app).unwrap();
    assert_eq!(resp.status(), 200);
    let body = body_string(&mut resp);
    assert!(body.contains("125\u{a0}430"));
    assert!(body.contains("Связей дом-УК"));
    assert!(!body.contains(LOAD_ERROR_TEXT));
}

#[test]
fn dashboard_survives_a_failing_service() {
    let fake = FakeService::default();
    fake.set_failing(true);
    let app = test_app(Arc::new(fake));

    let mut resp = handle(get("/"), &app).unwrap();
    assert_eq!(resp.status(), 200);
    assert!(body_string(&mut resp).contains(LOAD_ERROR_TEXT));
}

#[test]
fn unknown_paths_and_methods_are_not_found() {
    let app = test_app(Arc::new(FakeService::default()));

    assert!(matches!(
        handle(get("/admin"), &app).unwrap_err(),
        ServerError::NotFound
    ));

    let mut post = get("/buildings");
    *post.method_mut() = Method::POST;
    assert!(matches!(handle(post, &app).unwrap_err(), ServerError::NotFound));
}

#[test]
fn error_pages_carry_matching_status() {
    assert_eq!(html_error_response(ServerError::NotFound).status(), 404);
    assert_eq!(
        html_error_response(ServerError::BadRequest("page".into())).status(),
        400
    );
    assert_eq!(html_error_response(ServerError::InternalError).status(), 500);
}

#[test]
fn stylesheet_is_served() {
    let app = test_app(Arc::new(FakeService::default()));
    let resp = handle(get("/static/main.css"), &app).unwrap();
    assert_eq!(resp.status(), 200);
    assert!(resp
        .headers()
        .get(http::header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/css"));
}
