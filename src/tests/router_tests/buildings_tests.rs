// src/tests/router_tests/buildings_tests.rs

use crate::errors::ServerError;
use crate::router::handle;
use crate::templates::components::LOAD_ERROR_TEXT;
use crate::tests::utils::{
    body_bytes, body_string, building, get, get_with_cookie, session_cookie_of, test_app,
    FakeService,
};
use http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use scraper::{Html, Selector};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::thread;

fn fake_with_rows() -> Arc<FakeService> {
    let mut fake = FakeService::with_buildings(
        vec![building(1, "ул. Ленина, 1"), building(2, "ул. Мира, 5")],
        4,
    );
    fake.regions = vec!["Краснодарский край".into(), "Ростовская область".into()];
    Arc::new(fake)
}

fn param<'a>(query: &'a [(&'static str, String)], key: &str) -> &'a str {
    query
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v.as_str())
        .unwrap_or_else(|| panic!("missing query key {key}"))
}

fn row_count(html: &str) -> usize {
    let doc = Html::parse_document(html);
    let rows = Selector::parse("#buildings-table tbody tr").unwrap();
    let empty = Selector::parse("td.empty").unwrap();
    doc.select(&rows)
        .filter(|tr| tr.select(&empty).next().is_none())
        .count()
}

/// Opens the listing once and returns the session cookie it handed out.
fn open_listing(app: &crate::router::App) -> String {
    let resp = handle(get("/buildings"), app).unwrap();
    assert_eq!(resp.status(), 200);
    session_cookie_of(&resp).expect("first visit should set a session cookie")
}

#[test]
fn first_visit_sets_cookie_and_renders_rows() {
    let fake = fake_with_rows();
    let app = test_app(fake.clone());

    let mut resp = handle(get("/buildings"), &app).unwrap();
    assert_eq!(resp.status(), 200);
    let cookie = session_cookie_of(&resp).unwrap();
    assert!(cookie.starts_with("session="));

    let body = body_string(&mut resp);
    assert_eq!(row_count(&body), 2);
    assert!(body.contains("+7 (999) 123-45-67"));
    assert!(body.contains("Управляющая компания"));
    assert!(body.contains("Ростовская область"));

    let query = fake.last_building_query();
    assert_eq!(param(&query, "page"), "1");
    assert_eq!(param(&query, "account_type"), "SPEC");
    assert_eq!(param(&query, "sort_by"), "balance");
    assert_eq!(param(&query, "sort_order"), "desc");
    assert_eq!(param(&query, "has_lifts"), "true");
}

#[test]
fn returning_browser_keeps_its_session_and_regions_load_once() {
    let fake = fake_with_rows();
    let app = test_app(fake.clone());
    let cookie = open_listing(&app);

    let resp = handle(get_with_cookie("/buildings", &cookie), &app).unwrap();
    assert_eq!(resp.status(), 200);
    assert!(session_cookie_of(&resp).is_none());
    assert_eq!(fake.region_calls.load(Ordering::SeqCst), 1);
    assert_eq!(app.sessions.len(), 1);
}

#[test]
fn unknown_cookie_gets_a_fresh_session() {
    let app = test_app(fake_with_rows());
    let resp = handle(get_with_cookie("/buildings", "session=forged"), &app).unwrap();
    assert!(session_cookie_of(&resp).is_some());
}

#[test]
fn filter_change_returns_to_first_page() {
    let fake = fake_with_rows();
    let app = test_app(fake.clone());
    let cookie = open_listing(&app);

    let resp = handle(
        get_with_cookie("/buildings/table?op=page&value=3", &cookie),
        &app,
    )
    .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(param(&fake.last_building_query(), "page"), "3");

    handle(
        get_with_cookie("/buildings/table?op=search&value=%D0%9B%D0%B5%D0%BD%D0%B8%D0%BD%D0%B0", &cookie),
        &app,
    )
    .unwrap();
    let query = fake.last_building_query();
    assert_eq!(param(&query, "page"), "1");
    assert_eq!(param(&query, "search"), "Ленина");
}

#[test]
fn sort_header_flips_then_switches_column() {
    let fake = fake_with_rows();
    let app = test_app(fake.clone());
    let cookie = open_listing(&app);

    handle(get_with_cookie("/buildings/table?op=sort&value=balance", &cookie), &app).unwrap();
    let query = fake.last_building_query();
    assert_eq!(param(&query, "sort_by"), "balance");
    assert_eq!(param(&query, "sort_order"), "asc");

    let mut resp = handle(
        get_with_cookie("/buildings/table?op=sort&value=address", &cookie),
        &app,
    )
    .unwrap();
    let query = fake.last_building_query();
    assert_eq!(param(&query, "sort_by"), "address");
    assert_eq!(param(&query, "sort_order"), "desc");

    let doc = Html::parse_fragment(&body_string(&mut resp));
    let active = Selector::parse("th[aria-sort=\"descending\"]").unwrap();
    let th = doc.select(&active).next().expect("active sort header");
    assert!(th.text().collect::<String>().contains("Адрес"));
}

#[test]
fn selected_years_are_sent_comma_joined() {
    let fake = fake_with_rows();
    let app = test_app(fake.clone());
    let cookie = open_listing(&app);

    handle(
        get_with_cookie(
            "/buildings/table?op=replacement_year&value=2030&value=2026&value=2030",
            &cookie,
        ),
        &app,
    )
    .unwrap();
    assert_eq!(param(&fake.last_building_query(), "replacement_year"), "2030,2026");

    handle(
        get_with_cookie("/buildings/table?op=replacement_year", &cookie),
        &app,
    )
    .unwrap();
    assert_eq!(param(&fake.last_building_query(), "replacement_year"), "");
}

#[test]
fn unchecked_lift_box_sends_false_and_all_accounts_send_empty() {
    let fake = fake_with_rows();
    let app = test_app(fake.clone());
    let cookie = open_listing(&app);

    handle(get_with_cookie("/buildings/table?op=has_lifts", &cookie), &app).unwrap();
    handle(
        get_with_cookie("/buildings/table?op=account_type&value=ALL", &cookie),
        &app,
    )
    .unwrap();

    let query = fake.last_building_query();
    assert_eq!(param(&query, "has_lifts"), "false");
    assert_eq!(param(&query, "account_type"), "");
}

#[test]
fn region_filter_round_trips_through_the_page() {
    let fake = fake_with_rows();
    let app = test_app(fake.clone());
    let cookie = open_listing(&app);

    handle(
        get_with_cookie(
            "/buildings/table?op=region&value=%D0%A0%D0%BE%D1%81%D1%82%D0%BE%D0%B2%D1%81%D0%BA%D0%B0%D1%8F+%D0%BE%D0%B1%D0%BB%D0%B0%D1%81%D1%82%D1%8C",
            &cookie,
        ),
        &app,
    )
    .unwrap();
    assert_eq!(param(&fake.last_building_query(), "region"), "Ростовская область");

    let mut resp = handle(get_with_cookie("/buildings", &cookie), &app).unwrap();
    let doc = Html::parse_document(&body_string(&mut resp));
    let selected = Selector::parse("option[selected]").unwrap();
    assert!(doc
        .select(&selected)
        .any(|o| o.value().attr("value") == Some("Ростовская область")));
}

#[test]
fn malformed_input_is_rejected_without_fetching() {
    let fake = fake_with_rows();
    let app = test_app(fake.clone());
    let cookie = open_listing(&app);
    let before = fake.building_queries.lock().unwrap().len();

    for uri in [
        "/buildings/table?op=min_balance&value=-5",
        "/buildings/table?op=min_balance&value=abc",
        "/buildings/table?op=page&value=0",
        "/buildings/table?op=sort&value=region",
        "/buildings/table?op=teleport&value=1",
    ] {
        let err = handle(get_with_cookie(uri, &cookie), &app).unwrap_err();
        assert!(matches!(err, ServerError::BadRequest(_)), "{uri}");
    }

    assert_eq!(fake.building_queries.lock().unwrap().len(), before);
}

#[test]
fn min_balance_accepts_comma_decimal() {
    let fake = fake_with_rows();
    let app = test_app(fake.clone());
    let cookie = open_listing(&app);

    handle(
        get_with_cookie("/buildings/table?op=min_balance&value=1500%2C5", &cookie),
        &app,
    )
    .unwrap();
    assert_eq!(param(&fake.last_building_query(), "min_balance"), "1500.5");
}

#[test]
fn pagination_links_follow_reported_pages() {
    let app = test_app(fake_with_rows());
    let cookie = open_listing(&app);

    let mut resp = handle(get_with_cookie("/buildings/table?op=page&value=2", &cookie), &app).unwrap();
    let doc = Html::parse_fragment(&body_string(&mut resp));
    let current = Selector::parse("nav.pagination .current").unwrap();
    let text: String = doc.select(&current).next().unwrap().text().collect();
    assert_eq!(text.trim(), "2");
}

#[test]
fn failed_fetch_shows_error_and_no_pagination() {
    let fake = fake_with_rows();
    let app = test_app(fake.clone());
    let cookie = open_listing(&app);

    fake.set_failing(true);
    let mut resp = handle(get_with_cookie("/buildings/table?op=page&value=2", &cookie), &app).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(&mut resp);
    assert!(body.contains(LOAD_ERROR_TEXT));
    assert_eq!(row_count(&body), 0);
    let doc = Html::parse_fragment(&body);
    assert!(doc.select(&Selector::parse("nav.pagination").unwrap()).next().is_none());
}

#[test]
fn region_failure_still_renders_the_page() {
    let fake = fake_with_rows();
    fake.set_failing(true);
    let app = test_app(fake.clone());

    let mut resp = handle(get("/buildings"), &app).unwrap();
    assert_eq!(resp.status(), 200);
    assert!(body_string(&mut resp).contains(LOAD_ERROR_TEXT));
}

#[test]
fn overtaken_request_answers_no_content() {
    let (fake, hold) = FakeService::with_buildings(
        vec![building(1, "ул. Ленина, 1"), building(2, "ул. Мира, 5")],
        1,
    )
    .holding_search("медленно");
    let app = Arc::new(test_app(Arc::new(fake)));
    let cookie = open_listing(&app);

    let slow = {
        let app = app.clone();
        let cookie = cookie.clone();
        thread::spawn(move || {
            let uri = "/buildings/table?op=search&value=%D0%BC%D0%B5%D0%B4%D0%BB%D0%B5%D0%BD%D0%BD%D0%BE";
            handle(get_with_cookie(uri, &cookie), &app).unwrap().status()
        })
    };

    hold.entered.recv().unwrap();

    let mut fast = handle(
        get_with_cookie("/buildings/table?op=search&value=%D0%9C%D0%B8%D1%80%D0%B0", &cookie),
        &app,
    )
    .unwrap();
    assert_eq!(fast.status(), 200);
    let fast_body = body_string(&mut fast);
    assert_eq!(row_count(&fast_body), 1);
    assert!(fast_body.contains("ул. Мира, 5"));

    hold.release.send(()).unwrap();
    assert_eq!(slow.join().unwrap(), 204);

    // the page still reflects the newer search
    let mut page = handle(get_with_cookie("/buildings/table", &cookie), &app).unwrap();
    assert!(body_string(&mut page).contains("ул. Мира, 5"));
}

#[test]
fn export_downloads_the_visible_page() {
    let fake = fake_with_rows();
    let app = test_app(fake.clone());
    let cookie = open_listing(&app);
    let fetches = fake.building_queries.lock().unwrap().len();

    let mut resp = handle(get_with_cookie("/buildings/export.xlsx", &cookie), &app).unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get(CONTENT_TYPE).unwrap(),
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    let disposition = resp.headers().get(CONTENT_DISPOSITION).unwrap().to_str().unwrap();
    assert!(disposition.contains("buildings_page_1.xlsx"));
    assert!(body_bytes(&mut resp).starts_with(b"PK"));
    assert_eq!(fake.building_queries.lock().unwrap().len(), fetches);
}

#[test]
fn export_without_prior_visit_fetches_first() {
    let fake = fake_with_rows();
    let app = test_app(fake.clone());

    let resp = handle(get("/buildings/export.xlsx"), &app).unwrap();
    assert_eq!(resp.status(), 200);
    assert!(session_cookie_of(&resp).is_some());
    assert_eq!(fake.building_queries.lock().unwrap().len(), 1);
}

const SEARCH_LENINA: &str = "/buildings/table?op=search&value=%D0%9B%D0%B5%D0%BD%D0%B8%D0%BD%D0%B0";
const SEARCH_MIRA: &str = "/buildings/table?op=search&value=%D0%9C%D0%B8%D1%80%D0%B0";

fn spawn_get(
    app: &Arc<crate::router::App>,
    cookie: &str,
    uri: &'static str,
) -> thread::JoinHandle<(u16, String)> {
    let app = app.clone();
    let cookie = cookie.to_string();
    thread::spawn(move || {
        let mut resp = handle(get_with_cookie(uri, &cookie), &app).unwrap();
        (resp.status().as_u16(), body_string(&mut resp))
    })
}

#[test]
fn reload_during_unfinished_filter_change_shows_the_newer_state() {
    let (fake, lenina) = FakeService::with_buildings(
        vec![building(1, "ул. Ленина, 1"), building(2, "ул. Мира, 5")],
        1,
    )
    .holding_search("Ленина");
    let (fake, mira) = fake.holding_search("Мира");
    let app = Arc::new(test_app(Arc::new(fake)));
    let cookie = open_listing(&app);

    let first = spawn_get(&app, &cookie, SEARCH_LENINA);
    lenina.entered.recv().unwrap();
    lenina.release.send(()).unwrap();
    assert_eq!(first.join().unwrap().0, 200);

    // reload stalls on the current search
    let mount = spawn_get(&app, &cookie, "/buildings");
    lenina.entered.recv().unwrap();

    // a change from the abandoned document is issued and stalls too
    let change = spawn_get(&app, &cookie, SEARCH_MIRA);
    mira.entered.recv().unwrap();

    // the reload completes first, overtaken, and has to fetch again
    lenina.release.send(()).unwrap();
    mira.entered.recv().unwrap();
    mira.release.send(()).unwrap();
    mira.release.send(()).unwrap();

    let (status, body) = mount.join().unwrap();
    assert_eq!(status, 200);
    assert_eq!(row_count(&body), 1);
    assert!(body.contains("ул. Мира, 5"));
    assert!(!body.contains("ул. Ленина, 1"));

    let doc = Html::parse_document(&body);
    let search = Selector::parse("input[type=\"search\"]").unwrap();
    let input = doc.select(&search).next().unwrap();
    assert_eq!(input.value().attr("value"), Some("Мира"));

    assert_eq!(change.join().unwrap().0, 204);
}
