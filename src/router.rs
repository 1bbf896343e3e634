use crate::config::Settings;
use crate::errors::ServerError;
use crate::listing::{
    run_fetch, AccountType, BuildingFilters, BuildingMutation, CompanyMutation, ListingQuery,
    ListingController, Snapshot, SortColumn, ViewStatus,
};
use crate::responses::{html_response, no_content, with_cookie, ResultResp};
use crate::service::{DataService, ServiceError};
use crate::sessions::{session_cookie, token_from_cookie_header, Session, SessionStore};
use crate::spreadsheets::export_buildings_xlsx;
use crate::templates::pages::{self, BuildingsVm};
use astra::{Body, Request, ResponseBuilder};
use chrono::{Datelike, Local};
use http::header::{CACHE_CONTROL, CONTENT_TYPE, COOKIE};
use std::sync::Mutex;
use tracing::{debug, warn};

const MAIN_CSS: &str = include_str!("../static/main.css");

/// Fetches a full page tries before handing the table load to the browser.
const MOUNT_ATTEMPTS: u32 = 2;

/// How many years ahead the replacement-year filter offers.
const YEAR_CHOICES_AHEAD: i32 = 10;

pub struct App {
    pub service: Box<dyn DataService>,
    pub sessions: SessionStore,
}

impl App {
    pub fn new(service: Box<dyn DataService>, settings: &Settings) -> Self {
        Self {
            service,
            sessions: SessionStore::new(settings.session_ttl()),
        }
    }
}

pub fn handle(req: Request, app: &App) -> ResultResp {
    let method = req.method().as_str();
    let path = req.uri().path();
    let params = Params::from_query(req.uri().query());
    let token = req
        .headers()
        .get(COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(token_from_cookie_header);

    debug!(method, path, "request");

    match (method, path) {
        ("GET", "/") => dashboard(app),
        ("GET", "/static/main.css") => stylesheet(),

        ("GET", "/buildings") => with_session(app, token, |s| buildings_page(app, s)),
        ("GET", "/buildings/table") => {
            let mutation = parse_building_mutation(&params)?;
            with_session(app, token, |s| listing_fragment(app, &s.buildings, mutation, pages::buildings_table))
        }
        ("GET", "/buildings/export.xlsx") => with_session(app, token, |s| export_buildings(app, s)),

        ("GET", "/companies") => with_session(app, token, |s| companies_page(app, s)),
        ("GET", "/companies/table") => {
            let mutation = parse_company_mutation(&params)?;
            with_session(app, token, |s| listing_fragment(app, &s.companies, mutation, pages::companies_table))
        }
        ("GET", p) if p.starts_with("/companies/") => {
            let id = p["/companies/".len()..]
                .parse::<i64>()
                .map_err(|_| ServerError::NotFound)?;
            company_detail(app, id)
        }

        _ => Err(ServerError::NotFound),
    }
}

/// Runs `f` against the caller's session, creating one (and setting its
/// cookie) when the request did not carry a live token.
fn with_session<F>(app: &App, token: Option<&str>, f: F) -> ResultResp
where
    F: FnOnce(&Session) -> ResultResp,
{
    let (session, new_token) = app.sessions.resolve(token)?;
    let resp = f(&session)?;
    match new_token {
        Some(t) => with_cookie(resp, &session_cookie(&t)),
        None => Ok(resp),
    }
}

fn dashboard(app: &App) -> ResultResp {
    let stats = app
        .service
        .stats()
        .map_err(|e| warn!(error = %e, "stats fetch failed"))
        .ok();
    html_response(pages::dashboard_page(stats.as_ref()))
}

fn stylesheet() -> ResultResp {
    ResponseBuilder::new()
        .status(200)
        .header(CONTENT_TYPE, mime::TEXT_CSS_UTF_8.as_ref())
        .header(CACHE_CONTROL, "public, max-age=3600")
        .body(Body::from(MAIN_CSS))
        .map_err(|_| ServerError::InternalError)
}

/// Mount: load the region list once per session, then show the listing for
/// whatever state the session already holds.
fn buildings_page(app: &App, session: &Session) -> ResultResp {
    let regions = session.regions_or_load(|| {
        app.service.regions().unwrap_or_else(|e| {
            warn!(error = %e, "region list fetch failed");
            Vec::new()
        })
    });

    let snapshot = fetch_or_current(app, &session.buildings)?;
    let vm = BuildingsVm {
        snapshot: &snapshot,
        regions,
        year_choices: year_choices(&snapshot.query),
    };
    html_response(pages::buildings_page(&vm))
}

fn companies_page(app: &App, session: &Session) -> ResultResp {
    let snapshot = fetch_or_current(app, &session.companies)?;
    html_response(pages::companies_page(&snapshot))
}

/// One interaction on a listing. A response overtaken by a newer interaction
/// answers 204 so the page keeps the newer table.
fn listing_fragment<Q, R>(
    app: &App,
    controller: &Mutex<ListingController<Q>>,
    mutation: Option<Q::Mutation>,
    render: R,
) -> ResultResp
where
    Q: ListingQuery,
    R: FnOnce(&Snapshot<Q>) -> maud::Markup,
{
    match run_fetch(controller, app.service.as_ref(), mutation)? {
        Some(snapshot) => html_response(render(&snapshot)),
        None => no_content(),
    }
}

/// Full pages always render. A mount overtaken by a fragment request still
/// in flight fetches again, since that fragment's response goes to the
/// document being replaced. If it keeps losing, the page is rendered with a
/// stale table that loads itself.
fn fetch_or_current<Q: ListingQuery>(
    app: &App,
    controller: &Mutex<ListingController<Q>>,
) -> Result<Snapshot<Q>, ServerError> {
    for attempt in 1..=MOUNT_ATTEMPTS {
        if let Some(snapshot) = run_fetch(controller, app.service.as_ref(), None)? {
            return Ok(snapshot);
        }
        let ctrl = controller.lock().map_err(|_| ServerError::InternalError)?;
        if ctrl.is_current() {
            return Ok(ctrl.snapshot());
        }
        debug!(attempt, "mount overtaken by an unfinished fetch");
    }
    let ctrl = controller.lock().map_err(|_| ServerError::InternalError)?;
    Ok(ctrl.snapshot())
}

/// Exports the page the session is looking at, without fetching again
/// unless nothing has been fetched yet.
fn export_buildings(app: &App, session: &Session) -> ResultResp {
    let pending = {
        let ctrl = session
            .buildings
            .lock()
            .map_err(|_| ServerError::InternalError)?;
        ctrl.view().status == ViewStatus::Pending
    };

    let snapshot = if pending {
        fetch_or_current(app, &session.buildings)?
    } else {
        session
            .buildings
            .lock()
            .map_err(|_| ServerError::InternalError)?
            .snapshot()
    };

    export_buildings_xlsx(&snapshot.view.rows, snapshot.query.page())
}

fn company_detail(app: &App, id: i64) -> ResultResp {
    match app.service.company(id) {
        Ok(detail) => html_response(pages::company_page(Some(&detail))),
        Err(ServiceError::NotFound(_)) => Err(ServerError::NotFound),
        Err(e) => {
            warn!(company_id = id, error = %e, "company fetch failed");
            html_response(pages::company_page(None))
        }
    }
}

/// This year and the following ones, plus any selected year outside that range.
fn year_choices(state: &BuildingFilters) -> Vec<i32> {
    let this_year = Local::now().year();
    let mut years: Vec<i32> = (this_year..=this_year + YEAR_CHOICES_AHEAD).collect();
    for y in state.replacement_years().iter() {
        if !years.contains(&y) {
            years.push(y);
        }
    }
    years.sort_unstable();
    years
}

/// Decoded query string; keys may repeat.
pub struct Params(Vec<(String, String)>);

impl Params {
    pub fn from_query(query: Option<&str>) -> Self {
        let pairs = query
            .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
            .unwrap_or_default();
        Params(pairs)
    }

    pub fn first(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// No `op` means "fetch the current state again".
pub fn parse_building_mutation(params: &Params) -> Result<Option<BuildingMutation>, ServerError> {
    let Some(op) = params.first("op") else {
        return Ok(None);
    };
    let value = params.first("value").unwrap_or("");

    let mutation = match op {
        "page" => BuildingMutation::Page(parse_page(value)?),
        "search" => BuildingMutation::Search(value.to_string()),
        "account_type" => BuildingMutation::AccountType(
            value
                .parse::<AccountType>()
                .map_err(ServerError::BadRequest)?,
        ),
        "min_balance" => BuildingMutation::MinBalance(parse_min_balance(value)?),
        "replacement_year" => {
            let years = params
                .all("value")
                .filter(|v| !v.trim().is_empty())
                .map(|v| {
                    v.trim()
                        .parse::<i32>()
                        .map_err(|_| ServerError::BadRequest(format!("invalid year: {v:?}")))
                })
                .collect::<Result<_, _>>()?;
            BuildingMutation::ReplacementYears(years)
        }
        "region" => BuildingMutation::Region(Some(value.to_string())),
        "has_lifts" => BuildingMutation::HasLifts(parse_checkbox(params.first("value"))?),
        "sort" => BuildingMutation::Sort(
            value
                .parse::<SortColumn>()
                .map_err(ServerError::BadRequest)?,
        ),
        other => return Err(ServerError::BadRequest(format!("unknown operation: {other}"))),
    };
    Ok(Some(mutation))
}

pub fn parse_company_mutation(params: &Params) -> Result<Option<CompanyMutation>, ServerError> {
    let Some(op) = params.first("op") else {
        return Ok(None);
    };
    let value = params.first("value").unwrap_or("");

    match op {
        "page" => Ok(Some(CompanyMutation::Page(parse_page(value)?))),
        "search" => Ok(Some(CompanyMutation::Search(value.to_string()))),
        other => Err(ServerError::BadRequest(format!("unknown operation: {other}"))),
    }
}

fn parse_page(value: &str) -> Result<u32, ServerError> {
    match value.trim().parse::<u32>() {
        Ok(p) if p >= 1 => Ok(p),
        _ => Err(ServerError::BadRequest(format!("invalid page: {value:?}"))),
    }
}

/// Empty input means no threshold.
fn parse_min_balance(value: &str) -> Result<f64, ServerError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(0.0);
    }
    match value.replace(',', ".").parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => Err(ServerError::BadRequest(format!(
            "minimum balance must be a non-negative number: {value:?}"
        ))),
    }
}

/// Unchecked boxes are not submitted at all.
fn parse_checkbox(value: Option<&str>) -> Result<bool, ServerError> {
    match value.map(str::trim) {
        None | Some("false") | Some("0") => Ok(false),
        Some("true") | Some("on") | Some("1") => Ok(true),
        Some(other) => Err(ServerError::BadRequest(format!("invalid flag: {other:?}"))),
    }
}
