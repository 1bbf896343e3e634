use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

// /buildings
//  ├── buildings[]
//  │    ├── id, address, region_name, mkd_code
//  │    ├── total_sq, overhaul_funds_balance   (number or decimal string)
//  │    ├── lifts_count, nearest_replacement_date
//  │    ├── company_name, director_name, phone, email
//  │    └── spec_account_owner_type            (UK | TSJ | JSK | REGOP)
//  ├── pages
//  └── total                                  (optional)

/// One page of rows plus the total number of pages the service reports.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<R> {
    pub rows: Vec<R>,
    pub pages: u32,
    pub total: Option<u64>,
}

/// Larger page counts than this are treated as a broken response.
pub const MAX_PAGES: u32 = 100_000;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BuildingRecord {
    pub id: i64,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub address: Option<String>,
    #[serde(default, rename = "region_name", alias = "region", deserialize_with = "de_opt_text")]
    pub region: Option<String>,
    #[serde(default, rename = "mkd_code", deserialize_with = "de_opt_text")]
    pub building_code: Option<String>,
    #[serde(default, rename = "total_sq", deserialize_with = "de_opt_number")]
    pub total_area: Option<f64>,
    #[serde(default, rename = "overhaul_funds_balance", deserialize_with = "de_opt_number")]
    pub balance: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_count")]
    pub lifts_count: Option<u32>,
    #[serde(default, deserialize_with = "de_opt_date")]
    pub nearest_replacement_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub company_name: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub director_name: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub email: Option<String>,
    #[serde(default, rename = "spec_account_owner_type", deserialize_with = "de_opt_text")]
    pub owner_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BuildingsResponse {
    pub buildings: Vec<BuildingRecord>,
    #[serde(deserialize_with = "de_page_count")]
    pub pages: u32,
    #[serde(default)]
    pub total: Option<u64>,
}

impl From<BuildingsResponse> for Page<BuildingRecord> {
    fn from(resp: BuildingsResponse) -> Self {
        Page {
            rows: resp.buildings,
            pages: resp.pages,
            total: resp.total,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CompanyRecord {
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub ogrn: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub director_name: Option<String>,
    #[serde(default)]
    pub buildings_count: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CompaniesResponse {
    pub companies: Vec<CompanyRecord>,
    #[serde(deserialize_with = "de_page_count")]
    pub pages: u32,
    #[serde(default)]
    pub total: Option<u64>,
}

impl From<CompaniesResponse> for Page<CompanyRecord> {
    fn from(resp: CompaniesResponse) -> Self {
        Page {
            rows: resp.companies,
            pages: resp.pages,
            total: resp.total,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BuildingSummary {
    pub id: i64,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub address: Option<String>,
    #[serde(default, rename = "mkd_code", deserialize_with = "de_opt_text")]
    pub building_code: Option<String>,
    #[serde(default, rename = "total_sq", deserialize_with = "de_opt_number")]
    pub total_area: Option<f64>,
}

/// `/companies/{id}`: the company plus (at most 100 of) its buildings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CompanyDetail {
    pub company: CompanyRecord,
    #[serde(default)]
    pub buildings: Vec<BuildingSummary>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RegionsResponse {
    pub regions: Vec<RegionEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RegionEntry {
    #[serde(alias = "region_name")]
    pub region: String,
}

impl RegionsResponse {
    pub fn into_names(self) -> Vec<String> {
        self.regions
            .into_iter()
            .map(|r| r.region)
            .filter(|r| !r.trim().is_empty())
            .collect()
    }
}

/// Aggregate counters shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Stats {
    pub buildings: u64,
    pub companies: u64,
    pub with_phone: u64,
    pub with_email: u64,
    pub linked: u64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Number(f64),
    Text(String),
}

/// Decimal columns come through as either JSON numbers or strings.
fn de_opt_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Scalar>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Scalar::Number(n)) => Ok(Some(n)),
        Some(Scalar::Text(s)) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            s.parse::<f64>()
                .map(Some)
                .map_err(|_| D::Error::custom(format!("not a number: {s:?}")))
        }
    }
}

fn de_page_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let pages = u32::deserialize(deserializer)?;
    if pages > MAX_PAGES {
        return Err(D::Error::custom(format!(
            "page count {pages} exceeds {MAX_PAGES}"
        )));
    }
    Ok(pages)
}

fn de_opt_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(de_opt_number(deserializer)?.map(|n| n.max(0.0).round() as u32))
}

/// Codes like OGRN or the building code are sometimes sent as numbers.
fn de_opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Scalar>::deserialize(deserializer)? {
        None => None,
        Some(Scalar::Number(n)) if n.fract() == 0.0 => Some(format!("{}", n as i64)),
        Some(Scalar::Number(n)) => Some(n.to_string()),
        Some(Scalar::Text(s)) if s.trim().is_empty() => None,
        Some(Scalar::Text(s)) => Some(s),
    })
}

fn de_opt_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse_service_date(s)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("unrecognised date: {s:?}"))),
    }
}

/// Accepts the date renderings the service has been seen to emit:
/// `2026-03-01`, `2026-03-01T00:00:00`, RFC 3339 and RFC 2822
/// (`Sun, 01 Mar 2026 00:00:00 GMT`).
pub fn parse_service_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
        .or_else(|| DateTime::parse_from_rfc2822(s).ok().map(|dt| dt.date_naive()))
}
