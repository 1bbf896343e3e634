// client.rs
use crate::service::models::{
    BuildingsResponse, CompaniesResponse, CompanyDetail, RegionsResponse, Stats,
};
use crate::service::{BuildingRecord, CompanyRecord, Page, ServiceError};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("overhaul_browser/", env!("CARGO_PKG_VERSION"));

/// Canonical, ordered key/value query sent to the data service.
pub type QueryParams = Vec<(&'static str, String)>;

/// Read-only view of the remote registry. The HTTP implementation is used in
/// production; tests substitute their own.
pub trait DataService: Send + Sync {
    fn buildings(&self, query: &QueryParams) -> Result<Page<BuildingRecord>, ServiceError>;
    fn companies(&self, query: &QueryParams) -> Result<Page<CompanyRecord>, ServiceError>;
    fn company(&self, id: i64) -> Result<CompanyDetail, ServiceError>;
    fn regions(&self) -> Result<Vec<String>, ServiceError>;
    fn stats(&self) -> Result<Stats, ServiceError>;
}

pub struct HttpDataService {
    client: Client,
    base_url: String,
}

impl HttpDataService {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<T, ServiceError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, ?query, "data service request");

        let resp = self
            .client
            .get(&url)
            .query(query)
            .send()
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        decode_response(path, status, &text)
    }
}

/// Maps one service answer onto a typed result: 404 is `NotFound`, any other
/// non-success is `Status`, and a body that does not fit `T` is `Decode`.
fn decode_response<T: DeserializeOwned>(
    path: &str,
    status: StatusCode,
    body: &str,
) -> Result<T, ServiceError> {
    if status == StatusCode::NOT_FOUND {
        return Err(ServiceError::NotFound(path.to_string()));
    }
    if !status.is_success() {
        return Err(ServiceError::Status {
            status: status.as_u16(),
            body: body.to_string(),
        });
    }
    serde_json::from_str(body).map_err(|e| ServiceError::Decode(format!("{path}: {e}")))
}

impl DataService for HttpDataService {
    fn buildings(&self, query: &QueryParams) -> Result<Page<BuildingRecord>, ServiceError> {
        self.get_json::<BuildingsResponse>("/buildings", query)
            .map(Page::from)
    }

    fn companies(&self, query: &QueryParams) -> Result<Page<CompanyRecord>, ServiceError> {
        self.get_json::<CompaniesResponse>("/companies", query)
            .map(Page::from)
    }

    fn company(&self, id: i64) -> Result<CompanyDetail, ServiceError> {
        self.get_json(&format!("/companies/{id}"), &[])
    }

    fn regions(&self) -> Result<Vec<String>, ServiceError> {
        self.get_json::<RegionsResponse>("/regions", &[])
            .map(RegionsResponse::into_names)
    }

    fn stats(&self) -> Result<Stats, ServiceError> {
        self.get_json("/stats", &[])
    }
}
