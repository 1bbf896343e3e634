mod client;
pub mod models;
mod service_error;

pub use client::{DataService, HttpDataService, QueryParams};
pub use models::{
    BuildingRecord, BuildingSummary, CompanyDetail, CompanyRecord, Page, Stats,
};
pub use service_error::ServiceError;
