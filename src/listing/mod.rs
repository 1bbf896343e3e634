pub mod controller;
pub mod format;
mod query;
pub mod state;

pub use controller::{run_fetch, ListingController, ListingQuery, ListingView, Snapshot, ViewStatus};
pub use state::{
    AccountType, BuildingFilters, BuildingMutation, CompanyFilters, CompanyMutation, SortColumn,
    SortOrder, YearSet,
};
