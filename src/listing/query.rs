// src/listing/query.rs
//
// Query strings sent to the data service. Keys and value spellings are part
// of the service contract: empty strings mean "no filter" and are sent, not
// omitted.

use crate::listing::controller::ListingQuery;
use crate::listing::state::{
    AccountType, BuildingFilters, BuildingMutation, CompanyFilters, CompanyMutation,
};
use crate::service::{BuildingRecord, CompanyRecord, DataService, Page, QueryParams, ServiceError};

impl AccountType {
    /// `ALL` is "no filter", which the service spells as an empty value.
    pub fn as_query_value(self) -> &'static str {
        match self {
            AccountType::All => "",
            other => other.code(),
        }
    }
}

impl BuildingFilters {
    pub fn to_query(&self) -> QueryParams {
        vec![
            ("page", self.page().to_string()),
            ("search", self.search_text().to_string()),
            ("account_type", self.account_type().as_query_value().to_string()),
            ("min_balance", self.min_balance().to_string()),
            ("replacement_year", self.replacement_years().to_string()),
            ("region", self.region().unwrap_or_default().to_string()),
            ("sort_by", self.sort_by().as_str().to_string()),
            ("sort_order", self.sort_order().as_str().to_string()),
            ("has_lifts", self.has_lifts().to_string()),
        ]
    }
}

impl CompanyFilters {
    pub fn to_query(&self) -> QueryParams {
        vec![
            ("page", self.page().to_string()),
            ("search", self.search_text().to_string()),
        ]
    }
}

impl ListingQuery for BuildingFilters {
    type Record = BuildingRecord;
    type Mutation = BuildingMutation;

    fn apply(&mut self, mutation: BuildingMutation) {
        BuildingFilters::apply(self, mutation)
    }

    fn to_params(&self) -> QueryParams {
        self.to_query()
    }

    fn fetch(
        service: &dyn DataService,
        params: &QueryParams,
    ) -> Result<Page<BuildingRecord>, ServiceError> {
        service.buildings(params)
    }
}

impl ListingQuery for CompanyFilters {
    type Record = CompanyRecord;
    type Mutation = CompanyMutation;

    fn apply(&mut self, mutation: CompanyMutation) {
        CompanyFilters::apply(self, mutation)
    }

    fn to_params(&self) -> QueryParams {
        self.to_query()
    }

    fn fetch(
        service: &dyn DataService,
        params: &QueryParams,
    ) -> Result<Page<CompanyRecord>, ServiceError> {
        service.companies(params)
    }
}
