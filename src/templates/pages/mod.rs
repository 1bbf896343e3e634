pub mod buildings;
pub mod companies;
pub mod company;
pub mod dashboard;

pub use buildings::{buildings_page, buildings_table, BuildingsVm};
pub use companies::{companies_page, companies_table};
pub use company::company_page;
pub use dashboard::dashboard_page;
