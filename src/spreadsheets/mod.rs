pub mod export_xlsx;

pub use export_xlsx::{buildings_workbook, export_buildings_xlsx};
