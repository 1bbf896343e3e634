use crate::errors::ServerError;
use crate::listing::format::{account_type_label, format_date, format_phone};
use crate::responses::xlsx_response;
use crate::responses::ResultResp;
use crate::service::BuildingRecord;
use rust_xlsxwriter::{Workbook, Worksheet};

const HEADERS: [&str; 13] = [
    "ID",
    "Адрес",
    "Регион",
    "Код МКД",
    "Площадь, м²",
    "Баланс ФКР, ₽",
    "Лифтов",
    "Ближайшая замена",
    "УК",
    "Директор",
    "Телефон",
    "Email",
    "Владелец спецсчёта",
];

pub fn export_buildings_xlsx(rows: &[BuildingRecord], page: u32) -> ResultResp {
    let buffer = buildings_workbook(rows)?;
    xlsx_response(buffer, &format!("buildings_page_{page}.xlsx"))
}

/// Numbers stay numeric so the sheet can be summed; text columns use the
/// same formatting as the table.
pub fn buildings_workbook(rows: &[BuildingRecord]) -> Result<Vec<u8>, ServerError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, *header)
            .map_err(|e| {
                ServerError::XlsxError(format!("Failed to write header '{}': {}", header, e))
            })?;
    }

    for (i, b) in rows.iter().enumerate() {
        let r = (i + 1) as u32;

        worksheet
            .write_number(r, 0, b.id as f64)
            .map_err(|e| ServerError::XlsxError(format!("Failed to write id: {}", e)))?;

        write_text(worksheet, r, 1, b.address.as_deref().unwrap_or(""))?;
        write_text(worksheet, r, 2, b.region.as_deref().unwrap_or(""))?;
        write_text(worksheet, r, 3, b.building_code.as_deref().unwrap_or(""))?;

        if let Some(area) = b.total_area {
            worksheet
                .write_number(r, 4, area)
                .map_err(|e| ServerError::XlsxError(format!("Failed to write area: {}", e)))?;
        }

        worksheet
            .write_number(r, 5, b.balance.unwrap_or(0.0))
            .map_err(|e| ServerError::XlsxError(format!("Failed to write balance: {}", e)))?;

        if let Some(lifts) = b.lifts_count {
            worksheet
                .write_number(r, 6, f64::from(lifts))
                .map_err(|e| ServerError::XlsxError(format!("Failed to write lifts: {}", e)))?;
        }

        write_text(worksheet, r, 7, &format_date(b.nearest_replacement_date))?;
        write_text(worksheet, r, 8, b.company_name.as_deref().unwrap_or(""))?;
        write_text(worksheet, r, 9, b.director_name.as_deref().unwrap_or(""))?;
        write_text(worksheet, r, 10, &format_phone(b.phone.as_deref()))?;
        write_text(worksheet, r, 11, b.email.as_deref().unwrap_or(""))?;
        write_text(worksheet, r, 12, account_type_label(b.owner_type.as_deref()))?;
    }

    workbook
        .save_to_buffer()
        .map_err(|e| ServerError::XlsxError(format!("Failed to save workbook: {}", e)))
}

fn write_text(worksheet: &mut Worksheet, row: u32, col: u16, text: &str) -> Result<(), ServerError> {
    worksheet
        .write_string(row, col, text)
        .map_err(|e| ServerError::XlsxError(format!("Failed to write column {}: {}", col, e)))?;
    Ok(())
}
