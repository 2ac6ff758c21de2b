//! Spreadsheet export of a report's record tables.
//!
//! Two sheets are written, one for all records and one for the filtered
//! records. Each holds a header row and one row per record, then a blank row,
//! then the company-info table.

use chrono::NaiveDateTime;
use kwr_core::{CompanyInfo, KeywordRecord};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

pub const SHEET_ALL: &str = "전체 키워드";
pub const SHEET_FILTERED: &str = "필터 적용";
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

pub const RECORD_HEADERS: [&str; 8] = [
    "키워드",
    "PC 검색수",
    "모바일 검색수",
    "총 검색수",
    "평균 노출 광고수",
    "경쟁도",
    "경쟁도(텍스트)",
    "기준 키워드 출처",
];
pub const COMPANY_HEADERS: [&str; 2] = ["항목", "내용"];

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Blank,
}

/// Cell values for one record, in [`RECORD_HEADERS`] order.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn record_cells(record: &KeywordRecord) -> [Cell; 8] {
    let optional_number = |v: Option<f64>| v.map_or(Cell::Blank, Cell::Number);
    [
        Cell::Text(record.keyword.clone()),
        Cell::Number(record.pc_count as f64),
        Cell::Number(record.mobile_count as f64),
        Cell::Number(record.total_count as f64),
        optional_number(record.avg_ad_depth),
        optional_number(record.competition_score),
        record
            .competition_label
            .clone()
            .map_or(Cell::Blank, Cell::Text),
        Cell::Text(record.source_keyword.clone()),
    ]
}

/// Zero-based row where the company table header goes for `record_count`
/// data rows.
#[must_use]
pub fn company_table_row(record_count: usize) -> usize {
    record_count + 2
}

/// `{prefix}_{account}_{YYYY-MM-DD_HHMM}.xlsx`
#[must_use]
pub fn export_filename(prefix: &str, account: &str, at: NaiveDateTime) -> String {
    format!("{prefix}_{account}_{}.xlsx", at.format("%Y-%m-%d_%H%M"))
}

/// Renders both sheets into an in-memory `.xlsx` document.
///
/// # Errors
///
/// Returns [`XlsxError`] if a sheet cannot be written or the workbook cannot
/// be serialized.
pub fn build_workbook(
    all: &[KeywordRecord],
    filtered: &[KeywordRecord],
    company: &CompanyInfo,
) -> Result<Vec<u8>, XlsxError> {
    let header = Format::new().set_bold();
    let mut workbook = Workbook::new();
    workbook.push_worksheet(record_sheet(SHEET_ALL, all, company, &header)?);
    workbook.push_worksheet(record_sheet(SHEET_FILTERED, filtered, company, &header)?);
    workbook.save_to_buffer()
}

fn record_sheet(
    name: &str,
    records: &[KeywordRecord],
    company: &CompanyInfo,
    header: &Format,
) -> Result<Worksheet, XlsxError> {
    let mut sheet = Worksheet::new();
    sheet.set_name(name)?;

    for (col, title) in RECORD_HEADERS.iter().enumerate() {
        sheet.write_string_with_format(0, column(col)?, *title, header)?;
    }
    for (i, record) in records.iter().enumerate() {
        let row = row_index(i + 1)?;
        for (col, cell) in record_cells(record).iter().enumerate() {
            write_cell(&mut sheet, row, column(col)?, cell)?;
        }
    }

    let start = company_table_row(records.len());
    for (col, title) in COMPANY_HEADERS.iter().enumerate() {
        sheet.write_string_with_format(row_index(start)?, column(col)?, *title, header)?;
    }
    for (i, entry) in company.rows.iter().enumerate() {
        let row = row_index(start + 1 + i)?;
        sheet.write_string(row, 0, entry.label.as_str())?;
        sheet.write_string(row, 1, entry.value.as_str())?;
    }

    Ok(sheet)
}

fn write_cell(sheet: &mut Worksheet, row: u32, col: u16, cell: &Cell) -> Result<(), XlsxError> {
    match cell {
        Cell::Text(text) => {
            sheet.write_string(row, col, text.as_str())?;
        }
        Cell::Number(value) => {
            sheet.write_number(row, col, *value)?;
        }
        Cell::Blank => {}
    }
    Ok(())
}

fn row_index(row: usize) -> Result<u32, XlsxError> {
    u32::try_from(row).map_err(|_| XlsxError::RowColumnLimitError)
}

fn column(col: usize) -> Result<u16, XlsxError> {
    u16::try_from(col).map_err(|_| XlsxError::RowColumnLimitError)
}
