//! Reads generated workbooks back with calamine and checks sheet layout.

use std::io::Cursor;

use calamine::{open_workbook_from_rs, Data, Range, Reader, Xlsx};
use kwr_core::{CompanyInfo, CompanyInfoRow, KeywordRecord};
use kwr_report::build_workbook;
use kwr_report::export::{company_table_row, SHEET_ALL, SHEET_FILTERED};

fn record(keyword: &str, pc: i64, mobile: i64, comp: Option<f64>) -> KeywordRecord {
    KeywordRecord::new(keyword, pc, mobile, "강릉맛집")
        .with_competition(comp, comp.map(|_| "낮음".to_string()))
}

fn company() -> CompanyInfo {
    CompanyInfo {
        rows: vec![
            CompanyInfoRow {
                label: "회사명".to_string(),
                value: "테스트 상사".to_string(),
            },
            CompanyInfoRow {
                label: "비고".to_string(),
                value: "자동 생성".to_string(),
            },
        ],
    }
}

fn open(bytes: Vec<u8>) -> Xlsx<Cursor<Vec<u8>>> {
    open_workbook_from_rs(Cursor::new(bytes)).expect("workbook should parse")
}

fn text(range: &Range<Data>, row: usize, col: usize) -> Option<String> {
    let pos = (
        u32::try_from(row).expect("row fits"),
        u32::try_from(col).expect("col fits"),
    );
    match range.get_value(pos) {
        Some(Data::String(s)) => Some(s.clone()),
        _ => None,
    }
}

fn number(range: &Range<Data>, row: u32, col: u32) -> Option<f64> {
    match range.get_value((row, col)) {
        Some(Data::Float(f)) => Some(*f),
        #[allow(clippy::cast_precision_loss)]
        Some(Data::Int(i)) => Some(*i as f64),
        _ => None,
    }
}

fn is_blank(range: &Range<Data>, row: u32, col: u32) -> bool {
    matches!(range.get_value((row, col)), None | Some(Data::Empty))
}

/// Asserts the company table sits at `company_table_row(records)` with a
/// blank row above it.
fn assert_company_table(range: &Range<Data>, records: usize) {
    let start = company_table_row(records);
    let blank = u32::try_from(start - 1).expect("row fits");
    assert!(is_blank(range, blank, 0), "row {blank} should be blank");
    assert_eq!(text(range, start, 0).as_deref(), Some("항목"));
    assert_eq!(text(range, start, 1).as_deref(), Some("내용"));
    assert_eq!(text(range, start + 1, 0).as_deref(), Some("회사명"));
    assert_eq!(text(range, start + 1, 1).as_deref(), Some("테스트 상사"));
    assert_eq!(text(range, start + 2, 0).as_deref(), Some("비고"));
    assert_eq!(text(range, start + 2, 1).as_deref(), Some("자동 생성"));
    assert_eq!(
        range.end().map(|(row, _)| row),
        Some(u32::try_from(start + 2).expect("row fits"))
    );
}

#[test]
fn workbook_has_both_sheets_with_records_and_company_table() {
    let all = vec![
        record("강릉 순두부", 200, 100, Some(0.6)),
        record("강릉 중앙시장", 80, 40, Some(0.3)),
        record("강릉 빵집", 10, 5, None),
    ];
    let filtered = vec![all[0].clone()];

    let bytes = build_workbook(&all, &filtered, &company()).expect("workbook");
    let mut workbook = open(bytes);

    assert_eq!(
        workbook.sheet_names(),
        vec![SHEET_ALL.to_string(), SHEET_FILTERED.to_string()]
    );

    let sheet = workbook.worksheet_range(SHEET_ALL).expect("all sheet");
    assert_eq!(text(&sheet, 0, 0).as_deref(), Some("키워드"));
    assert_eq!(text(&sheet, 0, 7).as_deref(), Some("기준 키워드 출처"));
    assert_eq!(text(&sheet, 1, 0).as_deref(), Some("강릉 순두부"));
    assert_eq!(number(&sheet, 1, 3), Some(300.0));
    assert_eq!(text(&sheet, 3, 0).as_deref(), Some("강릉 빵집"));
    // null competition and depth stay empty
    assert!(is_blank(&sheet, 3, 4));
    assert!(is_blank(&sheet, 3, 5));
    assert!(is_blank(&sheet, 3, 6));
    assert_company_table(&sheet, all.len());

    let sheet = workbook
        .worksheet_range(SHEET_FILTERED)
        .expect("filtered sheet");
    assert_eq!(text(&sheet, 0, 0).as_deref(), Some("키워드"));
    assert_eq!(text(&sheet, 1, 0).as_deref(), Some("강릉 순두부"));
    assert_eq!(number(&sheet, 1, 5), Some(0.6));
    assert_company_table(&sheet, filtered.len());
}

#[test]
fn empty_filtered_sheet_still_carries_header_and_company_table() {
    let all = vec![record("강릉 빵집", 10, 5, Some(0.9))];

    let bytes = build_workbook(&all, &[], &company()).expect("workbook");
    let mut workbook = open(bytes);

    let sheet = workbook
        .worksheet_range(SHEET_FILTERED)
        .expect("filtered sheet");
    assert_eq!(text(&sheet, 0, 0).as_deref(), Some("키워드"));
    assert!(is_blank(&sheet, 1, 0));
    assert_company_table(&sheet, 0);
}
