use std::ffi::OsStr;
use std::fmt::Display;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use calamine::{Data, Range, Reader, Xls, Xlsx, open_workbook_from_rs};
use tracing::debug;

use super::dto::SheetTransaction;
use crate::layout::Layout;
use crate::parsers::traits::Parser;

/// Zip local file header; every `.xlsx` starts with one.
const XLSX_SIGNATURE: &[u8] = b"PK\x03\x04";
/// OLE2 compound document header used by legacy `.xls`.
const XLS_SIGNATURE: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

pub struct XlsxParser;

impl Parser for XlsxParser {
    type Output = SheetTransaction;

    fn is_supported(filename: Option<&str>, content: &[u8]) -> bool {
        content.starts_with(XLSX_SIGNATURE) || has_extension(filename, "xlsx")
    }

    fn parse(content: &[u8], layout: &Layout) -> Result<Vec<Self::Output>, String> {
        let workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(content))
            .map_err(|e| format!("not a valid xlsx workbook: {}", e))?;
        read_transactions(workbook, layout)
    }
}

pub struct XlsParser;

impl Parser for XlsParser {
    type Output = SheetTransaction;

    fn is_supported(filename: Option<&str>, content: &[u8]) -> bool {
        content.starts_with(XLS_SIGNATURE) || has_extension(filename, "xls")
    }

    fn parse(content: &[u8], layout: &Layout) -> Result<Vec<Self::Output>, String> {
        let workbook: Xls<_> = open_workbook_from_rs(Cursor::new(content))
            .map_err(|e| format!("not a valid xls workbook: {}", e))?;
        read_transactions(workbook, layout)
    }
}

fn has_extension(filename: Option<&str>, expected: &str) -> bool {
    filename
        .and_then(|name| Path::new(name).extension())
        .and_then(OsStr::to_str)
        .is_some_and(|ext| ext.eq_ignore_ascii_case(expected))
}

fn read_transactions<R, RS>(mut workbook: R, layout: &Layout) -> Result<Vec<SheetTransaction>, String>
where
    RS: Read + Seek,
    R: Reader<RS>,
    R::Error: Display,
{
    let range = workbook
        .worksheet_range_at(0)
        .ok_or("workbook has no sheets")?
        .map_err(|e| format!("failed to read the first sheet: {}", e))?;

    transactions_from_range(&range, layout)
}

fn transactions_from_range(
    range: &Range<Data>,
    layout: &Layout,
) -> Result<Vec<SheetTransaction>, String> {
    if range.width() < layout.min_width() {
        return Err(format!(
            "expected at least {} columns, found {}",
            layout.min_width(),
            range.width()
        ));
    }

    // `rows()` starts at the first used row, not at row 1 of the sheet
    let first_row = range.start().map_or(0, |(row, _)| row);
    let skip = layout.preamble_rows.saturating_sub(first_row) as usize;

    let transactions: Vec<_> = range
        .rows()
        .skip(skip)
        .filter_map(|row| SheetTransaction::from_row(row, layout))
        .collect();

    let unparsed_dates = transactions.iter().filter(|t| !t.date.is_parsed()).count();
    debug!(
        layout = layout.name,
        rows = range.height().saturating_sub(skip),
        transactions = transactions.len(),
        unparsed_dates,
        "read transaction rows"
    );

    Ok(transactions)
}
