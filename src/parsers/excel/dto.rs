use calamine::Data;
use rust_decimal::Decimal;

use super::types::{SheetDate, coerce_amount, coerce_text};
use crate::layout::Layout;

/// One transaction row read positionally from the sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetTransaction {
    pub date: SheetDate,
    pub payee: String,
    /// Signed amount; `None` when the cell could not be read as a number.
    pub amount: Option<Decimal>,
}

impl SheetTransaction {
    /// Reads a row with the layout's column positions. Rows without a date
    /// (balance lines, footers) yield `None`.
    pub(super) fn from_row(row: &[Data], layout: &Layout) -> Option<Self> {
        let cell = |index: usize| row.get(index).unwrap_or(&Data::Empty);

        let date = SheetDate::from_cell(cell(layout.date_column), layout.date_format)?;

        Some(SheetTransaction {
            date,
            payee: coerce_text(cell(layout.payee_column)),
            amount: coerce_amount(cell(layout.amount_column)),
        })
    }
}
