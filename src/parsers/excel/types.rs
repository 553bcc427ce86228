use std::fmt::{self, Display, Formatter};

use calamine::{Data, DataType};
use chrono::NaiveDate;
use num_traits::FromPrimitive;
use rust_decimal::Decimal;

/// Date cell of a transaction row.
///
/// Santander writes dates as `DD/MM/YYYY` text, but a re-saved workbook may
/// hold real date cells instead. Text that does not match the layout's
/// pattern is kept verbatim rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetDate {
    Parsed(NaiveDate),
    Raw(String),
}

impl SheetDate {
    /// Reads a date cell. Returns `None` when the cell is blank, which marks
    /// a row that is not a transaction.
    pub fn from_cell(cell: &Data, format: &str) -> Option<Self> {
        match cell {
            Data::Empty | Data::Error(_) => None,
            Data::String(s) if s.trim().is_empty() => None,
            Data::String(s) => Some(Self::from_text(s, format)),
            Data::DateTime(_) | Data::DateTimeIso(_) => Some(
                cell.as_date()
                    .map(SheetDate::Parsed)
                    .unwrap_or_else(|| SheetDate::Raw(cell.to_string())),
            ),
            other => Some(SheetDate::Raw(other.to_string())),
        }
    }

    pub fn from_text(text: &str, format: &str) -> Self {
        NaiveDate::parse_from_str(text.trim(), format)
            .map(SheetDate::Parsed)
            .unwrap_or_else(|_| SheetDate::Raw(text.to_string()))
    }

    pub fn is_parsed(&self) -> bool {
        matches!(self, SheetDate::Parsed(_))
    }
}

/// Formats as `MM/DD/YYYY`, or the untouched source text.
impl Display for SheetDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SheetDate::Parsed(date) => write!(f, "{}", date.format("%m/%d/%Y")),
            SheetDate::Raw(text) => f.write_str(text),
        }
    }
}

impl From<NaiveDate> for SheetDate {
    fn from(value: NaiveDate) -> Self {
        Self::Parsed(value)
    }
}

/// Numeric value of an amount cell, `None` when the cell is not a number.
pub fn coerce_amount(cell: &Data) -> Option<Decimal> {
    match cell {
        Data::Int(n) => Some(Decimal::from(*n)),
        Data::Float(n) => Decimal::from_f64(*n),
        Data::String(s) => {
            let s = s.trim();
            s.parse::<Decimal>()
                .or_else(|_| Decimal::from_scientific(s))
                .ok()
        }
        _ => None,
    }
}

/// Text of a cell with surrounding whitespace removed.
pub fn coerce_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        other => other.to_string().trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::CellErrorType;
    use rstest::rstest;
    use std::str::FromStr;

    const FORMAT: &str = "%d/%m/%Y";

    #[rstest]
    #[case("25/12/2023", "12/25/2023")]
    #[case("01/02/2024", "02/01/2024")]
    #[case("15/06/2024", "06/15/2024")]
    #[case("29/02/2024", "02/29/2024")]
    #[case(" 31/01/2025 ", "01/31/2025")]
    fn test_text_dates_are_reordered(#[case] input: &str, #[case] expected: &str) {
        let date = SheetDate::from_text(input, FORMAT);
        assert!(date.is_parsed());
        assert_eq!(date.to_string(), expected);
    }

    #[rstest]
    #[case("N/A")]
    #[case("2024-01-02")]
    #[case("32/01/2024")]
    #[case("29/02/2023")] // 2023 is not a leap year
    #[case("Saldo final")]
    fn test_unparseable_dates_pass_through(#[case] input: &str) {
        let date = SheetDate::from_text(input, FORMAT);
        assert_eq!(date, SheetDate::Raw(input.to_string()));
        assert_eq!(date.to_string(), input);
    }

    #[test]
    fn test_raw_text_keeps_surrounding_whitespace() {
        let date = SheetDate::from_text("  pending ", FORMAT);
        assert_eq!(date.to_string(), "  pending ");
    }

    #[rstest]
    #[case(Data::Empty)]
    #[case(Data::String(String::new()))]
    #[case(Data::String("   ".to_string()))]
    #[case(Data::Error(CellErrorType::NA))]
    fn test_blank_date_cells(#[case] cell: Data) {
        assert_eq!(SheetDate::from_cell(&cell, FORMAT), None);
    }

    #[test]
    fn test_numeric_date_cell_passes_through_as_text() {
        let date = SheetDate::from_cell(&Data::Float(45000.0), FORMAT).unwrap();
        assert_eq!(date, SheetDate::Raw("45000".to_string()));
    }

    #[test]
    fn test_iso_date_cell_is_parsed() {
        let cell = Data::DateTimeIso("2024-03-09T00:00:00".to_string());
        let date = SheetDate::from_cell(&cell, FORMAT).unwrap();
        assert_eq!(date.to_string(), "03/09/2024");
    }

    #[test]
    fn test_from_naive_date() {
        let date: SheetDate = NaiveDate::from_ymd_opt(2024, 7, 4).unwrap().into();
        assert_eq!(date.to_string(), "07/04/2024");
    }

    #[rstest]
    #[case(Data::Float(-42.5), Some("-42.5"))]
    #[case(Data::Float(100.0), Some("100"))]
    #[case(Data::Int(-7), Some("-7"))]
    #[case(Data::String(" -42.50 ".to_string()), Some("-42.50"))]
    #[case(Data::String("1.5e2".to_string()), Some("150"))]
    #[case(Data::String("abc".to_string()), None)]
    #[case(Data::String("1,234.56".to_string()), None)]
    #[case(Data::Float(f64::NAN), None)]
    #[case(Data::Bool(true), None)]
    #[case(Data::Empty, None)]
    fn test_coerce_amount(#[case] cell: Data, #[case] expected: Option<&str>) {
        let expected = expected.map(|s| Decimal::from_str(s).unwrap());
        assert_eq!(coerce_amount(&cell), expected);
    }

    #[rstest]
    #[case(Data::String("  ACME CORP  ".to_string()), "ACME CORP")]
    #[case(Data::String("Compra  Tienda".to_string()), "Compra  Tienda")]
    #[case(Data::Empty, "")]
    #[case(Data::Int(1234), "1234")]
    fn test_coerce_text(#[case] cell: Data, #[case] expected: &str) {
        assert_eq!(coerce_text(&cell), expected);
    }
}
