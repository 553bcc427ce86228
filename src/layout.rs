/// Where the transactions live inside a bank's spreadsheet export.
///
/// Exports are loosely structured: a block of account metadata comes first,
/// then one transaction per row. Nothing in the file marks where the
/// metadata ends, so the offset and the column positions are fixed per
/// known layout instead of being guessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub name: &'static str,
    /// Sheet rows skipped before the first transaction row.
    pub preamble_rows: u32,
    pub date_column: usize,
    pub payee_column: usize,
    pub amount_column: usize,
    /// `chrono` pattern for textual date cells.
    pub date_format: &'static str,
}

impl Layout {
    /// Santander account history export: 7 metadata rows, then
    /// `date | description | signed amount`.
    pub const SANTANDER_V1: Layout = Layout {
        name: "santander-v1",
        preamble_rows: 7,
        date_column: 0,
        payee_column: 1,
        amount_column: 2,
        date_format: "%d/%m/%Y",
    };

    /// Minimum number of columns a sheet needs for this layout.
    pub fn min_width(&self) -> usize {
        self.date_column
            .max(self.payee_column)
            .max(self.amount_column)
            + 1
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::SANTANDER_V1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_santander_v1() {
        assert_eq!(Layout::default(), Layout::SANTANDER_V1);
    }

    #[test]
    fn test_santander_v1_shape() {
        let layout = Layout::SANTANDER_V1;
        assert_eq!(layout.preamble_rows, 7);
        assert_eq!(layout.min_width(), 3);
    }

    #[test]
    fn test_min_width_uses_rightmost_column() {
        let layout = Layout {
            amount_column: 5,
            ..Layout::SANTANDER_V1
        };
        assert_eq!(layout.min_width(), 6);
    }
}
