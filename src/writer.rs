use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::{Terminator, WriterBuilder};
use tracing::debug;

use crate::errors::ConvertResult;
use crate::types::{YNAB_HEADERS, YnabTransaction};

/// Writes `transactions` as a YNAB import CSV. The header row is always
/// written, even when there are no transactions.
pub fn write_csv<W: Write>(writer: W, transactions: &[YnabTransaction]) -> ConvertResult<()> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    writer.write_record(YNAB_HEADERS)?;
    for txn in transactions {
        writer.serialize(txn)?;
    }
    writer.flush().map_err(csv::Error::from)?;

    Ok(())
}

pub fn write_csv_file(path: &Path, transactions: &[YnabTransaction]) -> ConvertResult<()> {
    let file = File::create(path)?;
    write_csv(file, transactions)?;
    debug!(path = %path.display(), rows = transactions.len(), "wrote csv");
    Ok(())
}
