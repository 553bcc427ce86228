//! Conversion of the export sitting in a directory, as run by the
//! `santander-ynab` binary.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::builder::{FileFormat, convert_file};
use crate::errors::{ConvertError, ConvertResult};
use crate::writer::write_csv_file;

/// Spreadsheets found in a directory: the one to convert and the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discovery {
    pub selected: PathBuf,
    pub ignored: Vec<PathBuf>,
}

impl Discovery {
    /// Every discovered file, the selected one first.
    pub fn all(&self) -> impl Iterator<Item = &Path> {
        std::iter::once(self.selected.as_path()).chain(self.ignored.iter().map(PathBuf::as_path))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub input: PathBuf,
    pub output: PathBuf,
    pub transactions: usize,
}

/// Finds `.xls` and `.xlsx` files in `dir`.
///
/// Order is deterministic: `.xls` files by name, then `.xlsx` files by name.
/// The first one is selected.
pub fn discover_input(dir: &Path) -> ConvertResult<Discovery> {
    let mut xls = Vec::new();
    let mut xlsx = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        match path
            .extension()
            .and_then(OsStr::to_str)
            .and_then(FileFormat::from_extension)
        {
            Some(FileFormat::Xls) => xls.push(path),
            Some(FileFormat::Xlsx) => xlsx.push(path),
            None => {}
        }
    }

    xls.sort();
    xlsx.sort();
    let mut found = xls.into_iter().chain(xlsx);

    let selected = found
        .next()
        .ok_or_else(|| ConvertError::NoInputFound(dir.to_path_buf()))?;
    let ignored: Vec<_> = found.collect();
    debug!(selected = %selected.display(), ignored = ignored.len(), "discovered input");

    Ok(Discovery { selected, ignored })
}

/// `<stem>_ynab.csv` next to `input`.
pub fn output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{}_ynab.csv", stem))
}

/// Converts `input` and writes the CSV beside it. Nothing is written when
/// the conversion fails.
pub fn convert_to_csv(input: &Path) -> ConvertResult<Summary> {
    let transactions = convert_file(input)?;
    let output = output_path(input);
    write_csv_file(&output, &transactions)?;

    info!(input = %input.display(), output = %output.display(), rows = transactions.len(), "conversion complete");

    Ok(Summary {
        input: input.to_path_buf(),
        output,
        transactions: transactions.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::sample_export;
    use tempfile::TempDir;

    fn dir_with(files: &[&str]) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        for name in files {
            fs::write(dir.path().join(name), sample_export()).unwrap();
        }
        dir
    }

    fn names(paths: impl IntoIterator<Item = impl AsRef<Path>>) -> Vec<String> {
        paths
            .into_iter()
            .map(|p| p.as_ref().file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_discover_single_file() {
        let dir = dir_with(&["movimientos.xlsx", "notes.txt", "old_ynab.csv"]);
        let discovery = discover_input(dir.path()).unwrap();

        assert_eq!(names([&discovery.selected]), ["movimientos.xlsx"]);
        assert!(discovery.ignored.is_empty());
    }

    #[test]
    fn test_discover_order_is_xls_then_xlsx() {
        let dir = dir_with(&["b.xlsx", "a.xlsx", "z.xls", "c.XLS"]);
        let discovery = discover_input(dir.path()).unwrap();

        assert_eq!(names(discovery.all()), ["c.XLS", "z.xls", "a.xlsx", "b.xlsx"]);
        assert_eq!(names([&discovery.selected]), ["c.XLS"]);
        assert_eq!(discovery.ignored.len(), 3);
    }

    #[test]
    fn test_discover_skips_directories() {
        let dir = dir_with(&["real.xlsx"]);
        fs::create_dir(dir.path().join("folder.xls")).unwrap();

        let discovery = discover_input(dir.path()).unwrap();
        assert_eq!(names(discovery.all()), ["real.xlsx"]);
    }

    #[test]
    fn test_discover_nothing() {
        let dir = dir_with(&["notes.txt"]);
        let result = discover_input(dir.path());
        assert!(matches!(result, Err(ConvertError::NoInputFound(_))));
    }

    #[test]
    fn test_output_path() {
        assert_eq!(
            output_path(Path::new("/data/movimientos.xlsx")),
            PathBuf::from("/data/movimientos_ynab.csv")
        );
        assert_eq!(
            output_path(Path::new("export.2024.xls")),
            PathBuf::from("export.2024_ynab.csv")
        );
    }

    #[test]
    fn test_convert_to_csv_writes_beside_input() {
        let dir = dir_with(&["movimientos.xlsx"]);
        let input = dir.path().join("movimientos.xlsx");

        let summary = convert_to_csv(&input).unwrap();

        assert_eq!(summary.transactions, 2);
        assert_eq!(summary.output, dir.path().join("movimientos_ynab.csv"));
        let csv = fs::read_to_string(&summary.output).unwrap();
        assert_eq!(
            csv,
            "Date,Payee,Memo,Outflow,Inflow\n\
             02/01/2024,ACME CORP,,42.5,\n\
             06/15/2024,NOMINA EMPRESA SL,,,100.0\n"
        );
    }

    #[test]
    fn test_convert_to_csv_twice_is_identical() {
        let dir = dir_with(&["movimientos.xlsx"]);
        let input = dir.path().join("movimientos.xlsx");

        let first = fs::read(convert_to_csv(&input).unwrap().output).unwrap();
        let second = fs::read(convert_to_csv(&input).unwrap().output).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_convert_to_csv_bad_input_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("broken.xlsx");
        fs::write(&input, "this is not a spreadsheet").unwrap();

        let result = convert_to_csv(&input);

        assert!(matches!(result, Err(ConvertError::InputFormat(_))));
        assert!(!dir.path().join("broken_ynab.csv").exists());
    }
}
