//! Upload validation and the per-request conversion with scratch files.

use std::ffi::OsStr;
use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::Builder;
use tracing::debug;

use crate::builder::{ConverterBuilder, FileFormat};
use crate::errors::ConvertResult;
use crate::writer::write_csv;

/// Why an upload was turned away before conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadRejection {
    NoFileUploaded,
    NoFileSelected,
    InvalidFileType,
}

impl UploadRejection {
    pub fn message(&self) -> &'static str {
        match self {
            UploadRejection::NoFileUploaded => "No file uploaded",
            UploadRejection::NoFileSelected => "No file selected",
            UploadRejection::InvalidFileType => {
                "Invalid file type. Please upload an Excel file (.xls or .xlsx)"
            }
        }
    }
}

/// Accepts only non-empty names ending in `.xls` or `.xlsx`.
pub fn check_filename(filename: &str) -> Result<FileFormat, UploadRejection> {
    if filename.is_empty() {
        return Err(UploadRejection::NoFileSelected);
    }
    filename
        .rsplit_once('.')
        .and_then(|(_, ext)| FileFormat::from_extension(ext))
        .ok_or(UploadRejection::InvalidFileType)
}

/// Reduces a client-supplied name to a safe base name: ASCII letters,
/// digits, `.`, `-` and `_` only, whitespace runs turned into `_`.
pub fn secure_filename(filename: &str) -> String {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or_default();
    base.split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect::<String>()
        .trim_matches(|c| c == '.' || c == '_')
        .to_string()
}

/// CSV produced for one upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedCsv {
    pub download_name: String,
    pub body: Vec<u8>,
    pub transactions: usize,
}

/// Converts an uploaded workbook through scratch files in `temp_dir`.
///
/// Both scratch files are uniquely named and removed before returning,
/// whether the conversion succeeds or not.
pub fn convert_upload(temp_dir: &Path, filename: &str, content: &[u8]) -> ConvertResult<ConvertedCsv> {
    let safe_name = secure_filename(filename);
    let stem = Path::new(&safe_name)
        .file_stem()
        .and_then(OsStr::to_str)
        .filter(|stem| !stem.is_empty())
        .unwrap_or("statement")
        .to_string();
    let extension = Path::new(&safe_name)
        .extension()
        .and_then(OsStr::to_str)
        .unwrap_or("xlsx")
        .to_ascii_lowercase();

    let mut input = Builder::new()
        .prefix("santander-upload-")
        .suffix(&format!(".{}", extension))
        .tempfile_in(temp_dir)?;
    input.write_all(content)?;
    input.flush()?;
    debug!(path = %input.path().display(), bytes = content.len(), "stored upload");

    let transactions = ConverterBuilder::new().filename(input.path()).convert()?;

    let mut output = Builder::new()
        .prefix(&format!("{}-", stem))
        .suffix("_ynab.csv")
        .tempfile_in(temp_dir)?;
    write_csv(output.as_file_mut(), &transactions)?;
    input.close()?;

    let body = fs::read(output.path())?;
    output.close()?;

    Ok(ConvertedCsv {
        download_name: format!("{}_ynab.csv", stem),
        body,
        transactions: transactions.len(),
    })
}
