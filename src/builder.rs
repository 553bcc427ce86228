use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{errors::ConvertError, layout::Layout, parsers::prelude::*, types::YnabTransaction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Xls,
    Xlsx,
}

impl FileFormat {
    /// Maps a file extension (case-insensitive, without the dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        if ext.eq_ignore_ascii_case("xls") {
            Some(FileFormat::Xls)
        } else if ext.eq_ignore_ascii_case("xlsx") {
            Some(FileFormat::Xlsx)
        } else {
            None
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            FileFormat::Xls => "xls",
            FileFormat::Xlsx => "xlsx",
        }
    }

    fn parse_raw(
        &self,
        content: &[u8],
        layout: &Layout,
    ) -> Result<Vec<SheetTransaction>, ConvertError> {
        match self {
            FileFormat::Xls => XlsParser::parse(content, layout),
            FileFormat::Xlsx => XlsxParser::parse(content, layout),
        }
        .map_err(ConvertError::InputFormat)
    }

    fn parse(&self, content: &[u8], layout: &Layout) -> Result<Vec<YnabTransaction>, ConvertError> {
        Ok(self
            .parse_raw(content, layout)?
            .into_iter()
            .map(YnabTransaction::from)
            .collect())
    }

    /// Content signatures win over the file name, so a mislabelled export
    /// still opens with the right reader.
    fn detect(filename: Option<&str>, content: Option<&[u8]>) -> Result<Self, ConvertError> {
        if let Some(content) = content {
            if XlsxParser::is_supported(None, content) {
                return Ok(FileFormat::Xlsx);
            }
            if XlsParser::is_supported(None, content) {
                return Ok(FileFormat::Xls);
            }
        }

        if XlsxParser::is_supported(filename, &[]) {
            return Ok(FileFormat::Xlsx);
        }
        if XlsParser::is_supported(filename, &[]) {
            return Ok(FileFormat::Xls);
        }

        Err(ConvertError::InputFormat(
            "not an Excel workbook (.xls or .xlsx)".to_string(),
        ))
    }
}

/// Entry point of the conversion: spreadsheet in, YNAB rows out.
///
/// ```rust,ignore
/// use santander_ynab::ConverterBuilder;
///
/// let transactions = ConverterBuilder::new()
///     .filename("movimientos.xlsx")
///     .convert()?;
/// ```
#[derive(Default)]
pub struct ConverterBuilder {
    content: Option<Vec<u8>>,
    filepath: Option<PathBuf>,
    format: Option<FileFormat>,
    layout: Layout,
}

impl ConverterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(mut self, content: &[u8]) -> Self {
        self.content = Some(content.to_vec());
        self
    }

    pub fn filename(mut self, filename: impl AsRef<Path>) -> Self {
        self.filepath = Some(filename.as_ref().to_path_buf());
        self
    }

    pub fn format(mut self, format: FileFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn convert(self) -> Result<Vec<YnabTransaction>, ConvertError> {
        let content = match self.content {
            Some(content) => content,
            None => {
                let path = self
                    .filepath
                    .as_deref()
                    .ok_or(ConvertError::MissingContentAndFilepath)?;
                fs::read(path)?
            }
        };

        let filename = self
            .filepath
            .as_deref()
            .and_then(Path::file_name)
            .and_then(|name| name.to_str());

        let format = self
            .format
            .map(Ok)
            .unwrap_or_else(|| FileFormat::detect(filename, Some(content.as_slice())))?;

        debug!(?format, layout = self.layout.name, bytes = content.len(), "converting workbook");
        format.parse(&content, &self.layout)
    }
}

/// Converts the spreadsheet at `path` with the Santander layout.
pub fn convert_file(path: impl AsRef<Path>) -> Result<Vec<YnabTransaction>, ConvertError> {
    ConverterBuilder::new().filename(path).convert()
}
