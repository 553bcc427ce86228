mod dto;
mod parser;
mod types;

pub mod prelude {
    pub use super::dto::SheetTransaction;
    pub use super::parser::{XlsParser, XlsxParser};
    pub use super::types::{SheetDate, coerce_amount, coerce_text};
}
