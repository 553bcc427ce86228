//! Convert Santander Excel transaction exports into YNAB-importable CSV.
//!
//! ```rust,ignore
//! use santander_ynab::{ConverterBuilder, write_csv_file};
//!
//! let transactions = ConverterBuilder::new()
//!     .filename("movimientos.xlsx")
//!     .convert()?;
//! write_csv_file("movimientos_ynab.csv".as_ref(), &transactions)?;
//! ```

mod builder;
mod layout;
mod types;
mod writer;

pub mod cli;
pub mod errors;
pub mod logging;
pub mod parsers;
pub mod web;


pub use builder::{ConverterBuilder, FileFormat, convert_file};
pub use errors::{ConvertError, ConvertResult};
pub use layout::Layout;
pub use parsers::prelude::*;
pub use types::{YNAB_HEADERS, YnabTransaction, format_amount};
pub use writer::{write_csv, write_csv_file};
