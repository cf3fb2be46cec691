//! Row output.
//!
//! This module writes converted rows as CSV.

pub mod csv;
mod options;

pub use self::csv::{to_csv_string, write_file, write_rows};
pub use options::CsvOptions;
