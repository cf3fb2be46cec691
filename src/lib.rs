//! # word2csv
//!
//! Flatten Word (DOCX) documents into CSV rows.
//!
//! Every heading, body paragraph and table row of a document becomes one
//! row, followed by rows for the comments and footnotes anchored in it.
//! Headings are numbered by their outline level ("2.1.3") and that chapter
//! context is carried down to the rows beneath them.
//!
//! ## Quick Start
//!
//! ```no_run
//! use word2csv::{convert_file, convert_to_csv, CsvOptions};
//!
//! // Rows in memory
//! let rows = convert_file("requirements.docx")?;
//! for row in &rows {
//!     println!("{:?} {}", row.row_type, row.text.as_deref().unwrap_or(""));
//! }
//!
//! // Straight to out/requirements.docx.csv
//! let path = convert_to_csv("requirements.docx", "out", &CsvOptions::default())?;
//! println!("Wrote {}", path.display());
//! # Ok::<(), word2csv::Error>(())
//! ```
//!
//! ## Row order
//!
//! Rows follow the body in document order. For each top-level node the
//! primary row (heading, paragraph, or one per table row) comes first, then
//! its comment rows, then its footnote rows.
//!
//! ## Anchor text
//!
//! The Text of a comment or footnote row is the text it is attached to. Runs
//! are concatenated as written, so the spacing inside the anchor is kept
//! ("system shall", not "systemshall"); only the ends are trimmed. Table row
//! text puts `|` between every text run of the row.

pub mod container;
pub mod convert;
pub mod detect;
pub mod docx;
pub mod error;
pub mod model;
pub mod outline;
pub mod render;

// Re-exports
pub use container::OoxmlContainer;
pub use convert::{document_name, output_path_for, Converter};
pub use detect::is_docx_path;
pub use error::{Error, Result};
pub use model::{forward_fill, Row, RowType, COLUMNS};
pub use outline::OutlineCounter;
pub use render::CsvOptions;

use std::path::{Path, PathBuf};

/// Convert a document file into rows.
///
/// # Example
///
/// ```no_run
/// let rows = word2csv::convert_file("design.docx")?;
/// println!("{} rows", rows.len());
/// # Ok::<(), word2csv::Error>(())
/// ```
pub fn convert_file(path: impl AsRef<Path>) -> Result<Vec<Row>> {
    Converter::open(path)?.convert()
}

/// Convert package bytes into rows, naming the document `name`.
pub fn convert_bytes(data: &[u8], name: &str) -> Result<Vec<Row>> {
    Converter::from_bytes(data.to_vec(), name)?.convert()
}

/// Convert a document and write `<file name>.csv` into `out_dir`.
///
/// Returns the path of the written file.
pub fn convert_to_csv(
    path: impl AsRef<Path>,
    out_dir: impl AsRef<Path>,
    options: &CsvOptions,
) -> Result<PathBuf> {
    let rows = convert_file(path.as_ref())?;
    let output = output_path_for(path.as_ref(), out_dir);
    render::write_file(&rows, &output, options)?;
    Ok(output)
}
