//! WordprocessingML (.docx) reading.
//!
//! `styles` and `notes` load the lookup tables once per document with a
//! streaming reader; `extract` walks the body tree and produces rows.

pub mod extract;
pub mod notes;
pub mod styles;
pub mod xml;

pub use extract::{classify, paragraph_ref, ConversionContext, NodeKind, MARKER_STYLE};
pub use notes::{NoteEntry, NoteKind, NoteTable};
pub use styles::{StyleEntry, StyleIndex};
