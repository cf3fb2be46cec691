//! Output row records.

use serde::{Deserialize, Serialize};

/// What a row represents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowType {
    /// A paragraph whose style carries an outline level
    Heading,
    /// A body paragraph or one table row
    #[default]
    Paragraph,
    /// A comment anchored in the preceding primary row
    Comment,
    /// A footnote referenced from the preceding primary row
    Footnote,
}

impl RowType {
    /// Label written to the Type column.
    pub fn as_str(&self) -> &'static str {
        match self {
            RowType::Heading => "Heading",
            RowType::Paragraph => "Paragraph",
            RowType::Comment => "Comment",
            RowType::Footnote => "Footnote",
        }
    }
}

impl std::fmt::Display for RowType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of the flattened document.
///
/// Field order is the CSV column order. The serialized names are the CSV
/// header names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Row {
    /// Position of the source node among the body's top-level children
    pub index: usize,

    /// File name of the source document
    pub document: Option<String>,

    /// Dotted outline path of the owning heading, e.g. "2.1.3"
    pub chapter_outline: Option<String>,

    /// Text of the owning heading
    pub chapter_name: Option<String>,

    /// Bracketed reference tag found at the start of the text, e.g. "[3.1.3]"
    pub paragraph_ref: Option<String>,

    /// Never populated; kept so the column layout stays stable
    pub page: Option<String>,

    #[serde(rename = "Type")]
    pub row_type: RowType,

    /// Comment ID, or the per-document footnote sequence number
    #[serde(rename = "ID")]
    pub id: Option<String>,

    pub text: Option<String>,

    /// Comment or footnote body
    pub metatext: Option<String>,

    pub author: Option<String>,
}

/// CSV header, in column order.
pub const COLUMNS: [&str; 11] = [
    "Index",
    "Document",
    "ChapterOutline",
    "ChapterName",
    "ParagraphRef",
    "Page",
    "Type",
    "ID",
    "Text",
    "Metatext",
    "Author",
];

impl Row {
    /// Start a row for the body node at `index` of `document`.
    pub fn new(index: usize, document: impl Into<String>) -> Self {
        Self {
            index,
            document: Some(document.into()),
            ..Default::default()
        }
    }

    /// Set the row type.
    pub fn with_type(mut self, row_type: RowType) -> Self {
        self.row_type = row_type;
        self
    }

    /// Set the row text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

/// Propagate the last non-empty Document, ChapterOutline and ChapterName
/// down through rows that lack them.
///
/// Rows before the first value in a column stay empty.
pub fn forward_fill(rows: &mut [Row]) {
    let mut document: Option<String> = None;
    let mut outline: Option<String> = None;
    let mut chapter: Option<String> = None;

    for row in rows.iter_mut() {
        fill(&mut row.document, &mut document);
        fill(&mut row.chapter_outline, &mut outline);
        fill(&mut row.chapter_name, &mut chapter);
    }
}

fn fill(cell: &mut Option<String>, last: &mut Option<String>) {
    match cell.as_deref() {
        Some(value) if !value.is_empty() => *last = cell.clone(),
        _ => {
            if last.is_some() {
                *cell = last.clone();
            }
        }
    }
}
