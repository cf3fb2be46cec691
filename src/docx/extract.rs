//! Body walker: classifies top-level body nodes and turns them into rows.
//!
//! Every node yields at most one primary row (a heading or a paragraph) or,
//! for tables, one row per table row. Each primary row is immediately
//! followed by the comment rows and then the footnote rows found inside the
//! same source node.

use roxmltree::Node;

use super::notes::NoteTable;
use super::styles::StyleIndex;
use super::xml::{is_wml, joined_text, node_text, raw_text, wml_attr, wml_children, wml_descendants};
use crate::error::Result;
use crate::model::{Row, RowType};
use crate::outline::OutlineCounter;

/// Run style whose text replaces, rather than extends, a footnote anchor.
pub const MARKER_STYLE: &str = "DiagramShape";

/// Style name assumed for runs without a `w:rStyle`.
pub const DEFAULT_RUN_STYLE: &str = "Default";

/// Kind of a top-level body node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// `w:p`
    Paragraph,
    /// `w:tbl`
    Table,
    /// Anything else (`w:sectPr`, `w:sdt`, bookmarks, ...); produces no rows
    Other,
}

/// Classify a body child by its tag.
pub fn classify(node: Node) -> NodeKind {
    if is_wml(node, "p") {
        NodeKind::Paragraph
    } else if is_wml(node, "tbl") {
        NodeKind::Table
    } else {
        NodeKind::Other
    }
}

/// Extract a leading bracketed reference tag such as `[3.1.3]`.
///
/// Everything before the first `]` is searched for a `[`; the tag runs from
/// that `[` through the `]`. Text without a `]`, or whose first `]` has no
/// `[` before it, has no tag.
///
/// ```
/// use word2csv::docx::paragraph_ref;
///
/// assert_eq!(paragraph_ref(" [3.1.3] Test").as_deref(), Some("[3.1.3]"));
/// assert_eq!(paragraph_ref("Intro"), None);
/// assert_eq!(paragraph_ref("]no open["), None);
/// ```
pub fn paragraph_ref(text: &str) -> Option<String> {
    let text = text.trim();
    let close = text.find(']')?;
    let open = text[..close].find('[')?;
    Some(text[open..=close].to_string())
}

/// State of the footnote anchor scan.
#[derive(Debug, Clone, PartialEq, Eq)]
enum AnchorState {
    /// No run seen yet
    Empty,
    /// Accumulating runs of an ordinary style
    Plain(String),
    /// Accumulating runs of [`MARKER_STYLE`]
    Marker,
}

/// Re-segments the runs in front of a footnote reference by run style and
/// keeps only the text nearest the reference.
///
/// Consecutive runs of one style form a segment. Entering a marker-styled
/// segment discards the open segment; entering any other style pushes it onto
/// the finished segments. The anchor is the last finished segment followed by
/// the open one.
#[derive(Debug)]
struct FootnoteAnchor {
    state: AnchorState,
    finished: Vec<String>,
    open: String,
}

impl FootnoteAnchor {
    fn new() -> Self {
        Self {
            state: AnchorState::Empty,
            finished: Vec::new(),
            open: String::new(),
        }
    }

    fn feed(&mut self, style: &str, text: &str) {
        let is_marker = style == MARKER_STYLE;
        let same_segment = match &self.state {
            AnchorState::Empty => true,
            AnchorState::Plain(current) => current == style,
            AnchorState::Marker => is_marker,
        };

        if same_segment {
            self.open.push_str(text);
        } else if is_marker {
            self.open = text.to_string();
        } else {
            let previous = std::mem::replace(&mut self.open, text.to_string());
            if !previous.trim().is_empty() {
                self.finished.push(previous);
            }
        }

        self.state = if is_marker {
            AnchorState::Marker
        } else {
            AnchorState::Plain(style.to_string())
        };
    }

    fn finish(mut self) -> String {
        if self.state == AnchorState::Marker && !self.open.trim().is_empty() {
            self.finished.push(std::mem::take(&mut self.open));
        }
        let marked = match self.finished.pop() {
            Some(last) => last + &self.open,
            None => self.open,
        };
        marked.trim().to_string()
    }
}

/// Per-document state for one conversion.
///
/// Built fresh for every document so outline numbering, footnote sequence
/// numbers and note lookups never carry over between documents.
#[derive(Debug)]
pub struct ConversionContext {
    document: String,
    styles: StyleIndex,
    comments: NoteTable,
    footnotes: NoteTable,
    outline: OutlineCounter,
    footnote_seq: u32,
}

impl ConversionContext {
    /// Create a context for the document called `document`.
    pub fn new(
        document: impl Into<String>,
        styles: StyleIndex,
        comments: NoteTable,
        footnotes: NoteTable,
    ) -> Self {
        Self {
            document: document.into(),
            styles,
            comments,
            footnotes,
            outline: OutlineCounter::new(),
            footnote_seq: 0,
        }
    }

    /// Walk the element children of `w:body` in document order, appending
    /// rows to `rows`. `progress` is called with (nodes done, total nodes)
    /// after each node.
    pub fn walk_body(
        &mut self,
        body: Node,
        rows: &mut Vec<Row>,
        mut progress: impl FnMut(usize, usize),
    ) -> Result<()> {
        let nodes: Vec<Node> = body.children().filter(|n| n.is_element()).collect();
        let total = nodes.len();
        log::debug!("{}: {} body nodes", self.document, total);

        for (index, node) in nodes.into_iter().enumerate() {
            self.extract_node(index, node, rows)?;
            progress(index + 1, total);
        }
        Ok(())
    }

    /// Produce the rows for one top-level body node.
    pub fn extract_node(&mut self, index: usize, node: Node, rows: &mut Vec<Row>) -> Result<()> {
        match classify(node) {
            NodeKind::Paragraph => {
                let text = node_text(node);
                if text.is_empty() {
                    return Ok(());
                }
                let row = match self.heading_row(index, node, &text) {
                    Some(heading) => heading,
                    None => self.paragraph_row(index, text),
                };
                self.emit(row, node, rows)
            }
            NodeKind::Table => {
                for tr in wml_children(node, "tr") {
                    let row = self.paragraph_row(index, table_row_text(tr));
                    self.emit(row, tr, rows)?;
                }
                Ok(())
            }
            NodeKind::Other => Ok(()),
        }
    }

    /// A heading row if the paragraph style has an outline level.
    fn heading_row(&mut self, index: usize, node: Node, text: &str) -> Option<Row> {
        let style_id = wml_descendants(node, "pStyle")
            .filter_map(|s| wml_attr(s, "val"))
            .last()?;
        let level = self.styles.outline_level(style_id)?;
        let path = self.outline.advance(level);

        Some(Row {
            chapter_outline: Some(path),
            chapter_name: Some(text.to_string()),
            ..Row::new(index, self.document.as_str())
                .with_type(RowType::Heading)
                .with_text(text)
        })
    }

    fn paragraph_row(&self, index: usize, text: String) -> Row {
        Row {
            paragraph_ref: paragraph_ref(&text),
            ..Row::new(index, self.document.as_str())
                .with_type(RowType::Paragraph)
                .with_text(text)
        }
    }

    /// Push `primary`, then the comment and footnote rows found in `source`.
    fn emit(&mut self, primary: Row, source: Node, rows: &mut Vec<Row>) -> Result<()> {
        let comments = self.comment_rows(&primary, source)?;
        let footnotes = self.footnote_rows(&primary, source)?;
        rows.push(primary);
        rows.extend(comments);
        rows.extend(footnotes);
        Ok(())
    }

    fn comment_rows(&self, primary: &Row, source: Node) -> Result<Vec<Row>> {
        let mut rows = Vec::new();
        for start in wml_descendants(source, "commentRangeStart") {
            let id = wml_attr(start, "id").unwrap_or_default();
            let entry = self.comments.resolve(id)?;
            rows.push(Row {
                row_type: RowType::Comment,
                id: Some(id.to_string()),
                text: Some(comment_anchor(start)),
                metatext: Some(entry.text.clone()),
                author: entry.author.clone(),
                ..primary.clone()
            });
        }
        Ok(rows)
    }

    fn footnote_rows(&mut self, primary: &Row, source: Node) -> Result<Vec<Row>> {
        let mut rows = Vec::new();
        for reference in wml_descendants(source, "footnoteReference") {
            let xml_id = wml_attr(reference, "id").unwrap_or_default();
            let entry = self.footnotes.resolve(xml_id)?;
            self.footnote_seq += 1;
            rows.push(Row {
                row_type: RowType::Footnote,
                id: Some(self.footnote_seq.to_string()),
                text: Some(footnote_anchor(reference)),
                metatext: Some(entry.text.clone()),
                author: entry.author.clone(),
                ..primary.clone()
            });
        }
        Ok(rows)
    }
}

/// Text of every run in a `w:tr`, `|` between runs. Cells without text
/// contribute nothing.
fn table_row_text(tr: Node) -> String {
    joined_text(tr, "|")
}

/// Text of the siblings following a comment start, up to the next range end.
fn comment_anchor(start: Node) -> String {
    let mut anchor = String::new();
    let mut current = start.next_sibling_element();
    while let Some(node) = current {
        if is_wml(node, "commentRangeEnd") {
            break;
        }
        anchor.push_str(&raw_text(node));
        current = node.next_sibling_element();
    }
    anchor.trim().to_string()
}

/// Text nearest to a footnote reference among the runs preceding it.
fn footnote_anchor(reference: Node) -> String {
    let run = reference
        .parent_element()
        .filter(|p| is_wml(*p, "r"))
        .unwrap_or(reference);

    let mut preceding = Vec::new();
    let mut current = run.prev_sibling_element();
    while let Some(node) = current {
        if is_wml(node, "r") {
            preceding.push(node);
        }
        current = node.prev_sibling_element();
    }

    let mut anchor = FootnoteAnchor::new();
    for run in preceding.into_iter().rev() {
        anchor.feed(run_style(run), &raw_text(run));
    }
    anchor.finish()
}

fn run_style<'a>(run: Node<'a, 'a>) -> &'a str {
    wml_children(run, "rPr")
        .next()
        .and_then(|rpr| wml_children(rpr, "rStyle").next())
        .and_then(|s| wml_attr(s, "val"))
        .unwrap_or(DEFAULT_RUN_STYLE)
}
