//! Comment and footnote definitions from comments.xml / footnotes.xml.

use crate::error::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use std::collections::HashMap;

/// A comment or footnote definition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteEntry {
    /// Value of the `w:id` attribute
    pub id: String,
    /// Value of the `w:author` attribute (comments only)
    pub author: Option<String>,
    /// Text of every `w:t` beneath the definition, concatenated and trimmed
    pub text: String,
}

/// Which kind of definition a [`NoteTable`] holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteKind {
    /// `w:comment` elements in comments.xml
    Comment,
    /// `w:footnote` elements in footnotes.xml
    Footnote,
}

impl NoteKind {
    fn element(self) -> &'static [u8] {
        match self {
            NoteKind::Comment => b"comment",
            NoteKind::Footnote => b"footnote",
        }
    }
}

/// ID to [`NoteEntry`] lookup for one kind of note.
#[derive(Debug, Clone)]
pub struct NoteTable {
    kind: NoteKind,
    entries: HashMap<String, NoteEntry>,
}

impl NoteTable {
    /// An empty table, used when the document has no such part.
    pub fn empty(kind: NoteKind) -> Self {
        Self {
            kind,
            entries: HashMap::new(),
        }
    }

    /// Parse comments.xml.
    pub fn parse_comments(xml: &str) -> Result<Self> {
        Self::parse(xml, NoteKind::Comment)
    }

    /// Parse footnotes.xml.
    pub fn parse_footnotes(xml: &str) -> Result<Self> {
        Self::parse(xml, NoteKind::Footnote)
    }

    /// Parse definitions of the given kind.
    pub fn parse(xml: &str, kind: NoteKind) -> Result<Self> {
        let mut table = Self::empty(kind);
        if xml.trim().is_empty() {
            return Ok(table);
        }

        let mut reader = quick_xml::Reader::from_str(xml);
        // Whitespace inside w:t is content
        reader.config_mut().trim_text(false);

        let mut buf = Vec::new();
        let mut current: Option<NoteEntry> = None;
        let mut in_text = false;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    let name = e.local_name();
                    if name.as_ref() == kind.element() {
                        current = Some(note_header(e));
                    } else if name.as_ref() == b"t" && current.is_some() {
                        in_text = true;
                    }
                }
                Ok(Event::Empty(ref e)) if e.local_name().as_ref() == kind.element() => {
                    table.insert(note_header(e));
                }
                Ok(Event::Text(ref e)) if in_text => {
                    if let Some(entry) = current.as_mut() {
                        let text = e.unescape().map_err(|e| Error::XmlParse(e.to_string()))?;
                        entry.text.push_str(&text);
                    }
                }
                Ok(Event::End(ref e)) => {
                    let name = e.local_name();
                    if name.as_ref() == b"t" {
                        in_text = false;
                    } else if name.as_ref() == kind.element() {
                        if let Some(entry) = current.take() {
                            table.insert(entry);
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        Ok(table)
    }

    fn insert(&mut self, mut entry: NoteEntry) {
        entry.text = entry.text.trim().to_string();
        self.entries.insert(entry.id.clone(), entry);
    }

    /// Which kind of note this table holds.
    pub fn kind(&self) -> NoteKind {
        self.kind
    }

    /// Look up a definition by ID.
    pub fn get(&self, id: &str) -> Option<&NoteEntry> {
        self.entries.get(id)
    }

    /// Look up a definition that the document body references.
    ///
    /// A reference without a definition means the package is inconsistent
    /// and is reported as [`Error::UnknownComment`] or
    /// [`Error::UnknownFootnote`].
    pub fn resolve(&self, id: &str) -> Result<&NoteEntry> {
        self.get(id).ok_or_else(|| match self.kind {
            NoteKind::Comment => Error::UnknownComment(id.to_string()),
            NoteKind::Footnote => Error::UnknownFootnote(id.to_string()),
        })
    }

    /// Number of definitions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table holds no definitions.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn note_header(e: &BytesStart) -> NoteEntry {
    let mut entry = NoteEntry::default();
    for attr in e.attributes().flatten() {
        match attr.key.local_name().as_ref() {
            b"id" => entry.id = String::from_utf8_lossy(&attr.value).to_string(),
            b"author" => {
                entry.author = attr.unescape_value().ok().map(|v| v.into_owned());
            }
            _ => {}
        }
    }
    entry
}
