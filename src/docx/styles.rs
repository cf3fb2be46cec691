//! Style index built from styles.xml.

use crate::error::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use std::collections::HashMap;

/// A style definition reduced to what heading detection needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleEntry {
    /// Style type as written in the `w:type` attribute ("paragraph", "character", ...)
    pub style_type: String,
    /// Zero-based outline level, present for heading styles
    pub outline_level: Option<u8>,
}

/// Style ID to [`StyleEntry`] lookup.
#[derive(Debug, Clone, Default)]
pub struct StyleIndex {
    styles: HashMap<String, StyleEntry>,
}

impl StyleIndex {
    /// Parse styles from XML content.
    ///
    /// The outline level is taken from the first `w:outlineLvl` found anywhere
    /// beneath a `w:style` element.
    pub fn parse(xml: &str) -> Result<Self> {
        if xml.trim().is_empty() {
            return Ok(Self::default());
        }

        let mut index = Self::default();
        let mut reader = quick_xml::Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        let mut current: Option<(String, StyleEntry)> = None;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                    b"style" => current = Some(style_header(e)),
                    b"outlineLvl" => record_outline_level(&mut current, e),
                    _ => {}
                },
                Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                    b"style" => {
                        let (id, entry) = style_header(e);
                        index.styles.insert(id, entry);
                    }
                    b"outlineLvl" => record_outline_level(&mut current, e),
                    _ => {}
                },
                Ok(Event::End(ref e)) if e.local_name().as_ref() == b"style" => {
                    if let Some((id, entry)) = current.take() {
                        index.styles.insert(id, entry);
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        Ok(index)
    }

    /// Look up a style by ID.
    pub fn get(&self, style_id: &str) -> Option<&StyleEntry> {
        self.styles.get(style_id)
    }

    /// Outline level of a style, if it is a heading style.
    pub fn outline_level(&self, style_id: &str) -> Option<u8> {
        self.get(style_id).and_then(|s| s.outline_level)
    }

    /// Number of styles in the index.
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Whether the index holds no styles.
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

fn style_header(e: &BytesStart) -> (String, StyleEntry) {
    let mut id = String::new();
    let mut entry = StyleEntry::default();
    for attr in e.attributes().flatten() {
        match attr.key.local_name().as_ref() {
            b"styleId" => id = String::from_utf8_lossy(&attr.value).to_string(),
            b"type" => entry.style_type = String::from_utf8_lossy(&attr.value).to_string(),
            _ => {}
        }
    }
    (id, entry)
}

fn record_outline_level(current: &mut Option<(String, StyleEntry)>, e: &BytesStart) {
    let Some((_, entry)) = current else {
        return;
    };
    if entry.outline_level.is_some() {
        return;
    }
    entry.outline_level = e
        .attributes()
        .flatten()
        .find(|a| a.key.local_name().as_ref() == b"val")
        .and_then(|a| String::from_utf8_lossy(&a.value).trim().parse().ok());
}
