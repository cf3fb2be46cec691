//! Document to rows conversion.

use std::path::{Path, PathBuf};

use crate::container::{OoxmlContainer, COMMENTS_PART, DOCUMENT_PART, FOOTNOTES_PART, STYLES_PART};
use crate::detect::{self, PackageKind};
use crate::docx::xml::is_wml;
use crate::docx::{ConversionContext, NoteKind, NoteTable, StyleIndex};
use crate::error::{Error, Result};
use crate::model::{forward_fill, Row};

/// Converts one Word package into rows.
pub struct Converter {
    container: OoxmlContainer,
    name: String,
}

impl Converter {
    /// Open a document. The Document column is the file name.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use word2csv::Converter;
    ///
    /// let rows = Converter::open("requirements.docx")?.convert()?;
    /// println!("{} rows", rows.len());
    /// # Ok::<(), word2csv::Error>(())
    /// ```
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        Self::from_bytes(data, document_name(path))
    }

    /// Create a converter from package bytes, naming the document `name`.
    pub fn from_bytes(data: Vec<u8>, name: impl Into<String>) -> Result<Self> {
        detect::check_zip_magic(&data)?;
        let container = OoxmlContainer::from_bytes(data)?;
        let name = name.into();

        if detect::check_content_type(&container)? == PackageKind::Undeclared {
            log::warn!("{}: package does not declare a Word main part", name);
        }

        Ok(Self { container, name })
    }

    /// Name written to the Document column.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Convert the document into forward-filled rows.
    pub fn convert(&self) -> Result<Vec<Row>> {
        self.convert_with_progress(|_, _| {})
    }

    /// Like [`convert`](Self::convert), calling `progress(done, total)` after
    /// each top-level body node.
    pub fn convert_with_progress(&self, progress: impl FnMut(usize, usize)) -> Result<Vec<Row>> {
        let mut rows = self.extract_rows(progress)?;
        forward_fill(&mut rows);
        log::info!("{}: {} rows", self.name, rows.len());
        Ok(rows)
    }

    /// Walk the body without the forward-fill pass.
    pub fn extract_rows(&self, progress: impl FnMut(usize, usize)) -> Result<Vec<Row>> {
        let mut context = self.context()?;

        let xml = self.container.read_xml(DOCUMENT_PART)?;
        let tree = roxmltree::Document::parse(&xml)?;
        let body = tree
            .root_element()
            .descendants()
            .find(|n| is_wml(*n, "body"))
            .ok_or_else(|| Error::MissingComponent(format!("{} w:body", DOCUMENT_PART)))?;

        let mut rows = Vec::new();
        context.walk_body(body, &mut rows, progress)?;
        Ok(rows)
    }

    /// Load the lookup tables into a fresh per-document context.
    fn context(&self) -> Result<ConversionContext> {
        let styles = match self.optional_part(STYLES_PART)? {
            Some(xml) => StyleIndex::parse(&xml)?,
            None => StyleIndex::default(),
        };
        let comments = match self.optional_part(COMMENTS_PART)? {
            Some(xml) => NoteTable::parse_comments(&xml)?,
            None => NoteTable::empty(NoteKind::Comment),
        };
        let footnotes = match self.optional_part(FOOTNOTES_PART)? {
            Some(xml) => NoteTable::parse_footnotes(&xml)?,
            None => NoteTable::empty(NoteKind::Footnote),
        };

        log::debug!(
            "{}: {} styles, {} comments, {} footnotes",
            self.name,
            styles.len(),
            comments.len(),
            footnotes.len()
        );
        Ok(ConversionContext::new(
            self.name.clone(),
            styles,
            comments,
            footnotes,
        ))
    }

    fn optional_part(&self, part: &str) -> Result<Option<String>> {
        let xml = self.container.read_optional_xml(part)?;
        if xml.is_none() {
            log::debug!("{}: no {}", self.name, part);
        }
        Ok(xml)
    }
}

/// Final path component of `path`, used as the Document column value.
pub fn document_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// CSV destination for `input` inside `out_dir`: the input file name with
/// `.csv` appended (`plan.docx` becomes `plan.docx.csv`).
pub fn output_path_for(input: impl AsRef<Path>, out_dir: impl AsRef<Path>) -> PathBuf {
    let name = document_name(input.as_ref());
    out_dir.as_ref().join(format!("{}.csv", name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_name() {
        assert_eq!(document_name(Path::new("/tmp/reqs/SRS v2.docx")), "SRS v2.docx");
        assert_eq!(document_name(Path::new("plain.docx")), "plain.docx");
    }

    #[test]
    fn test_output_path_for() {
        assert_eq!(
            output_path_for("in/Design.docx", "out"),
            Path::new("out").join("Design.docx.csv")
        );
    }

    #[test]
    fn test_rejects_non_zip() {
        let err = Converter::from_bytes(b"not a package".to_vec(), "x.docx")
            .err()
            .unwrap();
        assert!(matches!(err, Error::UnknownFormat));
    }
}
