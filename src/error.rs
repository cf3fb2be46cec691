//! Error types for the word2csv library.

use std::io;
use thiserror::Error;

/// Result type alias for word2csv operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while converting a document.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file is not a ZIP-based package.
    #[error("Unknown file format")]
    UnknownFormat,

    /// The package is valid OOXML but not a word-processing document.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Error reading ZIP archive.
    #[error("ZIP archive error: {0}")]
    ZipArchive(String),

    /// Error parsing XML content.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// A required document part is missing.
    #[error("Missing component: {0}")]
    MissingComponent(String),

    /// The body references a comment that comments.xml does not define.
    #[error("Comment {0} is referenced in the document but not defined")]
    UnknownComment(String),

    /// The body references a footnote that footnotes.xml does not define.
    #[error("Footnote {0} is referenced in the document but not defined")]
    UnknownFootnote(String),

    /// Error writing CSV output.
    #[error("CSV error: {0}")]
    Csv(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ZipArchive(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlParse(err.to_string())
    }
}

impl From<roxmltree::Error> for Error {
    fn from(err: roxmltree::Error) -> Self {
        Error::XmlParse(err.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Csv(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnknownFormat;
        assert_eq!(err.to_string(), "Unknown file format");

        let err = Error::UnknownComment("7".to_string());
        assert_eq!(
            err.to_string(),
            "Comment 7 is referenced in the document but not defined"
        );

        let err = Error::MissingComponent("word/document.xml".to_string());
        assert_eq!(err.to_string(), "Missing component: word/document.xml");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_error_from_roxmltree() {
        let err: Error = roxmltree::Document::parse("<w:p>").unwrap_err().into();
        assert!(matches!(err, Error::XmlParse(_)));
    }
}
