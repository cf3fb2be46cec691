//! Package detection for Word documents.

use crate::container::{OoxmlContainer, CONTENT_TYPES_PART};
use crate::error::{Error, Result};
use std::path::Path;

/// ZIP file magic bytes: PK\x03\x04
const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// Content type for the DOCX main document part.
const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";

/// Content type for macro-enabled Word documents.
const DOCM_CONTENT_TYPE: &str = "application/vnd.ms-word.document.macroEnabled.main+xml";

/// Main-part content types of the other OOXML families, used for error messages.
const FOREIGN_CONTENT_TYPES: [(&str, &str); 2] = [
    (
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml",
        "Excel workbook",
    ),
    (
        "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml",
        "PowerPoint presentation",
    ),
];

/// File extension accepted for conversion.
pub const DOCX_EXTENSION: &str = "docx";

/// Whether a path names a Word document by extension (case-insensitive).
pub fn is_docx_path(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(DOCX_EXTENSION))
}

/// Reject data that is not a ZIP archive before handing it to the container.
pub fn check_zip_magic(data: &[u8]) -> Result<()> {
    if data.len() < 4 || data[..4] != ZIP_MAGIC {
        return Err(Error::UnknownFormat);
    }
    Ok(())
}

/// Outcome of inspecting `[Content_Types].xml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageKind {
    /// Declares a word-processing main part.
    WordProcessing,
    /// No content type listing, or one that names no known main part.
    Undeclared,
}

/// Inspect the package content types.
///
/// Spreadsheets and presentations are rejected with
/// [`Error::UnsupportedFormat`]. Packages without a recognizable declaration
/// are let through; the missing body will surface later if they really are
/// not Word documents.
pub fn check_content_type(container: &OoxmlContainer) -> Result<PackageKind> {
    let Some(content_types) = container.read_optional_xml(CONTENT_TYPES_PART)? else {
        return Ok(PackageKind::Undeclared);
    };

    if content_types.contains(DOCX_CONTENT_TYPE) || content_types.contains(DOCM_CONTENT_TYPE) {
        return Ok(PackageKind::WordProcessing);
    }

    for (content_type, name) in FOREIGN_CONTENT_TYPES {
        if content_types.contains(content_type) {
            return Err(Error::UnsupportedFormat(name.to_string()));
        }
    }

    Ok(PackageKind::Undeclared)
}
