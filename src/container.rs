//! ZIP container abstraction for Word packages.

use crate::error::{Error, Result};
use std::cell::RefCell;
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

/// Main document part. Mandatory.
pub const DOCUMENT_PART: &str = "word/document.xml";
/// Style definitions. Optional.
pub const STYLES_PART: &str = "word/styles.xml";
/// Comment definitions. Optional.
pub const COMMENTS_PART: &str = "word/comments.xml";
/// Footnote definitions. Optional.
pub const FOOTNOTES_PART: &str = "word/footnotes.xml";
/// Package content type listing.
pub const CONTENT_TYPES_PART: &str = "[Content_Types].xml";

/// OOXML package opened over an in-memory ZIP archive.
///
/// Parts are read on demand. An absent part is reported as
/// [`Error::MissingComponent`] by [`read_xml`](Self::read_xml) and as
/// `Ok(None)` by [`read_optional_xml`](Self::read_optional_xml), so callers
/// can tell "no such content" apart from a broken archive.
pub struct OoxmlContainer {
    archive: RefCell<zip::ZipArchive<Cursor<Vec<u8>>>>,
}

/// Decode XML bytes handling UTF-8 (with or without BOM) and UTF-16 LE/BE.
pub fn decode_xml_bytes(bytes: &[u8]) -> Result<String> {
    match bytes {
        [0xEF, 0xBB, 0xBF, rest @ ..] => utf8(rest),
        [0xFF, 0xFE, rest @ ..] => decode_utf16(rest, u16::from_le_bytes).map(|s| declare_utf8(&s)),
        [0xFE, 0xFF, rest @ ..] => decode_utf16(rest, u16::from_be_bytes).map(|s| declare_utf8(&s)),
        _ => match std::str::from_utf8(bytes) {
            Ok(s) => Ok(s.to_string()),
            // BOM-less UTF-16 shows up as NUL bytes interleaved with ASCII
            Err(_) if bytes.len() >= 4 && bytes[1] == 0 && bytes[3] == 0 => {
                decode_utf16(bytes, u16::from_le_bytes)
            }
            Err(_) if bytes.len() >= 4 && bytes[0] == 0 && bytes[2] == 0 => {
                decode_utf16(bytes, u16::from_be_bytes)
            }
            Err(_) => Ok(String::from_utf8_lossy(bytes).into_owned()),
        },
    }
}

fn utf8(bytes: &[u8]) -> Result<String> {
    String::from_utf8(bytes.to_vec())
        .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> Result<String> {
    let units = bytes.chunks_exact(2).map(|pair| unit([pair[0], pair[1]]));
    char::decode_utf16(units)
        .collect::<std::result::Result<String, _>>()
        .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

/// Rewrite a UTF-16 encoding declaration once the content is already UTF-8,
/// otherwise the XML parsers would try to decode it a second time.
fn declare_utf8(content: &str) -> String {
    let Some(end) = content
        .starts_with("<?xml")
        .then(|| content.find("?>"))
        .flatten()
    else {
        return content.to_string();
    };

    let (decl, rest) = content.split_at(end + 2);
    let decl = ["\"UTF-16\"", "'UTF-16'", "\"utf-16\"", "'utf-16'"]
        .iter()
        .fold(decl.to_string(), |acc, quoted| {
            acc.replace(&format!("encoding={}", quoted), "encoding=\"UTF-8\"")
        });
    format!("{}{}", decl, rest)
}

impl OoxmlContainer {
    /// Open a package from a file path.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use word2csv::container::OoxmlContainer;
    ///
    /// let container = OoxmlContainer::open("requirements.docx")?;
    /// assert!(container.exists("word/document.xml"));
    /// # Ok::<(), word2csv::Error>(())
    /// ```
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// Create a container from a byte vector.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let archive = zip::ZipArchive::new(Cursor::new(data))?;
        Ok(Self {
            archive: RefCell::new(archive),
        })
    }

    /// Create a container from a reader.
    pub fn from_reader<R: Read + Seek>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(data)
    }

    /// Read a part as decoded XML text. Fails with
    /// [`Error::MissingComponent`] when the part does not exist.
    pub fn read_xml(&self, path: &str) -> Result<String> {
        self.read_optional_xml(path)?
            .ok_or_else(|| Error::MissingComponent(path.to_string()))
    }

    /// Read a part that a document may legitimately omit.
    pub fn read_optional_xml(&self, path: &str) -> Result<Option<String>> {
        let mut archive = self.archive.borrow_mut();
        let mut file = match archive.by_name(path) {
            Ok(file) => file,
            Err(zip::result::ZipError::FileNotFound) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;
        decode_xml_bytes(&bytes).map(Some)
    }

    /// Check if a part exists in the archive.
    pub fn exists(&self, path: &str) -> bool {
        self.archive.borrow().file_names().any(|n| n == path)
    }

    /// List all parts in the archive.
    pub fn list_files(&self) -> Vec<String> {
        self.archive.borrow().file_names().map(String::from).collect()
    }
}

impl std::fmt::Debug for OoxmlContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OoxmlContainer")
            .field("files", &self.list_files().len())
            .finish()
    }
}
