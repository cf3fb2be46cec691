//! CSV output options.

/// Options for writing rows as CSV.
///
/// Every field is always quoted so spreadsheet tools keep numeric-looking
/// values such as "2.1" or "007" as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvOptions {
    /// Field delimiter
    pub delimiter: u8,

    /// Write the header row
    pub include_header: bool,

    /// Line terminator: CRLF when true, LF otherwise
    pub crlf: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            include_header: true,
            crlf: false,
        }
    }
}

impl CsvOptions {
    /// Create default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set whether to write the header row.
    pub fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }

    /// Use CRLF line endings.
    pub fn with_crlf(mut self, crlf: bool) -> Self {
        self.crlf = crlf;
        self
    }
}
