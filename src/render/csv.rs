//! CSV writer for rows.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::Row;

use super::options::CsvOptions;

fn writer<W: Write>(out: W, options: &CsvOptions) -> csv::Writer<W> {
    let terminator = if options.crlf {
        csv::Terminator::CRLF
    } else {
        csv::Terminator::Any(b'\n')
    };
    csv::WriterBuilder::new()
        .delimiter(options.delimiter)
        .quote_style(csv::QuoteStyle::Always)
        .has_headers(options.include_header)
        .terminator(terminator)
        .from_writer(out)
}

/// Write `rows` to `out`.
pub fn write_rows<W: Write>(rows: &[Row], out: W, options: &CsvOptions) -> Result<()> {
    let mut wtr = writer(out, options);
    if rows.is_empty() && options.include_header {
        // serde only emits the header alongside the first record
        wtr.write_record(crate::model::COLUMNS)?;
    }
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write `rows` to a new file at `path`.
pub fn write_file(rows: &[Row], path: impl AsRef<Path>, options: &CsvOptions) -> Result<()> {
    let file = File::create(path.as_ref())?;
    write_rows(rows, BufWriter::new(file), options)
}

/// Render `rows` to a CSV string.
pub fn to_csv_string(rows: &[Row], options: &CsvOptions) -> Result<String> {
    let mut buf = Vec::new();
    write_rows(rows, &mut buf, options)?;
    String::from_utf8(buf).map_err(|e| Error::Csv(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RowType;

    fn sample() -> Vec<Row> {
        vec![
            Row {
                chapter_outline: Some("2.1".into()),
                chapter_name: Some("Scope".into()),
                ..Row::new(0, "plan.docx")
                    .with_type(RowType::Heading)
                    .with_text("Scope")
            },
            Row {
                chapter_outline: Some("2.1".into()),
                chapter_name: Some("Scope".into()),
                paragraph_ref: Some("[7]".into()),
                ..Row::new(1, "plan.docx").with_text("[7] Say \"hi\", twice")
            },
        ]
    }

    #[test]
    fn test_header_and_quoting() {
        let csv = to_csv_string(&sample(), &CsvOptions::default()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines[0],
            r#""Index","Document","ChapterOutline","ChapterName","ParagraphRef","Page","Type","ID","Text","Metatext","Author""#
        );
        assert_eq!(
            lines[1],
            r#""0","plan.docx","2.1","Scope","","","Heading","","Scope","","""#
        );
        assert_eq!(
            lines[2],
            r#""1","plan.docx","2.1","Scope","[7]","","Paragraph","","[7] Say ""hi"", twice","","""#
        );
    }

    #[test]
    fn test_empty_rows_still_have_header() {
        let csv = to_csv_string(&[], &CsvOptions::default()).unwrap();
        assert_eq!(csv.lines().count(), 1);
        assert!(csv.starts_with("\"Index\",\"Document\""));
    }

    #[test]
    fn test_delimiter_and_no_header() {
        let options = CsvOptions::new().with_delimiter(b';').with_header(false);
        let csv = to_csv_string(&sample()[..1], &options).unwrap();
        assert_eq!(
            csv,
            "\"0\";\"plan.docx\";\"2.1\";\"Scope\";\"\";\"\";\"Heading\";\"\";\"Scope\";\"\";\"\"\n"
        );
    }

    #[test]
    fn test_write_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_file(&sample(), &path, &CsvOptions::default()).unwrap();

        let mut reader = ::csv::Reader::from_path(&path).unwrap();
        let rows: Vec<Row> = reader.deserialize().collect::<std::result::Result<_, _>>().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].paragraph_ref.as_deref(), Some("[7]"));
        assert_eq!(rows[1].row_type, RowType::Paragraph);
    }
}
