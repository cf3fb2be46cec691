//! In-memory DOCX packages for integration tests.

#![allow(dead_code)]

use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;

pub const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
</Types>"#;

pub const STYLES: &str = r#"<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
<w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/></w:style>
<w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/><w:pPr><w:outlineLvl w:val="0"/></w:pPr></w:style>
<w:style w:type="paragraph" w:styleId="Heading2"><w:name w:val="heading 2"/><w:pPr><w:outlineLvl w:val="1"/></w:pPr></w:style>
<w:style w:type="character" w:styleId="DiagramShape"><w:name w:val="Diagram Shape"/></w:style>
</w:styles>"#;

/// Builds a minimal Word package part by part.
#[derive(Default)]
pub struct DocxBuilder {
    body: String,
    styles: Option<String>,
    comments: Vec<(String, String, String)>,
    footnotes: Vec<(String, String)>,
    include_document: bool,
}

impl DocxBuilder {
    pub fn new() -> Self {
        Self {
            styles: Some(STYLES.to_string()),
            include_document: true,
            ..Default::default()
        }
    }

    pub fn without_styles(mut self) -> Self {
        self.styles = None;
        self
    }

    pub fn without_document(mut self) -> Self {
        self.include_document = false;
        self
    }

    /// Append raw body XML.
    pub fn raw(mut self, xml: &str) -> Self {
        self.body.push_str(xml);
        self
    }

    pub fn heading(self, style: &str, text: &str) -> Self {
        let xml = format!(
            r#"<w:p><w:pPr><w:pStyle w:val="{style}"/></w:pPr><w:r><w:t>{text}</w:t></w:r></w:p>"#
        );
        self.raw(&xml)
    }

    pub fn paragraph(self, text: &str) -> Self {
        let xml = format!(r#"<w:p><w:r><w:t xml:space="preserve">{text}</w:t></w:r></w:p>"#);
        self.raw(&xml)
    }

    pub fn table(self, rows: &[&[&str]]) -> Self {
        let mut xml = String::from("<w:tbl><w:tblPr/>");
        for cells in rows {
            xml.push_str("<w:tr>");
            for cell in *cells {
                xml.push_str(&format!("<w:tc><w:p><w:r><w:t>{cell}</w:t></w:r></w:p></w:tc>"));
            }
            xml.push_str("</w:tr>");
        }
        xml.push_str("</w:tbl>");
        self.raw(&xml)
    }

    pub fn comment(mut self, id: &str, author: &str, text: &str) -> Self {
        self.comments
            .push((id.to_string(), author.to_string(), text.to_string()));
        self
    }

    pub fn footnote(mut self, id: &str, text: &str) -> Self {
        self.footnotes.push((id.to_string(), text.to_string()));
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let mut add = |name: &str, content: &str| {
            writer
                .start_file(name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        };

        add("[Content_Types].xml", CONTENT_TYPES);

        if self.include_document {
            let document = format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="{W_NS}"><w:body>{}<w:sectPr/></w:body></w:document>"#,
                self.body
            );
            add("word/document.xml", &document);
        }

        if let Some(styles) = &self.styles {
            add("word/styles.xml", styles);
        }

        if !self.comments.is_empty() {
            let mut xml = format!(r#"<w:comments xmlns:w="{W_NS}">"#);
            for (id, author, text) in &self.comments {
                xml.push_str(&format!(
                    r#"<w:comment w:id="{id}" w:author="{author}"><w:p><w:r><w:t>{text}</w:t></w:r></w:p></w:comment>"#
                ));
            }
            xml.push_str("</w:comments>");
            add("word/comments.xml", &xml);
        }

        if !self.footnotes.is_empty() {
            let mut xml = format!(
                r#"<w:footnotes xmlns:w="{W_NS}"><w:footnote w:type="separator" w:id="-1"><w:p><w:r><w:separator/></w:r></w:p></w:footnote>"#
            );
            for (id, text) in &self.footnotes {
                xml.push_str(&format!(
                    r#"<w:footnote w:id="{id}"><w:p><w:r><w:footnoteRef/></w:r><w:r><w:t xml:space="preserve"> {text}</w:t></w:r></w:p></w:footnote>"#
                ));
            }
            xml.push_str("</w:footnotes>");
            add("word/footnotes.xml", &xml);
        }

        writer.finish().unwrap().into_inner()
    }
}
