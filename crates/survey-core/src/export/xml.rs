//! Thin element writer over quick-xml shared by both KMZ documents.

use super::{KML_NAMESPACE, WPML_NAMESPACE};
use crate::error::ExportError;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::fmt::Display;

pub(crate) struct XmlDocument {
    writer: Writer<Vec<u8>>,
}

impl XmlDocument {
    pub fn new() -> Result<Self, ExportError> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        Ok(Self { writer })
    }

    /// `<kml>` root declaring the KML and WPML namespaces.
    pub fn start_kml(&mut self) -> Result<(), ExportError> {
        let root = BytesStart::new("kml")
            .with_attributes([("xmlns", KML_NAMESPACE), ("xmlns:wpml", WPML_NAMESPACE)]);
        self.writer.write_event(Event::Start(root))?;
        Ok(())
    }

    pub fn start(&mut self, name: &str) -> Result<(), ExportError> {
        self.writer.write_event(Event::Start(BytesStart::new(name)))?;
        Ok(())
    }

    pub fn end(&mut self, name: &str) -> Result<(), ExportError> {
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    /// `<name>value</name>`
    pub fn leaf(&mut self, name: &str, value: impl Display) -> Result<(), ExportError> {
        let text = value.to_string();
        self.start(name)?;
        self.writer.write_event(Event::Text(BytesText::new(&text)))?;
        self.end(name)
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.writer.into_inner()
    }
}

/// Fixed-precision decimal with trailing zeros trimmed ("60", "8.94", "-90").
pub(crate) fn decimal(value: f64, max_decimals: usize) -> String {
    let mut text = format!("{:.*}", max_decimals, value);
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    if text == "-0" {
        text = "0".to_string();
    }
    text
}

/// Boolean as WPML's 0/1 flag.
pub(crate) fn flag(value: bool) -> u8 {
    u8::from(value)
}
