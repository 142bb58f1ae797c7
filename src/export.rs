//! XML export of customer rows.
//!
//! Rows are first turned into a tree of [`XmlElement`] nodes and the tree is
//! then written by [`write_document`], the only place that deals with
//! escaping.

use std::borrow::Cow;

use quick_xml::Writer;
use quick_xml::escape::escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use thiserror::Error;

use crate::dto::customer::CustomerRow;

pub const EXPORT_FILE_NAME: &str = "Customers.xml";
pub const EXPORT_MEDIA_TYPE: &str = "application/xml";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("character U+{0:04X} cannot be represented in XML")]
    InvalidCharacter(u32),

    #[error("failed to write XML: {0}")]
    Write(String),
}

/// Element of the export tree: a name, optional text, ordered children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    pub name: &'static str,
    pub text: Option<String>,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    pub fn leaf(name: &'static str, text: impl Into<String>) -> Self {
        Self {
            name,
            text: Some(text.into()),
            children: Vec::new(),
        }
    }

    pub fn node(name: &'static str, children: Vec<XmlElement>) -> Self {
        Self {
            name,
            text: None,
            children,
        }
    }
}

/// Serialized export ready to be handed to a download sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: &'static str,
    pub media_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Builds the `Customers` tree, keeping the order of `rows`.
pub fn customers_tree(rows: &[CustomerRow]) -> XmlElement {
    XmlElement::node("Customers", rows.iter().map(customer_element).collect())
}

fn customer_element(row: &CustomerRow) -> XmlElement {
    let mut children = vec![
        XmlElement::leaf("Id", row.id.to_string()),
        XmlElement::leaf("Name", row.name.as_str()),
        XmlElement::leaf("Address", row.address.as_str()),
        XmlElement::leaf("Email", row.email.as_str()),
        XmlElement::leaf("Phone", row.phone.as_str()),
        XmlElement::leaf("Iban", row.iban.as_str()),
    ];

    if let Some(category) = &row.customer_category {
        children.push(XmlElement::node(
            "CustomerCategory",
            vec![
                XmlElement::leaf("Code", category.code.as_str()),
                XmlElement::leaf("Description", category.description.as_str()),
            ],
        ));
    }

    XmlElement::node("Customer", children)
}

/// Writes `root` as a standalone UTF-8 XML document.
pub fn write_document(root: &XmlElement) -> Result<Vec<u8>, ExportError> {
    let mut writer = Writer::new(Vec::new());
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(|e| ExportError::Write(e.to_string()))?;
    write_element(&mut writer, root)?;
    Ok(writer.into_inner())
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &XmlElement) -> Result<(), ExportError> {
    let text = element.text.as_deref().filter(|t| !t.is_empty());

    if text.is_none() && element.children.is_empty() {
        return writer
            .write_event(Event::Empty(BytesStart::new(element.name)))
            .map_err(|e| ExportError::Write(e.to_string()));
    }

    writer
        .write_event(Event::Start(BytesStart::new(element.name)))
        .map_err(|e| ExportError::Write(e.to_string()))?;

    if let Some(text) = text {
        writer
            .write_event(Event::Text(BytesText::from_escaped(escape_text(text)?)))
            .map_err(|e| ExportError::Write(e.to_string()))?;
    }

    for child in &element.children {
        write_element(writer, child)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new(element.name)))
        .map_err(|e| ExportError::Write(e.to_string()))
}

/// Escapes markup characters and carriage returns, which parsers would
/// otherwise normalize to line feeds.
fn escape_text(text: &str) -> Result<Cow<'_, str>, ExportError> {
    if let Some(c) = text.chars().find(|c| !is_xml_char(*c)) {
        return Err(ExportError::InvalidCharacter(c as u32));
    }

    let escaped = escape(text);
    if escaped.contains('\r') {
        Ok(Cow::Owned(escaped.replace('\r', "&#13;")))
    } else {
        Ok(escaped)
    }
}

/// `Char` production of XML 1.0.
fn is_xml_char(c: char) -> bool {
    matches!(c,
        '\t' | '\n' | '\r'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}

/// Serializes `rows` into the downloadable `Customers.xml` file.
pub fn export_customers(rows: &[CustomerRow]) -> Result<ExportFile, ExportError> {
    let bytes = write_document(&customers_tree(rows))?;
    log::debug!("Exported {} customers ({} bytes)", rows.len(), bytes.len());

    Ok(ExportFile {
        file_name: EXPORT_FILE_NAME,
        media_type: EXPORT_MEDIA_TYPE,
        bytes,
    })
}
