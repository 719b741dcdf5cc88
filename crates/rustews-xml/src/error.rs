//! XML error types.

use std::io;

/// Errors that can occur during EWS XML serialization or deserialization.
#[derive(Debug, thiserror::Error)]
pub enum XmlError {
    /// An I/O error during XML writing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An error from the underlying quick-xml library.
    #[error("XML processing error: {0}")]
    QuickXml(#[from] quick_xml::Error),

    /// An error from quick-xml attribute handling.
    #[error("XML attribute error: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    /// A required XML element or attribute was missing.
    #[error("missing required XML element: {0}")]
    MissingElement(String),

    /// The reader was not positioned where the schema requires.
    #[error("unexpected XML node: expected {expected}, found {found}")]
    UnexpectedElement {
        /// What the schema requires at this position.
        expected: String,
        /// What the document contains.
        found: String,
    },

    /// The document ended inside an element.
    #[error("unexpected end of XML document while reading {0}")]
    UnexpectedEof(String),

    /// An error parsing a value from XML text content.
    #[error("failed to parse value: {0}")]
    ParseError(String),
}
