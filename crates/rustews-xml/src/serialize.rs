//! EWS XML serialization: writing request bodies.
//!
//! Identifiers render as attributed elements in the types namespace:
//!
//! ```xml
//! <m:FolderIds>
//!   <t:FolderId Id="AAMk..." ChangeKey="AQAA..."/>
//!   <t:DistinguishedFolderId Id="inbox">
//!     <t:Mailbox><t:EmailAddress>owner@contoso.com</t:EmailAddress></t:Mailbox>
//!   </t:DistinguishedFolderId>
//! </m:FolderIds>
//! ```

use std::io::{self, Write};

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesText, Event};

use rustews_model::names;
use rustews_model::{FolderId, IdList, ItemId, Mailbox};

use crate::error::XmlError;
use crate::namespace::XmlNamespace;

/// Trait for serializing EWS types to XML.
///
/// Implementors write their own element(s) into the current XML context.
/// Namespace prefixes are assumed to be declared by an ancestor (see
/// [`to_xml`]).
///
/// Uses `io::Result` because `quick_xml::Writer` closures require `io::Result<()>`.
pub trait EwsSerialize {
    /// Serialize this value into the given writer.
    ///
    /// # Errors
    ///
    /// Returns `io::Error` if writing to the underlying writer fails.
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()>;
}

/// Serialize a value as a standalone document rooted at `ns:root_element`.
///
/// The root element declares every EWS namespace so that children may use the
/// standard prefixes.
pub fn to_xml<T: EwsSerialize>(
    ns: XmlNamespace,
    root_element: &str,
    value: &T,
) -> Result<Vec<u8>, XmlError> {
    let mut buf = Vec::with_capacity(512);
    let mut writer = Writer::new(&mut buf);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

    writer
        .create_element(ns.qualify(root_element))
        .with_attributes(XmlNamespace::ALL.map(|ns| (ns.declaration(), ns.uri())))
        .write_inner_content(|w| value.serialize_xml(w))?;

    Ok(buf)
}

/// Write an identifier list as `ns:container` with one child per identifier,
/// in list order.
pub fn write_id_list<W: Write, T: EwsSerialize>(
    writer: &mut Writer<W>,
    list: &IdList<T>,
    ns: XmlNamespace,
    container: &str,
) -> io::Result<()> {
    writer
        .create_element(ns.qualify(container))
        .write_inner_content(|w| list.serialize_xml(w))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Helper functions for writing common XML patterns
// ---------------------------------------------------------------------------

/// Write a simple `<ns:tag>text</ns:tag>` element.
pub fn write_text_element<W: Write>(
    writer: &mut Writer<W>,
    ns: XmlNamespace,
    tag: &str,
    text: &str,
) -> io::Result<()> {
    writer
        .create_element(ns.qualify(tag))
        .write_text_content(BytesText::new(text))?;
    Ok(())
}

/// Write `<ns:tag>true|false</ns:tag>`.
pub fn write_bool_element<W: Write>(
    writer: &mut Writer<W>,
    ns: XmlNamespace,
    tag: &str,
    value: bool,
) -> io::Result<()> {
    write_text_element(writer, ns, tag, if value { "true" } else { "false" })
}

// ---------------------------------------------------------------------------
// EwsSerialize implementations
// ---------------------------------------------------------------------------

impl<T: EwsSerialize> EwsSerialize for IdList<T> {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        for id in self {
            id.serialize_xml(writer)?;
        }
        Ok(())
    }
}

impl EwsSerialize for Mailbox {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        writer
            .create_element(XmlNamespace::Types.qualify(names::MAILBOX))
            .write_inner_content(|w| {
                write_text_element(
                    w,
                    XmlNamespace::Types,
                    names::EMAIL_ADDRESS,
                    &self.email_address,
                )?;
                if let Some(ref routing_type) = self.routing_type {
                    write_text_element(w, XmlNamespace::Types, names::ROUTING_TYPE, routing_type)?;
                }
                Ok(())
            })?;
        Ok(())
    }
}

impl EwsSerialize for FolderId {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        match self {
            Self::Id { id, change_key } => {
                let mut element = writer
                    .create_element(XmlNamespace::Types.qualify(names::FOLDER_ID))
                    .with_attribute((names::ID, id.as_str()));
                if let Some(change_key) = change_key {
                    element = element.with_attribute((names::CHANGE_KEY, change_key.as_str()));
                }
                element.write_empty()?;
            }
            Self::Distinguished {
                name,
                change_key,
                mailbox,
            } => {
                let mut element = writer
                    .create_element(XmlNamespace::Types.qualify(names::DISTINGUISHED_FOLDER_ID))
                    .with_attribute((names::ID, name.as_str()));
                if let Some(change_key) = change_key {
                    element = element.with_attribute((names::CHANGE_KEY, change_key.as_str()));
                }
                match mailbox {
                    Some(mailbox) => {
                        element.write_inner_content(|w| mailbox.serialize_xml(w))?;
                    }
                    None => {
                        element.write_empty()?;
                    }
                }
            }
        }
        Ok(())
    }
}

impl EwsSerialize for ItemId {
    fn serialize_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        let mut element = writer
            .create_element(XmlNamespace::Types.qualify(names::ITEM_ID))
            .with_attribute((names::ID, self.id.as_str()));
        if let Some(ref change_key) = self.change_key {
            element = element.with_attribute((names::CHANGE_KEY, change_key.as_str()));
        }
        element.write_empty()?;
        Ok(())
    }
}
