//! Namespace-aware cursor over an EWS XML document.
//!
//! [`EwsXmlReader`] wraps a quick-xml [`Reader`] and keeps the current node, so
//! decoders can ask "is this the start of element X in namespace N" without
//! consuming anything. Every decoder in this crate is written in terms of these
//! primitives and only ever moves forward.

use std::fmt;

use quick_xml::Reader;
use quick_xml::events::{BytesRef, BytesStart, BytesText, Event};

use crate::error::XmlError;
use crate::namespace::XmlNamespace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum NodeType {
    #[default]
    None,
    StartElement,
    EndElement,
    Text,
}

#[derive(Debug, Clone, Default)]
struct Node {
    node_type: NodeType,
    namespace: Option<String>,
    local_name: String,
    attributes: Vec<(String, String)>,
    is_empty: bool,
    text: String,
}

impl Node {
    fn end(namespace: Option<String>, local_name: String) -> Self {
        Self {
            node_type: NodeType::EndElement,
            namespace,
            local_name,
            ..Self::default()
        }
    }

    fn text(text: String) -> Self {
        Self {
            node_type: NodeType::Text,
            text,
            ..Self::default()
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ns = self.namespace.as_deref().unwrap_or("");
        match self.node_type {
            NodeType::None => f.write_str("nothing"),
            NodeType::StartElement => write!(f, "start of {{{ns}}}{}", self.local_name),
            NodeType::EndElement => write!(f, "end of {{{ns}}}{}", self.local_name),
            NodeType::Text => write!(f, "text {:?}", self.text),
        }
    }
}

/// Forward-only XML cursor with namespace resolution.
pub struct EwsXmlReader<'a> {
    reader: Reader<&'a [u8]>,
    scopes: Vec<Vec<(String, String)>>,
    node: Node,
}

impl fmt::Debug for EwsXmlReader<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EwsXmlReader")
            .field("position", &self.reader.buffer_position())
            .field("node", &self.node)
            .finish_non_exhaustive()
    }
}

impl<'a> EwsXmlReader<'a> {
    /// Create a reader positioned before the first node.
    #[must_use]
    pub fn new(xml: &'a [u8]) -> Self {
        Self {
            reader: Reader::from_reader(xml),
            scopes: Vec::new(),
            node: Node::default(),
        }
    }

    // -----------------------------------------------------------------------
    // Navigation
    // -----------------------------------------------------------------------

    /// Advance to the next element boundary or non-whitespace text.
    ///
    /// Declarations, comments and processing instructions are skipped.
    pub fn read(&mut self) -> Result<(), XmlError> {
        loop {
            match self.reader.read_event()? {
                Event::Start(e) => {
                    self.node = self.start_node(&e, false)?;
                    return Ok(());
                }
                Event::Empty(e) => {
                    self.node = self.start_node(&e, true)?;
                    return Ok(());
                }
                Event::End(e) => {
                    self.node = self.end_node(e.name().as_ref())?;
                    return Ok(());
                }
                Event::Text(e) => {
                    let text = decode_text(&e)?;
                    if !text.trim().is_empty() {
                        self.node = Node::text(text);
                        return Ok(());
                    }
                }
                Event::CData(e) => {
                    let text = String::from_utf8(e.into_inner().into_owned())
                        .map_err(|err| XmlError::ParseError(err.to_string()))?;
                    self.node = Node::text(text);
                    return Ok(());
                }
                Event::GeneralRef(e) => {
                    self.node = Node::text(resolve_reference(&e)?);
                    return Ok(());
                }
                Event::Eof => {
                    return Err(XmlError::UnexpectedEof(self.node.to_string()));
                }
                _ => {}
            }
        }
    }

    /// Skip the current element and everything inside it.
    ///
    /// Leaves the reader on the element's end tag. Does nothing unless the
    /// reader is on a non-empty start tag.
    pub fn skip_current_element(&mut self) -> Result<(), XmlError> {
        if self.node.node_type != NodeType::StartElement || self.node.is_empty {
            return Ok(());
        }
        let mut depth: u32 = 1;
        while depth > 0 {
            self.read()?;
            match self.node.node_type {
                NodeType::StartElement if !self.node.is_empty => depth += 1,
                NodeType::EndElement => depth -= 1,
                _ => {}
            }
        }
        Ok(())
    }

    /// Advance and require the start of `name`.
    pub fn read_start_element(&mut self, ns: XmlNamespace, name: &str) -> Result<(), XmlError> {
        self.read()?;
        self.ensure_current_node_is_start_element(ns, name)
    }

    /// Advance and require the end of `name`.
    pub fn read_end_element(&mut self, ns: XmlNamespace, name: &str) -> Result<(), XmlError> {
        self.read()?;
        self.ensure_current_node_is_end_element(ns, name)
    }

    /// Move to the end of `name` unless the reader is already there or the
    /// element was self-closing.
    pub fn read_end_element_if_necessary(
        &mut self,
        ns: XmlNamespace,
        name: &str,
    ) -> Result<(), XmlError> {
        if self.is_start_element(ns, name) && self.is_empty_element() {
            return Ok(());
        }
        if !self.is_end_element(ns, name) {
            self.read_end_element(ns, name)?;
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Values
    // -----------------------------------------------------------------------

    /// Read the text content of the current element.
    ///
    /// The reader must be on a start tag. Afterwards it is on the matching end
    /// tag, or still on the start tag if the element was self-closing (whose
    /// value is the empty string).
    pub fn read_value(&mut self) -> Result<String, XmlError> {
        if self.node.node_type != NodeType::StartElement {
            return Err(XmlError::UnexpectedElement {
                expected: "a start element".to_owned(),
                found: self.node.to_string(),
            });
        }
        if self.node.is_empty {
            return Ok(String::new());
        }
        let element = self.node.local_name.clone();
        let mut value = String::new();
        loop {
            match self.reader.read_event()? {
                Event::Text(e) => value.push_str(&decode_text(&e)?),
                Event::CData(e) => value.push_str(
                    std::str::from_utf8(&e.into_inner())
                        .map_err(|err| XmlError::ParseError(err.to_string()))?,
                ),
                Event::GeneralRef(e) => value.push_str(&resolve_reference(&e)?),
                Event::End(e) => {
                    self.node = self.end_node(e.name().as_ref())?;
                    return Ok(value);
                }
                Event::Start(e) | Event::Empty(e) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    return Err(XmlError::UnexpectedElement {
                        expected: format!("text content of {element}"),
                        found: format!("element {name}"),
                    });
                }
                Event::Eof => return Err(XmlError::UnexpectedEof(element)),
                _ => {}
            }
        }
    }

    /// Read the value of element `name`, moving to its start tag first if the
    /// reader is not already there.
    pub fn read_element_value(&mut self, ns: XmlNamespace, name: &str) -> Result<String, XmlError> {
        if !self.is_start_element(ns, name) {
            self.read_start_element(ns, name)?;
        }
        self.read_value()
    }

    /// Value of an attribute on the current start tag, by local name.
    #[must_use]
    pub fn read_attribute_value(&self, name: &str) -> Option<&str> {
        if self.node.node_type != NodeType::StartElement {
            return None;
        }
        self.node
            .attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    // -----------------------------------------------------------------------
    // Inspection
    // -----------------------------------------------------------------------

    /// Local name of the current element.
    #[must_use]
    pub fn local_name(&self) -> &str {
        &self.node.local_name
    }

    /// Namespace URI of the current element, if it resolved to one.
    #[must_use]
    pub fn namespace_uri(&self) -> Option<&str> {
        self.node.namespace.as_deref()
    }

    /// Whether the current node is the start of `name` in `ns`.
    #[must_use]
    pub fn is_start_element(&self, ns: XmlNamespace, name: &str) -> bool {
        self.node.node_type == NodeType::StartElement && self.is_named(ns, name)
    }

    /// Whether the current node is any start tag.
    #[must_use]
    pub fn is_start(&self) -> bool {
        self.node.node_type == NodeType::StartElement
    }

    /// Whether the current node is the end of `name` in `ns`.
    #[must_use]
    pub fn is_end_element(&self, ns: XmlNamespace, name: &str) -> bool {
        self.node.node_type == NodeType::EndElement && self.is_named(ns, name)
    }

    /// Whether the current start tag is self-closing.
    #[must_use]
    pub fn is_empty_element(&self) -> bool {
        self.node.node_type == NodeType::StartElement && self.node.is_empty
    }

    /// Fail unless the current node is the start of `name` in `ns`.
    pub fn ensure_current_node_is_start_element(
        &self,
        ns: XmlNamespace,
        name: &str,
    ) -> Result<(), XmlError> {
        if self.is_start_element(ns, name) {
            Ok(())
        } else {
            Err(XmlError::UnexpectedElement {
                expected: format!("start of {{{}}}{name}", ns.uri()),
                found: self.node.to_string(),
            })
        }
    }

    /// Fail unless the current node is the end of `name` in `ns`.
    pub fn ensure_current_node_is_end_element(
        &self,
        ns: XmlNamespace,
        name: &str,
    ) -> Result<(), XmlError> {
        if self.is_end_element(ns, name) {
            Ok(())
        } else {
            Err(XmlError::UnexpectedElement {
                expected: format!("end of {{{}}}{name}", ns.uri()),
                found: self.node.to_string(),
            })
        }
    }

    fn is_named(&self, ns: XmlNamespace, name: &str) -> bool {
        self.node.local_name == name && self.node.namespace.as_deref() == Some(ns.uri())
    }

    // -----------------------------------------------------------------------
    // Namespace scopes
    // -----------------------------------------------------------------------

    fn start_node(&mut self, e: &BytesStart<'_>, is_empty: bool) -> Result<Node, XmlError> {
        let mut declarations = Vec::new();
        let mut attributes = Vec::new();
        for attr in e.attributes() {
            let attr = attr?;
            let key = std::str::from_utf8(attr.key.as_ref())
                .map_err(|err| XmlError::ParseError(err.to_string()))?;
            let raw = std::str::from_utf8(&attr.value)
                .map_err(|err| XmlError::ParseError(err.to_string()))?;
            let value = quick_xml::escape::unescape(raw)
                .map_err(|err| XmlError::ParseError(err.to_string()))?
                .into_owned();
            if key == "xmlns" {
                declarations.push((String::new(), value));
            } else if let Some(prefix) = key.strip_prefix("xmlns:") {
                declarations.push((prefix.to_owned(), value));
            } else {
                let local = key.rsplit_once(':').map_or(key, |(_, local)| local);
                attributes.push((local.to_owned(), value));
            }
        }

        self.scopes.push(declarations);
        let resolved = self.resolve(e.name().as_ref());
        if is_empty {
            self.scopes.pop();
        }
        let (namespace, local_name) = resolved?;

        Ok(Node {
            node_type: NodeType::StartElement,
            namespace,
            local_name,
            attributes,
            is_empty,
            text: String::new(),
        })
    }

    fn end_node(&mut self, qname: &[u8]) -> Result<Node, XmlError> {
        let (namespace, local_name) = self.resolve(qname)?;
        self.scopes.pop();
        Ok(Node::end(namespace, local_name))
    }

    fn resolve(&self, qname: &[u8]) -> Result<(Option<String>, String), XmlError> {
        let qname =
            std::str::from_utf8(qname).map_err(|err| XmlError::ParseError(err.to_string()))?;
        let (prefix, local) = qname.split_once(':').unwrap_or(("", qname));
        let namespace = self
            .scopes
            .iter()
            .rev()
            .flat_map(|scope| scope.iter().rev())
            .find(|(declared, _)| declared == prefix)
            .map(|(_, uri)| uri.clone())
            .filter(|uri| !uri.is_empty());
        Ok((namespace, local.to_owned()))
    }
}

fn decode_text(e: &BytesText<'_>) -> Result<String, XmlError> {
    let decoded = e
        .decode()
        .map_err(|err| XmlError::ParseError(err.to_string()))?;
    let unescaped = quick_xml::escape::unescape(&decoded)
        .map_err(|err| XmlError::ParseError(err.to_string()))?;
    Ok(unescaped.into_owned())
}

fn resolve_reference(e: &BytesRef<'_>) -> Result<String, XmlError> {
    if let Some(ch) = e
        .resolve_char_ref()
        .map_err(|err| XmlError::ParseError(err.to_string()))?
    {
        return Ok(ch.to_string());
    }
    let name = e
        .decode()
        .map_err(|err| XmlError::ParseError(err.to_string()))?;
    quick_xml::escape::resolve_predefined_entity(&name)
        .map(str::to_owned)
        .ok_or_else(|| XmlError::ParseError(format!("unknown entity: &{name};")))
}
