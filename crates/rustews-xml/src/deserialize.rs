//! EWS XML deserialization: reading reply payloads.
//!
//! Decoders are positioned on the start tag of the entity they read and only
//! move forward. Unknown children inside a known container are skipped; values
//! that fail type conversion are errors.

use tracing::debug;
use uuid::Uuid;

use rustews_model::names;
use rustews_model::{
    DiscoverySearchConfiguration, DiscoverySearchConfigurationFields, FolderId, IdList, ItemId,
    Mailbox, SearchableMailbox, WellKnownFolderName,
};

use crate::error::XmlError;
use crate::namespace::XmlNamespace;
use crate::reader::EwsXmlReader;

/// Trait for deserializing EWS types from XML.
pub trait EwsDeserialize: Sized {
    /// Deserialize an instance from the given reader.
    ///
    /// The reader is positioned on this entity's start tag. On return it is on
    /// the matching end tag (or still on the start tag if it was self-closing),
    /// unless the type documents otherwise.
    ///
    /// # Errors
    ///
    /// Returns `XmlError` if the XML is malformed or a value cannot be converted.
    fn deserialize_xml(reader: &mut EwsXmlReader<'_>) -> Result<Self, XmlError>;
}

/// An entity that appears as a child of a list container.
pub trait ListElement: EwsDeserialize {
    /// Whether the reader is on the start tag of one of this type's elements.
    fn is_list_element(reader: &EwsXmlReader<'_>) -> bool;
}

/// Deserialize a document whose root element is `T`.
pub fn from_xml<T: EwsDeserialize>(xml: &[u8]) -> Result<T, XmlError> {
    let mut reader = EwsXmlReader::new(xml);
    reader.read()?;
    if !reader.is_start() {
        return Err(XmlError::MissingElement("root element".to_owned()));
    }
    T::deserialize_xml(&mut reader)
}

/// Read the identifier list in container `ns:container`.
///
/// The reader must be on the container's start tag and ends on its end tag.
pub fn read_id_list<T: ListElement>(
    reader: &mut EwsXmlReader<'_>,
    ns: XmlNamespace,
    container: &str,
) -> Result<IdList<T>, XmlError> {
    reader.ensure_current_node_is_start_element(ns, container)?;
    let mut ids = Vec::new();
    if !reader.is_empty_element() {
        loop {
            reader.read()?;
            if reader.is_end_element(ns, container) {
                break;
            }
            if T::is_list_element(reader) {
                ids.push(T::deserialize_xml(reader)?);
            } else {
                reader.skip_current_element()?;
            }
        }
    }
    Ok(ids.into())
}

/// Read every configuration in `m:DiscoverySearchConfigurations`.
///
/// The reader must be on the container's start tag and ends on its end tag.
pub fn read_discovery_search_configurations(
    reader: &mut EwsXmlReader<'_>,
) -> Result<Vec<DiscoverySearchConfiguration>, XmlError> {
    reader.ensure_current_node_is_start_element(
        XmlNamespace::Messages,
        names::DISCOVERY_SEARCH_CONFIGURATIONS,
    )?;
    let mut configurations = Vec::new();
    if reader.is_empty_element() {
        return Ok(configurations);
    }
    loop {
        reader.read()?;
        if reader.is_end_element(XmlNamespace::Messages, names::DISCOVERY_SEARCH_CONFIGURATIONS) {
            return Ok(configurations);
        }
        // A configuration that stopped at an unknown element leaves the reader
        // inside itself; its remaining nodes are passed over here.
        if reader.is_start_element(XmlNamespace::Types, names::DISCOVERY_SEARCH_CONFIGURATION) {
            configurations.push(DiscoverySearchConfiguration::deserialize_xml(reader)?);
        }
    }
}

// ---------------------------------------------------------------------------
// Helper functions for reading common XML patterns
// ---------------------------------------------------------------------------

fn required_attribute(reader: &EwsXmlReader<'_>, name: &str) -> Result<String, XmlError> {
    reader
        .read_attribute_value(name)
        .map(str::to_owned)
        .ok_or_else(|| {
            XmlError::MissingElement(format!("attribute {name} on {}", reader.local_name()))
        })
}

/// Parse an `xs:boolean`.
fn parse_bool(s: &str) -> Result<bool, XmlError> {
    match s.trim() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(XmlError::ParseError(format!("invalid boolean: {s}"))),
    }
}

fn parse_guid(s: &str) -> Result<Uuid, XmlError> {
    Uuid::parse_str(s.trim()).map_err(|e| XmlError::ParseError(format!("invalid GUID '{s}': {e}")))
}

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

impl EwsDeserialize for Mailbox {
    fn deserialize_xml(reader: &mut EwsXmlReader<'_>) -> Result<Self, XmlError> {
        reader.ensure_current_node_is_start_element(XmlNamespace::Types, names::MAILBOX)?;
        let mut mailbox = Mailbox::default();
        if reader.is_empty_element() {
            return Ok(mailbox);
        }
        loop {
            reader.read()?;
            if reader.is_end_element(XmlNamespace::Types, names::MAILBOX) {
                return Ok(mailbox);
            }
            if reader.is_start_element(XmlNamespace::Types, names::EMAIL_ADDRESS) {
                mailbox.email_address = reader.read_value()?;
            } else if reader.is_start_element(XmlNamespace::Types, names::ROUTING_TYPE) {
                mailbox.routing_type = Some(reader.read_value()?);
            } else {
                reader.skip_current_element()?;
            }
        }
    }
}

impl EwsDeserialize for FolderId {
    fn deserialize_xml(reader: &mut EwsXmlReader<'_>) -> Result<Self, XmlError> {
        if reader.is_start_element(XmlNamespace::Types, names::FOLDER_ID) {
            let id = required_attribute(reader, names::ID)?;
            let change_key = reader.read_attribute_value(names::CHANGE_KEY).map(str::to_owned);
            reader.skip_current_element()?;
            return Ok(Self::Id { id, change_key });
        }

        reader.ensure_current_node_is_start_element(
            XmlNamespace::Types,
            names::DISTINGUISHED_FOLDER_ID,
        )?;
        let raw_name = required_attribute(reader, names::ID)?;
        let name = WellKnownFolderName::from_name(&raw_name).ok_or_else(|| {
            XmlError::ParseError(format!("unknown distinguished folder: {raw_name}"))
        })?;
        let change_key = reader.read_attribute_value(names::CHANGE_KEY).map(str::to_owned);
        let mut mailbox = None;
        if !reader.is_empty_element() {
            loop {
                reader.read()?;
                if reader.is_end_element(XmlNamespace::Types, names::DISTINGUISHED_FOLDER_ID) {
                    break;
                }
                if reader.is_start_element(XmlNamespace::Types, names::MAILBOX) {
                    mailbox = Some(Mailbox::deserialize_xml(reader)?);
                } else {
                    reader.skip_current_element()?;
                }
            }
        }
        Ok(Self::Distinguished {
            name,
            change_key,
            mailbox,
        })
    }
}

impl ListElement for FolderId {
    fn is_list_element(reader: &EwsXmlReader<'_>) -> bool {
        reader.is_start_element(XmlNamespace::Types, names::FOLDER_ID)
            || reader.is_start_element(XmlNamespace::Types, names::DISTINGUISHED_FOLDER_ID)
    }
}

impl EwsDeserialize for ItemId {
    fn deserialize_xml(reader: &mut EwsXmlReader<'_>) -> Result<Self, XmlError> {
        reader.ensure_current_node_is_start_element(XmlNamespace::Types, names::ITEM_ID)?;
        let id = required_attribute(reader, names::ID)?;
        let change_key = reader.read_attribute_value(names::CHANGE_KEY).map(str::to_owned);
        reader.skip_current_element()?;
        Ok(Self { id, change_key })
    }
}

impl ListElement for ItemId {
    fn is_list_element(reader: &EwsXmlReader<'_>) -> bool {
        reader.is_start_element(XmlNamespace::Types, names::ITEM_ID)
    }
}

// ---------------------------------------------------------------------------
// Discovery search
// ---------------------------------------------------------------------------

impl EwsDeserialize for SearchableMailbox {
    fn deserialize_xml(reader: &mut EwsXmlReader<'_>) -> Result<Self, XmlError> {
        reader.ensure_current_node_is_start_element(XmlNamespace::Types, names::SEARCHABLE_MAILBOX)?;
        let mut mailbox = SearchableMailbox::default();
        if reader.is_empty_element() {
            return Ok(mailbox);
        }
        loop {
            reader.read()?;
            if reader.is_end_element(XmlNamespace::Types, names::SEARCHABLE_MAILBOX) {
                return Ok(mailbox);
            }
            if !reader.is_start() || reader.namespace_uri() != Some(XmlNamespace::Types.uri()) {
                reader.skip_current_element()?;
                continue;
            }
            let tag_name = reader.local_name().to_owned();
            match tag_name.as_str() {
                names::GUID => mailbox.guid = parse_guid(&reader.read_value()?)?,
                names::PRIMARY_SMTP_ADDRESS => mailbox.primary_smtp_address = reader.read_value()?,
                names::IS_EXTERNAL_MAILBOX => {
                    mailbox.is_external_mailbox = parse_bool(&reader.read_value()?)?;
                }
                names::EXTERNAL_EMAIL_ADDRESS => {
                    mailbox.external_email_address = reader.read_value()?;
                }
                names::DISPLAY_NAME => mailbox.display_name = reader.read_value()?,
                names::IS_MEMBERSHIP_GROUP => {
                    mailbox.is_membership_group = parse_bool(&reader.read_value()?)?;
                }
                names::REFERENCE_ID => mailbox.reference_id = reader.read_value()?,
                _ => reader.skip_current_element()?,
            }
        }
    }
}

/// Single forward pass over a configuration.
///
/// `SearchId` is read first when present. After it, known optional fields may
/// appear in any order; the first node that is not a known field ends the
/// entity. That node is normally the configuration's end tag. When it is an
/// unrecognized element the reader is left on that element's start tag and
/// any known fields after it are not read.
impl EwsDeserialize for DiscoverySearchConfiguration {
    fn deserialize_xml(reader: &mut EwsXmlReader<'_>) -> Result<Self, XmlError> {
        reader.ensure_current_node_is_start_element(
            XmlNamespace::Types,
            names::DISCOVERY_SEARCH_CONFIGURATION,
        )?;
        let mut fields = DiscoverySearchConfigurationFields::default();
        if reader.is_empty_element() {
            return Ok(fields.into_configuration());
        }

        reader.read()?;
        if reader.is_start_element(XmlNamespace::Types, names::SEARCH_ID) {
            fields.search_id = Some(reader.read_value()?);
            reader.read()?;
        }

        loop {
            if reader.is_start_element(XmlNamespace::Types, names::SEARCH_QUERY) {
                fields.search_query = Some(reader.read_value()?);
            } else if reader.is_start_element(XmlNamespace::Types, names::SEARCHABLE_MAILBOXES) {
                fields.searchable_mailboxes = Some(read_searchable_mailboxes(reader)?);
            } else if reader.is_start_element(XmlNamespace::Types, names::IN_PLACE_HOLD_IDENTITY) {
                fields.in_place_hold_identity = Some(reader.read_value()?);
            } else if reader.is_start_element(XmlNamespace::Types, names::MANAGED_BY_ORGANIZATION)
            {
                fields.managed_by_organization = Some(reader.read_value()?);
            } else if reader.is_start_element(XmlNamespace::Types, names::LANGUAGE) {
                fields.language = Some(reader.read_value()?);
            } else {
                if !reader
                    .is_end_element(XmlNamespace::Types, names::DISCOVERY_SEARCH_CONFIGURATION)
                {
                    debug!(
                        element = reader.local_name(),
                        "unrecognized element ends DiscoverySearchConfiguration"
                    );
                }
                break;
            }
            reader.read()?;
        }

        Ok(fields.into_configuration())
    }
}

fn read_searchable_mailboxes(
    reader: &mut EwsXmlReader<'_>,
) -> Result<Vec<SearchableMailbox>, XmlError> {
    let mut mailboxes = Vec::new();
    if reader.is_empty_element() {
        return Ok(mailboxes);
    }
    loop {
        reader.read()?;
        if reader.is_end_element(XmlNamespace::Types, names::SEARCHABLE_MAILBOXES) {
            return Ok(mailboxes);
        }
        if reader.is_start_element(XmlNamespace::Types, names::SEARCHABLE_MAILBOX) {
            mailboxes.push(SearchableMailbox::deserialize_xml(reader)?);
            reader.read_end_element_if_necessary(XmlNamespace::Types, names::SEARCHABLE_MAILBOX)?;
        } else {
            reader.skip_current_element()?;
        }
    }
}
