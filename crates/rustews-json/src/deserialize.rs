//! EWS JSON deserialization: reading reply payloads.
//!
//! Keys are looked up independently, so field order never matters here.
//! Unknown keys are ignored and array entries whose `__type` is not one the
//! reader knows are skipped.

use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use rustews_model::names;
use rustews_model::{
    DiscoverySearchConfiguration, DiscoverySearchConfigurationFields, FolderId, IdList, ItemId,
    Mailbox, SearchableMailbox, WellKnownFolderName,
};

use crate::error::JsonError;
use crate::object::JsonObject;

/// Trait for deserializing EWS types from JSON objects.
pub trait JsonDeserialize: Sized {
    /// Deserialize an instance from `obj`.
    fn from_json(obj: JsonObject<'_>) -> Result<Self, JsonError>;
}

/// An entity that appears as an entry of an identifier array.
pub trait JsonListElement: JsonDeserialize {
    /// Whether an entry with this `__type` name is one of this type's shapes.
    fn accepts(type_name: Option<&str>) -> bool;
}

/// Parse a payload whose root object is `T`.
pub fn from_slice<T: JsonDeserialize>(json: &[u8]) -> Result<T, JsonError> {
    let value: Value = serde_json::from_slice(json)?;
    T::from_json(JsonObject::from_value(&value, "root")?)
}

/// Read an identifier array.
pub fn read_id_list<T: JsonListElement>(values: &[Value]) -> Result<IdList<T>, JsonError> {
    let mut ids = Vec::with_capacity(values.len());
    for value in values {
        let obj = JsonObject::from_value(value, "identifier")?;
        if T::accepts(obj.type_name()) {
            ids.push(T::from_json(obj)?);
        } else {
            debug!(type_name = ?obj.type_name(), "skipping unknown identifier entry");
        }
    }
    Ok(ids.into())
}

/// Read the `DiscoverySearchConfigurations` array of a response message.
///
/// An absent key yields no configurations.
pub fn read_discovery_search_configurations(
    obj: JsonObject<'_>,
) -> Result<Vec<DiscoverySearchConfiguration>, JsonError> {
    if !obj.contains_key(names::DISCOVERY_SEARCH_CONFIGURATIONS) {
        return Ok(Vec::new());
    }
    obj.read_as_array(names::DISCOVERY_SEARCH_CONFIGURATIONS)?
        .iter()
        .map(|value| {
            let entry = JsonObject::from_value(value, names::DISCOVERY_SEARCH_CONFIGURATION)?;
            DiscoverySearchConfiguration::from_json(entry)
        })
        .collect()
}

fn parse_guid(s: &str) -> Result<Uuid, JsonError> {
    Uuid::parse_str(s.trim()).map_err(|e| JsonError::ParseError(format!("invalid GUID '{s}': {e}")))
}

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

impl JsonDeserialize for Mailbox {
    fn from_json(obj: JsonObject<'_>) -> Result<Self, JsonError> {
        Ok(Self {
            email_address: obj
                .read_optional_string(names::EMAIL_ADDRESS)?
                .unwrap_or_default(),
            routing_type: obj.read_optional_string(names::ROUTING_TYPE)?,
        })
    }
}

impl JsonDeserialize for FolderId {
    fn from_json(obj: JsonObject<'_>) -> Result<Self, JsonError> {
        let id = obj.read_as_string(names::ID)?;
        let change_key = obj.read_optional_string(names::CHANGE_KEY)?;
        if obj.type_name() != Some(names::DISTINGUISHED_FOLDER_ID) {
            return Ok(Self::Id { id, change_key });
        }

        let name = WellKnownFolderName::from_name(&id)
            .ok_or_else(|| JsonError::ParseError(format!("unknown distinguished folder: {id}")))?;
        let mailbox = if obj.contains_key(names::MAILBOX) {
            Some(Mailbox::from_json(obj.read_as_object(names::MAILBOX)?)?)
        } else {
            None
        };
        Ok(Self::Distinguished {
            name,
            change_key,
            mailbox,
        })
    }
}

impl JsonListElement for FolderId {
    fn accepts(type_name: Option<&str>) -> bool {
        matches!(
            type_name,
            Some(names::FOLDER_ID | names::DISTINGUISHED_FOLDER_ID)
        )
    }
}

impl JsonDeserialize for ItemId {
    fn from_json(obj: JsonObject<'_>) -> Result<Self, JsonError> {
        Ok(Self {
            id: obj.read_as_string(names::ID)?,
            change_key: obj.read_optional_string(names::CHANGE_KEY)?,
        })
    }
}

impl JsonListElement for ItemId {
    fn accepts(type_name: Option<&str>) -> bool {
        type_name == Some(names::ITEM_ID)
    }
}

// ---------------------------------------------------------------------------
// Discovery search
// ---------------------------------------------------------------------------

impl JsonDeserialize for SearchableMailbox {
    fn from_json(obj: JsonObject<'_>) -> Result<Self, JsonError> {
        let mut mailbox = SearchableMailbox::default();
        if let Some(guid) = obj.read_optional_string(names::GUID)? {
            mailbox.guid = parse_guid(&guid)?;
        }
        if let Some(v) = obj.read_optional_string(names::PRIMARY_SMTP_ADDRESS)? {
            mailbox.primary_smtp_address = v;
        }
        if obj.contains_key(names::IS_EXTERNAL_MAILBOX) {
            mailbox.is_external_mailbox = obj.read_as_bool(names::IS_EXTERNAL_MAILBOX)?;
        }
        if let Some(v) = obj.read_optional_string(names::EXTERNAL_EMAIL_ADDRESS)? {
            mailbox.external_email_address = v;
        }
        if let Some(v) = obj.read_optional_string(names::DISPLAY_NAME)? {
            mailbox.display_name = v;
        }
        if obj.contains_key(names::IS_MEMBERSHIP_GROUP) {
            mailbox.is_membership_group = obj.read_as_bool(names::IS_MEMBERSHIP_GROUP)?;
        }
        if let Some(v) = obj.read_optional_string(names::REFERENCE_ID)? {
            mailbox.reference_id = v;
        }
        Ok(mailbox)
    }
}

impl JsonDeserialize for DiscoverySearchConfiguration {
    fn from_json(obj: JsonObject<'_>) -> Result<Self, JsonError> {
        let searchable_mailboxes = if obj.contains_key(names::SEARCHABLE_MAILBOXES) {
            let entries = obj.read_as_array(names::SEARCHABLE_MAILBOXES)?;
            let mut mailboxes = Vec::with_capacity(entries.len());
            for entry in entries {
                let entry = JsonObject::from_value(entry, names::SEARCHABLE_MAILBOX)?;
                match entry.type_name() {
                    None | Some(names::SEARCHABLE_MAILBOX) => {
                        mailboxes.push(SearchableMailbox::from_json(entry)?);
                    }
                    Some(other) => debug!(type_name = other, "skipping unknown mailbox entry"),
                }
            }
            Some(mailboxes)
        } else {
            None
        };

        let fields = DiscoverySearchConfigurationFields {
            search_id: obj.read_optional_string(names::SEARCH_ID)?,
            search_query: obj.read_optional_string(names::SEARCH_QUERY)?,
            searchable_mailboxes,
            in_place_hold_identity: obj.read_optional_string(names::IN_PLACE_HOLD_IDENTITY)?,
            managed_by_organization: obj.read_optional_string(names::MANAGED_BY_ORGANIZATION)?,
            language: obj.read_optional_string(names::LANGUAGE)?,
        };
        Ok(fields.into_configuration())
    }
}
