//! EWS JSON serialization: writing request bodies.
//!
//! ```json
//! "FolderIds": [
//!   { "__type": "FolderId:#Exchange", "Id": "AAMk...", "ChangeKey": "AQAA..." },
//!   { "__type": "DistinguishedFolderId:#Exchange", "Id": "inbox",
//!     "Mailbox": { "EmailAddress": "owner@contoso.com" } }
//! ]
//! ```

use serde_json::{Map, Value};

use rustews_model::names;
use rustews_model::{FolderId, IdList, ItemId, Mailbox};

/// Trait for serializing EWS types to JSON objects.
pub trait JsonSerialize {
    /// Render this value as a JSON value.
    fn to_json(&self) -> Value;
}

/// The `__type` discriminator for `name`.
#[must_use]
pub fn type_tag(name: &str) -> String {
    format!("{name}{}", names::JSON_TYPE_SUFFIX)
}

/// Render an identifier list as an array, in list order.
pub fn write_id_list<T: JsonSerialize>(list: &IdList<T>) -> Value {
    Value::Array(list.iter().map(JsonSerialize::to_json).collect())
}

fn typed_object(name: &str) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert(names::JSON_TYPE.to_owned(), Value::String(type_tag(name)));
    map
}

fn insert_id(map: &mut Map<String, Value>, id: &str, change_key: Option<&String>) {
    map.insert(names::ID.to_owned(), Value::String(id.to_owned()));
    if let Some(change_key) = change_key {
        map.insert(names::CHANGE_KEY.to_owned(), Value::String(change_key.clone()));
    }
}

impl JsonSerialize for Mailbox {
    fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert(
            names::EMAIL_ADDRESS.to_owned(),
            Value::String(self.email_address.clone()),
        );
        if let Some(ref routing_type) = self.routing_type {
            map.insert(
                names::ROUTING_TYPE.to_owned(),
                Value::String(routing_type.clone()),
            );
        }
        Value::Object(map)
    }
}

impl JsonSerialize for FolderId {
    fn to_json(&self) -> Value {
        match self {
            Self::Id { id, change_key } => {
                let mut map = typed_object(names::FOLDER_ID);
                insert_id(&mut map, id, change_key.as_ref());
                Value::Object(map)
            }
            Self::Distinguished {
                name,
                change_key,
                mailbox,
            } => {
                let mut map = typed_object(names::DISTINGUISHED_FOLDER_ID);
                insert_id(&mut map, name.as_str(), change_key.as_ref());
                if let Some(mailbox) = mailbox {
                    map.insert(names::MAILBOX.to_owned(), mailbox.to_json());
                }
                Value::Object(map)
            }
        }
    }
}

impl JsonSerialize for ItemId {
    fn to_json(&self) -> Value {
        let mut map = typed_object(names::ITEM_ID);
        insert_id(&mut map, &self.id, self.change_key.as_ref());
        Value::Object(map)
    }
}
