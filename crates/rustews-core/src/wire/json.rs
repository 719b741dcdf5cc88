//! JSON envelopes.
//!
//! ```json
//! {
//!   "__type": "DeleteFolderJsonRequest:#Exchange",
//!   "Header": { "RequestServerVersion": "Exchange2013_SP1" },
//!   "Body": { "__type": "DeleteFolderRequest:#Exchange", "DeleteType": "HardDelete", "FolderIds": [..] }
//! }
//! ```

use bytes::Bytes;
use serde_json::{Map, Value};

use rustews_json::{JsonObject, type_tag};
use rustews_model::names;
use rustews_model::{ExchangeVersion, ResponseClass, ResponseCode};

use crate::controller::ResponseMessage;
use crate::error::{EwsError, EwsResult};
use crate::operation::ServiceOperation;

/// Write the request envelope for `operation`.
pub fn build_request<O: ServiceOperation>(
    operation: &O,
    version: ExchangeVersion,
) -> EwsResult<Bytes> {
    let mut body = Map::new();
    body.insert(
        names::JSON_TYPE.to_owned(),
        Value::String(type_tag(&format!("{}Request", O::NAME))),
    );
    operation.write_json_body(&mut body);

    let mut header = Map::new();
    header.insert(
        names::REQUEST_SERVER_VERSION.to_owned(),
        Value::String(version.as_str().to_owned()),
    );

    let mut envelope = Map::new();
    envelope.insert(
        names::JSON_TYPE.to_owned(),
        Value::String(type_tag(&format!("{}JsonRequest", O::NAME))),
    );
    envelope.insert(names::HEADER.to_owned(), Value::Object(header));
    envelope.insert(names::BODY.to_owned(), Value::Object(body));

    let bytes = serde_json::to_vec(&Value::Object(envelope))
        .map_err(|e| EwsError::Serialization(e.into()))?;
    Ok(Bytes::from(bytes))
}

/// Reads response messages from `Body.ResponseMessages.Items`, one per call
/// to `next`.
#[derive(Debug)]
pub struct JsonReplyReader<'a, O> {
    operation: &'a O,
    items: std::slice::Iter<'a, Value>,
}

impl<'a, O: ServiceOperation> JsonReplyReader<'a, O> {
    /// Check the envelope and locate the message array.
    ///
    /// A body typed `Fault` is returned as [`EwsError::ServiceFault`]; a body
    /// typed anything but `O::RESPONSE_NAME` is malformed.
    pub fn open(operation: &'a O, root: &'a Value) -> EwsResult<Self> {
        let root = JsonObject::from_value(root, "root")?;
        let body = root.read_as_object(names::BODY)?;

        match body.type_name() {
            Some(names::FAULT) => {
                return Err(EwsError::ServiceFault {
                    code: body.read_optional_string(names::FAULT_CODE)?.unwrap_or_default(),
                    message: body
                        .read_optional_string(names::FAULT_STRING)?
                        .unwrap_or_default(),
                });
            }
            Some(name) if name == O::RESPONSE_NAME => {}
            other => {
                return Err(EwsError::MalformedResponse(format!(
                    "expected {} body, found {}",
                    O::RESPONSE_NAME,
                    other.unwrap_or("an untyped body")
                )));
            }
        }

        let items = body
            .read_as_object(names::RESPONSE_MESSAGES)?
            .read_as_array(names::ITEMS)?;
        Ok(Self {
            operation,
            items: items.iter(),
        })
    }

    fn read_message(&self, value: &Value) -> EwsResult<ResponseMessage<O::Payload>> {
        let message = JsonObject::from_value(value, O::RESPONSE_MESSAGE_NAME)?;
        if message.type_name() != Some(O::RESPONSE_MESSAGE_NAME) {
            return Err(EwsError::MalformedResponse(format!(
                "expected {} in {}, found {}",
                O::RESPONSE_MESSAGE_NAME,
                names::ITEMS,
                message.type_name().unwrap_or("an untyped entry")
            )));
        }

        let class_name = message.read_as_string(names::RESPONSE_CLASS)?;
        let class = ResponseClass::from_name(&class_name).ok_or_else(|| {
            EwsError::MalformedResponse(format!("unknown response class: {class_name}"))
        })?;
        let code = message
            .read_optional_string(names::RESPONSE_CODE)?
            .map_or(ResponseCode::NoError, |code| ResponseCode::from(code.as_str()));
        let message_text = message
            .read_optional_string(names::MESSAGE_TEXT)?
            .unwrap_or_default();
        let payload = if class == ResponseClass::Error {
            O::Payload::default()
        } else {
            self.operation.read_json_payload(message)?
        };

        Ok(ResponseMessage {
            class,
            code,
            message_text,
            payload,
        })
    }
}

impl<O: ServiceOperation> Iterator for JsonReplyReader<'_, O> {
    type Item = EwsResult<ResponseMessage<O::Payload>>;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.items.next()?;
        Some(self.read_message(value))
    }
}
