//! The contract every batch operation implements.

use std::io::{self, Write};

use quick_xml::Writer;
use serde_json::{Map, Value};

use rustews_json::{JsonError, JsonObject};
use rustews_model::{ExchangeVersion, IdList, ServiceObjectId};
use rustews_xml::{EwsXmlReader, XmlError};

use crate::error::EwsError;

/// A request type the [`BatchController`](crate::BatchController) can drive.
///
/// Implementations describe their wire names, the version floor, how to
/// validate and write themselves, and how to read the payload carried by each
/// response message. The controller owns the envelope and the reconciliation.
pub trait ServiceOperation {
    /// What a successful response message carries.
    type Payload: Default;

    /// Request element name.
    const NAME: &'static str;
    /// Response element name.
    const RESPONSE_NAME: &'static str;
    /// Per-item response message element name.
    const RESPONSE_MESSAGE_NAME: &'static str;
    /// The oldest protocol version that supports the operation.
    const MINIMUM_VERSION: ExchangeVersion;

    /// Attributes of the request element.
    fn xml_attributes(&self) -> Vec<(&'static str, &'static str)> {
        Vec::new()
    }

    /// Check the request against the negotiated version before anything is
    /// written.
    fn validate(&self, version: ExchangeVersion) -> Result<(), EwsError>;

    /// Number of response messages a well-formed reply carries.
    fn expected_outcome_count(&self) -> usize;

    /// Write the children of the request element.
    fn write_xml_body<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()>;

    /// Add the request fields to the JSON `Body` object.
    fn write_json_body(&self, body: &mut Map<String, Value>);

    /// Read one payload element of a successful response message.
    ///
    /// The reader is on the element's start tag and must be left on its end
    /// tag (or on the start tag if it was self-closing).
    fn read_xml_payload_element(
        &self,
        reader: &mut EwsXmlReader<'_>,
        _payload: &mut Self::Payload,
    ) -> Result<(), XmlError> {
        reader.skip_current_element()
    }

    /// Read the payload of a successful JSON response message.
    fn read_json_payload(&self, _message: JsonObject<'_>) -> Result<Self::Payload, JsonError> {
        Ok(Self::Payload::default())
    }
}

/// Validation shared by operations that target an identifier list.
///
/// An empty list counts as a missing argument. Every identifier must be
/// understood by `version`.
pub(crate) fn validate_id_list<T: ServiceObjectId>(
    ids: &IdList<T>,
    param: &str,
    version: ExchangeVersion,
) -> Result<(), EwsError> {
    if ids.is_empty() {
        return Err(EwsError::InvalidArgument {
            param: param.to_owned(),
            message: "at least one identifier is required".to_owned(),
        });
    }
    if let Some((index, id)) = ids.first_unsupported(version) {
        return Err(EwsError::UnsupportedVersion {
            feature: format!("{param}[{index}]"),
            required: id.minimum_version(),
            actual: version,
        });
    }
    Ok(())
}
