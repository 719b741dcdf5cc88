//! `GetDiscoverySearchConfiguration`.

use std::io::{self, Write};

use quick_xml::Writer;
use serde_json::{Map, Value};

use rustews_json::{JsonError, JsonObject};
use rustews_model::names;
use rustews_model::{DiscoverySearchConfiguration, ExchangeVersion};
use rustews_xml::{EwsXmlReader, XmlError, XmlNamespace, write_bool_element, write_text_element};

use crate::error::EwsError;
use crate::operation::ServiceOperation;

/// Fetches saved discovery searches.
///
/// A single response message carries every matching configuration. An empty
/// `search_id` asks for all of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetDiscoverySearchConfiguration {
    /// The search to fetch; empty for all.
    pub search_id: String,
    /// Expand distribution groups into their members.
    pub expand_group_membership: bool,
    /// Return only searches backing an in-place hold.
    pub in_place_hold_configuration_only: bool,
}

impl GetDiscoverySearchConfiguration {
    /// Fetch the search `search_id`.
    #[must_use]
    pub fn new(search_id: impl Into<String>) -> Self {
        Self {
            search_id: search_id.into(),
            ..Self::default()
        }
    }
}

impl ServiceOperation for GetDiscoverySearchConfiguration {
    type Payload = Vec<DiscoverySearchConfiguration>;

    const NAME: &'static str = names::GET_DISCOVERY_SEARCH_CONFIGURATION;
    const RESPONSE_NAME: &'static str = names::GET_DISCOVERY_SEARCH_CONFIGURATION_RESPONSE;
    const RESPONSE_MESSAGE_NAME: &'static str =
        names::GET_DISCOVERY_SEARCH_CONFIGURATION_RESPONSE_MESSAGE;
    const MINIMUM_VERSION: ExchangeVersion = ExchangeVersion::Exchange2013;

    fn validate(&self, _version: ExchangeVersion) -> Result<(), EwsError> {
        Ok(())
    }

    fn expected_outcome_count(&self) -> usize {
        1
    }

    fn write_xml_body<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        write_text_element(writer, XmlNamespace::Messages, names::SEARCH_ID, &self.search_id)?;
        write_bool_element(
            writer,
            XmlNamespace::Messages,
            names::EXPAND_GROUP_MEMBERSHIP,
            self.expand_group_membership,
        )?;
        write_bool_element(
            writer,
            XmlNamespace::Messages,
            names::IN_PLACE_HOLD_CONFIGURATION_ONLY,
            self.in_place_hold_configuration_only,
        )
    }

    fn write_json_body(&self, body: &mut Map<String, Value>) {
        body.insert(
            names::SEARCH_ID.to_owned(),
            Value::String(self.search_id.clone()),
        );
        body.insert(
            names::EXPAND_GROUP_MEMBERSHIP.to_owned(),
            Value::Bool(self.expand_group_membership),
        );
        body.insert(
            names::IN_PLACE_HOLD_CONFIGURATION_ONLY.to_owned(),
            Value::Bool(self.in_place_hold_configuration_only),
        );
    }

    fn read_xml_payload_element(
        &self,
        reader: &mut EwsXmlReader<'_>,
        payload: &mut Self::Payload,
    ) -> Result<(), XmlError> {
        if reader.is_start_element(XmlNamespace::Messages, names::DISCOVERY_SEARCH_CONFIGURATIONS) {
            payload.extend(rustews_xml::read_discovery_search_configurations(reader)?);
            Ok(())
        } else {
            reader.skip_current_element()
        }
    }

    fn read_json_payload(&self, message: JsonObject<'_>) -> Result<Self::Payload, JsonError> {
        rustews_json::read_discovery_search_configurations(message)
    }
}
