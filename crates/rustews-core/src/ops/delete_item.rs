//! `DeleteItem`.

use std::io::{self, Write};

use quick_xml::Writer;
use serde_json::{Map, Value};

use rustews_model::names;
use rustews_model::{
    AffectedTaskOccurrences, DeleteMode, ExchangeVersion, IdList, ItemId, SendCancellationsMode,
};
use rustews_xml::XmlNamespace;

use crate::error::EwsError;
use crate::operation::{ServiceOperation, validate_id_list};

/// Deletes items. One response message per item id; no payload.
///
/// The optional modes are only sent when set. Meeting items need
/// `send_cancellations_mode` and task items need `affected_task_occurrences`;
/// the server rejects those items otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteItem {
    /// Items to delete, in request order.
    pub item_ids: IdList<ItemId>,
    /// How the items are disposed of.
    pub delete_mode: DeleteMode,
    /// Whether deleting meetings notifies attendees.
    pub send_cancellations_mode: Option<SendCancellationsMode>,
    /// Which occurrences of recurring tasks are deleted.
    pub affected_task_occurrences: Option<AffectedTaskOccurrences>,
    /// Suppress read receipts for unread items. Needs Exchange 2013 SP1.
    pub suppress_read_receipts: bool,
}

impl DeleteItem {
    /// Delete `item_ids` with `delete_mode` and no optional modes.
    #[must_use]
    pub fn new(item_ids: impl Into<IdList<ItemId>>, delete_mode: DeleteMode) -> Self {
        Self {
            item_ids: item_ids.into(),
            delete_mode,
            send_cancellations_mode: None,
            affected_task_occurrences: None,
            suppress_read_receipts: false,
        }
    }

    /// Set the cancellation mode for meeting items.
    #[must_use]
    pub fn with_send_cancellations_mode(mut self, mode: SendCancellationsMode) -> Self {
        self.send_cancellations_mode = Some(mode);
        self
    }

    /// Set the occurrence scope for task items.
    #[must_use]
    pub fn with_affected_task_occurrences(mut self, occurrences: AffectedTaskOccurrences) -> Self {
        self.affected_task_occurrences = Some(occurrences);
        self
    }

    /// Suppress read receipts.
    #[must_use]
    pub fn with_suppress_read_receipts(mut self, suppress: bool) -> Self {
        self.suppress_read_receipts = suppress;
        self
    }
}

impl ServiceOperation for DeleteItem {
    type Payload = ();

    const NAME: &'static str = names::DELETE_ITEM;
    const RESPONSE_NAME: &'static str = names::DELETE_ITEM_RESPONSE;
    const RESPONSE_MESSAGE_NAME: &'static str = names::DELETE_ITEM_RESPONSE_MESSAGE;
    const MINIMUM_VERSION: ExchangeVersion = ExchangeVersion::Exchange2007Sp1;

    fn xml_attributes(&self) -> Vec<(&'static str, &'static str)> {
        let mut attributes = vec![(names::DELETE_TYPE, self.delete_mode.as_str())];
        if let Some(mode) = self.send_cancellations_mode {
            attributes.push((names::SEND_MEETING_CANCELLATIONS, mode.as_str()));
        }
        if let Some(occurrences) = self.affected_task_occurrences {
            attributes.push((names::AFFECTED_TASK_OCCURRENCES, occurrences.as_str()));
        }
        if self.suppress_read_receipts {
            attributes.push((names::SUPPRESS_READ_RECEIPTS, "true"));
        }
        attributes
    }

    fn validate(&self, version: ExchangeVersion) -> Result<(), EwsError> {
        validate_id_list(&self.item_ids, names::ITEM_IDS, version)?;
        if self.suppress_read_receipts && version < ExchangeVersion::Exchange2013Sp1 {
            return Err(EwsError::UnsupportedVersion {
                feature: names::SUPPRESS_READ_RECEIPTS.to_owned(),
                required: ExchangeVersion::Exchange2013Sp1,
                actual: version,
            });
        }
        Ok(())
    }

    fn expected_outcome_count(&self) -> usize {
        self.item_ids.len()
    }

    fn write_xml_body<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        rustews_xml::write_id_list(
            writer,
            &self.item_ids,
            XmlNamespace::Messages,
            names::ITEM_IDS,
        )
    }

    fn write_json_body(&self, body: &mut Map<String, Value>) {
        for (key, value) in self.xml_attributes() {
            let value = if key == names::SUPPRESS_READ_RECEIPTS {
                Value::Bool(true)
            } else {
                Value::String(value.to_owned())
            };
            body.insert(key.to_owned(), value);
        }
        body.insert(
            names::ITEM_IDS.to_owned(),
            rustews_json::write_id_list(&self.item_ids),
        );
    }
}
