//! `DeleteFolder`.

use std::io::{self, Write};

use quick_xml::Writer;
use serde_json::{Map, Value};

use rustews_model::names;
use rustews_model::{DeleteMode, ExchangeVersion, FolderId, IdList};
use rustews_xml::XmlNamespace;

use crate::error::EwsError;
use crate::operation::{ServiceOperation, validate_id_list};

/// Deletes folders. One response message per folder id; no payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteFolder {
    /// Folders to delete, in request order.
    pub folder_ids: IdList<FolderId>,
    /// How the folders are disposed of.
    pub delete_mode: DeleteMode,
}

impl DeleteFolder {
    /// Delete `folder_ids` with `delete_mode`.
    #[must_use]
    pub fn new(folder_ids: impl Into<IdList<FolderId>>, delete_mode: DeleteMode) -> Self {
        Self {
            folder_ids: folder_ids.into(),
            delete_mode,
        }
    }
}

impl ServiceOperation for DeleteFolder {
    type Payload = ();

    const NAME: &'static str = names::DELETE_FOLDER;
    const RESPONSE_NAME: &'static str = names::DELETE_FOLDER_RESPONSE;
    const RESPONSE_MESSAGE_NAME: &'static str = names::DELETE_FOLDER_RESPONSE_MESSAGE;
    const MINIMUM_VERSION: ExchangeVersion = ExchangeVersion::Exchange2007Sp1;

    fn xml_attributes(&self) -> Vec<(&'static str, &'static str)> {
        vec![(names::DELETE_TYPE, self.delete_mode.as_str())]
    }

    fn validate(&self, version: ExchangeVersion) -> Result<(), EwsError> {
        validate_id_list(&self.folder_ids, names::FOLDER_IDS, version)
    }

    fn expected_outcome_count(&self) -> usize {
        self.folder_ids.len()
    }

    fn write_xml_body<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        rustews_xml::write_id_list(
            writer,
            &self.folder_ids,
            XmlNamespace::Messages,
            names::FOLDER_IDS,
        )
    }

    fn write_json_body(&self, body: &mut Map<String, Value>) {
        body.insert(
            names::DELETE_TYPE.to_owned(),
            Value::String(self.delete_mode.as_str().to_owned()),
        );
        body.insert(
            names::FOLDER_IDS.to_owned(),
            rustews_json::write_id_list(&self.folder_ids),
        );
    }
}
