//! Identifier lists through both encodings, as requests carry them.

#[cfg(test)]
mod tests {
    use rustews_model::names;
    use rustews_model::{FolderId, IdList, ItemId, Mailbox, WellKnownFolderName};
    use rustews_xml::{EwsXmlReader, XmlNamespace};

    fn mixed_folders() -> IdList<FolderId> {
        vec![
            FolderId::new("F1"),
            FolderId::Id {
                id: "F2".to_owned(),
                change_key: Some("CK2".to_owned()),
            },
            FolderId::well_known(WellKnownFolderName::Inbox),
            FolderId::shared(
                WellKnownFolderName::Calendar,
                Mailbox {
                    email_address: "room@contoso.com".to_owned(),
                    routing_type: Some("SMTP".to_owned()),
                },
            ),
            FolderId::new("F1"),
        ]
        .into()
    }

    fn xml_folders(list: &IdList<FolderId>) -> IdList<FolderId> {
        let mut buf = Vec::new();
        let mut writer = quick_xml::Writer::new(&mut buf);
        writer
            .create_element(XmlNamespace::Soap.qualify(names::BODY))
            .with_attributes(XmlNamespace::ALL.map(|ns| (ns.declaration(), ns.uri())))
            .write_inner_content(|w| {
                rustews_xml::write_id_list(w, list, XmlNamespace::Messages, names::FOLDER_IDS)
            })
            .expect("write");

        let mut reader = EwsXmlReader::new(&buf);
        reader.read().expect("body");
        reader
            .read_start_element(XmlNamespace::Messages, names::FOLDER_IDS)
            .expect("container");
        rustews_xml::read_id_list(&mut reader, XmlNamespace::Messages, names::FOLDER_IDS)
            .expect("read")
    }

    fn json_folders(list: &IdList<FolderId>) -> IdList<FolderId> {
        let value = rustews_json::write_id_list(list);
        let entries = value.as_array().expect("array");
        rustews_json::read_id_list(entries).expect("read")
    }

    #[test]
    fn test_should_carry_folder_ids_through_xml_in_order() {
        let original = mixed_folders();
        assert_eq!(xml_folders(&original), original);
    }

    #[test]
    fn test_should_carry_folder_ids_through_json_in_order() {
        let original = mixed_folders();
        assert_eq!(json_folders(&original), original);
    }

    #[test]
    fn test_should_carry_item_ids_with_change_keys_through_json() {
        let original: IdList<ItemId> = vec![
            ItemId::new("I1"),
            ItemId {
                id: "I2".to_owned(),
                change_key: Some("CK".to_owned()),
            },
        ]
        .into();

        let value = rustews_json::write_id_list(&original);
        let decoded: IdList<ItemId> =
            rustews_json::read_id_list(value.as_array().expect("array")).expect("read");
        assert_eq!(decoded, original);
    }
}
