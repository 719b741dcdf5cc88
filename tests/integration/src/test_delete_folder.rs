//! `DeleteFolder` end to end, over both encodings.

#[cfg(test)]
mod tests {
    use rustews_core::{DeleteFolder, EwsError, WireFormat};
    use rustews_model::{
        DeleteMode, ErrorHandlingMode, ExchangeVersion, FolderId, Mailbox, Outcome, ResponseClass,
        ResponseCode, WellKnownFolderName,
    };
    use serde_json::{Value, json};

    use crate::{
        Scripted, ScriptedTransport, controller, json_message, json_reply, xml_message, xml_reply,
    };

    const MESSAGE: &str = "DeleteFolderResponseMessage";

    fn xml_success() -> String {
        xml_message(MESSAGE, "Success", "NoError", None, "")
    }

    fn xml_not_found() -> String {
        xml_message(
            MESSAGE,
            "Error",
            "ErrorItemNotFound",
            Some("The specified object was not found in the store."),
            "",
        )
    }

    #[test]
    fn test_should_delete_two_folders_and_report_per_folder_outcomes() {
        let reply = xml_reply(
            "DeleteFolderResponse",
            &format!("{}{}", xml_success(), xml_not_found()),
        );
        let transport = ScriptedTransport::replying(reply);
        let controller = controller(
            &transport,
            WireFormat::Xml,
            ExchangeVersion::Exchange2013Sp1,
            ErrorHandlingMode::ReturnAllOutcomes,
        );
        let op = DeleteFolder::new(
            vec![FolderId::new("F1"), FolderId::new("F2")],
            DeleteMode::HardDelete,
        );

        let outcomes = controller.execute(&op).expect("batch completes");

        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes.get(0), Some(&Outcome::Success(())));
        let failure = outcomes.get(1).and_then(Outcome::failure).expect("F2 failed");
        assert_eq!(failure.index, 1);
        assert_eq!(failure.code, ResponseCode::ItemNotFound);
        assert_eq!(
            failure.message,
            "The specified object was not found in the store."
        );
        assert_eq!(outcomes.overall_result(), ResponseClass::Error);

        let request = transport.single_request_body();
        assert!(request.contains(r#"<t:RequestServerVersion Version="Exchange2013_SP1"/>"#));
        assert!(request.contains(
            r#"<m:DeleteFolder DeleteType="HardDelete"><m:FolderIds><t:FolderId Id="F1"/><t:FolderId Id="F2"/></m:FolderIds></m:DeleteFolder>"#
        ));
    }

    #[test]
    fn test_should_raise_the_first_failure_in_throw_mode() {
        let reply = xml_reply(
            "DeleteFolderResponse",
            &format!("{}{}", xml_success(), xml_not_found()),
        );
        let transport = ScriptedTransport::replying(reply);
        let controller = controller(
            &transport,
            WireFormat::Xml,
            ExchangeVersion::Exchange2013Sp1,
            ErrorHandlingMode::ThrowOnFirstFailure,
        );
        let op = DeleteFolder::new(
            vec![FolderId::new("F1"), FolderId::new("F2")],
            DeleteMode::HardDelete,
        );

        let err = controller.execute(&op).expect_err("F2 is missing");
        assert!(matches!(
            err,
            EwsError::OperationFailure { index: 1, code: ResponseCode::ItemNotFound, .. }
        ));
    }

    #[test]
    fn test_should_delete_folders_over_json() {
        let reply = json_reply(
            "DeleteFolderResponse",
            vec![
                json_message(MESSAGE, "Success", "NoError", None),
                json_message(MESSAGE, "Error", "ErrorItemNotFound", Some("not found")),
            ],
        );
        let transport = ScriptedTransport::replying(reply);
        let controller = controller(
            &transport,
            WireFormat::Json,
            ExchangeVersion::Exchange2013Sp1,
            ErrorHandlingMode::ReturnAllOutcomes,
        );
        let op = DeleteFolder::new(
            vec![FolderId::new("F1"), FolderId::new("F2")],
            DeleteMode::SoftDelete,
        );

        let outcomes = controller.execute(&op).expect("batch completes");

        assert!(outcomes.get(0).is_some_and(Outcome::is_success));
        assert_eq!(
            outcomes.failures().map(|f| (f.index, f.code.clone())).collect::<Vec<_>>(),
            vec![(1, ResponseCode::ItemNotFound)]
        );

        let requests = transport.requests();
        assert_eq!(requests[0].content_type(), "application/json; charset=utf-8");
        let sent: Value = serde_json::from_slice(&requests[0].body).expect("JSON request");
        assert_eq!(
            sent,
            json!({
                "__type": "DeleteFolderJsonRequest:#Exchange",
                "Header": { "RequestServerVersion": "Exchange2013_SP1" },
                "Body": {
                    "__type": "DeleteFolderRequest:#Exchange",
                    "DeleteType": "SoftDelete",
                    "FolderIds": [
                        { "__type": "FolderId:#Exchange", "Id": "F1" },
                        { "__type": "FolderId:#Exchange", "Id": "F2" }
                    ]
                }
            })
        );
    }

    #[test]
    fn test_should_send_shared_mailbox_folder() {
        let reply = xml_reply("DeleteFolderResponse", &xml_success());
        let transport = ScriptedTransport::replying(reply);
        let controller = controller(
            &transport,
            WireFormat::Xml,
            ExchangeVersion::Exchange2010Sp1,
            ErrorHandlingMode::ThrowOnFirstFailure,
        );
        let op = DeleteFolder::new(
            vec![FolderId::shared(
                WellKnownFolderName::ArchiveRoot,
                Mailbox::new("owner@contoso.com"),
            )],
            DeleteMode::MoveToDeletedItems,
        );

        controller.execute(&op).expect("deleted");

        let request = transport.single_request_body();
        assert!(request.contains(
            "<t:DistinguishedFolderId Id=\"archiveroot\"><t:Mailbox><t:EmailAddress>owner@contoso.com</t:EmailAddress></t:Mailbox></t:DistinguishedFolderId>"
        ));
    }

    #[test]
    fn test_should_reject_folder_newer_than_session_before_sending() {
        let transport = ScriptedTransport::idle();
        let controller = controller(
            &transport,
            WireFormat::Xml,
            ExchangeVersion::Exchange2010,
            ErrorHandlingMode::ReturnAllOutcomes,
        );
        let op = DeleteFolder::new(
            vec![
                FolderId::new("F1"),
                FolderId::well_known(WellKnownFolderName::RecoverableItemsRoot),
            ],
            DeleteMode::HardDelete,
        );

        let err = controller.execute(&op).expect_err("too new");
        assert!(matches!(
            err,
            EwsError::UnsupportedVersion { ref feature, required: ExchangeVersion::Exchange2010Sp1, .. }
                if feature == "FolderIds[1]"
        ));
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn test_should_reject_empty_folder_list_before_sending() {
        let transport = ScriptedTransport::idle();
        let controller = controller(
            &transport,
            WireFormat::Json,
            ExchangeVersion::Exchange2013,
            ErrorHandlingMode::ReturnAllOutcomes,
        );
        let op = DeleteFolder::new(Vec::<FolderId>::new(), DeleteMode::HardDelete);

        assert!(matches!(
            controller.execute(&op),
            Err(EwsError::InvalidArgument { ref param, .. }) if param == "FolderIds"
        ));
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn test_should_fold_transport_failure_into_every_outcome() {
        let transport = ScriptedTransport::failing("connection reset by peer");
        let controller = controller(
            &transport,
            WireFormat::Xml,
            ExchangeVersion::Exchange2013,
            ErrorHandlingMode::ReturnAllOutcomes,
        );
        let op = DeleteFolder::new(
            vec![FolderId::new("F1"), FolderId::new("F2"), FolderId::new("F3")],
            DeleteMode::HardDelete,
        );

        let outcomes = controller.execute(&op).expect("folded");
        assert_eq!(outcomes.len(), 3);
        for (index, failure) in outcomes.failures().enumerate() {
            assert_eq!(failure.index, index);
            assert_eq!(failure.code, ResponseCode::ConnectionFailed);
            assert!(failure.message.contains("connection reset by peer"));
        }
        assert_eq!(outcomes.failures().count(), 3);
    }

    #[test]
    fn test_should_raise_transport_failure_in_throw_mode() {
        let transport = ScriptedTransport::scripted([Scripted::Fail("timed out".to_owned())]);
        let controller = controller(
            &transport,
            WireFormat::Json,
            ExchangeVersion::Exchange2013,
            ErrorHandlingMode::ThrowOnFirstFailure,
        );
        let op = DeleteFolder::new(vec![FolderId::new("F1")], DeleteMode::HardDelete);

        let err = controller.execute(&op).expect_err("transport failed");
        assert!(matches!(err, EwsError::Transport(_)));
        assert!(err.to_string().contains("timed out"));
    }

    #[test]
    fn test_should_surface_soap_fault() {
        let fault = format!(
            r#"<?xml version="1.0" encoding="utf-8"?>
<s:Envelope xmlns:s="{soap}">
  <s:Body>
    <s:Fault>
      <faultcode xmlns:a="{t}">a:ErrorSchemaValidation</faultcode>
      <faultstring>The request failed schema validation.</faultstring>
    </s:Fault>
  </s:Body>
</s:Envelope>"#,
            soap = crate::ns::SOAP,
            t = crate::ns::T,
        );
        let transport = ScriptedTransport::replying(fault);
        let controller = controller(
            &transport,
            WireFormat::Xml,
            ExchangeVersion::Exchange2013,
            ErrorHandlingMode::ReturnAllOutcomes,
        );
        let op = DeleteFolder::new(vec![FolderId::new("F1")], DeleteMode::HardDelete);

        let err = controller.execute(&op).expect_err("fault");
        assert!(matches!(
            err,
            EwsError::ServiceFault { ref code, ref message }
                if code == "a:ErrorSchemaValidation" && message == "The request failed schema validation."
        ));
    }

    #[test]
    fn test_should_reject_reply_for_another_operation() {
        let reply = xml_reply(
            "DeleteItemResponse",
            &xml_message("DeleteItemResponseMessage", "Success", "NoError", None, ""),
        );
        let transport = ScriptedTransport::replying(reply);
        let controller = controller(
            &transport,
            WireFormat::Xml,
            ExchangeVersion::Exchange2013,
            ErrorHandlingMode::ReturnAllOutcomes,
        );
        let op = DeleteFolder::new(vec![FolderId::new("F1")], DeleteMode::HardDelete);

        assert!(matches!(
            controller.execute(&op),
            Err(EwsError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_should_reject_message_count_mismatch() {
        let reply = xml_reply("DeleteFolderResponse", &xml_success());
        let transport = ScriptedTransport::replying(reply);
        let controller = controller(
            &transport,
            WireFormat::Xml,
            ExchangeVersion::Exchange2013,
            ErrorHandlingMode::ReturnAllOutcomes,
        );
        let op = DeleteFolder::new(
            vec![FolderId::new("F1"), FolderId::new("F2")],
            DeleteMode::HardDelete,
        );

        assert!(matches!(
            controller.execute(&op),
            Err(EwsError::MalformedResponse(_))
        ));
    }
}
