//! `DeleteItem` end to end.

#[cfg(test)]
mod tests {
    use rustews_core::{DeleteItem, EwsError, WireFormat};
    use rustews_model::{
        AffectedTaskOccurrences, DeleteMode, ErrorHandlingMode, ExchangeVersion, ItemId, Outcome,
        ResponseClass, ResponseCode, SendCancellationsMode,
    };
    use serde_json::Value;

    use crate::{ScriptedTransport, controller, json_message, json_reply, xml_message, xml_reply};

    const MESSAGE: &str = "DeleteItemResponseMessage";

    fn three_items() -> Vec<ItemId> {
        vec![ItemId::new("I1"), ItemId::new("I2"), ItemId::new("I3")]
    }

    fn xml_second_fails() -> String {
        xml_reply(
            "DeleteItemResponse",
            &[
                xml_message(MESSAGE, "Success", "NoError", None, ""),
                xml_message(MESSAGE, "Error", "ErrorAccessDenied", Some("Access is denied."), ""),
                xml_message(MESSAGE, "Success", "NoError", None, ""),
            ]
            .concat(),
        )
    }

    #[test]
    fn test_should_return_every_outcome_when_the_middle_item_fails() {
        let transport = ScriptedTransport::replying(xml_second_fails());
        let controller = controller(
            &transport,
            WireFormat::Xml,
            ExchangeVersion::Exchange2010Sp2,
            ErrorHandlingMode::ReturnAllOutcomes,
        );
        let op = DeleteItem::new(three_items(), DeleteMode::MoveToDeletedItems);

        let outcomes = controller.execute(&op).expect("batch completes");

        let successes: Vec<bool> = outcomes.iter().map(Outcome::is_success).collect();
        assert_eq!(successes, vec![true, false, true]);
        let failure = outcomes.get(1).and_then(Outcome::failure).expect("I2 failed");
        assert_eq!(failure.code, ResponseCode::AccessDenied);
        assert_eq!(failure.message, "Access is denied.");
    }

    #[test]
    fn test_should_raise_the_middle_failure_in_throw_mode() {
        let transport = ScriptedTransport::replying(xml_second_fails());
        let controller = controller(
            &transport,
            WireFormat::Xml,
            ExchangeVersion::Exchange2010Sp2,
            ErrorHandlingMode::ReturnAllOutcomes,
        );
        let op = DeleteItem::new(three_items(), DeleteMode::MoveToDeletedItems);

        let err = controller
            .execute_with_mode(&op, ErrorHandlingMode::ThrowOnFirstFailure)
            .expect_err("I2 failed");
        assert!(matches!(
            err,
            EwsError::OperationFailure { index: 1, code: ResponseCode::AccessDenied, ref message }
                if message == "Access is denied."
        ));
        assert_eq!(err.to_string(), "Access is denied.");
    }

    #[test]
    fn test_should_treat_warnings_as_success() {
        let reply = xml_reply(
            "DeleteItemResponse",
            &xml_message(
                MESSAGE,
                "Warning",
                "ErrorBatchProcessingStopped",
                Some("stopped"),
                "",
            ),
        );
        let transport = ScriptedTransport::replying(reply);
        let controller = controller(
            &transport,
            WireFormat::Xml,
            ExchangeVersion::Exchange2013,
            ErrorHandlingMode::ThrowOnFirstFailure,
        );
        let op = DeleteItem::new(vec![ItemId::new("I1")], DeleteMode::SoftDelete);

        let outcomes = controller.execute(&op).expect("warnings do not fail");
        assert_eq!(outcomes.get(0), Some(&Outcome::Success(())));
        assert_eq!(outcomes.overall_result(), ResponseClass::Success);
    }

    #[test]
    fn test_should_send_meeting_and_task_modes_over_json() {
        let reply = json_reply(
            "DeleteItemResponse",
            vec![json_message(MESSAGE, "Success", "NoError", None)],
        );
        let transport = ScriptedTransport::replying(reply);
        let controller = controller(
            &transport,
            WireFormat::Json,
            ExchangeVersion::Exchange2013Sp1,
            ErrorHandlingMode::ThrowOnFirstFailure,
        );
        let op = DeleteItem::new(vec![ItemId::new("I1")], DeleteMode::HardDelete)
            .with_send_cancellations_mode(SendCancellationsMode::SendOnlyToAll)
            .with_affected_task_occurrences(AffectedTaskOccurrences::SpecifiedOccurrenceOnly)
            .with_suppress_read_receipts(true);

        controller.execute(&op).expect("deleted");

        let requests = transport.requests();
        let sent: Value = serde_json::from_slice(&requests[0].body).expect("JSON request");
        let body = &sent["Body"];
        assert_eq!(body["__type"], "DeleteItemRequest:#Exchange");
        assert_eq!(body["DeleteType"], "HardDelete");
        assert_eq!(body["SendMeetingCancellations"], "SendOnlyToAll");
        assert_eq!(body["AffectedTaskOccurrences"], "SpecifiedOccurrenceOnly");
        assert_eq!(body["SuppressReadReceipts"], true);
        assert_eq!(body["ItemIds"][0]["Id"], "I1");
    }

    #[test]
    fn test_should_refuse_read_receipt_suppression_on_older_sessions() {
        let transport = ScriptedTransport::idle();
        let controller = controller(
            &transport,
            WireFormat::Xml,
            ExchangeVersion::Exchange2013,
            ErrorHandlingMode::ReturnAllOutcomes,
        );
        let op = DeleteItem::new(vec![ItemId::new("I1")], DeleteMode::HardDelete)
            .with_suppress_read_receipts(true);

        let err = controller.execute(&op).expect_err("needs SP1");
        assert!(matches!(
            err,
            EwsError::UnsupportedVersion { required: ExchangeVersion::Exchange2013Sp1, .. }
        ));
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn test_should_keep_duplicate_ids_aligned() {
        let reply = json_reply(
            "DeleteItemResponse",
            vec![
                json_message(MESSAGE, "Success", "NoError", None),
                json_message(MESSAGE, "Error", "ErrorItemNotFound", Some("gone")),
            ],
        );
        let transport = ScriptedTransport::replying(reply);
        let controller = controller(
            &transport,
            WireFormat::Json,
            ExchangeVersion::Exchange2013,
            ErrorHandlingMode::ReturnAllOutcomes,
        );
        let op = DeleteItem::new(
            vec![ItemId::new("I1"), ItemId::new("I1")],
            DeleteMode::HardDelete,
        );

        let outcomes = controller.execute(&op).expect("batch completes");
        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.get(0).is_some_and(Outcome::is_success));
        assert_eq!(
            outcomes.get(1).and_then(Outcome::failure).map(|f| f.index),
            Some(1)
        );
    }

    #[test]
    fn test_should_reject_extra_json_messages() {
        let reply = json_reply(
            "DeleteItemResponse",
            vec![
                json_message(MESSAGE, "Success", "NoError", None),
                json_message(MESSAGE, "Success", "NoError", None),
            ],
        );
        let transport = ScriptedTransport::replying(reply);
        let controller = controller(
            &transport,
            WireFormat::Json,
            ExchangeVersion::Exchange2013,
            ErrorHandlingMode::ReturnAllOutcomes,
        );
        let op = DeleteItem::new(vec![ItemId::new("I1")], DeleteMode::HardDelete);

        assert!(matches!(
            controller.execute(&op),
            Err(EwsError::MalformedResponse(_))
        ));
    }
}
