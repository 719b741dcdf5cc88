//! The batch request/response controller.

use anyhow::Error as AnyError;
use tracing::{debug, trace, warn};

use rustews_model::{
    BatchOutcomes, ErrorHandlingMode, Outcome, ResponseClass, ResponseCode, ServiceFailure,
};

use crate::config::{EwsConfig, WireFormat};
use crate::error::{EwsError, EwsResult};
use crate::operation::ServiceOperation;
use crate::transport::{Transport, WireRequest};
use crate::wire;

/// One decoded response message, before reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseMessage<P> {
    /// Classification from the `ResponseClass` attribute or key.
    pub class: ResponseClass,
    /// `ResponseCode`; `NoError` when absent.
    pub code: ResponseCode,
    /// `MessageText`; empty when absent.
    pub message_text: String,
    /// The payload. Left at its default for `Error` messages.
    pub payload: P,
}

/// Drives request/response cycles over a [`Transport`].
///
/// Holds no per-call state, so one controller can serve concurrent calls when
/// its transport allows it.
#[derive(Debug)]
pub struct BatchController<T> {
    config: EwsConfig,
    transport: T,
}

impl<T: Transport> BatchController<T> {
    /// Create a controller.
    #[must_use]
    pub fn new(config: EwsConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// The session configuration.
    #[must_use]
    pub fn config(&self) -> &EwsConfig {
        &self.config
    }

    /// Run `operation` with the configured error-handling mode.
    pub fn execute<O: ServiceOperation>(
        &self,
        operation: &O,
    ) -> EwsResult<BatchOutcomes<O::Payload>> {
        self.execute_with_mode(operation, self.config.error_handling)
    }

    /// Run `operation`, surfacing per-item failures according to `mode`.
    ///
    /// On `Ok` the outcome set has exactly
    /// [`expected_outcome_count`](ServiceOperation::expected_outcome_count)
    /// entries, in request order.
    pub fn execute_with_mode<O: ServiceOperation>(
        &self,
        operation: &O,
        mode: ErrorHandlingMode,
    ) -> EwsResult<BatchOutcomes<O::Payload>> {
        let version = self.config.requested_server_version;
        if version < O::MINIMUM_VERSION {
            return Err(EwsError::UnsupportedVersion {
                feature: O::NAME.to_owned(),
                required: O::MINIMUM_VERSION,
                actual: version,
            });
        }
        operation.validate(version)?;

        let expected = operation.expected_outcome_count();
        let format = self.config.wire_format;
        let body = match format {
            WireFormat::Xml => wire::xml::build_request(operation, version)?,
            WireFormat::Json => wire::json::build_request(operation, version)?,
        };
        debug!(
            operation = O::NAME,
            %format,
            ?mode,
            expected,
            bytes = body.len(),
            "sending request"
        );
        if self.config.trace_payloads {
            trace!(payload = %String::from_utf8_lossy(&body), "request payload");
        }

        let request = WireRequest {
            format,
            operation: O::NAME,
            body,
        };
        let reply = match self.transport.exchange(request) {
            Ok(reply) => reply,
            Err(err) => return fold_transport_failure(O::NAME, err, expected, mode),
        };
        debug!(operation = O::NAME, bytes = reply.body.len(), "received reply");
        if self.config.trace_payloads {
            trace!(payload = %String::from_utf8_lossy(&reply.body), "reply payload");
        }

        match format {
            WireFormat::Xml => {
                let messages = wire::xml::XmlReplyReader::open(operation, &reply.body)?;
                reconcile(messages, expected, mode)
            }
            WireFormat::Json => {
                let root: serde_json::Value = serde_json::from_slice(&reply.body)
                    .map_err(|e| EwsError::MalformedResponse(e.to_string()))?;
                let messages = wire::json::JsonReplyReader::open(operation, &root)?;
                reconcile(messages, expected, mode)
            }
        }
    }
}

/// A failed exchange fails every identifier: raised as-is in throw mode,
/// otherwise one `ErrorConnectionFailed` outcome per identifier.
fn fold_transport_failure<P>(
    operation: &str,
    err: AnyError,
    expected: usize,
    mode: ErrorHandlingMode,
) -> EwsResult<BatchOutcomes<P>> {
    warn!(operation, error = %format!("{err:#}"), "transport exchange failed");
    match mode {
        ErrorHandlingMode::ThrowOnFirstFailure => Err(EwsError::Transport(err)),
        ErrorHandlingMode::ReturnAllOutcomes => {
            let message = format!("{err:#}");
            Ok(BatchOutcomes::new(
                (0..expected)
                    .map(|index| {
                        Outcome::Failure(ServiceFailure {
                            index,
                            code: ResponseCode::ConnectionFailed,
                            message: message.clone(),
                        })
                    })
                    .collect(),
            ))
        }
    }
}

/// Pair decoded response messages with request identifiers by position.
///
/// Messages are pulled one at a time. In `ThrowOnFirstFailure` mode the first
/// `Error` message is raised as [`EwsError::OperationFailure`] and nothing
/// after it is pulled. `Warning` messages count as successes. A decode error
/// or a message count other than `expected` is
/// [`EwsError::MalformedResponse`].
pub fn reconcile<P, I>(
    messages: I,
    expected: usize,
    mode: ErrorHandlingMode,
) -> EwsResult<BatchOutcomes<P>>
where
    I: IntoIterator<Item = EwsResult<ResponseMessage<P>>>,
{
    let mut outcomes = Vec::with_capacity(expected);
    for (index, message) in messages.into_iter().enumerate() {
        if index >= expected {
            return Err(EwsError::MalformedResponse(format!(
                "expected {expected} response messages, got more"
            )));
        }
        let message = message?;
        match message.class {
            ResponseClass::Success => outcomes.push(Outcome::Success(message.payload)),
            ResponseClass::Warning => {
                warn!(
                    index,
                    code = %message.code,
                    text = %message.message_text,
                    "response message carries a warning"
                );
                outcomes.push(Outcome::Success(message.payload));
            }
            ResponseClass::Error => {
                debug!(index, code = %message.code, "response message failed");
                if mode == ErrorHandlingMode::ThrowOnFirstFailure {
                    return Err(EwsError::OperationFailure {
                        index,
                        code: message.code,
                        message: message.message_text,
                    });
                }
                outcomes.push(Outcome::Failure(ServiceFailure {
                    index,
                    code: message.code,
                    message: message.message_text,
                }));
            }
        }
    }

    if outcomes.len() != expected {
        return Err(EwsError::MalformedResponse(format!(
            "expected {expected} response messages, got {}",
            outcomes.len()
        )));
    }
    Ok(BatchOutcomes::new(outcomes))
}
