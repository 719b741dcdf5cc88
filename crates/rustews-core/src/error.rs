//! Client error types.
//!
//! [`EwsError`] is what a batch call returns when it does not produce an
//! outcome set. Codec errors convert into [`EwsError::MalformedResponse`]: by
//! the time a reply is decoded, any failure to read it means the server broke
//! the documented envelope.

use std::io;

use rustews_json::JsonError;
use rustews_model::{ExchangeVersion, ResponseCode};
use rustews_xml::XmlError;

/// Result alias for controller calls.
pub type EwsResult<T> = Result<T, EwsError>;

/// Errors raised by a request/response cycle.
#[derive(Debug, thiserror::Error)]
pub enum EwsError {
    /// A required input was missing or empty.
    #[error("invalid argument {param}: {message}")]
    InvalidArgument {
        /// The offending parameter.
        param: String,
        /// What is wrong with it.
        message: String,
    },

    /// The negotiated protocol version is too old for the request.
    #[error("{feature} requires {required} but the session uses {actual}")]
    UnsupportedVersion {
        /// What needs the newer version.
        feature: String,
        /// The oldest version that supports it.
        required: ExchangeVersion,
        /// The negotiated version.
        actual: ExchangeVersion,
    },

    /// The reply does not match the documented envelope.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The first failed item of a batch, raised in `ThrowOnFirstFailure` mode.
    ///
    /// Displays as the server-supplied message.
    #[error("{message}")]
    OperationFailure {
        /// Position of the failed identifier.
        index: usize,
        /// Server response code.
        code: ResponseCode,
        /// Server-supplied message.
        message: String,
    },

    /// The server answered with a SOAP fault instead of response messages.
    #[error("service fault {code}: {message}")]
    ServiceFault {
        /// Fault code.
        code: String,
        /// Fault string.
        message: String,
    },

    /// The transport exchange failed.
    #[error("transport error: {0:#}")]
    Transport(anyhow::Error),

    /// Writing the request failed.
    #[error("failed to serialize request: {0}")]
    Serialization(#[from] io::Error),
}

impl From<XmlError> for EwsError {
    fn from(err: XmlError) -> Self {
        Self::MalformedResponse(err.to_string())
    }
}

impl From<JsonError> for EwsError {
    fn from(err: JsonError) -> Self {
        Self::MalformedResponse(err.to_string())
    }
}
