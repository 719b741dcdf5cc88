//! The transport seam.
//!
//! The controller never opens connections. It hands a [`WireRequest`] to a
//! [`Transport`] and decodes the [`WireReply`] it gets back. Authentication,
//! retries, timeouts and cancellation all belong to the implementation.

use std::sync::Arc;

use bytes::Bytes;

use crate::config::WireFormat;

/// A fully encoded request.
#[derive(Debug, Clone)]
pub struct WireRequest {
    /// Encoding of `body`.
    pub format: WireFormat,
    /// Operation name, e.g. `DeleteFolder`. Usable as the SOAP action.
    pub operation: &'static str,
    /// The payload.
    pub body: Bytes,
}

impl WireRequest {
    /// HTTP content type of the payload.
    #[must_use]
    pub fn content_type(&self) -> &'static str {
        self.format.content_type()
    }
}

/// The raw reply to a [`WireRequest`].
#[derive(Debug, Clone)]
pub struct WireReply {
    /// The payload, in the request's encoding.
    pub body: Bytes,
}

impl WireReply {
    /// Wrap a reply payload.
    #[must_use]
    pub fn new(body: impl Into<Bytes>) -> Self {
        Self { body: body.into() }
    }
}

/// Sends one request and returns the server's reply.
///
/// An `Err` means no usable reply arrived (I/O failure, timeout, cancellation).
/// HTTP-level errors that still carry a SOAP body should be returned as `Ok`
/// so the body can be decoded.
pub trait Transport {
    /// Perform the exchange. Blocks until the reply is available.
    fn exchange(&self, request: WireRequest) -> anyhow::Result<WireReply>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn exchange(&self, request: WireRequest) -> anyhow::Result<WireReply> {
        (**self).exchange(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn exchange(&self, request: WireRequest) -> anyhow::Result<WireReply> {
        (**self).exchange(request)
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn exchange(&self, request: WireRequest) -> anyhow::Result<WireReply> {
        (**self).exchange(request)
    }
}
