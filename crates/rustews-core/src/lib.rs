//! Batch request/response controller for `Rustews`.
//!
//! Drives one request/response cycle of an Exchange Web Services batch
//! operation: validation, request building in the configured wire encoding,
//! the transport exchange, lazy reply decoding and reconciliation of the
//! per-item outcomes according to the error-handling mode.
//!
//! # Architecture
//!
//! ```text
//! caller (operation + mode)
//!        |
//!        v
//! BatchController ---- validate / MINIMUM_VERSION
//!        |
//!        v
//!   wire::{xml, json} (request envelope, reply readers)
//!        |
//!        v
//!   Transport (external send/receive)
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod operation;
pub mod ops;
pub mod transport;
pub mod wire;

pub use config::{EwsConfig, WireFormat};
pub use controller::{BatchController, ResponseMessage, reconcile};
pub use error::{EwsError, EwsResult};
pub use operation::ServiceOperation;
pub use ops::{DeleteFolder, DeleteItem, GetDiscoverySearchConfiguration};
pub use transport::{Transport, WireReply, WireRequest};
