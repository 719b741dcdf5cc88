//! Request envelopes and reply readers, one module per wire encoding.
//!
//! Both readers are lazy: a response message is decoded only when the
//! reconciliation loop asks for it.

pub mod json;
pub mod xml;
