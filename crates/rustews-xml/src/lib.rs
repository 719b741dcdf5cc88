//! EWS XML serialization/deserialization for `Rustews`.
//!
//! This crate provides the markup half of the dual-encoding codec: conversion
//! between model types and the SOAP/XML wire format.
//!
//! # Key components
//!
//! - [`EwsXmlReader`], a namespace-aware cursor over an XML document
//! - [`EwsSerialize`] and [`write_id_list`] for writing request bodies
//! - [`EwsDeserialize`], [`from_xml`] and [`read_id_list`] for reading replies
//!
//! # EWS XML conventions
//!
//! - Messages namespace (`m:`): `http://schemas.microsoft.com/exchange/services/2006/messages`
//! - Types namespace (`t:`): `http://schemas.microsoft.com/exchange/services/2006/types`
//! - Booleans: `true`/`false` (`1`/`0` accepted on input)
//! - Unknown elements inside a known container are skipped

pub mod deserialize;
pub mod error;
pub mod namespace;
pub mod reader;
pub mod serialize;

pub use deserialize::{
    EwsDeserialize, ListElement, from_xml, read_discovery_search_configurations, read_id_list,
};
pub use error::XmlError;
pub use namespace::XmlNamespace;
pub use reader::EwsXmlReader;
pub use serialize::{EwsSerialize, to_xml, write_bool_element, write_id_list, write_text_element};
