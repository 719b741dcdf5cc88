//! EWS JSON serialization/deserialization for `Rustews`.
//!
//! The structured half of the dual-encoding codec. Objects carry a `__type`
//! discriminator of the form `Name:#Exchange`; every other key equals the XML
//! element or attribute name of the same field, so both encodings describe the
//! same logical entity.
//!
//! # Key components
//!
//! - [`JsonObject`], a read-only view over a JSON object with lenient accessors
//! - [`JsonSerialize`] and [`write_id_list`] for writing request bodies
//! - [`JsonDeserialize`], [`from_slice`] and [`read_id_list`] for reading replies

pub mod deserialize;
pub mod error;
pub mod object;
pub mod serialize;

pub use deserialize::{
    JsonDeserialize, JsonListElement, from_slice, read_discovery_search_configurations,
    read_id_list,
};
pub use error::JsonError;
pub use object::JsonObject;
pub use serialize::{JsonSerialize, type_tag, write_id_list};
