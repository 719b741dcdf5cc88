//! Exchange Web Services model types for Rustews.
//!
//! Plain owned values shared by the XML codec, the JSON codec and the request
//! controller: protocol versions, identifiers, response classification, batch
//! outcomes and the discovery search configuration entity. Nothing here knows
//! about a wire encoding; [`names`] is the symbol table both encodings share.

pub mod ids;
pub mod names;
pub mod response;
pub mod search;
pub mod types;
pub mod version;

pub use ids::{FolderId, IdList, ItemId, Mailbox, ServiceObjectId, WellKnownFolderName};
pub use response::{
    BatchOutcomes, ErrorHandlingMode, Outcome, ResponseClass, ResponseCode, ServiceFailure,
};
pub use search::{DiscoverySearchConfiguration, DiscoverySearchConfigurationFields, SearchableMailbox};
pub use types::{AffectedTaskOccurrences, DeleteMode, SendCancellationsMode};
pub use version::ExchangeVersion;
