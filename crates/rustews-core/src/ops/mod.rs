//! Concrete batch operations.

mod delete_folder;
mod delete_item;
mod get_discovery_search_configuration;

pub use delete_folder::DeleteFolder;
pub use delete_item::DeleteItem;
pub use get_discovery_search_configuration::GetDiscoverySearchConfiguration;
