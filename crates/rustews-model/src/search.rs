//! Discovery search configuration entities.
//!
//! Both wire decoders collect what they saw into a
//! [`DiscoverySearchConfigurationFields`] presence record and finish through
//! [`DiscoverySearchConfigurationFields::into_configuration`], so defaulting is
//! identical whichever encoding the payload arrived in.

use uuid::Uuid;

/// A mailbox that a discovery search covers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchableMailbox {
    /// Mailbox GUID; nil when the server sent none.
    pub guid: Uuid,
    /// Primary SMTP address.
    pub primary_smtp_address: String,
    /// Whether the mailbox lives outside the organization.
    pub is_external_mailbox: bool,
    /// External address for external mailboxes.
    pub external_email_address: String,
    /// Display name.
    pub display_name: String,
    /// Whether the entry is a distribution group.
    pub is_membership_group: bool,
    /// Directory reference id.
    pub reference_id: String,
}

/// A saved discovery (eDiscovery) search.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DiscoverySearchConfiguration {
    /// Search id. Required on the wire but not enforced by the decoders.
    pub search_id: String,
    /// Search query; empty when absent.
    pub search_query: String,
    /// Mailboxes in scope. `None` when the server sent no mailboxes, either by
    /// omitting the element or by sending it empty. Never `Some(vec![])`.
    pub searchable_mailboxes: Option<Vec<SearchableMailbox>>,
    /// In-place hold identity; empty when absent.
    pub in_place_hold_identity: String,
    /// Managing organization; empty when absent.
    pub managed_by_organization: String,
    /// Query language; empty when absent.
    pub language: String,
}

/// Fields of a [`DiscoverySearchConfiguration`] as they were found on the wire.
///
/// `None` means the element or key was absent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DiscoverySearchConfigurationFields {
    /// `SearchId`.
    pub search_id: Option<String>,
    /// `SearchQuery`.
    pub search_query: Option<String>,
    /// `SearchableMailboxes`, with the mailboxes decoded so far.
    pub searchable_mailboxes: Option<Vec<SearchableMailbox>>,
    /// `InPlaceHoldIdentity`.
    pub in_place_hold_identity: Option<String>,
    /// `ManagedByOrganization`.
    pub managed_by_organization: Option<String>,
    /// `Language`.
    pub language: Option<String>,
}

impl DiscoverySearchConfigurationFields {
    /// Fill defaults and build the entity.
    ///
    /// Absent strings become `""`; an absent or empty mailbox collection
    /// becomes `None`.
    #[must_use]
    pub fn into_configuration(self) -> DiscoverySearchConfiguration {
        DiscoverySearchConfiguration {
            search_id: self.search_id.unwrap_or_default(),
            search_query: self.search_query.unwrap_or_default(),
            searchable_mailboxes: self.searchable_mailboxes.filter(|m| !m.is_empty()),
            in_place_hold_identity: self.in_place_hold_identity.unwrap_or_default(),
            managed_by_organization: self.managed_by_organization.unwrap_or_default(),
            language: self.language.unwrap_or_default(),
        }
    }
}
