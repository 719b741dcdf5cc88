//! Protocol element names.
//!
//! The same names are used as XML element/attribute local names and as JSON
//! object keys, so both encodings describe the identical logical entity.
#![allow(missing_docs)]

// Envelope
pub const ENVELOPE: &str = "Envelope";
pub const HEADER: &str = "Header";
pub const BODY: &str = "Body";
pub const FAULT: &str = "Fault";
pub const FAULT_CODE: &str = "faultcode";
pub const FAULT_STRING: &str = "faultstring";
pub const REQUEST_SERVER_VERSION: &str = "RequestServerVersion";
pub const VERSION: &str = "Version";

// JSON envelope
pub const JSON_TYPE: &str = "__type";
pub const JSON_TYPE_SUFFIX: &str = ":#Exchange";
pub const ITEMS: &str = "Items";

// Response messages
pub const RESPONSE_MESSAGES: &str = "ResponseMessages";
pub const RESPONSE_CLASS: &str = "ResponseClass";
pub const RESPONSE_CODE: &str = "ResponseCode";
pub const MESSAGE_TEXT: &str = "MessageText";
pub const DESCRIPTIVE_LINK_KEY: &str = "DescriptiveLinkKey";
pub const MESSAGE_XML: &str = "MessageXml";

// Identifiers
pub const FOLDER_IDS: &str = "FolderIds";
pub const FOLDER_ID: &str = "FolderId";
pub const DISTINGUISHED_FOLDER_ID: &str = "DistinguishedFolderId";
pub const ITEM_IDS: &str = "ItemIds";
pub const ITEM_ID: &str = "ItemId";
pub const ID: &str = "Id";
pub const CHANGE_KEY: &str = "ChangeKey";
pub const MAILBOX: &str = "Mailbox";
pub const EMAIL_ADDRESS: &str = "EmailAddress";
pub const ROUTING_TYPE: &str = "RoutingType";

// Delete operations
pub const DELETE_FOLDER: &str = "DeleteFolder";
pub const DELETE_FOLDER_RESPONSE: &str = "DeleteFolderResponse";
pub const DELETE_FOLDER_RESPONSE_MESSAGE: &str = "DeleteFolderResponseMessage";
pub const DELETE_ITEM: &str = "DeleteItem";
pub const DELETE_ITEM_RESPONSE: &str = "DeleteItemResponse";
pub const DELETE_ITEM_RESPONSE_MESSAGE: &str = "DeleteItemResponseMessage";
pub const DELETE_TYPE: &str = "DeleteType";
pub const SEND_MEETING_CANCELLATIONS: &str = "SendMeetingCancellations";
pub const AFFECTED_TASK_OCCURRENCES: &str = "AffectedTaskOccurrences";
pub const SUPPRESS_READ_RECEIPTS: &str = "SuppressReadReceipts";

// Discovery search
pub const GET_DISCOVERY_SEARCH_CONFIGURATION: &str = "GetDiscoverySearchConfiguration";
pub const GET_DISCOVERY_SEARCH_CONFIGURATION_RESPONSE: &str =
    "GetDiscoverySearchConfigurationResponse";
pub const GET_DISCOVERY_SEARCH_CONFIGURATION_RESPONSE_MESSAGE: &str =
    "GetDiscoverySearchConfigurationResponseMessage";
pub const DISCOVERY_SEARCH_CONFIGURATIONS: &str = "DiscoverySearchConfigurations";
pub const DISCOVERY_SEARCH_CONFIGURATION: &str = "DiscoverySearchConfiguration";
pub const EXPAND_GROUP_MEMBERSHIP: &str = "ExpandGroupMembership";
pub const IN_PLACE_HOLD_CONFIGURATION_ONLY: &str = "InPlaceHoldConfigurationOnly";
pub const SEARCH_ID: &str = "SearchId";
pub const SEARCH_QUERY: &str = "SearchQuery";
pub const SEARCHABLE_MAILBOXES: &str = "SearchableMailboxes";
pub const SEARCHABLE_MAILBOX: &str = "SearchableMailbox";
pub const IN_PLACE_HOLD_IDENTITY: &str = "InPlaceHoldIdentity";
pub const MANAGED_BY_ORGANIZATION: &str = "ManagedByOrganization";
pub const LANGUAGE: &str = "Language";

// Searchable mailbox
pub const GUID: &str = "Guid";
pub const PRIMARY_SMTP_ADDRESS: &str = "PrimarySmtpAddress";
pub const IS_EXTERNAL_MAILBOX: &str = "IsExternalMailbox";
pub const EXTERNAL_EMAIL_ADDRESS: &str = "ExternalEmailAddress";
pub const DISPLAY_NAME: &str = "DisplayName";
pub const IS_MEMBERSHIP_GROUP: &str = "IsMembershipGroup";
pub const REFERENCE_ID: &str = "ReferenceId";
