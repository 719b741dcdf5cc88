//! Service object identifiers and identifier lists.
//!
//! Batch operations address their targets through an [`IdList`]. Each entry is
//! either a primitive key (an opaque server id plus an optional change key) or a
//! composite key such as a well-known folder scoped to another user's mailbox.

use std::fmt;

use crate::version::ExchangeVersion;

/// An identifier the service can address.
pub trait ServiceObjectId: Clone + fmt::Debug + PartialEq {
    /// The oldest protocol version that understands this identifier.
    fn minimum_version(&self) -> ExchangeVersion {
        ExchangeVersion::Exchange2007Sp1
    }
}

/// A mailbox used to scope a well-known folder to its owner.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Mailbox {
    /// Primary SMTP address of the mailbox owner.
    pub email_address: String,
    /// Routing type, usually `SMTP`.
    pub routing_type: Option<String>,
}

impl Mailbox {
    /// Create a mailbox from an SMTP address.
    #[must_use]
    pub fn new(email_address: impl Into<String>) -> Self {
        Self {
            email_address: email_address.into(),
            routing_type: None,
        }
    }
}

macro_rules! well_known_folders {
    ($($variant:ident => ($wire:literal, $version:ident)),+ $(,)?) => {
        /// Folders every mailbox has, addressed by name instead of by id.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[non_exhaustive]
        pub enum WellKnownFolderName {
            $(
                #[allow(missing_docs)]
                $variant,
            )+
        }

        impl WellKnownFolderName {
            /// Returns the wire name used in the `Id` attribute.
            #[must_use]
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }

            /// Parse a wire name into a `WellKnownFolderName`.
            #[must_use]
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($wire => Some(Self::$variant),)+
                    _ => None,
                }
            }

            /// The oldest protocol version that knows this folder.
            #[must_use]
            pub fn minimum_version(&self) -> ExchangeVersion {
                match self {
                    $(Self::$variant => ExchangeVersion::$version,)+
                }
            }
        }
    };
}

well_known_folders! {
    Calendar => ("calendar", Exchange2007Sp1),
    Contacts => ("contacts", Exchange2007Sp1),
    DeletedItems => ("deleteditems", Exchange2007Sp1),
    Drafts => ("drafts", Exchange2007Sp1),
    Inbox => ("inbox", Exchange2007Sp1),
    Journal => ("journal", Exchange2007Sp1),
    Notes => ("notes", Exchange2007Sp1),
    Outbox => ("outbox", Exchange2007Sp1),
    SentItems => ("sentitems", Exchange2007Sp1),
    Tasks => ("tasks", Exchange2007Sp1),
    MsgFolderRoot => ("msgfolderroot", Exchange2007Sp1),
    PublicFoldersRoot => ("publicfoldersroot", Exchange2007Sp1),
    Root => ("root", Exchange2007Sp1),
    JunkEmail => ("junkemail", Exchange2007Sp1),
    SearchFolders => ("searchfolders", Exchange2007Sp1),
    VoiceMail => ("voicemail", Exchange2007Sp1),
    RecoverableItemsRoot => ("recoverableitemsroot", Exchange2010Sp1),
    RecoverableItemsDeletions => ("recoverableitemsdeletions", Exchange2010Sp1),
    RecoverableItemsVersions => ("recoverableitemsversions", Exchange2010Sp1),
    RecoverableItemsPurges => ("recoverableitemspurges", Exchange2010Sp1),
    ArchiveRoot => ("archiveroot", Exchange2010Sp1),
    ArchiveMsgFolderRoot => ("archivemsgfolderroot", Exchange2010Sp1),
    ArchiveDeletedItems => ("archivedeleteditems", Exchange2010Sp1),
    SyncIssues => ("syncissues", Exchange2013),
    Conflicts => ("conflicts", Exchange2013),
    LocalFailures => ("localfailures", Exchange2013),
    ServerFailures => ("serverfailures", Exchange2013),
    RecipientCache => ("recipientcache", Exchange2013),
    QuickContacts => ("quickcontacts", Exchange2013),
    ConversationHistory => ("conversationhistory", Exchange2013),
    ToDoSearch => ("todosearch", Exchange2013),
}

impl fmt::Display for WellKnownFolderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies a folder, either by server id or by well-known name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FolderId {
    /// A folder addressed by its opaque server id.
    Id {
        /// The server-assigned id.
        id: String,
        /// The change key the caller last saw, if any.
        change_key: Option<String>,
    },
    /// A well-known folder, optionally in another user's mailbox.
    Distinguished {
        /// The folder name.
        name: WellKnownFolderName,
        /// The change key the caller last saw, if any.
        change_key: Option<String>,
        /// The mailbox that owns the folder; the caller's own when `None`.
        mailbox: Option<Mailbox>,
    },
}

impl FolderId {
    /// A folder addressed by server id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self::Id {
            id: id.into(),
            change_key: None,
        }
    }

    /// A well-known folder in the caller's own mailbox.
    #[must_use]
    pub fn well_known(name: WellKnownFolderName) -> Self {
        Self::Distinguished {
            name,
            change_key: None,
            mailbox: None,
        }
    }

    /// A well-known folder in a shared mailbox.
    #[must_use]
    pub fn shared(name: WellKnownFolderName, mailbox: Mailbox) -> Self {
        Self::Distinguished {
            name,
            change_key: None,
            mailbox: Some(mailbox),
        }
    }
}

impl ServiceObjectId for FolderId {
    fn minimum_version(&self) -> ExchangeVersion {
        match self {
            Self::Id { .. } => ExchangeVersion::Exchange2007Sp1,
            Self::Distinguished { name, .. } => name.minimum_version(),
        }
    }
}

impl From<WellKnownFolderName> for FolderId {
    fn from(name: WellKnownFolderName) -> Self {
        Self::well_known(name)
    }
}

/// Identifies an item by its server id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemId {
    /// The server-assigned id.
    pub id: String,
    /// The change key the caller last saw, if any.
    pub change_key: Option<String>,
}

impl ItemId {
    /// An item addressed by server id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            change_key: None,
        }
    }
}

impl ServiceObjectId for ItemId {}

/// An ordered list of identifiers targeted by one batch request.
///
/// Order is significant: response message `i` answers identifier `i`.
/// Duplicates are kept as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdList<T> {
    items: Vec<T>,
}

impl<T> IdList<T> {
    /// Create an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Append an identifier.
    pub fn push(&mut self, id: impl Into<T>) {
        self.items.push(id.into());
    }

    /// Number of identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list holds no identifiers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate in request order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Borrow the identifiers as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T: ServiceObjectId> IdList<T> {
    /// Find the first identifier the given protocol version cannot address.
    #[must_use]
    pub fn first_unsupported(&self, version: ExchangeVersion) -> Option<(usize, &T)> {
        self.items
            .iter()
            .enumerate()
            .find(|(_, id)| id.minimum_version() > version)
    }
}

impl<T> Default for IdList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for IdList<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T> FromIterator<T> for IdList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> IntoIterator for &'a IdList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> IntoIterator for IdList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
