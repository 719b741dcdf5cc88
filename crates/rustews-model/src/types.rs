//! Request option enums shared by the delete operations.

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
        }

        impl $name {
            /// Returns the wire name.
            #[must_use]
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }

            /// Parse a wire name.
            #[must_use]
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($wire => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

wire_enum! {
    /// How deleted objects are disposed of.
    DeleteMode {
        /// Purge permanently.
        HardDelete => "HardDelete",
        /// Move to the dumpster.
        SoftDelete => "SoftDelete",
        /// Move to Deleted Items.
        MoveToDeletedItems => "MoveToDeletedItems",
    }
}

wire_enum! {
    /// Whether deleting a meeting notifies attendees.
    SendCancellationsMode {
        /// Notify nobody.
        SendToNone => "SendToNone",
        /// Notify attendees without keeping a copy.
        SendOnlyToAll => "SendOnlyToAll",
        /// Notify attendees and keep a copy in Sent Items.
        SendToAllAndSaveCopy => "SendToAllAndSaveCopy",
    }
}

wire_enum! {
    /// Which occurrences of a recurring task a delete affects.
    AffectedTaskOccurrences {
        /// The whole series.
        AllOccurrences => "AllOccurrences",
        /// Only the current occurrence.
        SpecifiedOccurrenceOnly => "SpecifiedOccurrenceOnly",
    }
}
