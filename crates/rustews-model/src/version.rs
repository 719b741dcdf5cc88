//! Exchange protocol versions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Protocol versions a session can negotiate, oldest first.
///
/// The derived ordering follows declaration order, so `a < b` means `a` is an
/// older protocol than `b`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum ExchangeVersion {
    /// Exchange 2007 Service Pack 1.
    #[serde(rename = "Exchange2007_SP1")]
    Exchange2007Sp1,
    /// Exchange 2010.
    #[serde(rename = "Exchange2010")]
    Exchange2010,
    /// Exchange 2010 Service Pack 1.
    #[serde(rename = "Exchange2010_SP1")]
    Exchange2010Sp1,
    /// Exchange 2010 Service Pack 2.
    #[serde(rename = "Exchange2010_SP2")]
    Exchange2010Sp2,
    /// Exchange 2013.
    #[serde(rename = "Exchange2013")]
    Exchange2013,
    /// Exchange 2013 Service Pack 1.
    #[default]
    #[serde(rename = "Exchange2013_SP1")]
    Exchange2013Sp1,
}

impl ExchangeVersion {
    /// Returns the wire name used in `RequestServerVersion`.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exchange2007Sp1 => "Exchange2007_SP1",
            Self::Exchange2010 => "Exchange2010",
            Self::Exchange2010Sp1 => "Exchange2010_SP1",
            Self::Exchange2010Sp2 => "Exchange2010_SP2",
            Self::Exchange2013 => "Exchange2013",
            Self::Exchange2013Sp1 => "Exchange2013_SP1",
        }
    }

    /// Parse a wire name into an `ExchangeVersion`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Exchange2007_SP1" => Some(Self::Exchange2007Sp1),
            "Exchange2010" => Some(Self::Exchange2010),
            "Exchange2010_SP1" => Some(Self::Exchange2010Sp1),
            "Exchange2010_SP2" => Some(Self::Exchange2010Sp2),
            "Exchange2013" => Some(Self::Exchange2013),
            "Exchange2013_SP1" => Some(Self::Exchange2013Sp1),
            _ => None,
        }
    }
}

impl fmt::Display for ExchangeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
