//! Per-item response classification and batch outcomes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Classification the server attaches to every response message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResponseClass {
    /// The item was processed.
    #[default]
    Success,
    /// The item was processed with a caveat.
    Warning,
    /// The item failed.
    Error,
}

impl ResponseClass {
    /// Returns the wire name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Warning => "Warning",
            Self::Error => "Error",
        }
    }

    /// Parse a wire name into a `ResponseClass`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Success" => Some(Self::Success),
            "Warning" => Some(Self::Warning),
            "Error" => Some(Self::Error),
            _ => None,
        }
    }
}

impl fmt::Display for ResponseClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response codes the client reacts to. Anything else is kept verbatim in
/// [`ResponseCode::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ResponseCode {
    /// No error.
    #[default]
    NoError,
    /// The item does not exist.
    ItemNotFound,
    /// The folder does not exist.
    FolderNotFound,
    /// The caller may not act on the object.
    AccessDenied,
    /// The id could not be parsed by the server.
    InvalidIdMalformed,
    /// The object cannot be deleted.
    CannotDeleteObject,
    /// Well-known folders cannot be deleted.
    DeleteDistinguishedFolder,
    /// The server failed internally.
    InternalServerError,
    /// The exchange never completed.
    ConnectionFailed,
    /// A code this client does not model.
    Other(String),
}

impl ResponseCode {
    /// Returns the wire name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::NoError => "NoError",
            Self::ItemNotFound => "ErrorItemNotFound",
            Self::FolderNotFound => "ErrorFolderNotFound",
            Self::AccessDenied => "ErrorAccessDenied",
            Self::InvalidIdMalformed => "ErrorInvalidIdMalformed",
            Self::CannotDeleteObject => "ErrorCannotDeleteObject",
            Self::DeleteDistinguishedFolder => "ErrorDeleteDistinguishedFolder",
            Self::InternalServerError => "ErrorInternalServerError",
            Self::ConnectionFailed => "ErrorConnectionFailed",
            Self::Other(code) => code,
        }
    }
}

impl From<&str> for ResponseCode {
    fn from(name: &str) -> Self {
        match name {
            "NoError" => Self::NoError,
            "ErrorItemNotFound" => Self::ItemNotFound,
            "ErrorFolderNotFound" => Self::FolderNotFound,
            "ErrorAccessDenied" => Self::AccessDenied,
            "ErrorInvalidIdMalformed" => Self::InvalidIdMalformed,
            "ErrorCannotDeleteObject" => Self::CannotDeleteObject,
            "ErrorDeleteDistinguishedFolder" => Self::DeleteDistinguishedFolder,
            "ErrorInternalServerError" => Self::InternalServerError,
            "ErrorConnectionFailed" => Self::ConnectionFailed,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a batch call surfaces per-item failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ErrorHandlingMode {
    /// The first failed item aborts the call with an error.
    #[default]
    ThrowOnFirstFailure,
    /// Every item is returned; callers inspect each outcome.
    ReturnAllOutcomes,
}

/// A failed item within a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceFailure {
    /// Position of the item in the request.
    pub index: usize,
    /// Server response code.
    pub code: ResponseCode,
    /// Server-supplied message.
    pub message: String,
}

/// The result for one identifier of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<P> {
    /// The item succeeded (warnings included).
    Success(P),
    /// The item failed.
    Failure(ServiceFailure),
}

impl<P> Outcome<P> {
    /// Whether this outcome is a success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The failure, if any.
    #[must_use]
    pub fn failure(&self) -> Option<&ServiceFailure> {
        match self {
            Self::Success(_) => None,
            Self::Failure(failure) => Some(failure),
        }
    }

    /// Convert into a `Result`.
    pub fn into_result(self) -> Result<P, ServiceFailure> {
        match self {
            Self::Success(payload) => Ok(payload),
            Self::Failure(failure) => Err(failure),
        }
    }
}

/// Outcomes of a batch call, aligned by position with the request identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcomes<P> {
    outcomes: Vec<Outcome<P>>,
}

impl<P> BatchOutcomes<P> {
    /// Wrap reconciled outcomes.
    #[must_use]
    pub fn new(outcomes: Vec<Outcome<P>>) -> Self {
        Self { outcomes }
    }

    /// Number of outcomes; always the number of request identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Whether there are no outcomes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Outcome for the identifier at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Outcome<P>> {
        self.outcomes.get(index)
    }

    /// Iterate in request order.
    pub fn iter(&self) -> std::slice::Iter<'_, Outcome<P>> {
        self.outcomes.iter()
    }

    /// Failed items in request order.
    pub fn failures(&self) -> impl Iterator<Item = &ServiceFailure> {
        self.outcomes.iter().filter_map(Outcome::failure)
    }

    /// `Error` if any item failed, otherwise `Success`.
    #[must_use]
    pub fn overall_result(&self) -> ResponseClass {
        if self.failures().next().is_some() {
            ResponseClass::Error
        } else {
            ResponseClass::Success
        }
    }

    /// Consume into the underlying outcomes.
    #[must_use]
    pub fn into_inner(self) -> Vec<Outcome<P>> {
        self.outcomes
    }
}

impl<P> IntoIterator for BatchOutcomes<P> {
    type Item = Outcome<P>;
    type IntoIter = std::vec::IntoIter<Outcome<P>>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.into_iter()
    }
}

impl<'a, P> IntoIterator for &'a BatchOutcomes<P> {
    type Item = &'a Outcome<P>;
    type IntoIter = std::slice::Iter<'a, Outcome<P>>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.iter()
    }
}
