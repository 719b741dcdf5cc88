//! XML namespaces used on the wire.

/// The namespaces EWS requests and replies use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum XmlNamespace {
    /// SOAP 1.1 envelope.
    Soap,
    /// Request and response messages.
    Messages,
    /// Shared types.
    Types,
}

impl XmlNamespace {
    /// All namespaces, in the order they are declared on a request root.
    pub const ALL: [Self; 3] = [Self::Soap, Self::Messages, Self::Types];

    /// Namespace URI.
    #[must_use]
    pub fn uri(&self) -> &'static str {
        match self {
            Self::Soap => "http://schemas.xmlsoap.org/soap/envelope/",
            Self::Messages => "http://schemas.microsoft.com/exchange/services/2006/messages",
            Self::Types => "http://schemas.microsoft.com/exchange/services/2006/types",
        }
    }

    /// Prefix used when writing.
    #[must_use]
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Soap => "soap",
            Self::Messages => "m",
            Self::Types => "t",
        }
    }

    /// `xmlns:<prefix>` attribute name.
    #[must_use]
    pub fn declaration(&self) -> &'static str {
        match self {
            Self::Soap => "xmlns:soap",
            Self::Messages => "xmlns:m",
            Self::Types => "xmlns:t",
        }
    }

    /// Prefixed element name, e.g. `t:FolderId`.
    #[must_use]
    pub fn qualify(&self, local_name: &str) -> String {
        format!("{}:{local_name}", self.prefix())
    }
}
