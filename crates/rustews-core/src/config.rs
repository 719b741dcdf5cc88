//! Client configuration.
//!
//! Provides [`EwsConfig`], the session-level settings every request of a
//! [`BatchController`](crate::BatchController) shares. Values are loaded from
//! environment variables.

use std::fmt;

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use rustews_model::{ErrorHandlingMode, ExchangeVersion};

/// Wire encoding used for requests and replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireFormat {
    /// SOAP envelopes in XML.
    #[default]
    Xml,
    /// JSON envelopes.
    Json,
}

impl WireFormat {
    /// Returns the configuration name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Xml => "xml",
            Self::Json => "json",
        }
    }

    /// Parse a configuration name (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("xml") {
            Some(Self::Xml)
        } else if name.eq_ignore_ascii_case("json") {
            Some(Self::Json)
        } else {
            None
        }
    }

    /// HTTP content type of a payload in this encoding.
    #[must_use]
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Xml => "text/xml; charset=utf-8",
            Self::Json => "application/json; charset=utf-8",
        }
    }
}

impl fmt::Display for WireFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Session configuration.
///
/// # Examples
///
/// ```
/// use rustews_core::config::{EwsConfig, WireFormat};
///
/// let config = EwsConfig::default();
/// assert_eq!(config.wire_format, WireFormat::Xml);
/// assert!(!config.trace_payloads);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct EwsConfig {
    /// Protocol version negotiated with the server.
    #[builder(default)]
    pub requested_server_version: ExchangeVersion,

    /// Encoding for requests and replies.
    #[builder(default)]
    pub wire_format: WireFormat,

    /// Error-handling mode used by [`BatchController::execute`](crate::BatchController::execute).
    #[builder(default)]
    pub error_handling: ErrorHandlingMode,

    /// Whether raw request and reply payloads are logged at `trace`.
    #[builder(default = false)]
    pub trace_payloads: bool,

    /// Filter directive (e.g. `"info"`, `"debug"`) for the host application's
    /// subscriber. The library only emits events and never installs one.
    #[builder(default = String::from("info"))]
    pub log_level: String,
}

impl Default for EwsConfig {
    fn default() -> Self {
        Self {
            requested_server_version: ExchangeVersion::default(),
            wire_format: WireFormat::default(),
            error_handling: ErrorHandlingMode::default(),
            trace_payloads: false,
            log_level: String::from("info"),
        }
    }
}

impl EwsConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `EWS_SERVER_VERSION` | `Exchange2013_SP1` |
    /// | `EWS_WIRE_FORMAT` | `xml` |
    /// | `EWS_ERROR_HANDLING` | `ThrowOnFirstFailure` |
    /// | `EWS_TRACE_PAYLOADS` | `false` |
    /// | `LOG_LEVEL` | `info` |
    ///
    /// Values that do not parse leave the default in place.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(v) = lookup("EWS_SERVER_VERSION") {
            if let Some(version) = ExchangeVersion::from_name(&v) {
                config.requested_server_version = version;
            }
        }
        if let Some(v) = lookup("EWS_WIRE_FORMAT") {
            if let Some(format) = WireFormat::from_name(&v) {
                config.wire_format = format;
            }
        }
        if let Some(v) = lookup("EWS_ERROR_HANDLING") {
            config.error_handling = parse_error_handling(&v);
        }
        if let Some(v) = lookup("EWS_TRACE_PAYLOADS") {
            config.trace_payloads = parse_bool(&v);
        }
        if let Some(v) = lookup("LOG_LEVEL") {
            config.log_level = v;
        }

        config
    }
}

/// Parse a string as a boolean, accepting `"1"` and `"true"` (case-insensitive).
fn parse_bool(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}

fn parse_error_handling(value: &str) -> ErrorHandlingMode {
    if value.eq_ignore_ascii_case("return") || value.eq_ignore_ascii_case("ReturnAllOutcomes") {
        ErrorHandlingMode::ReturnAllOutcomes
    } else {
        ErrorHandlingMode::ThrowOnFirstFailure
    }
}
