//! End-to-end tests for Rustews.
//!
//! Each test drives a [`BatchController`] against a [`ScriptedTransport`]
//! that records the requests it receives and answers with canned replies, so
//! the full cycle (request envelope, transport, reply decoding,
//! reconciliation) runs without a server.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, Once};

use bytes::Bytes;
use rustews_core::{BatchController, EwsConfig, Transport, WireFormat, WireReply, WireRequest};
use rustews_model::{ErrorHandlingMode, ExchangeVersion};

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| {
                        tracing_subscriber::EnvFilter::new(EwsConfig::from_env().log_level)
                    }),
            )
            .with_test_writer()
            .init();
    });
}

/// A canned transport result.
#[derive(Debug, Clone)]
pub enum Scripted {
    /// Answer with this payload.
    Reply(Bytes),
    /// Fail the exchange with this message.
    Fail(String),
}

/// Transport that replays scripted results in order and records requests.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<WireRequest>>,
}

impl ScriptedTransport {
    /// A transport that answers the next request with `body`.
    #[must_use]
    pub fn replying(body: impl Into<Bytes>) -> Arc<Self> {
        Self::scripted([Scripted::Reply(body.into())])
    }

    /// A transport whose next exchange fails.
    #[must_use]
    pub fn failing(message: &str) -> Arc<Self> {
        Self::scripted([Scripted::Fail(message.to_owned())])
    }

    /// A transport with nothing scripted. Any exchange fails.
    #[must_use]
    pub fn idle() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// A transport that plays `script` in order.
    #[must_use]
    pub fn scripted(script: impl IntoIterator<Item = Scripted>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Requests received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<WireRequest> {
        self.requests.lock().expect("requests lock").clone()
    }

    /// The body of the only request received, as text.
    #[must_use]
    pub fn single_request_body(&self) -> String {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        String::from_utf8(requests[0].body.to_vec()).expect("request is UTF-8")
    }
}

impl Transport for ScriptedTransport {
    fn exchange(&self, request: WireRequest) -> anyhow::Result<WireReply> {
        self.requests.lock().expect("requests lock").push(request);
        let next = self.script.lock().expect("script lock").pop_front();
        match next {
            Some(Scripted::Reply(body)) => Ok(WireReply::new(body)),
            Some(Scripted::Fail(message)) => Err(anyhow::anyhow!(message)),
            None => anyhow::bail!("no scripted reply left"),
        }
    }
}

/// A controller over `transport` with the given session settings.
#[must_use]
pub fn controller(
    transport: &Arc<ScriptedTransport>,
    format: WireFormat,
    version: ExchangeVersion,
    mode: ErrorHandlingMode,
) -> BatchController<Arc<ScriptedTransport>> {
    init_tracing();
    let config = EwsConfig::builder()
        .requested_server_version(version)
        .wire_format(format)
        .error_handling(mode)
        .trace_payloads(true)
        .build();
    BatchController::new(config, Arc::clone(transport))
}

/// Namespace URIs used in canned replies.
pub mod ns {
    /// SOAP envelope.
    pub const SOAP: &str = "http://schemas.xmlsoap.org/soap/envelope/";
    /// Messages.
    pub const M: &str = "http://schemas.microsoft.com/exchange/services/2006/messages";
    /// Types.
    pub const T: &str = "http://schemas.microsoft.com/exchange/services/2006/types";
}

/// A SOAP reply whose body holds `<m:{response}>` with `messages` inside
/// `m:ResponseMessages`.
#[must_use]
pub fn xml_reply(response: &str, messages: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<s:Envelope xmlns:s="{soap}">
  <s:Header>
    <h:ServerVersionInfo xmlns:h="{t}" MajorVersion="15" MinorVersion="0" MajorBuildNumber="847" MinorBuildNumber="31"/>
  </s:Header>
  <s:Body xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
    <m:{response} xmlns:m="{m}" xmlns:t="{t}">
      <m:ResponseMessages>{messages}</m:ResponseMessages>
    </m:{response}>
  </s:Body>
</s:Envelope>"#,
        soap = ns::SOAP,
        m = ns::M,
        t = ns::T,
    )
}

/// One `m:{name}` response message. `inner` follows the header fields.
#[must_use]
pub fn xml_message(name: &str, class: &str, code: &str, text: Option<&str>, inner: &str) -> String {
    let text = text
        .map(|t| format!("<m:MessageText>{t}</m:MessageText>"))
        .unwrap_or_default();
    format!(
        r#"<m:{name} ResponseClass="{class}">{text}<m:ResponseCode>{code}</m:ResponseCode>{inner}</m:{name}>"#
    )
}

/// A JSON reply with `items` as `Body.ResponseMessages.Items`.
#[must_use]
pub fn json_reply(response: &str, items: Vec<serde_json::Value>) -> String {
    serde_json::json!({
        "Header": { "ServerVersionInfo": { "MajorVersion": 15, "MinorVersion": 0 } },
        "Body": {
            "__type": format!("{response}:#Exchange"),
            "ResponseMessages": { "Items": items }
        }
    })
    .to_string()
}

/// One JSON response message.
#[must_use]
pub fn json_message(name: &str, class: &str, code: &str, text: Option<&str>) -> serde_json::Value {
    let mut message = serde_json::json!({
        "__type": format!("{name}:#Exchange"),
        "ResponseClass": class,
        "ResponseCode": code,
    });
    if let Some(text) = text {
        message["MessageText"] = serde_json::Value::String(text.to_owned());
    }
    message
}

mod test_codec;
mod test_delete_folder;
mod test_delete_item;
