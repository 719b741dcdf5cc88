//! SOAP/XML envelopes.
//!
//! ```xml
//! <soap:Envelope xmlns:soap=".." xmlns:m=".." xmlns:t="..">
//!   <soap:Header><t:RequestServerVersion Version="Exchange2013_SP1"/></soap:Header>
//!   <soap:Body>
//!     <m:DeleteFolder DeleteType="HardDelete">
//!       <m:FolderIds>..</m:FolderIds>
//!     </m:DeleteFolder>
//!   </soap:Body>
//! </soap:Envelope>
//! ```

use bytes::Bytes;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, Event};

use rustews_model::names;
use rustews_model::{ExchangeVersion, ResponseClass, ResponseCode};
use rustews_xml::{EwsXmlReader, XmlNamespace};

use crate::controller::ResponseMessage;
use crate::error::{EwsError, EwsResult};
use crate::operation::ServiceOperation;

/// Write the request envelope for `operation`.
pub fn build_request<O: ServiceOperation>(
    operation: &O,
    version: ExchangeVersion,
) -> EwsResult<Bytes> {
    let mut buf = Vec::with_capacity(1024);
    let mut writer = Writer::new(&mut buf);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    writer
        .create_element(XmlNamespace::Soap.qualify(names::ENVELOPE))
        .with_attributes(XmlNamespace::ALL.map(|ns| (ns.declaration(), ns.uri())))
        .write_inner_content(|w| {
            w.create_element(XmlNamespace::Soap.qualify(names::HEADER))
                .write_inner_content(|w| {
                    w.create_element(XmlNamespace::Types.qualify(names::REQUEST_SERVER_VERSION))
                        .with_attribute((names::VERSION, version.as_str()))
                        .write_empty()?;
                    Ok(())
                })?;
            w.create_element(XmlNamespace::Soap.qualify(names::BODY))
                .write_inner_content(|w| {
                    w.create_element(XmlNamespace::Messages.qualify(O::NAME))
                        .with_attributes(operation.xml_attributes())
                        .write_inner_content(|w| operation.write_xml_body(w))?;
                    Ok(())
                })?;
            Ok(())
        })?;

    Ok(Bytes::from(buf))
}

/// Reads response messages from a SOAP reply, one per call to `next`.
///
/// [`open`](Self::open) consumes the envelope up to the response message list.
/// After the first error the iterator is exhausted.
#[derive(Debug)]
pub struct XmlReplyReader<'a, O> {
    operation: &'a O,
    reader: EwsXmlReader<'a>,
    finished: bool,
}

impl<'a, O: ServiceOperation> XmlReplyReader<'a, O> {
    /// Check the envelope and position the reader before the first message.
    ///
    /// A `soap:Fault` body is returned as [`EwsError::ServiceFault`]; a body
    /// holding anything but `O::RESPONSE_NAME` is malformed.
    pub fn open(operation: &'a O, body: &'a [u8]) -> EwsResult<Self> {
        let mut reader = EwsXmlReader::new(body);
        reader.read_start_element(XmlNamespace::Soap, names::ENVELOPE)?;
        reader.read()?;
        if reader.is_start_element(XmlNamespace::Soap, names::HEADER) {
            reader.skip_current_element()?;
            reader.read()?;
        }
        reader.ensure_current_node_is_start_element(XmlNamespace::Soap, names::BODY)?;

        reader.read()?;
        if reader.is_start_element(XmlNamespace::Soap, names::FAULT) {
            return Err(read_fault(&mut reader)?);
        }
        reader.ensure_current_node_is_start_element(XmlNamespace::Messages, O::RESPONSE_NAME)?;
        reader.read_start_element(XmlNamespace::Messages, names::RESPONSE_MESSAGES)?;
        let finished = reader.is_empty_element();

        Ok(Self {
            operation,
            reader,
            finished,
        })
    }

    fn advance(&mut self) -> Option<EwsResult<ResponseMessage<O::Payload>>> {
        if let Err(err) = self.reader.read() {
            return Some(Err(err.into()));
        }
        if self
            .reader
            .is_end_element(XmlNamespace::Messages, names::RESPONSE_MESSAGES)
        {
            return None;
        }
        if !self
            .reader
            .is_start_element(XmlNamespace::Messages, O::RESPONSE_MESSAGE_NAME)
        {
            return Some(Err(EwsError::MalformedResponse(format!(
                "expected {} in {}, found {}",
                O::RESPONSE_MESSAGE_NAME,
                names::RESPONSE_MESSAGES,
                self.reader.local_name()
            ))));
        }
        Some(self.read_message())
    }

    fn read_message(&mut self) -> EwsResult<ResponseMessage<O::Payload>> {
        let class_name = self
            .reader
            .read_attribute_value(names::RESPONSE_CLASS)
            .ok_or_else(|| {
                EwsError::MalformedResponse(format!(
                    "{} without {}",
                    O::RESPONSE_MESSAGE_NAME,
                    names::RESPONSE_CLASS
                ))
            })?;
        let class = ResponseClass::from_name(class_name).ok_or_else(|| {
            EwsError::MalformedResponse(format!("unknown response class: {class_name}"))
        })?;

        let mut message = ResponseMessage {
            class,
            code: ResponseCode::NoError,
            message_text: String::new(),
            payload: O::Payload::default(),
        };
        if self.reader.is_empty_element() {
            return Ok(message);
        }

        loop {
            self.reader.read()?;
            let reader = &mut self.reader;
            if reader.is_end_element(XmlNamespace::Messages, O::RESPONSE_MESSAGE_NAME) {
                return Ok(message);
            }
            if reader.is_start_element(XmlNamespace::Messages, names::MESSAGE_TEXT) {
                message.message_text = reader.read_value()?;
            } else if reader.is_start_element(XmlNamespace::Messages, names::RESPONSE_CODE) {
                message.code = ResponseCode::from(reader.read_value()?.trim());
            } else if reader.is_start_element(XmlNamespace::Messages, names::DESCRIPTIVE_LINK_KEY)
                || reader.is_start_element(XmlNamespace::Messages, names::MESSAGE_XML)
            {
                reader.skip_current_element()?;
            } else if reader.is_start() && class != ResponseClass::Error {
                self.operation
                    .read_xml_payload_element(reader, &mut message.payload)?;
            } else {
                reader.skip_current_element()?;
            }
        }
    }
}

impl<O: ServiceOperation> Iterator for XmlReplyReader<'_, O> {
    type Item = EwsResult<ResponseMessage<O::Payload>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let item = self.advance();
        if !matches!(item, Some(Ok(_))) {
            self.finished = true;
        }
        item
    }
}

/// Read `soap:Fault`. `faultcode` and `faultstring` are unqualified.
fn read_fault(reader: &mut EwsXmlReader<'_>) -> EwsResult<EwsError> {
    let mut code = String::new();
    let mut message = String::new();
    if !reader.is_empty_element() {
        loop {
            reader.read()?;
            if reader.is_end_element(XmlNamespace::Soap, names::FAULT) {
                break;
            }
            if reader.is_start() && reader.local_name() == names::FAULT_CODE {
                code = reader.read_value()?;
            } else if reader.is_start() && reader.local_name() == names::FAULT_STRING {
                message = reader.read_value()?;
            } else {
                reader.skip_current_element()?;
            }
        }
    }
    Ok(EwsError::ServiceFault { code, message })
}
