use std::any::{type_name, Any};
use std::borrow::Cow;

use bytes::Bytes;
use strum::IntoStaticStr;

use crate::application::parser::RequestParser;
use crate::domain::errors::CompareError;
use crate::domain::field::Field;
use crate::domain::request::{Headers, Request};
use crate::infrastructure::parser::HttparseRequestParser;

/// One side of a comparison.
#[derive(Debug, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum RequestInput<'a> {
    Structured(Request),
    StructuredRef(&'a Request),
    /// Raw request text, handed to the parser.
    Text(&'a str),
    /// Raw request bytes, must be UTF-8.
    Bytes(&'a [u8]),
    Unsupported { type_name: &'static str },
}

impl<'a> RequestInput<'a> {
    /// Picks the variant from the runtime type of `value`.
    ///
    /// Recognizes [Request], `http::Request` with a `()`, `String`, `Vec<u8>` or `Bytes` body,
    /// `String`, `&'static str` and `Vec<u8>`. Everything else is [RequestInput::Unsupported].
    pub fn from_value<T: Any>(value: &'a T) -> Self {
        let any: &dyn Any = value;

        if let Some(request) = any.downcast_ref::<Request>() {
            return Self::StructuredRef(request);
        }
        if let Some(request) = any.downcast_ref::<http::Request<()>>() {
            return Self::Structured(request.into());
        }
        if let Some(request) = any.downcast_ref::<http::Request<String>>() {
            return Self::Structured(request.into());
        }
        if let Some(request) = any.downcast_ref::<http::Request<Vec<u8>>>() {
            return Self::Structured(request.into());
        }
        if let Some(request) = any.downcast_ref::<http::Request<Bytes>>() {
            return Self::Structured(request.into());
        }
        if let Some(text) = any.downcast_ref::<String>() {
            return Self::Text(text);
        }
        if let Some(text) = any.downcast_ref::<&'static str>() {
            return Self::Text(text);
        }
        if let Some(bytes) = any.downcast_ref::<Vec<u8>>() {
            return Self::Bytes(bytes);
        }

        Self::Unsupported {
            type_name: type_name::<T>(),
        }
    }
}

impl From<Request> for RequestInput<'_> {
    fn from(value: Request) -> Self {
        Self::Structured(value)
    }
}

impl<'a> From<&'a Request> for RequestInput<'a> {
    fn from(value: &'a Request) -> Self {
        Self::StructuredRef(value)
    }
}

impl<B> From<&http::Request<B>> for RequestInput<'_> {
    fn from(value: &http::Request<B>) -> Self {
        Self::Structured(value.into())
    }
}

impl<B> From<http::Request<B>> for RequestInput<'_> {
    fn from(value: http::Request<B>) -> Self {
        Self::Structured(value.into())
    }
}

impl<'a> From<&'a str> for RequestInput<'a> {
    fn from(value: &'a str) -> Self {
        Self::Text(value)
    }
}

impl<'a> From<&'a String> for RequestInput<'a> {
    fn from(value: &'a String) -> Self {
        Self::Text(value)
    }
}

impl<'a> From<&'a [u8]> for RequestInput<'a> {
    fn from(value: &'a [u8]) -> Self {
        Self::Bytes(value)
    }
}

/// Tells whether two requests are the same request, whatever form each one came in.
///
/// Fields are checked in [Field::ALL] order and the first mismatch ends the comparison.
/// Inputs that can't be turned into a [Request] are errors, never `false`.
#[derive(Debug, Clone, Default)]
pub struct RequestsComparator<P = HttparseRequestParser> {
    parser: P,
}

impl RequestsComparator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P: RequestParser> RequestsComparator<P> {
    pub fn with_parser(parser: P) -> Self {
        Self { parser }
    }

    pub fn parser(&self) -> &P {
        &self.parser
    }

    pub fn normalize<'a>(
        &self,
        input: impl Into<RequestInput<'a>>,
    ) -> Result<Cow<'a, Request>, CompareError> {
        let input = input.into();
        let kind: &'static str = (&input).into();
        tracing::trace!(kind, "normalizing request");

        match input {
            RequestInput::Structured(request) => Ok(Cow::Owned(request)),
            RequestInput::StructuredRef(request) => Ok(Cow::Borrowed(request)),
            RequestInput::Text(text) => self.parse(text).map(Cow::Owned),
            RequestInput::Bytes(bytes) => {
                let text = std::str::from_utf8(bytes)
                    .map_err(|err| CompareError::invalid_format(err.into()))?;
                self.parse(text).map(Cow::Owned)
            }
            RequestInput::Unsupported { type_name } => {
                Err(CompareError::UnsupportedInputType { type_name })
            }
        }
    }

    fn parse(&self, text: &str) -> Result<Request, CompareError> {
        self.parser.parse(text).map_err(|err| {
            tracing::debug!(error = %err, "rejected request text");
            CompareError::invalid_format(err)
        })
    }

    pub fn compare<'a, 'b>(
        &self,
        input1: impl Into<RequestInput<'a>>,
        input2: impl Into<RequestInput<'b>>,
    ) -> Result<bool, CompareError> {
        self.compare_fields(input1, input2, &Field::ALL)
    }

    /// Like [RequestsComparator::compare], restricted to `fields`, checked in the given order.
    pub fn compare_fields<'a, 'b>(
        &self,
        input1: impl Into<RequestInput<'a>>,
        input2: impl Into<RequestInput<'b>>,
        fields: &[Field],
    ) -> Result<bool, CompareError> {
        let request1 = self.normalize(input1)?;
        let request2 = self.normalize(input2)?;

        Ok(fields
            .iter()
            .all(|&field| self.compare_field(field, &request1, &request2)))
    }

    /// First field, in [Field::ALL] order, on which the requests differ.
    pub fn first_mismatch(&self, request1: &Request, request2: &Request) -> Option<Field> {
        Field::ALL
            .into_iter()
            .find(|&field| !self.compare_field(field, request1, request2))
    }

    pub fn compare_field(&self, field: Field, request1: &Request, request2: &Request) -> bool {
        let matches = match field {
            Field::Host => self.compare_host(&request1.host, &request2.host),
            Field::Port => self.compare_ports(request1.port, request2.port),
            Field::Username => self.compare_usernames(
                request1.username.as_deref(),
                request2.username.as_deref(),
            ),
            Field::Password => self.compare_passwords(
                request1.password.as_deref(),
                request2.password.as_deref(),
            ),
            Field::Path => self.compare_path(&request1.path, &request2.path),
            Field::Scheme => self.compare_scheme(&request1.scheme, &request2.scheme),
            Field::ProtocolVersion => self
                .compare_protocol_version(&request1.protocol_version, &request2.protocol_version),
            Field::Method => self.compare_method(&request1.method, &request2.method),
            Field::Headers => self.compare_headers(&request1.headers, &request2.headers),
        };

        if !matches {
            tracing::debug!(%field, "requests differ");
        }
        matches
    }

    pub fn compare_host(&self, host1: &str, host2: &str) -> bool {
        host1 == host2
    }

    /// An explicit port never equals an absent one, even the scheme's default.
    pub fn compare_ports(&self, port1: Option<u16>, port2: Option<u16>) -> bool {
        port1 == port2
    }

    pub fn compare_usernames(&self, username1: Option<&str>, username2: Option<&str>) -> bool {
        username1 == username2
    }

    pub fn compare_passwords(&self, password1: Option<&str>, password2: Option<&str>) -> bool {
        password1 == password2
    }

    pub fn compare_path(&self, path1: &str, path2: &str) -> bool {
        path1 == path2
    }

    pub fn compare_scheme(&self, scheme1: &str, scheme2: &str) -> bool {
        scheme1 == scheme2
    }

    pub fn compare_protocol_version(&self, version1: &str, version2: &str) -> bool {
        version1 == version2
    }

    pub fn compare_method(&self, method1: &str, method2: &str) -> bool {
        method1 == method2
    }

    /// Header order is ignored, header name case is not.
    pub fn compare_headers(&self, headers1: &Headers, headers2: &Headers) -> bool {
        headers1.sorted() == headers2.sorted()
    }
}
