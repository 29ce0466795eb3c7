use std::borrow::Cow;

use eyre::{bail, OptionExt, WrapErr};
use httparse::ParserConfig;

use crate::application::parser::RequestParser;
use crate::domain::request::{authority_parts, Headers, Request};
use crate::AnyResult;

/// Knobs for [HttparseRequestParser].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Requests with more header lines than this are rejected.
    pub max_headers: usize,
    pub allow_multiple_spaces_in_request_line: bool,
    /// Scheme given to origin-form requests (`GET /path HTTP/1.1`), which carry none.
    pub default_scheme: String,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_headers: 64,
            allow_multiple_spaces_in_request_line: false,
            default_scheme: "http".to_owned(),
        }
    }
}

impl ParseOptions {
    pub fn with_max_headers(mut self, max_headers: usize) -> Self {
        self.max_headers = max_headers;
        self
    }

    pub fn with_multiple_spaces_in_request_line(mut self, allow: bool) -> Self {
        self.allow_multiple_spaces_in_request_line = allow;
        self
    }

    pub fn with_default_scheme(mut self, scheme: &str) -> Self {
        self.default_scheme = scheme.to_owned();
        self
    }

    fn parser_config(&self) -> ParserConfig {
        let mut config = ParserConfig::default();
        config.allow_multiple_spaces_in_request_line_delimiters(
            self.allow_multiple_spaces_in_request_line,
        );
        config
    }
}

/// Reads the request line and header block of a raw HTTP/1.x request with `httparse`.
/// Whatever follows the header block is ignored.
#[derive(Debug, Clone, Default)]
pub struct HttparseRequestParser {
    options: ParseOptions,
}

impl HttparseRequestParser {
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }
}

impl RequestParser for HttparseRequestParser {
    fn parse(&self, text: &str) -> AnyResult<Request> {
        let message = terminated(text);
        let mut headers = vec![httparse::EMPTY_HEADER; self.options.max_headers];
        let mut req = httparse::Request::new(&mut headers);

        let status = self
            .options
            .parser_config()
            .parse_request(&mut req, message.as_bytes())
            .wrap_err("malformed request head")?;
        if status.is_partial() {
            bail!("incomplete request head");
        }

        let method = req.method.ok_or_eyre("missing method")?;
        let target = req.path.ok_or_eyre("missing request target")?;
        let protocol_version = match req.version {
            Some(0) => "1.0",
            Some(1) => "1.1",
            other => bail!("unsupported HTTP version {other:?}"),
        };

        let mut header_map = Headers::new();
        for header in req.headers.iter() {
            let value = std::str::from_utf8(header.value)
                .wrap_err_with(|| format!("header \"{}\" is not valid UTF-8", header.name))?;
            header_map.append(header.name, value);
        }

        let uri = target
            .parse::<http::Uri>()
            .wrap_err_with(|| format!("invalid request target \"{target}\""))?;

        let (host, port, username, password) = match uri.authority() {
            Some(authority) => authority_parts(authority),
            None => match host_header(&header_map) {
                Some(value) if !value.is_empty() => {
                    let authority = value
                        .parse::<http::uri::Authority>()
                        .wrap_err_with(|| format!("invalid Host header \"{value}\""))?;
                    authority_parts(&authority)
                }
                _ => (String::new(), None, None, None),
            },
        };

        let scheme = uri
            .scheme_str()
            .unwrap_or(self.options.default_scheme.as_str());

        Ok(Request {
            host,
            port,
            username,
            password,
            path: uri.path().to_owned(),
            scheme: scheme.to_owned(),
            protocol_version: protocol_version.to_owned(),
            method: method.to_owned(),
            headers: header_map,
        })
    }
}

/// Fixtures often stop right after the last header line.
fn terminated(text: &str) -> Cow<'_, str> {
    if text.contains("\n\n") || text.contains("\n\r\n") {
        return Cow::Borrowed(text);
    }

    let head = text.trim_end_matches(['\r', '\n']);
    Cow::Owned(format!("{head}\r\n\r\n"))
}

fn host_header(headers: &Headers) -> Option<&str> {
    headers
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case("host"))
        .and_then(|(_, values)| values.first())
        .map(|value| value.trim())
}
