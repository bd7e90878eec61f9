//! Response capture and conversion into a [`ProxyResponse`].
//!
//! Handlers write into a [`ResponseWriter`]. [`ProxyResponseWriter`] is the
//! in-memory implementation used per invocation: it records the status,
//! headers, and body, then renders them as a [`ProxyResponse`] with
//! [`ProxyResponseWriter::proxy_response`].
//!
//! ```text
//! Unset --write / write_header--> Set --proxy_response--> ProxyResponse
//! ```

use std::collections::HashMap;
use std::io;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use bytes::{Bytes, BytesMut};
use http::StatusCode;
use http::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use scfproxy_model::ProxyResponse;

use crate::error::{ProxyError, ProxyResult};
use crate::sniff::detect_content_type;

/// The write side of an HTTP response as seen by a handler.
pub trait ResponseWriter {
    /// Headers set so far.
    fn headers(&self) -> &HeaderMap;

    /// Mutable access to the headers, for adding or replacing entries.
    fn headers_mut(&mut self) -> &mut HeaderMap;

    /// Append bytes to the response body. Returns the number of bytes
    /// accepted.
    fn write(&mut self, body: &[u8]) -> io::Result<usize>;

    /// Set the response status code.
    fn write_header(&mut self, status: StatusCode);

    /// Flush buffered output.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// In-memory [`ResponseWriter`] that produces a [`ProxyResponse`].
///
/// The status stays unset until [`write_header`](ResponseWriter::write_header)
/// or the first [`write`](ResponseWriter::write), which implies `200 OK`.
/// The first write also sniffs a `Content-Type` when none was set.
#[derive(Debug, Clone, Default)]
pub struct ProxyResponseWriter {
    headers: HeaderMap,
    body: BytesMut,
    status: Option<StatusCode>,
}

impl ProxyResponseWriter {
    /// Create a writer with no headers, no body, and no status.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The status recorded so far, if any.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    /// The body accumulated so far.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Render the captured response.
    ///
    /// Valid UTF-8 bodies are returned as text; anything else is base64
    /// encoded with `is_base64_encoded` set. Only the first value of each
    /// header is kept. Calling this again without further writes yields the
    /// same response.
    pub fn proxy_response(&self) -> ProxyResult<ProxyResponse> {
        let status = self.status.ok_or(ProxyError::StatusNotSet)?;

        let (body, is_base64_encoded) = match std::str::from_utf8(&self.body) {
            Ok(text) => (text.to_owned(), false),
            Err(_) => (BASE64.encode(&self.body), true),
        };

        let headers: HashMap<String, String> = self
            .headers
            .keys()
            .filter_map(|name| {
                let value = self.headers.get(name)?;
                Some((
                    canonical_header_key(name.as_str()),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                ))
            })
            .collect();

        tracing::debug!(
            status = status.as_u16(),
            body_len = self.body.len(),
            is_base64_encoded,
            "built proxy response"
        );

        Ok(ProxyResponse {
            status_code: status.as_u16(),
            headers,
            body,
            is_base64_encoded,
        })
    }
}

impl ResponseWriter for ProxyResponseWriter {
    fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    fn write(&mut self, body: &[u8]) -> io::Result<usize> {
        if self.status.is_none() {
            self.status = Some(StatusCode::OK);
        }

        let has_content_type = self
            .headers
            .get(CONTENT_TYPE)
            .is_some_and(|v| !v.is_empty());
        if !has_content_type {
            self.headers.insert(
                CONTENT_TYPE,
                HeaderValue::from_static(detect_content_type(body)),
            );
        }

        self.body.extend_from_slice(body);
        Ok(body.len())
    }

    fn write_header(&mut self, status: StatusCode) {
        self.status = Some(status);
    }
}

impl io::Write for ProxyResponseWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        ResponseWriter::write(self, buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        ResponseWriter::flush(self)
    }
}

/// Copy a complete `http::Response` into a writer: headers first, then the
/// status, then the body.
///
/// Lets handlers that build responses rather than write them run behind a
/// [`ResponseWriter`].
pub fn write_response<W>(writer: &mut W, response: http::Response<Bytes>) -> io::Result<()>
where
    W: ResponseWriter + ?Sized,
{
    let (parts, body) = response.into_parts();

    let headers = writer.headers_mut();
    for (name, value) in &parts.headers {
        headers.append(name.clone(), value.clone());
    }
    writer.write_header(parts.status);

    if !body.is_empty() {
        writer.write(&body)?;
    }
    writer.flush()
}

/// Canonical MIME header casing: first letter and every letter after a `-`
/// upper case, the rest lower case (`x-request-id` -> `X-Request-Id`).
#[must_use]
pub fn canonical_header_key(name: &str) -> String {
    let mut upper = true;
    name.chars()
        .map(|c| {
            let out = if upper {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            };
            upper = c == '-';
            out
        })
        .collect()
}
