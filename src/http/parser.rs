use std::io;

use bytes::Bytes;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::http::capped::{self, CappedReader};
use crate::http::headers::{self, HeaderError, HeaderMap};
use crate::http::request::{self, Method, Request};

/// Byte cap for the request line plus header block.
pub const MAX_HEADER_BYTES: usize = 1 << 13;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("malformed request line: {0:?}")]
    MalformedRequestLine(String),
    #[error("unknown method: {0:?}")]
    UnknownMethod(String),
    #[error("header region exceeded {0} bytes")]
    HeaderTooLarge(usize),
    #[error("malformed header line: {0:?}")]
    MalformedHeader(String),
    #[error("invalid Content-Length: {0:?}")]
    InvalidContentLength(String),
    #[error("body ended after {got} of {expected} bytes")]
    TruncatedBody { expected: usize, got: usize },
    #[error("connection lost: {0}")]
    ConnectionLost(io::Error),
}

impl ParseError {
    /// Whether the failure deserves a best-effort 400 instead of a
    /// silent close.
    pub fn wants_bad_request(&self) -> bool {
        matches!(
            self,
            ParseError::MalformedRequestLine(_)
                | ParseError::UnknownMethod(_)
                | ParseError::MalformedHeader(_)
                | ParseError::InvalidContentLength(_)
        )
    }

    fn from_io(err: io::Error) -> Self {
        if capped::is_cap_exceeded(&err) {
            ParseError::HeaderTooLarge(MAX_HEADER_BYTES)
        } else {
            ParseError::ConnectionLost(err)
        }
    }
}

impl From<HeaderError> for ParseError {
    fn from(err: HeaderError) -> Self {
        match err {
            HeaderError::Malformed(line) => ParseError::MalformedHeader(line),
            HeaderError::Io(err) => ParseError::from_io(err),
        }
    }
}

/// Reads one request off the stream.
///
/// The request line and header block come through a capped reader so a
/// client can never grow them past [`MAX_HEADER_BYTES`]; the body is read
/// from the underlying stream afterwards, with no cap, until exactly
/// `Content-Length` bytes have arrived. No state survives the call.
pub async fn parse_request<R: AsyncRead + Unpin>(stream: &mut R) -> Result<Request, ParseError> {
    let (method, path, version, headers) = {
        let mut capped = CappedReader::new(stream, MAX_HEADER_BYTES);

        let request_line = headers::read_line(&mut capped)
            .await
            .map_err(ParseError::from_io)?;
        let tokens: Vec<&str> = request_line.split(' ').collect();
        if tokens.len() != 3 {
            return Err(ParseError::MalformedRequestLine(request_line.clone()));
        }
        let method = Method::from_token(tokens[0])
            .ok_or_else(|| ParseError::UnknownMethod(tokens[0].to_string()))?;
        let path = tokens[1].to_string();
        let version = tokens[2].to_string();

        let headers = headers::read_headers(&mut capped).await?;
        (method, path, version, headers)
    };

    let host = headers.get("Host").map(str::to_owned);
    let cookies = headers
        .get("Cookie")
        .map(request::parse_cookies)
        .unwrap_or_default();
    let content_length = content_length(&headers)?;
    let body = read_body(stream, content_length).await?;

    Ok(Request {
        method,
        path,
        version,
        headers,
        host,
        cookies,
        params: Vec::new(),
        body,
    })
}

fn content_length(headers: &HeaderMap) -> Result<usize, ParseError> {
    match headers.get("Content-Length") {
        None => Ok(0),
        Some(value) => value
            .parse()
            .map_err(|_| ParseError::InvalidContentLength(value.to_string())),
    }
}

/// Reads exactly `length` body bytes from the uncapped stream.
async fn read_body<R: AsyncRead + Unpin>(
    stream: &mut R,
    length: usize,
) -> Result<Bytes, ParseError> {
    let mut body = vec![0u8; length];
    let mut total = 0;
    while total < length {
        let n = stream
            .read(&mut body[total..])
            .await
            .map_err(ParseError::ConnectionLost)?;
        if n == 0 {
            return Err(ParseError::TruncatedBody {
                expected: length,
                got: total,
            });
        }
        total += n;
    }
    Ok(Bytes::from(body))
}
