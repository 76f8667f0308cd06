use std::collections::HashMap;
use std::fmt;

use bytes::Bytes;

use crate::http::headers::HeaderMap;

/// HTTP request methods.
///
/// The engine recognizes exactly these four; any other token on the
/// request line is a parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    GET,
    POST,
    PUT,
    DELETE,
}

impl Method {
    /// Resolves a request-line token against the method set.
    ///
    /// Matching is case-sensitive, as on the wire.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "GET" => Some(Method::GET),
            "POST" => Some(Method::POST),
            "PUT" => Some(Method::PUT),
            "DELETE" => Some(Method::DELETE),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed HTTP request.
///
/// Everything except `params` is fixed once parsing finishes; `params`
/// is filled in by the router from the capture groups of the matched
/// route pattern.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    /// The raw request target, percent-encoding untouched.
    pub path: String,
    /// The protocol version token as received (e.g. "HTTP/1.1"), unvalidated.
    pub version: String,
    /// Headers in arrival order, last write wins on duplicates.
    pub headers: HeaderMap,
    /// Value of the `Host` header, if the client sent one.
    pub host: Option<String>,
    /// Pairs from the `Cookie` header.
    pub cookies: HashMap<String, String>,
    /// Route pattern captures, in group order.
    pub params: Vec<String>,
    /// Exactly `Content-Length` bytes, empty when the header is absent.
    pub body: Bytes,
}

impl Request {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(|v| v.as_str())
    }

    pub fn param(&self, index: usize) -> Option<&str> {
        self.params.get(index).map(|v| v.as_str())
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}\r\n", self.method, self.path, self.version)?;
        for (name, value) in self.headers.iter() {
            write!(f, "{}: {}\r\n", name, value)?;
        }
        write!(f, "\r\n")?;
        // Small textual bodies are worth showing in logs, anything else is not.
        if self.body.len() < 1000 {
            if let Ok(text) = std::str::from_utf8(&self.body) {
                f.write_str(text)?;
            }
        }
        Ok(())
    }
}

/// Splits a `Cookie` header value into pairs.
///
/// Pairs are `key=value` separated by `"; "`; a pair without `=` is
/// silently dropped.
pub fn parse_cookies(raw: &str) -> HashMap<String, String> {
    raw.split("; ")
        .filter_map(|pair| pair.split_once('='))
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
