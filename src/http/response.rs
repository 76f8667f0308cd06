use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use bytes::Bytes;

use crate::http::mime::MimeType;

/// HTTP status codes the server can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// 200 Success
    Success,
    /// 301 Moved Permanently
    MovedPermanently,
    /// 302 Moved Temporarily
    MovedTemporarily,
    /// 304 Not Modified
    NotModified,
    /// 400 Fail
    Fail,
    /// 404 Not Found
    NotFound,
    /// 500 Internal Server Error
    ServerError,
}

impl Status {
    pub fn as_u16(&self) -> u16 {
        match self {
            Status::Success => 200,
            Status::MovedPermanently => 301,
            Status::MovedTemporarily => 302,
            Status::NotModified => 304,
            Status::Fail => 400,
            Status::NotFound => 404,
            Status::ServerError => 500,
        }
    }

    pub fn reason_phrase(&self) -> &'static str {
        match self {
            Status::Success => "Success",
            Status::MovedPermanently => "Moved Permanently",
            Status::MovedTemporarily => "Moved Temporarily",
            Status::NotModified => "Not Modified",
            Status::Fail => "Fail",
            Status::NotFound => "Not Found",
            Status::ServerError => "Internal Server Error",
        }
    }
}

/// Where the response body comes from.
///
/// File bodies are streamed at send time so a large file never has to fit
/// in memory.
#[derive(Debug, Clone)]
pub enum Body {
    Empty,
    Bytes(Bytes),
    File(PathBuf),
}

/// An HTTP response under construction.
///
/// Headers are raw `"Name: Value"` lines kept in insertion order and
/// repeated on the wire in exactly that order. Sending consumes the
/// response, so nothing can be added once transmission has begun.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: Status,
    pub headers: Vec<String>,
    pub body: Body,
}

impl Response {
    pub fn new(status: Status) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Body::Empty,
        }
    }

    pub fn ok() -> Self {
        Self::new(Status::Success)
    }

    pub fn not_found() -> Self {
        Self::new(Status::NotFound)
    }

    pub fn not_modified() -> Self {
        Self::new(Status::NotModified)
    }

    pub fn bad_request() -> Self {
        Self::new(Status::Fail)
    }

    pub fn server_error() -> Self {
        Self::new(Status::ServerError)
    }

    /// Appends a raw header line.
    pub fn add_header(mut self, name: &str, value: impl fmt::Display) -> Self {
        self.headers.push(format!("{}: {}", name, value));
        self
    }

    /// An in-memory body with `Content-Type` and `Content-Length` set.
    pub fn raw(data: impl Into<Bytes>, content_type: &str) -> Self {
        let data = data.into();
        let mut response = Response::ok()
            .add_header("Content-Type", content_type)
            .add_header("Content-Length", data.len());
        response.body = Body::Bytes(data);
        response
    }

    /// A plain-text body.
    pub fn text(content: impl fmt::Display) -> Self {
        Self::raw(content.to_string(), "text/plain")
    }

    /// A JSON body.
    pub fn json(value: &serde_json::Value) -> Self {
        Self::raw(value.to_string(), "application/json")
    }

    /// A permanent redirect to `url`.
    pub fn redirect(url: &str) -> Self {
        Self::new(Status::MovedPermanently).add_header("Location", url)
    }

    /// A temporary redirect to `url`.
    pub fn redirect_temporarily(url: &str) -> Self {
        Self::new(Status::MovedTemporarily).add_header("Location", url)
    }

    /// An empty 200 response that just sets a cookie.
    pub fn cookie(name: &str, value: &str, max_age: Duration) -> Self {
        Response::ok().set_cookie(name, value, max_age)
    }

    /// Adds a `Set-Cookie` header expiring `max_age` from now.
    pub fn set_cookie(self, name: &str, value: &str, max_age: Duration) -> Self {
        let expires = httpdate::fmt_http_date(SystemTime::now() + max_age);
        self.add_header(
            "Set-Cookie",
            format!("{}={}; Path=/; Expires={}", name, value, expires),
        )
    }

    /// Responds with the content of a file.
    ///
    /// A missing or non-regular file turns into 404. When `cache_date`
    /// matches the file's modification time (HTTP dates have whole-second
    /// resolution) the body is skipped and 304 returned instead. The
    /// content type is deduced from the file name and omitted when unknown.
    pub fn file(path: impl AsRef<Path>, cache_date: Option<SystemTime>) -> Self {
        let mime = path
            .as_ref()
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(MimeType::from_file_name);
        Self::file_response(path.as_ref(), mime.map(|m| m.content_type()), cache_date)
    }

    /// Like [`Response::file`] but with an explicit content type.
    pub fn file_with_type(
        path: impl AsRef<Path>,
        content_type: &str,
        cache_date: Option<SystemTime>,
    ) -> Self {
        Self::file_response(path.as_ref(), Some(content_type), cache_date)
    }

    fn file_response(path: &Path, content_type: Option<&str>, cache_date: Option<SystemTime>) -> Self {
        let meta = match std::fs::metadata(path) {
            Ok(meta) if meta.is_file() => meta,
            _ => return Response::not_found(),
        };
        let modified = match meta.modified() {
            Ok(modified) => modified,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "file has no modification time");
                return Response::server_error();
            }
        };
        if let Some(cached) = cache_date {
            if whole_seconds(cached) == whole_seconds(modified) {
                return Response::not_modified();
            }
        }
        let mut response = Response::ok();
        if let Some(content_type) = content_type {
            response = response.add_header("Content-Type", content_type);
        }
        let mut response = response
            .add_header("Content-Length", meta.len())
            .add_header("Last-Modified", httpdate::fmt_http_date(modified))
            .add_header("Cache-Control", "Public");
        response.body = Body::File(path.to_path_buf());
        response
    }
}

fn whole_seconds(time: SystemTime) -> u64 {
    time.duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Resolves a request path against a base directory.
///
/// The path must start with `/` and may not contain `..`.
pub fn safe_path(base: impl AsRef<Path>, path: &str) -> Option<PathBuf> {
    if !path.starts_with('/') {
        return None;
    }
    if path.contains("..") {
        return None;
    }
    Some(base.as_ref().join(&path[1..]))
}
