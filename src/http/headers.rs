//! Ordered header map and header block parsing.

use std::io;

use tokio::io::AsyncRead;

use crate::http::capped::CappedReader;

#[derive(Debug, thiserror::Error)]
pub enum HeaderError {
    /// A header line without a `:` separator.
    #[error("malformed header line: {0:?}")]
    Malformed(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Ordered mapping of header name to value.
///
/// Insertion order is preserved, names keep the case they arrived with,
/// and a duplicate name overwrites the earlier value (last write wins).
#[derive(Debug, Clone, Default)]
pub struct HeaderMap {
    entries: Vec<(String, String)>,
}

impl HeaderMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Reads one CRLF-terminated line off the capped reader.
///
/// Bytes are read one at a time so nothing past the line is consumed;
/// the body must stay on the underlying stream.
pub async fn read_line<R: AsyncRead + Unpin>(
    reader: &mut CappedReader<'_, R>,
) -> io::Result<String> {
    let mut line = Vec::new();
    loop {
        match reader.read_byte().await? {
            None => {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "connection closed before end of line",
                ));
            }
            Some(b'\n') => break,
            Some(byte) => line.push(byte),
        }
    }
    if line.last() == Some(&b'\r') {
        line.pop();
    }
    String::from_utf8(line)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Parses a header block terminated by an empty line into a [`HeaderMap`].
pub async fn read_headers<R: AsyncRead + Unpin>(
    reader: &mut CappedReader<'_, R>,
) -> Result<HeaderMap, HeaderError> {
    let mut headers = HeaderMap::new();
    loop {
        let line = read_line(reader).await?;
        if line.is_empty() {
            return Ok(headers);
        }
        let (name, value) = line
            .split_once(':')
            .ok_or_else(|| HeaderError::Malformed(line.clone()))?;
        headers.insert(name.trim(), value.trim());
    }
}
