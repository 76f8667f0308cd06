use std::io;

use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::http::Version;
use crate::http::response::{Body, Response};

/// Chunk size for streaming file bodies.
const FILE_CHUNK: usize = 1024;

/// Serializes the status line and header block of a response.
///
/// Header lines go out verbatim, in stored order. Nothing is validated,
/// deduplicated or re-cased here.
fn serialize_head(response: &Response) -> Vec<u8> {
    let mut head = Vec::new();

    let status_line = format!(
        "{} {} {}\r\n",
        Version::Http11.as_str(),
        response.status.as_u16(),
        response.status.reason_phrase()
    );
    head.extend_from_slice(status_line.as_bytes());

    for line in &response.headers {
        head.extend_from_slice(line.as_bytes());
        head.extend_from_slice(b"\r\n");
    }

    head.extend_from_slice(b"\r\n");
    head
}

/// Writes a response onto the connection's output.
///
/// Consumes the response: the status line and header block hit the wire
/// before the first body byte, so no header can be added afterwards.
/// In-memory bodies are written in one piece; file bodies are streamed
/// in fixed-size chunks so memory use is independent of file size.
pub async fn send<W: AsyncWrite + Unpin>(response: Response, out: &mut W) -> io::Result<()> {
    let head = serialize_head(&response);
    out.write_all(&head).await?;

    match response.body {
        Body::Empty => {}
        Body::Bytes(data) => out.write_all(&data).await?,
        Body::File(path) => {
            let mut file = File::open(path).await?;
            let mut chunk = [0u8; FILE_CHUNK];
            loop {
                let n = file.read(&mut chunk).await?;
                if n == 0 {
                    break;
                }
                out.write_all(&chunk[..n]).await?;
            }
        }
    }

    out.flush().await
}
