//! Test fixtures: hand-built multipart bodies and byte streams.

use bytes::Bytes;
use futures::Stream;

pub const BOUNDARY: &str = "intake-test-boundary-7MA4YWxkTrZu0gW";
pub const BOUNDARY_CONTENT_TYPE: &str =
    "multipart/form-data; boundary=intake-test-boundary-7MA4YWxkTrZu0gW";

const CHUNK_SIZE: usize = 1000;

pub struct Part<'a> {
    name: &'a str,
    file_name: Option<&'a str>,
    content_type: Option<&'a str>,
    data: &'a [u8],
}

impl<'a> Part<'a> {
    pub fn file(name: &'a str, file_name: &'a str, content_type: &'a str, data: &'a [u8]) -> Self {
        Self {
            name,
            file_name: Some(file_name),
            content_type: Some(content_type),
            data,
        }
    }

    pub fn text(name: &'a str, value: &'a str) -> Self {
        Self {
            name,
            file_name: None,
            content_type: None,
            data: value.as_bytes(),
        }
    }
}

/// Encode `parts` as a multipart/form-data body delimited by [`BOUNDARY`].
pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        let disposition = match part.file_name {
            Some(file_name) => format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                part.name, file_name
            ),
            None => format!("Content-Disposition: form-data; name=\"{}\"\r\n", part.name),
        };
        body.extend_from_slice(disposition.as_bytes());
        if let Some(content_type) = part.content_type {
            body.extend_from_slice(format!("Content-Type: {}\r\n", content_type).as_bytes());
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

/// PNG signature followed by zero padding up to `len` bytes.
pub fn png_bytes(len: usize) -> Vec<u8> {
    let mut png = vec![
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52,
    ];
    png.resize(len.max(png.len()), 0);
    png
}

fn chunks(body: Vec<u8>) -> Vec<Bytes> {
    body.chunks(CHUNK_SIZE)
        .map(Bytes::copy_from_slice)
        .collect()
}

/// Serve `body` in small chunks, like a network read.
pub fn body_stream(body: Vec<u8>) -> impl Stream<Item = Result<Bytes, std::io::Error>> + Send {
    futures::stream::iter(chunks(body).into_iter().map(Ok))
}

/// Serve `body` and then fail as if the client connection dropped.
pub fn interrupted_stream(
    body: Vec<u8>,
) -> impl Stream<Item = Result<Bytes, std::io::Error>> + Send {
    let items = chunks(body)
        .into_iter()
        .map(Ok)
        .chain(std::iter::once(Err(std::io::Error::new(
            std::io::ErrorKind::ConnectionReset,
            "client closed the connection",
        ))));
    futures::stream::iter(items)
}
