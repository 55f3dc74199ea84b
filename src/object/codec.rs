//! object framing and zlib compression
//!
//! a framed object is `"<kind> <len>\0"` followed by the raw content. the
//! object id is the SHA-1 of the framed bytes, and the framed bytes are what
//! gets zlib-compressed onto disk.

use std::fmt;
use std::io::{Read, Write};
use std::str::FromStr;

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::error::{Error, IoResultExt, Result};

/// kind of stored object
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Blob,
    Tree,
    Commit,
}

impl ObjectKind {
    /// header tag for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Blob => "blob",
            ObjectKind::Tree => "tree",
            ObjectKind::Commit => "commit",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObjectKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "blob" => Ok(ObjectKind::Blob),
            "tree" => Ok(ObjectKind::Tree),
            "commit" => Ok(ObjectKind::Commit),
            other => Err(Error::InvalidObjectKind(other.to_string())),
        }
    }
}

/// frame content with its header
pub fn encode(kind: ObjectKind, content: &[u8]) -> Vec<u8> {
    let header = format!("{} {}\0", kind, content.len());
    let mut framed = Vec::with_capacity(header.len() + content.len());
    framed.extend_from_slice(header.as_bytes());
    framed.extend_from_slice(content);
    framed
}

/// split framed bytes into kind and content
///
/// the declared length must match the number of content bytes.
pub fn decode(framed: &[u8]) -> Result<(ObjectKind, &[u8])> {
    let nul = framed
        .iter()
        .position(|&b| b == 0)
        .ok_or_else(|| Error::Framing("missing header terminator".to_string()))?;

    let header = std::str::from_utf8(&framed[..nul])
        .map_err(|_| Error::Framing("header is not valid utf-8".to_string()))?;
    let (kind, len) = header
        .split_once(' ')
        .ok_or_else(|| Error::Framing(format!("no space in header {:?}", header)))?;

    let kind: ObjectKind = kind.parse()?;
    let len = parse_len(len)
        .ok_or_else(|| Error::Framing(format!("bad length in header {:?}", header)))?;

    let content = &framed[nul + 1..];
    if content.len() != len {
        return Err(Error::Framing(format!(
            "header declares {} bytes, found {}",
            len,
            content.len()
        )));
    }

    Ok((kind, content))
}

/// canonical decimal length: ascii digits only, no leading zero unless exactly "0"
fn parse_len(len: &str) -> Option<usize> {
    if len.is_empty() || !len.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if len.len() > 1 && len.starts_with('0') {
        return None;
    }
    len.parse().ok()
}

/// zlib-compress bytes (the container git uses for loose objects)
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).with_path("<zlib>")?;
    encoder.finish().with_path("<zlib>")
}

/// inflate zlib-compressed bytes
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = ZlibDecoder::new(data);
    let mut out = Vec::new();
    decoder.read_to_end(&mut out).map_err(Error::Decompress)?;
    Ok(out)
}
