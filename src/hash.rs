use sha1::{Digest, Sha1};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// length of a raw object id in bytes
pub const ID_LEN: usize = 20;

/// length of an object id rendered as hex
pub const HEX_LEN: usize = ID_LEN * 2;

/// SHA-1 object id used for content addressing
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; ID_LEN]);

impl ObjectId {
    /// zero id (useful as sentinel)
    pub const ZERO: ObjectId = ObjectId([0u8; ID_LEN]);

    /// create from raw bytes
    pub fn from_bytes(bytes: [u8; ID_LEN]) -> Self {
        Self(bytes)
    }

    /// create from a raw byte slice, which must be exactly 20 bytes long
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        <[u8; ID_LEN]>::try_from(bytes).ok().map(Self)
    }

    /// digest of framed object bytes (header + content)
    pub fn digest(framed: &[u8]) -> Self {
        Self(Sha1::digest(framed).into())
    }

    /// parse from hex string
    ///
    /// exactly 40 hex characters are accepted; uppercase digits are allowed
    /// but the id always renders back as lowercase.
    pub fn from_hex(s: &str) -> crate::Result<Self> {
        if s.len() != HEX_LEN {
            return Err(Error::InvalidObjectId(s.to_string()));
        }
        let mut arr = [0u8; ID_LEN];
        hex::decode_to_slice(s, &mut arr).map_err(|_| Error::InvalidObjectId(s.to_string()))?;
        Ok(Self(arr))
    }

    /// get raw bytes
    pub fn as_bytes(&self) -> &[u8; ID_LEN] {
        &self.0
    }

    /// convert to hex string
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// split into path components for the object store
    /// returns (first 2 hex chars, remaining 38 hex chars)
    pub fn to_path_components(&self) -> (String, String) {
        let hex = self.to_hex();
        (hex[..2].to_string(), hex[2..].to_string())
    }
}

impl FromStr for ObjectId {
    type Err = Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", &self.to_hex()[..12])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_hex_roundtrip() {
        let original = ObjectId::from_hex("abcdef0123456789abcdef0123456789abcdef01").unwrap();
        let hex = original.to_hex();
        let parsed = ObjectId::from_hex(&hex).unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_id_uppercase_renders_lowercase() {
        let id = ObjectId::from_hex("ABCDEF0123456789ABCDEF0123456789ABCDEF01").unwrap();
        assert_eq!(id.to_hex(), "abcdef0123456789abcdef0123456789abcdef01");
    }

    #[test]
    fn test_id_invalid_hex() {
        assert!(matches!(
            ObjectId::from_hex("not valid hex"),
            Err(Error::InvalidObjectId(_))
        ));
        assert!(ObjectId::from_hex("abcd").is_err()); // too short
        assert!(ObjectId::from_hex("abcdef0123456789abcdef0123456789abcdef0123").is_err()); // too long
        assert!(ObjectId::from_hex("zzcdef0123456789abcdef0123456789abcdef01").is_err()); // bad charset
        assert!(ObjectId::from_hex("").is_err());
    }

    #[test]
    fn test_id_path_components() {
        let id = ObjectId::from_hex("abcdef0123456789abcdef0123456789abcdef01").unwrap();
        let (dir, file) = id.to_path_components();
        assert_eq!(dir, "ab");
        assert_eq!(file, "cdef0123456789abcdef0123456789abcdef01");
        assert_eq!(file.len(), 38);
    }

    #[test]
    fn test_id_from_slice() {
        assert!(ObjectId::from_slice(&[1u8; 20]).is_some());
        assert!(ObjectId::from_slice(&[1u8; 19]).is_none());
        assert!(ObjectId::from_slice(&[1u8; 21]).is_none());
    }

    #[test]
    fn test_digest_known_values() {
        // git hash-object of "hello\n"
        let id = ObjectId::digest(b"blob 6\0hello\n");
        assert_eq!(id.to_hex(), "ce013625030ba8dba906f756967f9e9ca394464e");

        // empty blob
        let id = ObjectId::digest(b"blob 0\0");
        assert_eq!(id.to_hex(), "e69de29bb2d1d6434b8b29ae775ad8c2e48c5391");
    }

    #[test]
    fn test_digest_determinism() {
        assert_eq!(
            ObjectId::digest(b"blob 5\0hello"),
            ObjectId::digest(b"blob 5\0hello")
        );
        assert_ne!(
            ObjectId::digest(b"blob 5\0hello"),
            ObjectId::digest(b"blob 5\0world")
        );
    }

    #[test]
    fn test_id_ordering() {
        let a = ObjectId::from_hex("0000000000000000000000000000000000000001").unwrap();
        let b = ObjectId::from_hex("0000000000000000000000000000000000000002").unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_id_debug_is_short() {
        let id = ObjectId::from_hex("abcdef0123456789abcdef0123456789abcdef01").unwrap();
        assert_eq!(format!("{:?}", id), "ObjectId(abcdef012345)");
    }
}
