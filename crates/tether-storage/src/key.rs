use crate::error::{Result, StorageError};
use md5::{Digest, Md5};

/// Longest file name accepted by common filesystems.
pub const MAX_ENCODED_KEY_LEN: usize = 255;

/// Encode a logical key (project key, profile key, connection id) as a path segment.
///
/// The key's UTF-8 bytes are hex encoded, which is injective and only uses
/// `[0-9a-f]`. Encodings longer than [`MAX_ENCODED_KEY_LEN`] are cut short and
/// suffixed with the key's MD5 so the result always fits; two such long keys
/// only collide if their MD5 and leading bytes both collide. MD5 is used as a
/// cheap discriminator here, not as a security boundary.
pub fn encode_for_fs(name: &str) -> String {
    let mut encoded = hex::encode(name.as_bytes());
    if encoded.len() <= MAX_ENCODED_KEY_LEN {
        return encoded;
    }

    let digest = md5_hex(name.as_bytes());
    encoded.truncate(MAX_ENCODED_KEY_LEN - digest.len());
    encoded.push_str(&digest);
    encoded
}

/// Reject keys that would encode to an empty path segment and so resolve to
/// the parent directory.
pub(crate) fn require_key(kind: &'static str, key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(StorageError::InvalidKey { kind });
    }
    Ok(())
}

pub(crate) fn md5_hex(bytes: &[u8]) -> String {
    hex::encode(Md5::digest(bytes))
}
