//! Binary (protobuf) encoding of records.
//!
//! Two layouts are used on disk:
//! - a single message per file, holding a whole logical collection;
//! - a delimited sequence: independent messages back to back, each preceded
//!   by its varint-encoded length, read until end of input.

use crate::error::{Result, StorageError};
use crate::util::atomic_write;
use prost::Message;
use std::path::Path;

pub fn encode_message<M: Message>(message: &M) -> Vec<u8> {
    message.encode_to_vec()
}

/// Decode one message; `path` only feeds the error.
pub fn decode_message<M: Message + Default>(path: &Path, bytes: &[u8]) -> Result<M> {
    M::decode(bytes).map_err(|source| StorageError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn encode_delimited<M: Message>(messages: &[M]) -> Vec<u8> {
    let capacity = messages
        .iter()
        .map(|message| {
            let len = message.encoded_len();
            len + prost::length_delimiter_len(len)
        })
        .sum();
    let mut buf = Vec::with_capacity(capacity);
    for message in messages {
        buf.extend_from_slice(&message.encode_length_delimited_to_vec());
    }
    buf
}

/// Decode length-prefixed messages until the input is exhausted.
pub fn decode_delimited<M: Message + Default>(path: &Path, bytes: &[u8]) -> Result<Vec<M>> {
    let mut remaining = bytes;
    let mut messages = Vec::new();
    while !remaining.is_empty() {
        let message =
            M::decode_length_delimited(&mut remaining).map_err(|source| StorageError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        messages.push(message);
    }
    Ok(messages)
}

pub fn read_message<M: Message + Default>(path: &Path) -> Result<M> {
    let bytes = std::fs::read(path).map_err(|err| StorageError::io(path, err))?;
    decode_message(path, &bytes)
}

pub fn write_message<M: Message>(path: &Path, message: &M) -> Result<()> {
    atomic_write(path, &encode_message(message))
}

pub fn read_delimited<M: Message + Default>(path: &Path) -> Result<Vec<M>> {
    let bytes = std::fs::read(path).map_err(|err| StorageError::io(path, err))?;
    decode_delimited(path, &bytes)
}

pub fn write_delimited<M: Message>(path: &Path, messages: &[M]) -> Result<()> {
    atomic_write(path, &encode_delimited(messages))
}
