use crate::error::BrookError;
use bytes::{BufMut, Bytes, BytesMut};
use std::str::from_utf8;

/// The trait represents the logic responsible for serializing and deserializing the struct to and from bytes.
pub trait BytesSerializable {
    /// Serializes the struct to bytes.
    fn to_bytes(&self) -> Bytes;

    /// Deserializes the struct from bytes.
    fn from_bytes(bytes: Bytes) -> Result<Self, BrookError>
    where
        Self: Sized;
}

pub(crate) fn read_u8(bytes: &[u8], position: usize) -> Result<u8, BrookError> {
    bytes
        .get(position)
        .copied()
        .ok_or(BrookError::InvalidCommand)
}

pub(crate) fn read_u32(bytes: &[u8], position: usize) -> Result<u32, BrookError> {
    let slice = bytes
        .get(position..position + 4)
        .ok_or(BrookError::InvalidCommand)?;
    Ok(u32::from_le_bytes(slice.try_into()?))
}

pub(crate) fn read_u64(bytes: &[u8], position: usize) -> Result<u64, BrookError> {
    let slice = bytes
        .get(position..position + 8)
        .ok_or(BrookError::InvalidCommand)?;
    Ok(u64::from_le_bytes(slice.try_into()?))
}

/// Reads a string prefixed with a single length byte, returns it with the number of bytes read.
pub(crate) fn read_short_string(
    bytes: &[u8],
    position: usize,
) -> Result<(String, usize), BrookError> {
    let length = read_u8(bytes, position)? as usize;
    let value = bytes
        .get(position + 1..position + 1 + length)
        .ok_or(BrookError::InvalidCommand)?;
    Ok((from_utf8(value)?.to_string(), 1 + length))
}

/// Reads a string prefixed with a 4 bytes length, returns it with the number of bytes read.
pub(crate) fn read_string(bytes: &[u8], position: usize) -> Result<(String, usize), BrookError> {
    let length = read_u32(bytes, position)? as usize;
    let value = bytes
        .get(position + 4..position + 4 + length)
        .ok_or(BrookError::InvalidCommand)?;
    Ok((from_utf8(value)?.to_string(), 4 + length))
}

/// Reads a payload prefixed with a 4 bytes length without copying it.
pub(crate) fn read_payload(bytes: &Bytes, position: usize) -> Result<(Bytes, usize), BrookError> {
    let length = read_u32(bytes, position)? as usize;
    let start = position + 4;
    if bytes.len() < start + length {
        return Err(BrookError::InvalidMessagePayloadLength);
    }

    Ok((bytes.slice(start..start + length), 4 + length))
}

pub(crate) fn write_short_string(bytes: &mut BytesMut, value: &str) {
    bytes.put_u8(value.len() as u8);
    bytes.put_slice(value.as_bytes());
}

pub(crate) fn write_string(bytes: &mut BytesMut, value: &str) {
    bytes.put_u32_le(value.len() as u32);
    bytes.put_slice(value.as_bytes());
}

pub(crate) fn write_payload(bytes: &mut BytesMut, value: &[u8]) {
    bytes.put_u32_le(value.len() as u32);
    bytes.put_slice(value);
}
