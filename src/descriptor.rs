//! Process descriptor wire format.
//!
//! A descriptor serializes one process image, all multi-byte fields
//! big-endian: identifier (1 byte), code length (2 bytes), code bytes,
//! data length (2 bytes), data bytes, end marker (`0xFF`). Parsing is
//! independent of frame allocation; the page table is built later.

use nom::bytes::complete::{tag, take};
use nom::error::Error;
use nom::number::complete::{u16, u8};
use nom::number::Endianness;
use nom::IResult;

/// End-of-descriptor sentinel.
pub const END_MARKER: u8 = 0xFF;

/// One process image decoded from a descriptor, before any frames are
/// assigned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Descriptor {
    pub pid: u8,
    pub code: Vec<u8>,
    pub data: Vec<u8>,
}

impl Descriptor {
    pub fn parse(bytes: &[u8]) -> IResult<&[u8], Descriptor> {
        let (bytes, pid) = u8(bytes)?;

        let (bytes, code_len) = u16(Endianness::Big)(bytes)?;
        let (bytes, code) = take(code_len)(bytes)?;

        let (bytes, data_len) = u16(Endianness::Big)(bytes)?;
        let (bytes, data) = take(data_len)(bytes)?;

        let (bytes, _) = tag([END_MARKER])(bytes)?;

        Ok((
            bytes,
            Descriptor {
                pid,
                code: code.to_vec(),
                data: data.to_vec(),
            },
        ))
    }

    pub fn parse_bytes(bytes: &[u8]) -> Result<Descriptor, nom::Err<Error<&[u8]>>> {
        Ok(Self::parse(bytes)?.1)
    }
}

/// Builds descriptor bytes the way the external generator does.
/// Test fixture helper.
#[cfg(test)]
pub fn encode(pid: u8, code: &[u8], data: &[u8]) -> Vec<u8> {
    let mut bytes = vec![pid];
    bytes.extend_from_slice(&(code.len() as u16).to_be_bytes());
    bytes.extend_from_slice(code);
    bytes.extend_from_slice(&(data.len() as u16).to_be_bytes());
    bytes.extend_from_slice(data);
    bytes.push(END_MARKER);
    bytes
}
