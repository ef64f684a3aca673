//! Fixed layout of the container header.
//!
//! ```text
//! | MEOW_STEG_V1 (12 bytes) | payload length (u32, little endian) | payload ... |
//! ```
//!
//! Embedder and extractor both build and parse the header only through this module.

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use log::debug;
use std::io::{ErrorKind, Read, Write};

use crate::{MeowError, Result};

pub const MARKER_SIZE: usize = 12;
pub const MARKER: &[u8; MARKER_SIZE] = b"MEOW_STEG_V1";
pub const LENGTH_FIELD_SIZE: usize = 4;
pub const HEADER_SIZE: usize = MARKER_SIZE + LENGTH_FIELD_SIZE;

/// byte order of the length field
type LengthOrder = LittleEndian;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerHeader {
    payload_len: u32,
}

impl ContainerHeader {
    pub fn for_payload(payload: &[u8]) -> Result<Self> {
        let payload_len = u32::try_from(payload.len()).map_err(|_| MeowError::PayloadTooLarge {
            needed: payload.len(),
            capacity: u32::MAX as usize,
        })?;

        Ok(Self { payload_len })
    }

    /// exact byte length of the compressed payload following the header
    pub fn payload_len(&self) -> usize {
        self.payload_len as usize
    }

    pub fn write_to(&self, w: &mut dyn Write) -> std::io::Result<()> {
        w.write_all(MARKER)?;
        w.write_u32::<LengthOrder>(self.payload_len)
    }

    /// reads a header from a carrier stream,
    /// the marker is checked before the length field is looked at
    ///
    /// a stream that ends before the header is complete cannot be a container
    pub fn read_from(r: &mut dyn Read) -> Result<Self> {
        let mut marker = [0; MARKER_SIZE];
        r.read_exact(&mut marker).map_err(eof_as_plain_image)?;
        if &marker != MARKER {
            debug!("marker mismatch, found {marker:02x?}");
            return Err(MeowError::NotAMeowContainer);
        }

        let payload_len = r.read_u32::<LengthOrder>().map_err(eof_as_plain_image)?;

        Ok(Self { payload_len })
    }
}

/// prepends the header to the payload
pub fn frame(payload: &[u8]) -> Result<Vec<u8>> {
    let header = ContainerHeader::for_payload(payload)?;
    let mut buf = Vec::with_capacity(HEADER_SIZE + payload.len());
    header.write_to(&mut buf)?;
    buf.extend_from_slice(payload);

    Ok(buf)
}

fn eof_as_plain_image(e: std::io::Error) -> MeowError {
    match e.kind() {
        ErrorKind::UnexpectedEof => MeowError::NotAMeowContainer,
        _ => MeowError::ReadError { source: e },
    }
}
