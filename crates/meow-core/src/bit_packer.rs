//! Converts between bytes and the flat bit sequence that is spread over the color channels.
//!
//! Bits are always most significant bit first, so `0b1000_0001` expands to
//! `[true, false, false, false, false, false, false, true]`.

use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter};
use std::io::Cursor;

use crate::{MeowError, Result};

/// expands every byte into 8 bits, MSB first
pub fn bytes_to_bits(data: &[u8]) -> Vec<bool> {
    let mut reader = BitReader::endian(Cursor::new(data), BigEndian);

    (0..data.len() << 3)
        .map_while(|_| reader.read_bit().ok())
        .collect()
}

/// packs a bit sequence back into bytes, MSB first
///
/// fails with [`MeowError::TruncatedBitstream`] if the sequence is not byte aligned
pub fn bits_to_bytes(bits: &[bool]) -> Result<Vec<u8>> {
    if bits.len() % 8 != 0 {
        return Err(MeowError::TruncatedBitstream);
    }

    let mut writer = BitWriter::endian(Vec::with_capacity(bits.len() >> 3), BigEndian);
    for bit in bits {
        writer.write_bit(*bit)?;
    }

    Ok(writer.into_writer())
}
