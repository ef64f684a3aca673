//! Capacity planning, always done before a single pixel is touched.

use image::RgbaImage;
use log::debug;

use crate::container::HEADER_SIZE;
use crate::{CodecOptions, MeowError, Result};

/// total number of bits the image can carry
pub fn bit_budget(width: u32, height: u32, channels_used: usize, bits_per_channel: usize) -> u64 {
    width as u64 * height as u64 * channels_used as u64 * bits_per_channel as u64
}

/// biggest payload in bytes that fits next to the container header
///
/// fails with [`MeowError::ImageTooSmall`] if not even the header fits
pub fn max_payload_bytes(
    width: u32,
    height: u32,
    channels_used: usize,
    bits_per_channel: usize,
) -> Result<usize> {
    let budget_bytes = (bit_budget(width, height, channels_used, bits_per_channel) / 8) as usize;

    budget_bytes
        .checked_sub(HEADER_SIZE)
        .ok_or(MeowError::ImageTooSmall(budget_bytes))
}

/// payload capacity of an image with the given options
pub fn capacity_of(image: &RgbaImage, opts: &CodecOptions) -> Result<usize> {
    let (width, height) = image.dimensions();
    let capacity = max_payload_bytes(
        width,
        height,
        opts.channels_used(),
        opts.bits_per_channel(),
    )?;
    debug!("{width}x{height} image can carry {capacity} payload bytes");

    Ok(capacity)
}

pub fn validate(payload_len: usize, capacity: usize) -> Result<()> {
    if payload_len > capacity {
        return Err(MeowError::PayloadTooLarge {
            needed: payload_len,
            capacity,
        });
    }

    Ok(())
}
