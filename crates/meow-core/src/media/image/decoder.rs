use image::RgbaImage;
use std::io::{Error, ErrorKind, Read, Result};

use super::iterators::ColorIter;
use super::lsb_codec::LowBitsConcealer;
use crate::bit_packer::bits_to_bytes;
use crate::CodecOptions;

/// LSB source for image files, based on `RgbaImage` by `image` crate
///
/// Reads never go further than the requested number of bytes, and a read at the
/// end of the image returns only the whole bytes that were left.
///
/// ## Example of usage
/// ```rust
/// use std::io::{Read, Write};
/// use image::RgbaImage;
/// use meow_core::CodecOptions;
/// use meow_core::media::image::decoder::LsbDecoder;
/// use meow_core::media::image::encoder::LsbEncoder;
///
/// let mut image = RgbaImage::new(4, 4);
/// LsbEncoder::new(&mut image, &CodecOptions::default())
///     .write_all(b"Hi")
///     .expect("Cannot write secret message");
///
/// let mut secret = [0; 2];
/// LsbDecoder::new(&image, &CodecOptions::default())
///     .read_exact(&mut secret)
///     .expect("Cannot read 2 bytes from decoder");
/// assert_eq!(&secret, b"Hi");
/// ```
pub struct LsbDecoder<'i> {
    colors: ColorIter<'i>,
    concealer: LowBitsConcealer,
    colors_per_byte: usize,
}

impl<'i> LsbDecoder<'i> {
    pub fn new(input: &'i RgbaImage, opts: &CodecOptions) -> Self {
        Self {
            colors: ColorIter::from_pixels(input.pixels(), &opts.channels),
            concealer: LowBitsConcealer::new(opts.bits_per_channel()),
            colors_per_byte: opts.channels_per_byte(),
        }
    }
}

impl Read for LsbDecoder<'_> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let mut bits = Vec::with_capacity(buf.len() << 3);
        for color in self.colors.by_ref().take(buf.len() * self.colors_per_byte) {
            bits.extend(self.concealer.unveil(color));
        }
        // a partial byte can only happen at the very end of the image
        bits.truncate(bits.len() & !7);

        let bytes = bits_to_bytes(&bits).map_err(|e| Error::new(ErrorKind::InvalidData, e))?;
        buf[..bytes.len()].copy_from_slice(&bytes);

        Ok(bytes.len())
    }
}
