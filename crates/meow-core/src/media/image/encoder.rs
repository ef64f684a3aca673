use image::RgbaImage;
use std::io::{Error, ErrorKind, Result, Write};

use super::iterators::ColorIterMut;
use super::lsb_codec::LowBitsConcealer;
use crate::bit_packer::bytes_to_bits;
use crate::CodecOptions;

/// LSB sink for image files, based on `RgbaImage` by `image` crate
///
/// ## Example of usage
/// ```rust
/// use std::io::Write;
/// use image::RgbaImage;
/// use meow_core::CodecOptions;
/// use meow_core::media::image::encoder::LsbEncoder;
///
/// let original = RgbaImage::from_pixel(4, 4, image::Rgba([200, 100, 50, 255]));
/// let mut image = original.clone();
/// {
///     let mut encoder = LsbEncoder::new(&mut image, &CodecOptions::default());
///     encoder.write_all(b"Hi").expect("Cannot write secret message");
/// }
/// assert_ne!(original.get_pixel(0, 0), image.get_pixel(0, 0));
/// assert_eq!(original.get_pixel(3, 3), image.get_pixel(3, 3));
/// ```
pub struct LsbEncoder<'a> {
    colors: ColorIterMut<'a>,
    concealer: LowBitsConcealer,
    remaining_colors: usize,
    colors_per_byte: usize,
}

impl<'a> LsbEncoder<'a> {
    pub fn new(carrier: &'a mut RgbaImage, opts: &CodecOptions) -> Self {
        let (width, height) = carrier.dimensions();
        Self {
            remaining_colors: width as usize * height as usize * opts.channels_used(),
            colors_per_byte: opts.channels_per_byte(),
            concealer: LowBitsConcealer::new(opts.bits_per_channel()),
            colors: ColorIterMut::from_pixels(carrier.pixels_mut(), &opts.channels),
        }
    }

    /// number of whole bytes that still fit into the carrier
    pub fn remaining_bytes(&self) -> usize {
        self.remaining_colors / self.colors_per_byte
    }
}

impl Write for LsbEncoder<'_> {
    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        if buf.len() > self.remaining_bytes() {
            return Err(Error::new(
                ErrorKind::WriteZero,
                format!(
                    "{} bytes do not fit, only {} bytes left in carrier",
                    buf.len(),
                    self.remaining_bytes()
                ),
            ));
        }

        let bits = bytes_to_bits(buf);
        for (chunk, color) in bits.chunks(self.concealer.bits()).zip(self.colors.by_ref()) {
            self.concealer.hide(color, chunk);
        }
        self.remaining_colors -= buf.len() * self.colors_per_byte;

        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::prepare_noise_image;

    #[test]
    fn should_count_down_remaining_bytes() {
        let mut img = prepare_noise_image(4, 4, 1);
        // 16 pixels * 3 channels / 4 channels per byte
        let mut encoder = LsbEncoder::new(&mut img, &CodecOptions::default());
        assert_eq!(encoder.remaining_bytes(), 12);

        encoder.write_all(&[1, 2, 3]).unwrap();
        assert_eq!(encoder.remaining_bytes(), 9);
    }

    #[test]
    fn should_leave_everything_behind_the_data_untouched() {
        let original = prepare_noise_image(4, 4, 3);
        let mut img = original.clone();
        LsbEncoder::new(&mut img, &CodecOptions::default())
            .write_all(&[0xff; 3])
            .unwrap();

        // 3 bytes -> 12 channels -> the first 4 pixels
        for (i, (before, after)) in original.pixels().zip(img.pixels()).enumerate() {
            if i >= 4 {
                assert_eq!(before, after, "pixel #{i} was modified");
            }
        }
    }
}
