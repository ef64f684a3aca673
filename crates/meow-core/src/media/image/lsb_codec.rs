use super::decoder::LsbDecoder;
use super::encoder::LsbEncoder;
use crate::CodecOptions;

use image::RgbaImage;
use std::io::{Read, Write};

/// Stores bits in the `bits` least significant bits of a color channel.
///
/// The first bit of a chunk lands in the highest of those low bits, so a byte
/// keeps its MSB-first order when it is spread over several channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LowBitsConcealer {
    bits: usize,
}

impl LowBitsConcealer {
    pub fn new(bits_per_channel: usize) -> Self {
        Self {
            bits: bits_per_channel,
        }
    }

    pub fn bits(&self) -> usize {
        self.bits
    }

    fn mask(&self) -> u8 {
        ((1_u16 << self.bits) - 1) as u8
    }

    /// clears the low bits of `color` and puts `bits` there, upper bits stay as they are
    #[inline(always)]
    pub fn hide(&self, color: &mut u8, bits: &[bool]) {
        let value = bits
            .iter()
            .take(self.bits)
            .fold(0_u8, |acc, bit| (acc << 1) | u8::from(*bit));
        *color = (*color & !self.mask()) | value;
    }

    /// the low bits of `color`, most significant first
    #[inline(always)]
    pub fn unveil(&self, color: u8) -> impl Iterator<Item = bool> {
        (0..self.bits).rev().map(move |i| (color >> i) & 1 == 1)
    }
}

/// Factory for decoder and encoder
pub struct LsbCodec;

impl LsbCodec {
    /// builds a LSB Image Decoder that implements Read
    pub fn decoder<'i>(input: &'i RgbaImage, opts: &CodecOptions) -> Box<dyn Read + 'i> {
        Box::new(LsbDecoder::new(input, opts))
    }

    /// builds a LSB Image Encoder that implements Write
    ///
    /// every single `write` either stores the whole buffer or fails with
    /// `WriteZero` without touching a pixel
    pub fn encoder<'i>(carrier: &'i mut RgbaImage, opts: &CodecOptions) -> Box<dyn Write + 'i> {
        Box::new(LsbEncoder::new(carrier, opts))
    }
}
