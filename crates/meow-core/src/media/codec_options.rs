use crate::{MeowError, Result};

/// bits per color channel used when nothing else is configured
pub const DEFAULT_BITS_PER_CHANNEL: u8 = 2;

/// The scan order shared by the embedder and the extractor.
///
/// Pixels are always visited row-major, starting at (0, 0). Within a pixel only the
/// listed color channels are visited, in the listed order. The alpha channel cannot
/// be listed, so transparency is never touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecOptions {
    /// How many of the least significant bits of each color channel carry data.
    /// Must divide 8, so one byte always spans a whole number of channels.
    ///
    /// Note this number influences the capacity directly and bounds the visual
    /// change of a channel to `2^bits_per_channel - 1`.
    pub bits_per_channel: u8,

    /// color channels of a pixel that carry data, in scan order
    pub channels: Vec<ColorChannel>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Ord, PartialOrd)]
pub enum ColorChannel {
    Red,
    Green,
    Blue,
}

impl ColorChannel {
    /// index of the channel inside an RGBA pixel
    pub fn index(self) -> usize {
        match self {
            ColorChannel::Red => 0,
            ColorChannel::Green => 1,
            ColorChannel::Blue => 2,
        }
    }
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            bits_per_channel: DEFAULT_BITS_PER_CHANNEL,
            channels: vec![ColorChannel::Red, ColorChannel::Green, ColorChannel::Blue],
        }
    }
}

impl CodecOptions {
    pub fn with_bits_per_channel(mut self, bits_per_channel: u8) -> Self {
        self.bits_per_channel = bits_per_channel;
        self
    }

    pub fn with_channels(mut self, channels: Vec<ColorChannel>) -> Self {
        self.channels = channels;
        self
    }

    pub fn bits_per_channel(&self) -> usize {
        self.bits_per_channel as usize
    }

    pub fn channels_used(&self) -> usize {
        self.channels.len()
    }

    /// number of color channels one byte is spread over
    pub fn channels_per_byte(&self) -> usize {
        8 / self.bits_per_channel()
    }

    pub fn validate(&self) -> Result<()> {
        if !matches!(self.bits_per_channel, 1 | 2 | 4 | 8) {
            return Err(MeowError::InvalidBitsPerChannel(self.bits_per_channel));
        }

        let mut seen = self.channels.clone();
        seen.sort();
        seen.dedup();
        if seen.is_empty() || seen.len() != self.channels.len() {
            return Err(MeowError::InvalidChannelOrder);
        }

        Ok(())
    }
}
