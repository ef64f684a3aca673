use image::buffer::{Pixels, PixelsMut};
use image::Rgba;
use std::vec::IntoIter;

use crate::media::codec_options::ColorChannel;

/// Mutable access to the selected color channels, pixel by pixel in row-major order
pub(crate) struct ColorIterMut<'a> {
    pixels: PixelsMut<'a, Rgba<u8>>,
    channels: Vec<ColorChannel>,
    colors: IntoIter<&'a mut u8>,
}

impl<'a> ColorIterMut<'a> {
    pub fn from_pixels(pixels: PixelsMut<'a, Rgba<u8>>, channels: &[ColorChannel]) -> Self {
        Self {
            pixels,
            channels: channels.to_vec(),
            colors: Vec::new().into_iter(),
        }
    }
}

impl<'a> Iterator for ColorIterMut<'a> {
    type Item = &'a mut u8;

    fn next(&mut self) -> Option<Self::Item> {
        self.colors.next().or_else(|| {
            let Rgba([r, g, b, _alpha]) = self.pixels.next()?;
            let mut slots = [Some(r), Some(g), Some(b)];
            self.colors = self
                .channels
                .iter()
                .filter_map(|c| slots[c.index()].take())
                .collect::<Vec<_>>()
                .into_iter();
            self.colors.next()
        })
    }
}

/// Readonly access to the selected color channels, pixel by pixel in row-major order
pub(crate) struct ColorIter<'a> {
    pixels: Pixels<'a, Rgba<u8>>,
    channels: Vec<ColorChannel>,
    pixel: Option<&'a Rgba<u8>>,
    channel_idx: usize,
}

impl<'a> ColorIter<'a> {
    pub fn from_pixels(pixels: Pixels<'a, Rgba<u8>>, channels: &[ColorChannel]) -> Self {
        Self {
            pixels,
            channels: channels.to_vec(),
            pixel: None,
            channel_idx: 0,
        }
    }
}

impl<'a> Iterator for ColorIter<'a> {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pixel.is_none() || self.channel_idx == self.channels.len() {
            self.pixel = Some(self.pixels.next()?);
            self.channel_idx = 0;
        }
        let channel = self.channels.get(self.channel_idx)?;
        self.channel_idx += 1;

        self.pixel.map(|p| p.0[channel.index()])
    }
}
