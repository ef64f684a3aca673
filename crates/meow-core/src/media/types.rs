use std::fs::File;
use std::io::{Seek, Write};
use std::path::Path;

pub use image::RgbaImage;
use image::{io::Reader as ImageReader, ImageFormat};
use log::{debug, error};

use super::Persist;
use crate::container::ContainerHeader;
use crate::error::MeowError;
use crate::result::Result;
use crate::{codec, CodecOptions, MetadataRecord};

/// file extensions a carrier or container image can be loaded from
pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["png", "meow", "jpg", "jpeg"];

/// a carrier image, always held as 8 bit RGBA
#[derive(Debug, Clone, PartialEq)]
pub struct Media {
    image: RgbaImage,
}

impl Media {
    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    /// loads an image file, `.meow` containers are PNG files under another name
    pub fn from_file(f: &Path) -> Result<Self> {
        let ext = f
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .ok_or(MeowError::UnsupportedMedia)?;
        if !SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
            return Err(MeowError::UnsupportedMedia);
        }

        let image = ImageReader::open(f)
            .and_then(|reader| reader.with_guessed_format())
            .map_err(|source| {
                error!("Error opening file {f:?}: {source}");
                MeowError::ReadError { source }
            })?
            .decode()
            .map_err(|e| {
                debug!("cannot decode {f:?}: {e}");
                MeowError::InvalidImageMedia
            })?
            .to_rgba8();

        Ok(Self { image })
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// embeds the record, the image stays untouched if it does not fit
    pub fn hide_record(&mut self, record: &MetadataRecord, opts: &CodecOptions) -> Result<&mut Self> {
        codec::embed_in_place(&mut self.image, record, opts)?;

        Ok(self)
    }

    pub fn unveil_record(&self, opts: &CodecOptions) -> Result<MetadataRecord> {
        codec::extract(&self.image, opts)
    }

    /// the still compressed payload, as it was stored behind the header
    pub fn unveil_payload(&self, opts: &CodecOptions) -> Result<Vec<u8>> {
        codec::extract_payload(&self.image, opts)
    }

    pub fn container_header(&self, opts: &CodecOptions) -> Result<ContainerHeader> {
        codec::read_header(&self.image, opts)
    }

    pub fn save_to_writer<W: Write + Seek>(&mut self, mut writer: W) -> Result<()> {
        self.image
            .write_to(&mut writer, ImageFormat::Png)
            .map_err(|e| {
                error!("Error saving image: {e}");
                MeowError::ImageEncodingError
            })
    }
}

impl Persist for Media {
    /// always writes PNG, whatever the extension says
    fn save_as(&mut self, file: &Path) -> Result<()> {
        let f = File::create(file).map_err(|e| {
            error!("Error creating file {file:?}: {e}");
            MeowError::WriteError { source: e }
        })?;
        self.save_to_writer(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{prepare_noise_image, sample_record};
    use std::io::Cursor;
    use tempfile::tempdir;

    #[test]
    fn should_reject_unknown_extensions() {
        assert!(matches!(
            Media::from_file(Path::new("tests/audio/song.wav")),
            Err(MeowError::UnsupportedMedia)
        ));
        assert!(matches!(
            Media::from_file(Path::new("no-extension")),
            Err(MeowError::UnsupportedMedia)
        ));
    }

    #[test]
    fn should_report_missing_files_as_read_error() {
        let dir = tempdir().unwrap();

        assert!(matches!(
            Media::from_file(&dir.path().join("missing.png")),
            Err(MeowError::ReadError { .. })
        ));
    }

    #[test]
    fn should_reject_files_that_are_no_images() {
        let dir = tempdir().unwrap();
        let fake = dir.path().join("fake.png");
        std::fs::write(&fake, b"this is plain text").unwrap();

        assert!(matches!(
            Media::from_file(&fake),
            Err(MeowError::InvalidImageMedia)
        ));
    }

    #[test]
    fn should_write_png_bytes() {
        let mut media = Media::from_image(prepare_noise_image(6, 6, 2));
        let mut buf = Cursor::new(Vec::new());
        media.save_to_writer(&mut buf).unwrap();

        assert_eq!(&buf.get_ref()[..4], b"\x89PNG");
    }

    #[test]
    fn should_keep_the_record_through_a_meow_file() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("carrier.meow");
        let record = sample_record();

        let mut media = Media::from_image(prepare_noise_image(40, 30, 4));
        media
            .hide_record(&record, &CodecOptions::default())
            .unwrap()
            .save_as(&target)
            .unwrap();

        let reloaded = Media::from_file(&target).unwrap();
        assert_eq!(reloaded.dimensions(), (40, 30));
        assert_eq!(
            reloaded.unveil_record(&CodecOptions::default()).unwrap(),
            record
        );
    }
}
