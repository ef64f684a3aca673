use log::info;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::capacity::capacity_of;
use crate::{CodecOptions, Media, MeowError, MetadataRecord, Result};

/// hides the metadata in `image` and returns the container path
pub fn encode(
    image: &Path,
    output: Option<&Path>,
    annotations_file: Option<&Path>,
    analyze: bool,
    hints_from_file_name: bool,
    options: CodecOptions,
) -> Result<PathBuf> {
    crate::api::encode::prepare()
        .with_options(options)
        .with_image(image)
        .use_output(output)
        .use_annotations_file(annotations_file)
        .use_analysis(analyze)
        .use_hints_from_file_name(hints_from_file_name)
        .execute()
}

/// the embedded record, `None` for images that are no MEOW container
pub fn decode(
    container: &Path,
    output_file: Option<&Path>,
    options: CodecOptions,
) -> Result<Option<MetadataRecord>> {
    let decoded = crate::api::decode::prepare()
        .with_options(options)
        .from_container_file(container)
        .use_output_file(output_file)
        .execute();

    match decoded {
        Ok(record) => Ok(Some(record)),
        Err(e) if e.is_plain_image() => {
            info!("{container:?} carries no MEOW container");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// dumps the raw compressed payload, no JSON interpretation is happening
pub fn decode_raw(container: &Path, destination_file: &Path, options: CodecOptions) -> Result<()> {
    crate::api::decode::prepare()
        .with_options(options)
        .from_container_file(container)
        .into_output_file(destination_file)
        .execute_raw()
        .map(|_| ())
}

/// what an image offers and carries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerReport {
    pub width: u32,
    pub height: u32,
    pub bits_per_channel: u8,
    /// `None` if the image cannot even hold the header
    pub capacity: Option<usize>,
    /// `None` for plain images
    pub payload_len: Option<usize>,
}

impl fmt::Display for ContainerReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "dimensions:       {}x{}", self.width, self.height)?;
        writeln!(f, "bits per channel: {}", self.bits_per_channel)?;
        match self.capacity {
            Some(capacity) => writeln!(f, "capacity:         {capacity} bytes")?,
            None => writeln!(f, "capacity:         too small for a container")?,
        }
        match self.payload_len {
            Some(len) => write!(f, "container:        yes, {len} bytes of compressed metadata"),
            None => write!(f, "container:        no"),
        }
    }
}

pub fn inspect(image: &Path, options: CodecOptions) -> Result<ContainerReport> {
    options.validate()?;
    let media = Media::from_file(image)?;
    let (width, height) = media.dimensions();

    let capacity = match capacity_of(media.image(), &options) {
        Ok(capacity) => Some(capacity),
        Err(MeowError::ImageTooSmall(_)) => None,
        Err(e) => return Err(e),
    };
    let payload_len = match media.container_header(&options) {
        Ok(header) => Some(header.payload_len()),
        Err(e) if e.is_plain_image() => None,
        Err(e) => return Err(e),
    };

    Ok(ContainerReport {
        width,
        height,
        bits_per_channel: options.bits_per_channel,
        capacity,
        payload_len,
    })
}
