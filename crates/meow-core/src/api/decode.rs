use log::error;
use std::fs;
use std::path::{Path, PathBuf};

use crate::{CodecOptions, Media, MeowError, MetadataRecord, Result};

pub fn prepare() -> DecodeApi {
    DecodeApi::default()
}

#[derive(Default, Debug)]
pub struct DecodeApi {
    container: Option<PathBuf>,
    output_file: Option<PathBuf>,
    options: CodecOptions,
}

impl DecodeApi {
    /// Use the given codec options, they have to match the ones used for encoding
    pub fn with_options(mut self, options: CodecOptions) -> Self {
        self.options = options;
        self
    }

    /// This is the container image that carries the metadata
    pub fn from_container_file(mut self, container: impl AsRef<Path>) -> Self {
        self.container = Some(container.as_ref().to_path_buf());
        self
    }

    /// The unveiled data is written to this file as well
    pub fn into_output_file(mut self, output_file: impl AsRef<Path>) -> Self {
        self.output_file = Some(output_file.as_ref().to_path_buf());
        self
    }

    pub fn use_output_file<A: AsRef<Path>>(mut self, output_file: Option<A>) -> Self {
        self.output_file = output_file.map(|f| f.as_ref().to_path_buf());
        self
    }

    /// Execute the decoding, an output file receives the record as pretty JSON
    pub fn execute(self) -> Result<MetadataRecord> {
        let media = self.load()?;
        let record = media.unveil_record(&self.options)?;

        if let Some(output_file) = self.output_file.as_deref() {
            write_file(output_file, record.to_pretty_json()?.as_bytes())?;
        }

        Ok(record)
    }

    /// Execute the decoding but stop before decompression,
    /// an output file receives the raw zlib stream
    pub fn execute_raw(self) -> Result<Vec<u8>> {
        let media = self.load()?;
        let payload = media.unveil_payload(&self.options)?;

        if let Some(output_file) = self.output_file.as_deref() {
            write_file(output_file, &payload)?;
        }

        Ok(payload)
    }

    fn load(&self) -> Result<Media> {
        let Some(container) = self.container.as_deref() else {
            return Err(MeowError::CarrierNotSet);
        };

        Media::from_file(container)
    }
}

fn write_file(file: &Path, data: &[u8]) -> Result<()> {
    fs::write(file, data).map_err(|source| {
        error!("Error writing {file:?}: {source}");
        MeowError::WriteError { source }
    })
}
