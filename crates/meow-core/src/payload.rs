//! Payload codec: JSON, then zlib at the best compression level.

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use log::debug;
use std::io::{Read, Write};

use crate::{MeowError, MetadataRecord, Result};

pub fn serialize(record: &MetadataRecord) -> Result<Vec<u8>> {
    let json = serde_json::to_vec(record).map_err(MeowError::MetadataSerialization)?;

    let mut encoder = ZlibEncoder::new(Vec::with_capacity(json.len()), Compression::best());
    encoder.write_all(&json)?;
    let compressed = encoder.finish()?;
    debug!(
        "metadata compressed from {} to {} bytes",
        json.len(),
        compressed.len()
    );

    Ok(compressed)
}

pub fn deserialize(payload: &[u8]) -> Result<MetadataRecord> {
    let mut json = Vec::new();
    ZlibDecoder::new(payload)
        .read_to_end(&mut json)
        .map_err(|e| MeowError::CorruptPayload(format!("cannot decompress: {e}")))?;

    serde_json::from_slice(&json)
        .map_err(|e| MeowError::CorruptPayload(format!("not a JSON object: {e}")))
}
