//! Embedding and extraction of MEOW containers on in-memory images.
//!
//! Everything here is a pure transform of an `RgbaImage`, no I/O is involved.
//! Encoding is all-or-nothing: capacity is checked before the first pixel changes.

use image::RgbaImage;
use log::{debug, error};
use std::io::{ErrorKind, Read, Write};

use crate::capacity::{self, bit_budget};
use crate::container::{self, ContainerHeader, HEADER_SIZE};
use crate::media::image::LsbCodec;
use crate::{payload, CodecOptions, MeowError, MetadataRecord, Result};

/// embeds the record into a copy of `grid`
pub fn embed(grid: &RgbaImage, record: &MetadataRecord, opts: &CodecOptions) -> Result<RgbaImage> {
    let mut carrier = grid.clone();
    embed_in_place(&mut carrier, record, opts)?;

    Ok(carrier)
}

/// embeds the record into `grid`, on failure `grid` is left as it was
pub fn embed_in_place(
    grid: &mut RgbaImage,
    record: &MetadataRecord,
    opts: &CodecOptions,
) -> Result<()> {
    let payload = payload::serialize(record)?;
    embed_payload(grid, &payload, opts)
}

/// frames an already compressed payload and hides it in the image
pub fn embed_payload(grid: &mut RgbaImage, payload: &[u8], opts: &CodecOptions) -> Result<()> {
    opts.validate()?;
    let capacity = capacity::capacity_of(grid, opts)?;
    capacity::validate(payload.len(), capacity)?;

    let frame = container::frame(payload)?;
    debug!(
        "embedding {} bytes ({} header + {} payload) at {} bits per channel",
        frame.len(),
        HEADER_SIZE,
        payload.len(),
        opts.bits_per_channel
    );

    write_frame(&mut LsbCodec::encoder(grid, opts), &frame)
}

/// the encoder refuses a frame it cannot hold completely, before touching a pixel
fn write_frame(encoder: &mut dyn Write, frame: &[u8]) -> Result<()> {
    encoder.write_all(frame).map_err(|e| match e.kind() {
        ErrorKind::WriteZero => MeowError::InsufficientCapacity,
        _ => {
            error!("Error encoding image: {e}, kind {}", e.kind());
            MeowError::ImageEncodingError
        }
    })
}

/// recovers the record from the image
///
/// plain images fail with [`MeowError::NotAMeowContainer`]
pub fn extract(grid: &RgbaImage, opts: &CodecOptions) -> Result<MetadataRecord> {
    payload::deserialize(&extract_payload(grid, opts)?)
}

/// reads only the container header
pub fn read_header(grid: &RgbaImage, opts: &CodecOptions) -> Result<ContainerHeader> {
    opts.validate()?;
    let mut decoder = LsbCodec::decoder(grid, opts);

    ContainerHeader::read_from(&mut decoder)
}

/// recovers the still compressed payload, reading exactly as far as the header says
pub fn extract_payload(grid: &RgbaImage, opts: &CodecOptions) -> Result<Vec<u8>> {
    opts.validate()?;
    let mut decoder = LsbCodec::decoder(grid, opts);
    let header = ContainerHeader::read_from(&mut decoder)?;

    let (width, height) = grid.dimensions();
    let budget_bytes =
        (bit_budget(width, height, opts.channels_used(), opts.bits_per_channel()) / 8) as usize;
    let available = budget_bytes.saturating_sub(HEADER_SIZE);
    debug!(
        "container declares {} payload bytes, image holds at most {available}",
        header.payload_len()
    );
    if header.payload_len() > available {
        return Err(MeowError::TruncatedBitstream);
    }

    let mut payload = vec![0; header.payload_len()];
    decoder.read_exact(&mut payload).map_err(|e| match e.kind() {
        ErrorKind::UnexpectedEof => MeowError::TruncatedBitstream,
        _ => MeowError::ReadError { source: e },
    })?;

    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::MARKER;
    use crate::test_utils::{prepare_noise_image, sample_record};

    #[test]
    fn should_embed_and_extract_a_record() {
        let grid = prepare_noise_image(32, 32, 9);
        let record = sample_record();

        let carrier = embed(&grid, &record, &CodecOptions::default()).unwrap();

        assert_eq!(extract(&carrier, &CodecOptions::default()).unwrap(), record);
    }

    #[test]
    fn should_start_the_scan_with_the_marker() {
        let mut grid = RgbaImage::new(20, 20);
        embed_payload(&mut grid, b"x", &CodecOptions::default()).unwrap();

        let mut marker = [0; 12];
        LsbCodec::decoder(&grid, &CodecOptions::default())
            .read_exact(&mut marker)
            .unwrap();
        assert_eq!(&marker, MARKER);
        assert_eq!(
            read_header(&grid, &CodecOptions::default())
                .unwrap()
                .payload_len(),
            1
        );
    }

    #[test]
    fn should_work_with_every_supported_bit_depth() {
        let grid = prepare_noise_image(24, 24, 5);
        let record = sample_record();

        for bits in [1, 2, 4, 8] {
            let opts = CodecOptions::default().with_bits_per_channel(bits);
            let carrier = embed(&grid, &record, &opts).unwrap();

            assert_eq!(extract(&carrier, &opts).unwrap(), record, "{bits} bits");
        }
    }

    #[test]
    fn should_not_find_a_container_with_other_bit_depth() {
        let grid = prepare_noise_image(24, 24, 5);
        let carrier = embed(&grid, &sample_record(), &CodecOptions::default()).unwrap();

        let other = CodecOptions::default().with_bits_per_channel(1);
        assert!(matches!(
            extract(&carrier, &other),
            Err(MeowError::NotAMeowContainer)
        ));
    }

    #[test]
    fn should_reject_invalid_options_before_touching_pixels() {
        let original = prepare_noise_image(8, 8, 1);
        let mut grid = original.clone();
        let opts = CodecOptions::default().with_bits_per_channel(3);

        assert!(matches!(
            embed_payload(&mut grid, b"x", &opts),
            Err(MeowError::InvalidBitsPerChannel(3))
        ));
        assert_eq!(grid, original);
    }

    #[test]
    fn should_fail_fast_on_lengths_beyond_the_image() {
        let mut grid = RgbaImage::new(20, 20);
        // a header that claims more data than 20x20 can ever hold
        let header = ContainerHeader::for_payload(&[0; 5000]).unwrap();
        header
            .write_to(&mut LsbCodec::encoder(&mut grid, &CodecOptions::default()))
            .unwrap();

        assert!(matches!(
            extract_payload(&grid, &CodecOptions::default()),
            Err(MeowError::TruncatedBitstream)
        ));
    }

    #[test]
    fn should_report_frames_the_encoder_cannot_hold() {
        let original = prepare_noise_image(4, 4, 2);
        let mut grid = original.clone();
        // 4x4 holds 12 bytes at 2 bits per channel, the frame needs 17
        let frame = container::frame(b"x").unwrap();

        assert!(matches!(
            write_frame(
                &mut LsbCodec::encoder(&mut grid, &CodecOptions::default()),
                &frame
            ),
            Err(MeowError::InsufficientCapacity)
        ));
        assert_eq!(grid, original);
    }

    #[test]
    fn should_fill_a_100x100_image_to_the_last_byte() {
        let original = prepare_noise_image(100, 100, 8);
        let opts = CodecOptions::default();

        let mut grid = original.clone();
        let exact = vec![0xa5; 7484];
        embed_payload(&mut grid, &exact, &opts).unwrap();
        assert_eq!(extract_payload(&grid, &opts).unwrap(), exact);

        let mut grid = original.clone();
        assert!(matches!(
            embed_payload(&mut grid, &[0xa5; 7485], &opts),
            Err(MeowError::PayloadTooLarge {
                needed: 7485,
                capacity: 7484
            })
        ));
        assert_eq!(grid, original);
    }

    #[test]
    fn should_report_corrupt_payloads() {
        let mut grid = RgbaImage::new(20, 20);
        embed_payload(&mut grid, b"no zlib in here", &CodecOptions::default()).unwrap();

        assert!(matches!(
            extract(&grid, &CodecOptions::default()),
            Err(MeowError::CorruptPayload(_))
        ));
    }
}
