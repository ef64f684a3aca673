use criterion::{criterion_group, criterion_main, Criterion};
use image::{ImageBuffer, Rgba, RgbaImage};
use std::io::Write;

use meow_core::analysis::build_metadata_record;
use meow_core::media::image::LsbCodec;
use meow_core::{embed_in_place, CodecOptions};

fn carrier_image() -> RgbaImage {
    ImageBuffer::from_fn(512, 512, |x, y| {
        Rgba([(x ^ y) as u8, (x * 3) as u8, (y * 7) as u8, 255])
    })
}

pub fn image_embedding(c: &mut Criterion) {
    c.bench_function("Image LSB Encoding", |b| {
        let mut plain_image = carrier_image();
        let secret = [0x5a_u8; 4096];

        b.iter(|| {
            LsbCodec::encoder(&mut plain_image, &CodecOptions::default())
                .write_all(&secret[..])
                .expect("Cannot write secret bytes");
        })
    });

    c.bench_function("Metadata Embedding", |b| {
        let mut plain_image = carrier_image();
        let record = build_metadata_record(&plain_image, None);

        b.iter(|| {
            embed_in_place(&mut plain_image, &record, &CodecOptions::default())
                .expect("Cannot embed metadata record");
        })
    });
}

criterion_group!(benches, image_embedding);
criterion_main!(benches);
