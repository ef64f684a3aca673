use criterion::{criterion_group, criterion_main, Criterion};
use image::{ImageBuffer, Rgba, RgbaImage};
use std::io::Read;

use meow_core::analysis::build_metadata_record;
use meow_core::media::image::LsbCodec;
use meow_core::{embed, extract, CodecOptions};

fn container_image() -> RgbaImage {
    let plain: RgbaImage = ImageBuffer::from_fn(512, 512, |x, y| {
        Rgba([(x ^ y) as u8, (x * 3) as u8, (y * 7) as u8, 255])
    });
    let record = build_metadata_record(&plain, None);

    embed(&plain, &record, &CodecOptions::default()).expect("Cannot embed metadata record")
}

pub fn image_extraction(c: &mut Criterion) {
    c.bench_function("Image LSB Decoding", |b| {
        let img = container_image();
        let mut buf = [0; 4096];

        b.iter(|| {
            LsbCodec::decoder(&img, &CodecOptions::default())
                .read_exact(&mut buf)
                .expect("Failed to read 4096 bytes");
        })
    });

    c.bench_function("Metadata Extraction", |b| {
        let img = container_image();

        b.iter(|| extract(&img, &CodecOptions::default()).expect("Cannot extract metadata"))
    });
}

criterion_group!(benches, image_extraction);
criterion_main!(benches);
