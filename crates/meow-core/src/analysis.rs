//! Builds the default metadata record for an image.
//!
//! The codec treats the record as opaque, this module is only one producer of it.
//! All statistics are computed on the luma (ITU-R 601) of the color channels.

use image::{GrayImage, Luma, RgbaImage};
use serde_json::{json, Value};
use std::path::Path;

use crate::MetadataRecord;

pub const RECORD_VERSION: u32 = 1;
pub const RECORD_FORMAT: &str = "Steganographic MEOW v1.0";

/// attention points are the pixels above this percentile of the saliency map
const ATTENTION_PERCENTILE: f64 = 95.0;
const MAX_ATTENTION_POINTS: usize = 10;

const IMAGENET_MEAN_RGB: [f64; 3] = [0.485, 0.456, 0.406];
const IMAGENET_STD_RGB: [f64; 3] = [0.229, 0.224, 0.225];
const DEFAULT_INPUT_SIZE: [u32; 2] = [224, 224];

/// the full record that `encode` embeds when nothing else is given
pub fn build_metadata_record(
    image: &RgbaImage,
    annotations: Option<MetadataRecord>,
) -> MetadataRecord {
    let gray = luma_of(image);
    let annotations = annotations.unwrap_or_default();
    let model_hints = model_hints(&annotations);

    MetadataRecord::new()
        .with("version", RECORD_VERSION)
        .with("format", RECORD_FORMAT)
        .with("features", features(&gray))
        .with("attention_maps", attention_maps(&gray))
        .with("ai_annotations", annotations.into_value())
        .with("model_hints", model_hints)
        .with(
            "image_stats",
            json!({
                "width": image.width(),
                "height": image.height(),
                "mode": "RGBA",
            }),
        )
}

/// guesses object classes and preprocessing parameters from keywords in the file name
pub fn annotations_from_file_name(path: &Path) -> MetadataRecord {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    let mentions = |words: &[&str]| words.iter().any(|w| name.contains(w));

    let mut object_classes = vec!["background"];
    object_classes.extend(if mentions(&["cat", "kitten", "feline"]) {
        ["cat", "animal"]
    } else if mentions(&["dog", "puppy", "canine"]) {
        ["dog", "animal"]
    } else if mentions(&["person", "human", "face", "portrait"]) {
        ["person", "face"]
    } else if mentions(&["car", "vehicle", "auto"]) {
        ["vehicle", "car"]
    } else if mentions(&["house", "building", "architecture"]) {
        ["building", "architecture"]
    } else {
        ["object", "foreground"]
    });

    let mut preprocessing = json!({
        "mean_rgb": IMAGENET_MEAN_RGB,
        "std_rgb": IMAGENET_STD_RGB,
        "input_size": DEFAULT_INPUT_SIZE,
        "normalization": "imagenet",
        "channels_first": false,
        "dtype": "float32",
    });
    if mentions(&["medical", "xray", "scan"]) {
        preprocessing["mean_rgb"] = json!([0.5, 0.5, 0.5]);
        preprocessing["std_rgb"] = json!([0.5, 0.5, 0.5]);
        preprocessing["normalization"] = json!("medical");
    } else if mentions(&["satellite", "aerial", "geo"]) {
        preprocessing["input_size"] = json!([512, 512]);
        preprocessing["normalization"] = json!("satellite");
    }

    MetadataRecord::new()
        .with("object_classes", json!(object_classes))
        .with("preprocessing_params", preprocessing)
        .with(
            "bounding_boxes",
            json!([{
                "class": "region_of_interest",
                "bbox": [0.1, 0.1, 0.9, 0.9],
                "confidence": 0.8,
                "source": "auto_generated",
            }]),
        )
}

fn model_hints(annotations: &MetadataRecord) -> Value {
    let preprocessing = annotations.get("preprocessing_params");
    let input_size = preprocessing
        .and_then(|p| p.get("input_size"))
        .cloned()
        .unwrap_or_else(|| json!(DEFAULT_INPUT_SIZE));
    let normalization = preprocessing
        .and_then(|p| p.get("normalization"))
        .cloned()
        .unwrap_or_else(|| json!("imagenet"));

    json!({
        "optimal_input_size": input_size,
        "normalization": normalization,
        "color_space": "RGB",
    })
}

/// alpha does not count
fn luma_of(image: &RgbaImage) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b, _] = image.get_pixel(x, y).0;
        let l = (u32::from(r) * 299 + u32::from(g) * 587 + u32::from(b) * 114) / 1000;
        Luma([l as u8])
    })
}

fn features(gray: &GrayImage) -> Value {
    let dx = horizontal_gradient(gray);
    let dy = vertical_gradient(gray);
    let values: Vec<f64> = gray.pixels().map(|p| f64::from(p.0[0])).collect();
    let variance = variance(&values);

    json!({
        "edge_density": mean(&dx) + mean(&dy),
        "brightness": mean(&values),
        "contrast": variance.sqrt(),
        "complexity": variance,
    })
}

fn attention_maps(gray: &GrayImage) -> Value {
    let saliency = saliency_map(gray);
    let max = saliency.iter().copied().fold(0.0, f64::max);
    let points = match percentile(&saliency, ATTENTION_PERCENTILE) {
        Some(threshold) => attention_points(&saliency, gray.width() as usize, threshold),
        None => Vec::new(),
    };

    json!({
        "max_saliency": max,
        "mean_saliency": mean(&saliency),
        "attention_points": points,
    })
}

/// |I(x+1, y) - I(x, y)| row by row, `(width - 1) * height` values
fn horizontal_gradient(gray: &GrayImage) -> Vec<f64> {
    let (width, height) = gray.dimensions();
    let mut out = Vec::with_capacity((width.saturating_sub(1) * height) as usize);
    for y in 0..height {
        for x in 1..width {
            out.push(luma_delta(gray, (x - 1, y), (x, y)));
        }
    }
    out
}

/// |I(x, y + 1) - I(x, y)| row by row, `width * (height - 1)` values
fn vertical_gradient(gray: &GrayImage) -> Vec<f64> {
    let (width, height) = gray.dimensions();
    let mut out = Vec::with_capacity((width * height.saturating_sub(1)) as usize);
    for y in 1..height {
        for x in 0..width {
            out.push(luma_delta(gray, (x, y - 1), (x, y)));
        }
    }
    out
}

fn luma_delta(gray: &GrayImage, a: (u32, u32), b: (u32, u32)) -> f64 {
    let a = f64::from(gray.get_pixel(a.0, a.1).0[0]);
    let b = f64::from(gray.get_pixel(b.0, b.1).0[0]);
    (b - a).abs()
}

/// gradient magnitude per pixel, row-major
///
/// The last column reuses the gradient of the column before it, the last row
/// the one of the row above. Images with a single column or row have no
/// gradient in that direction.
fn saliency_map(gray: &GrayImage) -> Vec<f64> {
    let (width, height) = gray.dimensions();
    let dx = horizontal_gradient(gray);
    let dy = vertical_gradient(gray);
    let row_len = width.saturating_sub(1) as usize;

    let mut out = Vec::with_capacity((width * height) as usize);
    for y in 0..height as usize {
        for x in 0..width as usize {
            let gx = if row_len == 0 {
                0.0
            } else {
                dx[y * row_len + x.min(row_len - 1)]
            };
            let gy = if height < 2 {
                0.0
            } else {
                dy[y.min(height as usize - 2) * width as usize + x]
            };
            out.push((gx * gx + gy * gy).sqrt());
        }
    }
    out
}

/// `[x, y]` of the first saliency values above `threshold`, in scan order
fn attention_points(saliency: &[f64], width: usize, threshold: f64) -> Vec<[usize; 2]> {
    saliency
        .iter()
        .enumerate()
        .filter(|(_, s)| **s > threshold)
        .map(|(i, _)| [i % width, i / width])
        .take(MAX_ATTENTION_POINTS)
        .collect()
}

/// linear interpolation between the closest ranks
fn percentile(values: &[f64], p: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;

    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * (rank - lower as f64))
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// population variance
fn variance(values: &[f64]) -> f64 {
    let mean = mean(values);
    let squares: Vec<f64> = values.iter().map(|v| (v - mean).powi(2)).collect();
    self::mean(&squares)
}
