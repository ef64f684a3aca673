//! # MEOW Core API
//!
//! A MEOW container is a regular PNG image that carries a JSON metadata record in
//! the low bits of its color channels. The record is zlib compressed and framed by
//! a fixed header:
//!
//! ```text
//! | MEOW_STEG_V1 | u32 LE payload length | zlib(JSON) |
//! ```
//!
//! The bits are spread over the R, G and B channels of consecutive pixels in
//! row-major order, 2 bits per channel by default. Alpha is never touched.
//!
//! # Usage Examples
//!
//! ## Embed and extract a record in memory
//!
//! ```rust
//! use image::RgbaImage;
//! use meow_core::{CodecOptions, MetadataRecord};
//! use serde_json::json;
//!
//! let grid = RgbaImage::new(100, 100);
//! let record = MetadataRecord::new()
//!     .with("version", 2)
//!     .with("features", json!({ "brightness": 100 }));
//!
//! let container = meow_core::embed(&grid, &record, &CodecOptions::default())
//!     .expect("Failed to embed the record");
//! let unveiled = meow_core::extract(&container, &CodecOptions::default())
//!     .expect("Failed to extract the record");
//!
//! assert_eq!(unveiled, record);
//! ```
//!
//! ## Turn an image file into a MEOW container
//!
//! ```rust
//! use image::RgbaImage;
//! use tempfile::tempdir;
//!
//! let temp_dir = tempdir().expect("Failed to create temporary directory");
//! let plain = temp_dir.path().join("kitten.png");
//! RgbaImage::new(64, 64).save(&plain).expect("Failed to write carrier image");
//!
//! meow_core::api::encode::prepare()
//!     .with_image(&plain)
//!     .with_hints_from_file_name()
//!     .with_output(temp_dir.path().join("kitten.meow"))
//!     .execute()
//!     .expect("Failed to create the container");
//!
//! let record = meow_core::api::decode::prepare()
//!     .from_container_file(temp_dir.path().join("kitten.meow"))
//!     .execute()
//!     .expect("Failed to read the container");
//! assert_eq!(record.get("format").unwrap(), "Steganographic MEOW v1.0");
//! ```

#![warn(clippy::redundant_else)]

pub mod analysis;
pub mod api;
pub mod bit_packer;
pub mod capacity;
pub mod codec;
pub mod commands;
pub mod container;
pub mod error;
pub mod media;
pub mod metadata;
pub mod payload;
pub mod result;

pub use crate::codec::{embed, embed_in_place, extract};
pub use crate::error::MeowError;
pub use crate::media::{CodecOptions, ColorChannel, Media, Persist};
pub use crate::metadata::MetadataRecord;
pub use crate::result::Result;
