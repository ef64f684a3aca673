pub mod decoder;
pub mod encoder;
mod iterators;
pub mod lsb_codec;

pub use lsb_codec::{LowBitsConcealer, LsbCodec};
