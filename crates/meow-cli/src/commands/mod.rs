pub mod decode;
pub mod decode_raw;
pub mod encode;
pub mod inspect;
