//! Builders over whole files, `prepare()` a job, configure it, then `execute()` it.

pub mod decode;
pub mod encode;

use std::path::{Path, PathBuf};

pub const CONTAINER_EXTENSION: &str = "meow";

/// where a container for `image` goes when no output was given: next to it,
/// with the `.meow` extension
pub fn default_output_path(image: &Path) -> PathBuf {
    image.with_extension(CONTAINER_EXTENSION)
}

/// an output path without any extension gets `.meow`
pub fn container_path(output: &Path) -> PathBuf {
    match output.extension() {
        Some(_) => output.to_path_buf(),
        None => output.with_extension(CONTAINER_EXTENSION),
    }
}
