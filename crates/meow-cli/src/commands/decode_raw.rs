use std::path::PathBuf;

use clap::Args;
use meow_core::CodecOptions;

use crate::CliResult;

/// Dumps the compressed metadata of a MEOW container as is
#[derive(Args, Debug)]
pub struct DecodeRawArgs {
    /// Container image
    #[arg(short = 'i', long = "in", value_name = "container file", required = true)]
    pub container: PathBuf,

    /// Raw zlib stream will be stored in this file
    #[arg(short = 'o', long = "out", value_name = "output file", required = true)]
    pub output_file: PathBuf,
}

impl DecodeRawArgs {
    pub fn run(self, options: CodecOptions) -> CliResult<()> {
        meow_core::commands::decode_raw(&self.container, &self.output_file, options)
    }
}
