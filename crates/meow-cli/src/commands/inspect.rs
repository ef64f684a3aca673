use std::path::PathBuf;

use clap::Args;
use meow_core::CodecOptions;

use crate::CliResult;

/// Shows the capacity of an image and whether it carries a MEOW container
#[derive(Args, Debug)]
pub struct InspectArgs {
    #[arg(short = 'i', long = "in", value_name = "image file", required = true)]
    pub image: PathBuf,
}

impl InspectArgs {
    pub fn run(self, options: CodecOptions) -> CliResult<()> {
        let report = meow_core::commands::inspect(&self.image, options)?;
        println!("{report}");

        Ok(())
    }
}
