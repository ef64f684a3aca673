use std::path::PathBuf;

use clap::Args;
use meow_core::CodecOptions;

use crate::CliResult;

/// Turns a PNG or JPEG image into a MEOW container
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Carrier image, used readonly
    #[arg(short = 'i', long = "in", value_name = "image file", required = true)]
    pub image: PathBuf,

    /// Container file to write, defaults to the image path with the .meow extension
    #[arg(short = 'o', long = "out", value_name = "container file")]
    pub output: Option<PathBuf>,

    /// JSON file with annotations stored under `ai_annotations`
    #[arg(short = 'a', long = "annotations", value_name = "annotations file")]
    pub annotations: Option<PathBuf>,

    /// Do not compute image features and attention maps
    #[arg(long)]
    pub no_analysis: bool,

    /// Derive object classes and preprocessing parameters from the file name
    #[arg(long)]
    pub hints_from_name: bool,
}

impl EncodeArgs {
    pub fn run(self, options: CodecOptions) -> CliResult<()> {
        let container = meow_core::commands::encode(
            &self.image,
            self.output.as_deref(),
            self.annotations.as_deref(),
            !self.no_analysis,
            self.hints_from_name,
            options,
        )?;
        println!("MEOW container written to {}", container.display());

        Ok(())
    }
}
