use std::path::PathBuf;

use clap::Args;
use meow_core::CodecOptions;

use crate::CliResult;

/// Unveils the metadata of a MEOW container
#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Container image
    #[arg(short = 'i', long = "in", value_name = "container file", required = true)]
    pub container: PathBuf,

    /// Metadata is written to this file as JSON instead of being printed
    #[arg(short = 'o', long = "out", value_name = "json file")]
    pub output_file: Option<PathBuf>,
}

impl DecodeArgs {
    pub fn run(self, options: CodecOptions) -> CliResult<()> {
        let record = meow_core::commands::decode(
            &self.container,
            self.output_file.as_deref(),
            options,
        )?;

        match (record, self.output_file) {
            (None, _) => println!(
                "{} is a plain image without MEOW metadata",
                self.container.display()
            ),
            (Some(_), Some(output_file)) => {
                println!("Metadata written to {}", output_file.display())
            }
            (Some(record), None) => println!("{}", record.to_pretty_json()?),
        }

        Ok(())
    }
}
