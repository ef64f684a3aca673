use clap::Parser;
use log::error;
use std::process::ExitCode;

use meow_core::{CodecOptions, MeowError};

mod cli;
mod commands;

use cli::{CliArgs, Commands};

pub type CliResult<T> = std::result::Result<T, MeowError>;

fn main() -> ExitCode {
    env_logger::init();

    let args = CliArgs::parse();
    let options = CodecOptions::default().with_bits_per_channel(args.bits_per_channel);
    let input = args.command.input().to_path_buf();

    let result = match args.command {
        Commands::Encode(args) => args.run(options),
        Commands::Decode(args) => args.run(options),
        Commands::DecodeRaw(args) => args.run(options),
        Commands::Inspect(args) => args.run(options),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:?}");
            eprintln!("Error: {}: {e}", input.display());
            ExitCode::FAILURE
        }
    }
}
