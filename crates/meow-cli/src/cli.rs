use clap::{Parser, Subcommand};
use std::path::Path;

use crate::commands::*;
use meow_core::media::DEFAULT_BITS_PER_CHANNEL;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct CliArgs {
    /// Number of low bits per color channel that carry data, one of 1, 2, 4 or 8
    #[arg(
        long = "bits-per-channel",
        global = true,
        value_parser = clap::value_parser!(u8).range(1..=8),
        default_value_t = DEFAULT_BITS_PER_CHANNEL
    )]
    pub bits_per_channel: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Encode(encode::EncodeArgs),
    Decode(decode::DecodeArgs),
    DecodeRaw(decode_raw::DecodeRawArgs),
    Inspect(inspect::InspectArgs),
}

impl Commands {
    /// the image the command works on
    pub fn input(&self) -> &Path {
        match self {
            Commands::Encode(args) => &args.image,
            Commands::Decode(args) => &args.container,
            Commands::DecodeRaw(args) => &args.container,
            Commands::Inspect(args) => &args.image,
        }
    }
}
