use clap::{Args, Subcommand};
use std::path::PathBuf;

use bufser_channel::DEFAULT_CAPACITY;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod read;
pub mod verify;
pub mod version;
pub mod write;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write the sample record set to a file.
    Write(WriteArgs),
    /// Decode the sample record set from a file and print it.
    Read(ReadArgs),
    /// Write the sample set once and decode it with every read capacity.
    Verify(VerifyArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Write(args) => write::run(args, format),
        Command::Read(args) => read::run(args, format),
        Command::Verify(args) => verify::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct WriteArgs {
    /// File to create or truncate.
    pub path: PathBuf,
    /// Buffer capacity in bytes (0 disables buffering).
    #[arg(long, short = 'c', default_value_t = DEFAULT_CAPACITY, env = "BUFSER_CAPACITY")]
    pub capacity: usize,
}

#[derive(Args, Debug)]
pub struct ReadArgs {
    /// File to decode.
    pub path: PathBuf,
    /// Buffer capacity in bytes (0 disables buffering).
    #[arg(long, short = 'c', default_value_t = DEFAULT_CAPACITY, env = "BUFSER_CAPACITY")]
    pub capacity: usize,
}

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Scratch file to write and re-read.
    pub path: PathBuf,
    /// Buffer capacity used for the single write pass.
    #[arg(long, default_value_t = 3)]
    pub write_capacity: usize,
    /// Read capacities 0..N are each tried once.
    #[arg(long, default_value_t = 100)]
    pub max_read_capacity: usize,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
