use std::path::Path;

use bufser_channel::{ChannelConfig, ChannelReader, ChannelStats, Decode};

use crate::cmd::ReadArgs;
use crate::exit::{channel_error, CliResult, SUCCESS};
use crate::output::{print_records, OutputFormat};
use crate::sample::Sample;

pub fn run(args: ReadArgs, format: OutputFormat) -> CliResult<i32> {
    let (records, stats) = read_records(&args.path, args.capacity)?;
    print_records(&records, stats, format);
    Ok(SUCCESS)
}

pub fn read_records(path: &Path, capacity: usize) -> CliResult<(Vec<Sample>, ChannelStats)> {
    let mut reader = ChannelReader::open(path, ChannelConfig::with_capacity(capacity))
        .map_err(|err| channel_error("open failed", err))?;
    let records =
        Vec::<Sample>::decode(&mut reader).map_err(|err| channel_error("decode failed", err))?;
    let stats = reader
        .close()
        .map_err(|err| channel_error("close failed", err))?;
    Ok((records, stats))
}
