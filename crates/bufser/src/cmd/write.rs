use std::path::Path;

use bufser_channel::{ChannelConfig, ChannelWriter, Encode};
use tracing::info;

use crate::cmd::WriteArgs;
use crate::exit::{channel_error, CliResult, SUCCESS};
use crate::output::{print_summary, OutputFormat, WriteSummary};
use crate::sample::{sample_records, Sample};

pub fn run(args: WriteArgs, format: OutputFormat) -> CliResult<i32> {
    let records = sample_records();
    let summary = write_records(&args.path, &records, args.capacity)?;
    print_summary(&summary, format);
    Ok(SUCCESS)
}

pub fn write_records<'a>(
    path: &'a Path,
    records: &[Sample],
    capacity: usize,
) -> CliResult<WriteSummary<'a>> {
    let mut writer = ChannelWriter::create(path, ChannelConfig::with_capacity(capacity))
        .map_err(|err| channel_error("open failed", err))?;
    records
        .encode(&mut writer)
        .map_err(|err| channel_error("encode failed", err))?;
    let stats = writer
        .close()
        .map_err(|err| channel_error("close failed", err))?;

    info!(
        ?path,
        records = records.len(),
        bytes = stats.bytes_transferred,
        "wrote records"
    );

    Ok(WriteSummary {
        path,
        records: records.len(),
        capacity,
        bytes: stats.bytes_transferred,
        store_writes: stats.store_writes,
    })
}
