use tracing::{debug, warn};

use crate::cmd::read::read_records;
use crate::cmd::write::write_records;
use crate::cmd::VerifyArgs;
use crate::exit::{CliResult, DATA_INVALID, SUCCESS};
use crate::output::{print_verify, OutputFormat, VerifyRow};
use crate::sample::sample_records;

pub fn run(args: VerifyArgs, format: OutputFormat) -> CliResult<i32> {
    let expected = sample_records();
    write_records(&args.path, &expected, args.write_capacity)?;

    let rows: Vec<VerifyRow> = (0..args.max_read_capacity)
        .map(|read_capacity| match read_records(&args.path, read_capacity) {
            Ok((records, stats)) => {
                let ok = records == expected;
                if !ok {
                    warn!(read_capacity, "decoded records differ from the written set");
                }
                VerifyRow {
                    read_capacity,
                    ok,
                    store_reads: stats.store_reads,
                    error: None,
                }
            }
            Err(err) => {
                debug!(read_capacity, error = %err, "decode failed");
                VerifyRow {
                    read_capacity,
                    ok: false,
                    store_reads: 0,
                    error: Some(err.message),
                }
            }
        })
        .collect();

    print_verify(args.write_capacity, &rows, format);

    if rows.iter().all(|row| row.ok) {
        Ok(SUCCESS)
    } else {
        Ok(DATA_INVALID)
    }
}
