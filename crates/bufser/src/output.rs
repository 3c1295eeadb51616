use std::io::IsTerminal;
use std::path::Path;

use bufser_channel::ChannelStats;
use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

use crate::sample::Sample;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
pub struct WriteSummary<'a> {
    pub path: &'a Path,
    pub records: usize,
    pub capacity: usize,
    pub bytes: u64,
    pub store_writes: u64,
}

#[derive(Serialize)]
pub struct VerifyRow {
    pub read_capacity: usize,
    pub ok: bool,
    pub store_reads: u64,
    pub error: Option<String>,
}

#[derive(Serialize)]
struct RecordsOutput<'a> {
    records: &'a [Sample],
    store_reads: u64,
}

#[derive(Serialize)]
struct VerifyOutput<'a> {
    write_capacity: usize,
    passed: usize,
    failed: usize,
    results: &'a [VerifyRow],
}

pub fn print_summary(summary: &WriteSummary<'_>, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(summary),
        OutputFormat::Table => {
            let mut table = new_table(vec!["PATH", "RECORDS", "CAPACITY", "BYTES", "STORE WRITES"]);
            table.add_row(vec![
                summary.path.display().to_string(),
                summary.records.to_string(),
                summary.capacity.to_string(),
                summary.bytes.to_string(),
                summary.store_writes.to_string(),
            ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "wrote {} records to {} ({} bytes, capacity={}, store_writes={})",
                summary.records,
                summary.path.display(),
                summary.bytes,
                summary.capacity,
                summary.store_writes
            );
        }
    }
}

pub fn print_records(records: &[Sample], stats: ChannelStats, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&RecordsOutput {
            records,
            store_reads: stats.store_reads,
        }),
        OutputFormat::Table => {
            let mut table = new_table(vec!["#", "NAME", "VALUES", "SCALE", "TAG"]);
            for (index, record) in records.iter().enumerate() {
                table.add_row(vec![
                    index.to_string(),
                    record.name.clone(),
                    format!("{:?}", record.values),
                    record.scale.to_string(),
                    record.tag.to_string(),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for (index, record) in records.iter().enumerate() {
                println!(
                    "[{index}] name={:?} values={:?} scale={} tag={}",
                    record.name, record.values, record.scale, record.tag
                );
            }
        }
    }
}

pub fn print_verify(write_capacity: usize, rows: &[VerifyRow], format: OutputFormat) {
    let passed = rows.iter().filter(|row| row.ok).count();
    let failed = rows.len() - passed;

    match format {
        OutputFormat::Json => print_json(&VerifyOutput {
            write_capacity,
            passed,
            failed,
            results: rows,
        }),
        OutputFormat::Table => {
            let mut table = new_table(vec!["READ CAPACITY", "RESULT", "STORE READS", "ERROR"]);
            for row in rows {
                table.add_row(vec![
                    row.read_capacity.to_string(),
                    if row.ok { "ok" } else { "FAILED" }.to_string(),
                    row.store_reads.to_string(),
                    row.error.clone().unwrap_or_default(),
                ]);
            }
            println!("{table}");
            println!("write capacity {write_capacity}: {passed} passed, {failed} failed");
        }
        OutputFormat::Pretty => {
            for row in rows.iter().filter(|row| !row.ok) {
                println!(
                    "read capacity {} failed: {}",
                    row.read_capacity,
                    row.error.as_deref().unwrap_or("decoded records differ")
                );
            }
            println!("write capacity {write_capacity}: {passed} passed, {failed} failed");
        }
    }
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn print_json<T: Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
    );
}
