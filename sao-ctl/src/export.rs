use anyhow::{Context, Result};
use clap::ValueEnum;
use librsao::{SAOFile, SAORecord};
use log::warn;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DumpFormat {
    /// One row per trace point
    #[default]
    Csv,
    /// Every decoded record, all groups included
    Json,
}

#[derive(Debug, Serialize)]
struct TraceRow<'a> {
    record: usize,
    trace: &'a str,
    frequency_mhz: f64,
    height_km: f64,
}

/// Writes every trace point of `records` as CSV. Returns the number of rows.
pub fn write_traces_csv<W: Write>(records: &[SAORecord], writer: W) -> Result<usize> {
    let mut wtr = csv::Writer::from_writer(writer);
    let mut rows = 0;

    for (i, record) in records.iter().enumerate() {
        let traces = record.traces().into_iter().chain([record.profile()]);
        for trace in traces.filter(|t| !t.is_empty()) {
            if !trace.is_consistent() {
                warn!(
                    "record {} trace {}: {} frequencies vs {} heights, extra values dropped",
                    i,
                    trace.spec.name,
                    trace.frequencies.len(),
                    trace.heights.len()
                );
            }
            for (frequency_mhz, height_km) in trace.points() {
                wtr.serialize(TraceRow {
                    record: i,
                    trace: trace.spec.name,
                    frequency_mhz,
                    height_km,
                })?;
                rows += 1;
            }
        }
    }

    wtr.flush().context("Failed to flush CSV output")?;
    Ok(rows)
}

pub fn write_json<W: Write>(file: &SAOFile, mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, file).context("Failed to serialize records")?;
    writeln!(writer)?;
    Ok(())
}

pub fn write_dump<W: Write>(file: &SAOFile, format: DumpFormat, writer: W) -> Result<()> {
    match format {
        DumpFormat::Csv => write_traces_csv(file.records(), writer).map(|_| ()),
        DumpFormat::Json => write_json(file, writer),
    }
}

/// One line per record, as printed by `scan`.
pub fn summary_line(record: &SAORecord) -> String {
    let time = record
        .timestamp()
        .map(|ts| ts.to_string())
        .unwrap_or_else(|| "-".to_string());
    let station = record
        .settings()
        .and_then(|s| s.receiver_station().ok())
        .unwrap_or("-");
    let populated = record.groups().filter(|(_, g)| !g.is_absent()).count();

    format!(
        "{} station {} ({} groups, {} bytes)",
        time,
        station,
        populated,
        record.encoded_len()
    )
}
