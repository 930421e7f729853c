use std::io::{Read, Write};
use std::path::Path;

use crate::error::BacktestError;
use crate::model::WindowResult;

pub const RESULT_COLUMNS: [&str; 3] = ["ticker", "start_idx", "mae"];

/// Writes the result table, creating parent directories as needed.
pub fn write_results(path: &Path, results: &[WindowResult]) -> Result<(), BacktestError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(path)?;
    write_results_to(file, results)
}

/// Header is always written, even for an empty table.
pub fn write_results_to<W: Write>(writer: W, results: &[WindowResult]) -> Result<(), BacktestError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    writer.write_record(RESULT_COLUMNS)?;
    for row in results {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn read_results(path: &Path) -> Result<Vec<WindowResult>, BacktestError> {
    let file = std::fs::File::open(path)?;
    read_results_from(file)
}

pub fn read_results_from<R: Read>(reader: R) -> Result<Vec<WindowResult>, BacktestError> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers = reader.headers()?.clone();
    for col in RESULT_COLUMNS {
        if !headers.iter().any(|h| h == col) {
            return Err(BacktestError::Data(format!(
                "result table is missing column '{}'",
                col
            )));
        }
    }
    let mut out = Vec::new();
    for row in reader.deserialize::<WindowResult>() {
        out.push(row?);
    }
    Ok(out)
}
