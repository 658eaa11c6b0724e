//! Report file output
//!
//! Each record becomes one line: `<category message>: <name> <id>`.

use crate::app::reporter::{Report, ReportRecord};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Format a single report line (without newline)
pub fn format_record(record: &ReportRecord) -> String {
    format!("{}: {} {}", record.category, record.name, record.id)
}

/// Write every record of `report` to `writer`, highest risk first
pub fn write_report<W: Write>(writer: W, report: &Report) -> io::Result<()> {
    let mut writer = BufWriter::new(writer);
    for record in report.iter() {
        writeln!(writer, "{}", format_record(record))?;
    }
    writer.flush()
}

/// Save `report` to `path`
///
/// The report is written to a temporary file next to `path` and moved into
/// place only once fully written, so a failed run never leaves partial output.
pub fn save_report(path: impl AsRef<Path>, report: &Report) -> io::Result<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    write_report(tmp.as_file_mut(), report)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;

    tracing::debug!(path = %path.display(), records = report.len(), "report saved");
    Ok(())
}
