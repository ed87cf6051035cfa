//! Row-to-text serialization of a result table.

use std::path::Path;

use anyhow::{Context, Result};

use crate::{io_utils, table::Table};

/// Write a table as delimited text to `path` (stdout when `None` or `-`).
/// Null cells serialize as empty fields.
pub fn write_csv(table: &Table, path: Option<&Path>, delimiter: u8) -> Result<()> {
    let mut writer = io_utils::open_csv_writer(path, delimiter)?;
    write_into(table, &mut writer)?;
    writer.flush().context("Flushing CSV output")?;
    Ok(())
}

/// Serialize a table to an in-memory CSV string, e.g. for downloads.
pub fn to_csv_string(table: &Table, delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .quote_style(csv::QuoteStyle::Always)
        .double_quote(true)
        .from_writer(Vec::new());
    write_into(table, &mut writer)?;
    let bytes = writer.into_inner().context("Finishing CSV buffer")?;
    String::from_utf8(bytes).context("CSV output was not valid UTF-8")
}

fn write_into<W: std::io::Write>(table: &Table, writer: &mut csv::Writer<W>) -> Result<()> {
    writer
        .write_record(table.columns())
        .context("Writing CSV header")?;
    for row in table.rows() {
        writer
            .write_record(row.iter().map(|value| value.as_display()))
            .context("Writing CSV row")?;
    }
    Ok(())
}
