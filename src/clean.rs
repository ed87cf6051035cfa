//! `clean` command: ingest, deduplicate, write back out, report statistics.

use anyhow::{Context, Result};
use log::info;

use crate::{cli::CleanArgs, export, ingest, io_utils, render};

pub fn execute(args: &CleanArgs) -> Result<()> {
    let delimiter = io_utils::resolve_input_delimiter(&args.input, args.delimiter);
    info!(
        "Cleaning '{}' with delimiter '{}'",
        args.input.display(),
        crate::printable_delimiter(delimiter)
    );

    let ingestion = ingest::ingest_path(&args.input, delimiter as char)?;
    let mut stats = ingestion.stats;
    let table = ingest::dedupe(ingestion.table, &mut stats);
    info!(
        "Parsed {} row(s) across {} column(s); dropped {} malformed and {} duplicate row(s)",
        table.count(),
        table.columns().len(),
        stats.malformed_rows,
        stats.duplicate_rows
    );

    let output_delimiter =
        io_utils::resolve_output_delimiter(Some(&args.output), args.output_delimiter, delimiter);
    export::write_csv(&table, Some(&args.output), output_delimiter)
        .with_context(|| format!("Writing cleaned output to {:?}", args.output))?;
    info!("Cleaned output written to {:?}", args.output);

    if args.stats_json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        let headers = vec!["metric".to_string(), "value".to_string()];
        render::print_table(&headers, &stats.render_rows());
    }
    Ok(())
}
