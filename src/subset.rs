//! `subset` command: narrow an input file to the analysis column subset.

use anyhow::{Context, Result, anyhow};
use itertools::Itertools;
use log::{info, warn};

use crate::{cli::SubsetArgs, columns, export, ingest, io_utils};

pub fn execute(args: &SubsetArgs) -> Result<()> {
    let delimiter = io_utils::resolve_input_delimiter(&args.input, args.delimiter);
    let ingestion = ingest::ingest_path(&args.input, delimiter as char)?;
    let table = ingestion.table;

    let requested: Vec<&str> = if args.columns.is_empty() {
        columns::SUBSET_COLUMNS.to_vec()
    } else {
        args.columns
            .iter()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .collect_vec()
    };

    let (present, missing): (Vec<&str>, Vec<&str>) = requested
        .iter()
        .copied()
        .partition(|name| table.column_index(name).is_some());
    if !missing.is_empty() {
        warn!("Skipping column(s) missing from input: {}", missing.join(", "));
    }
    if present.is_empty() {
        return Err(anyhow!(
            "None of the requested columns exist in {:?}",
            args.input
        ));
    }

    let subset = table
        .project(&present)
        .with_context(|| format!("Projecting columns from {:?}", args.input))?;
    let output_delimiter =
        io_utils::resolve_output_delimiter(args.output.as_deref(), args.output_delimiter, delimiter);
    export::write_csv(&subset, args.output.as_deref(), output_delimiter)
        .context("Writing subset output")?;
    info!(
        "Wrote {} row(s) across {} column(s)",
        subset.count(),
        subset.columns().len()
    );
    Ok(())
}
