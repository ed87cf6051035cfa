//! `query` command: run the filter/project/group/sort pipeline and render
//! the stages, or list the selector choices a dataset offers.

use anyhow::{Context, Result};
use log::info;

use crate::{
    catalog,
    cli::{QueryArgs, SortChoice},
    columns, export, io_utils, pipeline,
    render,
    table::Table,
};

pub fn execute(args: &QueryArgs) -> Result<()> {
    let delimiter = io_utils::resolve_input_delimiter(&args.input, args.delimiter);
    let (table, stats) = pipeline::load_table(&args.input, delimiter as char)?;
    info!(
        "Loaded {} row(s) across {} column(s) ({} duplicate(s) removed)",
        table.count(),
        table.columns().len(),
        stats.duplicate_rows
    );

    if args.show_options {
        print_options(&table, &args.genre);
        return Ok(());
    }

    let selections = pipeline::Selections {
        popularity: args.popularity.clone(),
        genre: args.genre.clone(),
        subgenre: args.subgenre.clone(),
        danceability: args.danceability.clone(),
        energy: args.energy.clone(),
        tempo: args.tempo.clone(),
        liveness: args.liveness.clone(),
        month: args.month.clone(),
        year: args.year.clone(),
    };
    let sort_column = args.sort.map(|choice| match choice {
        SortChoice::Popularity => columns::TRACK_POPULARITY,
        SortChoice::Danceability => columns::DANCEABILITY,
    });

    let outcome = pipeline::apply_pipeline(&table, &selections, sort_column)?;

    println!(
        "Rows: {} loaded, {} after filter",
        table.count(),
        outcome.filtered.count()
    );
    println!();

    if let Some(path) = &args.output {
        let output_delimiter = io_utils::resolve_output_delimiter(Some(path), None, delimiter);
        export::write_csv(&outcome.projected, Some(path), output_delimiter)
            .with_context(|| format!("Writing projected rows to {path:?}"))?;
        info!(
            "Wrote {} projected row(s) to {:?}",
            outcome.projected.count(),
            path
        );
    } else {
        println!("Projected ({} row(s)):", outcome.projected.count());
        print_limited(&outcome.projected, args.limit);
        println!();
    }

    let summary = outcome.sorted.as_ref().unwrap_or(&outcome.grouped);
    match sort_column {
        Some(column) => println!(
            "Artist summary ({} group(s), ascending by avg {column}):",
            summary.count()
        ),
        None => println!("Artist summary ({} group(s)):", summary.count()),
    }
    print_limited(summary, args.limit);
    Ok(())
}

fn print_limited(table: &Table, limit: Option<usize>) {
    let shown = limit.unwrap_or(usize::MAX).min(table.count());
    let rows: Vec<Vec<String>> = table
        .rows()
        .iter()
        .take(shown)
        .map(|row| row.iter().map(|value| value.as_display()).collect())
        .collect();
    render::print_table(table.columns(), &rows);
    if shown < table.count() {
        println!("... {} more row(s)", table.count() - shown);
    }
}

fn print_options(table: &Table, genre_choice: &str) {
    let options = catalog::build_options(table, Some(genre_choice));
    let headers = vec!["selector".to_string(), "choices".to_string()];
    let rows = vec![
        vec!["popularity".to_string(), options.popularity.join(", ")],
        vec!["danceability".to_string(), options.unit_buckets.join(", ")],
        vec!["energy".to_string(), options.unit_buckets.join(", ")],
        vec!["liveness".to_string(), options.unit_buckets.join(", ")],
        vec!["tempo".to_string(), options.tempo.join(", ")],
        vec!["genre".to_string(), options.genres.join(", ")],
        vec!["subgenre".to_string(), options.subgenres.join(", ")],
        vec!["month".to_string(), options.months.join(", ")],
        vec!["year".to_string(), options.years.join(", ")],
    ];
    render::print_table(&headers, &rows);
}
