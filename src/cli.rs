use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(author, version, about = "Query delimited track datasets in memory", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Ingest a raw delimited file, drop malformed and duplicate rows, and write a cleaned CSV
    Clean(CleanArgs),
    /// Narrow a cleaned file to the analysis column subset
    Subset(SubsetArgs),
    /// Filter, project, group, and sort a dataset using selector constraints
    Query(QueryArgs),
}

#[derive(Debug, Args)]
pub struct CleanArgs {
    /// Input delimited file (use '-' for stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Output file for the cleaned rows
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Delimiter for the output file (defaults to the input delimiter)
    #[arg(long = "output-delimiter", value_parser = parse_delimiter)]
    pub output_delimiter: Option<u8>,
    /// Report the ingestion statistics as JSON instead of a table
    #[arg(long = "stats-json")]
    pub stats_json: bool,
}

#[derive(Debug, Args)]
pub struct SubsetArgs {
    /// Input delimited file (use '-' for stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Output file (stdout if omitted)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// Columns to keep (defaults to the built-in analysis subset)
    #[arg(short = 'C', long = "columns", value_delimiter = ',')]
    pub columns: Vec<String>,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Delimiter for the output file (defaults to the input delimiter)
    #[arg(long = "output-delimiter", value_parser = parse_delimiter)]
    pub output_delimiter: Option<u8>,
}

#[derive(Debug, Args)]
pub struct QueryArgs {
    /// Input delimited file (use '-' for stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Track popularity bucket such as '80-90' (ANY = no filter)
    #[arg(long, default_value = "ANY")]
    pub popularity: String,
    /// Playlist genre, matched exactly
    #[arg(long, default_value = "ANY")]
    pub genre: String,
    /// Playlist subgenre, matched exactly
    #[arg(long, default_value = "ANY")]
    pub subgenre: String,
    /// Danceability bucket such as '0.5-0.6'
    #[arg(long, default_value = "ANY")]
    pub danceability: String,
    /// Energy bucket such as '0.7-0.8'
    #[arg(long, default_value = "ANY")]
    pub energy: String,
    /// Tempo range in BPM such as '120-140' (upper bound inclusive)
    #[arg(long, default_value = "ANY")]
    pub tempo: String,
    /// Liveness bucket such as '0.0-0.1'
    #[arg(long, default_value = "ANY")]
    pub liveness: String,
    /// Release month: 1-12, a name, or a label like 'Jan (1)'
    #[arg(long, default_value = "ANY")]
    pub month: String,
    /// Release year (4 digits)
    #[arg(long, default_value = "ANY")]
    pub year: String,
    /// Sort the grouped summary ascending by this aggregate
    #[arg(long, value_enum)]
    pub sort: Option<SortChoice>,
    /// Limit the number of projected rows displayed
    #[arg(long)]
    pub limit: Option<usize>,
    /// Write the projected rows as CSV here instead of rendering them
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// List the selector choices derived from the dataset and exit
    #[arg(long = "show-options")]
    pub show_options: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortChoice {
    Popularity,
    Danceability,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}
