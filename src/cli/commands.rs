use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "organ", about = concat!("organ v", env!("CARGO_PKG_VERSION"), " - org outlines, parsed and written back byte for byte"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Read configuration from this file instead of ./organ.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log parse details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the headings of a file
    Parse(ParseArgs),
    /// Parse a file and write it back out
    Export(ExportArgs),
    /// Show headings matching a filter query
    Filter(FilterArgs),
    /// Suggest completions for a partly typed filter query
    Complete(CompleteArgs),
    /// Show time clocked per heading
    Clock(ClockArgs),
}

#[derive(Args)]
pub struct ParseArgs {
    /// Org file to read
    pub file: PathBuf,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Org file to read
    pub file: PathBuf,
    /// Fail if the output differs from the input
    #[arg(long)]
    pub check: bool,
    /// Write here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct FilterArgs {
    /// Org file to read
    pub file: PathBuf,
    /// Filter query, e.g. ":work TODO|NEXT -:done"
    pub query: String,
}

#[derive(Args)]
pub struct CompleteArgs {
    /// Org file to take keywords, tags and properties from
    pub file: PathBuf,
    /// The query typed so far
    pub query: String,
    /// Cursor position in characters (default: end of query)
    #[arg(long)]
    pub cursor: Option<usize>,
    /// Print whole candidate queries instead of the text to insert
    #[arg(long)]
    pub datalist: bool,
}

#[derive(Args)]
pub struct ClockArgs {
    /// Org file to read
    pub file: PathBuf,
    /// Only count clocks touching this day or later (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,
    /// Only count clocks touching this day or earlier (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,
}
