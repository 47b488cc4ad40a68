use std::path::PathBuf;

use structopt::StructOpt;

use crate::error::{Error, Result};

#[derive(Debug, StructOpt)]
#[structopt(name = "promdump", about = "Parse, validate and diff Prometheus metrics dumps")]
pub struct CliOpt {
    /// Output format: "human" or "json".
    #[structopt(
        long = "format",
        short = "f",
        default_value = "human",
        parse(try_from_str = parse_format)
    )]
    pub format: OutputFormat,

    #[structopt(subcommand)]
    pub command: Command,
}

#[derive(Debug, StructOpt)]
pub enum Command {
    /// Parse a dump and pretty-print its families and samples.
    Show { dump: PathBuf },

    /// Check a dump for duplicate families and duplicate samples.
    Validate { dump: PathBuf },

    /// Compare two dumps and report added/removed families and samples.
    Diff { from: PathBuf, to: PathBuf },
}

#[derive(Copy, Clone, Debug)]
pub enum OutputFormat {
    Human,
    Json,
}

fn parse_format(s: &str) -> Result<OutputFormat> {
    match s {
        "human" | "h" => Ok(OutputFormat::Human),
        "json" | "j" => Ok(OutputFormat::Json),
        _ => Err(Error::new(&format!("unknown output format \"{}\"", s))),
    }
}
