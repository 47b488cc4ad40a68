use std::io::{self, Write};

use structopt::StructOpt;

use promdump::cliopt::{CliOpt, Command, OutputFormat};
use promdump::dump::MetricsDump;
use promdump::format::{Formatter, HumanReadableFormatter, JSONFormatter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let opt = CliOpt::from_args();

    let formatter: Box<dyn Formatter> = match opt.format {
        OutputFormat::Human => Box::new(HumanReadableFormatter::new()),
        OutputFormat::Json => Box::new(JSONFormatter::new()),
    };

    let mut findings = false;
    let output = match opt.command {
        Command::Show { dump } => {
            let dump = MetricsDump::from_file(dump)?;
            formatter.format_dump(&dump)?
        }
        Command::Validate { dump } => {
            let dump = MetricsDump::from_file(dump)?;
            let result = dump.validate();
            findings = !result.is_clean();
            formatter.format_validation(&dump, &result)?
        }
        Command::Diff { from, to } => {
            let from = MetricsDump::from_file(from)?;
            let to = MetricsDump::from_file(to)?;
            let result = from.diff(&to);
            findings = !result.is_empty();
            formatter.format_diff(&result)?
        }
    };

    io::stdout().write_all(&output)?;

    // Findings are data, not failures, but a non-zero exit code lets CI
    // scripts tell a clean run from one with anomalies or differences.
    if findings {
        std::process::exit(1);
    }

    Ok(())
}
