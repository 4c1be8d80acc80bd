use std::io::{self, BufRead, Read, Write};

use anyhow::{Context, Result};
use argh::FromArgs;
use numstat::{OutputFormat, Precision, Report, VarianceMode};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(FromArgs, Debug)]
/// Descriptive statistics for a list of numbers separated by commas,
/// semicolons or whitespace. Reads stdin when no numbers are given.
struct Args {
    /// numbers to analyze (use `--` before negative numbers)
    #[argh(positional)]
    numbers: Vec<String>,

    /// use the sample (N - 1) denominator for variance and standard deviation
    #[argh(switch, short = 's')]
    sample: bool,

    /// output format: text or json
    #[argh(option, short = 'f', default = "OutputFormat::default()")]
    format: OutputFormat,

    /// decimal digits kept when rounding (default 4)
    #[argh(option, short = 'd', default = "Precision::default()")]
    digits: Precision,

    /// compute a report for every line read from stdin
    #[argh(switch, short = 'i')]
    interactive: bool,
}

#[derive(Debug)]
struct Session {
    variance_mode: VarianceMode,
    precision: Precision,
    format: OutputFormat,
}

impl Session {
    fn submit<W: Write>(&self, text: &str, mut out: W) -> Result<()> {
        let outcome =
            numstat::calculate_with_precision(text, self.variance_mode, self.precision);
        Report::from(&outcome).write_to(&mut out, self.format)?;
        out.flush().context("unable to flush output")
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Args = argh::from_env();
    let session = Session {
        variance_mode: match args.sample {
            true => VarianceMode::Sample,
            false => VarianceMode::Population,
        },
        precision: args.digits,
        format: args.format,
    };
    debug!(?session, interactive = args.interactive, "starting");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.interactive {
        for line in io::stdin().lock().lines() {
            let line = line.context("unable to read stdin")?;
            session.submit(&line, &mut out)?;
            if session.format == OutputFormat::Text {
                writeln!(out).context("unable to write report")?;
            }
        }
        return Ok(());
    }

    let text = match args.numbers.is_empty() {
        true => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("unable to read stdin")?;
            text
        }
        false => args.numbers.join(" "),
    };
    session.submit(&text, &mut out)
}
