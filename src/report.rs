use std::{fmt, io::Write, str::FromStr};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::{calculate::Outcome, stats::Mode};

const NO_DATA: &str = "—";

/// A single display slot of the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Field {
    Number(f64),
    Modes(Vec<f64>),
    NoData,
    NoMode,
    /// The statistic exists but is not a finite number, e.g. the sample
    /// variance of a single value.
    Undefined,
}

impl Field {
    fn statistic(value: f64) -> Field {
        match value.is_finite() {
            true => Field::Number(value),
            false => Field::Undefined,
        }
    }
}

impl From<&Mode> for Field {
    fn from(mode: &Mode) -> Self {
        match mode {
            Mode::Absent => Field::NoMode,
            Mode::Single(value) => Field::Number(*value),
            Mode::Tied(values) => Field::Modes(values.clone()),
        }
    }
}

struct Number(f64);

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let magnitude = self.0.abs();
        if self.0 == 0. {
            // print -0 as 0
            write!(f, "0")
        } else if magnitude >= 1e21 || magnitude < 1e-6 {
            let scientific = format!("{:e}", self.0);
            match scientific.split_once('e') {
                Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                    write!(f, "{}e+{}", mantissa, exponent)
                }
                _ => write!(f, "{}", scientific),
            }
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Number(value) => write!(f, "{}", Number(*value)),
            Field::Modes(values) => write!(
                f,
                "{}",
                values
                    .iter()
                    .map(|value| Number(*value).to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            Field::NoData => write!(f, "{}", NO_DATA),
            Field::NoMode => write!(f, "no mode"),
            Field::Undefined => write!(f, "undefined"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub mean: Field,
    pub median: Field,
    pub mode: Field,
    pub range: Field,
    pub variance: Field,
    pub standard_deviation: Field,
}

impl From<&Outcome> for Report {
    fn from(outcome: &Outcome) -> Self {
        match outcome {
            Outcome::Empty => Report {
                mean: Field::NoData,
                median: Field::NoData,
                mode: Field::NoData,
                range: Field::NoData,
                variance: Field::NoData,
                standard_deviation: Field::NoData,
            },
            Outcome::Computed(result) => Report {
                mean: Field::statistic(result.mean),
                median: Field::statistic(result.median),
                mode: Field::from(&result.mode),
                range: Field::statistic(result.range),
                variance: Field::statistic(result.variance),
                standard_deviation: Field::statistic(result.std_dev),
            },
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = [
            ("Mean", &self.mean),
            ("Median", &self.median),
            ("Mode", &self.mode),
            ("Range", &self.range),
            ("Variance", &self.variance),
            ("Standard deviation", &self.standard_deviation),
        ];
        for (label, field) in rows.iter() {
            writeln!(f, "{:<20}{}", format!("{}:", label), field)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Text
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("unknown output format `{}`, expected text or json", s)),
        }
    }
}

impl Report {
    pub fn write_to<W: Write>(&self, mut writer: W, format: OutputFormat) -> Result<()> {
        match format {
            OutputFormat::Text => write!(writer, "{}", self).context("unable to write report"),
            OutputFormat::Json => {
                serde_json::to_writer(&mut writer, self).context("unable to serialize report")?;
                writeln!(writer).context("unable to write report")
            }
        }
    }
}
