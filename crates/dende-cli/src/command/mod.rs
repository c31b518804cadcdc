use std::{
    io::{self, Write},
    path::PathBuf,
};

use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use crate::util::Output;

use self::{
    describe::DescribeArg, frequency::FrequencyArg, histogram::HistogramArg,
    quartiles::QuartilesArg, transition::TransitionArg,
};

mod describe;
mod frequency;
mod histogram;
mod quartiles;
mod transition;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Summarize columns and the covariance between numeric columns
    Describe(#[clap(flatten)] DescribeArg),
    /// Absolute, relative or cumulative frequency of a column
    Frequency(#[clap(flatten)] FrequencyArg),
    /// Equal-width histogram of a numeric column
    Histogram(#[clap(flatten)] HistogramArg),
    /// Probability that one value immediately follows another
    Transition(#[clap(flatten)] TransitionArg),
    /// Quartiles of a numeric column
    Quartiles(#[clap(flatten)] QuartilesArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Describe(arg) => describe::run(&arg)?,
        Mode::Frequency(arg) => frequency::run(&arg)?,
        Mode::Histogram(arg) => histogram::run(&arg)?,
        Mode::Transition(arg) => transition::run(&arg)?,
        Mode::Quartiles(arg) => quartiles::run(&arg)?,
    }
    Ok(())
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub enum Format {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Args)]
pub(crate) struct OutputArg {
    /// Report format: text or json
    #[arg(long, default_value = "text")]
    format: Format,

    /// Output file path (defaults to stdout)
    #[arg(long)]
    output: Option<PathBuf>,
}

impl OutputArg {
    /// Writes `report` as JSON, or as text through `render`.
    fn emit<T, F>(&self, report: &T, render: F) -> anyhow::Result<()>
    where
        T: Serialize,
        F: FnOnce(&T, &mut dyn Write) -> io::Result<()>,
    {
        let mut output = Output::from_output_path(self.output.as_ref())?;
        match self.format {
            Format::Text => output.write_text(|w| render(report, w)),
            Format::Json => output.write_json(report),
        }
    }
}
