use anyhow::Context;
use clap::Args;
use dende_stats::Statistics;

use crate::{
    command::OutputArg,
    loader::DatasetArg,
    report::{HistogramReport, ReportHeader},
};

#[derive(Debug, Clone, Args)]
pub(crate) struct HistogramArg {
    #[clap(flatten)]
    dataset: DatasetArg,

    /// Numeric column to bucket
    #[arg(long)]
    column: String,

    /// Number of equal-width buckets
    #[arg(long, default_value_t = 4)]
    bins: usize,

    #[clap(flatten)]
    output: OutputArg,
}

pub(crate) fn run(arg: &HistogramArg) -> anyhow::Result<()> {
    let dataset = arg.dataset.load()?;
    let histogram = Statistics::new(&dataset)
        .histogram(&arg.column, arg.bins)
        .with_context(|| format!("Failed to build histogram of column '{}'", arg.column))?;

    let report = HistogramReport {
        header: ReportHeader::new(&arg.dataset.path),
        column: arg.column.clone(),
        histogram,
    };
    arg.output.emit(&report, HistogramReport::write_text)
}
