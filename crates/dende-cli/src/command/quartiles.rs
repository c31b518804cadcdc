use anyhow::Context;
use clap::Args;
use dende_stats::Statistics;

use crate::{
    command::OutputArg,
    loader::DatasetArg,
    report::{QuartilesReport, ReportHeader},
};

#[derive(Debug, Clone, Args)]
pub(crate) struct QuartilesArg {
    #[clap(flatten)]
    dataset: DatasetArg,

    /// Numeric column
    #[arg(long)]
    column: String,

    #[clap(flatten)]
    output: OutputArg,
}

pub(crate) fn run(arg: &QuartilesArg) -> anyhow::Result<()> {
    let dataset = arg.dataset.load()?;
    let quartiles = Statistics::new(&dataset)
        .quartiles(&arg.column)
        .with_context(|| format!("Failed to compute quartiles of column '{}'", arg.column))?;

    let report = QuartilesReport {
        header: ReportHeader::new(&arg.dataset.path),
        column: arg.column.clone(),
        quartiles,
        iqr: quartiles.iqr(),
    };
    arg.output.emit(&report, QuartilesReport::write_text)
}
