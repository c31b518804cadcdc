use anyhow::Context;
use clap::Args;
use dende_stats::Statistics;

use crate::{
    command::OutputArg,
    loader::{DatasetArg, parse_value},
    report::{ReportHeader, TransitionReport},
};

#[derive(Debug, Clone, Args)]
pub(crate) struct TransitionArg {
    #[clap(flatten)]
    dataset: DatasetArg,

    /// Column read as a sequence
    #[arg(long)]
    column: String,

    /// Preceding value
    #[arg(long)]
    from: String,

    /// Following value
    #[arg(long)]
    to: String,

    #[clap(flatten)]
    output: OutputArg,
}

pub(crate) fn run(arg: &TransitionArg) -> anyhow::Result<()> {
    let dataset = arg.dataset.load()?;
    let from = parse_value(arg.from.trim());
    let to = parse_value(arg.to.trim());
    let probability = Statistics::new(&dataset)
        .conditional_probability(&arg.column, &to, &from)
        .with_context(|| format!("Failed to read column '{}' as a sequence", arg.column))?;

    let report = TransitionReport {
        header: ReportHeader::new(&arg.dataset.path),
        column: arg.column.clone(),
        from,
        to,
        probability,
    };
    arg.output.emit(&report, TransitionReport::write_text)
}
