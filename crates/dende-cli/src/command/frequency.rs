use anyhow::Context;
use clap::Args;
use dende_stats::{FrequencyMethod, Statistics, StatsError, summary::TopFrequency};

use crate::{
    command::OutputArg,
    loader::{DatasetArg, parse_value},
    report::{FrequencyReport, FrequencyRows, ReportHeader},
};

#[derive(Debug, Clone, Args)]
pub(crate) struct FrequencyArg {
    #[clap(flatten)]
    dataset: DatasetArg,

    /// Column to tabulate
    #[arg(long)]
    column: String,

    /// Accumulate the absolute or relative frequency
    #[arg(long)]
    cumulative: Option<FrequencyMethod>,

    /// Ordinal order of the values to accumulate in (comma-separated)
    #[arg(long, value_delimiter = ',', requires = "cumulative")]
    order: Vec<String>,

    #[clap(flatten)]
    output: OutputArg,
}

pub(crate) fn run(arg: &FrequencyArg) -> anyhow::Result<()> {
    let dataset = arg.dataset.load()?;
    let stats = Statistics::new(&dataset);

    let table = match arg.cumulative {
        Some(method) => {
            let order = arg
                .order
                .iter()
                .map(|value| parse_value(value.trim()))
                .collect::<Vec<_>>();
            let order = (!order.is_empty()).then_some(order.as_slice());
            let rows = stats.cumulative_frequency(&arg.column, method, order);
            rows.map(|rows| FrequencyRows::Cumulative { method, rows })
        }
        None => {
            distribution(&stats, &arg.column).map(|rows| FrequencyRows::Distribution { rows })
        }
    }
    .with_context(|| format!("Failed to tabulate column '{}'", arg.column))?;

    let report = FrequencyReport {
        header: ReportHeader::new(&arg.dataset.path),
        column: arg.column.clone(),
        table,
    };
    arg.output.emit(&report, FrequencyReport::write_text)
}

/// Count and proportion of every distinct value, in order of first
/// appearance.
fn distribution(stats: &Statistics<'_>, column: &str) -> Result<Vec<TopFrequency>, StatsError> {
    let absolute = stats.absolute_frequency(column)?;
    let relative = absolute.to_relative();
    Ok(absolute
        .iter()
        .map(|(value, count)| TopFrequency {
            value: value.clone(),
            count,
            proportion: relative.get(value).unwrap_or_default(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use dende_stats::{Column, Dataset};

    use super::*;

    #[test]
    fn test_distribution_keeps_first_appearance_order() {
        let dataset = Dataset::from_iter([(
            "priority",
            Column::from(vec!["media", "alta", "alta", "baixa", "alta"]),
        )]);
        let stats = Statistics::new(&dataset);
        let rows = distribution(&stats, "priority").unwrap();

        let values = rows
            .iter()
            .map(|row| (row.value.to_string(), row.count))
            .collect::<Vec<_>>();
        assert_eq!(
            values,
            vec![
                ("media".to_owned(), 1),
                ("alta".to_owned(), 3),
                ("baixa".to_owned(), 1),
            ]
        );
        assert_relative_eq!(rows[1].proportion, 0.6);
        assert_abs_diff_eq!(
            rows.iter().map(|row| row.proportion).sum::<f64>(),
            1.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_distribution_of_missing_column() {
        let dataset = Dataset::new();
        let stats = Statistics::new(&dataset);
        assert!(
            distribution(&stats, "priority")
                .unwrap_err()
                .is_missing_column()
        );
    }
}
