use clap::Args;
use dende_stats::{Dataset, Statistics, summary::ColumnSummary};

use crate::{
    command::OutputArg,
    loader::DatasetArg,
    report::{CovarianceRow, DescribeReport, ReportHeader},
};

#[derive(Debug, Clone, Args)]
pub(crate) struct DescribeArg {
    #[clap(flatten)]
    dataset: DatasetArg,

    /// Columns to describe (comma-separated, defaults to every column)
    #[arg(long, value_delimiter = ',')]
    columns: Vec<String>,

    /// Skip columns holding fewer values than this
    #[arg(long, default_value_t = 1)]
    min_values: usize,

    /// Number of most frequent values listed per column
    #[arg(long, default_value_t = 5)]
    top: usize,

    #[clap(flatten)]
    output: OutputArg,
}

pub(crate) fn run(arg: &DescribeArg) -> anyhow::Result<()> {
    let dataset = arg.dataset.load()?;

    let names = if arg.columns.is_empty() {
        dataset.names()
    } else {
        arg.columns.iter().map(String::as_str).collect()
    };

    let summaries = summarize(&dataset, &names, arg.top, arg.min_values);
    let covariances = covariances(&dataset, &summaries);

    tracing::info!(
        columns = summaries.len(),
        pairs = covariances.len(),
        "columns analyzed"
    );

    let report = DescribeReport {
        header: ReportHeader::new(&arg.dataset.path),
        columns: summaries,
        covariances,
    };
    arg.output.emit(&report, DescribeReport::write_text)
}

/// Summaries of the named columns, skipping absent columns and columns with
/// fewer than `min_values` values.
fn summarize(
    dataset: &Dataset,
    names: &[&str],
    top: usize,
    min_values: usize,
) -> Vec<ColumnSummary> {
    let stats = Statistics::new(dataset);
    let mut summaries = vec![];
    for &name in names {
        let summary = match stats.summary(name, top) {
            Ok(summary) => summary,
            Err(error) => {
                tracing::warn!(column = name, %error, "skipping column");
                continue;
            }
        };
        if summary.ignored > 0 {
            tracing::info!(
                column = name,
                valid = summary.count,
                ignored = summary.ignored,
                "non-numeric values ignored"
            );
        }
        if summary.count < min_values {
            tracing::warn!(
                column = name,
                count = summary.count,
                min_values,
                "skipping column with too few values"
            );
            continue;
        }
        summaries.push(summary);
    }
    summaries
}

/// Pairwise covariance of the numeric columns among `summaries`, over the
/// same numeric values each summary was computed from.
fn covariances(dataset: &Dataset, summaries: &[ColumnSummary]) -> Vec<CovarianceRow> {
    let numeric = summaries
        .iter()
        .filter(|summary| summary.numeric.is_some())
        .filter_map(|summary| {
            let column = dataset.get(&summary.column)?;
            Some((summary.column.clone(), column.numeric_part().0))
        })
        .collect::<Dataset>();
    let names = summaries
        .iter()
        .map(|summary| summary.column.as_str())
        .filter(|name| numeric.contains(name))
        .collect::<Vec<_>>();

    Statistics::new(&numeric)
        .covariance_matrix(&names)
        .iter()
        .inspect(|pair| {
            if let Err(error) = &pair.covariance {
                tracing::warn!(
                    left = %pair.left,
                    right = %pair.right,
                    %error,
                    "covariance unavailable"
                );
            }
        })
        .map(CovarianceRow::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::fmt::Write as _;

    use dende_stats::summary::Relationship;

    use super::*;
    use crate::loader::{CsvOptions, read_dataset};

    fn tracks() -> Dataset {
        let mut csv = "track_popularity,danceability,genre\n".to_owned();
        for n in 1..=20 {
            writeln!(csv, "{},{},pop", n * 5, f64::from(n) / 20.0).unwrap();
        }
        csv.push_str("unknown,,rock\n");
        read_dataset(csv.as_bytes(), &CsvOptions::default()).unwrap()
    }

    #[test]
    fn test_summarize_cleans_mostly_numeric_column() {
        let dataset = tracks();
        let summaries = summarize(&dataset, &["track_popularity", "genre"], 5, 1);

        assert_eq!(summaries.len(), 2);
        let popularity = &summaries[0];
        assert_eq!(popularity.count, 20);
        assert_eq!(popularity.ignored, 1);
        assert_eq!(popularity.numeric.as_ref().unwrap().stats.mean, 52.5);
        assert!(summaries[1].numeric.is_none());
    }

    #[test]
    fn test_summarize_skips_absent_and_small_columns() {
        let dataset = tracks();
        let summaries = summarize(&dataset, &["energy", "danceability", "genre"], 5, 21);
        let names = summaries
            .iter()
            .map(|summary| summary.column.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["genre"]);
    }

    #[test]
    fn test_covariance_over_cleaned_columns() {
        let dataset = tracks();
        let summaries = summarize(&dataset, &dataset.names(), 5, 1);
        let rows = covariances(&dataset, &summaries);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].left, "danceability");
        assert_eq!(rows[0].right, "track_popularity");
        assert!(rows[0].error.is_none());
        assert_eq!(rows[0].relationship, Some(Relationship::Positive));
    }
}
