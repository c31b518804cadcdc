use serde::Serialize;

use crate::{
    dataset::Column, descriptive::DescriptiveStats, engine::median_value, error::StatsError,
    frequency::FrequencyTable, quartiles::Quartiles, value::Value,
};

/// Combined statistical overview of one column.
///
/// Categorical and numeric columns share the frequency part; numeric columns
/// additionally carry [`NumericSummary`].
///
/// # Examples
///
/// ```
/// use dende_stats::{dataset::Column, summary::ColumnSummary, value::Value};
///
/// let column = Column::from(vec![2.0, 3.0, 4.0, 2.0, 5.0, 3.0, 2.0, 4.0, 2.0, 3.0]);
/// let summary = ColumnSummary::new("duration_hours", &column, 3);
///
/// assert_eq!(summary.count, 10);
/// assert_eq!(summary.distinct, 4);
/// assert_eq!(summary.modes, vec![Value::from(2.0)]);
/// assert_eq!(summary.top[0].count, 4);
/// assert_eq!(summary.numeric.unwrap().stats.mean, 3.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    /// Name of the column.
    pub column: String,
    /// Number of values summarized.
    pub count: usize,
    /// Non-numeric values left out of a mostly numeric column.
    pub ignored: usize,
    /// Number of distinct values.
    pub distinct: usize,
    /// Median value; `None` for an empty column.
    pub median: Option<Value>,
    /// Values with the maximum count, in order of first appearance.
    pub modes: Vec<Value>,
    /// Most frequent values, highest count first.
    pub top: Vec<TopFrequency>,
    /// Last value of the cumulative absolute frequency.
    pub cumulative_absolute: u64,
    /// Last value of the cumulative relative frequency.
    pub cumulative_relative: f64,
    /// Present when the column is non-empty and entirely numeric.
    pub numeric: Option<NumericSummary>,
}

/// One row of the most-frequent-values list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopFrequency {
    pub value: Value,
    pub count: u64,
    pub proportion: f64,
}

/// Numeric part of a [`ColumnSummary`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericSummary {
    pub stats: DescriptiveStats,
    pub quartiles: Quartiles,
}

impl ColumnSummary {
    /// Summarizes `column`, keeping the `top` most frequent values.
    ///
    /// A column whose values are mostly, but not all, numeric is summarized
    /// over its numbers only; the skipped values are counted in `ignored`.
    #[must_use]
    pub fn new(name: &str, column: &Column, top: usize) -> Self {
        let (numbers, ignored) = column.numeric_part();
        let (column, ignored) = if ignored > 0 && numbers.len() > ignored {
            tracing::debug!(column = name, ignored, "summarizing numeric part of column");
            (&numbers, ignored)
        } else {
            (column, 0)
        };

        let counts = FrequencyTable::count(column);
        let relative = counts.to_relative();

        let top = counts
            .top(top)
            .into_iter()
            .map(|(value, count)| TopFrequency {
                value: value.clone(),
                count,
                proportion: relative.get(value).unwrap_or_default(),
            })
            .collect();

        let cumulative_absolute = counts
            .cumulative(None)
            .last()
            .map_or(0, |(_, total)| total);
        let cumulative_relative = relative
            .cumulative(None)
            .last()
            .map_or(0.0, |(_, total)| total);

        let numeric = if column.is_numeric() {
            let numbers = column.iter().filter_map(Value::as_number).collect::<Vec<_>>();
            DescriptiveStats::new(numbers.iter().copied()).map(|stats| NumericSummary {
                stats,
                quartiles: Quartiles::new(numbers),
            })
        } else {
            None
        };

        Self {
            column: name.to_owned(),
            count: column.len(),
            ignored,
            distinct: counts.len(),
            median: median_value(column),
            modes: counts.modes(),
            top,
            cumulative_absolute,
            cumulative_relative,
            numeric,
        }
    }
}

/// Sign of a covariance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Relationship {
    #[display("positive")]
    Positive,
    #[display("negative")]
    Negative,
    #[display("none")]
    Uncorrelated,
}

impl Relationship {
    #[must_use]
    pub fn from_covariance(covariance: f64) -> Self {
        if covariance > 0.0 {
            Relationship::Positive
        } else if covariance < 0.0 {
            Relationship::Negative
        } else {
            Relationship::Uncorrelated
        }
    }
}

/// Covariance between two named columns.
#[derive(Debug, Clone, PartialEq)]
pub struct CovariancePair {
    pub left: String,
    pub right: String,
    pub covariance: Result<f64, StatsError>,
}

impl CovariancePair {
    /// Sign of the covariance, if it could be computed.
    #[must_use]
    pub fn relationship(&self) -> Option<Relationship> {
        self.covariance
            .as_ref()
            .ok()
            .map(|&cov| Relationship::from_covariance(cov))
    }
}
