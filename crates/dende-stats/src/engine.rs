use std::collections::BTreeSet;

use crate::{
    dataset::{Column, Dataset},
    descriptive::{self, DescriptiveStats},
    error::StatsError,
    frequency::{FrequencyMethod, FrequencyTable},
    histogram::Histogram,
    quartiles::Quartiles,
    summary::{ColumnSummary, CovariancePair},
    transition,
    value::Value,
};

/// Query engine over a borrowed [`Dataset`].
///
/// Every query recomputes its result from the dataset and leaves both the
/// dataset and the engine untouched, so one engine can serve any number of
/// queries, including from several threads at once.
///
/// # Examples
///
/// ```
/// use dende_stats::{Column, Dataset, Statistics};
///
/// let dataset = Dataset::from_iter([(
///     "ticket_price",
///     Column::from(vec![50.0, 30.0, 70.0, 20.0, 80.0, 30.0, 25.0, 75.0, 20.0, 65.0]),
/// )]);
/// let stats = Statistics::new(&dataset);
///
/// assert_eq!(stats.mean("ticket_price")?, 46.5);
/// assert_eq!(stats.variance("ticket_price")?, Some(525.25));
/// # Ok::<(), dende_stats::StatsError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Statistics<'a> {
    dataset: &'a Dataset,
}

impl<'a> Statistics<'a> {
    #[must_use]
    pub fn new(dataset: &'a Dataset) -> Self {
        Self { dataset }
    }

    #[must_use]
    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    fn column(&self, name: &str) -> Result<&'a Column, StatsError> {
        self.dataset.column(name)
    }

    fn numbers(&self, name: &str) -> Result<Vec<f64>, StatsError> {
        self.column(name)?.numbers(name)
    }

    /// Number of values in the column.
    pub fn count(&self, column: &str) -> Result<usize, StatsError> {
        Ok(self.column(column)?.len())
    }

    /// Arithmetic mean. An empty column has mean `0.0`.
    ///
    /// # Errors
    ///
    /// [`StatsError::MissingColumn`], or [`StatsError::TypeMismatch`] if any
    /// value is not numeric.
    pub fn mean(&self, column: &str) -> Result<f64, StatsError> {
        let values = self.numbers(column)?;
        Ok(descriptive::mean(&values).unwrap_or_else(|| {
            tracing::debug!(column, "mean of empty column reported as 0");
            0.0
        }))
    }

    /// Median of the sorted column.
    ///
    /// Numeric columns with an even count average the two middle values.
    /// Other columns take the upper of the two middle values, so the median
    /// of a categorical column is always one of its values.
    ///
    /// # Errors
    ///
    /// [`StatsError::MissingColumn`] or [`StatsError::EmptyColumn`].
    pub fn median(&self, column: &str) -> Result<Value, StatsError> {
        median_value(self.column(column)?).ok_or_else(|| StatsError::empty_column(column))
    }

    /// Every value that occurs with the maximum count, in order of first
    /// appearance. Empty for an empty column.
    pub fn mode(&self, column: &str) -> Result<Vec<Value>, StatsError> {
        Ok(self.absolute_frequency(column)?.modes())
    }

    /// Population variance; `None` for an empty column.
    ///
    /// # Errors
    ///
    /// [`StatsError::MissingColumn`] or [`StatsError::TypeMismatch`].
    pub fn variance(&self, column: &str) -> Result<Option<f64>, StatsError> {
        let values = self.numbers(column)?;
        let variance = descriptive::variance(&values);
        if variance.is_none() {
            tracing::debug!(column, "variance of empty column is undefined");
        }
        Ok(variance)
    }

    /// Population standard deviation; `None` for an empty column.
    pub fn stdev(&self, column: &str) -> Result<Option<f64>, StatsError> {
        Ok(self.variance(column)?.map(f64::sqrt))
    }

    /// Population covariance of two index-aligned columns.
    ///
    /// # Errors
    ///
    /// [`StatsError::MissingColumn`], [`StatsError::TypeMismatch`],
    /// [`StatsError::LengthMismatch`] if the columns differ in length, or
    /// [`StatsError::EmptyColumn`] if both are empty.
    pub fn covariance(&self, column_a: &str, column_b: &str) -> Result<f64, StatsError> {
        let xs = self.numbers(column_a)?;
        let ys = self.numbers(column_b)?;
        if xs.len() != ys.len() {
            return Err(StatsError::LengthMismatch {
                left: column_a.to_owned(),
                right: column_b.to_owned(),
                left_len: xs.len(),
                right_len: ys.len(),
            });
        }
        descriptive::covariance(&xs, &ys).ok_or_else(|| StatsError::empty_column(column_a))
    }

    /// Distinct values of the column.
    pub fn itemset(&self, column: &str) -> Result<BTreeSet<Value>, StatsError> {
        Ok(self.column(column)?.iter().cloned().collect())
    }

    /// Occurrence count of each distinct value, in order of first appearance.
    pub fn absolute_frequency(&self, column: &str) -> Result<FrequencyTable<u64>, StatsError> {
        Ok(FrequencyTable::count(self.column(column)?))
    }

    /// Proportion of the column taken by each distinct value.
    pub fn relative_frequency(&self, column: &str) -> Result<FrequencyTable<f64>, StatsError> {
        Ok(self.absolute_frequency(column)?.to_relative())
    }

    /// Running totals of the absolute or relative frequency.
    ///
    /// Values are accumulated in ascending natural order unless an ordinal
    /// `order` is given; see [`FrequencyTable::cumulative`]. The last entry
    /// holds the column length (absolute) or 1.0 (relative).
    ///
    /// # Examples
    ///
    /// ```
    /// use dende_stats::{Column, Dataset, FrequencyMethod, Statistics, Value};
    ///
    /// let dataset = Dataset::from_iter([(
    ///     "priority",
    ///     Column::from(vec!["alta", "media", "alta", "baixa", "alta"]),
    /// )]);
    /// let stats = Statistics::new(&dataset);
    /// let order = ["baixa", "media", "alta"].map(Value::from);
    ///
    /// let cumulative =
    ///     stats.cumulative_frequency("priority", FrequencyMethod::Absolute, Some(&order))?;
    /// let sums = cumulative.iter().map(|(_, sum)| sum).collect::<Vec<_>>();
    /// assert_eq!(sums, vec![1.0, 2.0, 5.0]);
    /// # Ok::<(), dende_stats::StatsError>(())
    /// ```
    pub fn cumulative_frequency(
        &self,
        column: &str,
        method: FrequencyMethod,
        order: Option<&[Value]>,
    ) -> Result<FrequencyTable<f64>, StatsError> {
        let counts = self.absolute_frequency(column)?;
        let table = match method {
            FrequencyMethod::Absolute => counts.to_f64(),
            FrequencyMethod::Relative => counts.to_relative(),
        };
        Ok(table.cumulative(order))
    }

    /// Probability that `consequent` immediately follows `antecedent` in the
    /// column, read as a sequence. `0.0` if `antecedent` never has a
    /// successor.
    pub fn conditional_probability(
        &self,
        column: &str,
        consequent: &Value,
        antecedent: &Value,
    ) -> Result<f64, StatsError> {
        let values = self.column(column)?.values();
        let count = transition::TransitionCount::from_sequence(values, consequent, antecedent);
        if count.antecedent == 0 {
            tracing::debug!(column, %antecedent, "antecedent never has a successor");
        }
        Ok(count.probability())
    }

    /// Quartiles by the median-of-halves method; all zero for an empty column.
    pub fn quartiles(&self, column: &str) -> Result<Quartiles, StatsError> {
        let values = self.numbers(column)?;
        if values.is_empty() {
            tracing::debug!(column, "quartiles of empty column reported as 0");
        }
        Ok(Quartiles::new(values))
    }

    /// Equal-width histogram with `bins` buckets over the column's range.
    ///
    /// # Errors
    ///
    /// [`StatsError::InvalidBinCount`] if `bins` is zero,
    /// [`StatsError::EmptyColumn`], [`StatsError::MissingColumn`] or
    /// [`StatsError::TypeMismatch`].
    pub fn histogram(&self, column: &str, bins: usize) -> Result<Histogram, StatsError> {
        if bins == 0 {
            return Err(StatsError::InvalidBinCount);
        }
        let values = self.numbers(column)?;
        if values.is_empty() {
            return Err(StatsError::empty_column(column));
        }
        Ok(Histogram::new(values, bins))
    }

    /// Smallest value of a numeric column.
    pub fn min(&self, column: &str) -> Result<f64, StatsError> {
        Ok(self.describe(column)?.min)
    }

    /// Largest value of a numeric column.
    pub fn max(&self, column: &str) -> Result<f64, StatsError> {
        Ok(self.describe(column)?.max)
    }

    /// `max - min` of a numeric column.
    pub fn range(&self, column: &str) -> Result<f64, StatsError> {
        Ok(self.describe(column)?.range)
    }

    /// Descriptive statistics of a numeric column.
    ///
    /// # Errors
    ///
    /// [`StatsError::EmptyColumn`] in addition to the lookup and type errors.
    pub fn describe(&self, column: &str) -> Result<DescriptiveStats, StatsError> {
        DescriptiveStats::new(self.numbers(column)?)
            .ok_or_else(|| StatsError::empty_column(column))
    }

    /// Combined report of one column; see [`ColumnSummary`].
    pub fn summary(&self, column: &str, top: usize) -> Result<ColumnSummary, StatsError> {
        Ok(ColumnSummary::new(column, self.column(column)?, top))
    }

    /// Covariance of every unordered pair of `columns`, in list order.
    ///
    /// Each pair carries its own result, so a failing pair does not hide the
    /// others.
    #[must_use]
    pub fn covariance_matrix(&self, columns: &[&str]) -> Vec<CovariancePair> {
        let mut pairs = vec![];
        for (i, left) in columns.iter().enumerate() {
            for right in &columns[i + 1..] {
                pairs.push(CovariancePair {
                    left: (*left).to_owned(),
                    right: (*right).to_owned(),
                    covariance: self.covariance(left, right),
                });
            }
        }
        pairs
    }
}

/// Median of a column as a [`Value`], or `None` if the column is empty.
pub(crate) fn median_value(column: &Column) -> Option<Value> {
    if column.is_numeric() {
        let mut numbers = column.iter().filter_map(Value::as_number).collect::<Vec<_>>();
        numbers.sort_by(f64::total_cmp);
        return descriptive::median_sorted(&numbers).map(Value::Number);
    }
    let mut values = column.values().to_vec();
    values.sort();
    values.get(values.len() / 2).cloned()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::value::ValueKind;

    fn dataset() -> Dataset {
        Dataset::from_iter([
            ("numbers", Column::from(vec![4.0, 1.0, 3.0, 2.0])),
            ("text", Column::from(vec!["b", "a", "c", "a"])),
            ("short", Column::from(vec![1.0, 2.0])),
            ("empty", Column::default()),
            (
                "mixed",
                Column::new(vec![Value::from(1.0), Value::from("x")]),
            ),
        ])
    }

    #[test]
    fn test_missing_column() {
        let dataset = dataset();
        let stats = Statistics::new(&dataset);
        let missing = StatsError::MissingColumn {
            column: "nope".to_owned(),
        };
        assert_eq!(stats.mean("nope"), Err(missing.clone()));
        assert_eq!(stats.variance("nope"), Err(missing.clone()));
        assert_eq!(stats.mode("nope"), Err(missing.clone()));
        assert_eq!(stats.covariance("numbers", "nope"), Err(missing));
    }

    #[test]
    fn test_type_mismatch() {
        let dataset = dataset();
        let stats = Statistics::new(&dataset);
        assert_eq!(
            stats.mean("text"),
            Err(StatsError::TypeMismatch {
                column: "text".to_owned(),
                index: 0,
                found: ValueKind::Text,
            })
        );
        assert!(stats.mean("mixed").unwrap_err().is_type_mismatch());
        assert!(stats.variance("text").unwrap_err().is_type_mismatch());
        assert!(stats.quartiles("text").unwrap_err().is_type_mismatch());
        assert!(stats.histogram("text", 3).unwrap_err().is_type_mismatch());
        assert!(stats.covariance("numbers", "text").unwrap_err().is_type_mismatch());
    }

    #[test]
    fn test_empty_column_conventions() {
        let dataset = dataset();
        let stats = Statistics::new(&dataset);
        assert_eq!(stats.mean("empty"), Ok(0.0));
        assert_eq!(stats.variance("empty"), Ok(None));
        assert_eq!(stats.stdev("empty"), Ok(None));
        assert_eq!(stats.quartiles("empty"), Ok(Quartiles::default()));
        assert_eq!(stats.mode("empty"), Ok(vec![]));
        assert!(stats.relative_frequency("empty").unwrap().is_empty());
        assert!(stats.median("empty").unwrap_err().is_empty_column());
        assert!(stats.histogram("empty", 4).unwrap_err().is_empty_column());
        assert!(stats.describe("empty").unwrap_err().is_empty_column());
        assert!(stats.covariance("empty", "empty").unwrap_err().is_empty_column());
    }

    #[test]
    fn test_median() {
        let dataset = dataset();
        let stats = Statistics::new(&dataset);
        assert_eq!(stats.median("numbers"), Ok(Value::from(2.5)));
        // sorted: a, a, b, c -> upper middle
        assert_eq!(stats.median("text"), Ok(Value::from("b")));
    }

    #[test]
    fn test_covariance_length_mismatch() {
        let dataset = dataset();
        let stats = Statistics::new(&dataset);
        assert_eq!(
            stats.covariance("numbers", "short"),
            Err(StatsError::LengthMismatch {
                left: "numbers".to_owned(),
                right: "short".to_owned(),
                left_len: 4,
                right_len: 2,
            })
        );
    }

    #[test]
    fn test_histogram_zero_bins() {
        let dataset = dataset();
        let stats = Statistics::new(&dataset);
        assert_eq!(stats.histogram("numbers", 0), Err(StatsError::InvalidBinCount));
    }

    #[test]
    fn test_stdev_is_sqrt_variance() {
        let dataset = dataset();
        let stats = Statistics::new(&dataset);
        let variance = stats.variance("numbers").unwrap().unwrap();
        let stdev = stats.stdev("numbers").unwrap().unwrap();
        assert_relative_eq!(stdev, variance.sqrt());
        assert_relative_eq!(variance, 1.25);
    }

    #[test]
    fn test_itemset() {
        let dataset = dataset();
        let stats = Statistics::new(&dataset);
        let items = stats.itemset("text").unwrap();
        assert_eq!(
            items.into_iter().collect::<Vec<_>>(),
            vec![Value::from("a"), Value::from("b"), Value::from("c")]
        );
    }

    #[test]
    fn test_min_max_range() {
        let dataset = dataset();
        let stats = Statistics::new(&dataset);
        assert_eq!(stats.min("numbers"), Ok(1.0));
        assert_eq!(stats.max("numbers"), Ok(4.0));
        assert_eq!(stats.range("numbers"), Ok(3.0));
    }

    #[test]
    fn test_covariance_matrix_pairs() {
        let dataset = dataset();
        let stats = Statistics::new(&dataset);
        let pairs = stats.covariance_matrix(&["numbers", "short", "text"]);
        let names = pairs
            .iter()
            .map(|p| (p.left.as_str(), p.right.as_str()))
            .collect::<Vec<_>>();
        assert_eq!(
            names,
            vec![("numbers", "short"), ("numbers", "text"), ("short", "text")]
        );
        assert!(pairs.iter().all(|p| p.covariance.is_err()));
    }

    #[test]
    fn test_engine_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Statistics<'_>>();
    }
}
