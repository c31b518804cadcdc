use serde::Serialize;

/// Descriptive statistics summarizing a numeric column.
///
/// Variance and standard deviation are population statistics (divisor is the
/// number of values, not one less).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptiveStats {
    /// The number of values.
    pub count: usize,
    /// The minimum value.
    pub min: f64,
    /// The maximum value.
    pub max: f64,
    /// `max - min`.
    pub range: f64,
    /// The arithmetic mean.
    pub mean: f64,
    /// The median; the average of the two middle values for even counts.
    pub median: f64,
    /// The population variance.
    pub variance: f64,
    /// The population standard deviation.
    pub std_dev: f64,
}

impl DescriptiveStats {
    /// Computes descriptive statistics from unsorted values.
    ///
    /// # Returns
    ///
    /// * `Some(DescriptiveStats)` - if the dataset contains at least one value
    /// * `None` - if the dataset is empty
    ///
    /// # Examples
    ///
    /// ```
    /// # use dende_stats::descriptive::DescriptiveStats;
    /// let values = [50.0, 30.0, 70.0, 20.0, 80.0, 30.0, 25.0, 75.0, 20.0, 65.0];
    /// let stats = DescriptiveStats::new(values).unwrap();
    /// assert_eq!(stats.min, 20.0);
    /// assert_eq!(stats.max, 80.0);
    /// assert_eq!(stats.mean, 46.5);
    /// assert_eq!(stats.median, 40.0);
    /// assert_eq!(stats.variance, 525.25);
    /// ```
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut values = values.into_iter().collect::<Vec<_>>();
        values.sort_by(f64::total_cmp);
        Self::from_sorted(&values)
    }

    /// Computes descriptive statistics from pre-sorted values.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let min = *sorted_values.first()?;
        let max = *sorted_values.last()?;
        let mean = mean(sorted_values)?;
        let median = median_sorted(sorted_values)?;
        let variance = variance(sorted_values)?;

        Some(Self {
            count: sorted_values.len(),
            min,
            max,
            range: max - min,
            mean,
            median,
            variance,
            std_dev: variance.sqrt(),
        })
    }
}

/// Arithmetic mean, or `None` for an empty slice.
///
/// ```
/// # use dende_stats::descriptive::mean;
/// assert_eq!(mean(&[1.0, 2.0, 6.0]), Some(3.0));
/// assert_eq!(mean(&[]), None);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population variance, or `None` for an empty slice.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn variance(values: &[f64]) -> Option<f64> {
    let mean = mean(values)?;
    let sum_of_squares = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
    Some(sum_of_squares / values.len() as f64)
}

/// Population covariance of two index-aligned slices.
///
/// Returns `None` if the slices are empty.
///
/// # Panics
///
/// Panics if the slices differ in length.
///
/// ```
/// # use dende_stats::descriptive::covariance;
/// let xs = [1.0, 2.0, 3.0];
/// let ys = [6.0, 4.0, 2.0];
/// assert_eq!(covariance(&xs, &ys), Some(-4.0 / 3.0));
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn covariance(xs: &[f64], ys: &[f64]) -> Option<f64> {
    assert_eq!(xs.len(), ys.len(), "slices must have the same length");

    let mean_x = mean(xs)?;
    let mean_y = mean(ys)?;
    let sum_of_products = xs
        .iter()
        .zip(ys)
        .map(|(x, y)| (x - mean_x) * (y - mean_y))
        .sum::<f64>();
    Some(sum_of_products / xs.len() as f64)
}

/// Median of sorted values.
///
/// Odd counts take the middle value; even counts average the two middle
/// values. Returns `None` for an empty slice.
///
/// ```
/// # use dende_stats::descriptive::median_sorted;
/// assert_eq!(median_sorted(&[1.0, 2.0, 3.0]), Some(2.0));
/// assert_eq!(median_sorted(&[1.0, 2.0, 3.0, 4.0]), Some(2.5));
/// ```
#[must_use]
pub fn median_sorted(sorted_values: &[f64]) -> Option<f64> {
    let n = sorted_values.len();
    if n == 0 {
        return None;
    }
    let mid = n / 2;
    if n % 2 == 1 {
        Some(sorted_values[mid])
    } else {
        Some(f64::midpoint(sorted_values[mid - 1], sorted_values[mid]))
    }
}
