use serde::Serialize;

use crate::descriptive::median_sorted;

/// First, second and third quartiles of a dataset.
///
/// Quartiles use the median-of-halves method: Q2 is the median, Q1 and Q3 are
/// the medians of the lower and upper halves. For odd counts the median value
/// belongs to neither half.
///
/// # Examples
///
/// ```
/// use dende_stats::quartiles::Quartiles;
///
/// let values = [50.0, 60.0, 70.0, 80.0, 90.0, 100.0, 110.0, 120.0, 130.0, 140.0];
/// let quartiles = Quartiles::new(values);
///
/// assert_eq!(quartiles.q1, 70.0);
/// assert_eq!(quartiles.q2, 105.0);
/// assert_eq!(quartiles.q3, 120.0);
/// assert_eq!(quartiles.iqr(), 50.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct Quartiles {
    pub q1: f64,
    pub q2: f64,
    pub q3: f64,
}

impl Quartiles {
    /// Computes quartiles from unsorted values.
    ///
    /// An empty input yields all-zero quartiles.
    #[must_use]
    pub fn new<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut sorted = values.into_iter().collect::<Vec<_>>();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted)
    }

    /// Computes quartiles from pre-sorted values.
    ///
    /// An empty input yields all-zero quartiles. With a single value both
    /// halves are empty, and Q1 and Q3 fall back to Q2.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Self {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let Some(q2) = median_sorted(sorted_values) else {
            return Self::default();
        };

        let mid = sorted_values.len() / 2;
        let (lower, upper) = if sorted_values.len() % 2 == 0 {
            (&sorted_values[..mid], &sorted_values[mid..])
        } else {
            (&sorted_values[..mid], &sorted_values[mid + 1..])
        };

        Self {
            q1: median_sorted(lower).unwrap_or(q2),
            q2,
            q3: median_sorted(upper).unwrap_or(q2),
        }
    }

    /// Interquartile range, `Q3 - Q1`.
    #[must_use]
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Returns `[Q1, Q2, Q3]`.
    #[must_use]
    pub fn to_array(&self) -> [f64; 3] {
        [self.q1, self.q2, self.q3]
    }
}
