use std::ops::Range;

use serde::Serialize;

/// An equal-width histogram over the range of a dataset.
///
/// The range `[min, max]` of the values is split into buckets of equal
/// width. Every bucket is half-open, except the last one which also holds
/// the maximum.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    /// The buckets in ascending order of their bounds.
    pub bins: Vec<HistogramBin>,
}

/// A single bucket in a histogram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    /// The range of values covered by this bucket (inclusive start, exclusive end).
    pub range: Range<f64>,
    /// The number of values that fall within this bucket.
    pub count: u64,
}

impl HistogramBin {
    /// The `(lower, upper)` bounds of the bucket.
    #[must_use]
    pub fn bounds(&self) -> (f64, f64) {
        (self.range.start, self.range.end)
    }
}

impl Histogram {
    /// Creates a histogram with `num_bins` equal-width buckets.
    ///
    /// Returns an empty histogram if `values` is empty or `num_bins` is zero.
    /// When every value is the same, the range is widened to one unit so
    /// the buckets keep a positive width; all values then land in the first
    /// bucket.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dende_stats::histogram::Histogram;
    /// let values = [50.0, 30.0, 70.0, 20.0, 80.0, 30.0, 25.0, 75.0, 20.0, 65.0];
    /// let histogram = Histogram::new(values, 4);
    ///
    /// assert_eq!(histogram.counts(), vec![5, 0, 1, 4]);
    /// assert_eq!(histogram.bins[0].bounds(), (20.0, 35.0));
    /// assert_eq!(histogram.bins[3].bounds(), (65.0, 80.0));
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new<I>(values: I, num_bins: usize) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let values = values.into_iter().collect::<Vec<_>>();
        if values.is_empty() || num_bins == 0 {
            return Self { bins: vec![] };
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let (range, top) = if max > min {
            (max - min, max)
        } else {
            tracing::debug!(min, "degenerate histogram range, widening to one unit");
            (1.0, min + 1.0)
        };

        // Bounds are recomputed from `range` rather than accumulated to avoid
        // drift; the last bound is pinned to the top of the range.
        let bound = |idx: usize| {
            if idx == num_bins {
                top
            } else {
                min + (idx as f64) * range / num_bins as f64
            }
        };
        let bounds = (0..=num_bins).map(bound).collect::<Vec<_>>();
        let mut bins = bounds
            .windows(2)
            .map(|pair| HistogramBin {
                range: pair[0]..pair[1],
                count: 0,
            })
            .collect::<Vec<_>>();

        // Bucket lookup uses the reported bounds, so a value equal to a bound
        // always starts the bucket above it. The maximum stays in the last one.
        let inner = &bounds[1..num_bins];
        for val in values {
            let idx = inner.partition_point(|&b| b <= val);
            bins[idx].count += 1;
        }

        Self { bins }
    }

    /// Bucket counts in ascending order of their bounds.
    #[must_use]
    pub fn counts(&self) -> Vec<u64> {
        self.bins.iter().map(|bin| bin.count).collect()
    }

    /// The total number of values counted.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.bins.iter().map(|bin| bin.count).sum()
    }

    /// Iterates over `((lower, upper), count)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = ((f64, f64), u64)> + '_ {
        self.bins.iter().map(|bin| (bin.bounds(), bin.count))
    }
}
