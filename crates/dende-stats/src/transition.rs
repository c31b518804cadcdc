//! First-order transitions between adjacent values of a sequence.

use crate::value::Value;

/// Counts of adjacent pairs starting at a given antecedent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransitionCount {
    /// Occurrences of the antecedent at positions that have a successor.
    pub antecedent: u64,
    /// Occurrences of the pair `(antecedent, consequent)`.
    pub pair: u64,
}

impl TransitionCount {
    /// Counts `(antecedent, consequent)` pairs in `values`.
    #[must_use]
    pub fn from_sequence(values: &[Value], consequent: &Value, antecedent: &Value) -> Self {
        values
            .windows(2)
            .filter(|pair| pair[0] == *antecedent)
            .fold(Self::default(), |mut count, pair| {
                count.antecedent += 1;
                if pair[1] == *consequent {
                    count.pair += 1;
                }
                count
            })
    }

    /// `pair / antecedent`, or `0.0` if the antecedent never has a successor.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn probability(&self) -> f64 {
        if self.antecedent == 0 {
            return 0.0;
        }
        self.pair as f64 / self.antecedent as f64
    }
}

/// Estimates `P(X[i] = consequent | X[i-1] = antecedent)`.
///
/// The sequence is read in order; the probability is the number of adjacent
/// pairs `(antecedent, consequent)` divided by the number of positions that
/// hold `antecedent` and have a successor. Returns `0.0` when that divisor
/// is zero.
///
/// # Examples
///
/// ```
/// use dende_stats::{transition::conditional_probability, value::Value};
///
/// let priority = [
///     "alta", "media", "alta", "baixa", "alta", "media", "baixa", "alta", "baixa", "alta",
/// ]
/// .map(Value::from);
///
/// let p = conditional_probability(&priority, &Value::from("alta"), &Value::from("media"));
/// assert_eq!(p, 0.5);
/// ```
#[must_use]
pub fn conditional_probability(values: &[Value], consequent: &Value, antecedent: &Value) -> f64 {
    TransitionCount::from_sequence(values, consequent, antecedent).probability()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(values: &[&str]) -> Vec<Value> {
        values.iter().copied().map(Value::from).collect()
    }

    #[test]
    fn test_trailing_antecedent_is_not_counted() {
        let values = seq(&["a", "b", "a"]);
        let count = TransitionCount::from_sequence(&values, &Value::from("b"), &Value::from("a"));
        assert_eq!(count, TransitionCount { antecedent: 1, pair: 1 });
        assert_eq!(count.probability(), 1.0);
    }

    #[test]
    fn test_absent_antecedent() {
        let values = seq(&["a", "b", "c"]);
        assert_eq!(
            conditional_probability(&values, &Value::from("a"), &Value::from("z")),
            0.0
        );
    }

    #[test]
    fn test_antecedent_only_at_end() {
        let values = seq(&["a", "b", "z"]);
        assert_eq!(
            conditional_probability(&values, &Value::from("a"), &Value::from("z")),
            0.0
        );
    }

    #[test]
    fn test_empty_and_single() {
        assert_eq!(conditional_probability(&[], &Value::from(1.0), &Value::from(1.0)), 0.0);
        assert_eq!(
            conditional_probability(&[Value::from(1.0)], &Value::from(1.0), &Value::from(1.0)),
            0.0
        );
    }

    #[test]
    fn test_self_transition() {
        let values = [1.0, 1.0, 1.0, 2.0].map(Value::from);
        let p = conditional_probability(&values, &Value::from(1.0), &Value::from(1.0));
        assert!((p - 2.0 / 3.0).abs() < 1e-12);
    }
}
