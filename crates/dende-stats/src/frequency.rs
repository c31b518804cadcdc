//! Distinct-value tables: absolute, relative and cumulative frequencies.
//!
//! A [`FrequencyTable`] maps each distinct [`Value`] to a quantity and keeps
//! its entries in a defined order. Counting tables enumerate values in order
//! of first appearance, which makes mode ties deterministic. Cumulative
//! tables enumerate values in the order the running sum was taken.
//!
//! # Examples
//!
//! ```
//! use dende_stats::{frequency::FrequencyTable, value::Value};
//!
//! let priority = ["alta", "media", "alta", "baixa", "alta"].map(Value::from);
//! let counts = FrequencyTable::count(&priority);
//!
//! assert_eq!(counts.get(&Value::from("alta")), Some(3));
//! assert_eq!(counts.total(), 5);
//! assert_eq!(counts.modes(), vec![Value::from("alta")]);
//!
//! let order = ["baixa", "media", "alta"].map(Value::from);
//! let cumulative = counts.cumulative(Some(&order));
//! assert_eq!(cumulative.get(&Value::from("media")), Some(2));
//! assert_eq!(cumulative.last(), Some((&Value::from("alta"), 5)));
//! ```

use std::{collections::HashMap, ops::Add};

use serde::{Serialize, Serializer};

use crate::value::Value;

/// Which frequency to accumulate in a cumulative table.
#[derive(
    Default,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    derive_more::FromStr,
    derive_more::Display,
    Serialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FrequencyMethod {
    /// Occurrence counts.
    #[default]
    #[display("absolute")]
    Absolute,
    /// Proportions of the column length.
    #[display("relative")]
    Relative,
}

/// An ordered mapping from distinct value to a frequency.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyTable<T> {
    entries: Vec<(Value, T)>,
    index: HashMap<Value, usize>,
}

impl<T> Default for FrequencyTable<T> {
    fn default() -> Self {
        Self {
            entries: vec![],
            index: HashMap::new(),
        }
    }
}

impl<T> FrequencyTable<T>
where
    T: Copy,
{
    #[must_use]
    pub fn get(&self, value: &Value) -> Option<T> {
        self.index.get(value).map(|&idx| self.entries[idx].1)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Value, T)> + '_ {
        self.entries.iter().map(|(value, freq)| (value, *freq))
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> + '_ {
        self.entries.iter().map(|(value, _)| value)
    }

    /// The last entry in table order.
    #[must_use]
    pub fn last(&self) -> Option<(&Value, T)> {
        self.entries.last().map(|(value, freq)| (value, *freq))
    }

    /// Appends `value` or, if it is already present, replaces its frequency
    /// in place.
    fn upsert(&mut self, value: Value, freq: T) {
        if let Some(&idx) = self.index.get(&value) {
            self.entries[idx].1 = freq;
        } else {
            self.index.insert(value.clone(), self.entries.len());
            self.entries.push((value, freq));
        }
    }

    /// The `k` entries with the highest frequency.
    ///
    /// Entries with equal frequency keep table order.
    #[must_use]
    pub fn top(&self, k: usize) -> Vec<(&Value, T)>
    where
        T: PartialOrd,
    {
        let mut entries = self.iter().collect::<Vec<_>>();
        // Stable sort keeps table order among ties.
        entries.sort_by(|(_, a), (_, b)| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
        entries.truncate(k);
        entries
    }
}

impl FrequencyTable<u64> {
    /// Counts occurrences of each distinct value, in order of first appearance.
    pub fn count<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a Value>,
    {
        let mut table = Self::default();
        for value in values {
            if let Some(&idx) = table.index.get(value) {
                table.entries[idx].1 += 1;
            } else {
                table.upsert(value.clone(), 1);
            }
        }
        table
    }

    /// The sum of all counts, which equals the number of values counted.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// Every value whose count equals the maximum count, in order of first
    /// appearance. Empty for an empty table.
    #[must_use]
    pub fn modes(&self) -> Vec<Value> {
        let Some(max) = self.entries.iter().map(|(_, count)| *count).max() else {
            return vec![];
        };
        self.entries
            .iter()
            .filter(|(_, count)| *count == max)
            .map(|(value, _)| value.clone())
            .collect()
    }

    /// Divides each count by the total, so the proportions sum to 1.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn to_relative(&self) -> FrequencyTable<f64> {
        let total = self.total() as f64;
        self.map(|count| count as f64 / total)
    }

    /// Counts as floating-point values, for tables that mix with proportions.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn to_f64(&self) -> FrequencyTable<f64> {
        self.map(|count| count as f64)
    }
}

impl<T> FrequencyTable<T>
where
    T: Copy,
{
    fn map<U, F>(&self, mut f: F) -> FrequencyTable<U>
    where
        F: FnMut(T) -> U,
    {
        FrequencyTable {
            entries: self
                .entries
                .iter()
                .map(|(value, freq)| (value.clone(), f(*freq)))
                .collect(),
            index: self.index.clone(),
        }
    }

    /// Running sums of the frequencies.
    ///
    /// Without an `order`, distinct values are visited in ascending natural
    /// order. With an ordinal `order`, the listed values are visited first,
    /// in the given order; a listed value missing from the table contributes
    /// nothing but still gets an entry. Values in the table but absent from
    /// `order` follow in ascending natural order, so the last entry always
    /// holds the grand total. Repeated values in `order` are visited once.
    #[must_use]
    pub fn cumulative(&self, order: Option<&[Value]>) -> FrequencyTable<T>
    where
        T: Add<Output = T> + Default,
    {
        let mut rest = self.values().collect::<Vec<_>>();
        rest.sort_unstable();

        let sequence = match order {
            Some(order) => {
                rest.retain(|value| !order.contains(*value));
                order.iter().chain(rest).collect::<Vec<_>>()
            }
            None => rest,
        };

        let mut cumulative = FrequencyTable::default();
        let mut running = T::default();
        for value in sequence {
            if cumulative.index.contains_key(value) {
                continue;
            }
            running = running + self.get(value).unwrap_or_default();
            cumulative.upsert(value.clone(), running);
        }
        cumulative
    }
}

#[derive(Serialize)]
struct FrequencyEntry<'a, T> {
    value: &'a Value,
    frequency: &'a T,
}

impl<T> Serialize for FrequencyTable<T>
where
    T: Serialize,
{
    /// Serializes as a sequence of `{ "value": ..., "frequency": ... }`
    /// entries, keeping table order.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(
            self.entries
                .iter()
                .map(|(value, frequency)| FrequencyEntry { value, frequency }),
        )
    }
}
