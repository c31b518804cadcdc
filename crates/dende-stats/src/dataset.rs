//! Columnar dataset: named, ordered sequences of [`Value`]s.

use std::collections::{HashMap, hash_map};

use crate::{error::StatsError, value::Value};

/// An ordered sequence of values under one name.
///
/// Columns are usually homogeneous, but nothing enforces it. Operations that
/// need numbers go through [`Column::numbers`], which reports the first
/// non-numeric value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Column {
    values: Vec<Value>,
}

impl Column {
    #[must_use]
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }

    pub fn push(&mut self, value: Value) {
        self.values.push(value);
    }

    /// Returns `true` if every value is numeric. Empty columns count as numeric.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        self.values.iter().all(Value::is_number)
    }

    /// Splits off the numeric values, in order, and counts the rest.
    ///
    /// # Examples
    ///
    /// ```
    /// use dende_stats::{dataset::Column, value::Value};
    ///
    /// let column = Column::from(vec![
    ///     Value::from(70.0),
    ///     Value::from("unknown"),
    ///     Value::from(55.0),
    /// ]);
    /// let (numbers, ignored) = column.numeric_part();
    /// assert_eq!(numbers, Column::from(vec![70.0, 55.0]));
    /// assert_eq!(ignored, 1);
    /// ```
    #[must_use]
    pub fn numeric_part(&self) -> (Column, usize) {
        let numbers = self
            .values
            .iter()
            .filter(|value| value.is_number())
            .cloned()
            .collect::<Column>();
        let ignored = self.len() - numbers.len();
        (numbers, ignored)
    }

    /// Extracts the column as numbers.
    ///
    /// `name` is only used to label the error.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::TypeMismatch`] pointing at the first value that
    /// is not numeric.
    ///
    /// # Examples
    ///
    /// ```
    /// use dende_stats::dataset::Column;
    ///
    /// let column = Column::from(vec![1.0, 2.0]);
    /// assert_eq!(column.numbers("x").unwrap(), vec![1.0, 2.0]);
    ///
    /// let column = Column::from(vec!["a", "b"]);
    /// assert!(column.numbers("x").is_err());
    /// ```
    pub fn numbers(&self, name: &str) -> Result<Vec<f64>, StatsError> {
        self.values
            .iter()
            .enumerate()
            .map(|(index, value)| {
                value.as_number().ok_or_else(|| StatsError::TypeMismatch {
                    column: name.to_owned(),
                    index,
                    found: value.kind(),
                })
            })
            .collect()
    }
}

impl From<Vec<Value>> for Column {
    fn from(values: Vec<Value>) -> Self {
        Self::new(values)
    }
}

impl From<Vec<f64>> for Column {
    fn from(values: Vec<f64>) -> Self {
        values.into_iter().map(Value::Number).collect()
    }
}

impl From<Vec<&str>> for Column {
    fn from(values: Vec<&str>) -> Self {
        values.into_iter().map(Value::from).collect()
    }
}

impl FromIterator<Value> for Column {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Column {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A mapping from column name to [`Column`].
///
/// # Examples
///
/// ```
/// use dende_stats::dataset::{Column, Dataset};
///
/// let dataset = Dataset::from_iter([
///     ("ticket_price", Column::from(vec![50.0, 30.0, 70.0])),
///     ("priority", Column::from(vec!["alta", "media", "alta"])),
/// ]);
///
/// assert_eq!(dataset.len(), 2);
/// assert_eq!(dataset.column("priority").unwrap().len(), 3);
/// assert!(dataset.column("rating").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    columns: HashMap<String, Column>,
}

impl Dataset {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a column, returning the column it replaced, if any.
    pub fn insert<S>(&mut self, name: S, column: Column) -> Option<Column>
    where
        S: Into<String>,
    {
        self.columns.insert(name.into(), column)
    }

    /// Looks up a column by name.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::MissingColumn`] if no column has that name.
    pub fn column(&self, name: &str) -> Result<&Column, StatsError> {
        self.columns
            .get(name)
            .ok_or_else(|| StatsError::missing_column(name))
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column names in ascending order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names = self.columns.keys().map(String::as_str).collect::<Vec<_>>();
        names.sort_unstable();
        names
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, Column> {
        self.columns.iter()
    }
}

impl<S> FromIterator<(S, Column)> for Dataset
where
    S: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (S, Column)>>(iter: I) -> Self {
        Self {
            columns: iter
                .into_iter()
                .map(|(name, column)| (name.into(), column))
                .collect(),
        }
    }
}
