//! Scalar values stored in dataset columns.
//!
//! A [`Value`] is either numeric or categorical text. Values are totally
//! ordered (every number sorts before every text value, numbers follow the
//! IEEE 754 total order, text is compared lexicographically), and equality
//! and hashing agree with that order. This lets values key both ordered and
//! hashed maps, which the frequency tables rely on.

use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
};

use serde::{Deserialize, Serialize};

/// A single cell of a column.
///
/// # Examples
///
/// ```
/// use dende_stats::value::Value;
///
/// let price = Value::from(50.0);
/// let priority = Value::from("alta");
///
/// assert_eq!(price.as_number(), Some(50.0));
/// assert_eq!(priority.as_text(), Some("alta"));
/// assert!(price < priority);
/// ```
#[derive(Debug, Clone, derive_more::From, derive_more::IsVariant, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// A real-valued number.
    Number(f64),
    /// An opaque categorical token.
    Text(String),
}

/// The kind of a [`Value`], used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    #[display("numeric")]
    Number,
    #[display("text")]
    Text,
}

impl Value {
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Number(_) => ValueKind::Number,
            Value::Text(_) => ValueKind::Text,
        }
    }

    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Text(_) => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Number(_) => None,
            Value::Text(s) => Some(s),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_owned())
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(f64::from(value))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => fmt::Display::fmt(n, f),
            Value::Text(s) => fmt::Display::fmt(s, f),
        }
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => unsigned_zero(*a).total_cmp(&unsigned_zero(*b)),
            (Value::Number(_), Value::Text(_)) => Ordering::Less,
            (Value::Text(_), Value::Number(_)) => Ordering::Greater,
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
        }
    }
}

/// Maps `-0.0` to `0.0` so both zeros are the same value.
fn unsigned_zero(n: f64) -> f64 {
    n + 0.0
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // `total_cmp` equality is bit equality, so hashing the bits stays
        // consistent with `Eq`.
        match self {
            Value::Number(n) => {
                0u8.hash(state);
                unsigned_zero(*n).to_bits().hash(state);
            }
            Value::Text(s) => {
                1u8.hash(state);
                s.hash(state);
            }
        }
    }
}
