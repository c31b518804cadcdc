//! Descriptive statistics over an in-memory columnar dataset.
//!
//! A [`Dataset`] maps column names to [`Column`]s of numeric or categorical
//! [`Value`]s. A [`Statistics`] engine borrows a dataset and answers queries
//! about it:
//!
//! - **Central tendency and dispersion**: mean, median, mode, population
//!   variance and standard deviation, min/max/range
//! - **Joint variability**: population covariance of two aligned columns
//! - **Categorical distribution**: distinct values, absolute, relative and
//!   cumulative frequencies, with an optional ordinal override
//! - **Sequential dependence**: first-order conditional probability
//! - **Shape**: quartiles and equal-width histograms
//!
//! # Modules
//!
//! - [`value`]: Tagged scalar values and their total order
//! - [`dataset`]: Columns and the dataset mapping
//! - [`engine`]: The query engine
//! - [`descriptive`]: Mean, median, variance and covariance over slices
//! - [`frequency`]: Ordered distinct-value tables
//! - [`quartiles`]: Median-of-halves quartiles
//! - [`histogram`]: Equal-width bucket counts
//! - [`transition`]: Adjacent-pair probabilities in a sequence
//! - [`summary`]: Combined per-column reports
//!
//! # Examples
//!
//! ## Numeric columns
//!
//! ```
//! use dende_stats::{Column, Dataset, Statistics, Value};
//!
//! let dataset = Dataset::from_iter([
//!     ("participants", Column::from(vec![50.0, 60.0, 70.0, 80.0, 90.0, 100.0, 110.0, 120.0, 130.0, 140.0])),
//!     ("ticket_price", Column::from(vec![50.0, 30.0, 70.0, 20.0, 80.0, 30.0, 25.0, 75.0, 20.0, 65.0])),
//! ]);
//! let stats = Statistics::new(&dataset);
//!
//! assert_eq!(stats.median("participants")?, Value::from(105.0));
//! assert_eq!(stats.covariance("participants", "ticket_price")?, 27.5);
//! assert_eq!(stats.histogram("ticket_price", 4)?.counts(), vec![5, 0, 1, 4]);
//! # Ok::<(), dende_stats::StatsError>(())
//! ```
//!
//! ## Categorical columns
//!
//! ```
//! use dende_stats::{Column, Dataset, Statistics, Value};
//!
//! let dataset = Dataset::from_iter([(
//!     "priority",
//!     Column::from(vec!["alta", "media", "alta", "baixa", "alta", "media", "baixa", "alta", "baixa", "alta"]),
//! )]);
//! let stats = Statistics::new(&dataset);
//!
//! assert_eq!(stats.mode("priority")?, vec![Value::from("alta")]);
//! assert_eq!(stats.absolute_frequency("priority")?.get(&"baixa".into()), Some(3));
//! assert_eq!(
//!     stats.conditional_probability("priority", &"alta".into(), &"media".into())?,
//!     0.5
//! );
//! # Ok::<(), dende_stats::StatsError>(())
//! ```

pub use self::{
    dataset::{Column, Dataset},
    engine::Statistics,
    error::StatsError,
    frequency::{FrequencyMethod, FrequencyTable},
    value::{Value, ValueKind},
};

pub mod dataset;
pub mod descriptive;
pub mod engine;
pub mod frequency;
pub mod histogram;
pub mod quartiles;
pub mod summary;
pub mod transition;
pub mod value;

mod error;
