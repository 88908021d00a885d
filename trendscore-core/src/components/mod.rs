//! Shared engine abstractions.

pub mod indicator;

pub use indicator::{DerivedSeries, Indicator};
