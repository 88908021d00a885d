//! Indicator merge: left-join derived series onto the base table by date.
//!
//! The base series defines the rows. A derived date with no base row is
//! dropped; a base date missing from a derived series leaves that cell
//! `None`. Row count and order always match the base series.

use crate::components::indicator::DerivedSeries;
use crate::domain::{PriceBar, PriceSeries};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Base rows plus one `Option<f64>` column per merged series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergedTable {
    rows: Vec<PriceBar>,
    columns: Vec<(String, Vec<Option<f64>>)>,
}

impl MergedTable {
    pub fn rows(&self) -> &[PriceBar] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column names in merge order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn column(&self, name: &str) -> Option<&[Option<f64>]> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values.as_slice())
    }

    /// Cell value, `None` when the column is unknown or the cell is a gap.
    pub fn value(&self, row: usize, name: &str) -> Option<f64> {
        self.column(name).and_then(|c| c.get(row).copied().flatten())
    }

    /// Value on the most recent row.
    pub fn latest(&self, name: &str) -> Option<f64> {
        self.len().checked_sub(1).and_then(|row| self.value(row, name))
    }
}

/// Left-join every derived series onto `base`.
///
/// A later series with the same name replaces an earlier one.
pub fn merge_by_date(base: &PriceSeries, derived: &[DerivedSeries]) -> MergedTable {
    let rows = base.bars().to_vec();
    let index: HashMap<NaiveDate, usize> =
        rows.iter().enumerate().map(|(i, b)| (b.date, i)).collect();

    let mut table = MergedTable {
        rows,
        columns: Vec::with_capacity(derived.len()),
    };

    for series in derived {
        let mut column = vec![None; table.rows.len()];
        for (date, value) in &series.points {
            if let Some(&row) = index.get(date) {
                column[row] = *value;
            }
        }

        match table.columns.iter_mut().find(|(n, _)| *n == series.name) {
            Some((_, existing)) => *existing = column,
            None => table.columns.push((series.name.clone(), column)),
        }
    }

    table
}
