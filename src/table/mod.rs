use std::collections::BTreeMap;

use log::debug;

use crate::fetch::RawSeries;
use crate::term::DateWindow;

pub mod render;

pub use render::{render_csv, render_html};

/// Sparse date-keyed table: one column per merged series, one slot per column.
///
/// Rows exist only for dates at least one series reported inside the window.
/// A row's slot vector only grows as far as the last column that reported for
/// that date, so rows can be shorter than the header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedTable {
    columns: Vec<String>,
    rows: BTreeMap<String, Vec<Option<String>>>,
}

impl MergedTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_series<I>(window: &DateWindow, series: I) -> Self
    where
        I: IntoIterator<Item = RawSeries>,
    {
        let mut table = Self::new();
        for entry in series {
            table.merge(window, &entry);
        }
        table
    }

    /// Append `series` as the next column, keeping rows inside `window`.
    /// Returns the number of cells written.
    pub fn merge(&mut self, window: &DateWindow, series: &RawSeries) -> usize {
        let column = self.columns.len();
        self.columns.push(series.name.clone());

        let bounds = window.bounds();
        let mut written = 0;
        for row in &series.rows {
            if !bounds.contains(&row.date) {
                continue;
            }

            let slots = self.rows.entry(row.date.clone()).or_default();
            if slots.len() <= column {
                slots.resize(column + 1, None);
            }
            match &mut slots[column] {
                Some(_) => debug!(
                    "Ignoring duplicate {} row for {}",
                    row.date, series.id
                ),
                slot => {
                    *slot = Some(row.value.clone());
                    written += 1;
                }
            }
        }

        debug!(
            "Merged {} of {} rows for {} inside {}",
            written,
            series.rows.len(),
            series.id,
            window
        );
        written
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in ascending date order.
    pub fn rows(&self) -> impl Iterator<Item = (&str, &[Option<String>])> {
        self.rows
            .iter()
            .map(|(date, slots)| (date.as_str(), slots.as_slice()))
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn cell(&self, date: &str, column: usize) -> Option<&str> {
        self.rows
            .get(date)
            .and_then(|slots| slots.get(column))
            .and_then(|slot| slot.as_deref())
    }

    /// Value reported by the column named `name` on `date`.
    pub fn cell_by_name(&self, date: &str, name: &str) -> Option<&str> {
        let column = self.columns.iter().position(|col| col == name)?;
        self.cell(date, column)
    }
}
