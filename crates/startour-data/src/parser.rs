//! Per-row CSV parsing
//!
//! Rows are split on `,` with no quoting or escaping. A field that itself
//! contains a comma shifts every later column and usually gets the row rejected.

use crate::error::RowError;
use crate::stars::StarRecord;
use serde::{Deserialize, Serialize};
use startour_core::CatalogPosition;

/// Zero-based column positions of the fields a star needs
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnLayout {
    pub name: usize,
    pub distance: usize,
    pub color_index: usize,
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl ColumnLayout {
    /// HYG database v3: `proper` = 6, `dist` = 9, `ci` = 16, `x,y,z` = 17..19
    pub const fn hyg_v3() -> Self {
        Self { name: 6, distance: 9, color_index: 16, x: 17, y: 18, z: 19 }
    }

    /// Smallest number of fields a row needs under this layout
    pub fn min_columns(&self) -> usize {
        [self.name, self.distance, self.color_index, self.x, self.y, self.z]
            .into_iter()
            .max()
            .unwrap_or(0)
            + 1
    }
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self::hyg_v3()
    }
}

/// Parse one data row into a star, or say why it was rejected
pub fn parse_row(line: &str, layout: &ColumnLayout) -> Result<StarRecord, RowError> {
    let fields: Vec<&str> = line.split(',').collect();

    let name = field(&fields, layout.name, "name")?;
    let x = number(&fields, layout.x, "x")?;
    let y = number(&fields, layout.y, "y")?;
    let z = number(&fields, layout.z, "z")?;
    let distance = number(&fields, layout.distance, "distance")?;
    let color_index = number(&fields, layout.color_index, "color_index")?;

    Ok(StarRecord::new(name, CatalogPosition::new(x, y, z), distance, color_index))
}

fn field<'a>(fields: &[&'a str], index: usize, column: &'static str) -> Result<&'a str, RowError> {
    fields.get(index).copied().ok_or(RowError::MissingField { column, index })
}

fn number(fields: &[&str], index: usize, column: &'static str) -> Result<f64, RowError> {
    let raw = field(fields, index, column)?;
    let value: f64 = raw.trim().parse().map_err(|_| RowError::InvalidNumber {
        column,
        value: raw.to_string(),
    })?;

    if !value.is_finite() {
        return Err(RowError::NonFinite { column });
    }
    Ok(value)
}
