use std::f64::consts::FRAC_PI_2;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DhError;

/// Denavit-Hartenberg parameters of one link.
///
/// Lengths are in meters and angles in radians. `theta` is the nominal joint
/// angle the chain is built at; the joint variable is added on top of it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DhParameter {
    /// 1-based position of the link in the chain.
    pub index: u32,
    /// Link length along the local X axis.
    pub a: f64,
    /// Link twist about the local X axis.
    pub alpha: f64,
    /// Link offset along the local Z axis.
    pub d: f64,
    /// Joint angle about the local Z axis.
    pub theta: f64,
}

/// Names the numeric fields of a [`DhParameter`], for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DhField {
    A,
    Alpha,
    D,
    Theta,
}

impl fmt::Display for DhField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DhField::A => "a",
            DhField::Alpha => "alpha",
            DhField::D => "d",
            DhField::Theta => "theta",
        };
        f.write_str(name)
    }
}

impl DhParameter {
    pub fn new(index: u32, a: f64, alpha: f64, d: f64, theta: f64) -> Self {
        Self {
            index,
            a,
            alpha,
            d,
            theta,
        }
    }

    pub fn fields(&self) -> [(DhField, f64); 4] {
        [
            (DhField::A, self.a),
            (DhField::Alpha, self.alpha),
            (DhField::D, self.d),
            (DhField::Theta, self.theta),
        ]
    }

    /// Checks the index is 1-based and every field is finite.
    pub fn validate(&self) -> Result<(), DhError> {
        if self.index == 0 {
            return Err(DhError::ZeroIndex);
        }
        match self.fields().into_iter().find(|(_, v)| !v.is_finite()) {
            Some((field, value)) => Err(DhError::InvalidParameter {
                index: self.index,
                field,
                value,
            }),
            None => Ok(()),
        }
    }

    /// Name of the link this parameter set creates.
    pub fn link_name(&self) -> String {
        format!("Link_{}", self.index)
    }
}

/// One editable row of a [`DhTable`]. The link index is derived from the row position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DhRow {
    pub a: f64,
    pub alpha: f64,
    pub d: f64,
    pub theta: f64,
}

impl DhRow {
    pub fn new(a: f64, alpha: f64, d: f64, theta: f64) -> Self {
        Self { a, alpha, d, theta }
    }
}

/// Ordered list of DH rows, as entered by a user or read from a file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DhTable {
    rows: Vec<DhRow>,
}

impl DhTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<DhRow>) -> Self {
        Self { rows }
    }

    /// The 5-link arm used as the reference configuration.
    pub fn reference_arm() -> Self {
        Self::from_rows(vec![
            DhRow::new(0.0, FRAC_PI_2, 0.2, 0.0),
            DhRow::new(0.2, 0.0, 0.0, 0.0),
            DhRow::new(0.2, 0.0, 0.0, 0.0),
            DhRow::new(0.0, FRAC_PI_2, 0.0, 0.0),
            DhRow::new(0.0, 0.0, 0.15, 0.0),
        ])
    }

    /// Appends a zero row and returns its position.
    pub fn push_row(&mut self) -> usize {
        self.push(DhRow::default())
    }

    pub fn push(&mut self, row: DhRow) -> usize {
        self.rows.push(row);
        self.rows.len() - 1
    }

    pub fn remove_row(&mut self, row: usize) -> Result<DhRow, DhError> {
        if row >= self.rows.len() {
            return Err(DhError::RowOutOfRange {
                row,
                len: self.rows.len(),
            });
        }
        Ok(self.rows.remove(row))
    }

    pub fn row_mut(&mut self, row: usize) -> Result<&mut DhRow, DhError> {
        let len = self.rows.len();
        self.rows
            .get_mut(row)
            .ok_or(DhError::RowOutOfRange { row, len })
    }

    pub fn rows(&self) -> &[DhRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Display label of a row ("Link 1", "Link 2", ...).
    pub fn row_label(row: usize) -> String {
        format!("Link {}", row + 1)
    }

    /// Numbers the rows 1..=N in their current order.
    pub fn parameters(&self) -> Vec<DhParameter> {
        self.rows
            .iter()
            .zip(1u32..)
            .map(|(r, index)| DhParameter::new(index, r.a, r.alpha, r.d, r.theta))
            .collect()
    }
}

impl FromIterator<DhRow> for DhTable {
    fn from_iter<I: IntoIterator<Item = DhRow>>(iter: I) -> Self {
        Self::from_rows(iter.into_iter().collect())
    }
}
