//! DH tables stored as TOML or JSON.
//!
//! ```toml
//! length_unit = "m"    # m, cm or mm
//! angle_unit = "rad"   # rad or deg
//!
//! [[link]]
//! alpha = 1.5707963267948966
//! d = 0.2
//!
//! [[link]]
//! a = 0.2
//! ```
//!
//! Missing fields default to zero and a missing `index` to the entry's
//! position, starting at 1.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::DhError;
use crate::params::{DhParameter, DhRow, DhTable};
use crate::units::{AngleUnit, LengthUnit};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DhConfig {
    #[serde(default)]
    pub length_unit: LengthUnit,
    #[serde(default)]
    pub angle_unit: AngleUnit,
    #[serde(default, rename = "link")]
    pub links: Vec<LinkEntry>,
}

/// One `[[link]]` entry, in the units declared by its [`DhConfig`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
    #[serde(default)]
    pub a: f64,
    #[serde(default)]
    pub alpha: f64,
    #[serde(default)]
    pub d: f64,
    #[serde(default)]
    pub theta: f64,
}

fn is_toml_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("toml"))
}

fn is_json_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

impl DhConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, DhError> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_json_str(s: &str) -> Result<Self, DhError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Loads a `.toml` or `.json` file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DhError> {
        let path = path.as_ref();
        let parse: fn(&str) -> Result<Self, DhError> = if is_toml_file(path) {
            Self::from_toml_str
        } else if is_json_file(path) {
            Self::from_json_str
        } else {
            return Err(DhError::UnsupportedFormat(path.display().to_string()));
        };
        let contents = std::fs::read_to_string(path).map_err(|source| DhError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = parse(&contents)?;
        info!(path = %path.display(), links = config.links.len(), "loaded DH table");
        Ok(config)
    }

    /// Writes the table in the same units it was declared with.
    pub fn to_toml_string(&self) -> Result<String, DhError> {
        toml::to_string(self).map_err(|e| DhError::Parse(e.to_string()))
    }

    /// Parameters in meters and radians.
    pub fn parameters(&self) -> Vec<DhParameter> {
        self.links
            .iter()
            .zip(1u32..)
            .map(|(l, position)| {
                DhParameter::new(
                    l.index.unwrap_or(position),
                    self.length_unit.to_meters(l.a),
                    self.angle_unit.to_radians(l.alpha),
                    self.length_unit.to_meters(l.d),
                    self.angle_unit.to_radians(l.theta),
                )
            })
            .collect()
    }

    /// The rows in meters and radians; explicit indices are dropped.
    pub fn table(&self) -> DhTable {
        self.parameters()
            .into_iter()
            .map(|p| DhRow::new(p.a, p.alpha, p.d, p.theta))
            .collect()
    }
}
