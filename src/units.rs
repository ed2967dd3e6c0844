//! Units at the input and output boundaries.
//!
//! Chains are always built in meters and radians. Values are converted once,
//! when a table is loaded and when a chain is handed to a host adapter.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LengthUnit {
    #[default]
    #[serde(rename = "m")]
    Meter,
    #[serde(rename = "cm")]
    Centimeter,
    #[serde(rename = "mm")]
    Millimeter,
}

impl LengthUnit {
    pub fn meters_per_unit(self) -> f64 {
        match self {
            LengthUnit::Meter => 1.0,
            LengthUnit::Centimeter => 0.01,
            LengthUnit::Millimeter => 0.001,
        }
    }

    pub fn to_meters(self, value: f64) -> f64 {
        value * self.meters_per_unit()
    }

    pub fn convert_meters(self, value: f64) -> f64 {
        value / self.meters_per_unit()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AngleUnit {
    #[default]
    #[serde(rename = "rad")]
    Radian,
    #[serde(rename = "deg")]
    Degree,
}

impl AngleUnit {
    pub fn to_radians(self, value: f64) -> f64 {
        match self {
            AngleUnit::Radian => value,
            AngleUnit::Degree => value.to_radians(),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn length_conversion_test() {
        assert_relative_eq!(LengthUnit::Centimeter.convert_meters(0.2), 20.0, epsilon = 1e-12);
        assert_relative_eq!(LengthUnit::Millimeter.to_meters(150.0), 0.15, epsilon = 1e-12);
        assert_eq!(LengthUnit::Meter.convert_meters(0.2), 0.2);
        assert_eq!(LengthUnit::default(), LengthUnit::Meter);
    }

    #[test]
    fn angle_conversion_test() {
        assert_relative_eq!(
            AngleUnit::Degree.to_radians(90.0),
            std::f64::consts::FRAC_PI_2,
            epsilon = 1e-12
        );
        assert_eq!(AngleUnit::Radian.to_radians(1.5), 1.5);
    }
}
