//! Presentation hints a model can attach to its curve.

use serde::{Deserialize, Serialize};

/// Scalar derived from the parameters and printed next to the plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Readout {
    /// Stable key, e.g. `culmination_point`.
    pub name: String,
    /// Human readable label.
    pub label: String,
    /// Unit of the value.
    pub unit: String,
    /// Computed value.
    pub value: f64,
}

impl Readout {
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        unit: impl Into<String>,
        value: f64,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            unit: unit.into(),
            value,
        }
    }
}

/// Horizontal threshold drawn across the whole x range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceLine {
    pub label: String,
    pub y: f64,
}

/// One side of a shaded band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ShadeBound {
    /// The sampled curve itself.
    Curve,
    /// A constant level such as a precipitation rate or the zero baseline.
    Constant(f64),
}

/// Band between two bounds, evaluated pointwise on the sampling grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShadeRule {
    pub label: String,
    pub upper: ShadeBound,
    pub lower: ShadeBound,
    /// Restrict the band to grid points where `upper > lower`.
    #[serde(default)]
    pub only_where_exceeds: bool,
}

impl ShadeRule {
    /// Fills between the curve and the zero baseline.
    pub fn under_curve(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            upper: ShadeBound::Curve,
            lower: ShadeBound::Constant(0.0),
            only_where_exceeds: false,
        }
    }

    /// Fills between a constant level and the curve wherever the level lies above it.
    pub fn level_exceeds_curve(label: impl Into<String>, level: f64) -> Self {
        Self {
            label: label.into(),
            upper: ShadeBound::Constant(level),
            lower: ShadeBound::Curve,
            only_where_exceeds: true,
        }
    }
}

/// Reference lines and shaded regions suggested by a model.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Guides {
    #[serde(default)]
    pub lines: Vec<ReferenceLine>,
    #[serde(default)]
    pub shades: Vec<ShadeRule>,
}
