//! Static parameter declarations and the values a caller supplies for them.

use std::collections::BTreeMap;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, HydroError};

/// What happens to a value that falls outside its declared bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RangePolicy {
    /// Fail with [`HydroError::InvalidArgument`].
    #[default]
    Reject,
    /// Silently move the value onto the nearest bound.
    Clamp,
}

/// Declaration of one scalar model parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamDecl {
    /// Identifier used as key in [`ParameterValues`].
    pub name: String,
    /// Human readable label shown next to the widget.
    pub label: String,
    /// Semantic unit, e.g. `m3/s`.
    pub unit: String,
    /// Inclusive lower bound.
    pub min: f64,
    /// Inclusive upper bound.
    pub max: f64,
    /// Value used when the caller does not override it.
    pub default: f64,
    /// Widget increment. For log-scale parameters this is the increment of `log10(value)`.
    pub step: f64,
    /// Whether the widget works on `log10(value)`.
    #[serde(default)]
    pub log_scale: bool,
    /// Handling of out-of-range values.
    #[serde(default)]
    pub policy: RangePolicy,
}

impl ParamDecl {
    /// Creates a linear-scale declaration with the rejecting range policy.
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        unit: impl Into<String>,
        (min, max): (f64, f64),
        default: f64,
        step: f64,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            unit: unit.into(),
            min,
            max,
            default,
            step,
            log_scale: false,
            policy: RangePolicy::Reject,
        }
    }

    /// Marks the parameter as driven by a `log10` slider.
    pub fn log_scale(mut self) -> Self {
        self.log_scale = true;
        self
    }

    /// Switches the out-of-range policy to clamping.
    pub fn clamped(mut self) -> Self {
        self.policy = RangePolicy::Clamp;
        self
    }

    /// Checks the declaration itself: finite ordered bounds that bracket the default.
    pub fn validate(&self) -> Result<(), HydroError> {
        let decl_error = |code: &str, message: &str| {
            HydroError::InvalidArgument(
                ErrorInfo::new(code, message)
                    .with_context("param", &self.name)
                    .with_context("min", self.min)
                    .with_context("max", self.max)
                    .with_context("default", self.default),
            )
        };
        if self.name.trim().is_empty() {
            return Err(decl_error("hyd_core.decl_name", "parameter name must not be empty"));
        }
        if !(self.min.is_finite() && self.max.is_finite() && self.default.is_finite()) {
            return Err(decl_error("hyd_core.decl_not_finite", "parameter bounds must be finite"));
        }
        if self.min > self.max {
            return Err(decl_error("hyd_core.decl_bounds", "parameter minimum exceeds maximum"));
        }
        if self.default < self.min || self.default > self.max {
            return Err(decl_error("hyd_core.decl_default", "default lies outside the bounds"));
        }
        if !(self.step > 0.0) {
            return Err(decl_error("hyd_core.decl_step", "slider step must be positive"));
        }
        if self.log_scale && self.min <= 0.0 {
            return Err(decl_error(
                "hyd_core.decl_log_bounds",
                "log-scale parameters need strictly positive bounds",
            ));
        }
        Ok(())
    }

    /// Converts a slider position into a parameter value.
    ///
    /// Log-scale widgets report `log10(value)`; the core always works with the value.
    pub fn from_slider(&self, position: f64) -> f64 {
        if self.log_scale {
            10f64.powf(position)
        } else {
            position
        }
    }

    /// Converts a parameter value into its slider position.
    pub fn to_slider(&self, value: f64) -> f64 {
        if self.log_scale {
            value.log10()
        } else {
            value
        }
    }

    /// Slider range in widget coordinates.
    pub fn slider_range(&self) -> (f64, f64) {
        (self.to_slider(self.min), self.to_slider(self.max))
    }

    /// Applies the range policy to a single value.
    pub fn admit(&self, value: f64) -> Result<f64, HydroError> {
        if !value.is_finite() {
            return Err(HydroError::InvalidArgument(
                ErrorInfo::new("hyd_core.param_not_finite", "parameter value must be finite")
                    .with_context("param", &self.name)
                    .with_context("value", value),
            ));
        }
        if value >= self.min && value <= self.max {
            return Ok(value);
        }
        match self.policy {
            RangePolicy::Clamp => {
                let clamped = value.clamp(self.min, self.max);
                warn!(
                    "parameter {} = {} outside [{}, {}], clamped to {}",
                    self.name, value, self.min, self.max, clamped
                );
                Ok(clamped)
            }
            RangePolicy::Reject => Err(HydroError::InvalidArgument(
                ErrorInfo::new("hyd_core.param_out_of_range", "parameter outside declared bounds")
                    .with_context("param", &self.name)
                    .with_context("value", value)
                    .with_context("min", self.min)
                    .with_context("max", self.max)
                    .with_hint(format!("{} is measured in {}", self.label, self.unit)),
            )),
        }
    }
}

/// Concrete parameter values keyed by declared name.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterValues(BTreeMap<String, f64>);

impl ParameterValues {
    /// Creates an empty set of values.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Builds values from the declared defaults.
    pub fn from_defaults(decls: &[ParamDecl]) -> Self {
        Self(
            decls
                .iter()
                .map(|decl| (decl.name.clone(), decl.default))
                .collect(),
        )
    }

    /// Builds values from widget positions; log-scale positions are `log10(value)`.
    ///
    /// Parameters without a supplied position take their default.
    pub fn from_slider_positions(
        decls: &[ParamDecl],
        positions: &BTreeMap<String, f64>,
    ) -> Result<Self, HydroError> {
        let mut values = Self::from_defaults(decls);
        for (name, position) in positions {
            let decl = decls.iter().find(|decl| &decl.name == name).ok_or_else(|| {
                HydroError::InvalidArgument(
                    ErrorInfo::new("hyd_core.param_unknown", "unknown parameter")
                        .with_context("param", name),
                )
            })?;
            values.set(name.clone(), decl.from_slider(*position));
        }
        Ok(values)
    }

    /// Sets one value, replacing any previous one.
    pub fn set(&mut self, name: impl Into<String>, value: f64) {
        self.0.insert(name.into(), value);
    }

    /// Builder-style variant of [`ParameterValues::set`].
    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.set(name, value);
        self
    }

    /// Returns the value, if present.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    /// Returns the value or NaN when absent, so a missing lookup inside a
    /// formula surfaces as a non-finite result instead of a panic.
    pub fn value(&self, name: &str) -> f64 {
        self.get(name).unwrap_or(f64::NAN)
    }

    /// Iterates over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(name, value)| (name.as_str(), *value))
    }

    /// Number of values held.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when no values are held.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Ensures every declared parameter is present and finite and nothing undeclared is.
    pub fn check_declared(&self, decls: &[ParamDecl]) -> Result<(), HydroError> {
        for name in self.0.keys() {
            if !decls.iter().any(|decl| &decl.name == name) {
                return Err(HydroError::InvalidArgument(
                    ErrorInfo::new("hyd_core.param_unknown", "unknown parameter")
                        .with_context("param", name),
                ));
            }
        }
        for decl in decls {
            match self.get(&decl.name) {
                None => {
                    return Err(HydroError::InvalidArgument(
                        ErrorInfo::new("hyd_core.param_missing", "required parameter missing")
                            .with_context("param", &decl.name)
                            .with_hint(format!("default is {}", decl.default)),
                    ))
                }
                Some(value) if !value.is_finite() => {
                    return Err(HydroError::InvalidArgument(
                        ErrorInfo::new(
                            "hyd_core.param_not_finite",
                            "parameter value must be finite",
                        )
                        .with_context("param", &decl.name)
                        .with_context("value", value),
                    ))
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    /// Applies every declaration's range policy and returns the admitted values.
    pub fn admit(&self, decls: &[ParamDecl]) -> Result<Self, HydroError> {
        self.check_declared(decls)?;
        let mut admitted = BTreeMap::new();
        for decl in decls {
            admitted.insert(decl.name.clone(), decl.admit(self.value(&decl.name))?);
        }
        Ok(Self(admitted))
    }
}

impl FromIterator<(String, f64)> for ParameterValues {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<(&'a str, f64)> for ParameterValues {
    fn from_iter<I: IntoIterator<Item = (&'a str, f64)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
        )
    }
}
