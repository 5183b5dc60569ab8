//! Evaluation intervals for independent variables.

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, HydroError};

/// Half-open evaluation interval `[start, end)` of a model's independent variable.
///
/// Query points are admitted on the closed interval `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    /// Inclusive lower bound.
    pub start: f64,
    /// Upper bound; excluded from sampling grids.
    pub end: f64,
}

impl Domain {
    /// Creates a domain after checking that both bounds are finite and ordered.
    pub fn new(start: f64, end: f64) -> Result<Self, HydroError> {
        if !start.is_finite() || !end.is_finite() {
            return Err(HydroError::InvalidArgument(
                ErrorInfo::new("hyd_core.domain_not_finite", "domain bounds must be finite")
                    .with_context("start", start)
                    .with_context("end", end),
            ));
        }
        if start >= end {
            return Err(HydroError::InvalidArgument(
                ErrorInfo::new("hyd_core.domain_empty", "domain start must lie below its end")
                    .with_context("start", start)
                    .with_context("end", end),
            ));
        }
        Ok(Self { start, end })
    }

    /// Width of the interval.
    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    /// Returns `true` when `x` lies on the closed interval.
    pub fn contains(&self, x: f64) -> bool {
        x >= self.start && x <= self.end
    }

    /// Clamps `x` onto the closed interval.
    pub fn clamp(&self, x: f64) -> f64 {
        x.clamp(self.start, self.end)
    }
}
