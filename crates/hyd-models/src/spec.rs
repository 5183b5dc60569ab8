//! Model declarations: the closed-form function plus its parameters and domain.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use hyd_core::{Domain, ErrorInfo, Guides, HydroError, ParamDecl, ParameterValues, Readout};
use serde::{Deserialize, Serialize};

/// Parameter values that passed declaration checks, normalisation and range
/// policies, together with constants derived from them once per request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedParameters {
    values: ParameterValues,
    derived: BTreeMap<String, f64>,
}

impl ResolvedParameters {
    /// Admitted value of a declared parameter (NaN if undeclared).
    pub fn value(&self, name: &str) -> f64 {
        self.values.value(name)
    }

    /// Constant precomputed by [`Formula::derive`] (NaN if absent).
    pub fn derived(&self, name: &str) -> f64 {
        self.derived.get(name).copied().unwrap_or(f64::NAN)
    }

    /// The admitted values.
    pub fn values(&self) -> &ParameterValues {
        &self.values
    }
}

/// A closed-form expression `y = f(params, x)` and its per-model policies.
///
/// Every method is pure; implementations hold no mutable state.
pub trait Formula: Send + Sync {
    /// Stable name of the expression, used to detect conflicting registrations.
    fn kind(&self) -> &'static str;

    /// Identity of the expression including any constants it carries, compared
    /// when an identifier is registered again. `None` means only the very same
    /// instance counts as identical.
    ///
    /// Stateless formulas are identified by their type.
    fn fingerprint(&self) -> Option<String> {
        (std::mem::size_of_val(self) == 0).then(|| std::any::type_name::<Self>().to_string())
    }

    /// Evaluates the expression. Non-finite results are reported by the caller.
    fn eval(&self, params: &ResolvedParameters, x: f64) -> f64;

    /// Cross-parameter clamping applied before range checks.
    fn normalize(&self, _params: &mut ParameterValues) {}

    /// Cross-parameter constraints checked after range policies.
    fn validate(&self, _params: &ParameterValues) -> Result<(), HydroError> {
        Ok(())
    }

    /// Constants computed once per request (geometry factors, radii, ...).
    fn derive(&self, _params: &ParameterValues) -> Result<BTreeMap<String, f64>, HydroError> {
        Ok(BTreeMap::new())
    }

    /// Domain for these parameters; most models use the static default.
    fn domain(&self, _params: &ResolvedParameters, default: Domain) -> Result<Domain, HydroError> {
        Ok(default)
    }

    /// Scalars printed alongside the plot.
    fn readouts(&self, _params: &ResolvedParameters) -> Result<Vec<Readout>, HydroError> {
        Ok(Vec::new())
    }

    /// Reference lines and shaded regions suggested for the plot.
    fn guides(&self, _params: &ResolvedParameters) -> Guides {
        Guides::default()
    }
}

/// Immutable description of a registered model.
#[derive(Clone)]
pub struct ModelSpec {
    pub id: String,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub params: Vec<ParamDecl>,
    /// Default domain; models with parameter dependent domains report the
    /// domain for their default parameters here.
    pub domain: Domain,
    /// Whether the domain moves with the parameters.
    pub dynamic_domain: bool,
    /// Draw the independent variable on the vertical axis.
    pub transposed: bool,
    pub formula: Arc<dyn Formula>,
}

impl fmt::Debug for ModelSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelSpec")
            .field("id", &self.id)
            .field("kind", &self.formula.kind())
            .field("params", &self.params.len())
            .field("domain", &self.domain)
            .finish_non_exhaustive()
    }
}

/// Serializable view of a [`ModelSpec`] used to build widgets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSummary {
    pub id: String,
    pub kind: String,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub params: Vec<ParamDecl>,
    pub domain: Domain,
    pub dynamic_domain: bool,
    pub transposed: bool,
}

impl ModelSpec {
    /// Starts a declaration with an empty parameter list and a unit domain.
    pub fn new(id: impl Into<String>, title: impl Into<String>, formula: Arc<dyn Formula>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            x_label: "x".into(),
            y_label: "y".into(),
            params: Vec::new(),
            domain: Domain {
                start: 0.0,
                end: 1.0,
            },
            dynamic_domain: false,
            transposed: false,
            formula,
        }
    }

    pub fn axis_labels(mut self, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        self.x_label = x_label.into();
        self.y_label = y_label.into();
        self
    }

    pub fn param(mut self, decl: ParamDecl) -> Self {
        self.params.push(decl);
        self
    }

    /// Sets the static domain; bounds are checked on registration.
    pub fn domain(mut self, start: f64, end: f64) -> Self {
        self.domain = Domain { start, end };
        self
    }

    /// Replaces the static domain with the one resolved for the default
    /// parameters and marks the domain as parameter dependent.
    pub fn with_dynamic_domain(mut self) -> Result<Self, HydroError> {
        let defaults = ParameterValues::from_defaults(&self.params);
        let resolved = self.resolve(&defaults)?;
        self.domain = self.formula.domain(&resolved, self.domain)?;
        self.dynamic_domain = true;
        Ok(self)
    }

    pub fn transposed(mut self) -> Self {
        self.transposed = true;
        self
    }

    /// Checks the declaration before it enters a registry.
    pub fn validate(&self) -> Result<(), HydroError> {
        if self.id.trim().is_empty() {
            return Err(HydroError::invalid(
                "hyd_models.spec_id",
                "model identifier must not be empty",
            ));
        }
        Domain::new(self.domain.start, self.domain.end)
            .map_err(|err| err.with_context("model", &self.id))?;
        for (idx, decl) in self.params.iter().enumerate() {
            decl.validate().map_err(|err| err.with_context("model", &self.id))?;
            if self.params[..idx].iter().any(|other| other.name == decl.name) {
                return Err(HydroError::InvalidArgument(
                    ErrorInfo::new("hyd_models.spec_duplicate_param", "duplicate parameter name")
                        .with_context("model", &self.id)
                        .with_context("param", &decl.name),
                ));
            }
        }
        Ok(())
    }

    /// Runs the parameter pipeline: declaration check, model normalisation,
    /// range policies, cross-parameter constraints and derived constants.
    pub fn resolve(&self, raw: &ParameterValues) -> Result<ResolvedParameters, HydroError> {
        let tag = |err: HydroError| err.with_context("model", &self.id);
        raw.check_declared(&self.params).map_err(tag)?;
        let mut values = raw.clone();
        self.formula.normalize(&mut values);
        let values = values.admit(&self.params).map_err(tag)?;
        self.formula.validate(&values).map_err(tag)?;
        let derived = self.formula.derive(&values).map_err(tag)?;
        Ok(ResolvedParameters { values, derived })
    }

    /// Domain for resolved parameters, re-checked for finiteness and order.
    pub fn domain_for(&self, params: &ResolvedParameters) -> Result<Domain, HydroError> {
        let tag = |err: HydroError| err.with_context("model", &self.id);
        let domain = self.formula.domain(params, self.domain).map_err(tag)?;
        Domain::new(domain.start, domain.end).map_err(tag)
    }

    /// Evaluates the formula at one point.
    pub fn eval(&self, params: &ResolvedParameters, x: f64) -> f64 {
        self.formula.eval(params, x)
    }

    pub fn readouts(&self, params: &ResolvedParameters) -> Result<Vec<Readout>, HydroError> {
        self.formula
            .readouts(params)
            .map_err(|err| err.with_context("model", &self.id))
    }

    pub fn guides(&self, params: &ResolvedParameters) -> Guides {
        self.formula.guides(params)
    }

    pub fn param_decl(&self, name: &str) -> Option<&ParamDecl> {
        self.params.iter().find(|decl| decl.name == name)
    }

    pub fn defaults(&self) -> ParameterValues {
        ParameterValues::from_defaults(&self.params)
    }

    pub fn summary(&self) -> ModelSummary {
        ModelSummary {
            id: self.id.clone(),
            kind: self.formula.kind().to_string(),
            title: self.title.clone(),
            x_label: self.x_label.clone(),
            y_label: self.y_label.clone(),
            params: self.params.clone(),
            domain: self.domain,
            dynamic_domain: self.dynamic_domain,
            transposed: self.transposed,
        }
    }
}
