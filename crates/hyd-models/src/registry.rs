use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

use hyd_core::{ErrorInfo, HydroError};
use log::debug;

use crate::catalog;
use crate::spec::{Formula, ModelSpec, ModelSummary};

/// Lookup table from model identifier to its declaration.
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    models: BTreeMap<String, Arc<ModelSpec>>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every model of the built-in catalogue.
    pub fn builtin() -> Result<Self, HydroError> {
        let mut registry = Self::new();
        for spec in catalog::builtin_models()? {
            registry.register(spec)?;
        }
        debug!("built-in model registry ready with {} models", registry.len());
        Ok(registry)
    }

    /// Adds a model after validating its declaration.
    ///
    /// Registering an identical declaration again is a no-op; a different
    /// declaration under an existing identifier is a conflict.
    pub fn register(&mut self, spec: ModelSpec) -> Result<(), HydroError> {
        spec.validate()?;
        if let Some(existing) = self.models.get(&spec.id) {
            if existing.summary() == spec.summary()
                && same_formula(&existing.formula, &spec.formula)
            {
                debug!("model {} already registered, ignoring", spec.id);
                return Ok(());
            }
            return Err(HydroError::Conflict(
                ErrorInfo::new(
                    "hyd_models.registry_conflict",
                    "model identifier already registered with a different declaration",
                )
                .with_context("model", &spec.id)
                .with_context("existing_kind", existing.formula.kind())
                .with_context("new_kind", spec.formula.kind()),
            ));
        }
        debug!(
            "registered model {} ({} parameters)",
            spec.id,
            spec.params.len()
        );
        self.models.insert(spec.id.clone(), Arc::new(spec));
        Ok(())
    }

    pub fn get(&self, id: &str) -> Result<Arc<ModelSpec>, HydroError> {
        self.models.get(id).cloned().ok_or_else(|| {
            HydroError::NotFound(
                ErrorInfo::new("hyd_models.registry_unknown", "unknown model identifier")
                    .with_context("model", id)
                    .with_hint("run `hydrolab list` for the available models"),
            )
        })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.models.contains_key(id)
    }

    /// Identifiers in lexical order.
    pub fn ids(&self) -> Vec<&str> {
        self.models.keys().map(String::as_str).collect()
    }

    pub fn summaries(&self) -> Vec<ModelSummary> {
        self.models.values().map(|spec| spec.summary()).collect()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

fn same_formula(existing: &Arc<dyn Formula>, new: &Arc<dyn Formula>) -> bool {
    if Arc::ptr_eq(existing, new) {
        return true;
    }
    matches!(
        (existing.fingerprint(), new.fingerprint()),
        (Some(a), Some(b)) if a == b
    )
}

static GLOBAL: OnceLock<Result<ModelRegistry, HydroError>> = OnceLock::new();

/// Process-wide read-only registry of the built-in catalogue, built on first use.
pub fn global() -> Result<&'static ModelRegistry, HydroError> {
    GLOBAL
        .get_or_init(ModelRegistry::builtin)
        .as_ref()
        .map_err(Clone::clone)
}
