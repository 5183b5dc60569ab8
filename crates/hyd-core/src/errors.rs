//! Structured error types shared across hydrolab crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`HydroError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (model id, parameter name, offending value, ...).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

/// Canonical error type for the curve evaluation pipeline.
///
/// Every failure is scoped to a single request; none of these is fatal to the
/// hosting process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum HydroError {
    /// A parameter, resolution or query point lies outside its declared domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(ErrorInfo),
    /// Unknown model identifier.
    #[error("not found: {0}")]
    NotFound(ErrorInfo),
    /// Conflicting registration for an existing identifier.
    #[error("conflict: {0}")]
    Conflict(ErrorInfo),
    /// Non-finite result or non-convergent numerics.
    #[error("numeric error: {0}")]
    Numeric(ErrorInfo),
    /// Serialization and configuration errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl HydroError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            HydroError::InvalidArgument(info)
            | HydroError::NotFound(info)
            | HydroError::Conflict(info)
            | HydroError::Numeric(info)
            | HydroError::Serde(info) => info,
        }
    }

    /// Shorthand for [`HydroError::InvalidArgument`].
    pub fn invalid(code: &str, message: impl Into<String>) -> Self {
        HydroError::InvalidArgument(ErrorInfo::new(code, message))
    }

    /// Shorthand for [`HydroError::Numeric`].
    pub fn numeric(code: &str, message: impl Into<String>) -> Self {
        HydroError::Numeric(ErrorInfo::new(code, message))
    }

    /// Returns the stable family name used in serialized payloads.
    pub fn family(&self) -> &'static str {
        match self {
            HydroError::InvalidArgument(_) => "InvalidArgument",
            HydroError::NotFound(_) => "NotFound",
            HydroError::Conflict(_) => "Conflict",
            HydroError::Numeric(_) => "Numeric",
            HydroError::Serde(_) => "Serde",
        }
    }

    /// Appends a context entry to the payload of any variant.
    pub fn with_context(self, key: impl Into<String>, value: impl ToString) -> Self {
        match self {
            HydroError::InvalidArgument(info) => {
                HydroError::InvalidArgument(info.with_context(key, value))
            }
            HydroError::NotFound(info) => HydroError::NotFound(info.with_context(key, value)),
            HydroError::Conflict(info) => HydroError::Conflict(info.with_context(key, value)),
            HydroError::Numeric(info) => HydroError::Numeric(info.with_context(key, value)),
            HydroError::Serde(info) => HydroError::Serde(info.with_context(key, value)),
        }
    }
}
