//! Closed-form hydrology models, the special functions they rely on and the
//! registry that maps model identifiers to their declarations.

pub mod catalog;
pub mod quad;
pub mod registry;
pub mod special;
pub mod spec;

pub use quad::{integrate, QuadOptions, QuadOutcome};
pub use registry::{global, ModelRegistry};
pub use spec::{Formula, ModelSpec, ModelSummary, ResolvedParameters};
