//! Transform Module
//!
//! The property classification and decorator-synthesis subsystem: variant
//! classification, property models, decorator tables, the import spec
//! fold and the per-file orchestration.

pub mod classifier;
pub mod decorators;
pub mod diagnostics;
pub mod error;
pub mod module;
pub mod properties;

pub use classifier::classify;
pub use decorators::DecoratorImportSpecs;
pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use error::TransformError;
pub use module::{aggregate, ModuleTransformResult, ModuleTransformer};
pub use properties::{BuildOutput, PropertyModel};
