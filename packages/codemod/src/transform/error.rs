//! Transform Errors

use thiserror::Error;

/// A failure that prevents a file from being transformed at all. Property
/// level problems are never errors of this kind; they surface as advisory
/// type errors and diagnostics on the result instead.
#[derive(Debug, Clone, Error)]
pub enum TransformError {
    #[error("failed to parse {file}: {message}")]
    Parse { file: String, message: String },
}
