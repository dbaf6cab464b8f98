/**
 * ember-codemod CLI
 *
 * File selection, runtime-data loading and the parallel per-file driver
 * around the ember-codemod transform.
 */

pub mod config;
pub mod perform_transform;

pub use config::{CliOptions, RuntimeDataStore};
pub use perform_transform::{perform_transform, TransformSummary};
