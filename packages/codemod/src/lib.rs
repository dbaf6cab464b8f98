/**
 * ember-codemod
 *
 * Rewrites legacy `EmberObject.extend({...})` declarations into native
 * class syntax with decorators, guided by optional runtime metadata
 * gathered by a separate analysis pass.
 */

pub mod chars;
pub mod js_parser;
pub mod options;
pub mod output;
pub mod parse_util;
pub mod runtime_data;
pub mod transform;

// Re-exports
pub use options::{QuoteStyle, TransformOptions};
pub use runtime_data::RuntimeData;
pub use transform::{ModuleTransformResult, ModuleTransformer};
