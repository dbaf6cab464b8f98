//! Transform Options
//!
//! Global options shared by every file of a run.

use serde::{Deserialize, Serialize};

/// Quote style for string literals the emitter synthesizes (imports and
/// decorator arguments). Strings copied from the source keep their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStyle {
    Single,
    Double,
}

impl QuoteStyle {
    pub fn char(&self) -> char {
        match self {
            QuoteStyle::Single => '\'',
            QuoteStyle::Double => '"',
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct TransformOptions {
    /// Allow class fields in the output; object/array literal values and
    /// opaque call values are only legal with this on
    pub class_fields: bool,
    /// Allow decorators in the output; synthesized decorators are only
    /// legal with this on
    pub decorators: bool,
    pub quote: QuoteStyle,
}

impl Default for TransformOptions {
    fn default() -> Self {
        TransformOptions {
            class_fields: true,
            decorators: true,
            quote: QuoteStyle::Single,
        }
    }
}
