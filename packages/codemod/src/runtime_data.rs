//! Runtime Metadata Record
//!
//! Facts about a legacy declaration gathered by a separate runtime analysis
//! pass: which properties were computed, observed, overridden or disabled,
//! plus the declaration's observed type. The record is deserialized from
//! JSON, never mutated, and shared by every property model of one file.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct RuntimeData {
    /// Observed runtime type of the declaration (e.g. `Component`).
    /// Absence means no runtime data is available at all.
    #[serde(rename = "type")]
    pub type_: Option<String>,
    pub computed_properties: Vec<String>,
    pub observed_properties: Vec<String>,
    /// Property name → arguments for the synthesized `off` decorator
    pub off_properties: IndexMap<String, Vec<Value>>,
    pub overridden_actions: Vec<String>,
    pub overridden_properties: Vec<String>,
    /// Property name → arguments for the synthesized `unobserves` decorator
    pub unobserved_properties: IndexMap<String, Vec<Value>>,
}

/// The record's facts resolved for one property name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyRuntimeData {
    pub runtime_type: Option<String>,
    pub is_computed: bool,
    pub is_observed: bool,
    pub is_overridden: bool,
    pub unobserve_args: Option<Vec<Value>>,
    pub off_args: Option<Vec<Value>>,
}

impl RuntimeData {
    pub fn from_json(json: &str) -> Result<RuntimeData, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// True when the analysis pass produced anything for this declaration
    pub fn has_data(&self) -> bool {
        self.type_.is_some()
    }

    /// Resolve the record for a single property. For action methods the
    /// overridden flag comes from `overriddenActions` instead of
    /// `overriddenProperties`.
    pub fn for_property(&self, name: &str, is_action: bool) -> PropertyRuntimeData {
        let is_overridden = if is_action {
            self.overridden_actions.iter().any(|n| n == name)
        } else {
            self.overridden_properties.iter().any(|n| n == name)
        };
        PropertyRuntimeData {
            runtime_type: self.type_.clone(),
            is_computed: self.computed_properties.iter().any(|n| n == name),
            is_observed: self.observed_properties.iter().any(|n| n == name),
            is_overridden,
            unobserve_args: self.unobserved_properties.get(name).cloned(),
            off_args: self.off_properties.get(name).cloned(),
        }
    }
}

impl PropertyRuntimeData {
    pub fn has_runtime_data(&self) -> bool {
        self.runtime_type.is_some()
    }
}
