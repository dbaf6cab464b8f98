//! Actions property: the conventional `actions` map, expanded into one
//! `@action`-annotated method per function-valued entry.

use crate::js_parser::ast::{Expr, ObjectProperty};
use crate::options::TransformOptions;
use crate::runtime_data::RuntimeData;
use crate::transform::decorators::DecoratorImportSpecs;
use crate::transform::diagnostics::Diagnostic;
use crate::transform::properties::{BuildOutput, MethodProperty, PropertyCore};

#[derive(Debug, Clone, PartialEq)]
pub struct ActionsProperty {
    pub core: PropertyCore,
    pub methods: Vec<MethodProperty>,
    type_errors: Vec<String>,
}

impl ActionsProperty {
    pub fn new(
        prop: &ObjectProperty,
        source: &str,
        runtime_data: &RuntimeData,
        options: &TransformOptions,
    ) -> Self {
        let mut core = PropertyCore::new(prop, source, runtime_data, options, false);
        let mut methods = Vec::new();

        if let Some(object) = prop.value.as_object() {
            for entry in &object.properties {
                let is_function = entry.is_method_shorthand()
                    || matches!(&entry.value, Expr::Function(_));
                if is_function {
                    methods.push(MethodProperty::from_action_entry(
                        entry,
                        source,
                        runtime_data,
                        options,
                    ));
                } else {
                    // One error per malformed entry; siblings still expand
                    let message = format!(
                        "[{}]: action '{}' must be a function",
                        core.name,
                        entry.name()
                    );
                    core.validation_error(message);
                }
            }
        }

        let mut type_errors = core.type_errors.clone();
        for method in &methods {
            type_errors.extend(method.core.type_errors.iter().cloned());
        }
        ActionsProperty {
            core,
            methods,
            type_errors,
        }
    }

    pub fn type_errors(&self) -> &[String] {
        &self.type_errors
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut events = self.core.diagnostics.clone();
        for method in &self.methods {
            events.extend(method.core.diagnostics.iter().cloned());
        }
        events
    }

    /// The `action` import is only required once at least one method is
    /// actually realized
    pub fn import_specs(&self) -> DecoratorImportSpecs {
        self.methods
            .iter()
            .fold(DecoratorImportSpecs::empty(), |acc, m| {
                acc | m.core.import_specs()
            })
    }

    pub fn build(&self) -> BuildOutput {
        let members = self
            .methods
            .iter()
            .flat_map(|m| m.build().members)
            .collect();
        BuildOutput::members(members)
    }
}
