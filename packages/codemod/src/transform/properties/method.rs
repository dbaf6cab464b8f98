//! Method property: object-method shorthand (and accessors) becoming a
//! class method, including entries expanded out of an `actions` map.

use crate::js_parser::ast::{ObjectProperty, PropertyKind};
use crate::options::TransformOptions;
use crate::output::output_ast::{
    ClassMember, ClassMethod, DecoratorDescriptor, MethodKind,
};
use crate::runtime_data::RuntimeData;
use crate::transform::decorators::EMBER_OBJECT;
use crate::transform::diagnostics::Diagnostic;
use crate::transform::properties::{BuildOutput, PropertyCore};

#[derive(Debug, Clone, PartialEq)]
pub struct MethodProperty {
    pub core: PropertyCore,
    kind: MethodKind,
    params: Vec<String>,
    body: String,
}

impl MethodProperty {
    pub fn new(
        prop: &ObjectProperty,
        source: &str,
        runtime_data: &RuntimeData,
        options: &TransformOptions,
    ) -> Self {
        Self::build_model(prop, source, runtime_data, options, false)
    }

    /// An entry of an `actions` object; carries an implicit `action`
    /// decorator and checks `overriddenActions`
    pub fn from_action_entry(
        prop: &ObjectProperty,
        source: &str,
        runtime_data: &RuntimeData,
        options: &TransformOptions,
    ) -> Self {
        Self::build_model(prop, source, runtime_data, options, true)
    }

    fn build_model(
        prop: &ObjectProperty,
        source: &str,
        runtime_data: &RuntimeData,
        options: &TransformOptions,
        is_action: bool,
    ) -> Self {
        let mut core = PropertyCore::new(prop, source, runtime_data, options, is_action);

        if is_action {
            core.push_decorator(DecoratorDescriptor::bare("action").from_module(EMBER_OBJECT));
            if core.runtime.is_overridden {
                core.diagnostics.push(Diagnostic::manual_review(
                    &core.name,
                    format!(
                        "[{}]: action overrides one in a parent class - verify the super call",
                        core.name
                    ),
                ));
            }
        }

        let kind = match prop.kind {
            PropertyKind::Get => MethodKind::Getter,
            PropertyKind::Set => MethodKind::Setter,
            _ => MethodKind::Method,
        };

        let (params, body) = match prop.value.as_function() {
            Some(function) => (
                function.params.clone(),
                function.body_span.text(source).to_string(),
            ),
            // Classification guarantees a function value; keep totality anyway
            None => (Vec::new(), "{}".to_string()),
        };

        core.check_decorators_allowed();
        MethodProperty {
            core,
            kind,
            params,
            body,
        }
    }

    pub fn build(&self) -> BuildOutput {
        BuildOutput::members(vec![ClassMember::Method(ClassMethod {
            key: self.core.key.clone(),
            kind: self.kind,
            params: self.params.clone(),
            body: self.body.clone(),
            decorators: self.core.decorators.clone(),
            comments: self.core.comments.clone(),
        })])
    }
}
