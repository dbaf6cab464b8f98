//! Simple property: a plain value becoming a class field.

use crate::js_parser::ast::{Expr, LiteralValue, ObjectProperty};
use crate::options::TransformOptions;
use crate::output::output_ast::{ClassField, ClassMember};
use crate::runtime_data::RuntimeData;
use crate::transform::properties::{BuildOutput, PropertyCore};

/// Allow-listed property that may keep an object literal default without
/// the class-fields option
const OBJECT_LITERAL_ALLOWED: &str = "queryParams";

#[derive(Debug, Clone, PartialEq)]
pub struct SimpleProperty {
    pub core: PropertyCore,
    value_text: Option<String>,
}

impl SimpleProperty {
    pub fn new(
        prop: &ObjectProperty,
        source: &str,
        runtime_data: &RuntimeData,
        options: &TransformOptions,
    ) -> Self {
        let mut core = PropertyCore::new(prop, source, runtime_data, options, false);

        let needs_class_fields = match &prop.value {
            Expr::Object(_) | Expr::Array(_) => core.name != OBJECT_LITERAL_ALLOWED,
            Expr::Raw(_) => true,
            _ => false,
        };
        if needs_class_fields && !options.class_fields {
            let message = format!(
                "[{}]: Transform not supported - need option '--class-fields'",
                core.name
            );
            core.validation_error(message);
        }

        // `foo: undefined` emits a bare field
        let value_text = match &prop.value {
            Expr::Literal(lit) if lit.value == LiteralValue::Undefined => None,
            value => Some(value.text(source).to_string()),
        };

        core.apply_runtime_computed();
        core.check_decorators_allowed();
        SimpleProperty { core, value_text }
    }

    pub fn build(&self) -> BuildOutput {
        BuildOutput::members(vec![ClassMember::Field(ClassField {
            key: self.core.key.clone(),
            value: self.value_text.clone(),
            decorators: self.core.decorators.clone(),
            comments: self.core.comments.clone(),
        })])
    }
}
