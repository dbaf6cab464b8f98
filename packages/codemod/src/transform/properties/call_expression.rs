//! Call-expression property: a value that is a function call. Known
//! macros (service/controller injection, computed-property macros) turn
//! into same-name decorators whose annotation supplies the value; an
//! unrecognized call survives as a plain class-field value.

use crate::js_parser::ast::{CallExpr, Expr, LiteralValue, ObjectProperty};
use crate::options::TransformOptions;
use crate::output::output_ast::{ClassField, ClassMember, DecoratorArg, DecoratorDescriptor};
use crate::runtime_data::RuntimeData;
use crate::transform::decorators::{
    classify_callee, import_entry_for, KnownCall, EMBER_CONTROLLER, EMBER_OBJECT_COMPUTED,
    EMBER_SERVICE,
};
use crate::transform::properties::{BuildOutput, PropertyCore};

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpressionProperty {
    pub core: PropertyCore,
    pub kind: KnownCall,
    value_text: String,
}

impl CallExpressionProperty {
    pub fn new(
        prop: &ObjectProperty,
        source: &str,
        runtime_data: &RuntimeData,
        options: &TransformOptions,
        call: &CallExpr,
        modifiers: &[String],
    ) -> Self {
        let mut core = PropertyCore::new(prop, source, runtime_data, options, false);
        let kind = call
            .callee
            .dotted_path()
            .map(|path| classify_callee(&path))
            .unwrap_or(KnownCall::Unknown);

        match kind {
            KnownCall::Service => {
                Self::push_injection(&mut core, call, source, "service", EMBER_SERVICE)
            }
            KnownCall::Controller => {
                Self::push_injection(&mut core, call, source, "controller", EMBER_CONTROLLER)
            }
            KnownCall::Macro(name) => {
                let args = call
                    .args
                    .iter()
                    .map(|a| DecoratorArg::Source(a.text(source).to_string()))
                    .collect();
                core.push_decorator(
                    DecoratorDescriptor::invoked(name, args).from_module(EMBER_OBJECT_COMPUTED),
                );
            }
            // Computed/Observer calls without a trailing function land here
            // as opaque values, same as unknown callees
            _ => {
                if !options.class_fields {
                    let message = format!(
                        "[{}]: Transform not supported - need option '--class-fields'",
                        core.name
                    );
                    core.validation_error(message);
                }
            }
        }

        for modifier in modifiers {
            let mut descriptor = DecoratorDescriptor::bare(modifier.clone());
            if let Some((module, _, _)) = import_entry_for(modifier) {
                descriptor = descriptor.from_module(module);
            }
            core.push_decorator(descriptor);
        }

        core.check_decorators_allowed();
        CallExpressionProperty {
            core,
            kind,
            value_text: prop.value.text(source).to_string(),
        }
    }

    /// `service()` and `service('name')` become `@service`; an explicit
    /// name differing from the property name is kept as an argument
    fn push_injection(
        core: &mut PropertyCore,
        call: &CallExpr,
        source: &str,
        decorator: &str,
        module: &str,
    ) {
        let elide = match call.args.as_slice() {
            [] => true,
            [Expr::Literal(lit)] => matches!(&lit.value, LiteralValue::Str(s) if *s == core.name),
            _ => false,
        };
        let descriptor = if elide {
            DecoratorDescriptor::bare(decorator)
        } else {
            DecoratorDescriptor::invoked(
                decorator,
                call.args
                    .iter()
                    .map(|a| DecoratorArg::Source(a.text(source).to_string()))
                    .collect(),
            )
        };
        core.push_decorator(descriptor.from_module(module));
    }

    pub fn build(&self) -> BuildOutput {
        // When the annotation supplies the value the field goes bare
        let value = if self.core.has_decorators() {
            None
        } else {
            Some(self.value_text.clone())
        };
        BuildOutput::members(vec![ClassMember::Field(ClassField {
            key: self.core.key.clone(),
            value,
            decorators: self.core.decorators.clone(),
            comments: self.core.comments.clone(),
        })])
    }
}
