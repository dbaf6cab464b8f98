//! Property Variant Classifier
//!
//! Total, deterministic mapping from one legacy property declaration to
//! one property-model variant. Special forms are checked before generic
//! ones; anything unrecognized falls through to the call-expression or
//! simple variant, so no declaration shape is ever dropped.

use crate::js_parser::ast::{CallExpr, Expr, ObjectProperty};
use crate::options::TransformOptions;
use crate::runtime_data::RuntimeData;
use crate::transform::decorators::{classify_callee, KnownCall, COMPUTED_MODIFIERS};
use crate::transform::properties::*;

/// Peel modifier calls (`.readOnly()`, `.volatile()`) off a call chain,
/// innermost call first
fn unwrap_modifier_chain(call: &CallExpr) -> (&CallExpr, Vec<String>) {
    let mut modifiers = Vec::new();
    let mut current = call;
    loop {
        match current.callee.as_ref() {
            Expr::Member(member)
                if !member.computed
                    && COMPUTED_MODIFIERS.contains(&member.property.as_str()) =>
            {
                if let Expr::Call(inner) = member.object.as_ref() {
                    modifiers.push(member.property.clone());
                    current = inner;
                    continue;
                }
                break;
            }
            _ => break,
        }
    }
    modifiers.reverse();
    (current, modifiers)
}

/// Classify one declaration into its property-model variant
pub fn classify(
    prop: &ObjectProperty,
    source: &str,
    runtime_data: &RuntimeData,
    options: &TransformOptions,
) -> PropertyModel {
    // 1. A known computed macro whose final argument is a function or a
    //    get/set object map
    if let Expr::Call(call) = &prop.value {
        let (inner, modifiers) = unwrap_modifier_chain(call);
        if let Some(path) = inner.callee.dotted_path() {
            match classify_callee(&path) {
                KnownCall::Computed => {
                    if let Some(last) = inner.args.last() {
                        if last.is_function() {
                            return PropertyModel::ComputedFunction(
                                ComputedFunctionProperty::new(
                                    prop, source, runtime_data, options, inner, false,
                                    &modifiers,
                                ),
                            );
                        }
                        if last.is_object() {
                            return PropertyModel::ComputedObject(ComputedObjectProperty::new(
                                prop, source, runtime_data, options, inner, &modifiers,
                            ));
                        }
                    }
                }
                KnownCall::Observer => {
                    if inner.args.last().map(|a| a.is_function()).unwrap_or(false) {
                        return PropertyModel::ComputedFunction(ComputedFunctionProperty::new(
                            prop, source, runtime_data, options, inner, true, &modifiers,
                        ));
                    }
                }
                _ => {}
            }
        }
    }

    // 2. Object-method shorthand, accessors included
    if prop.is_method_shorthand() {
        return PropertyModel::Method(MethodProperty::new(prop, source, runtime_data, options));
    }

    // 3. A plain function expression
    if prop.value.is_function() {
        return PropertyModel::FunctionExpression(FunctionExpressionProperty::new(
            prop, source, runtime_data, options,
        ));
    }

    // 4. Fixed class-level behavior names
    if !prop.key.computed {
        if let Some(kind) = ClassDecoratorKind::from_name(prop.name()) {
            return PropertyModel::ClassDecorator(ClassDecoratorProperty::new(
                prop, source, runtime_data, options, kind,
            ));
        }
    }

    // 5. The actions map
    if prop.name() == "actions" && prop.value.is_object() && !prop.key.computed {
        return PropertyModel::Actions(ActionsProperty::new(prop, source, runtime_data, options));
    }

    // 6. Any other call expression
    if let Expr::Call(call) = &prop.value {
        let (inner, modifiers) = unwrap_modifier_chain(call);
        return PropertyModel::Call(CallExpressionProperty::new(
            prop, source, runtime_data, options, inner, &modifiers,
        ));
    }

    // 7. Everything else is a plain value
    PropertyModel::Simple(SimpleProperty::new(prop, source, runtime_data, options))
}
