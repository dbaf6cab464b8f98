//! Computed-call properties: `computed(...deps, fn)` and the object form
//! `computed(...deps, { get, set })`, plus `observer(...deps, fn)` which
//! follows the function-bodied path with an `observes` decorator.

use crate::js_parser::ast::{CallExpr, Expr, ObjectProperty};
use crate::options::TransformOptions;
use crate::output::output_ast::{
    ClassMember, ClassMethod, DecoratorArg, DecoratorDescriptor, MethodKind,
};
use crate::runtime_data::RuntimeData;
use crate::transform::decorators::{
    import_entry_for, EMBER_DECORATORS_OBJECT, EMBER_OBJECT,
};
use crate::transform::properties::{BuildOutput, PropertyCore};

/// Dependent-key arguments (everything before the trailing function or
/// object) as verbatim source text
fn dependent_keys(call: &CallExpr, source: &str) -> Vec<String> {
    let count = call.args.len().saturating_sub(1);
    call.args[..count]
        .iter()
        .map(|a| a.text(source).to_string())
        .collect()
}

fn macro_decorator(
    is_observer: bool,
    deps: &[String],
) -> DecoratorDescriptor {
    if is_observer {
        DecoratorDescriptor::invoked(
            "observes",
            deps.iter().map(|d| DecoratorArg::Source(d.clone())).collect(),
        )
        .from_module(EMBER_DECORATORS_OBJECT)
    } else if deps.is_empty() {
        DecoratorDescriptor::bare("computed").from_module(EMBER_OBJECT)
    } else {
        DecoratorDescriptor::invoked(
            "computed",
            deps.iter().map(|d| DecoratorArg::Source(d.clone())).collect(),
        )
        .from_module(EMBER_OBJECT)
    }
}

fn push_modifiers(core: &mut PropertyCore, modifiers: &[String]) {
    for modifier in modifiers {
        let mut descriptor = DecoratorDescriptor::bare(modifier.clone());
        if let Some((module, _, _)) = import_entry_for(modifier) {
            descriptor = descriptor.from_module(module);
        }
        core.push_decorator(descriptor);
    }
}

/// `computed('a', 'b', function() { ... })` → decorated getter;
/// `observer('a', function() { ... })` → decorated method
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedFunctionProperty {
    pub core: PropertyCore,
    is_observer: bool,
    params: Vec<String>,
    body: String,
}

impl ComputedFunctionProperty {
    pub fn new(
        prop: &ObjectProperty,
        source: &str,
        runtime_data: &RuntimeData,
        options: &TransformOptions,
        call: &CallExpr,
        is_observer: bool,
        modifiers: &[String],
    ) -> Self {
        let mut core = PropertyCore::new(prop, source, runtime_data, options, false);
        let deps = dependent_keys(call, source);
        core.push_decorator(macro_decorator(is_observer, &deps));
        push_modifiers(&mut core, modifiers);

        let (params, body) = match call.args.last().and_then(|a| a.as_function()) {
            Some(function) => (
                function.params.clone(),
                function.body_span.text(source).to_string(),
            ),
            None => (Vec::new(), "{}".to_string()),
        };

        core.check_decorators_allowed();
        ComputedFunctionProperty {
            core,
            is_observer,
            params,
            body,
        }
    }

    pub fn build(&self) -> BuildOutput {
        let kind = if self.is_observer {
            MethodKind::Method
        } else {
            MethodKind::Getter
        };
        BuildOutput::members(vec![ClassMember::Method(ClassMethod {
            key: self.core.key.clone(),
            kind,
            params: self.params.clone(),
            body: self.body.clone(),
            decorators: self.core.decorators.clone(),
            comments: self.core.comments.clone(),
        })])
    }
}

/// One accessor recovered from the trailing object argument
#[derive(Debug, Clone, PartialEq)]
struct Accessor {
    kind: MethodKind,
    params: Vec<String>,
    body: String,
}

/// `computed('a', { get() { ... }, set(value) { ... } })` → getter/setter
/// pair; the decorator list rides on the first emitted accessor
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedObjectProperty {
    pub core: PropertyCore,
    accessors: Vec<Accessor>,
}

impl ComputedObjectProperty {
    pub fn new(
        prop: &ObjectProperty,
        source: &str,
        runtime_data: &RuntimeData,
        options: &TransformOptions,
        call: &CallExpr,
        modifiers: &[String],
    ) -> Self {
        let mut core = PropertyCore::new(prop, source, runtime_data, options, false);
        let deps = dependent_keys(call, source);
        core.push_decorator(macro_decorator(false, &deps));
        push_modifiers(&mut core, modifiers);

        let mut accessors = Vec::new();
        if let Some(Expr::Object(object)) = call.args.last() {
            for entry in &object.properties {
                let kind = match entry.name() {
                    "get" => MethodKind::Getter,
                    "set" => MethodKind::Setter,
                    other => {
                        let message = format!(
                            "[{}]: computed object form supports only 'get' and 'set', found '{}'",
                            core.name, other
                        );
                        core.validation_error(message);
                        continue;
                    }
                };
                match entry.value.as_function() {
                    Some(function) => accessors.push(Accessor {
                        kind,
                        params: function.params.clone(),
                        body: function.body_span.text(source).to_string(),
                    }),
                    None => {
                        let message = format!(
                            "[{}]: computed '{}' entry must be a function",
                            core.name,
                            entry.name()
                        );
                        core.validation_error(message);
                    }
                }
            }
        }

        core.check_decorators_allowed();
        ComputedObjectProperty { core, accessors }
    }

    pub fn build(&self) -> BuildOutput {
        let members = self
            .accessors
            .iter()
            .enumerate()
            .map(|(i, accessor)| {
                let decorators = if i == 0 {
                    self.core.decorators.clone()
                } else {
                    Default::default()
                };
                let comments = if i == 0 {
                    self.core.comments.clone()
                } else {
                    Vec::new()
                };
                ClassMember::Method(ClassMethod {
                    key: self.core.key.clone(),
                    kind: accessor.kind,
                    params: accessor.params.clone(),
                    body: accessor.body.clone(),
                    decorators,
                    comments,
                })
            })
            .collect();
        BuildOutput::members(members)
    }
}
