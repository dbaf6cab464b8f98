//! Property Model Family
//!
//! One typed wrapper per structural variant of a legacy property
//! declaration. Every model shares the same surface: identity accessors,
//! the decorator list, lazy type errors and a deterministic `build()`
//! producing the native-class members (or a class-level decorator).

pub mod actions;
pub mod call_expression;
pub mod class_decorator;
pub mod computed;
pub mod function_expression;
pub mod method;
pub mod simple;

pub use actions::ActionsProperty;
pub use call_expression::CallExpressionProperty;
pub use class_decorator::{ClassDecoratorKind, ClassDecoratorProperty};
pub use computed::{ComputedFunctionProperty, ComputedObjectProperty};
pub use function_expression::FunctionExpressionProperty;
pub use method::MethodProperty;
pub use simple::SimpleProperty;

use crate::js_parser::ast::{Comment, ObjectProperty};
use crate::options::TransformOptions;
use crate::output::output_ast::{
    ClassMember, DecoratorArg, DecoratorDescriptor, DecoratorList, MemberKey,
};
use crate::runtime_data::{PropertyRuntimeData, RuntimeData};
use crate::transform::decorators::{
    import_entry_for, import_spec_for, is_supported_decorator, synthesize_from_runtime,
    DecoratorImportSpecs, EMBER_OBJECT,
};
use crate::transform::diagnostics::Diagnostic;

/// Everything `build()` can produce for one declaration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildOutput {
    pub members: Vec<ClassMember>,
    pub class_decorators: Vec<DecoratorDescriptor>,
}

impl BuildOutput {
    pub fn members(members: Vec<ClassMember>) -> Self {
        BuildOutput {
            members,
            class_decorators: Vec::new(),
        }
    }
}

/// State shared by every variant: identity, runtime facts, the decorator
/// list (existing first, then synthesized) and collected errors/events
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyCore {
    pub key: MemberKey,
    pub name: String,
    pub comments: Vec<Comment>,
    pub runtime: PropertyRuntimeData,
    pub decorators: DecoratorList,
    pub diagnostics: Vec<Diagnostic>,
    pub type_errors: Vec<String>,
    pub options: TransformOptions,
}

impl PropertyCore {
    pub fn new(
        prop: &ObjectProperty,
        source: &str,
        runtime_data: &RuntimeData,
        options: &TransformOptions,
        is_action: bool,
    ) -> Self {
        let runtime = runtime_data.for_property(&prop.key.name, is_action);
        let mut decorators = DecoratorList::new();
        let mut diagnostics = Vec::new();

        // Decorators already on the declaration come first; unsupported
        // ones are dropped, one event each
        for existing in &prop.decorators {
            if is_supported_decorator(&existing.name) {
                let args = existing.args.as_ref().map(|args| {
                    args.iter()
                        .map(|a| DecoratorArg::Source(a.text(source).to_string()))
                        .collect()
                });
                let mut descriptor = DecoratorDescriptor {
                    name: existing.name.clone(),
                    args,
                    requires_import: false,
                    import_source: None,
                };
                if let Some((module, _, _)) = import_entry_for(&existing.name) {
                    descriptor = descriptor.from_module(module);
                }
                decorators.push(descriptor);
            } else {
                diagnostics.push(Diagnostic::ignored_decorator(&prop.key.name, &existing.name));
            }
        }

        let mut core = PropertyCore {
            key: MemberKey {
                name: prop.key.name.clone(),
                quoted: prop.key.quoted,
                computed: prop.key.computed,
            },
            name: prop.key.name.clone(),
            comments: prop.leading_comments.clone(),
            runtime,
            decorators,
            diagnostics,
            type_errors: Vec::new(),
            options: options.clone(),
        };
        for descriptor in synthesize_from_runtime(&core.runtime) {
            core.push_decorator(descriptor);
        }
        core
    }

    /// Append a decorator unless an equivalent name is already present
    pub fn push_decorator(&mut self, descriptor: DecoratorDescriptor) {
        if !self.decorators.iter().any(|d| d.name == descriptor.name) {
            self.decorators.push(descriptor);
        }
    }

    pub fn has_decorators(&self) -> bool {
        !self.decorators.is_empty()
    }

    pub fn decorator_names(&self) -> Vec<String> {
        self.decorators.iter().map(|d| d.name.clone()).collect()
    }

    pub fn has_runtime_data(&self) -> bool {
        self.runtime.has_runtime_data()
    }

    /// Runtime metadata marking this property computed adds a bare
    /// `computed` unless an equivalent decorator already exists
    pub fn apply_runtime_computed(&mut self) {
        if self.runtime.is_computed {
            self.push_decorator(
                DecoratorDescriptor::bare("computed").from_module(EMBER_OBJECT),
            );
        }
    }

    /// Record the decorators-option error when decorators ended up needed
    pub fn check_decorators_allowed(&mut self) {
        if self.has_decorators() && !self.options.decorators {
            self.type_errors.push(format!(
                "[{}]: Transform not supported - need option '--decorators'",
                self.name
            ));
        }
    }

    pub fn validation_error(&mut self, message: String) {
        self.diagnostics
            .push(Diagnostic::validation(&self.name, &message));
        self.type_errors.push(message);
    }

    /// Import spec bits carried by this model's decorator list
    pub fn import_specs(&self) -> DecoratorImportSpecs {
        self.decorators
            .iter()
            .fold(DecoratorImportSpecs::empty(), |acc, d| {
                acc | import_spec_for(&d.name)
            })
    }
}

/// The closed set of property variants. Classification (`classify`) is
/// total: every declaration shape lands in exactly one of these.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyModel {
    Simple(SimpleProperty),
    Method(MethodProperty),
    FunctionExpression(FunctionExpressionProperty),
    ComputedFunction(ComputedFunctionProperty),
    ComputedObject(ComputedObjectProperty),
    Call(CallExpressionProperty),
    Actions(ActionsProperty),
    ClassDecorator(ClassDecoratorProperty),
}

impl PropertyModel {
    pub fn core(&self) -> &PropertyCore {
        match self {
            PropertyModel::Simple(p) => &p.core,
            PropertyModel::Method(p) => &p.core,
            PropertyModel::FunctionExpression(p) => &p.core,
            PropertyModel::ComputedFunction(p) => &p.core,
            PropertyModel::ComputedObject(p) => &p.core,
            PropertyModel::Call(p) => &p.core,
            PropertyModel::Actions(p) => &p.core,
            PropertyModel::ClassDecorator(p) => &p.core,
        }
    }

    pub fn name(&self) -> &str {
        &self.core().name
    }

    pub fn comments(&self) -> &[Comment] {
        &self.core().comments
    }

    /// Syntactically computed key (`[expr]:` form)
    pub fn computed_key(&self) -> bool {
        self.core().key.computed
    }

    pub fn has_runtime_data(&self) -> bool {
        self.core().has_runtime_data()
    }

    pub fn decorators(&self) -> &DecoratorList {
        &self.core().decorators
    }

    pub fn decorator_names(&self) -> Vec<String> {
        self.core().decorator_names()
    }

    pub fn has_decorators(&self) -> bool {
        self.core().has_decorators()
    }

    /// Validation failures; advisory, `build()` still produces output
    pub fn type_errors(&self) -> &[String] {
        match self {
            PropertyModel::Actions(p) => p.type_errors(),
            other => &other.core().type_errors,
        }
    }

    /// Structured events collected while the model was constructed
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        match self {
            PropertyModel::Actions(p) => p.diagnostics(),
            other => other.core().diagnostics.clone(),
        }
    }

    /// Import spec bits this model contributes to the file's fold
    pub fn import_specs(&self) -> DecoratorImportSpecs {
        match self {
            PropertyModel::Actions(p) => p.import_specs(),
            PropertyModel::ClassDecorator(p) => p.import_specs(),
            other => other.core().import_specs(),
        }
    }

    /// Build the native-class output. Pure: building twice yields
    /// structurally identical results.
    pub fn build(&self) -> BuildOutput {
        match self {
            PropertyModel::Simple(p) => p.build(),
            PropertyModel::Method(p) => p.build(),
            PropertyModel::FunctionExpression(p) => p.build(),
            PropertyModel::ComputedFunction(p) => p.build(),
            PropertyModel::ComputedObject(p) => p.build(),
            PropertyModel::Call(p) => p.build(),
            PropertyModel::Actions(p) => p.build(),
            PropertyModel::ClassDecorator(p) => p.build(),
        }
    }
}
