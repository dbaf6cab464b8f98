//! Class-decorator property: declarations that become class-level
//! annotations (`tagName`, `classNames`, `classNameBindings`,
//! `attributeBindings`, `layout`) instead of members.

use crate::js_parser::ast::{Expr, LiteralValue, ObjectProperty};
use crate::options::TransformOptions;
use crate::output::output_ast::{DecoratorArg, DecoratorDescriptor};
use crate::runtime_data::RuntimeData;
use crate::transform::decorators::{DecoratorImportSpecs, EMBER_DECORATORS_COMPONENT};
use crate::transform::properties::{BuildOutput, PropertyCore};

/// Explicit sub-tag so the import aggregator can distinguish the families
/// structurally, without type reflection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassDecoratorKind {
    TagName,
    ClassNames,
    ClassNameBindings,
    AttributeBindings,
    Layout,
}

impl ClassDecoratorKind {
    pub fn from_name(name: &str) -> Option<ClassDecoratorKind> {
        match name {
            "tagName" => Some(ClassDecoratorKind::TagName),
            "classNames" => Some(ClassDecoratorKind::ClassNames),
            "classNameBindings" => Some(ClassDecoratorKind::ClassNameBindings),
            "attributeBindings" => Some(ClassDecoratorKind::AttributeBindings),
            "layout" => Some(ClassDecoratorKind::Layout),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecoratorProperty {
    pub core: PropertyCore,
    kind: ClassDecoratorKind,
    descriptor: DecoratorDescriptor,
}

impl ClassDecoratorProperty {
    pub fn new(
        prop: &ObjectProperty,
        source: &str,
        runtime_data: &RuntimeData,
        options: &TransformOptions,
        kind: ClassDecoratorKind,
    ) -> Self {
        let mut core = PropertyCore::new(prop, source, runtime_data, options, false);

        let descriptor = match kind {
            ClassDecoratorKind::TagName => {
                let arg = match &prop.value {
                    Expr::Literal(lit) => match &lit.value {
                        LiteralValue::Str(s) => DecoratorArg::Str(s.clone()),
                        _ => DecoratorArg::Source(prop.value.text(source).to_string()),
                    },
                    _ => DecoratorArg::Source(prop.value.text(source).to_string()),
                };
                DecoratorDescriptor::invoked("tagName", vec![arg])
                    .from_module(EMBER_DECORATORS_COMPONENT)
            }
            ClassDecoratorKind::ClassNames
            | ClassDecoratorKind::ClassNameBindings
            | ClassDecoratorKind::AttributeBindings => {
                let name = match kind {
                    ClassDecoratorKind::ClassNames => "classNames",
                    ClassDecoratorKind::ClassNameBindings => "classNameBindings",
                    _ => "attributeBindings",
                };
                let args = match &prop.value {
                    Expr::Array(array) => array
                        .elements
                        .iter()
                        .map(|e| DecoratorArg::Source(e.text(source).to_string()))
                        .collect(),
                    other => {
                        let message = format!(
                            "[{}]: expected an array literal value",
                            core.name
                        );
                        core.validation_error(message);
                        vec![DecoratorArg::Source(other.text(source).to_string())]
                    }
                };
                DecoratorDescriptor::invoked(name, args).from_module(EMBER_DECORATORS_COMPONENT)
            }
            ClassDecoratorKind::Layout => {
                // A template imported under the name `layout` collides with
                // the decorator, so the aliased `templateLayout` import is
                // used instead
                let value_is_layout_ident =
                    matches!(&prop.value, Expr::Ident(id) if id.name == "layout");
                let name = if value_is_layout_ident {
                    "templateLayout"
                } else {
                    "layout"
                };
                DecoratorDescriptor::invoked(
                    name,
                    vec![DecoratorArg::Source(prop.value.text(source).to_string())],
                )
                .from_module(EMBER_DECORATORS_COMPONENT)
            }
        };

        core.push_decorator(descriptor.clone());
        core.check_decorators_allowed();
        ClassDecoratorProperty {
            core,
            kind,
            descriptor,
        }
    }

    pub fn kind(&self) -> ClassDecoratorKind {
        self.kind
    }

    /// Sub-kind capability query used by the import aggregator
    pub fn import_specs(&self) -> DecoratorImportSpecs {
        match self.kind {
            ClassDecoratorKind::TagName => DecoratorImportSpecs::TAG_NAME,
            ClassDecoratorKind::ClassNames => DecoratorImportSpecs::CLASS_NAMES,
            ClassDecoratorKind::ClassNameBindings => DecoratorImportSpecs::CLASS_NAME_BINDINGS,
            ClassDecoratorKind::AttributeBindings => DecoratorImportSpecs::ATTRIBUTE_BINDINGS,
            ClassDecoratorKind::Layout => {
                if self.descriptor.name == "templateLayout" {
                    DecoratorImportSpecs::TEMPLATE_LAYOUT
                } else {
                    DecoratorImportSpecs::LAYOUT
                }
            }
        }
    }

    pub fn build(&self) -> BuildOutput {
        BuildOutput {
            members: Vec::new(),
            class_decorators: vec![self.descriptor.clone()],
        }
    }
}
