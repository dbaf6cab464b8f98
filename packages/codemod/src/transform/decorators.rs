//! Decorator Synthesizer Tables
//!
//! The decorator knowledge of the transform: which annotations exist, where
//! they are imported from, which call-expression macros map to them, and
//! the fixed-shape import spec set accumulated across a file's properties.

use bitflags::bitflags;
use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::output::output_ast::{DecoratorArg, DecoratorDescriptor, DecoratorList};
use crate::runtime_data::PropertyRuntimeData;

pub const EMBER_OBJECT: &str = "@ember/object";
pub const EMBER_OBJECT_COMPUTED: &str = "@ember/object/computed";
pub const EMBER_DECORATORS_COMPONENT: &str = "@ember-decorators/component";
pub const EMBER_DECORATORS_OBJECT: &str = "@ember-decorators/object";
pub const EMBER_SERVICE: &str = "@ember/service";
pub const EMBER_CONTROLLER: &str = "@ember/controller";

bitflags! {
    /// One bit per well-known annotation family that needs a new import
    /// statement. Accumulated by logical OR across all property models of
    /// a file; the fold is associative, commutative and idempotent.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct DecoratorImportSpecs: u16 {
        const ACTION              = 1 << 0;
        const CLASS_NAMES         = 1 << 1;
        const CLASS_NAME_BINDINGS = 1 << 2;
        const ATTRIBUTE_BINDINGS  = 1 << 3;
        const LAYOUT              = 1 << 4;
        const TEMPLATE_LAYOUT     = 1 << 5;
        const OFF                 = 1 << 6;
        const TAG_NAME            = 1 << 7;
        const UNOBSERVES          = 1 << 8;
    }
}

impl DecoratorImportSpecs {
    /// Decorator names carried by the set bits
    pub fn decorator_names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        for (flag, name) in [
            (DecoratorImportSpecs::ACTION, "action"),
            (DecoratorImportSpecs::CLASS_NAMES, "classNames"),
            (DecoratorImportSpecs::CLASS_NAME_BINDINGS, "classNameBindings"),
            (DecoratorImportSpecs::ATTRIBUTE_BINDINGS, "attributeBindings"),
            (DecoratorImportSpecs::LAYOUT, "layout"),
            (DecoratorImportSpecs::TEMPLATE_LAYOUT, "templateLayout"),
            (DecoratorImportSpecs::OFF, "off"),
            (DecoratorImportSpecs::TAG_NAME, "tagName"),
            (DecoratorImportSpecs::UNOBSERVES, "unobserves"),
        ] {
            if self.contains(flag) {
                names.push(name);
            }
        }
        names
    }
}

/// Import spec bit for a decorator name, empty for decorators outside the
/// well-known families
pub fn import_spec_for(name: &str) -> DecoratorImportSpecs {
    match name {
        "action" => DecoratorImportSpecs::ACTION,
        "classNames" => DecoratorImportSpecs::CLASS_NAMES,
        "classNameBindings" => DecoratorImportSpecs::CLASS_NAME_BINDINGS,
        "attributeBindings" => DecoratorImportSpecs::ATTRIBUTE_BINDINGS,
        "layout" => DecoratorImportSpecs::LAYOUT,
        "templateLayout" => DecoratorImportSpecs::TEMPLATE_LAYOUT,
        "off" => DecoratorImportSpecs::OFF,
        "tagName" => DecoratorImportSpecs::TAG_NAME,
        "unobserves" => DecoratorImportSpecs::UNOBSERVES,
        _ => DecoratorImportSpecs::empty(),
    }
}

/// Computed-property macros that translate one-to-one into decorators from
/// `@ember/object/computed`
pub const COMPUTED_MACROS: &[&str] = &[
    "alias", "and", "bool", "collect", "deprecatingAlias", "empty", "equal", "filter",
    "filterBy", "gt", "gte", "intersect", "lt", "lte", "map", "mapBy", "match", "max", "min",
    "none", "not", "notEmpty", "oneWay", "or", "readOnly", "reads", "setDiff", "sort", "sum",
    "union", "uniq", "uniqBy",
];

/// Modifier calls that may be chained onto a computed macro
pub const COMPUTED_MODIFIERS: &[&str] = &["readOnly", "volatile"];

/// `(module, imported, local)` for every decorator name the transform can
/// import. Aliased entries cover `inject as service` style imports.
static DECORATOR_IMPORTS: Lazy<HashMap<&'static str, (&'static str, &'static str, &'static str)>> =
    Lazy::new(|| {
        let mut m: HashMap<&'static str, (&'static str, &'static str, &'static str)> =
            HashMap::new();
        m.insert("action", (EMBER_OBJECT, "action", "action"));
        m.insert("computed", (EMBER_OBJECT, "computed", "computed"));
        m.insert("service", (EMBER_SERVICE, "inject", "service"));
        m.insert("controller", (EMBER_CONTROLLER, "inject", "controller"));
        m.insert("observes", (EMBER_DECORATORS_OBJECT, "observes", "observes"));
        m.insert("unobserves", (EMBER_DECORATORS_OBJECT, "unobserves", "unobserves"));
        m.insert("off", (EMBER_DECORATORS_OBJECT, "off", "off"));
        m.insert("on", (EMBER_DECORATORS_OBJECT, "on", "on"));
        m.insert("tagName", (EMBER_DECORATORS_COMPONENT, "tagName", "tagName"));
        m.insert("classNames", (EMBER_DECORATORS_COMPONENT, "classNames", "classNames"));
        m.insert(
            "classNameBindings",
            (EMBER_DECORATORS_COMPONENT, "classNameBindings", "classNameBindings"),
        );
        m.insert(
            "attributeBindings",
            (EMBER_DECORATORS_COMPONENT, "attributeBindings", "attributeBindings"),
        );
        m.insert("layout", (EMBER_DECORATORS_COMPONENT, "layout", "layout"));
        m.insert(
            "templateLayout",
            (EMBER_DECORATORS_COMPONENT, "layout", "templateLayout"),
        );
        m.insert("volatile", (EMBER_DECORATORS_OBJECT, "volatile", "volatile"));
        m.insert("tracked", ("@glimmer/tracking", "tracked", "tracked"));
        for name in COMPUTED_MACROS {
            m.insert(name, (EMBER_OBJECT_COMPUTED, name, name));
        }
        m
    });

/// Import entry `(module, imported, local)` for a decorator name
pub fn import_entry_for(name: &str) -> Option<(&'static str, &'static str, &'static str)> {
    DECORATOR_IMPORTS.get(name).copied()
}

/// Whether an existing decorator on a declaration has a supported
/// translation; unsupported ones are dropped with a diagnostic
pub fn is_supported_decorator(name: &str) -> bool {
    DECORATOR_IMPORTS.contains_key(name)
}

/// How the disambiguator reads a call expression's callee
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnownCall {
    /// `computed(...)`, possibly wrapped in modifier calls
    Computed,
    /// `observer(...)`
    Observer,
    /// `service(...)` / `inject.service(...)`
    Service,
    /// `controller(...)` / `inject.controller(...)`
    Controller,
    /// A computed-property macro with a same-name decorator
    Macro(&'static str),
    /// Anything else; stays a plain call value
    Unknown,
}

/// Classify a callee path (`computed`, `inject.service`, `alias`, ...)
pub fn classify_callee(path: &str) -> KnownCall {
    match path {
        "computed" => KnownCall::Computed,
        "observer" => KnownCall::Observer,
        "service" | "inject.service" => KnownCall::Service,
        "controller" | "inject.controller" => KnownCall::Controller,
        _ => {
            if let Some(name) = COMPUTED_MACROS.iter().find(|m| **m == path) {
                KnownCall::Macro(name)
            } else {
                KnownCall::Unknown
            }
        }
    }
}

/// Decorators synthesized purely from the runtime metadata record, in the
/// order the record is consulted: `unobserves`, then `off`
pub fn synthesize_from_runtime(runtime: &PropertyRuntimeData) -> DecoratorList {
    let mut decorators = DecoratorList::new();
    if let Some(args) = &runtime.unobserve_args {
        decorators.push(
            DecoratorDescriptor::invoked(
                "unobserves",
                args.iter().map(DecoratorArg::from_json).collect(),
            )
            .from_module(EMBER_DECORATORS_OBJECT),
        );
    }
    if let Some(args) = &runtime.off_args {
        decorators.push(
            DecoratorDescriptor::invoked(
                "off",
                args.iter().map(DecoratorArg::from_json).collect(),
            )
            .from_module(EMBER_DECORATORS_OBJECT),
        );
    }
    decorators
}
