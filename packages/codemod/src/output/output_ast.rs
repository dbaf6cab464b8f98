//! Output AST Module
//!
//! Node types for the rewritten module: the native class, its members and
//! the decorators attached to them. Values and bodies are carried as
//! verbatim source text where they came from the input file, so the
//! printer reproduces them byte for byte; only synthesized pieces (imports
//! and decorator arguments from runtime metadata) are rendered from
//! structured values.

use serde_json::Value;
use smallvec::SmallVec;

use crate::js_parser::ast::Comment;

//// Decorators

/// One positional decorator argument
#[derive(Debug, Clone, PartialEq)]
pub enum DecoratorArg {
    /// Verbatim text copied from the source file
    Source(String),
    /// A synthesized string literal, quoted per the quote option
    Str(String),
    Num(f64),
    Bool(bool),
    Null,
}

impl DecoratorArg {
    /// Convert a JSON literal from the runtime metadata record
    pub fn from_json(value: &Value) -> DecoratorArg {
        match value {
            Value::String(s) => DecoratorArg::Str(s.clone()),
            Value::Number(n) => DecoratorArg::Num(n.as_f64().unwrap_or(0.0)),
            Value::Bool(b) => DecoratorArg::Bool(*b),
            _ => DecoratorArg::Null,
        }
    }
}

/// A named annotation to attach to a member or to the class itself
#[derive(Debug, Clone, PartialEq)]
pub struct DecoratorDescriptor {
    pub name: String,
    /// None renders a bare `@name`, Some renders `@name(args...)`
    pub args: Option<Vec<DecoratorArg>>,
    /// True when the annotation needs a companion import statement
    pub requires_import: bool,
    /// Module the annotation is imported from, when `requires_import`
    pub import_source: Option<String>,
}

impl DecoratorDescriptor {
    pub fn bare(name: impl Into<String>) -> Self {
        DecoratorDescriptor {
            name: name.into(),
            args: None,
            requires_import: false,
            import_source: None,
        }
    }

    pub fn invoked(name: impl Into<String>, args: Vec<DecoratorArg>) -> Self {
        DecoratorDescriptor {
            name: name.into(),
            args: Some(args),
            requires_import: false,
            import_source: None,
        }
    }

    pub fn from_module(mut self, source: impl Into<String>) -> Self {
        self.requires_import = true;
        self.import_source = Some(source.into());
        self
    }

    pub fn is_equivalent(&self, other: &DecoratorDescriptor) -> bool {
        self.name == other.name && self.args == other.args
    }
}

pub type DecoratorList = SmallVec<[DecoratorDescriptor; 2]>;

//// Class members

/// Key of an emitted class member
#[derive(Debug, Clone, PartialEq)]
pub struct MemberKey {
    pub name: String,
    pub quoted: bool,
    /// `[name]` form; the name holds the raw expression text
    pub computed: bool,
}

impl MemberKey {
    pub fn ident(name: impl Into<String>) -> Self {
        MemberKey {
            name: name.into(),
            quoted: false,
            computed: false,
        }
    }
}

/// `key = value;` (or `key;` when the decorator supplies the value)
#[derive(Debug, Clone, PartialEq)]
pub struct ClassField {
    pub key: MemberKey,
    /// Verbatim source text of the value; None emits a bare field
    pub value: Option<String>,
    pub decorators: DecoratorList,
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    Method,
    Getter,
    Setter,
}

/// `key(params) { ... }`, `get key() { ... }` or `set key(v) { ... }`;
/// the body is verbatim source text, braces included
#[derive(Debug, Clone, PartialEq)]
pub struct ClassMethod {
    pub key: MemberKey,
    pub kind: MethodKind,
    pub params: Vec<String>,
    pub body: String,
    pub decorators: DecoratorList,
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClassMember {
    Field(ClassField),
    Method(ClassMethod),
}

impl ClassMember {
    pub fn key(&self) -> &MemberKey {
        match self {
            ClassMember::Field(f) => &f.key,
            ClassMember::Method(m) => &m.key,
        }
    }

    pub fn decorators(&self) -> &DecoratorList {
        match self {
            ClassMember::Field(f) => &f.decorators,
            ClassMember::Method(m) => &m.decorators,
        }
    }
}

//// The class

/// The emitted native class replacing one legacy declaration
#[derive(Debug, Clone, PartialEq)]
pub struct ClassNode {
    pub name: String,
    /// Verbatim heritage text, e.g. `Component` or `Component.extend(Foo)`
    pub superclass: Option<String>,
    pub decorators: Vec<DecoratorDescriptor>,
    pub members: Vec<ClassMember>,
    pub export_default: bool,
    pub comments: Vec<Comment>,
}

//// Imports

/// An import statement to synthesize or rewrite
#[derive(Debug, Clone, PartialEq)]
pub struct ImportStatement {
    pub source: String,
    pub default: Option<String>,
    /// (imported, local) pairs, emitted `imported as local` when distinct
    pub named: Vec<(String, String)>,
}

impl ImportStatement {
    pub fn named_only(source: impl Into<String>, named: Vec<(String, String)>) -> Self {
        ImportStatement {
            source: source.into(),
            default: None,
            named,
        }
    }
}
