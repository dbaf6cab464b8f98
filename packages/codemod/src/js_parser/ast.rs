/**
 * JavaScript Subset AST
 *
 * Node types for the slice of JavaScript the codemod understands: module
 * imports, top-level declarations, object literals, function expressions
 * and call expressions. Everything outside the subset is carried as a raw
 * span of the original text so the printer can reproduce it byte for byte.
 */

use serde::{Deserialize, Serialize};
use crate::parse_util::ParseSourceSpan;

/// A comment attached to a node, stored with its markers (`//` or `/* */`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    pub text: String,
    pub block: bool,
    pub span: ParseSourceSpan,
}

/// The key of an object property or class member
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PropertyKey {
    pub name: String,
    /// `'key':` / `"key":` form; the name holds the unquoted value
    pub quoted: bool,
    /// `[expr]:` form; the name holds the raw expression text
    pub computed: bool,
    pub span: ParseSourceSpan,
}

impl PropertyKey {
    pub fn ident(name: impl Into<String>, span: ParseSourceSpan) -> Self {
        PropertyKey {
            name: name.into(),
            quoted: false,
            computed: false,
            span,
        }
    }
}

/// Primitive literal values
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum LiteralValue {
    Str(String),
    Num(f64),
    Bool(bool),
    Null,
    Undefined,
    Regex { pattern: String, flags: String },
}

/// A literal expression; `raw` preserves the exact source text
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Literal {
    pub value: LiteralValue,
    pub raw: String,
    pub span: ParseSourceSpan,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Identifier {
    pub name: String,
    pub span: ParseSourceSpan,
}

/// Dot or bracket member access, e.g. `inject.service` or `CoreObject.extend`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MemberExpr {
    pub object: Box<Expr>,
    /// Property name for dot access, raw index text for bracket access
    pub property: String,
    pub computed: bool,
    pub span: ParseSourceSpan,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CallExpr {
    pub callee: Box<Expr>,
    pub args: Vec<Expr>,
    pub span: ParseSourceSpan,
}

/// A `function` expression; the body is kept as raw source text between
/// (and including) the braces
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunctionExpr {
    pub name: Option<String>,
    /// Raw text of each parameter, in order
    pub params: Vec<String>,
    /// Span of the body block, braces included
    pub body_span: ParseSourceSpan,
    pub span: ParseSourceSpan,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ObjectExpr {
    pub properties: Vec<ObjectProperty>,
    pub span: ParseSourceSpan,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArrayExpr {
    pub elements: Vec<Expr>,
    pub span: ParseSourceSpan,
}

/// An expression outside the understood subset, kept verbatim
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawExpr {
    pub span: ParseSourceSpan,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Expr {
    Literal(Literal),
    Ident(Identifier),
    Member(MemberExpr),
    Call(CallExpr),
    Function(FunctionExpr),
    Object(ObjectExpr),
    Array(ArrayExpr),
    Raw(RawExpr),
}

impl Expr {
    pub fn span(&self) -> ParseSourceSpan {
        match self {
            Expr::Literal(e) => e.span,
            Expr::Ident(e) => e.span,
            Expr::Member(e) => e.span,
            Expr::Call(e) => e.span,
            Expr::Function(e) => e.span,
            Expr::Object(e) => e.span,
            Expr::Array(e) => e.span,
            Expr::Raw(e) => e.span,
        }
    }

    pub fn as_call(&self) -> Option<&CallExpr> {
        match self {
            Expr::Call(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectExpr> {
        match self {
            Expr::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionExpr> {
        match self {
            Expr::Function(f) => Some(f),
            _ => None,
        }
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Expr::Object(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Expr::Array(_))
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Expr::Function(_))
    }

    /// Dotted path of an identifier or member chain (`inject.service`),
    /// None when the chain contains anything else
    pub fn dotted_path(&self) -> Option<String> {
        match self {
            Expr::Ident(id) => Some(id.name.clone()),
            Expr::Member(m) if !m.computed => {
                let mut base = m.object.dotted_path()?;
                base.push('.');
                base.push_str(&m.property);
                Some(base)
            }
            _ => None,
        }
    }

    /// The original source text covered by this expression
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        self.span().text(source)
    }
}

/// How an object property binds its value
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PropertyKind {
    /// `key: value`
    Init,
    /// `key() {}` shorthand
    Method,
    /// `get key() {}`
    Get,
    /// `set key(v) {}`
    Set,
}

/// A decorator already present on a declaration, e.g. `@tracked`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExistingDecorator {
    pub name: String,
    /// None for a bare decorator, Some(args) for `@name(...)`
    pub args: Option<Vec<Expr>>,
    pub span: ParseSourceSpan,
}

/// One entry of an object literal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ObjectProperty {
    pub key: PropertyKey,
    pub kind: PropertyKind,
    pub value: Expr,
    pub decorators: Vec<ExistingDecorator>,
    pub leading_comments: Vec<Comment>,
    pub span: ParseSourceSpan,
}

impl ObjectProperty {
    pub fn name(&self) -> &str {
        &self.key.name
    }

    pub fn is_method_shorthand(&self) -> bool {
        matches!(self.kind, PropertyKind::Method | PropertyKind::Get | PropertyKind::Set)
    }
}

/// `import Default, { a as b } from 'module'`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImportSpecifier {
    pub imported: String,
    pub local: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImportDecl {
    pub source: String,
    pub default: Option<String>,
    pub named: Vec<ImportSpecifier>,
    pub span: ParseSourceSpan,
}

impl ImportDecl {
    pub fn imports_name(&self, local: &str) -> bool {
        self.default.as_deref() == Some(local) || self.named.iter().any(|s| s.local == local)
    }
}

/// `const Name = init` (also let/var), optionally `export`-prefixed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VarDecl {
    pub kind: String,
    pub name: String,
    pub init: Expr,
    pub exported: bool,
    pub leading_comments: Vec<Comment>,
    pub span: ParseSourceSpan,
}

/// `export default expr`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportDefault {
    pub expr: Expr,
    pub leading_comments: Vec<Comment>,
    pub span: ParseSourceSpan,
}

/// A statement outside the understood subset, reprinted verbatim
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawStmt {
    pub span: ParseSourceSpan,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Statement {
    Import(ImportDecl),
    Var(VarDecl),
    ExportDefault(ExportDefault),
    Raw(RawStmt),
}

impl Statement {
    pub fn span(&self) -> ParseSourceSpan {
        match self {
            Statement::Import(s) => s.span,
            Statement::Var(s) => s.span,
            Statement::ExportDefault(s) => s.span,
            Statement::Raw(s) => s.span,
        }
    }
}

/// A parsed module: top-level statements in source order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Module {
    pub statements: Vec<Statement>,
}

impl Module {
    pub fn imports(&self) -> impl Iterator<Item = &ImportDecl> {
        self.statements.iter().filter_map(|s| match s {
            Statement::Import(i) => Some(i),
            _ => None,
        })
    }
}
