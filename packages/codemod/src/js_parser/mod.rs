//! JavaScript Subset Parser
//!
//! Scanner, AST and recursive-descent parser for the slice of JavaScript
//! the codemod rewrites. Unknown constructs are preserved as raw spans.

pub mod ast;
pub mod lexer;
pub mod parser;

pub use lexer::{Lexer, Token, TokenType};
pub use parser::{ParseModuleResult, Parser};
