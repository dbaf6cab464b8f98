//! Parse Utilities
//!
//! Source locations, spans and recoverable parse diagnostics shared by the
//! scanner, the parser and the transform layer.

use serde::{Deserialize, Serialize};

/// A source file handed to the parser
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParseSourceFile {
    pub content: String,
    pub url: String,
}

impl ParseSourceFile {
    pub fn new(content: String, url: String) -> Self {
        ParseSourceFile { content, url }
    }
}

/// A position inside a source file
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParseLocation {
    pub offset: usize,
    pub line: usize,
    pub col: usize,
}

impl ParseLocation {
    pub fn new(offset: usize, line: usize, col: usize) -> Self {
        ParseLocation { offset, line, col }
    }

    pub fn describe(&self, url: &str) -> String {
        format!("{}@{}:{}", url, self.line, self.col)
    }
}

/// A half-open byte range of a source file with line/col endpoints
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParseSourceSpan {
    pub start: ParseLocation,
    pub end: ParseLocation,
}

impl ParseSourceSpan {
    pub fn new(start: ParseLocation, end: ParseLocation) -> Self {
        ParseSourceSpan { start, end }
    }

    /// The original text covered by this span
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        let end = self.end.offset.min(source.len());
        let start = self.start.offset.min(end);
        &source[start..end]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParseErrorLevel {
    Warning,
    Error,
}

/// A recoverable error produced while scanning or parsing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseError {
    pub span: ParseSourceSpan,
    pub msg: String,
    pub level: ParseErrorLevel,
}

impl ParseError {
    pub fn new(span: ParseSourceSpan, msg: impl Into<String>) -> Self {
        ParseError {
            span,
            msg: msg.into(),
            level: ParseErrorLevel::Error,
        }
    }

    pub fn warning(span: ParseSourceSpan, msg: impl Into<String>) -> Self {
        ParseError {
            span,
            msg: msg.into(),
            level: ParseErrorLevel::Warning,
        }
    }

    /// Render the error with up to `max_chars` of surrounding source
    pub fn contextual_message(&self, source: &str, max_chars: usize) -> String {
        let offset = self.span.start.offset.min(source.len());
        let before_start = offset.saturating_sub(max_chars);
        let after_end = (offset + max_chars).min(source.len());
        let before = source
            .get(before_start..offset)
            .unwrap_or("")
            .rsplit('\n')
            .next()
            .unwrap_or("");
        let after = source
            .get(offset..after_end)
            .unwrap_or("")
            .split('\n')
            .next()
            .unwrap_or("");
        let level_str = match self.level {
            ParseErrorLevel::Warning => "WARNING",
            ParseErrorLevel::Error => "ERROR",
        };
        format!("{} (\"{}[{} ->]{}\")", self.msg, before, level_str, after)
    }

    pub fn describe(&self, url: &str) -> String {
        format!("{}: {}", self.msg, self.span.start.describe(url))
    }
}
