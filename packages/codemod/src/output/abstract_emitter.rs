//! Abstract Emitter Module
//!
//! Indentation-tracking line printer the concrete emitters write into.

const INDENT_WITH: &str = "  ";

lazy_static::lazy_static! {
    static ref LEGAL_IDENTIFIER_RE: regex::Regex =
        regex::Regex::new(r"^[a-zA-Z_$][0-9a-zA-Z_$]*$").unwrap();
}

#[derive(Debug, Clone)]
struct EmittedLine {
    parts: Vec<String>,
    indent: usize,
}

impl EmittedLine {
    fn new(indent: usize) -> Self {
        EmittedLine {
            parts: Vec::new(),
            indent,
        }
    }
}

pub struct EmitterVisitorContext {
    lines: Vec<EmittedLine>,
    indent: usize,
}

impl EmitterVisitorContext {
    pub fn create_root() -> Self {
        EmitterVisitorContext::new(0)
    }

    pub fn new(indent: usize) -> Self {
        EmitterVisitorContext {
            lines: vec![EmittedLine::new(indent)],
            indent,
        }
    }

    fn current_line_mut(&mut self) -> &mut EmittedLine {
        self.lines.last_mut().unwrap()
    }

    pub fn line_is_empty(&self) -> bool {
        self.lines.last().map(|l| l.parts.is_empty()).unwrap_or(true)
    }

    pub fn print(&mut self, part: &str) {
        if !part.is_empty() {
            self.current_line_mut().parts.push(part.to_string());
        }
    }

    pub fn println(&mut self, last_part: &str) {
        self.print(last_part);
        self.lines.push(EmittedLine::new(self.indent));
    }

    pub fn remove_empty_last_line(&mut self) {
        if self.line_is_empty() && self.lines.len() > 1 {
            self.lines.pop();
        }
    }

    pub fn inc_indent(&mut self) {
        self.indent += 1;
        if self.line_is_empty() {
            self.current_line_mut().indent = self.indent;
        }
    }

    pub fn dec_indent(&mut self) {
        self.indent -= 1;
        if self.line_is_empty() {
            self.current_line_mut().indent = self.indent;
        }
    }

    pub fn to_source(&self) -> String {
        self.lines
            .iter()
            .map(|l| {
                if !l.parts.is_empty() {
                    format!("{}{}", create_indent(l.indent), l.parts.join(""))
                } else {
                    String::new()
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn create_indent(count: usize) -> String {
    INDENT_WITH.repeat(count)
}

/// True when `name` can be printed without quoting
pub fn is_legal_identifier(name: &str) -> bool {
    LEGAL_IDENTIFIER_RE.is_match(name)
}

/// Escape a synthesized string literal for the given quote character
pub fn escape_string(value: &str, quote: char) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push(quote);
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}
