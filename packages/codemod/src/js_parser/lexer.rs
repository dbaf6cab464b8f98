/**
 * JavaScript Subset Lexer
 *
 * Tokenizes a source file for the module parser. Comments are collected
 * with their spans instead of being discarded so the printer can keep them.
 */

use serde::{Deserialize, Serialize};

use crate::chars;
use crate::js_parser::ast::Comment;
use crate::parse_util::{ParseLocation, ParseSourceSpan};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenType {
    Character,
    Identifier,
    Keyword,
    String,
    Template,
    Operator,
    Number,
    Regex,
    Error,
}

/// A scanned token; `str_value` holds the cooked value for strings and the
/// raw text for templates and regexes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub start: ParseLocation,
    pub end: ParseLocation,
    pub token_type: TokenType,
    pub num_value: f64,
    pub str_value: String,
}

impl Token {
    pub fn new(
        start: ParseLocation,
        end: ParseLocation,
        token_type: TokenType,
        num_value: f64,
        str_value: String,
    ) -> Self {
        Token {
            start,
            end,
            token_type,
            num_value,
            str_value,
        }
    }

    pub fn span(&self) -> ParseSourceSpan {
        ParseSourceSpan::new(self.start, self.end)
    }

    pub fn is_character(&self, code: char) -> bool {
        self.token_type == TokenType::Character && self.str_value.chars().next() == Some(code)
    }

    pub fn is_identifier(&self) -> bool {
        self.token_type == TokenType::Identifier
    }

    pub fn is_keyword(&self, kw: &str) -> bool {
        self.token_type == TokenType::Keyword && self.str_value == kw
    }

    pub fn is_any_keyword(&self) -> bool {
        self.token_type == TokenType::Keyword
    }

    pub fn is_string(&self) -> bool {
        self.token_type == TokenType::String
    }

    pub fn is_template(&self) -> bool {
        self.token_type == TokenType::Template
    }

    pub fn is_number(&self) -> bool {
        self.token_type == TokenType::Number
    }

    pub fn is_regex(&self) -> bool {
        self.token_type == TokenType::Regex
    }

    pub fn is_operator(&self, operator: &str) -> bool {
        self.token_type == TokenType::Operator && self.str_value == operator
    }

    pub fn is_error(&self) -> bool {
        self.token_type == TokenType::Error
    }
}

/// Result of scanning a whole file
#[derive(Debug, Clone)]
pub struct ScanResult {
    pub tokens: Vec<Token>,
    pub comments: Vec<Comment>,
}

pub struct Lexer;

impl Lexer {
    pub fn new() -> Self {
        Lexer
    }

    pub fn tokenize(&self, text: &str) -> ScanResult {
        Scanner::new(text).scan()
    }
}

impl Default for Lexer {
    fn default() -> Self {
        Lexer::new()
    }
}

const KEYWORDS: &[&str] = &[
    "import", "export", "default", "from", "const", "let", "var", "function", "return", "new",
    "null", "undefined", "true", "false", "this", "typeof", "in", "of", "class", "extends",
    "async", "await", "if", "else", "for", "while", "switch", "case", "break", "continue",
    "throw", "try", "catch", "finally", "delete", "instanceof", "void", "yield", "static",
];

/// Multi-character operators, longest first within each leading character
const OPERATORS: &[&str] = &[
    ">>>=", "===", "!==", "**=", "...", ">>>", "<<=", ">>=", "&&=", "||=", "??=", "=>", "==",
    "!=", "<=", ">=", "&&", "||", "??", "?.", "++", "--", "+=", "-=", "*=", "/=", "%=", "**",
    "<<", ">>", "&=", "|=", "^=", "+", "-", "*", "/", "%", "=", "<", ">", "!", "&", "|", "^",
    "~", "?",
];

struct Scanner<'a> {
    input: &'a str,
    length: usize,
    index: usize,
    line: usize,
    col: usize,
    peek: char,
    tokens: Vec<Token>,
    comments: Vec<Comment>,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        let peek = input.chars().next().unwrap_or(chars::EOF);
        Scanner {
            input,
            length: input.len(),
            index: 0,
            line: 1,
            col: 0,
            peek,
            tokens: Vec::new(),
            comments: Vec::new(),
        }
    }

    fn scan(mut self) -> ScanResult {
        while let Some(token) = self.scan_token() {
            self.tokens.push(token);
        }
        ScanResult {
            tokens: self.tokens,
            comments: self.comments,
        }
    }

    fn location(&self) -> ParseLocation {
        ParseLocation::new(self.index, self.line, self.col)
    }

    fn advance(&mut self) {
        if self.peek == chars::NEWLINE {
            self.line += 1;
            self.col = 0;
        } else {
            self.col += 1;
        }
        self.index += self.peek.len_utf8();
        self.peek = if self.index < self.length {
            self.input[self.index..].chars().next().unwrap_or(chars::EOF)
        } else {
            chars::EOF
        };
    }

    fn peek_ahead(&self) -> Option<char> {
        let next = self.index + self.peek.len_utf8();
        if next < self.length {
            self.input[next..].chars().next()
        } else {
            None
        }
    }

    fn scan_token(&mut self) -> Option<Token> {
        // Skip whitespace and collect comments
        loop {
            while self.index < self.length && chars::is_whitespace(self.peek) {
                self.advance();
            }
            if self.peek == chars::SLASH && self.peek_ahead() == Some(chars::SLASH) {
                self.scan_line_comment();
                continue;
            }
            if self.peek == chars::SLASH && self.peek_ahead() == Some(chars::STAR) {
                self.scan_block_comment();
                continue;
            }
            break;
        }

        if self.index >= self.length {
            return None;
        }

        let start = self.location();
        let ch = self.peek;

        if chars::is_identifier_start(ch) {
            return Some(self.scan_identifier(start));
        }

        if chars::is_digit(ch) {
            return Some(self.scan_number(start));
        }

        match ch {
            chars::PERIOD => {
                // `.5` is a number, `...` an operator, `.` a character
                if self
                    .peek_ahead()
                    .map(chars::is_digit)
                    .unwrap_or(false)
                {
                    return Some(self.scan_number(start));
                }
                if self.input[self.index..].starts_with("...") {
                    self.advance();
                    self.advance();
                    self.advance();
                    return Some(Token::new(
                        start,
                        self.location(),
                        TokenType::Operator,
                        0.0,
                        "...".to_string(),
                    ));
                }
                self.advance();
                Some(self.character_token(start, chars::PERIOD))
            }
            chars::LPAREN | chars::RPAREN | chars::LBRACKET | chars::RBRACKET | chars::LBRACE
            | chars::RBRACE | chars::COMMA | chars::COLON | chars::SEMICOLON | chars::AT => {
                self.advance();
                Some(self.character_token(start, ch))
            }
            chars::SQ | chars::DQ => Some(self.scan_string(start, ch)),
            chars::BT => Some(self.scan_template(start)),
            chars::SLASH => {
                if self.regex_allowed() {
                    Some(self.scan_regex(start))
                } else {
                    Some(self.scan_operator(start))
                }
            }
            _ => Some(self.scan_operator(start)),
        }
    }

    fn character_token(&self, start: ParseLocation, ch: char) -> Token {
        Token::new(
            start,
            self.location(),
            TokenType::Character,
            ch as u32 as f64,
            ch.to_string(),
        )
    }

    fn scan_line_comment(&mut self) {
        let start = self.location();
        while self.index < self.length && !chars::is_new_line(self.peek) {
            self.advance();
        }
        let end = self.location();
        self.comments.push(Comment {
            text: self.input[start.offset..end.offset].to_string(),
            block: false,
            span: ParseSourceSpan::new(start, end),
        });
    }

    fn scan_block_comment(&mut self) {
        let start = self.location();
        self.advance(); // /
        self.advance(); // *
        while self.index < self.length {
            if self.peek == chars::STAR && self.peek_ahead() == Some(chars::SLASH) {
                self.advance();
                self.advance();
                break;
            }
            self.advance();
        }
        let end = self.location();
        self.comments.push(Comment {
            text: self.input[start.offset..end.offset].to_string(),
            block: true,
            span: ParseSourceSpan::new(start, end),
        });
    }

    fn scan_identifier(&mut self, start: ParseLocation) -> Token {
        while self.index < self.length && chars::is_identifier_part(self.peek) {
            self.advance();
        }
        let text = &self.input[start.offset..self.index];
        let token_type = if KEYWORDS.contains(&text) {
            TokenType::Keyword
        } else {
            TokenType::Identifier
        };
        Token::new(start, self.location(), token_type, 0.0, text.to_string())
    }

    fn scan_number(&mut self, start: ParseLocation) -> Token {
        // Hex / binary / octal prefixes
        if self.peek == chars::ZERO {
            if let Some(next) = self.peek_ahead() {
                if next == 'x' || next == 'X' {
                    self.advance();
                    self.advance();
                    while self.index < self.length && chars::is_ascii_hex_digit(self.peek) {
                        self.advance();
                    }
                    let raw = &self.input[start.offset..self.index];
                    let value =
                        i64::from_str_radix(&raw[2..], 16).map(|v| v as f64).unwrap_or(0.0);
                    return Token::new(start, self.location(), TokenType::Number, value, raw.to_string());
                }
            }
        }
        let mut seen_dot = false;
        let mut seen_exp = false;
        while self.index < self.length {
            let ch = self.peek;
            if chars::is_digit(ch) {
                self.advance();
            } else if ch == chars::PERIOD && !seen_dot && !seen_exp {
                seen_dot = true;
                self.advance();
            } else if (ch == 'e' || ch == 'E') && !seen_exp {
                seen_exp = true;
                self.advance();
                if self.peek == chars::PLUS || self.peek == chars::MINUS {
                    self.advance();
                }
            } else {
                break;
            }
        }
        let raw = &self.input[start.offset..self.index];
        let value = raw.parse::<f64>().unwrap_or(0.0);
        Token::new(start, self.location(), TokenType::Number, value, raw.to_string())
    }

    fn scan_string(&mut self, start: ParseLocation, quote: char) -> Token {
        self.advance(); // opening quote
        let mut value = String::new();
        while self.index < self.length && self.peek != quote {
            if self.peek == chars::BACKSLASH {
                self.advance();
                if self.index >= self.length {
                    break;
                }
                let ch = self.peek;
                value.push(match ch {
                    'n' => '\n',
                    't' => '\t',
                    'r' => '\r',
                    _ => ch,
                });
                self.advance();
            } else if chars::is_new_line(self.peek) {
                // Unterminated string; stop at the line break
                return Token::new(
                    start,
                    self.location(),
                    TokenType::Error,
                    0.0,
                    "Unterminated string literal".to_string(),
                );
            } else {
                value.push(self.peek);
                self.advance();
            }
        }
        if self.index < self.length {
            self.advance(); // closing quote
        }
        Token::new(start, self.location(), TokenType::String, 0.0, value)
    }

    /// Scan a whole template literal, interpolations included, as raw text
    fn scan_template(&mut self, start: ParseLocation) -> Token {
        self.advance(); // opening backtick
        let mut brace_depth = 0usize;
        while self.index < self.length {
            let ch = self.peek;
            if ch == chars::BACKSLASH {
                self.advance();
                if self.index < self.length {
                    self.advance();
                }
                continue;
            }
            if brace_depth == 0 && ch == chars::BT {
                self.advance();
                break;
            }
            if ch == chars::DOLLAR && self.peek_ahead() == Some(chars::LBRACE) {
                brace_depth += 1;
                self.advance();
                self.advance();
                continue;
            }
            if brace_depth > 0 {
                if ch == chars::LBRACE {
                    brace_depth += 1;
                } else if ch == chars::RBRACE {
                    brace_depth -= 1;
                }
            }
            self.advance();
        }
        let raw = self.input[start.offset..self.index].to_string();
        Token::new(start, self.location(), TokenType::Template, 0.0, raw)
    }

    fn scan_regex(&mut self, start: ParseLocation) -> Token {
        self.advance(); // opening slash
        let mut in_class = false;
        while self.index < self.length {
            let ch = self.peek;
            if ch == chars::BACKSLASH {
                self.advance();
                if self.index < self.length {
                    self.advance();
                }
                continue;
            }
            if chars::is_new_line(ch) {
                return Token::new(
                    start,
                    self.location(),
                    TokenType::Error,
                    0.0,
                    "Unterminated regular expression".to_string(),
                );
            }
            if ch == chars::LBRACKET {
                in_class = true;
            } else if ch == chars::RBRACKET {
                in_class = false;
            } else if ch == chars::SLASH && !in_class {
                self.advance();
                break;
            }
            self.advance();
        }
        // Flags
        while self.index < self.length && chars::is_identifier_part(self.peek) {
            self.advance();
        }
        let raw = self.input[start.offset..self.index].to_string();
        Token::new(start, self.location(), TokenType::Regex, 0.0, raw)
    }

    fn scan_operator(&mut self, start: ParseLocation) -> Token {
        let rest = &self.input[self.index..];
        for op in OPERATORS {
            if rest.starts_with(op) {
                for _ in 0..op.chars().count() {
                    self.advance();
                }
                return Token::new(
                    start,
                    self.location(),
                    TokenType::Operator,
                    0.0,
                    (*op).to_string(),
                );
            }
        }
        // Unknown character; emit it as a character token so the parser can
        // fall back to a raw span instead of dropping input
        let ch = self.peek;
        self.advance();
        self.character_token(start, ch)
    }

    /// A leading `/` starts a regex unless the previous token can end an
    /// expression (identifier, literal, `)`, `]` or `}`)
    fn regex_allowed(&self) -> bool {
        match self.tokens.last() {
            None => true,
            Some(last) => match last.token_type {
                TokenType::Identifier
                | TokenType::Number
                | TokenType::String
                | TokenType::Template
                | TokenType::Regex => false,
                TokenType::Keyword => last.str_value == "return" || last.str_value == "typeof",
                TokenType::Character => {
                    let s = last.str_value.as_str();
                    s != ")" && s != "]" && s != "}"
                }
                _ => true,
            },
        }
    }
}
