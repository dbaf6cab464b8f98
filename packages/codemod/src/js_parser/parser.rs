/**
 * JavaScript Subset Parser
 *
 * Recursive descent parser over the token stream. It understands imports,
 * top-level declarations, object literals, function expressions and call
 * chains; any statement or expression outside that subset becomes a raw
 * span of the original text. Parsing is total: errors are recorded and the
 * cursor recovers at the next statement or property boundary.
 */

use crate::chars;
use crate::js_parser::ast::*;
use crate::js_parser::lexer::{Lexer, Token, TokenType};
use crate::parse_util::{ParseError, ParseLocation, ParseSourceSpan};

/// Result of parsing a whole file
#[derive(Debug, Clone)]
pub struct ParseModuleResult {
    pub module: Module,
    pub comments: Vec<Comment>,
    pub errors: Vec<ParseError>,
}

pub struct Parser {
    lexer: Lexer,
}

impl Parser {
    pub fn new() -> Self {
        Parser { lexer: Lexer::new() }
    }

    pub fn parse_module(&self, source: &str) -> ParseModuleResult {
        let scan = self.lexer.tokenize(source);
        let mut cursor = ParseCursor::new(source, scan.tokens, scan.comments.clone());
        let statements = cursor.parse_statements();
        ParseModuleResult {
            module: Module { statements },
            comments: scan.comments,
            errors: cursor.errors,
        }
    }
}

impl Default for Parser {
    fn default() -> Self {
        Parser::new()
    }
}

/// Statement-starting keywords used as recovery points for raw statements
const STATEMENT_STARTERS: &[&str] = &[
    "import", "export", "const", "let", "var", "function", "class",
];

struct ParseCursor<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    comments: Vec<Comment>,
    index: usize,
    errors: Vec<ParseError>,
}

impl<'a> ParseCursor<'a> {
    fn new(source: &'a str, tokens: Vec<Token>, comments: Vec<Comment>) -> Self {
        ParseCursor {
            source,
            tokens,
            comments,
            index: 0,
            errors: Vec::new(),
        }
    }

    fn at_end(&self) -> bool {
        self.index >= self.tokens.len()
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.index)
    }

    fn peek_at(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.index + offset)
    }

    fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.index);
        if token.is_some() {
            self.index += 1;
        }
        token
    }

    fn current_location(&self) -> ParseLocation {
        self.peek()
            .map(|t| t.start)
            .or_else(|| self.tokens.last().map(|t| t.end))
            .unwrap_or_else(|| ParseLocation::new(self.source.len(), 1, 0))
    }

    fn last_end(&self) -> ParseLocation {
        if self.index > 0 {
            self.tokens[self.index - 1].end
        } else {
            ParseLocation::new(0, 1, 0)
        }
    }

    fn span_from(&self, start: ParseLocation) -> ParseSourceSpan {
        ParseSourceSpan::new(start, self.last_end())
    }

    fn record_error(&mut self, msg: impl Into<String>) {
        let loc = self.current_location();
        self.errors
            .push(ParseError::new(ParseSourceSpan::new(loc, loc), msg));
    }

    fn consume_optional_character(&mut self, ch: char) -> bool {
        if self.peek().map(|t| t.is_character(ch)).unwrap_or(false) {
            self.index += 1;
            true
        } else {
            false
        }
    }

    fn expect_character(&mut self, ch: char) -> bool {
        if self.consume_optional_character(ch) {
            true
        } else {
            self.record_error(format!("Missing expected '{}'", ch));
            false
        }
    }

    fn consume_optional_keyword(&mut self, kw: &str) -> bool {
        if self.peek().map(|t| t.is_keyword(kw)).unwrap_or(false) {
            self.index += 1;
            true
        } else {
            false
        }
    }

    fn consume_optional_operator(&mut self, op: &str) -> bool {
        if self.peek().map(|t| t.is_operator(op)).unwrap_or(false) {
            self.index += 1;
            true
        } else {
            false
        }
    }

    /// Comments lying between two byte offsets, used for leading attachment
    fn comments_between(&self, from: usize, to: usize) -> Vec<Comment> {
        self.comments
            .iter()
            .filter(|c| c.span.start.offset >= from && c.span.end.offset <= to)
            .cloned()
            .collect()
    }

    // ---------------------------------------------------------------------
    // Statements

    fn parse_statements(&mut self) -> Vec<Statement> {
        let mut statements = Vec::new();
        while !self.at_end() {
            while self.consume_optional_character(chars::SEMICOLON) {}
            if self.at_end() {
                break;
            }
            statements.push(self.parse_statement());
        }
        statements
    }

    fn parse_statement(&mut self) -> Statement {
        let start_index = self.index;
        let leading_end = self.current_location().offset;
        let leading_start = if start_index > 0 {
            self.tokens[start_index - 1].end.offset
        } else {
            0
        };
        let leading = self.comments_between(leading_start, leading_end);

        let token = match self.peek() {
            Some(t) => t.clone(),
            None => {
                let loc = self.current_location();
                return Statement::Raw(RawStmt {
                    span: ParseSourceSpan::new(loc, loc),
                });
            }
        };

        if token.is_keyword("import") {
            if let Some(import) = self.parse_import() {
                return Statement::Import(import);
            }
            self.index = start_index;
            return self.parse_raw_statement();
        }

        if token.is_keyword("export") {
            let export_start = token.start;
            self.advance();
            if self.consume_optional_keyword("default") {
                let expr = self.parse_expression(&[chars::SEMICOLON]);
                self.consume_optional_character(chars::SEMICOLON);
                return Statement::ExportDefault(ExportDefault {
                    expr,
                    leading_comments: leading,
                    span: self.span_from(export_start),
                });
            }
            if let Some(decl) = self.try_parse_var_decl(export_start, true, leading.clone()) {
                return Statement::Var(decl);
            }
            self.index = start_index;
            return self.parse_raw_statement();
        }

        if token.is_keyword("const") || token.is_keyword("let") || token.is_keyword("var") {
            if let Some(decl) = self.try_parse_var_decl(token.start, false, leading.clone()) {
                return Statement::Var(decl);
            }
            self.index = start_index;
            return self.parse_raw_statement();
        }

        self.parse_raw_statement()
    }

    fn parse_import(&mut self) -> Option<ImportDecl> {
        let start = self.peek()?.start;
        self.advance(); // import

        let mut default = None;
        let mut named = Vec::new();

        if let Some(t) = self.peek() {
            if t.is_string() {
                // Side-effect import: `import 'module';`
                let source = t.str_value.clone();
                self.advance();
                self.consume_optional_character(chars::SEMICOLON);
                return Some(ImportDecl {
                    source,
                    default: None,
                    named,
                    span: self.span_from(start),
                });
            }
        }

        if self.peek().map(|t| t.is_identifier()).unwrap_or(false) {
            default = Some(self.advance().unwrap().str_value.clone());
            self.consume_optional_character(chars::COMMA);
        }

        if self.consume_optional_character(chars::LBRACE) {
            loop {
                if self.consume_optional_character(chars::RBRACE) {
                    break;
                }
                let imported = match self.peek() {
                    Some(t) if t.is_identifier() || t.is_any_keyword() => {
                        self.advance().unwrap().str_value.clone()
                    }
                    _ => return None,
                };
                let local = if self
                    .peek()
                    .map(|t| t.is_identifier() && t.str_value == "as")
                    .unwrap_or(false)
                {
                    self.advance();
                    match self.peek() {
                        Some(t) if t.is_identifier() => self.advance().unwrap().str_value.clone(),
                        _ => return None,
                    }
                } else {
                    imported.clone()
                };
                named.push(ImportSpecifier { imported, local });
                if !self.consume_optional_character(chars::COMMA) {
                    if !self.consume_optional_character(chars::RBRACE) {
                        return None;
                    }
                    break;
                }
            }
        }

        if !self.consume_optional_keyword("from") {
            return None;
        }
        let source = match self.peek() {
            Some(t) if t.is_string() => self.advance().unwrap().str_value.clone(),
            _ => return None,
        };
        self.consume_optional_character(chars::SEMICOLON);
        Some(ImportDecl {
            source,
            default,
            named,
            span: self.span_from(start),
        })
    }

    fn try_parse_var_decl(
        &mut self,
        start: ParseLocation,
        exported: bool,
        leading: Vec<Comment>,
    ) -> Option<VarDecl> {
        let kind = match self.peek() {
            Some(t)
                if t.is_keyword("const") || t.is_keyword("let") || t.is_keyword("var") =>
            {
                self.advance().unwrap().str_value.clone()
            }
            _ => return None,
        };
        let name = match self.peek() {
            Some(t) if t.is_identifier() => self.advance().unwrap().str_value.clone(),
            _ => return None,
        };
        if !self.consume_optional_operator("=") {
            return None;
        }
        let init = self.parse_expression(&[chars::SEMICOLON, chars::COMMA]);
        // Multiple declarators fall back to a raw statement
        if self.peek().map(|t| t.is_character(chars::COMMA)).unwrap_or(false) {
            return None;
        }
        self.consume_optional_character(chars::SEMICOLON);
        Some(VarDecl {
            kind,
            name,
            init,
            exported,
            leading_comments: leading,
            span: self.span_from(start),
        })
    }

    /// Consume one statement verbatim: through the `;` that closes it at
    /// bracket depth zero, or up to the next line-starting statement keyword
    fn parse_raw_statement(&mut self) -> Statement {
        let start = self.current_location();
        let mut depth = 0i32;
        let mut consumed = 0usize;
        while let Some(token) = self.peek() {
            if consumed > 0 && depth == 0 {
                let starts_line = token.start.line > self.last_end().line;
                if starts_line
                    && token.token_type == TokenType::Keyword
                    && STATEMENT_STARTERS.contains(&token.str_value.as_str())
                {
                    break;
                }
            }
            let token = self.advance().unwrap();
            consumed += 1;
            match token.token_type {
                TokenType::Character => match token.str_value.chars().next() {
                    Some(chars::LPAREN) | Some(chars::LBRACKET) | Some(chars::LBRACE) => depth += 1,
                    Some(chars::RPAREN) | Some(chars::RBRACKET) | Some(chars::RBRACE) => depth -= 1,
                    Some(chars::SEMICOLON) if depth == 0 => break,
                    _ => {}
                },
                _ => {}
            }
        }
        Statement::Raw(RawStmt {
            span: self.span_from(start),
        })
    }

    // ---------------------------------------------------------------------
    // Expressions

    /// Parse one expression. `terminators` are characters that end the
    /// expression at bracket depth zero (callers pass `,`, `)`, `]`, `}` or
    /// `;` as appropriate). Anything the structured grammar cannot express
    /// is widened to a raw span covering the whole expression.
    fn parse_expression(&mut self, terminators: &[char]) -> Expr {
        let start = self.current_location();
        let start_index = self.index;

        let primary = self.parse_primary(terminators);
        let mut expr = match primary {
            Some(e) => e,
            None => return self.finish_raw_expression(start, start_index, terminators),
        };

        // Postfix chains: member access and calls
        loop {
            if self.consume_optional_character(chars::PERIOD) {
                let name = match self.peek() {
                    Some(t) if t.is_identifier() || t.is_any_keyword() => {
                        self.advance().unwrap().str_value.clone()
                    }
                    _ => return self.finish_raw_expression(start, start_index, terminators),
                };
                expr = Expr::Member(MemberExpr {
                    object: Box::new(expr),
                    property: name,
                    computed: false,
                    span: self.span_from(start),
                });
                continue;
            }
            if self.peek().map(|t| t.is_character(chars::LBRACKET)).unwrap_or(false) {
                let index_span = self.skip_balanced(chars::LBRACKET, chars::RBRACKET);
                let inner = index_span.text(self.source);
                let trimmed = inner
                    .get(1..inner.len().saturating_sub(1))
                    .unwrap_or("")
                    .trim()
                    .to_string();
                expr = Expr::Member(MemberExpr {
                    object: Box::new(expr),
                    property: trimmed,
                    computed: true,
                    span: self.span_from(start),
                });
                continue;
            }
            if self.peek().map(|t| t.is_character(chars::LPAREN)).unwrap_or(false) {
                let args = self.parse_call_args();
                expr = Expr::Call(CallExpr {
                    callee: Box::new(expr),
                    args,
                    span: self.span_from(start),
                });
                continue;
            }
            break;
        }

        // A binary operator, arrow, conditional or template tag after the
        // chain means the full expression is outside the subset
        if let Some(t) = self.peek() {
            let extends_expression = match t.token_type {
                TokenType::Operator => true,
                TokenType::Template => true,
                TokenType::Character => {
                    t.is_character(chars::QUESTION)
                        || (!terminators.contains(&t.str_value.chars().next().unwrap_or('\0'))
                            && !t.is_character(chars::SEMICOLON)
                            && !t.is_character(chars::RPAREN)
                            && !t.is_character(chars::RBRACKET)
                            && !t.is_character(chars::RBRACE)
                            && !t.is_character(chars::COMMA)
                            && !t.is_character(chars::COLON))
                }
                _ => false,
            };
            if extends_expression {
                return self.finish_raw_expression(start, start_index, terminators);
            }
        }

        expr
    }

    fn parse_primary(&mut self, _terminators: &[char]) -> Option<Expr> {
        let token = self.peek()?.clone();
        let start = token.start;

        match token.token_type {
            TokenType::String => {
                self.advance();
                let span = self.span_from(start);
                Some(Expr::Literal(Literal {
                    value: LiteralValue::Str(token.str_value.clone()),
                    raw: span.text(self.source).to_string(),
                    span,
                }))
            }
            TokenType::Number => {
                self.advance();
                let span = self.span_from(start);
                Some(Expr::Literal(Literal {
                    value: LiteralValue::Num(token.num_value),
                    raw: span.text(self.source).to_string(),
                    span,
                }))
            }
            TokenType::Regex => {
                self.advance();
                let span = self.span_from(start);
                let raw = token.str_value.clone();
                let close = match raw.rfind('/') {
                    Some(index) if index > 0 => index,
                    _ => raw.len(),
                };
                Some(Expr::Literal(Literal {
                    value: LiteralValue::Regex {
                        pattern: raw.get(1..close).unwrap_or("").to_string(),
                        flags: raw.get(close + 1..).unwrap_or("").to_string(),
                    },
                    raw,
                    span,
                }))
            }
            TokenType::Template => {
                self.advance();
                let span = self.span_from(start);
                Some(Expr::Raw(RawExpr { span }))
            }
            TokenType::Keyword => match token.str_value.as_str() {
                "true" | "false" => {
                    self.advance();
                    let span = self.span_from(start);
                    Some(Expr::Literal(Literal {
                        value: LiteralValue::Bool(token.str_value == "true"),
                        raw: token.str_value.clone(),
                        span,
                    }))
                }
                "null" => {
                    self.advance();
                    let span = self.span_from(start);
                    Some(Expr::Literal(Literal {
                        value: LiteralValue::Null,
                        raw: "null".to_string(),
                        span,
                    }))
                }
                "undefined" => {
                    self.advance();
                    let span = self.span_from(start);
                    Some(Expr::Literal(Literal {
                        value: LiteralValue::Undefined,
                        raw: "undefined".to_string(),
                        span,
                    }))
                }
                "this" => {
                    self.advance();
                    let span = self.span_from(start);
                    Some(Expr::Ident(Identifier {
                        name: "this".to_string(),
                        span,
                    }))
                }
                "function" => self.parse_function_expression(),
                _ => None,
            },
            TokenType::Identifier => {
                self.advance();
                let span = self.span_from(start);
                Some(Expr::Ident(Identifier {
                    name: token.str_value.clone(),
                    span,
                }))
            }
            TokenType::Character => match token.str_value.chars().next() {
                Some(chars::LBRACE) => self.parse_object_expression().map(Expr::Object),
                Some(chars::LBRACKET) => self.parse_array_expression(),
                _ => None,
            },
            _ => None,
        }
    }

    fn parse_function_expression(&mut self) -> Option<Expr> {
        let start = self.peek()?.start;
        self.advance(); // function
        let name = match self.peek() {
            Some(t) if t.is_identifier() => Some(self.advance().unwrap().str_value.clone()),
            _ => None,
        };
        if !self.peek().map(|t| t.is_character(chars::LPAREN)).unwrap_or(false) {
            self.record_error("Missing parameter list in function expression");
            return None;
        }
        let params = self.parse_raw_params();
        if !self.peek().map(|t| t.is_character(chars::LBRACE)).unwrap_or(false) {
            self.record_error("Missing body in function expression");
            return None;
        }
        let body_span = self.skip_balanced(chars::LBRACE, chars::RBRACE);
        Some(Expr::Function(FunctionExpr {
            name,
            params,
            body_span,
            span: self.span_from(start),
        }))
    }

    /// Parameter list as raw text per parameter, split on top-level commas
    fn parse_raw_params(&mut self) -> Vec<String> {
        let span = self.skip_balanced(chars::LPAREN, chars::RPAREN);
        let inner = span.text(self.source);
        let inner = inner.get(1..inner.len().saturating_sub(1)).unwrap_or("");
        split_top_level(inner)
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    fn parse_call_args(&mut self) -> Vec<Expr> {
        let mut args = Vec::new();
        self.expect_character(chars::LPAREN);
        loop {
            if self.consume_optional_character(chars::RPAREN) {
                break;
            }
            if self.at_end() {
                self.record_error("Unterminated argument list");
                break;
            }
            args.push(self.parse_expression(&[chars::COMMA, chars::RPAREN]));
            if !self.consume_optional_character(chars::COMMA) {
                if !self.consume_optional_character(chars::RPAREN) {
                    self.record_error("Missing expected ')' in argument list");
                    break;
                }
                break;
            }
        }
        args
    }

    fn parse_array_expression(&mut self) -> Option<Expr> {
        let start = self.peek()?.start;
        self.advance(); // [
        let mut elements = Vec::new();
        loop {
            if self.consume_optional_character(chars::RBRACKET) {
                break;
            }
            if self.at_end() {
                self.record_error("Unterminated array literal");
                break;
            }
            elements.push(self.parse_expression(&[chars::COMMA, chars::RBRACKET]));
            if !self.consume_optional_character(chars::COMMA) {
                if !self.consume_optional_character(chars::RBRACKET) {
                    self.record_error("Missing expected ']' in array literal");
                    break;
                }
                break;
            }
        }
        Some(Expr::Array(ArrayExpr {
            elements,
            span: self.span_from(start),
        }))
    }

    pub(crate) fn parse_object_expression(&mut self) -> Option<ObjectExpr> {
        let start = self.peek()?.start;
        self.advance(); // {
        let mut properties = Vec::new();
        loop {
            while self.consume_optional_character(chars::COMMA) {}
            if self.consume_optional_character(chars::RBRACE) {
                break;
            }
            if self.at_end() {
                self.record_error("Unterminated object literal");
                break;
            }
            match self.parse_object_property() {
                Some(prop) => properties.push(prop),
                None => {
                    // Recover at the next property boundary
                    self.skip_to_property_boundary();
                }
            }
        }
        Some(ObjectExpr {
            properties,
            span: self.span_from(start),
        })
    }

    fn parse_object_property(&mut self) -> Option<ObjectProperty> {
        let first = self.peek()?.clone();
        let start = first.start;
        let leading_start = if self.index > 0 {
            self.tokens[self.index - 1].end.offset
        } else {
            0
        };
        let leading = self.comments_between(leading_start, start.offset);

        // Decorators already on the declaration: `@name` or `@name(...)`
        let mut decorators = Vec::new();
        while self.peek().map(|t| t.is_character(chars::AT)).unwrap_or(false) {
            let dec_start = self.peek().unwrap().start;
            self.advance(); // @
            let name = match self.peek() {
                Some(t) if t.is_identifier() => self.advance().unwrap().str_value.clone(),
                _ => {
                    self.record_error("Missing decorator name after '@'");
                    return None;
                }
            };
            let args = if self.peek().map(|t| t.is_character(chars::LPAREN)).unwrap_or(false) {
                Some(self.parse_call_args())
            } else {
                None
            };
            decorators.push(ExistingDecorator {
                name,
                args,
                span: self.span_from(dec_start),
            });
        }

        // Accessors: `get key() {}` / `set key(v) {}`
        if let Some(t) = self.peek() {
            if t.is_identifier() && (t.str_value == "get" || t.str_value == "set") {
                let is_get = t.str_value == "get";
                if self
                    .peek_at(1)
                    .map(|n| Self::token_can_be_key(n))
                    .unwrap_or(false)
                    && self
                        .peek_at(2)
                        .map(|n| n.is_character(chars::LPAREN))
                        .unwrap_or(false)
                {
                    self.advance(); // get / set
                    let key = self.parse_property_key()?;
                    let value = self.parse_method_tail(key.span.start)?;
                    return Some(ObjectProperty {
                        key,
                        kind: if is_get { PropertyKind::Get } else { PropertyKind::Set },
                        value,
                        decorators,
                        leading_comments: leading,
                        span: self.span_from(start),
                    });
                }
            }
        }

        let key = self.parse_property_key()?;

        // Method shorthand: `key(...) { ... }`
        if self.peek().map(|t| t.is_character(chars::LPAREN)).unwrap_or(false) {
            let value = self.parse_method_tail(key.span.start)?;
            return Some(ObjectProperty {
                key,
                kind: PropertyKind::Method,
                value,
                decorators,
                leading_comments: leading,
                span: self.span_from(start),
            });
        }

        // `key: value`
        if self.consume_optional_character(chars::COLON) {
            let value = self.parse_expression(&[chars::COMMA, chars::RBRACE]);
            return Some(ObjectProperty {
                key,
                kind: PropertyKind::Init,
                value,
                decorators,
                leading_comments: leading,
                span: self.span_from(start),
            });
        }

        // ES6 shorthand: `key,`
        if self
            .peek()
            .map(|t| t.is_character(chars::COMMA) || t.is_character(chars::RBRACE))
            .unwrap_or(true)
        {
            let value = Expr::Ident(Identifier {
                name: key.name.clone(),
                span: key.span,
            });
            return Some(ObjectProperty {
                key,
                kind: PropertyKind::Init,
                value,
                decorators,
                leading_comments: leading,
                span: self.span_from(start),
            });
        }

        self.record_error(format!("Unsupported object property '{}'", key.name));
        None
    }

    fn token_can_be_key(token: &Token) -> bool {
        token.is_identifier()
            || token.is_any_keyword()
            || token.is_string()
            || token.is_number()
            || token.is_character(chars::LBRACKET)
    }

    fn parse_property_key(&mut self) -> Option<PropertyKey> {
        let token = self.peek()?.clone();
        let start = token.start;
        if token.is_character(chars::LBRACKET) {
            let span = self.skip_balanced(chars::LBRACKET, chars::RBRACKET);
            let inner = span.text(self.source);
            let name = inner
                .get(1..inner.len().saturating_sub(1))
                .unwrap_or("")
                .trim()
                .to_string();
            return Some(PropertyKey {
                name,
                quoted: false,
                computed: true,
                span,
            });
        }
        if token.is_string() {
            self.advance();
            return Some(PropertyKey {
                name: token.str_value.clone(),
                quoted: true,
                computed: false,
                span: self.span_from(start),
            });
        }
        if token.is_number() {
            self.advance();
            return Some(PropertyKey {
                name: token.str_value.clone(),
                quoted: false,
                computed: false,
                span: self.span_from(start),
            });
        }
        if token.is_identifier() || token.is_any_keyword() {
            self.advance();
            return Some(PropertyKey::ident(token.str_value.clone(), self.span_from(start)));
        }
        self.record_error("Missing property key");
        None
    }

    /// Parameter list and body after a method-shorthand key
    fn parse_method_tail(&mut self, start: ParseLocation) -> Option<Expr> {
        let params = self.parse_raw_params();
        if !self.peek().map(|t| t.is_character(chars::LBRACE)).unwrap_or(false) {
            self.record_error("Missing method body");
            return None;
        }
        let body_span = self.skip_balanced(chars::LBRACE, chars::RBRACE);
        Some(Expr::Function(FunctionExpr {
            name: None,
            params,
            body_span,
            span: self.span_from(start),
        }))
    }

    fn skip_to_property_boundary(&mut self) {
        let mut depth = 0i32;
        while let Some(token) = self.peek() {
            if depth == 0
                && (token.is_character(chars::COMMA) || token.is_character(chars::RBRACE))
            {
                return;
            }
            let token = self.advance().unwrap();
            if token.token_type == TokenType::Character {
                match token.str_value.chars().next() {
                    Some(chars::LPAREN) | Some(chars::LBRACKET) | Some(chars::LBRACE) => depth += 1,
                    Some(chars::RPAREN) | Some(chars::RBRACKET) => depth -= 1,
                    Some(chars::RBRACE) => {
                        if depth == 0 {
                            // The object's own closing brace; step back
                            self.index -= 1;
                            return;
                        }
                        depth -= 1;
                    }
                    _ => {}
                }
            }
        }
    }

    /// Consume a balanced bracket pair and return its span, braces included
    fn skip_balanced(&mut self, open: char, close: char) -> ParseSourceSpan {
        let start = self.current_location();
        let mut depth = 0i32;
        while let Some(token) = self.peek() {
            let token = self.advance().unwrap();
            if token.token_type == TokenType::Character {
                let ch = token.str_value.chars().next();
                if ch == Some(open) {
                    depth += 1;
                } else if ch == Some(close) {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                } else {
                    // Other bracket kinds nest inside
                    match ch {
                        Some(chars::LPAREN) | Some(chars::LBRACKET) | Some(chars::LBRACE) => {
                            depth += 1
                        }
                        Some(chars::RPAREN) | Some(chars::RBRACKET) | Some(chars::RBRACE) => {
                            depth -= 1
                        }
                        _ => {}
                    }
                }
            }
        }
        self.span_from(start)
    }

    /// Widen the current expression to a raw span: rewind, then consume to a
    /// terminator at bracket depth zero
    fn finish_raw_expression(
        &mut self,
        start: ParseLocation,
        start_index: usize,
        terminators: &[char],
    ) -> Expr {
        self.index = start_index;
        let mut depth = 0i32;
        while let Some(token) = self.peek() {
            if depth == 0 && token.token_type == TokenType::Character {
                if let Some(ch) = token.str_value.chars().next() {
                    if terminators.contains(&ch) {
                        break;
                    }
                    // Closers belonging to an outer construct also end it
                    if ch == chars::RPAREN || ch == chars::RBRACKET || ch == chars::RBRACE {
                        break;
                    }
                }
            }
            let token = self.advance().unwrap();
            if token.token_type == TokenType::Character {
                match token.str_value.chars().next() {
                    Some(chars::LPAREN) | Some(chars::LBRACKET) | Some(chars::LBRACE) => depth += 1,
                    Some(chars::RPAREN) | Some(chars::RBRACKET) | Some(chars::RBRACE) => depth -= 1,
                    _ => {}
                }
            }
        }
        Expr::Raw(RawExpr {
            span: self.span_from(start),
        })
    }
}

/// Split `text` on commas at bracket depth zero, quotes respected
fn split_top_level(text: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut depth = 0i32;
    let mut quote: Option<char> = None;
    let mut iter = text.chars().peekable();
    while let Some(ch) = iter.next() {
        if let Some(q) = quote {
            current.push(ch);
            if ch == chars::BACKSLASH {
                if let Some(next) = iter.next() {
                    current.push(next);
                }
            } else if ch == q {
                quote = None;
            }
            continue;
        }
        match ch {
            '\'' | '"' | '`' => {
                quote = Some(ch);
                current.push(ch);
            }
            '(' | '[' | '{' => {
                depth += 1;
                current.push(ch);
            }
            ')' | ']' | '}' => {
                depth -= 1;
                current.push(ch);
            }
            ',' if depth == 0 => {
                parts.push(current.clone());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    if !current.trim().is_empty() {
        parts.push(current);
    }
    parts
}
