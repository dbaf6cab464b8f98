//! Class Emitter Module
//!
//! Prints the output nodes back to JavaScript source text. Values, bodies
//! and comments carried as verbatim text are reproduced unchanged; only
//! synthesized strings honor the quote option.

use crate::js_parser::ast::Comment;
use crate::options::QuoteStyle;
use crate::output::abstract_emitter::{escape_string, is_legal_identifier, EmitterVisitorContext};
use crate::output::output_ast::*;

pub struct ClassEmitter {
    quote: QuoteStyle,
}

impl ClassEmitter {
    pub fn new(quote: QuoteStyle) -> Self {
        ClassEmitter { quote }
    }

    /// Print a whole class declaration, decorators included
    pub fn emit_class(&self, class: &ClassNode) -> String {
        let mut ctx = EmitterVisitorContext::create_root();
        self.print_comments(&class.comments, &mut ctx);
        for decorator in &class.decorators {
            ctx.println(&self.render_decorator(decorator));
        }
        let mut header = String::new();
        if class.export_default {
            header.push_str("export default ");
        }
        header.push_str("class ");
        header.push_str(&class.name);
        if let Some(superclass) = &class.superclass {
            header.push_str(" extends ");
            header.push_str(superclass);
        }
        header.push_str(" {");
        ctx.println(&header);
        ctx.inc_indent();
        for (i, member) in class.members.iter().enumerate() {
            if i > 0 {
                ctx.println("");
            }
            self.emit_member(member, &mut ctx);
        }
        ctx.dec_indent();
        ctx.println("}");
        ctx.remove_empty_last_line();
        ctx.to_source()
    }

    fn emit_member(&self, member: &ClassMember, ctx: &mut EmitterVisitorContext) {
        match member {
            ClassMember::Field(field) => self.emit_field(field, ctx),
            ClassMember::Method(method) => self.emit_method(method, ctx),
        }
    }

    /// Field decorators print inline (`@service store;`), method decorators
    /// on their own lines
    fn emit_field(&self, field: &ClassField, ctx: &mut EmitterVisitorContext) {
        self.print_comments(&field.comments, ctx);
        for decorator in &field.decorators {
            ctx.print(&self.render_decorator(decorator));
            ctx.print(" ");
        }
        ctx.print(&self.render_key(&field.key));
        if let Some(value) = &field.value {
            ctx.print(" = ");
            ctx.print(value);
        }
        ctx.println(";");
    }

    fn emit_method(&self, method: &ClassMethod, ctx: &mut EmitterVisitorContext) {
        self.print_comments(&method.comments, ctx);
        for decorator in &method.decorators {
            ctx.println(&self.render_decorator(decorator));
        }
        let prefix = match method.kind {
            MethodKind::Method => "",
            MethodKind::Getter => "get ",
            MethodKind::Setter => "set ",
        };
        ctx.print(prefix);
        ctx.print(&self.render_key(&method.key));
        ctx.print("(");
        ctx.print(&method.params.join(", "));
        ctx.print(") ");
        // The body keeps its original formatting, braces included
        ctx.println(&method.body);
    }

    fn print_comments(&self, comments: &[Comment], ctx: &mut EmitterVisitorContext) {
        for comment in comments {
            ctx.println(&comment.text);
        }
    }

    fn render_key(&self, key: &MemberKey) -> String {
        if key.computed {
            format!("[{}]", key.name)
        } else if key.quoted || !is_legal_identifier(&key.name) {
            escape_string(&key.name, self.quote.char())
        } else {
            key.name.clone()
        }
    }

    pub fn render_decorator(&self, decorator: &DecoratorDescriptor) -> String {
        match &decorator.args {
            None => format!("@{}", decorator.name),
            Some(args) => {
                let rendered: Vec<String> = args.iter().map(|a| self.render_arg(a)).collect();
                format!("@{}({})", decorator.name, rendered.join(", "))
            }
        }
    }

    fn render_arg(&self, arg: &DecoratorArg) -> String {
        match arg {
            DecoratorArg::Source(text) => text.clone(),
            DecoratorArg::Str(value) => escape_string(value, self.quote.char()),
            DecoratorArg::Num(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
            DecoratorArg::Bool(b) => b.to_string(),
            DecoratorArg::Null => "null".to_string(),
        }
    }

    /// Print one import statement
    pub fn render_import(&self, import: &ImportStatement) -> String {
        let mut out = String::from("import ");
        let mut wrote_clause = false;
        if let Some(default) = &import.default {
            out.push_str(default);
            wrote_clause = true;
        }
        if !import.named.is_empty() {
            if wrote_clause {
                out.push_str(", ");
            }
            out.push_str("{ ");
            let specs: Vec<String> = import
                .named
                .iter()
                .map(|(imported, local)| {
                    if imported == local {
                        imported.clone()
                    } else {
                        format!("{} as {}", imported, local)
                    }
                })
                .collect();
            out.push_str(&specs.join(", "));
            out.push_str(" }");
            wrote_clause = true;
        }
        if wrote_clause {
            out.push_str(" from ");
        }
        out.push_str(&escape_string(&import.source, self.quote.char()));
        out.push(';');
        out
    }
}
