//! Module Transformer
//!
//! Drives one file end to end: locate eligible `X.extend(mixins..., {...})`
//! declarations, build a property model per declaration entry in source
//! order, aggregate decorator imports and diagnostics, and splice the
//! emitted classes (and import statements) back into the original text.

use crate::js_parser::ast::{
    CallExpr, Expr, ImportDecl, Module, Statement,
};
use crate::js_parser::Parser;
use crate::options::TransformOptions;
use crate::output::class_emitter::ClassEmitter;
use crate::output::output_ast::{ClassNode, DecoratorDescriptor, ImportStatement};
use crate::parse_util::{ParseError, ParseSourceSpan};
use crate::runtime_data::RuntimeData;
use crate::transform::classifier::classify;
use crate::transform::decorators::{import_entry_for, import_spec_for, DecoratorImportSpecs};
use crate::transform::diagnostics::Diagnostic;
use crate::transform::error::TransformError;
use crate::transform::properties::PropertyModel;

/// Everything one file's transformation produced
#[derive(Debug, Clone)]
pub struct ModuleTransformResult {
    /// Rewritten source, None when the file contains nothing to transform
    pub output: Option<String>,
    pub diagnostics: Vec<Diagnostic>,
    /// Advisory validation failures, property-prefixed
    pub type_errors: Vec<String>,
    pub parse_errors: Vec<ParseError>,
}

/// Pure OR-fold of the import spec set over built models, seeded with the
/// specs already satisfied by the file's imports. Associative, commutative
/// and idempotent under re-aggregation.
pub fn aggregate(models: &[PropertyModel], existing: DecoratorImportSpecs) -> DecoratorImportSpecs {
    models
        .iter()
        .fold(existing, |acc, model| acc | model.import_specs())
}

/// Import spec bits already satisfied by the source file's import lines
pub fn existing_import_specs(module: &Module) -> DecoratorImportSpecs {
    let mut specs = DecoratorImportSpecs::empty();
    for import in module.imports() {
        for specifier in &import.named {
            let flag = import_spec_for(&specifier.local);
            if !flag.is_empty() {
                if let Some((source, _, _)) = import_entry_for(&specifier.local) {
                    if source == import.source {
                        specs |= flag;
                    }
                }
            }
        }
    }
    specs
}

struct Candidate {
    span: ParseSourceSpan,
    class: ClassNode,
    export_prefix: &'static str,
}

pub struct ModuleTransformer {
    options: TransformOptions,
}

impl ModuleTransformer {
    pub fn new(options: TransformOptions) -> Self {
        ModuleTransformer { options }
    }

    /// Like `transform_source`, but a file the parser could not follow is
    /// an error instead of an advisory note
    pub fn transform_source_strict(
        &self,
        source: &str,
        file_name: &str,
        runtime: Option<&RuntimeData>,
    ) -> Result<ModuleTransformResult, TransformError> {
        let result = self.transform_source(source, file_name, runtime);
        if let Some(first) = result.parse_errors.first() {
            return Err(TransformError::Parse {
                file: file_name.to_string(),
                message: first.contextual_message(source, 40),
            });
        }
        Ok(result)
    }

    pub fn transform_source(
        &self,
        source: &str,
        file_name: &str,
        runtime: Option<&RuntimeData>,
    ) -> ModuleTransformResult {
        let default_runtime = RuntimeData::default();
        let runtime = runtime.unwrap_or(&default_runtime);
        let parsed = Parser::new().parse_module(source);
        let module = parsed.module;

        let mut diagnostics = Vec::new();
        let mut type_errors = Vec::new();
        let mut candidates = Vec::new();
        let mut all_models: Vec<PropertyModel> = Vec::new();

        for statement in &module.statements {
            let (expr, name, export_prefix, span) = match statement {
                Statement::Var(var) => (
                    &var.init,
                    var.name.clone(),
                    if var.exported { "export " } else { "" },
                    var.span,
                ),
                Statement::ExportDefault(export) => (
                    &export.expr,
                    class_name_from_file(file_name, runtime.type_.as_deref()),
                    "",
                    export.span,
                ),
                _ => continue,
            };
            let call = match extend_call(expr) {
                Some(call) => call,
                None => continue,
            };

            let mut models = Vec::new();
            for arg in &call.args {
                if let Some(object) = arg.as_object() {
                    for prop in &object.properties {
                        models.push(classify(prop, source, runtime, &self.options));
                    }
                }
            }

            let mut members = Vec::new();
            let mut class_decorators: Vec<DecoratorDescriptor> = Vec::new();
            for model in &models {
                let built = model.build();
                members.extend(built.members);
                class_decorators.extend(built.class_decorators);
                type_errors.extend(model.type_errors().iter().cloned());
                diagnostics.extend(model.diagnostics());
            }

            let class = ClassNode {
                name,
                superclass: Some(heritage_text(call, source)),
                decorators: class_decorators,
                members,
                export_default: matches!(statement, Statement::ExportDefault(_)),
                comments: Vec::new(),
            };
            candidates.push(Candidate {
                span,
                class,
                export_prefix,
            });
            all_models.extend(models);
        }

        if candidates.is_empty() {
            return ModuleTransformResult {
                output: None,
                diagnostics,
                type_errors,
                parse_errors: parsed.errors,
            };
        }

        let specs = aggregate(&all_models, existing_import_specs(&module));
        let new_imports = self.collect_imports(&module, &candidates, specs);
        let output = self.splice(source, &module, candidates, new_imports);

        ModuleTransformResult {
            output: Some(output),
            diagnostics,
            type_errors,
            parse_errors: parsed.errors,
        }
    }

    /// Decide which import statements to add or rewrite. Needed names come
    /// from the aggregated spec set plus every built decorator that flags
    /// `requires_import`; names the file already imports are skipped.
    fn collect_imports(
        &self,
        module: &Module,
        candidates: &[Candidate],
        specs: DecoratorImportSpecs,
    ) -> Vec<(Option<ParseSourceSpan>, ImportStatement)> {
        let mut needed: Vec<&str> = Vec::new();
        let push_unique = |name: &'static str, needed: &mut Vec<&str>| {
            if !needed.contains(&name) {
                needed.push(name);
            }
        };
        for name in specs.decorator_names() {
            push_unique(name, &mut needed);
        }
        for candidate in candidates {
            let class_level = candidate.class.decorators.iter();
            let member_level = candidate
                .class
                .members
                .iter()
                .flat_map(|m| m.decorators().iter());
            for decorator in class_level.chain(member_level) {
                if decorator.requires_import {
                    if let Some((_, _, local)) = import_entry_for(&decorator.name) {
                        push_unique(local, &mut needed);
                    }
                }
            }
        }

        // Group by source module, skipping names already imported
        let mut grouped: Vec<(String, Vec<(String, String)>)> = Vec::new();
        for name in needed {
            let (source, imported, local) = match import_entry_for(name) {
                Some(entry) => entry,
                None => continue,
            };
            if module.imports().any(|i| i.imports_name(local)) {
                continue;
            }
            match grouped.iter_mut().find(|(s, _)| s.as_str() == source) {
                Some((_, names)) => names.push((imported.to_string(), local.to_string())),
                None => grouped.push((
                    source.to_string(),
                    vec![(imported.to_string(), local.to_string())],
                )),
            }
        }

        let mut imports = Vec::new();
        for (source, names) in grouped {
            // Merge into an existing import of the same module when present
            if let Some(existing) = module.imports().find(|i| i.source == source) {
                let mut merged = import_to_statement(existing);
                merged.named.extend(names);
                imports.push((Some(existing.span), merged));
            } else {
                imports.push((None, ImportStatement::named_only(source, names)));
            }
        }
        imports
    }

    fn splice(
        &self,
        source: &str,
        module: &Module,
        candidates: Vec<Candidate>,
        imports: Vec<(Option<ParseSourceSpan>, ImportStatement)>,
    ) -> String {
        let emitter = ClassEmitter::new(self.options.quote);

        // (span, replacement) pairs; zero-width spans are insertions
        let mut replacements: Vec<(ParseSourceSpan, String)> = Vec::new();
        let insert_at = module
            .imports()
            .last()
            .map(|i| i.span.end)
            .unwrap_or_else(|| crate::parse_util::ParseLocation::new(0, 1, 0));
        let mut fresh_lines = Vec::new();
        for (span, import) in imports {
            let line = emitter.render_import(&import);
            match span {
                Some(span) => replacements.push((span, line)),
                None => fresh_lines.push(line),
            }
        }
        if !fresh_lines.is_empty() {
            let text = if insert_at.offset == 0 {
                format!("{}\n", fresh_lines.join("\n"))
            } else {
                format!("\n{}", fresh_lines.join("\n"))
            };
            replacements.push((ParseSourceSpan::new(insert_at, insert_at), text));
        }

        for candidate in candidates {
            let mut text = emitter.emit_class(&candidate.class);
            if !candidate.export_prefix.is_empty() {
                text = format!("{}{}", candidate.export_prefix, text);
            }
            replacements.push((candidate.span, text));
        }

        replacements.sort_by_key(|(span, _)| (span.start.offset, span.end.offset));

        let mut out = String::with_capacity(source.len());
        let mut cursor = 0usize;
        for (span, text) in replacements {
            if span.start.offset < cursor {
                continue;
            }
            out.push_str(&source[cursor..span.start.offset]);
            out.push_str(&text);
            cursor = span.end.offset;
        }
        out.push_str(&source[cursor..]);
        out
    }
}

/// The `X.extend(...)` call shape, with at least one object argument
fn extend_call(expr: &Expr) -> Option<&CallExpr> {
    let call = expr.as_call()?;
    match call.callee.as_ref() {
        Expr::Member(member) if !member.computed && member.property == "extend" => {
            if call.args.iter().any(|a| a.is_object()) {
                Some(call)
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Heritage text for the emitted class: the extend target alone, or
/// `Target.extend(MixinA, MixinB)` when mixins are present
fn heritage_text(call: &CallExpr, source: &str) -> String {
    let target = match call.callee.as_ref() {
        Expr::Member(member) => member.object.text(source).to_string(),
        other => other.text(source).to_string(),
    };
    let mixins: Vec<&str> = call
        .args
        .iter()
        .filter(|a| !a.is_object())
        .map(|a| a.text(source))
        .collect();
    if mixins.is_empty() {
        target
    } else {
        format!("{}.extend({})", target, mixins.join(", "))
    }
}

fn import_to_statement(decl: &ImportDecl) -> ImportStatement {
    ImportStatement {
        source: decl.source.clone(),
        default: decl.default.clone(),
        named: decl
            .named
            .iter()
            .map(|s| (s.imported.clone(), s.local.clone()))
            .collect(),
    }
}

/// Class name for an anonymous `export default` declaration, derived from
/// the file stem; the runtime type breaks a tie when the stem is unusable
fn class_name_from_file(file_name: &str, runtime_type: Option<&str>) -> String {
    let stem = file_name
        .rsplit('/')
        .next()
        .unwrap_or(file_name)
        .trim_end_matches(".js")
        .trim_end_matches(".ts");
    let pascal: String = stem
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect();
    if pascal.is_empty() {
        runtime_type.unwrap_or("Anonymous").to_string()
    } else {
        pascal
    }
}
