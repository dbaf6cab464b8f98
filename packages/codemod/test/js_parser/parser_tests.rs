//! Parser Tests
//!
//! The parser recovers imports, declarations and object shapes, and keeps
//! everything outside the subset as verbatim raw spans.

use ember_codemod::js_parser::ast::{Expr, PropertyKind, Statement};
use ember_codemod::js_parser::Parser;

fn parse(source: &str) -> ember_codemod::js_parser::ParseModuleResult {
    Parser::new().parse_module(source)
}

#[test]
fn parses_import_forms() {
    let result = parse(
        "import Component from '@ember/component';\n\
         import { inject as service, computed } from '@ember/object';\n\
         import 'side-effect';\n",
    );
    assert!(result.errors.is_empty());
    let imports: Vec<_> = result.module.imports().collect();
    assert_eq!(imports.len(), 3);
    assert_eq!(imports[0].default.as_deref(), Some("Component"));
    assert_eq!(imports[0].source, "@ember/component");
    assert_eq!(imports[1].named.len(), 2);
    assert_eq!(imports[1].named[0].imported, "inject");
    assert_eq!(imports[1].named[0].local, "service");
    assert!(imports[1].imports_name("computed"));
    assert!(imports[2].named.is_empty());
}

#[test]
fn parses_export_default_extend_call() {
    let source = "export default Component.extend({ count: 1 });";
    let result = parse(source);
    assert!(result.errors.is_empty());
    match &result.module.statements[0] {
        Statement::ExportDefault(export) => {
            let call = export.expr.as_call().expect("expected a call");
            assert_eq!(call.callee.dotted_path().as_deref(), Some("Component.extend"));
            assert_eq!(call.args.len(), 1);
            assert!(call.args[0].is_object());
        }
        other => panic!("expected export default, got {:?}", other),
    }
}

#[test]
fn object_properties_capture_kind_and_comments() {
    let source = "const X = Base.extend({\n\
         // how many\n\
         count: 1,\n\
         save() { return true; },\n\
         get title() { return 't'; },\n\
         'quoted:key': 2,\n\
         shorthand,\n\
         });";
    let result = parse(source);
    assert!(result.errors.is_empty());
    let init = match &result.module.statements[0] {
        Statement::Var(var) => &var.init,
        other => panic!("expected var, got {:?}", other),
    };
    let object = init.as_call().unwrap().args[0].as_object().unwrap();
    let props = &object.properties;
    assert_eq!(props.len(), 5);

    assert_eq!(props[0].name(), "count");
    assert_eq!(props[0].kind, PropertyKind::Init);
    assert_eq!(props[0].leading_comments.len(), 1);
    assert_eq!(props[0].leading_comments[0].text, "// how many");

    assert_eq!(props[1].name(), "save");
    assert_eq!(props[1].kind, PropertyKind::Method);

    assert_eq!(props[2].name(), "title");
    assert_eq!(props[2].kind, PropertyKind::Get);

    assert_eq!(props[3].name(), "quoted:key");
    assert!(props[3].key.quoted);

    assert_eq!(props[4].name(), "shorthand");
    match &props[4].value {
        Expr::Ident(id) => assert_eq!(id.name, "shorthand"),
        other => panic!("expected shorthand identifier, got {:?}", other),
    }
}

#[test]
fn function_bodies_are_verbatim_spans() {
    let source = "const X = Base.extend({ init: function(a, b) { this._super(...arguments); } });";
    let result = parse(source);
    let init = match &result.module.statements[0] {
        Statement::Var(var) => &var.init,
        other => panic!("expected var, got {:?}", other),
    };
    let object = init.as_call().unwrap().args[0].as_object().unwrap();
    let function = object.properties[0].value.as_function().unwrap();
    assert_eq!(function.params, vec!["a", "b"]);
    assert_eq!(
        function.body_span.text(source),
        "{ this._super(...arguments); }"
    );
}

#[test]
fn expressions_outside_the_subset_become_raw_spans() {
    let source = "const X = Base.extend({ a: 1 + 2, b: cond ? x : y, c: `t ${v}` });";
    let result = parse(source);
    let init = match &result.module.statements[0] {
        Statement::Var(var) => &var.init,
        other => panic!("expected var, got {:?}", other),
    };
    let object = init.as_call().unwrap().args[0].as_object().unwrap();
    let texts: Vec<&str> = object
        .properties
        .iter()
        .map(|p| p.value.text(source))
        .collect();
    assert_eq!(texts, vec!["1 + 2", "cond ? x : y", "`t ${v}`"]);
    assert!(matches!(object.properties[0].value, Expr::Raw(_)));
}

#[test]
fn unknown_statements_are_raw_and_lossless() {
    let source = "function helper() { return 1; }\nconst X = Base.extend({});\n";
    let result = parse(source);
    match &result.module.statements[0] {
        Statement::Raw(raw) => {
            assert_eq!(raw.span.text(source), "function helper() { return 1; }");
        }
        other => panic!("expected raw statement, got {:?}", other),
    }
    assert!(matches!(result.module.statements[1], Statement::Var(_)));
}

#[test]
fn statement_spans_tile_the_whole_file() {
    let source = "import A from 'a';\nconst B = A.extend({});\nexport default B;\n";
    let result = parse(source);
    let mut last_end = 0usize;
    for statement in &result.module.statements {
        let span = statement.span();
        assert!(span.start.offset >= last_end);
        last_end = span.end.offset;
    }
    assert!(last_end <= source.len());
}

#[test]
fn decorated_object_properties_parse() {
    let source = "const X = Base.extend({ @tracked count: 1, @banned('a') other: 2 });";
    let result = parse(source);
    assert!(result.errors.is_empty());
    let init = match &result.module.statements[0] {
        Statement::Var(var) => &var.init,
        other => panic!("expected var, got {:?}", other),
    };
    let object = init.as_call().unwrap().args[0].as_object().unwrap();
    assert_eq!(object.properties[0].decorators.len(), 1);
    assert_eq!(object.properties[0].decorators[0].name, "tracked");
    assert!(object.properties[0].decorators[0].args.is_none());
    let banned = &object.properties[1].decorators[0];
    assert_eq!(banned.name, "banned");
    assert_eq!(banned.args.as_ref().map(|a| a.len()), Some(1));
}

#[test]
fn mixins_and_object_args_are_separated_by_shape() {
    let source = "export default Component.extend(SortableMixin, Evented, { a: 1 });";
    let result = parse(source);
    let call = match &result.module.statements[0] {
        Statement::ExportDefault(export) => export.expr.as_call().unwrap(),
        other => panic!("expected export default, got {:?}", other),
    };
    assert_eq!(call.args.len(), 3);
    assert!(!call.args[0].is_object());
    assert!(!call.args[1].is_object());
    assert!(call.args[2].is_object());
}
