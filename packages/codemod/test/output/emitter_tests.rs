//! Class Emitter Tests

use ember_codemod::js_parser::ast::Comment;
use ember_codemod::options::QuoteStyle;
use ember_codemod::output::output_ast::*;
use ember_codemod::output::ClassEmitter;
use ember_codemod::parse_util::{ParseLocation, ParseSourceSpan};
use smallvec::smallvec;

fn emitter() -> ClassEmitter {
    ClassEmitter::new(QuoteStyle::Single)
}

fn span() -> ParseSourceSpan {
    ParseSourceSpan::new(ParseLocation::new(0, 1, 0), ParseLocation::new(0, 1, 0))
}

#[test]
fn emits_a_plain_class() {
    let class = ClassNode {
        name: "TodoItem".to_string(),
        superclass: Some("Component".to_string()),
        decorators: vec![],
        members: vec![ClassMember::Field(ClassField {
            key: MemberKey::ident("count"),
            value: Some("0".to_string()),
            decorators: Default::default(),
            comments: vec![],
        })],
        export_default: true,
        comments: vec![],
    };
    assert_eq!(
        emitter().emit_class(&class),
        "export default class TodoItem extends Component {\n  count = 0;\n}"
    );
}

#[test]
fn emits_class_decorators_and_methods() {
    let class = ClassNode {
        name: "Row".to_string(),
        superclass: Some("Component.extend(SortableMixin)".to_string()),
        decorators: vec![DecoratorDescriptor::invoked(
            "tagName",
            vec![DecoratorArg::Str("li".to_string())],
        )],
        members: vec![
            ClassMember::Field(ClassField {
                key: MemberKey::ident("store"),
                value: None,
                decorators: smallvec![DecoratorDescriptor::bare("service")],
                comments: vec![],
            }),
            ClassMember::Method(ClassMethod {
                key: MemberKey::ident("total"),
                kind: MethodKind::Getter,
                params: vec![],
                body: "{ return 1; }".to_string(),
                decorators: smallvec![DecoratorDescriptor::invoked(
                    "computed",
                    vec![DecoratorArg::Source("'items.[]'".to_string())],
                )],
                comments: vec![],
            }),
        ],
        export_default: false,
        comments: vec![],
    };
    let expected = "\
@tagName('li')
class Row extends Component.extend(SortableMixin) {
  @service store;

  @computed('items.[]')
  get total() { return 1; }
}";
    assert_eq!(emitter().emit_class(&class), expected);
}

#[test]
fn member_comments_are_reprinted() {
    let class = ClassNode {
        name: "X".to_string(),
        superclass: None,
        decorators: vec![],
        members: vec![ClassMember::Field(ClassField {
            key: MemberKey::ident("a"),
            value: Some("1".to_string()),
            decorators: Default::default(),
            comments: vec![Comment {
                text: "// counts things".to_string(),
                block: false,
                span: span(),
            }],
        })],
        export_default: false,
        comments: vec![],
    };
    assert_eq!(
        emitter().emit_class(&class),
        "class X {\n  // counts things\n  a = 1;\n}"
    );
}

#[test]
fn quoted_and_computed_keys_render() {
    let class = ClassNode {
        name: "X".to_string(),
        superclass: None,
        decorators: vec![],
        members: vec![
            ClassMember::Field(ClassField {
                key: MemberKey {
                    name: "foo:bar".to_string(),
                    quoted: true,
                    computed: false,
                },
                value: Some("1".to_string()),
                decorators: Default::default(),
                comments: vec![],
            }),
            ClassMember::Field(ClassField {
                key: MemberKey {
                    name: "DYNAMIC".to_string(),
                    quoted: false,
                    computed: true,
                },
                value: Some("2".to_string()),
                decorators: Default::default(),
                comments: vec![],
            }),
        ],
        export_default: false,
        comments: vec![],
    };
    let expected = "class X {\n  'foo:bar' = 1;\n\n  [DYNAMIC] = 2;\n}";
    assert_eq!(emitter().emit_class(&class), expected);
}

#[test]
fn renders_imports_with_aliases_and_quote_style() {
    let import = ImportStatement {
        source: "@ember/service".to_string(),
        default: None,
        named: vec![("inject".to_string(), "service".to_string())],
    };
    assert_eq!(
        emitter().render_import(&import),
        "import { inject as service } from '@ember/service';"
    );
    let double = ClassEmitter::new(QuoteStyle::Double);
    assert_eq!(
        double.render_import(&import),
        "import { inject as service } from \"@ember/service\";"
    );
}

#[test]
fn renders_default_and_named_imports_together() {
    let import = ImportStatement {
        source: "@ember/component".to_string(),
        default: Some("Component".to_string()),
        named: vec![("tagName".to_string(), "tagName".to_string())],
    };
    assert_eq!(
        emitter().render_import(&import),
        "import Component, { tagName } from '@ember/component';"
    );
}

#[test]
fn decorator_arguments_render_by_kind() {
    let emitter = emitter();
    let decorator = DecoratorDescriptor::invoked(
        "off",
        vec![
            DecoratorArg::Str("boom".to_string()),
            DecoratorArg::Num(2.0),
            DecoratorArg::Bool(true),
            DecoratorArg::Null,
            DecoratorArg::Source("someRef".to_string()),
        ],
    );
    assert_eq!(
        emitter.render_decorator(&decorator),
        "@off('boom', 2, true, null, someRef)"
    );
}
