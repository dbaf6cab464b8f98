//! Property Build Tests
//!
//! `build()` output per variant: deterministic, idempotent, advisory on
//! validation failures.

use ember_codemod::options::TransformOptions;
use ember_codemod::output::output_ast::{ClassMember, DecoratorArg, MethodKind};
use ember_codemod::runtime_data::RuntimeData;
use ember_codemod::transform::properties::PropertyModel;

#[path = "util.rs"]
mod util;
use util::build_model;

fn defaults() -> (RuntimeData, TransformOptions) {
    (RuntimeData::default(), TransformOptions::default())
}

#[test]
fn build_is_idempotent() {
    let (runtime, options) = defaults();
    let model = build_model(
        "{ fullName: computed('first', function() { return this.first; }) }",
        &runtime,
        &options,
    );
    assert_eq!(model.build(), model.build());
}

#[test]
fn simple_property_round_trips() {
    let (runtime, options) = defaults();
    let model = build_model("{ count: 42 }", &runtime, &options);
    assert!(!model.has_runtime_data());
    assert!(!model.has_decorators());
    let built = model.build();
    assert_eq!(built.members.len(), 1);
    match &built.members[0] {
        ClassMember::Field(field) => {
            assert_eq!(field.key.name, "count");
            assert_eq!(field.value.as_deref(), Some("42"));
            assert!(field.decorators.is_empty());
        }
        other => panic!("expected a field, got {:?}", other),
    }
}

#[test]
fn unobserved_metadata_synthesizes_one_unobserves_decorator() {
    let runtime =
        RuntimeData::from_json(r#"{ "unobservedProperties": { "foo": [] } }"#).unwrap();
    let model = build_model("{ foo: 1 }", &runtime, &TransformOptions::default());
    assert!(model.decorator_names().contains(&"unobserves".to_string()));
    let built = model.build();
    match &built.members[0] {
        ClassMember::Field(field) => {
            let unobserves: Vec<_> = field
                .decorators
                .iter()
                .filter(|d| d.name == "unobserves")
                .collect();
            assert_eq!(unobserves.len(), 1);
            assert_eq!(unobserves[0].args.as_deref(), Some(&[][..]));
        }
        other => panic!("expected a field, got {:?}", other),
    }
}

#[test]
fn off_metadata_synthesizes_off_with_arguments() {
    let runtime = RuntimeData::from_json(
        r#"{ "offProperties": { "onBoom": ["boom", "bang"] } }"#,
    )
    .unwrap();
    let model = build_model(
        "{ onBoom: function() { } }",
        &runtime,
        &TransformOptions::default(),
    );
    let built = model.build();
    match &built.members[0] {
        ClassMember::Method(method) => {
            let off = method
                .decorators
                .iter()
                .find(|d| d.name == "off")
                .expect("expected an off decorator");
            assert_eq!(
                off.args.as_deref(),
                Some(
                    &[
                        DecoratorArg::Str("boom".to_string()),
                        DecoratorArg::Str("bang".to_string())
                    ][..]
                )
            );
        }
        other => panic!("expected a method, got {:?}", other),
    }
}

#[test]
fn object_literal_needs_class_fields_option() {
    let runtime = RuntimeData::default();
    let options = TransformOptions {
        class_fields: false,
        ..TransformOptions::default()
    };
    let model = build_model("{ config: { a: 1 } }", &runtime, &options);
    let errors = model.type_errors();
    assert!(!errors.is_empty());
    assert!(
        errors[0].contains("--class-fields"),
        "error should reference the missing option: {}",
        errors[0]
    );
    // The error is advisory; build still produces the member
    assert_eq!(model.build().members.len(), 1);
}

#[test]
fn query_params_is_allow_listed() {
    let runtime = RuntimeData::default();
    let options = TransformOptions {
        class_fields: false,
        ..TransformOptions::default()
    };
    let model = build_model("{ queryParams: { page: 1 } }", &runtime, &options);
    assert!(model.type_errors().is_empty());
}

#[test]
fn unsupported_existing_decorators_are_dropped_with_events() {
    let (runtime, options) = defaults();
    let model = build_model(
        "{ @mystery @tracked count: 1 }",
        &runtime,
        &options,
    );
    // `tracked` translates, `mystery` is dropped with one event
    assert_eq!(model.decorator_names(), vec!["tracked".to_string()]);
    let events = model.diagnostics();
    let ignored: Vec<_> = events
        .iter()
        .filter(|d| {
            d.kind == ember_codemod::transform::DiagnosticKind::IgnoredDecorator
        })
        .collect();
    assert_eq!(ignored.len(), 1);
    assert!(ignored[0].message.contains("mystery"));
}

#[test]
fn computed_metadata_adds_computed_once() {
    let runtime = RuntimeData::from_json(
        r#"{ "type": "Component", "computedProperties": ["total"] }"#,
    )
    .unwrap();
    let model = build_model("{ total: 5 }", &runtime, &TransformOptions::default());
    assert!(model.has_runtime_data());
    let names = model.decorator_names();
    assert_eq!(
        names.iter().filter(|n| n.as_str() == "computed").count(),
        1
    );
}

#[test]
fn existing_computed_decorator_is_not_duplicated() {
    let runtime = RuntimeData::from_json(
        r#"{ "type": "Component", "computedProperties": ["total"] }"#,
    )
    .unwrap();
    let model = build_model(
        "{ @computed('a') total: 5 }",
        &runtime,
        &TransformOptions::default(),
    );
    let names = model.decorator_names();
    assert_eq!(
        names.iter().filter(|n| n.as_str() == "computed").count(),
        1,
        "metadata must not re-add an equivalent decorator"
    );
}

#[test]
fn service_injection_becomes_a_bare_decorator() {
    let (runtime, options) = defaults();
    let model = build_model("{ store: service() }", &runtime, &options);
    let built = model.build();
    match &built.members[0] {
        ClassMember::Field(field) => {
            assert_eq!(field.decorators.len(), 1);
            assert_eq!(field.decorators[0].name, "service");
            assert!(field.decorators[0].args.is_none());
            // The annotation supplies the value
            assert!(field.value.is_none());
        }
        other => panic!("expected a field, got {:?}", other),
    }
}

#[test]
fn named_service_keeps_its_argument() {
    let (runtime, options) = defaults();
    let model = build_model("{ cart: service('shopping-cart') }", &runtime, &options);
    let built = model.build();
    match &built.members[0] {
        ClassMember::Field(field) => {
            assert_eq!(
                field.decorators[0].args.as_deref(),
                Some(&[DecoratorArg::Source("'shopping-cart'".to_string())][..])
            );
        }
        other => panic!("expected a field, got {:?}", other),
    }
}

#[test]
fn computed_object_form_builds_getter_and_setter() {
    let (runtime, options) = defaults();
    let model = build_model(
        "{ fullName: computed('first', { get() { return this._n; }, set(value) { this._n = value; } }) }",
        &runtime,
        &options,
    );
    let built = model.build();
    assert_eq!(built.members.len(), 2);
    match (&built.members[0], &built.members[1]) {
        (ClassMember::Method(getter), ClassMember::Method(setter)) => {
            assert_eq!(getter.kind, MethodKind::Getter);
            assert_eq!(setter.kind, MethodKind::Setter);
            // Decorators ride on the first accessor only
            assert_eq!(getter.decorators.len(), 1);
            assert!(setter.decorators.is_empty());
        }
        other => panic!("expected two methods, got {:?}", other),
    }
}

#[test]
fn class_decorator_builds_no_members() {
    let (runtime, options) = defaults();
    let model = build_model("{ tagName: 'li' }", &runtime, &options);
    let built = model.build();
    assert!(built.members.is_empty());
    assert_eq!(built.class_decorators.len(), 1);
    assert_eq!(built.class_decorators[0].name, "tagName");
    assert_eq!(
        built.class_decorators[0].args.as_deref(),
        Some(&[DecoratorArg::Str("li".to_string())][..])
    );
}

#[test]
fn decorators_disabled_is_a_type_error() {
    let runtime = RuntimeData::default();
    let options = TransformOptions {
        decorators: false,
        ..TransformOptions::default()
    };
    let model = build_model("{ store: service() }", &runtime, &options);
    assert!(model
        .type_errors()
        .iter()
        .any(|e| e.contains("--decorators")));
    // Still builds
    assert_eq!(model.build().members.len(), 1);
}

#[test]
fn observer_macro_builds_a_decorated_method() {
    let (runtime, options) = defaults();
    let model = build_model(
        "{ watcher: observer('first', function() { this.update(); }) }",
        &runtime,
        &options,
    );
    match &model {
        PropertyModel::ComputedFunction(_) => {}
        other => panic!("expected the computed-function variant, got {:?}", other),
    }
    let built = model.build();
    match &built.members[0] {
        ClassMember::Method(method) => {
            assert_eq!(method.kind, MethodKind::Method);
            assert_eq!(method.decorators[0].name, "observes");
        }
        other => panic!("expected a method, got {:?}", other),
    }
}
