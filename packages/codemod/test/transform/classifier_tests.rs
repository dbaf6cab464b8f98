//! Classifier Tests
//!
//! Classification is total and deterministic: every declaration shape maps
//! to exactly one variant, with `Simple` and the call variant as declared
//! fallbacks.

use ember_codemod::options::TransformOptions;
use ember_codemod::runtime_data::RuntimeData;
use ember_codemod::transform::properties::PropertyModel;

#[path = "util.rs"]
mod util;
use util::{build_model, build_models};

fn classify_one(body: &str) -> PropertyModel {
    build_model(body, &RuntimeData::default(), &TransformOptions::default())
}

fn variant_name(model: &PropertyModel) -> &'static str {
    match model {
        PropertyModel::Simple(_) => "simple",
        PropertyModel::Method(_) => "method",
        PropertyModel::FunctionExpression(_) => "function-expression",
        PropertyModel::ComputedFunction(_) => "computed-function",
        PropertyModel::ComputedObject(_) => "computed-object",
        PropertyModel::Call(_) => "call",
        PropertyModel::Actions(_) => "actions",
        PropertyModel::ClassDecorator(_) => "class-decorator",
    }
}

#[test]
fn every_shape_maps_to_exactly_one_variant() {
    let cases: &[(&str, &str)] = &[
        ("{ count: 42 }", "simple"),
        ("{ title: 'hello' }", "simple"),
        ("{ config: { a: 1 } }", "simple"),
        ("{ list: [1, 2] }", "simple"),
        ("{ later: undefined }", "simple"),
        ("{ handler: () => {} }", "simple"),
        ("{ click() { } }", "method"),
        ("{ get title() { return this._t; } }", "method"),
        ("{ set title(v) { this._t = v; } }", "method"),
        ("{ init: function() { } }", "function-expression"),
        (
            "{ fullName: computed('first', 'last', function() { return 1; }) }",
            "computed-function",
        ),
        (
            "{ fullName: computed('first', { get() { return 1; }, set(v) { } }) }",
            "computed-object",
        ),
        (
            "{ watcher: observer('first', function() { }) }",
            "computed-function",
        ),
        ("{ count: computed('items.[]') }", "call"),
        ("{ store: service() }", "call"),
        ("{ appController: controller('application') }", "call"),
        ("{ name: alias('model.name') }", "call"),
        ("{ custom: someHelper('x') }", "call"),
        ("{ tagName: 'li' }", "class-decorator"),
        ("{ classNames: ['a'] }", "class-decorator"),
        ("{ classNameBindings: ['isActive:active'] }", "class-decorator"),
        ("{ attributeBindings: ['href'] }", "class-decorator"),
        ("{ layout }", "class-decorator"),
        ("{ actions: { save() { } } }", "actions"),
        // `actions` with a non-object value is not the actions map
        ("{ actions: buildActions() }", "call"),
    ];
    for (body, expected) in cases {
        let model = classify_one(body);
        assert_eq!(
            variant_name(&model),
            *expected,
            "classification mismatch for {}",
            body
        );
    }
}

#[test]
fn classification_is_deterministic() {
    for _ in 0..3 {
        let model = classify_one("{ fullName: computed('a', function() { return 1; }) }");
        assert_eq!(variant_name(&model), "computed-function");
    }
}

#[test]
fn special_forms_win_over_class_decorator_names() {
    // Rule order: a computed macro on a class-decorator name is still a
    // computed property
    let model = classify_one("{ layout: computed('x', function() { return 1; }) }");
    assert_eq!(variant_name(&model), "computed-function");
}

#[test]
fn unrecognized_shapes_never_drop_data() {
    let models = build_models(
        "{ a: 1, b: weird.chain()(), c: `template`, d: x ? y : z }",
        &RuntimeData::default(),
        &TransformOptions::default(),
    );
    assert_eq!(models.len(), 4);
    for model in &models {
        let built = model.build();
        assert_eq!(
            built.members.len(),
            1,
            "fallback variant must still build a member"
        );
    }
}

#[test]
fn computed_key_properties_stay_simple() {
    let model = classify_one("{ [DYNAMIC_KEY]: 1 }");
    assert_eq!(variant_name(&model), "simple");
    assert!(model.computed_key());
}
