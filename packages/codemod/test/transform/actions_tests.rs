//! Actions Expansion Tests

use ember_codemod::options::TransformOptions;
use ember_codemod::output::output_ast::ClassMember;
use ember_codemod::runtime_data::RuntimeData;
use ember_codemod::transform::{DecoratorImportSpecs, DiagnosticKind};

#[path = "util.rs"]
mod util;
use util::build_model;

#[test]
fn actions_expand_into_annotated_methods() {
    let model = build_model(
        "{ actions: { save() { this.model.save(); }, cancel() { this.reset(); } } }",
        &RuntimeData::default(),
        &TransformOptions::default(),
    );
    let built = model.build();
    assert_eq!(built.members.len(), 2);
    let mut names = Vec::new();
    for member in &built.members {
        match member {
            ClassMember::Method(method) => {
                names.push(method.key.name.clone());
                assert!(
                    method.decorators.iter().any(|d| d.name == "action"),
                    "every expanded action carries the action annotation"
                );
            }
            other => panic!("expected a method, got {:?}", other),
        }
    }
    assert_eq!(names, vec!["save", "cancel"]);
    assert!(model.import_specs().contains(DecoratorImportSpecs::ACTION));
}

#[test]
fn non_function_entries_are_errors_but_siblings_survive() {
    let model = build_model(
        "{ actions: { broken: 42, save() { } } }",
        &RuntimeData::default(),
        &TransformOptions::default(),
    );
    let errors = model.type_errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("broken"));
    // The rest of the map still expands
    assert_eq!(model.build().members.len(), 1);
}

#[test]
fn function_expression_entries_also_expand() {
    let model = build_model(
        "{ actions: { submit: function() { } } }",
        &RuntimeData::default(),
        &TransformOptions::default(),
    );
    assert_eq!(model.build().members.len(), 1);
}

#[test]
fn overridden_actions_are_flagged_for_review() {
    let runtime = RuntimeData::from_json(
        r#"{ "type": "Component", "overriddenActions": ["save"] }"#,
    )
    .unwrap();
    let model = build_model(
        "{ actions: { save() { }, cancel() { } } }",
        &runtime,
        &TransformOptions::default(),
    );
    let reviews: Vec<_> = model
        .diagnostics()
        .into_iter()
        .filter(|d| d.kind == DiagnosticKind::ManualReview)
        .collect();
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0].property, "save");
}
