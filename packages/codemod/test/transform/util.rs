//! Shared helpers for the transform tests.

#![allow(dead_code)]

use ember_codemod::js_parser::ast::{ObjectProperty, Statement};
use ember_codemod::js_parser::Parser;
use ember_codemod::options::TransformOptions;
use ember_codemod::runtime_data::RuntimeData;
use ember_codemod::transform::properties::PropertyModel;
use ember_codemod::transform::classify;

/// Wrap an object-literal body in an extend call and return its parsed
/// properties plus the wrapped source (spans index into it)
pub fn parse_extend_props(body: &str) -> (Vec<ObjectProperty>, String) {
    let source = format!("const Sample = Base.extend({});", body);
    let result = Parser::new().parse_module(&source);
    assert!(
        result.errors.is_empty(),
        "unexpected parse errors: {:?}",
        result.errors
    );
    let init = match &result.module.statements[0] {
        Statement::Var(var) => &var.init,
        other => panic!("expected a var declaration, got {:?}", other),
    };
    let call = init.as_call().expect("expected an extend call");
    let object = call.args[0].as_object().expect("expected an object argument");
    (object.properties.clone(), source)
}

/// Classify every property of an object-literal body
pub fn build_models(
    body: &str,
    runtime: &RuntimeData,
    options: &TransformOptions,
) -> Vec<PropertyModel> {
    let (props, source) = parse_extend_props(body);
    props
        .iter()
        .map(|p| classify(p, &source, runtime, options))
        .collect()
}

pub fn build_model(body: &str, runtime: &RuntimeData, options: &TransformOptions) -> PropertyModel {
    let mut models = build_models(body, runtime, options);
    assert_eq!(models.len(), 1, "expected exactly one property");
    models.remove(0)
}
