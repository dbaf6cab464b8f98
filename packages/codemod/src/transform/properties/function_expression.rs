//! Function-expression property: `key: function() { ... }` becoming a
//! class method.

use crate::js_parser::ast::ObjectProperty;
use crate::options::TransformOptions;
use crate::output::output_ast::{ClassMember, ClassMethod, MethodKind};
use crate::runtime_data::RuntimeData;
use crate::transform::properties::{BuildOutput, PropertyCore};

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionExpressionProperty {
    pub core: PropertyCore,
    params: Vec<String>,
    body: String,
}

impl FunctionExpressionProperty {
    pub fn new(
        prop: &ObjectProperty,
        source: &str,
        runtime_data: &RuntimeData,
        options: &TransformOptions,
    ) -> Self {
        let mut core = PropertyCore::new(prop, source, runtime_data, options, false);
        let (params, body) = match prop.value.as_function() {
            Some(function) => (
                function.params.clone(),
                function.body_span.text(source).to_string(),
            ),
            None => (Vec::new(), "{}".to_string()),
        };
        core.check_decorators_allowed();
        FunctionExpressionProperty { core, params, body }
    }

    pub fn build(&self) -> BuildOutput {
        BuildOutput::members(vec![ClassMember::Method(ClassMethod {
            key: self.core.key.clone(),
            kind: MethodKind::Method,
            params: self.params.clone(),
            body: self.body.clone(),
            decorators: self.core.decorators.clone(),
            comments: self.core.comments.clone(),
        })])
    }
}
