//! Module Transform Tests
//!
//! Whole-file rewrites: extend calls become classes, imports are added or
//! merged, and everything else in the file is untouched.

use ember_codemod::{ModuleTransformer, RuntimeData, TransformOptions};

fn transform(source: &str, file_name: &str, runtime: Option<&RuntimeData>) -> String {
    let transformer = ModuleTransformer::new(TransformOptions::default());
    let result = transformer.transform_source(source, file_name, runtime);
    assert!(
        result.parse_errors.is_empty(),
        "unexpected parse errors: {:?}",
        result.parse_errors
    );
    result.output.expect("expected a transformed output")
}

#[test]
fn transforms_an_export_default_component() {
    let source = "\
import Component from '@ember/component';

export default Component.extend({
  tagName: 'li',

  count: 0,

  actions: {
    save() { this.model.save(); }
  }
});
";
    let expected = "\
import Component from '@ember/component';
import { action } from '@ember/object';
import { tagName } from '@ember-decorators/component';

@tagName('li')
export default class TodoItem extends Component {
  count = 0;

  @action
  save() { this.model.save(); }
}
";
    assert_eq!(
        transform(source, "app/components/todo-item.js", None),
        expected
    );
}

#[test]
fn transforms_a_named_declaration_with_mixins() {
    let source = "\
import Component from '@ember/component';
import { computed } from '@ember/object';

const Row = Component.extend(SortableMixin, {
  store: service(),
  total: computed('items.[]', function() { return this.items.length; }).readOnly()
});

export default Row;
";
    let expected = "\
import Component from '@ember/component';
import { computed } from '@ember/object';
import { inject as service } from '@ember/service';
import { readOnly } from '@ember/object/computed';

class Row extends Component.extend(SortableMixin) {
  @service store;

  @computed('items.[]')
  @readOnly
  get total() { return this.items.length; }
}

export default Row;
";
    assert_eq!(transform(source, "app/components/row.js", None), expected);
}

#[test]
fn merges_into_an_existing_decorator_import() {
    let source = "\
import Component from '@ember/component';
import { tagName } from '@ember-decorators/component';
import layout from './template';

export default Component.extend({
  layout,
  tagName: 'div'
});
";
    let expected = "\
import Component from '@ember/component';
import { tagName, layout as templateLayout } from '@ember-decorators/component';
import layout from './template';

@templateLayout(layout)
@tagName('div')
export default class Foo extends Component {
}
";
    assert_eq!(transform(source, "app/components/foo.js", None), expected);
}

#[test]
fn synthesizes_decorators_from_runtime_metadata() {
    let source = "\
export default Base.extend({
  foo: 1
});
";
    let runtime = RuntimeData::from_json(
        r#"{ "type": "EmberObject", "unobservedProperties": { "foo": ["bar"] } }"#,
    )
    .unwrap();
    let expected = "\
import { unobserves } from '@ember-decorators/object';
export default class Thing extends Base {
  @unobserves('bar') foo = 1;
}
";
    assert_eq!(
        transform(source, "app/utils/thing.js", Some(&runtime)),
        expected
    );
}

#[test]
fn files_without_extend_calls_are_left_alone() {
    let source = "const x = 1;\nexport default x;\n";
    let transformer = ModuleTransformer::new(TransformOptions::default());
    let result = transformer.transform_source(source, "app/utils/x.js", None);
    assert!(result.output.is_none());
    assert!(result.type_errors.is_empty());
}

#[test]
fn surrounding_statements_survive_verbatim() {
    let source = "\
import Component from '@ember/component';

function helper(x) { return x * 2; }

export default Component.extend({
  count: 0
});

helper(2);
";
    let output = transform(source, "app/components/counter.js", None);
    assert!(output.contains("function helper(x) { return x * 2; }"));
    assert!(output.contains("helper(2);"));
    assert!(output.contains("export default class Counter extends Component {"));
}

#[test]
fn type_errors_are_advisory_and_reported() {
    let source = "\
export default Base.extend({
  config: { a: 1 }
});
";
    let options = TransformOptions {
        class_fields: false,
        ..TransformOptions::default()
    };
    let transformer = ModuleTransformer::new(options);
    let result = transformer.transform_source(source, "app/utils/conf.js", None);
    assert!(result
        .type_errors
        .iter()
        .any(|e| e.contains("--class-fields")));
    // The transform still proceeds
    let output = result.output.expect("output should still be produced");
    assert!(output.contains("class Conf extends Base {"));
    assert!(output.contains("config = { a: 1 };"));
}

#[test]
fn strict_transform_fails_on_parse_errors() {
    let transformer = ModuleTransformer::new(TransformOptions::default());
    let err = transformer
        .transform_source_strict("export default Base.extend({ @ });", "bad.js", None)
        .unwrap_err();
    assert!(err.to_string().contains("bad.js"));
}

#[test]
fn transforming_twice_is_stable() {
    let source = "\
export default Base.extend({
  count: 1
});
";
    let transformer = ModuleTransformer::new(TransformOptions::default());
    let first = transformer
        .transform_source(source, "app/utils/c.js", None)
        .output
        .expect("first transform");
    // The output has no extend call left, so a second run is a no-op
    let second = transformer.transform_source(&first, "app/utils/c.js", None);
    assert!(second.output.is_none());
}
