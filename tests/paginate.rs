// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! End-to-end tests for the pagination rewrite pass: parse a template,
//! run [`Paginator`], and assert on the rewritten tree and the recorded
//! directive.

use strata_templates::{
    parse_template, run_passes, traverse_module, CompileError, Module, Paginator,
};

fn compile(source: &str) -> Module {
    compile_with(&mut Paginator::new(), source)
}

fn compile_with(pass: &mut Paginator, source: &str) -> Module {
    let mut module = parse_template("test.html", source).expect("template should parse");
    traverse_module(pass, &mut module).expect("pass should succeed");
    module
}

fn compile_err(source: &str) -> CompileError {
    let mut module = parse_template("test.html", source).expect("template should parse");
    traverse_module(&mut Paginator::new(), &mut module).expect_err("pass should fail")
}

#[test]
fn paginate_rewrites_to_slice_with_default_page_size() {
    let module = compile("{{ paginate(documents) }}");
    assert_eq!(module.to_string(), "{{ documents|slice(__offset__, 10) }}");

    let directive = module.pagination().expect("directive recorded");
    assert_eq!(directive.page_size, 10);
    assert_eq!(directive.source.to_string(), "documents");
}

#[test]
fn paginate_rewrites_to_slice_with_explicit_page_size() {
    let module = compile("{{ paginate(documents, 5) }}");
    assert_eq!(module.to_string(), "{{ documents|slice(__offset__, 5) }}");
    assert_eq!(module.pagination().map(|d| d.page_size), Some(5));
}

#[test]
fn configured_default_page_size_is_used_when_argument_is_absent() {
    let mut pass = Paginator::with_page_size(25);
    let module = compile_with(&mut pass, "{{ paginate(documents) }}");
    assert_eq!(module.to_string(), "{{ documents|slice(__offset__, 25) }}");
    assert_eq!(module.pagination().map(|d| d.page_size), Some(25));

    // An explicit argument still overrides the configured default.
    let module = compile_with(&mut pass, "{{ paginate(documents, 3) }}");
    assert_eq!(module.pagination().map(|d| d.page_size), Some(3));
}

#[test]
fn paginate_source_can_be_any_expression() {
    let module = compile("{{ paginate(documents|reverse, 5) }}");
    assert_eq!(
        module.to_string(),
        "{{ documents|reverse|slice(__offset__, 5) }}"
    );
    assert_eq!(
        module.pagination().map(|d| d.source.to_string()),
        Some("documents|reverse".to_string())
    );
}

#[test]
fn paginate_without_arguments_is_a_compile_error() {
    let err = compile_err("first line\n{{ paginate() }}");
    assert_eq!(err, CompileError::MissingArgument { line: 2 });
    assert_eq!(
        err.to_string(),
        "missing first argument of \"paginate\" function at line 2"
    );
}

#[test]
fn paginate_with_a_string_page_size_is_a_compile_error() {
    let err = compile_err("{{ paginate(documents, \"abc\") }}");
    assert_eq!(err, CompileError::InvalidArgumentType { line: 1 });
}

#[test]
fn paginate_with_a_variable_page_size_is_a_compile_error() {
    let err = compile_err("{{ paginate(documents, per_page) }}");
    assert_eq!(err, CompileError::InvalidArgumentType { line: 1 });
}

#[test]
fn malformed_page_size_does_not_fall_back_to_the_default() {
    // A malformed second argument aborts compilation outright.
    let err = compile_err("{{ paginate(documents, 2.5) }}");
    assert_eq!(err, CompileError::InvalidArgumentType { line: 1 });
}

#[test]
fn preceding_render_documents_receives_the_placeholders() {
    let module = compile("{{ render_documents(documents) }}\n{{ paginate(documents) }}");
    assert_eq!(
        module.to_string(),
        "{{ render_documents(documents, __pages__, __current_page__) }}\n\
         {{ documents|slice(__offset__, 10) }}"
    );
}

#[test]
fn render_documents_wrapping_paginate_receives_the_placeholders() {
    let module = compile("{{ render_documents(paginate(documents, 10)) }}");
    assert_eq!(
        module.to_string(),
        "{{ render_documents(documents|slice(__offset__, 10), __pages__, __current_page__) }}"
    );
    assert_eq!(module.pagination().map(|d| d.page_size), Some(10));
}

#[test]
fn without_render_documents_no_mutation_and_no_error() {
    let module = compile("{{ paginate(documents) }}{{ other_call(documents) }}");
    assert_eq!(
        module.to_string(),
        "{{ documents|slice(__offset__, 10) }}{{ other_call(documents) }}"
    );
}

#[test]
fn render_documents_after_paginate_is_left_alone() {
    let module = compile("{{ paginate(documents) }}{{ render_documents(documents) }}");
    assert_eq!(
        module.to_string(),
        "{{ documents|slice(__offset__, 10) }}{{ render_documents(documents) }}"
    );
}

#[test]
fn the_last_render_documents_before_paginate_wins() {
    let module = compile(
        "{{ render_documents(first) }}{{ render_documents(second) }}{{ paginate(documents) }}",
    );
    assert_eq!(
        module.to_string(),
        "{{ render_documents(first) }}\
         {{ render_documents(second, __pages__, __current_page__) }}\
         {{ documents|slice(__offset__, 10) }}"
    );
}

#[test]
fn a_second_paginate_does_not_rewire_a_consumed_call() {
    let module = compile(
        "{{ render_documents(documents) }}{{ paginate(first) }}{{ paginate(second, 5) }}",
    );
    assert_eq!(
        module.to_string(),
        "{{ render_documents(documents, __pages__, __current_page__) }}\
         {{ first|slice(__offset__, 10) }}\
         {{ second|slice(__offset__, 5) }}"
    );
    // The last paginate call wins the directive slot.
    let directive = module.pagination().expect("directive recorded");
    assert_eq!(directive.page_size, 5);
    assert_eq!(directive.source.to_string(), "second");
    assert_eq!(module.extra.len(), 1);
}

#[test]
fn one_instance_across_templates_matches_fresh_instances() {
    let first = "{{ render_documents(documents) }}";
    let second = "{{ paginate(documents) }}";

    let mut shared = Paginator::new();
    let shared_first = compile_with(&mut shared, first);
    let shared_second = compile_with(&mut shared, second);

    let fresh_first = compile(first);
    let fresh_second = compile(second);

    assert_eq!(shared_first.to_string(), fresh_first.to_string());
    assert_eq!(shared_second.to_string(), fresh_second.to_string());

    // The pending call from the first template must not leak: the second
    // template has no render_documents call, so nothing gets wired up.
    assert_eq!(
        shared_second.to_string(),
        "{{ documents|slice(__offset__, 10) }}"
    );
    assert_eq!(shared_first.to_string(), "{{ render_documents(documents) }}");
}

#[test]
fn rerunning_the_pass_over_a_rewritten_tree_is_a_no_op() {
    let mut module =
        parse_template("test.html", "{{ render_documents(paginate(documents)) }}").unwrap();
    traverse_module(&mut Paginator::new(), &mut module).unwrap();
    let first_pass = module.to_string();

    traverse_module(&mut Paginator::new(), &mut module).unwrap();
    assert_eq!(module.to_string(), first_pass);
    assert_eq!(module.extra.len(), 1, "directive is not duplicated");
}

#[test]
fn run_passes_drives_the_paginator() {
    let mut module = parse_template("test.html", "{{ paginate(documents) }}").unwrap();
    let mut pass = Paginator::new();
    run_passes(&mut module, &mut [&mut pass]).unwrap();
    assert_eq!(module.to_string(), "{{ documents|slice(__offset__, 10) }}");
}

#[test]
fn surrounding_text_and_comments_survive_the_rewrite() {
    let module = compile("<ul>\n{# newest first #}{{ paginate(documents, 2) }}\n</ul>\n");
    assert_eq!(
        module.to_string(),
        "<ul>\n{{ documents|slice(__offset__, 2) }}\n</ul>\n"
    );
}
