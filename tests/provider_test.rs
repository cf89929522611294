//! Scope hierarchy and property resolution, end to end.

#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use std::collections::HashMap;
use std::fs;

use googletest::prelude::*;
use rstest::{
    fixture,
    rstest,
};
use scoped_i18n::config::I18nSettings;
use scoped_i18n::input::BundleTree;
use scoped_i18n::input::BundleTreeSet;
use scoped_i18n::resolve::{
    I18nProp,
    ResolvedOutput,
};
use scoped_i18n::types::{
    LocalizedValue,
    display_arg,
};
use scoped_i18n::{
    I18nError,
    ScopeConfig,
    ScopeId,
    ScopeTree,
};
use serde_json::json;
use tempfile::TempDir;

fn root_languages() -> BundleTreeSet {
    let en = BundleTree::new()
        .with("hello", "Hello.1")
        .with("role", "Role.1")
        .with(
            "args",
            LocalizedValue::generator(|args| {
                let arg = |i: usize| args.get(i).map(display_arg).unwrap_or_default();
                format!("Has {} and {}", arg(0), arg(1))
            }),
        )
        .with("bold", "Some **bold** text")
        .with("italic", "Some *italic* text")
        .with("strikethrough", "Some ~~strikethrough~~ text")
        .with("code", "Some `code` text")
        .with("link", "A [link](url) here")
        .with("mixed", "Some ***bold italic*** `code` [link](url) ~~strikethrough~~ here");
    let other = BundleTree::new().with("hello", "Hello.2").with("role", "Role.2");

    HashMap::from([("en".to_string(), en), ("other".to_string(), other)])
}

fn nested_languages() -> BundleTreeSet {
    HashMap::from([
        ("en".to_string(), BundleTree::new().with("hello", "Hello.nested.1")),
        ("other".to_string(), BundleTree::new().with("hello", "Hello.nested.2")),
    ])
}

#[fixture]
fn provider() -> (ScopeTree, ScopeId) {
    let mut tree = ScopeTree::new(I18nSettings::default());
    let root = tree.enter_root(ScopeConfig::new().bundles(root_languages()).lang("en")).unwrap();
    (tree, root)
}

fn render(tree: &ScopeTree, scope: ScopeId, prop: serde_json::Value) -> Vec<(String, ResolvedOutput)> {
    let prop: I18nProp = serde_json::from_value(prop).unwrap();
    tree.resolve_prop(scope, prop).unwrap()
}

fn html(value: &str) -> ResolvedOutput {
    ResolvedOutput::Html(value.to_string())
}

fn plain(value: &str) -> ResolvedOutput {
    ResolvedOutput::Plain(value.to_string())
}

#[rstest]
fn renders_to_children_by_default(provider: (ScopeTree, ScopeId)) {
    let (tree, root) = provider;

    assert_eq!(render(&tree, root, json!("hello")), vec![("children".to_string(), html("Hello.1"))]);
}

#[rstest]
fn renders_to_children_explicitly(provider: (ScopeTree, ScopeId)) {
    let (tree, root) = provider;

    assert_eq!(
        render(&tree, root, json!({"children": "hello"})),
        vec![("children".to_string(), html("Hello.1"))]
    );
}

#[rstest]
fn renders_multiple_properties(provider: (ScopeTree, ScopeId)) {
    let (tree, root) = provider;

    assert_eq!(
        render(&tree, root, json!([{"children": "hello"}, {"role": "role"}])),
        vec![("children".to_string(), html("Hello.1")), ("role".to_string(), plain("Role.1"))]
    );
}

#[rstest]
fn supports_args(provider: (ScopeTree, ScopeId)) {
    let (tree, root) = provider;

    assert_eq!(
        render(&tree, root, json!({"children": "args", "args": [1, "abc"]})),
        vec![("children".to_string(), html("Has 1 and abc"))]
    );
}

#[rstest]
fn nested_bundles_inherit_lang(provider: (ScopeTree, ScopeId)) {
    let (mut tree, root) = provider;
    let nested = tree.enter(root, ScopeConfig::new().bundles(nested_languages())).unwrap();

    assert_eq!(
        render(&tree, nested, json!([{"children": "hello"}, {"role": "role"}])),
        vec![("children".to_string(), html("Hello.nested.1")), ("role".to_string(), plain("Role.1"))]
    );
}

#[rstest]
fn nested_bundles_override_lang(provider: (ScopeTree, ScopeId)) {
    let (mut tree, root) = provider;
    let nested =
        tree.enter(root, ScopeConfig::new().bundles(nested_languages()).lang("other")).unwrap();

    assert_eq!(
        render(&tree, nested, json!([{"children": "hello"}, {"role": "role"}])),
        vec![("children".to_string(), html("Hello.nested.2")), ("role".to_string(), plain("Role.2"))]
    );
}

#[rstest]
fn missing_key_leaves_property_unset(provider: (ScopeTree, ScopeId)) {
    let (tree, root) = provider;

    assert_that!(render(&tree, root, json!({"title": "does.not.exist"})), is_empty());
}

#[rstest]
#[case::bold("bold", "Some <strong>bold</strong> text")]
#[case::italic("italic", "Some <em>italic</em> text")]
#[case::strikethrough("strikethrough", "Some <del>strikethrough</del> text")]
#[case::code("code", "Some <code>code</code> text")]
#[case::link("link", r#"A <a href="url">link</a> here"#)]
#[case::mixed(
    "mixed",
    r#"Some <strong><em>bold italic</em></strong> <code>code</code> <a href="url">link</a> <del>strikethrough</del> here"#
)]
fn supports_markdown(provider: (ScopeTree, ScopeId), #[case] key: &str, #[case] expected: &str) {
    let (tree, root) = provider;

    assert_eq!(render(&tree, root, json!(key)), vec![("children".to_string(), html(expected))]);
}

#[rstest]
fn no_language_anywhere_fails() {
    let mut tree = ScopeTree::new(I18nSettings::default());

    let result = tree.enter_root(ScopeConfig::new().bundles(root_languages()));

    assert!(matches!(result, Err(I18nError::MissingLanguage)));
}

#[rstest]
fn invalid_prop_is_rejected(provider: (ScopeTree, ScopeId)) {
    let (tree, root) = provider;
    let prop: I18nProp = serde_json::from_value(json!({"children": "hello", "role": "role"})).unwrap();

    let result = tree.resolve_prop(root, prop);

    assert!(matches!(result, Err(I18nError::InvalidRequest(_))));
}

#[rstest]
fn config_file_drives_separator_and_content_property() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".scoped-i18n.json"),
        r#"{"keySeparator": "/", "contentProperty": "html"}"#,
    )
    .unwrap();
    let bundles = HashMap::from([(
        "en".to_string(),
        BundleTree::new().with("menu", BundleTree::new().with("open", "**Open**")),
    )]);

    let mut tree = ScopeTree::from_config_dir(dir.path()).unwrap();
    let root = tree.enter_root(ScopeConfig::new().bundles(bundles).lang("en")).unwrap();

    assert_eq!(
        render(&tree, root, json!("menu/open")),
        vec![("html".to_string(), html("<strong>Open</strong>"))]
    );
    assert_that!(render(&tree, root, json!("menu.open")), is_empty());
}

#[rstest]
fn invalid_config_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".scoped-i18n.json"), r#"{"keySeparator": ""}"#).unwrap();

    let result = ScopeTree::from_config_dir(dir.path());

    assert!(matches!(result, Err(I18nError::Config(_))));
}

#[rstest]
fn missing_config_file_uses_defaults() {
    let dir = TempDir::new().unwrap();

    let tree = ScopeTree::from_config_dir(dir.path()).unwrap();

    assert_that!(tree.settings(), eq(&I18nSettings::default()));
}
