//! Property-based tests for the structural matcher.
//!
//! Values are generated as small trees of scalars and records over a fixed
//! set of record tags, then checked against the laws the matcher must keep:
//! wildcards and bindings never fail, a value's own literal matches it,
//! repeated matching is deterministic, and first-match selection agrees
//! with a linear scan.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::needless_pass_by_value,
    reason = "Proptest macros generate code with these patterns"
)]

use proptest::prelude::*;
use sealed_ir::{Name, Pattern, StringInterner, Value};
use sealed_patterns::{match_pattern, select_arm, MatchResult};

// -- Value Generation --

const TAGS: [&str; 3] = ["Leaf", "Pair", "Triple"];

/// Interner-independent description of a value.
#[derive(Clone, Debug)]
enum Tree {
    Int(i64),
    Bool(bool),
    Str(String),
    Record(usize, Vec<Tree>),
}

fn tree_strategy() -> impl Strategy<Value = Tree> {
    let leaf = prop_oneof![
        any::<i64>().prop_map(Tree::Int),
        any::<bool>().prop_map(Tree::Bool),
        "[a-z]{0,8}".prop_map(Tree::Str),
    ];
    leaf.prop_recursive(4, 32, 3, |inner| {
        (0..TAGS.len(), prop::collection::vec(inner, 0..=3))
            .prop_map(|(tag, fields)| Tree::Record(tag, fields))
    })
}

fn build(tree: &Tree, names: &StringInterner) -> Value {
    match tree {
        Tree::Int(n) => Value::int(*n),
        Tree::Bool(b) => Value::bool(*b),
        Tree::Str(s) => Value::string(s.as_str()),
        Tree::Record(tag, fields) => Value::record(
            names.intern(TAGS[*tag]),
            fields.iter().map(|f| build(f, names)).collect(),
        ),
    }
}

/// Pattern that mirrors the value's shape, binding every leaf.
fn mirror(value: &Value, names: &StringInterner, counter: &mut usize) -> Pattern {
    match value.shape() {
        Some((tag, fields)) => Pattern::deconstruct(
            tag,
            fields.iter().map(|f| mirror(f, names, counter)).collect(),
        ),
        None => {
            *counter += 1;
            Pattern::binding(names.intern(&format!("v{counter}")))
        }
    }
}

fn leaf_count(value: &Value) -> usize {
    match value.shape() {
        Some((_, fields)) => fields.iter().map(leaf_count).sum(),
        None => 1,
    }
}

// -- Properties --

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    #[test]
    fn prop_wildcard_always_matches(tree in tree_strategy()) {
        let names = StringInterner::new();
        let value = build(&tree, &names);
        let result = match_pattern(&Pattern::Wildcard, &value);
        prop_assert!(result.bindings().is_some_and(|b| b.is_empty()));
    }

    #[test]
    fn prop_binding_captures_value(tree in tree_strategy()) {
        let names = StringInterner::new();
        let value = build(&tree, &names);
        let x = names.intern("x");
        let bindings = match_pattern(&Pattern::binding(x), &value).into_bindings().unwrap();
        prop_assert_eq!(bindings.get(x), Some(&value));
    }

    #[test]
    fn prop_literal_matches_itself(tree in tree_strategy()) {
        let names = StringInterner::new();
        let value = build(&tree, &names);
        // Rebuilt separately: no shared storage with `value`.
        let twin = build(&tree, &names);
        prop_assert!(match_pattern(&Pattern::literal(twin), &value).is_success());
    }

    #[test]
    fn prop_matching_is_deterministic(tree in tree_strategy()) {
        let names = StringInterner::new();
        let value = build(&tree, &names);
        let pattern = mirror(&value, &names, &mut 0);
        let first = match_pattern(&pattern, &value);
        let second = match_pattern(&pattern, &value);
        prop_assert_eq!(&first, &second);
    }

    #[test]
    fn prop_mirror_binds_every_leaf(tree in tree_strategy()) {
        let names = StringInterner::new();
        let value = build(&tree, &names);
        let pattern = mirror(&value, &names, &mut 0);
        let bindings = match_pattern(&pattern, &value).into_bindings().unwrap();
        prop_assert_eq!(bindings.len(), leaf_count(&value));
    }

    #[test]
    fn prop_foreign_tag_never_matches(tree in tree_strategy()) {
        let names = StringInterner::new();
        let value = build(&tree, &names);
        let foreign: Name = names.intern("Foreign");
        let pattern = Pattern::deconstruct(foreign, vec![]);
        prop_assert_eq!(match_pattern(&pattern, &value), MatchResult::Failure);
    }

    #[test]
    fn prop_select_agrees_with_linear_scan(
        trees in prop::collection::vec(tree_strategy(), 1..6),
        scrutinee in tree_strategy(),
    ) {
        let names = StringInterner::new();
        let value = build(&scrutinee, &names);
        let arms: Vec<Pattern> = trees
            .iter()
            .map(|t| Pattern::literal(build(t, &names)))
            .chain(std::iter::once(Pattern::Wildcard))
            .collect();
        let expected = trees
            .iter()
            .position(|t| build(t, &names) == value)
            .unwrap_or(trees.len());
        let hit = select_arm(&arms, &value).unwrap();
        prop_assert_eq!(hit.arm_index, expected);
    }
}
