use pretty_assertions::assert_eq;
use sealed_diagnostic::ErrorCode;
use sealed_ir::{Pattern, PrimKind, Span, TypeTag, Value};

use super::validate_arm;
use crate::test_helpers::Fixture;
use crate::PatternError;

#[test]
fn well_formed_arms_pass() {
    let fx = Fixture::new();
    let (n, l, x, y) = (fx.var("n"), fx.var("l"), fx.var("x"), fx.var("y"));
    let arms = [
        Pattern::Wildcard,
        Pattern::binding(n),
        Pattern::literal(Value::int(3)),
        Pattern::bind_type(PrimKind::Str, n),
        Pattern::type_test(fx.optional),
        Pattern::deconstruct(
            fx.character,
            vec![
                Pattern::binding(n),
                Pattern::binding(l),
                Pattern::deconstruct(fx.position, vec![Pattern::binding(x), Pattern::binding(y)]),
            ],
        )
        .guarded(|_| true),
    ];
    for arm in &arms {
        assert_eq!(validate_arm(&fx.registry, arm), Ok(()));
    }
}

#[test]
fn duplicate_binding_is_rejected() {
    let fx = Fixture::new();
    let x = fx.var("x");
    let arm = Pattern::deconstruct(fx.position, vec![Pattern::binding(x), Pattern::binding(x)]);
    assert_eq!(
        validate_arm(&fx.registry, &arm),
        Err(vec![PatternError::DuplicateBindingName { name: x }])
    );
}

#[test]
fn type_test_name_counts_as_binding() {
    let fx = Fixture::new();
    let p = fx.var("p");
    let arm = Pattern::deconstruct(
        fx.character,
        vec![
            Pattern::binding(p),
            Pattern::Wildcard,
            Pattern::bind_type(fx.position, p),
        ],
    );
    assert_eq!(
        validate_arm(&fx.registry, &arm),
        Err(vec![PatternError::DuplicateBindingName { name: p }])
    );
}

#[test]
fn arity_mismatch_is_rejected() {
    let fx = Fixture::new();
    let arm = Pattern::deconstruct(fx.position, vec![Pattern::Wildcard]);
    assert_eq!(
        validate_arm(&fx.registry, &arm),
        Err(vec![PatternError::ArityMismatch {
            tag: fx.position,
            expected: 2,
            found: 1,
        }])
    );
}

#[test]
fn unknown_tags_are_rejected() {
    let fx = Fixture::new();
    let ghost = fx.var("Ghost");
    assert_eq!(
        validate_arm(&fx.registry, &Pattern::type_test(ghost)),
        Err(vec![PatternError::UnknownTag {
            tag: TypeTag::Named(ghost)
        }])
    );
    assert_eq!(
        validate_arm(&fx.registry, &Pattern::deconstruct(ghost, vec![])),
        Err(vec![PatternError::UnknownTag {
            tag: TypeTag::Named(ghost)
        }])
    );
}

#[test]
fn deconstructing_a_sum_names_the_sum() {
    let fx = Fixture::new();
    // A sum name is a valid type test but not something to deconstruct.
    let arm = Pattern::deconstruct(fx.optional, vec![]);
    let err = validate_arm(&fx.registry, &arm).unwrap_err();
    assert_eq!(err, vec![PatternError::DeconstructSum { sum: fx.optional }]);
    assert_eq!(err[0].code(), ErrorCode::E3003);
    assert_eq!(
        err[0].describe(&fx.names),
        "`Optional` is a sum type, not a record, and cannot be deconstructed"
    );
}

#[test]
fn all_problems_are_reported_in_order() {
    let fx = Fixture::new();
    let v = fx.var("v");
    let arm = Pattern::deconstruct(
        fx.character,
        vec![Pattern::binding(v), Pattern::deconstruct(fx.some, vec![Pattern::binding(v)])],
    )
    .guarded(|_| false);
    let errors = validate_arm(&fx.registry, &arm).unwrap_err();
    assert_eq!(
        errors,
        vec![
            PatternError::ArityMismatch {
                tag: fx.character,
                expected: 3,
                found: 2,
            },
            PatternError::DuplicateBindingName { name: v },
        ]
    );
}

#[test]
fn errors_render_as_diagnostics() {
    let fx = Fixture::new();
    let err = PatternError::ArityMismatch {
        tag: fx.position,
        expected: 2,
        found: 3,
    };
    assert_eq!(err.code(), ErrorCode::E3002);
    let diag = err.to_diagnostic(Span::new(4, 20), &fx.names);
    assert!(diag.is_error());
    assert_eq!(diag.primary_span(), Some(Span::new(4, 20)));
    assert_eq!(
        diag.to_string(),
        "error [E3002]: `Position` has 2 field(s), but the pattern has 3\n  \
         --> 4..20: in this pattern\n  \
         = note: use `_` for fields you do not need"
    );

    let dup = PatternError::DuplicateBindingName { name: fx.var("x") };
    assert_eq!(dup.code(), ErrorCode::E3001);
    assert_eq!(
        dup.describe(&fx.names),
        "identifier `x` is bound more than once in the same pattern"
    );

    let unknown = PatternError::UnknownTag {
        tag: TypeTag::Prim(PrimKind::Char),
    };
    assert_eq!(unknown.code(), ErrorCode::E3003);
    assert_eq!(unknown.describe(&fx.names), "cannot find type `char`");
}
