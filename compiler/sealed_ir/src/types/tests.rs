use pretty_assertions::assert_eq;

use super::*;
use crate::StringInterner;

struct Fixture {
    names: StringInterner,
    registry: TypeRegistry,
    optional: Name,
    some: Name,
    none: Name,
    user: Name,
}

/// `sealed interface Optional permits Some, None` over `record User(String, String)`.
fn optional_fixture() -> Fixture {
    let names = StringInterner::new();
    let mut registry = TypeRegistry::new();
    let (optional, some, none, user) = (
        names.intern("Optional"),
        names.intern("Some"),
        names.intern("None"),
        names.intern("User"),
    );
    let str_ty = FieldType::Prim(PrimKind::Str);
    registry
        .declare_record(
            user,
            vec![
                FieldDecl::new(names.intern("name"), str_ty),
                FieldDecl::new(names.intern("email"), str_ty),
            ],
        )
        .unwrap();
    registry
        .declare_record(some, vec![FieldDecl::new(names.intern("value"), FieldType::Any)])
        .unwrap();
    registry.declare_record(none, vec![]).unwrap();
    registry.declare_sum(optional, vec![some, none]).unwrap();
    Fixture {
        names,
        registry,
        optional,
        some,
        none,
        user,
    }
}

#[test]
fn catalog_keeps_declaration_order() {
    let fx = optional_fixture();
    let catalog = fx.registry.catalog(fx.optional).unwrap();
    assert_eq!(catalog.tags(), &[fx.some, fx.none]);
    assert_eq!(catalog.len(), 2);
    assert!(catalog.contains(fx.none));
    assert!(!catalog.contains(fx.user));
    assert!(matches!(fx.registry.lookup(fx.optional), Some(TypeDecl::Sum(_))));
    assert!(matches!(fx.registry.lookup(fx.user), Some(TypeDecl::Record(_))));
    assert_eq!(fx.registry.arity(fx.user), Some(2));
    assert_eq!(fx.registry.arity(fx.optional), None);
}

#[test]
fn catalogs_cannot_be_redeclared() {
    let mut fx = optional_fixture();
    let extra = fx.names.intern("Maybe");
    fx.registry.declare_record(extra, vec![]).unwrap();
    assert_eq!(
        fx.registry.declare_sum(fx.optional, vec![fx.some, fx.none, extra]),
        Err(RegistryError::DuplicateType(fx.optional))
    );
    assert_eq!(fx.registry.catalog(fx.optional).unwrap().len(), 2);
}

#[test]
fn catalog_errors() {
    let mut fx = optional_fixture();
    let (either, left) = (fx.names.intern("Either"), fx.names.intern("Left"));
    assert_eq!(
        fx.registry.declare_sum(either, vec![]),
        Err(RegistryError::EmptyCatalog(either))
    );
    assert_eq!(
        fx.registry.declare_sum(either, vec![left]),
        Err(RegistryError::UnknownVariantShape { sum: either, tag: left })
    );
    let err = fx
        .registry
        .declare_sum(either, vec![fx.some, fx.some])
        .unwrap_err();
    assert_eq!(err.describe(&fx.names), "`Either` lists `Some` more than once");
}

#[test]
fn duplicate_fields_rejected() {
    let mut fx = optional_fixture();
    let (point, x) = (fx.names.intern("Point"), fx.names.intern("x"));
    let int = FieldType::Prim(PrimKind::Int);
    assert_eq!(
        fx.registry
            .declare_record(point, vec![FieldDecl::new(x, int), FieldDecl::new(x, int)]),
        Err(RegistryError::DuplicateField { record: point, field: x })
    );
}

#[test]
fn construct_record_checks_arity_and_types() {
    let fx = optional_fixture();
    let ok = fx
        .registry
        .construct_record(
            fx.user,
            vec![Value::string("Edwing123"), Value::string("edwing123@example.com")],
        )
        .unwrap();
    assert_eq!(ok.tag(), TypeTag::Named(fx.user));

    assert_eq!(
        fx.registry
            .construct_record(fx.user, vec![Value::string("x")])
            .unwrap_err(),
        ConstructError::Arity {
            tag: fx.user,
            expected: 2,
            found: 1
        }
    );
    let err = fx
        .registry
        .construct_record(fx.user, vec![Value::string("x"), Value::int(3)])
        .unwrap_err();
    assert_eq!(err.describe(&fx.names), "field `email` of `User` has the wrong type");
}

#[test]
fn construct_variant_enforces_closedness() {
    let fx = optional_fixture();
    let user = fx
        .registry
        .construct_record(fx.user, vec![Value::string("a"), Value::string("b")])
        .unwrap();
    let some = fx
        .registry
        .construct_variant(fx.optional, fx.some, vec![user])
        .unwrap();
    assert!(fx.registry.conforms(FieldType::Named(fx.optional), &some));
    assert!(!fx.registry.conforms(FieldType::Named(fx.user), &some));

    assert_eq!(
        fx.registry
            .construct_variant(fx.optional, fx.user, vec![Value::string("a"), Value::string("b")])
            .unwrap_err(),
        ConstructError::NotInCatalog {
            sum: fx.optional,
            tag: fx.user
        }
    );
}

#[test]
fn knows_declared_and_primitive_tags() {
    let fx = optional_fixture();
    assert!(fx.registry.knows(TypeTag::Prim(PrimKind::Str)));
    assert!(fx.registry.knows(TypeTag::Named(fx.optional)));
    assert!(!fx.registry.knows(TypeTag::Named(fx.names.intern("Company"))));
}

fn offer_registry(names: &StringInterner) -> (TypeRegistry, Name) {
    let mut registry = TypeRegistry::new();
    let offer = names.intern("Offer");
    let str_ty = FieldType::Prim(PrimKind::Str);
    registry
        .declare_record_with_invariant(
            offer,
            vec![
                FieldDecl::new(names.intern("title"), str_ty),
                FieldDecl::new(names.intern("description"), str_ty),
            ],
            RecordInvariant::new(|fields| {
                for (value, field) in fields.iter().zip(["title", "description"]) {
                    if value.as_str().is_some_and(str::is_empty) {
                        return Err(format!("{field} cannot be empty"));
                    }
                }
                Ok(())
            }),
        )
        .unwrap();
    (registry, offer)
}

#[test]
fn construct_record_runs_invariant() {
    let names = StringInterner::new();
    let (registry, offer) = offer_registry(&names);
    assert!(registry.record(offer).unwrap().invariant().is_some());

    let ok = registry.construct_record(offer, vec![Value::string("Dev"), Value::string("Rust")]);
    assert!(ok.is_ok());

    let err = registry
        .construct_record(offer, vec![Value::string(""), Value::string("Rust")])
        .unwrap_err();
    assert_eq!(
        err,
        ConstructError::Invariant {
            tag: offer,
            message: "title cannot be empty".to_string(),
        }
    );
    assert_eq!(err.describe(&names), "cannot construct `Offer`: title cannot be empty");
}

#[test]
fn invariant_runs_after_type_checks() {
    let names = StringInterner::new();
    let (registry, offer) = offer_registry(&names);
    assert_eq!(
        registry
            .construct_record(offer, vec![Value::int(1), Value::string("")])
            .unwrap_err(),
        ConstructError::FieldType {
            tag: offer,
            field: names.intern("title"),
        }
    );
}

#[test]
fn field_accessor_by_name() {
    let fx = optional_fixture();
    let (name, email) = (fx.names.intern("name"), fx.names.intern("email"));
    let user = fx
        .registry
        .construct_record(fx.user, vec![Value::string("Ada"), Value::string("ada@example.com")])
        .unwrap();
    assert_eq!(
        user.field(&fx.registry, email).and_then(Value::as_str),
        Some("ada@example.com")
    );
    assert_eq!(user.field(&fx.registry, name).and_then(Value::as_str), Some("Ada"));
    assert_eq!(user.field(&fx.registry, fx.names.intern("age")), None);
    assert_eq!(Value::int(3).field(&fx.registry, name), None);

    // Looks through variant wrappers like the matcher does.
    let some = fx
        .registry
        .construct_variant(fx.optional, fx.some, vec![user.clone()])
        .unwrap();
    assert_eq!(some.field(&fx.registry, fx.names.intern("value")), Some(&user));
}
