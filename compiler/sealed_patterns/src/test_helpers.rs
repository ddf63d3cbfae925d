//! Shared fixture for the matcher, selection and validation tests.
//!
//! ```text
//! record Position(int x, int y)
//! record Character(str name, int level, Position position)
//! record User(str name, str email)
//! record Some(value)    record None()
//! sealed Optional permits Some, None
//! ```

#![expect(clippy::unwrap_used, reason = "Test fixture uses unwrap for brevity")]

use sealed_ir::{FieldDecl, FieldType, Name, PrimKind, StringInterner, TypeRegistry, Value};

pub(crate) struct Fixture {
    pub names: StringInterner,
    pub registry: TypeRegistry,
    pub position: Name,
    pub character: Name,
    pub user: Name,
    pub optional: Name,
    pub some: Name,
    pub none: Name,
}

impl Fixture {
    pub fn new() -> Self {
        let names = StringInterner::new();
        let mut registry = TypeRegistry::new();
        let int_ty = FieldType::Prim(PrimKind::Int);
        let str_ty = FieldType::Prim(PrimKind::Str);

        let position = names.intern("Position");
        registry
            .declare_record(
                position,
                vec![
                    FieldDecl::new(names.intern("x"), int_ty),
                    FieldDecl::new(names.intern("y"), int_ty),
                ],
            )
            .unwrap();

        let character = names.intern("Character");
        registry
            .declare_record(
                character,
                vec![
                    FieldDecl::new(names.intern("name"), str_ty),
                    FieldDecl::new(names.intern("level"), int_ty),
                    FieldDecl::new(names.intern("position"), FieldType::Named(position)),
                ],
            )
            .unwrap();

        let user = names.intern("User");
        registry
            .declare_record(
                user,
                vec![
                    FieldDecl::new(names.intern("name"), str_ty),
                    FieldDecl::new(names.intern("email"), str_ty),
                ],
            )
            .unwrap();

        let (optional, some, none) = (
            names.intern("Optional"),
            names.intern("Some"),
            names.intern("None"),
        );
        registry
            .declare_record(some, vec![FieldDecl::new(names.intern("value"), FieldType::Any)])
            .unwrap();
        registry.declare_record(none, vec![]).unwrap();
        registry.declare_sum(optional, vec![some, none]).unwrap();

        Fixture {
            names,
            registry,
            position,
            character,
            user,
            optional,
            some,
            none,
        }
    }

    /// Intern a binding name.
    pub fn var(&self, name: &str) -> Name {
        self.names.intern(name)
    }

    pub fn pos(&self, x: i64, y: i64) -> Value {
        self.registry
            .construct_record(self.position, vec![Value::int(x), Value::int(y)])
            .unwrap()
    }

    pub fn hero(&self, name: &str, level: i64, position: Value) -> Value {
        self.registry
            .construct_record(
                self.character,
                vec![Value::string(name), Value::int(level), position],
            )
            .unwrap()
    }

    pub fn user_value(&self, name: &str, email: &str) -> Value {
        self.registry
            .construct_record(self.user, vec![Value::string(name), Value::string(email)])
            .unwrap()
    }

    pub fn some_of(&self, inner: Value) -> Value {
        self.registry
            .construct_variant(self.optional, self.some, vec![inner])
            .unwrap()
    }

    pub fn none_value(&self) -> Value {
        self.registry
            .construct_variant(self.optional, self.none, vec![])
            .unwrap()
    }
}
