//! Declared record shapes and closed variant catalogs.
//!
//! The registry is the checker's view of the type universe. Records declare
//! their fields (name + [`FieldType`]); a sum type declares a [`VariantCatalog`]
//! listing the record tags it may take. A catalog cannot be extended once
//! declared, and a type name cannot be declared twice, so the set of shapes
//! a sum can take is finite and known, which is what makes exhaustiveness
//! checking decidable.

use std::fmt;
use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::{Name, PrimKind, StringLookup, TypeTag, Value};

/// Declared type of a record field.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum FieldType {
    /// Unconstrained (a generic parameter). Matches any value; the checker
    /// treats it as an infinite domain.
    Any,
    Prim(PrimKind),
    /// A declared record or sum type.
    Named(Name),
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct FieldDecl {
    pub name: Name,
    pub ty: FieldType,
}

impl FieldDecl {
    pub fn new(name: Name, ty: FieldType) -> Self {
        FieldDecl { name, ty }
    }
}

/// Extra check a record's canonical constructor runs once every field has
/// the declared type, e.g. "title cannot be empty".
///
/// Returns the rejection message on failure.
#[derive(Clone)]
pub struct RecordInvariant(Arc<dyn Fn(&[Value]) -> Result<(), String> + Send + Sync>);

impl RecordInvariant {
    pub fn new(f: impl Fn(&[Value]) -> Result<(), String> + Send + Sync + 'static) -> Self {
        RecordInvariant(Arc::new(f))
    }

    #[inline]
    pub fn check(&self, fields: &[Value]) -> Result<(), String> {
        (self.0)(fields)
    }
}

impl fmt::Debug for RecordInvariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RecordInvariant(..)")
    }
}

/// A record's tag and ordered field list.
#[derive(Clone, Debug)]
pub struct RecordShape {
    tag: Name,
    fields: Vec<FieldDecl>,
    invariant: Option<RecordInvariant>,
}

impl RecordShape {
    pub fn tag(&self) -> Name {
        self.tag
    }

    pub fn fields(&self) -> &[FieldDecl] {
        &self.fields
    }

    pub fn arity(&self) -> usize {
        self.fields.len()
    }

    /// Position of a field by name.
    pub fn field_index(&self, name: Name) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    pub fn invariant(&self) -> Option<&RecordInvariant> {
        self.invariant.as_ref()
    }
}

/// The closed set of tags a sum type may take, in declaration order.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct VariantCatalog {
    name: Name,
    tags: Vec<Name>,
}

impl VariantCatalog {
    pub fn name(&self) -> Name {
        self.name
    }

    pub fn tags(&self) -> &[Name] {
        &self.tags
    }

    pub fn contains(&self, tag: Name) -> bool {
        self.tags.contains(&tag)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Always false for a declared catalog; kept for the `len` pairing.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// What a `Named` type resolves to.
#[derive(Copy, Clone, Debug)]
pub enum TypeDecl<'a> {
    Record(&'a RecordShape),
    Sum(&'a VariantCatalog),
}

/// Error declaring a type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistryError {
    /// The name is already a record or a sum.
    DuplicateType(Name),
    DuplicateField { record: Name, field: Name },
    /// A catalog lists a tag that is not a declared record.
    UnknownVariantShape { sum: Name, tag: Name },
    DuplicateVariant { sum: Name, tag: Name },
    /// A sum type with no shapes.
    EmptyCatalog(Name),
}

impl RegistryError {
    pub fn describe(&self, names: &impl StringLookup) -> String {
        match self {
            RegistryError::DuplicateType(n) => {
                format!("type `{}` is already declared", names.lookup(*n))
            }
            RegistryError::DuplicateField { record, field } => format!(
                "record `{}` declares field `{}` twice",
                names.lookup(*record),
                names.lookup(*field)
            ),
            RegistryError::UnknownVariantShape { sum, tag } => format!(
                "`{}` permits `{}`, which is not a declared record",
                names.lookup(*sum),
                names.lookup(*tag)
            ),
            RegistryError::DuplicateVariant { sum, tag } => format!(
                "`{}` lists `{}` more than once",
                names.lookup(*sum),
                names.lookup(*tag)
            ),
            RegistryError::EmptyCatalog(n) => {
                format!("sum type `{}` declares no shapes", names.lookup(*n))
            }
        }
    }
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::DuplicateType(n) => write!(f, "duplicate type {n:?}"),
            RegistryError::DuplicateField { record, field } => {
                write!(f, "duplicate field {field:?} in record {record:?}")
            }
            RegistryError::UnknownVariantShape { sum, tag } => {
                write!(f, "sum {sum:?} lists undeclared record {tag:?}")
            }
            RegistryError::DuplicateVariant { sum, tag } => {
                write!(f, "sum {sum:?} lists {tag:?} twice")
            }
            RegistryError::EmptyCatalog(n) => write!(f, "sum {n:?} has no shapes"),
        }
    }
}

impl std::error::Error for RegistryError {}

/// Error building a value through a canonical constructor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConstructError {
    UnknownRecord(Name),
    UnknownSum(Name),
    /// `tag` is not one of the shapes `sum` permits.
    NotInCatalog { sum: Name, tag: Name },
    Arity { tag: Name, expected: usize, found: usize },
    /// Field `field` of `tag` does not conform to its declared type.
    FieldType { tag: Name, field: Name },
    /// The record's own invariant rejected the fields.
    Invariant { tag: Name, message: String },
}

impl ConstructError {
    pub fn describe(&self, names: &impl StringLookup) -> String {
        match self {
            ConstructError::UnknownRecord(n) => {
                format!("`{}` is not a declared record", names.lookup(*n))
            }
            ConstructError::UnknownSum(n) => {
                format!("`{}` is not a declared sum type", names.lookup(*n))
            }
            ConstructError::NotInCatalog { sum, tag } => format!(
                "`{}` does not permit `{}`",
                names.lookup(*sum),
                names.lookup(*tag)
            ),
            ConstructError::Arity {
                tag,
                expected,
                found,
            } => format!(
                "`{}` takes {expected} field(s), {found} given",
                names.lookup(*tag)
            ),
            ConstructError::FieldType { tag, field } => format!(
                "field `{}` of `{}` has the wrong type",
                names.lookup(*field),
                names.lookup(*tag)
            ),
            ConstructError::Invariant { tag, message } => {
                format!("cannot construct `{}`: {message}", names.lookup(*tag))
            }
        }
    }
}

impl fmt::Display for ConstructError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstructError::UnknownRecord(n) => write!(f, "unknown record {n:?}"),
            ConstructError::UnknownSum(n) => write!(f, "unknown sum {n:?}"),
            ConstructError::NotInCatalog { sum, tag } => {
                write!(f, "{tag:?} is not in the catalog of {sum:?}")
            }
            ConstructError::Arity {
                tag,
                expected,
                found,
            } => write!(f, "{tag:?} expects {expected} fields, found {found}"),
            ConstructError::FieldType { tag, field } => {
                write!(f, "field {field:?} of {tag:?} has the wrong type")
            }
            ConstructError::Invariant { tag, message } => {
                write!(f, "{tag:?} rejected its fields: {message}")
            }
        }
    }
}

impl std::error::Error for ConstructError {}

/// All declared records and sums.
#[derive(Clone, Debug, Default)]
pub struct TypeRegistry {
    records: FxHashMap<Name, RecordShape>,
    sums: FxHashMap<Name, VariantCatalog>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn is_declared(&self, name: Name) -> bool {
        self.records.contains_key(&name) || self.sums.contains_key(&name)
    }

    /// Declare a record shape.
    pub fn declare_record(
        &mut self,
        tag: Name,
        fields: Vec<FieldDecl>,
    ) -> Result<&RecordShape, RegistryError> {
        self.insert_record(tag, fields, None)
    }

    /// Declare a record shape whose canonical constructor also runs
    /// `invariant`.
    pub fn declare_record_with_invariant(
        &mut self,
        tag: Name,
        fields: Vec<FieldDecl>,
        invariant: RecordInvariant,
    ) -> Result<&RecordShape, RegistryError> {
        self.insert_record(tag, fields, Some(invariant))
    }

    fn insert_record(
        &mut self,
        tag: Name,
        fields: Vec<FieldDecl>,
        invariant: Option<RecordInvariant>,
    ) -> Result<&RecordShape, RegistryError> {
        if self.is_declared(tag) {
            return Err(RegistryError::DuplicateType(tag));
        }
        let mut seen = FxHashSet::default();
        if let Some(dup) = fields.iter().find(|f| !seen.insert(f.name)) {
            return Err(RegistryError::DuplicateField {
                record: tag,
                field: dup.name,
            });
        }
        Ok(&*self
            .records
            .entry(tag)
            .or_insert(RecordShape {
                tag,
                fields,
                invariant,
            }))
    }

    /// Declare a closed sum type. Every tag must already be a declared record.
    pub fn declare_sum(
        &mut self,
        name: Name,
        tags: Vec<Name>,
    ) -> Result<&VariantCatalog, RegistryError> {
        if self.is_declared(name) {
            return Err(RegistryError::DuplicateType(name));
        }
        if tags.is_empty() {
            return Err(RegistryError::EmptyCatalog(name));
        }
        let mut seen = FxHashSet::default();
        for &tag in &tags {
            if !self.records.contains_key(&tag) {
                return Err(RegistryError::UnknownVariantShape { sum: name, tag });
            }
            if !seen.insert(tag) {
                return Err(RegistryError::DuplicateVariant { sum: name, tag });
            }
        }
        Ok(&*self
            .sums
            .entry(name)
            .or_insert(VariantCatalog { name, tags }))
    }

    pub fn record(&self, tag: Name) -> Option<&RecordShape> {
        self.records.get(&tag)
    }

    pub fn catalog(&self, name: Name) -> Option<&VariantCatalog> {
        self.sums.get(&name)
    }

    pub fn lookup(&self, name: Name) -> Option<TypeDecl<'_>> {
        self.records
            .get(&name)
            .map(TypeDecl::Record)
            .or_else(|| self.sums.get(&name).map(TypeDecl::Sum))
    }

    /// Declared field count of a record tag.
    pub fn arity(&self, tag: Name) -> Option<usize> {
        self.records.get(&tag).map(RecordShape::arity)
    }

    /// Whether a type test against `tag` can ever be satisfied by a
    /// declared type.
    pub fn knows(&self, tag: TypeTag) -> bool {
        match tag {
            TypeTag::Prim(_) => true,
            TypeTag::Named(name) => self.is_declared(name),
        }
    }

    /// Whether `value` inhabits `ty`.
    pub fn conforms(&self, ty: FieldType, value: &Value) -> bool {
        match ty {
            FieldType::Any => true,
            FieldType::Prim(kind) => value.tag() == TypeTag::Prim(kind),
            FieldType::Named(name) => match (self.lookup(name), value) {
                (Some(TypeDecl::Record(_)), Value::Record { tag, .. }) => *tag == name,
                (Some(TypeDecl::Sum(catalog)), Value::Variant { sum, payload }) => {
                    *sum == name
                        && payload
                            .shape()
                            .is_some_and(|(tag, _)| catalog.contains(tag))
                }
                _ => false,
            },
        }
    }

    /// Canonical constructor: checks the tag, the arity and each field's
    /// declared type, then the record's invariant if it has one, before
    /// building the record.
    pub fn construct_record(&self, tag: Name, fields: Vec<Value>) -> Result<Value, ConstructError> {
        let shape = self
            .records
            .get(&tag)
            .ok_or(ConstructError::UnknownRecord(tag))?;
        if shape.arity() != fields.len() {
            return Err(ConstructError::Arity {
                tag,
                expected: shape.arity(),
                found: fields.len(),
            });
        }
        for (decl, value) in shape.fields.iter().zip(&fields) {
            if !self.conforms(decl.ty, value) {
                return Err(ConstructError::FieldType {
                    tag,
                    field: decl.name,
                });
            }
        }
        if let Some(invariant) = &shape.invariant {
            invariant
                .check(&fields)
                .map_err(|message| ConstructError::Invariant { tag, message })?;
        }
        Ok(Value::record(tag, fields))
    }

    /// Build an instance of `sum` carrying the shape `tag`. Tags outside the
    /// catalog are rejected: a catalog's closedness holds at runtime too.
    pub fn construct_variant(
        &self,
        sum: Name,
        tag: Name,
        fields: Vec<Value>,
    ) -> Result<Value, ConstructError> {
        let catalog = self.sums.get(&sum).ok_or(ConstructError::UnknownSum(sum))?;
        if !catalog.contains(tag) {
            return Err(ConstructError::NotInCatalog { sum, tag });
        }
        let payload = self.construct_record(tag, fields)?;
        Ok(Value::variant(sum, payload))
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
