//! Runtime values matched by patterns.
//!
//! A value is a primitive scalar, a record (tag + positional fields) or a
//! variant of a closed sum type wrapping exactly one record payload.
//! Values are immutable once built: heap parts sit behind [`Heap`], which
//! only the factories below can construct, and clones share storage.
//!
//! Equality, hashing and ordering are structural and driven entirely by
//! the tag and field list, so no record shape needs hand-written
//! comparison code. Floats compare by `f64::total_cmp` (so `NaN == NaN`
//! and `-0.0 != 0.0`), which keeps `Eq`, `Hash` and `Ord` consistent.

mod display;
mod heap;

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use sealed_stack::ensure_sufficient_stack;

use crate::{Name, PrimKind, TypeRegistry, TypeTag};

pub use display::ValueDisplay;
pub use heap::Heap;

/// Primitive payload of a [`Value::Primitive`].
#[derive(Clone, Debug)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Bool(bool),
    Char(char),
    Str(Heap<str>),
    Unit,
}

impl Scalar {
    pub fn kind(&self) -> PrimKind {
        match self {
            Scalar::Int(_) => PrimKind::Int,
            Scalar::Float(_) => PrimKind::Float,
            Scalar::Bool(_) => PrimKind::Bool,
            Scalar::Char(_) => PrimKind::Char,
            Scalar::Str(_) => PrimKind::Str,
            Scalar::Unit => PrimKind::Unit,
        }
    }

    fn cmp_scalar(&self, other: &Scalar) -> Ordering {
        match (self, other) {
            (Scalar::Int(a), Scalar::Int(b)) => a.cmp(b),
            (Scalar::Float(a), Scalar::Float(b)) => a.total_cmp(b),
            (Scalar::Bool(a), Scalar::Bool(b)) => a.cmp(b),
            (Scalar::Char(a), Scalar::Char(b)) => a.cmp(b),
            (Scalar::Str(a), Scalar::Str(b)) => (**a).cmp(&**b),
            (Scalar::Unit, Scalar::Unit) => Ordering::Equal,
            _ => self.kind().cmp(&other.kind()),
        }
    }

    fn hash_scalar<H: Hasher>(&self, state: &mut H) {
        self.kind().hash(state);
        match self {
            Scalar::Int(n) => n.hash(state),
            Scalar::Float(f) => f.to_bits().hash(state),
            Scalar::Bool(b) => b.hash(state),
            Scalar::Char(c) => c.hash(state),
            Scalar::Str(s) => (**s).hash(state),
            Scalar::Unit => {}
        }
    }
}

/// A runtime value.
#[derive(Clone, Debug)]
pub enum Value {
    Primitive(Scalar),
    /// Record instance. Field names live in the record's
    /// [`RecordShape`](crate::RecordShape); the value only keeps positions.
    Record { tag: Name, fields: Heap<[Value]> },
    /// Instance of the closed sum type `sum`. The payload is a record whose
    /// tag belongs to the sum's catalog.
    Variant { sum: Name, payload: Heap<Value> },
}

// Factory methods (the only way to build heap-backed values)

impl Value {
    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Primitive(Scalar::Int(n))
    }

    #[inline]
    pub fn float(f: f64) -> Self {
        Value::Primitive(Scalar::Float(f))
    }

    #[inline]
    pub fn bool(b: bool) -> Self {
        Value::Primitive(Scalar::Bool(b))
    }

    #[inline]
    pub fn char(c: char) -> Self {
        Value::Primitive(Scalar::Char(c))
    }

    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Primitive(Scalar::Str(Heap::from_string(s.into())))
    }

    #[inline]
    pub fn unit() -> Self {
        Value::Primitive(Scalar::Unit)
    }

    /// Build a record without checking it against a declared shape.
    ///
    /// Front ends that want the canonical-constructor checks go through
    /// [`TypeRegistry::construct_record`](crate::TypeRegistry::construct_record).
    ///
    /// ```text
    /// let pos = Value::record(position, vec![Value::int(10), Value::int(10)]);
    /// ```
    #[inline]
    pub fn record(tag: Name, fields: Vec<Value>) -> Self {
        Value::Record {
            tag,
            fields: Heap::from_vec(fields),
        }
    }

    /// Wrap `payload` as an instance of the sum type `sum`.
    ///
    /// ```text
    /// let some = Value::variant(optional, Value::record(some_tag, vec![user]));
    /// ```
    #[inline]
    pub fn variant(sum: Name, payload: Value) -> Self {
        Value::Variant {
            sum,
            payload: Heap::new(payload),
        }
    }
}

// Inspection

impl Value {
    /// Most specific runtime tag: the scalar kind, the record tag, or the
    /// tag of a variant's payload.
    pub fn tag(&self) -> TypeTag {
        match self {
            Value::Primitive(s) => TypeTag::Prim(s.kind()),
            Value::Record { tag, .. } => TypeTag::Named(*tag),
            Value::Variant { payload, .. } => payload.tag(),
        }
    }

    /// True if `tag` is this value's runtime tag, or names the sum type a
    /// variant belongs to.
    pub fn is_instance_of(&self, tag: TypeTag) -> bool {
        match self {
            Value::Variant { sum, payload } => {
                tag == TypeTag::Named(*sum) || payload.is_instance_of(tag)
            }
            _ => self.tag() == tag,
        }
    }

    /// Record tag and fields, looking through variant wrappers.
    pub fn shape(&self) -> Option<(Name, &[Value])> {
        match self {
            Value::Primitive(_) => None,
            Value::Record { tag, fields } => Some((*tag, &**fields)),
            Value::Variant { payload, .. } => payload.shape(),
        }
    }

    /// Field accessor by declared name, e.g. `title` of an `Offer`.
    ///
    /// `None` for primitives, for records whose tag `registry` does not
    /// declare, and for names the record does not have.
    pub fn field(&self, registry: &TypeRegistry, name: Name) -> Option<&Value> {
        let (tag, fields) = self.shape()?;
        let index = registry.record(tag)?.field_index(name)?;
        fields.get(index)
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Value::Primitive(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self.as_scalar() {
            Some(Scalar::Int(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.as_scalar() {
            Some(Scalar::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self.as_scalar() {
            Some(Scalar::Str(s)) => Some(&**s),
            _ => None,
        }
    }

    /// Total structural order: primitives before records before variants,
    /// then by tag, then field by field.
    ///
    /// Tags order by interning order, which is stable within one interner
    /// but is not alphabetical.
    pub fn structural_cmp(&self, other: &Value) -> Ordering {
        ensure_sufficient_stack(|| match (self, other) {
            (Value::Primitive(a), Value::Primitive(b)) => a.cmp_scalar(b),
            (Value::Record { tag: ta, fields: fa }, Value::Record { tag: tb, fields: fb }) => ta
                .cmp(tb)
                .then_with(|| cmp_fields(fa, fb)),
            (
                Value::Variant {
                    sum: sa,
                    payload: pa,
                },
                Value::Variant {
                    sum: sb,
                    payload: pb,
                },
            ) => sa.cmp(sb).then_with(|| pa.structural_cmp(pb)),
            _ => self.rank().cmp(&other.rank()),
        })
    }

    fn rank(&self) -> u8 {
        match self {
            Value::Primitive(_) => 0,
            Value::Record { .. } => 1,
            Value::Variant { .. } => 2,
        }
    }
}

fn cmp_fields(a: &[Value], b: &[Value]) -> Ordering {
    for (x, y) in a.iter().zip(b) {
        let ord = x.structural_cmp(y);
        if ord != Ordering::Equal {
            return ord;
        }
    }
    a.len().cmp(&b.len())
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.structural_cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        self.structural_cmp(other)
    }
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        ensure_sufficient_stack(|| {
            self.rank().hash(state);
            match self {
                Value::Primitive(s) => s.hash_scalar(state),
                Value::Record { tag, fields } => {
                    tag.hash(state);
                    fields.len().hash(state);
                    for field in fields.iter() {
                        field.hash(state);
                    }
                }
                Value::Variant { sum, payload } => {
                    sum.hash(state);
                    payload.hash(state);
                }
            }
        });
    }
}
