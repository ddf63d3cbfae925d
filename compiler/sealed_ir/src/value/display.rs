//! Record-style rendering: `Position[x=10, y=10]`.

use std::fmt;

use sealed_stack::ensure_sufficient_stack;

use super::{Scalar, Value};
use crate::{StringLookup, TypeRegistry};

/// Display adapter returned by [`Value::display`].
pub struct ValueDisplay<'a, L: ?Sized> {
    value: &'a Value,
    registry: &'a TypeRegistry,
    names: &'a L,
}

impl Value {
    /// Render with declared field names, e.g.
    /// `Character[name=Edwin, level=220, position=Position[x=10, y=10]]`.
    ///
    /// Records whose tag is not declared in `registry` fall back to
    /// positional names `_0`, `_1`, ... A variant renders as its payload.
    pub fn display<'a, L: StringLookup + ?Sized>(
        &'a self,
        registry: &'a TypeRegistry,
        names: &'a L,
    ) -> ValueDisplay<'a, L> {
        ValueDisplay {
            value: self,
            registry,
            names,
        }
    }
}

impl<L: StringLookup + ?Sized> fmt::Display for ValueDisplay<'_, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| match self.value {
            Value::Primitive(scalar) => fmt_scalar(scalar, f),
            Value::Variant { payload, .. } => fmt::Display::fmt(&self.child(payload), f),
            Value::Record { tag, fields } => {
                write!(f, "{}[", self.names.lookup(*tag))?;
                let shape = self.registry.record(*tag);
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    match shape.and_then(|s| s.fields().get(i)) {
                        Some(decl) => write!(f, "{}=", self.names.lookup(decl.name))?,
                        None => write!(f, "_{i}=")?,
                    }
                    fmt::Display::fmt(&self.child(field), f)?;
                }
                f.write_str("]")
            }
        })
    }
}

impl<'a, L: ?Sized> ValueDisplay<'a, L> {
    fn child(&self, value: &'a Value) -> ValueDisplay<'a, L> {
        ValueDisplay {
            value,
            registry: self.registry,
            names: self.names,
        }
    }
}

fn fmt_scalar(scalar: &Scalar, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match scalar {
        Scalar::Int(n) => write!(f, "{n}"),
        Scalar::Float(x) => write!(f, "{x}"),
        Scalar::Bool(b) => write!(f, "{b}"),
        Scalar::Char(c) => write!(f, "{c}"),
        Scalar::Str(s) => f.write_str(s),
        Scalar::Unit => f.write_str("()"),
    }
}
