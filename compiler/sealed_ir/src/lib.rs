//! Sealed IR - the data model shared by the matcher and the checker.
//!
//! - Interned names ([`Name`], [`StringInterner`]) and [`Span`]s
//! - Runtime [`Value`]s: primitives, records, variants of closed sums
//! - [`Pattern`] trees and the [`Bindings`] they produce
//! - The [`TypeRegistry`] of record shapes and closed [`VariantCatalog`]s
//!
//! Everything here is immutable once built and `Send + Sync`.

mod bindings;
mod interner;
mod name;
mod pattern;
mod span;
mod tag;
mod types;
mod value;

pub use bindings::Bindings;
pub use interner::{InternError, SharedInterner, StringInterner, StringLookup};
pub use name::Name;
pub use pattern::{Guard, Pattern};
pub use span::Span;
pub use tag::{PrimKind, TypeTag};
pub use types::{
    ConstructError, FieldDecl, FieldType, RecordInvariant, RecordShape, RegistryError, TypeDecl,
    TypeRegistry, VariantCatalog,
};
pub use value::{Heap, Scalar, Value, ValueDisplay};
