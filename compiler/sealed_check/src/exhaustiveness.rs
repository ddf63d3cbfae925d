//! Exhaustiveness and reachability over closed variant catalogs.
//!
//! # Algorithm
//!
//! Arms are lowered to [`Shape`] rows of a pattern matrix and queried with
//! the usefulness test from Maranget's "Warnings for pattern matching":
//! a query row is useful if some value matches it and no matrix row.
//!
//! - A catalog tag is missing if the row `Tag(_, .., _)` is useful against
//!   the unguarded arms.
//! - Arm `i` is unreachable if its own row is not useful against the
//!   unguarded arms before it.
//!
//! Guarded arms (a guard anywhere in the tree) are left out of the matrix:
//! a guard is opaque, so it never proves anything covered, even when it is
//! always true. Literals and primitive or `Any` typed positions are infinite
//! domains: no set of literals completes them, only a wildcard does.

use sealed_ir::{
    FieldType, Name, Pattern, TypeDecl, TypeRegistry, TypeTag, Value, VariantCatalog,
};
use sealed_stack::ensure_sufficient_stack;

use crate::PatternProblem;

/// Whether every shape of the scrutinee's type is handled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Coverage {
    Complete,
    /// Shapes no unguarded arm covers, in catalog declaration order.
    Incomplete { missing: Vec<Name> },
}

impl Coverage {
    pub fn is_complete(&self) -> bool {
        matches!(self, Coverage::Complete)
    }
}

/// Outcome of checking one match construct.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExhaustivenessReport {
    pub coverage: Coverage,
    /// Indices of arms that can never be selected, ascending.
    pub unreachable: Vec<usize>,
}

impl ExhaustivenessReport {
    pub fn is_exhaustive(&self) -> bool {
        self.coverage.is_complete()
    }

    /// Findings as problems: the coverage error first, then one warning per
    /// unreachable arm.
    pub fn problems(&self) -> Vec<PatternProblem> {
        let mut problems = Vec::with_capacity(self.unreachable.len() + 1);
        if let Coverage::Incomplete { missing } = &self.coverage {
            problems.push(PatternProblem::NonExhaustive {
                missing: missing.clone(),
            });
        }
        problems.extend(
            self.unreachable
                .iter()
                .map(|&arm_index| PatternProblem::UnreachableArm { arm_index }),
        );
        problems
    }
}

/// Check `arms` as a match over a value of the closed sum `catalog`.
#[tracing::instrument(level = "trace", skip_all)]
pub fn check_exhaustive(
    registry: &TypeRegistry,
    catalog: &VariantCatalog,
    arms: &[Pattern],
) -> ExhaustivenessReport {
    check_column(registry, FieldType::Named(catalog.name()), catalog.tags(), arms)
}

/// Check `arms` as a match over a value of the declared type `scrutinee`.
///
/// A sum type is checked against its catalog; a record type has exactly
/// one shape, itself. Anything else is [`PatternProblem::UnknownScrutinee`].
#[tracing::instrument(level = "trace", skip_all)]
pub fn check_match(
    registry: &TypeRegistry,
    scrutinee: Name,
    arms: &[Pattern],
) -> Result<ExhaustivenessReport, PatternProblem> {
    match registry.lookup(scrutinee) {
        Some(TypeDecl::Sum(catalog)) => Ok(check_exhaustive(registry, catalog, arms)),
        Some(TypeDecl::Record(shape)) => Ok(check_column(
            registry,
            FieldType::Named(scrutinee),
            &[shape.tag()],
            arms,
        )),
        None => Err(PatternProblem::UnknownScrutinee { name: scrutinee }),
    }
}

fn check_column(
    registry: &TypeRegistry,
    root: FieldType,
    tags: &[Name],
    arms: &[Pattern],
) -> ExhaustivenessReport {
    let cx = Cx { registry };
    let types = [root];

    // Rows that may prove coverage, with their arm indices.
    let mut covering: Vec<Vec<Shape>> = Vec::with_capacity(arms.len());
    let mut unreachable = Vec::new();
    for (arm_index, arm) in arms.iter().enumerate() {
        let row = vec![cx.lower(arm, root)];
        if !cx.useful(&covering, &row, &types) {
            tracing::debug!(arm_index, "unreachable arm");
            unreachable.push(arm_index);
        }
        if !arm.has_guard() {
            covering.push(row);
        }
    }

    let missing: Vec<Name> = tags
        .iter()
        .copied()
        .filter(|&tag| {
            let witness = vec![Shape::Ctor {
                tag,
                fields: vec![Shape::Any; cx.arity(tag)],
            }];
            cx.useful(&covering, &witness, &types)
        })
        .collect();

    let coverage = if missing.is_empty() {
        Coverage::Complete
    } else {
        tracing::debug!(missing = missing.len(), "match is not exhaustive");
        Coverage::Incomplete { missing }
    };
    ExhaustivenessReport {
        coverage,
        unreachable,
    }
}

/// One lowered pattern position.
#[derive(Clone, Debug)]
enum Shape {
    /// Matches everything at this position.
    Any,
    /// A record shape with lowered fields.
    Ctor { tag: Name, fields: Vec<Shape> },
    /// A literal: covered by `Any` or an equal literal, covers nothing.
    Literal(Value),
    /// A refinement the checker does not enumerate (a type test inside an
    /// infinite domain, or a tag that cannot occur here). Covered only by
    /// `Any`.
    Opaque,
}

/// How the values of a column's type split into constructors.
enum Signature<'a> {
    /// A sum type: exactly these tags.
    Finite(&'a [Name]),
    /// A record type: one tag.
    Single(Name),
    /// Primitives and unconstrained positions.
    Infinite,
}

struct Cx<'a> {
    registry: &'a TypeRegistry,
}

impl<'a> Cx<'a> {
    fn arity(&self, tag: Name) -> usize {
        self.registry.arity(tag).unwrap_or(0)
    }

    fn field_types(&self, tag: Name) -> Vec<FieldType> {
        self.registry
            .record(tag)
            .map(|shape| shape.fields().iter().map(|f| f.ty).collect())
            .unwrap_or_default()
    }

    fn signature(&self, ty: FieldType) -> Signature<'a> {
        match ty {
            FieldType::Named(name) => match self.registry.lookup(name) {
                Some(TypeDecl::Sum(catalog)) => Signature::Finite(catalog.tags()),
                Some(TypeDecl::Record(shape)) => Signature::Single(shape.tag()),
                None => Signature::Infinite,
            },
            FieldType::Any | FieldType::Prim(_) => Signature::Infinite,
        }
    }

    /// Whether a value of type `ty` can carry the record shape `tag`.
    fn admits(&self, ty: FieldType, tag: Name) -> bool {
        match self.signature(ty) {
            Signature::Finite(tags) => tags.contains(&tag),
            Signature::Single(own) => own == tag,
            Signature::Infinite => matches!(ty, FieldType::Any),
        }
    }

    /// Lower `pattern` at a position of type `ty`. Guards are dropped here;
    /// callers decide whether a guarded row may cover.
    fn lower(&self, pattern: &Pattern, ty: FieldType) -> Shape {
        ensure_sufficient_stack(|| match pattern {
            Pattern::Wildcard | Pattern::Binding(_) => Shape::Any,
            Pattern::Literal(value) => Shape::Literal(value.clone()),
            Pattern::Guarded { inner, .. } => self.lower(inner, ty),
            Pattern::TypeTest { tag, .. } => self.lower_type_test(*tag, ty),
            Pattern::Deconstruct { tag, subpatterns } => {
                if !self.admits(ty, *tag) || self.registry.arity(*tag) != Some(subpatterns.len()) {
                    return Shape::Opaque;
                }
                let fields = subpatterns
                    .iter()
                    .zip(self.field_types(*tag))
                    .map(|(sub, field_ty)| self.lower(sub, field_ty))
                    .collect();
                Shape::Ctor { tag: *tag, fields }
            }
        })
    }

    fn lower_type_test(&self, tag: TypeTag, ty: FieldType) -> Shape {
        match (tag, ty) {
            // The position's own type: a plain wildcard.
            (TypeTag::Prim(kind), FieldType::Prim(expected)) if kind == expected => Shape::Any,
            (TypeTag::Named(name), FieldType::Named(expected)) if name == expected => Shape::Any,
            // One shape of a sum.
            (TypeTag::Named(name), FieldType::Named(_)) if self.admits(ty, name) => Shape::Ctor {
                tag: name,
                fields: vec![Shape::Any; self.arity(name)],
            },
            _ => Shape::Opaque,
        }
    }

    /// Usefulness of `query` with respect to `rows`; `types` gives the type
    /// of each column.
    fn useful(&self, rows: &[Vec<Shape>], query: &[Shape], types: &[FieldType]) -> bool {
        ensure_sufficient_stack(|| {
            let Some((head, rest)) = query.split_first() else {
                // Zero columns: useful iff nothing already matches.
                return rows.is_empty();
            };
            let ty = types.first().copied().unwrap_or(FieldType::Any);
            let rest_types = types.get(1..).unwrap_or_default();

            match head {
                Shape::Ctor { tag, fields } => {
                    let specialized = specialize(rows, *tag, fields.len());
                    let mut next_query = fields.clone();
                    next_query.extend_from_slice(rest);
                    let next_types = self.expand_types(*tag, fields.len(), rest_types);
                    self.useful(&specialized, &next_query, &next_types)
                }
                Shape::Literal(value) => {
                    let specialized: Vec<Vec<Shape>> = rows
                        .iter()
                        .filter(|row| match row.first() {
                            Some(Shape::Any) => true,
                            Some(Shape::Literal(other)) => other == value,
                            _ => false,
                        })
                        .map(|row| row[1..].to_vec())
                        .collect();
                    self.useful(&specialized, rest, rest_types)
                }
                Shape::Opaque => self.useful(&default_rows(rows), rest, rest_types),
                Shape::Any => self.useful_wildcard(rows, rest, ty, rest_types),
            }
        })
    }

    fn useful_wildcard(
        &self,
        rows: &[Vec<Shape>],
        rest: &[Shape],
        ty: FieldType,
        rest_types: &[FieldType],
    ) -> bool {
        let complete: Option<Vec<Name>> = match self.signature(ty) {
            Signature::Finite(tags) => tags
                .iter()
                .all(|tag| heads_contain(rows, *tag))
                .then(|| tags.to_vec()),
            Signature::Single(tag) => heads_contain(rows, tag).then(|| vec![tag]),
            Signature::Infinite => None,
        };

        match complete {
            // Every constructor appears in the column: some constructor must
            // leave a gap for the wildcard to fill.
            Some(tags) => tags.into_iter().any(|tag| {
                let arity = self.arity(tag);
                let specialized = specialize(rows, tag, arity);
                let mut next_query = vec![Shape::Any; arity];
                next_query.extend_from_slice(rest);
                let next_types = self.expand_types(tag, arity, rest_types);
                self.useful(&specialized, &next_query, &next_types)
            }),
            None => self.useful(&default_rows(rows), rest, rest_types),
        }
    }

    fn expand_types(&self, tag: Name, arity: usize, rest: &[FieldType]) -> Vec<FieldType> {
        let mut types = self.field_types(tag);
        types.resize(arity, FieldType::Any);
        types.extend_from_slice(rest);
        types
    }
}

/// Rows that can match a value built with `tag`, with the head column
/// replaced by that record's fields.
fn specialize(rows: &[Vec<Shape>], tag: Name, arity: usize) -> Vec<Vec<Shape>> {
    rows.iter()
        .filter_map(|row| {
            let (head, rest) = row.split_first()?;
            let mut out = match head {
                Shape::Ctor { tag: t, fields } if *t == tag => fields.clone(),
                Shape::Any => vec![Shape::Any; arity],
                Shape::Ctor { .. } | Shape::Literal(_) | Shape::Opaque => return None,
            };
            out.extend_from_slice(rest);
            Some(out)
        })
        .collect()
}

/// Rows whose head is a wildcard, with the head column dropped.
fn default_rows(rows: &[Vec<Shape>]) -> Vec<Vec<Shape>> {
    rows.iter()
        .filter(|row| matches!(row.first(), Some(Shape::Any)))
        .map(|row| row[1..].to_vec())
        .collect()
}

fn heads_contain(rows: &[Vec<Shape>], tag: Name) -> bool {
    rows.iter()
        .any(|row| matches!(row.first(), Some(Shape::Ctor { tag: t, .. }) if *t == tag))
}
