//! The binding environment produced by one successful match.

use smallvec::SmallVec;

use crate::{Name, Value};

/// Name → value bindings of one matched arm, in pattern order.
///
/// Names are unique: arm validation rejects a pattern that binds a name
/// twice, so merging two binding sets from sibling sub-patterns is a plain
/// union. Bindings of an arm that did not match are never built.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bindings(SmallVec<[(Name, Value); 4]>);

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(name: Name, value: Value) -> Self {
        let mut b = Self::new();
        b.bind(name, value);
        b
    }

    /// Add one binding.
    pub fn bind(&mut self, name: Name, value: Value) {
        debug_assert!(self.get(name).is_none(), "binding {name:?} bound twice");
        self.0.push((name, value));
    }

    /// Union with bindings from a sibling sub-pattern.
    pub fn merge(&mut self, other: Bindings) {
        for (name, value) in other.0 {
            self.bind(name, value);
        }
    }

    pub fn get(&self, name: Name) -> Option<&Value> {
        self.0.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Name, &Value)> + '_ {
        self.0.iter().map(|(n, v)| (*n, v))
    }

    pub fn names(&self) -> impl Iterator<Item = Name> + '_ {
        self.0.iter().map(|(n, _)| *n)
    }
}

impl IntoIterator for Bindings {
    type Item = (Name, Value);
    type IntoIter = smallvec::IntoIter<[(Name, Value); 4]>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<(Name, Value)> for Bindings {
    fn from_iter<I: IntoIterator<Item = (Name, Value)>>(iter: I) -> Self {
        let mut b = Bindings::new();
        for (name, value) in iter {
            b.bind(name, value);
        }
        b
    }
}
