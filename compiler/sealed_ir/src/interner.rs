//! Sharded string interner.
//!
//! Tags, field names and binding names come from the front end as strings
//! and are interned once; everything downstream compares `Name`s.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::Name;

/// Primitive kind names, interned up front so front ends interning type
/// names for [`PrimKind`](crate::PrimKind)s never take a write lock.
pub(crate) const PRIMITIVE_NAMES: &[&str] = &["int", "float", "bool", "char", "str", "unit"];

struct Shard {
    map: FxHashMap<&'static str, u32>,
    strings: Vec<&'static str>,
}

impl Shard {
    fn new() -> Self {
        Shard {
            map: FxHashMap::default(),
            strings: Vec::with_capacity(64),
        }
    }

    fn push(&mut self, s: &'static str) -> Option<u32> {
        let local = u32::try_from(self.strings.len())
            .ok()
            .filter(|&l| l <= Name::MAX_LOCAL)?;
        self.strings.push(s);
        self.map.insert(s, local);
        Some(local)
    }
}

/// Error when a shard runs out of local indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternError {
    ShardOverflow { shard_idx: usize },
}

impl fmt::Display for InternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InternError::ShardOverflow { shard_idx } => write!(
                f,
                "interner shard {shard_idx} exceeded capacity of {} strings",
                Name::MAX_LOCAL
            ),
        }
    }
}

impl std::error::Error for InternError {}

/// Sharded string interner safe for concurrent use.
///
/// Strings are leaked on insertion, so lookups hand out `&'static str`.
pub struct StringInterner {
    shards: [RwLock<Shard>; Name::NUM_SHARDS],
    count: AtomicUsize,
}

impl StringInterner {
    pub fn new() -> Self {
        let interner = StringInterner {
            shards: std::array::from_fn(|_| RwLock::new(Shard::new())),
            count: AtomicUsize::new(0),
        };
        // "" must land on Name::EMPTY: shard 0, local 0.
        interner.shards[0].write().push("");
        interner.count.store(1, Ordering::Relaxed);
        for prim in PRIMITIVE_NAMES {
            interner.intern(prim);
        }
        interner
    }

    #[inline]
    fn shard_for(s: &str) -> usize {
        if s.is_empty() {
            return 0;
        }
        let mut hash = 0u32;
        for byte in s.bytes().take(8) {
            hash = hash.wrapping_mul(31).wrapping_add(u32::from(byte));
        }
        (hash as usize) % Name::NUM_SHARDS
    }

    /// Intern `s`, or report that its shard is full.
    pub fn try_intern(&self, s: &str) -> Result<Name, InternError> {
        let shard_idx = Self::shard_for(s);
        #[expect(
            clippy::cast_possible_truncation,
            reason = "shard_idx is bounded by NUM_SHARDS (16)"
        )]
        let shard_u32 = shard_idx as u32;
        let shard = &self.shards[shard_idx];

        if let Some(&local) = shard.read().map.get(s) {
            return Ok(Name::new(shard_u32, local));
        }

        let mut guard = shard.write();
        // Another thread may have inserted between the two locks.
        if let Some(&local) = guard.map.get(s) {
            return Ok(Name::new(shard_u32, local));
        }
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        let local = guard
            .push(leaked)
            .ok_or(InternError::ShardOverflow { shard_idx })?;
        self.count.fetch_add(1, Ordering::Relaxed);
        Ok(Name::new(shard_u32, local))
    }

    /// Intern `s`.
    ///
    /// # Panics
    /// Panics if the shard is full (over 268 million strings in one shard).
    #[inline]
    pub fn intern(&self, s: &str) -> Name {
        self.try_intern(s).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Look up an interned name. Names from another interner are a caller bug.
    pub fn lookup(&self, name: Name) -> &'static str {
        self.shards[name.shard()].read().strings[name.local()]
    }

    /// Number of interned strings, the empty string included.
    pub fn len(&self) -> usize {
        self.count.load(Ordering::Relaxed)
    }

    /// True when only the pre-interned strings are present.
    pub fn is_empty(&self) -> bool {
        self.len() <= PRIMITIVE_NAMES.len() + 1
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only view over an interner.
///
/// Diagnostics and `Value::display` take `&impl StringLookup` so callers can
/// pass either a `StringInterner` or a `SharedInterner`.
pub trait StringLookup {
    fn lookup(&self, name: Name) -> &str;
}

impl StringLookup for StringInterner {
    fn lookup(&self, name: Name) -> &str {
        StringInterner::lookup(self, name)
    }
}

impl StringLookup for SharedInterner {
    fn lookup(&self, name: Name) -> &str {
        self.0.lookup(name)
    }
}

/// Interner handle that can be cloned across threads.
#[derive(Clone)]
pub struct SharedInterner(Arc<StringInterner>);

impl SharedInterner {
    pub fn new() -> Self {
        SharedInterner(Arc::new(StringInterner::new()))
    }
}

impl Default for SharedInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Deref for SharedInterner {
    type Target = StringInterner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
