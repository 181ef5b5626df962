//! Caller-owned type registry.
//!
//! A global, process-wide table of custom type tags would need either
//! `unsafe` statics or a lock to be sound under concurrent registration.
//! This crate sidesteps both by making `TypeRegistry` a caller-owned value
//! that the driver takes by reference, keeping the crate
//! `#![deny(unsafe_code)]` while still giving each format call a stable
//! snapshot of the registry as it stood at call entry.
//!
//! Built-in tags (`d`, `x`, `f`, `s`, ...) are *not* stored here — they
//! resolve without a table search; that dispatch lives in
//! `driver::dispatch_builtin`. This table only ever holds tags registered
//! by [`TypeRegistry::register`].

use crate::align::Alignment;
use crate::buffer::OutputBuffer;
use crate::limits::REGISTRY_CAPACITY;
use crate::specifier::{Flags, Tag};
use crate::value::{ArgKind, Value};

/// A fully resolved specifier, as handed to a custom formatter.
///
/// `value` already holds the argument read according to `kind` at
/// registration time; a formatter reads it by matching on the `Value`
/// variant it expects. For pointer-kind arguments the slot holds a borrow
/// whose lifetime is this one format call — formatters must not retain it.
pub struct ResolvedSpec<'a> {
    pub value: Value<'a>,
    pub width: usize,
    pub precision: Option<usize>,
    pub flags: Flags,
    pub alignment: Alignment,
    pub fill: u8,
}

/// A custom formatter: writes its rendering of `spec.value` into `out`,
/// applying its own width/alignment/fill, and returns the number of bytes
/// written (mirroring [`crate::buffer::OutputBuffer::write_bytes`]'s
/// clamped-write convention).
pub type Formatter = fn(&mut OutputBuffer<'_>, &ResolvedSpec<'_>) -> usize;

#[derive(Clone, Copy)]
struct RegistryEntry {
    tag: Tag,
    formatter: Formatter,
    kind: ArgKind,
}

/// Fixed-capacity, caller-owned table mapping custom type tags to
/// formatter functions. See the module docs for why this isn't a global.
pub struct TypeRegistry {
    entries: [Option<RegistryEntry>; REGISTRY_CAPACITY],
    len: usize,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// An empty registry holding only built-in tags (built-ins never touch
    /// this table — see module docs).
    pub const fn new() -> Self {
        Self {
            entries: [None; REGISTRY_CAPACITY],
            len: 0,
        }
    }

    /// Alias for [`TypeRegistry::new`], named for the builder-like
    /// initialization phase callers are expected to run before formatting:
    /// built-ins are always resolvable with no table entries at all, so
    /// "seeded with built-ins" and "empty" are the same state here.
    pub const fn with_builtins() -> Self {
        Self::new()
    }

    /// Register a custom tag. Returns `false` (registration silently
    /// dropped) if the table is already at [`REGISTRY_CAPACITY`]. Tags
    /// longer than [`crate::limits::MAX_TAG_LEN`] bytes are truncated by
    /// [`Tag::from_bytes`].
    pub fn register(&mut self, tag: &[u8], formatter: Formatter, kind: ArgKind) -> bool {
        if self.len >= self.entries.len() {
            return false;
        }
        self.entries[self.len] = Some(RegistryEntry {
            tag: Tag::from_bytes(tag),
            formatter,
            kind,
        });
        self.len += 1;
        true
    }

    /// Look up a previously registered tag. Linear search: user tags are
    /// searched after built-ins, which never touch this table.
    pub fn resolve(&self, tag: &[u8]) -> Option<(Formatter, ArgKind)> {
        self.entries[..self.len]
            .iter()
            .flatten()
            .find(|e| e.tag.as_bytes() == tag)
            .map(|e| (e.formatter, e.kind))
    }

    /// Number of custom tags currently registered.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
