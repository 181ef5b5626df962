//! Heterogeneous argument values and the forward-only cursor that reads them.
//!
//! A real variadic call site in C reads its argument list through a
//! `va_list`, where each read names the type it expects. This crate has no
//! FFI boundary (that belongs to a thin host-side wrapper living outside
//! this crate), so the caller instead builds a `&[Arg]` in the
//! order their argument list would naturally enumerate, and [`ArgCursor`]
//! walks it the same way a `va_list` would be walked: forward-only, one
//! logical argument consumed per read.

/// Closed set of argument kinds a specifier can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    /// No value is consumed (bare alignment-only specifier).
    None,
    Int32,
    Uint32,
    Int64,
    Uint64,
    /// Platform word-sized (`usize`/`isize`), the `z` length modifier family.
    Size,
    Double,
    VoidPtr,
}

/// A raw pointer-kind payload: either a bare address (`%p`) or a borrowed
/// byte string (`%s`, a "C string" in this safe model). Which one a given
/// formatter expects is defined by that formatter's own tag, not by
/// [`ArgKind`] — both are tagged [`ArgKind::VoidPtr`] in the built-in
/// type registry's argument-kind table.
#[derive(Debug, Clone, Copy)]
pub enum PtrValue<'a> {
    Addr(usize),
    Bytes(&'a [u8]),
}

/// One heterogeneous argument as supplied by the caller.
#[derive(Debug, Clone, Copy)]
pub enum Arg<'a> {
    Int32(i32),
    Uint32(u32),
    Int64(i64),
    Uint64(u64),
    Size(usize),
    Double(f64),
    /// A byte string, NUL-terminator not required — the `%s` argument kind.
    Str(&'a [u8]),
    /// A bare address — the `%p` argument kind.
    VoidPtr(usize),
}

impl<'a> Arg<'a> {
    /// The [`ArgKind`] this argument would be read as.
    pub fn kind(&self) -> ArgKind {
        match self {
            Arg::Int32(_) => ArgKind::Int32,
            Arg::Uint32(_) => ArgKind::Uint32,
            Arg::Int64(_) => ArgKind::Int64,
            Arg::Uint64(_) => ArgKind::Uint64,
            Arg::Size(_) => ArgKind::Size,
            Arg::Double(_) => ArgKind::Double,
            Arg::Str(_) => ArgKind::VoidPtr,
            Arg::VoidPtr(_) => ArgKind::VoidPtr,
        }
    }

    /// Reinterpret this argument as a resolved [`Value`] slot.
    pub fn to_value(self) -> Value<'a> {
        match self {
            Arg::Int32(v) => Value::Int(v as i64),
            Arg::Uint32(v) => Value::UInt(v as u64),
            Arg::Int64(v) => Value::Int(v),
            Arg::Uint64(v) => Value::UInt(v),
            Arg::Size(v) => Value::UInt(v as u64),
            Arg::Double(v) => Value::Double(v),
            Arg::Str(s) => Value::Ptr(PtrValue::Bytes(s)),
            Arg::VoidPtr(p) => Value::Ptr(PtrValue::Addr(p)),
        }
    }

    /// Read this argument as a plain integer, widening/truncating as needed.
    /// Used when a specifier requests an integer-typed width/precision
    /// argument (`{:.*}` and friends) regardless of the argument's own
    /// declared kind.
    pub fn as_index(&self) -> Option<i64> {
        match self {
            Arg::Int32(v) => Some(*v as i64),
            Arg::Uint32(v) => Some(*v as i64),
            Arg::Int64(v) => Some(*v),
            Arg::Uint64(v) => Some(*v as i64),
            Arg::Size(v) => Some(*v as i64),
            _ => None,
        }
    }
}

/// A uniform tagged value, populated by the driver and read by formatters.
#[derive(Debug, Clone, Copy)]
pub enum Value<'a> {
    Int(i64),
    UInt(u64),
    Double(f64),
    Ptr(PtrValue<'a>),
    None,
}

/// Forward-only, typed-read cursor over a caller-supplied argument list.
///
/// Values are read strictly in index order, 0, 1, 2, ...; `read_at` still
/// takes an explicit index so a caller that has already scanned ahead (the
/// two-pass mode in [`crate::driver`]) can confirm it isn't skipping or
/// reordering anything, but the cursor itself never looks backward from the
/// indices it has already yielded.
pub struct ArgCursor<'a> {
    args: &'a [Arg<'a>],
}

impl<'a> ArgCursor<'a> {
    pub fn new(args: &'a [Arg<'a>]) -> Self {
        Self { args }
    }

    /// Number of arguments available from the caller.
    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Read the argument at `index`, or `None` if the caller didn't supply
    /// that many arguments.
    pub fn read_at(&self, index: usize) -> Option<Arg<'a>> {
        self.args.get(index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_of_each_arg_variant() {
        assert_eq!(Arg::Int32(1).kind(), ArgKind::Int32);
        assert_eq!(Arg::Uint64(1).kind(), ArgKind::Uint64);
        assert_eq!(Arg::Str(b"x").kind(), ArgKind::VoidPtr);
        assert_eq!(Arg::VoidPtr(0).kind(), ArgKind::VoidPtr);
    }

    #[test]
    fn cursor_reads_by_index_without_consuming() {
        let args = [Arg::Int32(1), Arg::Int32(2), Arg::Int32(3)];
        let cursor = ArgCursor::new(&args);
        assert_eq!(cursor.read_at(2).unwrap().as_index(), Some(3));
        assert_eq!(cursor.read_at(0).unwrap().as_index(), Some(1));
        assert!(cursor.read_at(3).is_none());
    }
}
