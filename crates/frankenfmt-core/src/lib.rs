//! # frankenfmt-core
//!
//! Freestanding, allocation-free string formatting: given a template with
//! `{…}` specifiers and a heterogeneous argument list, render a bounded,
//! NUL-terminated byte sequence into a caller-owned buffer. No `std`, no
//! allocation, no panics on malformed input — every error is in-band and
//! silent: malformed specifiers, unknown type tags, and out-of-range
//! indices degrade to a best-effort rendering rather than a failure.
//!
//! ```
//! use frankenfmt_core::{format, Arg, ArgCursor, OutputBuffer, TypeRegistry};
//!
//! let mut storage = [0u8; 32];
//! let mut out = OutputBuffer::new(&mut storage);
//! let args = [Arg::Int32(42)];
//! let cursor = ArgCursor::new(&args);
//! let registry = TypeRegistry::with_builtins();
//! let n = format(b"the answer is {:d}", &mut out, args.len(), &cursor, &registry);
//! assert_eq!(&storage[..n], b"the answer is 42");
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod align;
pub mod buffer;
pub mod driver;
pub mod limits;
pub mod numeric;
pub mod registry;
pub mod specifier;
pub mod value;

pub use align::Alignment;
pub use buffer::OutputBuffer;
pub use driver::format;
pub use registry::{Formatter, ResolvedSpec, TypeRegistry};
pub use specifier::Flags;
pub use value::{Arg, ArgCursor, ArgKind, PtrValue, Value};
