//! Compile-time resource bounds.
//!
//! All bounds here are fixed constants so that a format call never needs to
//! allocate: every scratch array sized by one of these is a stack array.

/// Maximum arguments addressable in a single `format()` call.
pub const MAX_ARGS: usize = 32;

/// Maximum number of specifiers tracked while replaying a template in
/// two-pass mode. Specifiers beyond this cap are skipped (see
/// [`crate::driver::format`] two-pass replay).
pub const MAX_SPECS: usize = 64;

/// Maximum width or precision value honored from a format directive; larger
/// values are clamped down to this.
pub const MAX_WIDTH: usize = 256;

/// Maximum length, in bytes, of a registered or referenced type tag.
pub const MAX_TAG_LEN: usize = 16;

/// Default float precision when none is given in the specifier.
pub const FLOAT_PRECISION_DEFAULT: usize = 6;

/// Maximum float precision; requests above this are clamped.
pub const FLOAT_PRECISION_MAX: usize = 9;

/// Minimum capacity of the [`crate::registry::TypeRegistry`] custom-tag table.
pub const REGISTRY_CAPACITY: usize = 128;
