//! Number-to-text rendering: integer digit emission in any of the four
//! supported bases, and fixed-point `double` rendering via manual IEEE-754
//! decomposition.

pub mod float;
pub mod int;

pub use float::format_float;
pub use int::{format_signed, format_unsigned, Base};
