//! Template scan, specifier dispatch, and the two-pass out-of-order fallback.
//!
//! Grounded on a literal-run / escape / spec-dispatch scan loop generalized
//! into two scanning modes. Unlike a real `va_list`, this crate's
//! [`crate::value::ArgCursor`] is a plain indexable slice, so an
//! implementation with this much argument inspection could in principle
//! collapse both modes into one pass; the contract is preserved either way.
//! Here that means both modes call the same `read_at(index)` to fetch a
//! value; the only real difference between single-pass and two-pass is
//! *when* bytes are emitted — immediately, or only after the whole template
//! parses cleanly. Two-pass is what keeps a specifier that references
//! argument index 5 before index 0 has been "reached" from emitting a
//! half-finished prefix if that later reference turns out to be invalid.

use crate::align::{self, Alignment};
use crate::buffer::OutputBuffer;
use crate::limits::{FLOAT_PRECISION_DEFAULT, FLOAT_PRECISION_MAX, MAX_ARGS, MAX_SPECS, MAX_WIDTH};
use crate::numeric::float;
use crate::numeric::int::{self, Base};
use crate::registry::{ResolvedSpec, TypeRegistry};
use crate::specifier::{self, ArgSource, ParsedSpecifier};
use crate::value::{Arg, ArgCursor, Value};

/// Scratch size for one rendered numeric body: the widest possible
/// zero-padded field (`MAX_WIDTH`) plus headroom for sign, base prefix, and
/// a `u64`'s worth of digits that the width padding itself doesn't cover.
const SCRATCH_LEN: usize = MAX_WIDTH + 48;

/// Format `template` against `args` (read through `cursor`), writing into
/// `out` and consulting `registry` for any tag `driver` doesn't recognize
/// as a built-in. `max_args` bounds which indices are addressable at all —
/// specifiers referencing indices `>= max_args` are skipped; it is
/// separately clamped to [`MAX_ARGS`].
///
/// `template` is treated as NUL-terminated: scanning stops at the first `0`
/// byte or the end of the slice, whichever comes first, so callers can pass
/// a C-style byte sequence without needing a `CStr`.
///
/// Returns the number of bytes written (excluding the trailing NUL
/// `OutputBuffer` always maintains).
pub fn format(template: &[u8], out: &mut OutputBuffer<'_>, max_args: usize, cursor: &ArgCursor<'_>, registry: &TypeRegistry) -> usize {
    let max_args = max_args.min(MAX_ARGS);
    let template_len = template.iter().position(|&b| b == 0).unwrap_or(template.len());
    let template = &template[..template_len];

    let mut implicit_counter = 0usize;
    let mut cursor_next = 0usize;
    let mut pos = 0usize;

    while pos < template.len() {
        match scan_one(template, pos) {
            Scan::Literal(b, consumed) => {
                out.write_byte(b);
                pos += consumed;
            }
            Scan::SpecStart(body_start) => {
                let saved_implicit = implicit_counter;
                let (spec, consumed) = specifier::parse_specifier(&template[body_start..], &mut implicit_counter, max_args);
                let end = body_start + consumed;

                if !spec.valid {
                    pos = end;
                    continue;
                }

                match sequential_after(&spec, cursor_next) {
                    Some(next) => {
                        cursor_next = next;
                        dispatch(out, &spec, cursor, registry);
                        pos = end;
                    }
                    None => {
                        implicit_counter = saved_implicit;
                        return two_pass(template, pos, implicit_counter, out, max_args, cursor, registry);
                    }
                }
            }
        }
    }
    out.written()
}

/// One lexical item the scanner can produce at `pos`.
enum Scan {
    /// Emit `.0` literally; advance by `.1` bytes (1 for an ordinary byte, 2
    /// for a `{{`/`}}` escape).
    Literal(u8, usize),
    /// A `{` that isn't the first half of `{{` — specifier body starts here.
    SpecStart(usize),
}

fn scan_one(template: &[u8], pos: usize) -> Scan {
    let b = template[pos];
    if b == b'{' {
        if template.get(pos + 1) == Some(&b'{') {
            return Scan::Literal(b'{', 2);
        }
        return Scan::SpecStart(pos + 1);
    }
    if b == b'}' && template.get(pos + 1) == Some(&b'}') {
        return Scan::Literal(b'}', 2);
    }
    Scan::Literal(b, 1)
}

/// If `spec`'s referenced indices (value, and any `FromArg` width/precision)
/// are exactly the next ones in sequence from `cursor_next`, returns the
/// advanced cursor position. Otherwise (a back-reference to an
/// already-passed index, or a forward skip past one not yet reached)
/// returns `None`, signaling the driver to fall back to two-pass mode.
fn sequential_after(spec: &ParsedSpecifier, cursor_next: usize) -> Option<usize> {
    let mut next = cursor_next;
    let mut step = |idx: usize, next: &mut usize| -> bool {
        if idx == *next {
            *next += 1;
            true
        } else {
            false
        }
    };
    if !step(spec.value_index, &mut next) {
        return None;
    }
    if let ArgSource::FromArg(i) = spec.width {
        if !step(i, &mut next) {
            return None;
        }
    }
    if let ArgSource::FromArg(i) = spec.precision {
        if !step(i, &mut next) {
            return None;
        }
    }
    Some(next)
}

/// Two-pass fallback: re-parse the remainder of the template twice from
/// `start` — once silently to validate it parses cleanly end to end, once
/// more to actually dispatch — capping emitted specifiers at [`MAX_SPECS`];
/// any beyond that cap are skipped silently. Bytes already written by the
/// caller before `start` stand; nothing before `start` is revisited.
fn two_pass(template: &[u8], start: usize, implicit_at_start: usize, out: &mut OutputBuffer<'_>, max_args: usize, cursor: &ArgCursor<'_>, registry: &TypeRegistry) -> usize {
    // Pass one: walk to the end, discarding output, just to advance past
    // every specifier deterministically (parsing is pure, so redoing it in
    // pass two from the same starting implicit counter reproduces the same
    // specifiers without needing to buffer them).
    {
        let mut implicit_counter = implicit_at_start;
        let mut pos = start;
        while pos < template.len() {
            match scan_one(template, pos) {
                Scan::Literal(_, consumed) => pos += consumed,
                Scan::SpecStart(body_start) => {
                    let (_spec, consumed) = specifier::parse_specifier(&template[body_start..], &mut implicit_counter, max_args);
                    pos = body_start + consumed;
                }
            }
        }
    }

    // Pass two: replay, this time emitting.
    let mut implicit_counter = implicit_at_start;
    let mut pos = start;
    let mut tracked = 0usize;
    while pos < template.len() {
        match scan_one(template, pos) {
            Scan::Literal(b, consumed) => {
                out.write_byte(b);
                pos += consumed;
            }
            Scan::SpecStart(body_start) => {
                let (spec, consumed) = specifier::parse_specifier(&template[body_start..], &mut implicit_counter, max_args);
                let end = body_start + consumed;
                if spec.valid {
                    if tracked < MAX_SPECS {
                        dispatch(out, &spec, cursor, registry);
                    }
                    tracked += 1;
                }
                pos = end;
            }
        }
    }
    out.written()
}

fn resolve_width(source: ArgSource, cursor: &ArgCursor<'_>) -> usize {
    match source {
        ArgSource::None => 0,
        ArgSource::Fixed(n) => n.min(MAX_WIDTH),
        ArgSource::FromArg(i) => cursor
            .read_at(i)
            .and_then(|a| a.as_index())
            .map(|v| v.max(0) as usize)
            .unwrap_or(0)
            .min(MAX_WIDTH),
    }
}

fn resolve_precision(source: ArgSource, cursor: &ArgCursor<'_>) -> Option<usize> {
    match source {
        ArgSource::None => None,
        ArgSource::Fixed(n) => Some(n.min(MAX_WIDTH)),
        ArgSource::FromArg(i) => Some(
            cursor
                .read_at(i)
                .and_then(|a| a.as_index())
                .map(|v| v.max(0) as usize)
                .unwrap_or(0)
                .min(MAX_WIDTH),
        ),
    }
}

/// Built-in conversions that resolve without a registry table search.
/// Grouped by rendering, not by the C-style length-modifier spelling
/// (`d`/`lld`/`zd` all land on `SignedDecimal`) — in this safe model the
/// [`Arg`] variant already carries its own width, so there's nothing left
/// for the length modifier to disambiguate.
enum Builtin {
    SignedDecimal,
    Unsigned(Base, bool), // (base, force_upper)
    Float(bool),          // force_upper
    Str,
    Char,
    Pointer,
    PassThrough,
}

fn resolve_builtin(tag: &[u8]) -> Option<Builtin> {
    Some(match tag {
        b"d" | b"lld" | b"zd" => Builtin::SignedDecimal,
        b"u" | b"llu" | b"zu" => Builtin::Unsigned(Base::Decimal, false),
        b"b" | b"llb" | b"zb" => Builtin::Unsigned(Base::Binary, false),
        b"o" | b"llo" | b"zo" => Builtin::Unsigned(Base::Octal, false),
        b"x" | b"llx" | b"zx" => Builtin::Unsigned(Base::Hex, false),
        b"X" | b"llX" | b"zX" => Builtin::Unsigned(Base::Hex, true),
        b"f" => Builtin::Float(false),
        b"F" => Builtin::Float(true),
        b"s" => Builtin::Str,
        b"c" => Builtin::Char,
        b"p" => Builtin::Pointer,
        b"" => Builtin::PassThrough,
        _ => return None,
    })
}

fn dispatch(out: &mut OutputBuffer<'_>, spec: &ParsedSpecifier, cursor: &ArgCursor<'_>, registry: &TypeRegistry) -> usize {
    let width = resolve_width(spec.width, cursor);
    let precision = resolve_precision(spec.precision, cursor);
    let tag = spec.tag.as_bytes();

    if let Some(builtin) = resolve_builtin(tag) {
        return dispatch_builtin(out, spec, builtin, width, precision, cursor);
    }
    if let Some((formatter, _kind)) = registry.resolve(tag) {
        let value = cursor.read_at(spec.value_index).map(Arg::to_value).unwrap_or(Value::None);
        let resolved = ResolvedSpec {
            value,
            width,
            precision,
            flags: spec.flags,
            alignment: spec.alignment.unwrap_or(Alignment::Left),
            fill: spec.fill,
        };
        return formatter(out, &resolved);
    }
    emit_bad_type(out, tag)
}

fn emit_bad_type(out: &mut OutputBuffer<'_>, tag: &[u8]) -> usize {
    let mut n = out.write_bytes(b"{bad type: ");
    n += out.write_bytes(tag);
    n += out.write_byte(b'}');
    n
}

fn as_i64(arg: Arg<'_>) -> i64 {
    match arg {
        Arg::Int32(v) => v as i64,
        Arg::Uint32(v) => v as i64,
        Arg::Int64(v) => v,
        Arg::Uint64(v) => v as i64,
        Arg::Size(v) => v as i64,
        Arg::Double(v) => v as i64,
        Arg::Str(_) => 0,
        Arg::VoidPtr(p) => p as i64,
    }
}

fn as_u64(arg: Arg<'_>) -> u64 {
    match arg {
        Arg::Uint32(v) => v as u64,
        Arg::Uint64(v) => v,
        Arg::Size(v) => v as u64,
        Arg::Double(v) => v as u64,
        // Signed values reinterpret their bit pattern the way a C cast to
        // an unsigned type would (sign-extend, then read the bits as u64).
        other => as_i64(other) as u64,
    }
}

fn as_f64(arg: Arg<'_>) -> f64 {
    match arg {
        Arg::Double(v) => v,
        other => as_i64(other) as f64,
    }
}

fn as_addr(arg: Arg<'_>) -> usize {
    match arg {
        Arg::VoidPtr(p) => p,
        Arg::Str(s) => s.as_ptr() as usize,
        other => as_i64(other) as usize,
    }
}

fn dispatch_builtin(out: &mut OutputBuffer<'_>, spec: &ParsedSpecifier, builtin: Builtin, width: usize, precision: Option<usize>, cursor: &ArgCursor<'_>) -> usize {
    match builtin {
        Builtin::PassThrough => {
            let align = spec.alignment.unwrap_or(Alignment::Left);
            align::emit_aligned(out, b"", width, spec.fill, align)
        }
        Builtin::SignedDecimal => {
            let Some(arg) = cursor.read_at(spec.value_index) else {
                return 0;
            };
            let mut scratch = [0u8; SCRATCH_LEN];
            let Some(n) = int::format_signed(&mut scratch, as_i64(arg), Base::Decimal, precision, width, spec.flags) else {
                return 0;
            };
            let align = spec.alignment.unwrap_or(Alignment::Right);
            align::emit_aligned(out, &scratch[..n], width, spec.fill, align)
        }
        Builtin::Unsigned(base, force_upper) => {
            let Some(arg) = cursor.read_at(spec.value_index) else {
                return 0;
            };
            let mut flags = spec.flags;
            flags.upper |= force_upper;
            let mut scratch = [0u8; SCRATCH_LEN];
            let Some(n) = int::format_unsigned(&mut scratch, as_u64(arg), base, precision, width, flags) else {
                return 0;
            };
            let align = spec.alignment.unwrap_or(Alignment::Right);
            align::emit_aligned(out, &scratch[..n], width, spec.fill, align)
        }
        Builtin::Float(force_upper) => {
            let Some(arg) = cursor.read_at(spec.value_index) else {
                return 0;
            };
            let mut flags = spec.flags;
            flags.upper |= force_upper;
            let precision = precision.unwrap_or(FLOAT_PRECISION_DEFAULT).min(FLOAT_PRECISION_MAX);
            let mut scratch = [0u8; SCRATCH_LEN];
            let Some(n) = float::format_float(&mut scratch, as_f64(arg), precision, width, flags) else {
                return 0;
            };
            let align = spec.alignment.unwrap_or(Alignment::Right);
            align::emit_aligned(out, &scratch[..n], width, spec.fill, align)
        }
        Builtin::Str => {
            let Some(arg) = cursor.read_at(spec.value_index) else {
                return 0;
            };
            let bytes = match arg {
                Arg::Str(s) => s,
                _ => b"",
            };
            let effective_len = precision.map(|p| p.min(bytes.len())).unwrap_or(bytes.len());
            let align = spec.alignment.unwrap_or(Alignment::Left);
            align::emit_aligned(out, &bytes[..effective_len], width, spec.fill, align)
        }
        Builtin::Char => {
            let Some(arg) = cursor.read_at(spec.value_index) else {
                return 0;
            };
            let c = as_i64(arg) as u8;
            let align = spec.alignment.unwrap_or(Alignment::Left);
            align::emit_aligned(out, &[c], width, spec.fill, align)
        }
        Builtin::Pointer => {
            let Some(arg) = cursor.read_at(spec.value_index) else {
                return 0;
            };
            let mut flags = spec.flags;
            flags.alt = true; // %p always shows the base prefix.
            let mut scratch = [0u8; SCRATCH_LEN];
            let Some(n) = int::format_unsigned(&mut scratch, as_addr(arg) as u64, Base::Hex, precision, width, flags) else {
                return 0;
            };
            let align = spec.alignment.unwrap_or(Alignment::Right);
            align::emit_aligned(out, &scratch[..n], width, spec.fill, align)
        }
    }
}
