//! Fixed-point `double` rendering.
//!
//! Scientific notation is out of scope, so this covers only the `f`/`F`
//! conversions: sign, truncated integer part, and a rounded fractional part
//! out to a bounded number of digits. A renderer built on `alloc::format!`
//! can't be reused in a `no_std` core, so this decomposes the IEEE-754 bit
//! pattern directly instead, and gets the integer/fractional split from
//! `as u64` truncating casts rather than `f64::trunc` (a `libm`-gated
//! method this crate's dependency-free core doesn't pull in).

use crate::numeric::int::zero_pad_digits;
use crate::specifier::Flags;

/// Power-of-ten table, indices 0..=9 (float precision is capped at 9).
const POW10: [u64; 10] = [1, 10, 100, 1_000, 10_000, 100_000, 1_000_000, 10_000_000, 100_000_000, 1_000_000_000];

/// Render one finite-or-special double. `precision` is the already-clamped
/// (to `[0, FLOAT_PRECISION_MAX]`) fractional digit count; pass
/// `FLOAT_PRECISION_DEFAULT` when the specifier didn't request one.
/// `width` and `flags.zero` drive internal zero-padding exactly as for
/// integers (`int::format_signed`); the external alignment pass still runs
/// unconditionally afterward and is a no-op once this has reached `width`.
pub fn format_float(out: &mut [u8], value: f64, precision: usize, width: usize, flags: Flags) -> Option<usize> {
    let bits = value.to_bits();
    let sign_bit = (bits >> 63) & 1 == 1;
    let exp_bits = ((bits >> 52) & 0x7FF) as u32;
    let frac_bits = bits & 0x000F_FFFF_FFFF_FFFF;

    let sign: &[u8] = if sign_bit {
        b"-"
    } else if flags.sign {
        b"+"
    } else if flags.space {
        b" "
    } else {
        b""
    };

    if exp_bits == 0x7FF {
        let body: &[u8] = if frac_bits == 0 {
            if flags.upper { b"INF" } else { b"inf" }
        } else if flags.upper {
            b"NAN"
        } else {
            b"nan"
        };
        let total = sign.len() + body.len();
        if total > out.len() {
            return None;
        }
        out[..sign.len()].copy_from_slice(sign);
        out[sign.len()..total].copy_from_slice(body);
        return Some(total);
    }

    let precision = precision.min(crate::limits::FLOAT_PRECISION_MAX);
    let magnitude = value.abs();

    let (whole, frac) = split_and_round(magnitude, precision);
    let show_fraction = !(flags.alt && frac == 0) && precision > 0;

    let mut whole_scratch = [0u8; 32];
    let whole_digits = render_decimal(&mut whole_scratch, whole);

    let mut frac_scratch = [0u8; 16];
    let frac_digits = if show_fraction {
        render_decimal(&mut frac_scratch, frac)
    } else {
        &frac_scratch[16..16]
    };
    let frac_field = if show_fraction { precision } else { 0 };
    let dot_len = if show_fraction { 1 } else { 0 };

    let base_len = sign.len() + whole_digits.len() + dot_len + frac_field;
    let extra = if flags.zero && base_len < width { width - base_len } else { 0 };
    let whole_field = whole_digits.len() + extra;

    let total = sign.len() + whole_field + dot_len + frac_field;
    if total > out.len() {
        return None;
    }

    let mut pos = 0;
    out[pos..pos + sign.len()].copy_from_slice(sign);
    pos += sign.len();
    pos += zero_pad_digits(&mut out[pos..], whole_digits, whole_field);
    if show_fraction {
        out[pos] = b'.';
        pos += 1;
        pos += zero_pad_digits(&mut out[pos..], frac_digits, frac_field);
    }
    Some(pos)
}

/// Split `magnitude` (already non-negative, finite) into a truncated whole
/// part and a `precision`-digit rounded fractional part, under a
/// round-half-to-even policy. A fractional carry (`frac == 10^precision`)
/// rolls into `whole`.
fn split_and_round(magnitude: f64, precision: usize) -> (u64, u64) {
    let whole = magnitude as u64;
    let whole_f = whole as f64;
    let remainder = magnitude - whole_f;
    let scale = POW10[precision] as f64;
    let scaled = remainder * scale;
    let mut frac = scaled as u64;
    let delta = scaled - frac as f64;

    let round_up = if delta > 0.5 {
        true
    } else if delta < 0.5 {
        false
    } else {
        frac == 0 || frac % 2 == 1
    };
    if round_up {
        frac += 1;
    }

    if frac == POW10[precision] {
        (whole + 1, 0)
    } else {
        (whole, frac)
    }
}

fn render_decimal(scratch: &mut [u8], value: u64) -> &[u8] {
    if value == 0 {
        scratch[0] = b'0';
        return &scratch[..1];
    }
    let mut big = [0u8; 32];
    let mut v = value;
    let mut pos = 32;
    while v > 0 {
        pos -= 1;
        big[pos] = b'0' + (v % 10) as u8;
        v /= 10;
    }
    let n = 32 - pos;
    scratch[..n].copy_from_slice(&big[pos..32]);
    &scratch[..n]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags() -> Flags {
        Flags::default()
    }

    #[test]
    fn default_precision_six() {
        let mut out = [0u8; 32];
        let n = format_float(&mut out, 3.5, crate::limits::FLOAT_PRECISION_DEFAULT, 0, flags()).unwrap();
        assert_eq!(&out[..n], b"3.500000");
    }

    #[test]
    fn negative_value() {
        let mut out = [0u8; 32];
        let n = format_float(&mut out, -2.25, 2, 0, flags()).unwrap();
        assert_eq!(&out[..n], b"-2.25");
    }

    #[test]
    fn zero_value() {
        let mut out = [0u8; 32];
        let n = format_float(&mut out, 0.0, 3, 0, flags()).unwrap();
        assert_eq!(&out[..n], b"0.000");
    }

    #[test]
    fn alt_suppresses_zero_fraction() {
        let mut out = [0u8; 32];
        let mut f = flags();
        f.alt = true;
        let n = format_float(&mut out, 4.0, 2, 0, f).unwrap();
        assert_eq!(&out[..n], b"4");
    }

    #[test]
    fn precision_zero_omits_decimal_point() {
        let mut out = [0u8; 32];
        let n = format_float(&mut out, 3.7, 0, 0, flags()).unwrap();
        assert_eq!(&out[..n], b"3");
    }

    #[test]
    fn infinity_and_nan() {
        let mut out = [0u8; 32];
        let n = format_float(&mut out, f64::INFINITY, 6, 0, flags()).unwrap();
        assert_eq!(&out[..n], b"inf");

        let mut f = flags();
        f.upper = true;
        let n = format_float(&mut out, f64::NEG_INFINITY, 6, 0, f).unwrap();
        assert_eq!(&out[..n], b"-INF");

        let n = format_float(&mut out, f64::NAN, 6, 0, flags()).unwrap();
        assert_eq!(&out[..n], b"nan");
    }

    #[test]
    fn force_sign_on_positive() {
        let mut out = [0u8; 32];
        let mut f = flags();
        f.sign = true;
        let n = format_float(&mut out, 1.5, 1, 0, f).unwrap();
        assert_eq!(&out[..n], b"+1.5");
    }

    #[test]
    fn zero_flag_pads_whole_part() {
        let mut out = [0u8; 32];
        let mut f = flags();
        f.zero = true;
        let n = format_float(&mut out, 3.5, 1, 6, f).unwrap();
        assert_eq!(&out[..n], b"0003.5");
    }

    #[test]
    fn round_half_to_even() {
        // 0.125 at precision 2: scaled = 12.5, frac = 12 (even) -> no round up.
        let mut out = [0u8; 32];
        let n = format_float(&mut out, 0.125, 2, 0, flags()).unwrap();
        assert_eq!(&out[..n], b"0.12");

        // 0.375 at precision 2: scaled = 37.5, frac = 37 (odd) -> round up to 38.
        let n = format_float(&mut out, 0.375, 2, 0, flags()).unwrap();
        assert_eq!(&out[..n], b"0.38");
    }

    #[test]
    fn fraction_carries_into_whole() {
        // 0.999 at precision 2 rounds the fraction up to 100 -> carries to 1.00.
        let mut out = [0u8; 32];
        let n = format_float(&mut out, 0.999, 2, 0, flags()).unwrap();
        assert_eq!(&out[..n], b"1.00");
    }
}
