//! Field-width alignment padding.
//!
//! This module only knows "pad before" vs "pad after" vs "split the pad";
//! the mapping from the `<`/`^`/`>` grammar tokens onto these three (which
//! is *not* the conventional left/right-justify reading — `>` puts the
//! fill after the text, `<` puts it before) lives in
//! `specifier::parse_specifier`. The
//! `ZERO` numeric flag bypasses this pass entirely for the space it already
//! filled — it is applied internally by the integer/float renderers in
//! `numeric/`, between the sign/prefix and the digits; this pass still runs
//! afterward but is a no-op once that padding already reached `width`.

use crate::buffer::OutputBuffer;

/// Field alignment. Named by where the padding lands, not by which grammar
/// token selects it — see `specifier::parse_specifier` for that mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    /// Text, then fill.
    Left,
    /// Fill split across both sides, shorter half first.
    Center,
    /// Fill, then text.
    Right,
}

/// Emit `text` into `out`, padded with `fill` to at least `width` bytes
/// according to `align`. If `text.len() >= width`, `text` is emitted
/// unchanged. Returns the number of bytes written.
pub fn emit_aligned(out: &mut OutputBuffer<'_>, text: &[u8], width: usize, fill: u8, align: Alignment) -> usize {
    if text.len() >= width {
        return out.write_bytes(text);
    }
    let pad = width - text.len();
    let mut n = 0;
    match align {
        Alignment::Left => {
            n += out.write_bytes(text);
            n += out.write_fill(fill, pad);
        }
        Alignment::Right => {
            n += out.write_fill(fill, pad);
            n += out.write_bytes(text);
        }
        Alignment::Center => {
            let left = pad / 2;
            let right = pad - left;
            n += out.write_fill(fill, left);
            n += out.write_bytes(text);
            n += out.write_fill(fill, right);
        }
    }
    n
}
