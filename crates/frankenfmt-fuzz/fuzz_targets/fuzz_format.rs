#![no_main]
use libfuzzer_sys::fuzz_target;

use frankenfmt_core::{format, Arg, ArgCursor, OutputBuffer, TypeRegistry};

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let split = data.len().min(64);
    let (arg_bytes, template) = data.split_at(split);
    let args = decode_args(arg_bytes);

    let mut storage = [0u8; 256];
    let mut out = OutputBuffer::new(&mut storage);
    let cursor = ArgCursor::new(&args);
    let registry = TypeRegistry::with_builtins();
    // Must never panic or write past `storage`, for any template/argument
    // byte soup a fuzzer can produce.
    let _ = format(template, &mut out, args.len(), &cursor, &registry);
});

/// Carve an arbitrary byte prefix into a small heterogeneous argument list:
/// each leading byte selects a variant, consuming a fixed number of
/// trailing bytes as its payload. Running out of bytes mid-argument just
/// stops early rather than producing a malformed one.
fn decode_args(bytes: &[u8]) -> Vec<Arg<'_>> {
    let mut args = Vec::new();
    let mut pos = 0;
    while pos < bytes.len() && args.len() < 16 {
        let tag = bytes[pos];
        pos += 1;
        let arg = match tag % 7 {
            0 => take4(bytes, &mut pos).map(|b| Arg::Int32(i32::from_le_bytes(b))),
            1 => take4(bytes, &mut pos).map(|b| Arg::Uint32(u32::from_le_bytes(b))),
            2 => take8(bytes, &mut pos).map(|b| Arg::Int64(i64::from_le_bytes(b))),
            3 => take8(bytes, &mut pos).map(|b| Arg::Uint64(u64::from_le_bytes(b))),
            4 => take8(bytes, &mut pos).map(|b| Arg::Double(f64::from_le_bytes(b))),
            5 => take4(bytes, &mut pos).map(|b| Arg::Size(u32::from_le_bytes(b) as usize)),
            _ => {
                let len = bytes.get(pos).copied().unwrap_or(0) as usize % 8;
                pos += 1;
                if pos + len > bytes.len() {
                    None
                } else {
                    let s = &bytes[pos..pos + len];
                    pos += len;
                    Some(Arg::Str(s))
                }
            }
        };
        match arg {
            Some(a) => args.push(a),
            None => break,
        }
    }
    args
}

fn take4(bytes: &[u8], pos: &mut usize) -> Option<[u8; 4]> {
    let slice = bytes.get(*pos..*pos + 4)?;
    *pos += 4;
    Some(slice.try_into().unwrap())
}

fn take8(bytes: &[u8], pos: &mut usize) -> Option<[u8; 8]> {
    let slice = bytes.get(*pos..*pos + 8)?;
    *pos += 8;
    Some(slice.try_into().unwrap())
}
