//! Definite-length CBOR primitives for Plutus data.
//!
//! On-chain validators compare serialized datums byte for byte. Generic CBOR
//! encoders emit indefinite-length arrays (`0x9f ... 0xff`) for Plutus lists
//! and constructors, validators here expect definite headers (`0x80 + n`).
//! Everything is written with definite headers and shortest-form integers,
//! except for fixed-width fields written with [`write_uint64`].
use crate::std::vec::Vec;

use crate::error::CborError;

/// Major type of unsigned integers.
pub const MAJOR_UNSIGNED: u8 = 0;

/// Major type of byte strings.
pub const MAJOR_BYTES: u8 = 2;

/// Major type of arrays.
pub const MAJOR_ARRAY: u8 = 4;

/// Major type of tags.
pub const MAJOR_TAG: u8 = 6;

/// Tag of Plutus constructor 0. Constructors 0 to 6 use consecutive tags.
pub const CONSTR_TAG_BASE: u64 = 121;

/// Tag of Plutus constructor 7. Constructors 7 to 127 use consecutive tags.
pub const CONSTR_TAG_EXTENDED_BASE: u64 = 1280;

/// Tag of general Plutus constructor form, `[index, [fields]]`.
pub const CONSTR_TAG_GENERAL: u64 = 102;

/// Largest constructor index with a compact tag.
pub const MAX_COMPACT_CONSTR_INDEX: u64 = 127;

/// Longest byte string with up to 3-byte header.
pub const MAX_BYTES_LEN: usize = 0xffff;

/// Longest array with single-byte header.
pub const MAX_SMALL_ARRAY_LEN: usize = 23;

/// Write item header, argument in shortest form.
pub fn write_head(out: &mut Vec<u8>, major: u8, value: u64) {
    let major = major << 5;
    if value < 24 {
        out.push(major | value as u8);
    } else if value <= u8::MAX as u64 {
        out.push(major | 24);
        out.push(value as u8);
    } else if value <= u16::MAX as u64 {
        out.push(major | 25);
        out.extend_from_slice(&(value as u16).to_be_bytes());
    } else if value <= u32::MAX as u64 {
        out.push(major | 26);
        out.extend_from_slice(&(value as u32).to_be_bytes());
    } else {
        out.push(major | 27);
        out.extend_from_slice(&value.to_be_bytes());
    }
}

/// Write unsigned integer.
pub fn write_uint(out: &mut Vec<u8>, value: u64) {
    write_head(out, MAJOR_UNSIGNED, value)
}

/// Write unsigned integer always in the 8-byte form, `0x1b` head.
///
/// For fields the validator reads with fixed width.
pub fn write_uint64(out: &mut Vec<u8>, value: u64) {
    out.push((MAJOR_UNSIGNED << 5) | 27);
    out.extend_from_slice(&value.to_be_bytes());
}

/// Write definite array header.
pub fn write_array_header(out: &mut Vec<u8>, len: usize) {
    write_head(out, MAJOR_ARRAY, len as u64)
}

/// Write Plutus constructor tag and definite header for its fields.
///
/// Only the compact tags are supported (constructor indices 0 to 127).
pub fn write_constr(
    out: &mut Vec<u8>,
    index: u64,
    field_count: usize,
) -> Result<(), CborError> {
    let tag = match index {
        0..=6 => CONSTR_TAG_BASE + index,
        7..=MAX_COMPACT_CONSTR_INDEX => CONSTR_TAG_EXTENDED_BASE + index - 7,
        _ => {
            return Err(CborError::ConstructorIndexOutOfRange {
                index,
                max: MAX_COMPACT_CONSTR_INDEX,
            })
        }
    };
    write_head(out, MAJOR_TAG, tag);
    write_array_header(out, field_count);
    Ok(())
}

/// Write definite byte string.
pub fn write_bytes(out: &mut Vec<u8>, field: &'static str, bytes: &[u8]) -> Result<(), CborError> {
    if bytes.len() > MAX_BYTES_LEN {
        return Err(CborError::UnsupportedLength {
            field,
            length: bytes.len(),
            max: MAX_BYTES_LEN,
        });
    }
    write_head(out, MAJOR_BYTES, bytes.len() as u64);
    out.extend_from_slice(bytes);
    Ok(())
}

/// Decode hex field, rejecting odd length and non-hex characters.
pub fn bytes_from_hex(field: &'static str, hex_input: &str) -> Result<Vec<u8>, CborError> {
    hex::decode(hex_input).map_err(|_| CborError::InvalidHexInput { field })
}

/// Write definite byte string given as hex.
pub fn write_hex_bytes(
    out: &mut Vec<u8>,
    field: &'static str,
    hex_input: &str,
) -> Result<(), CborError> {
    let bytes = bytes_from_hex(field, hex_input)?;
    write_bytes(out, field, &bytes)
}

/// Write byte string given as hex, which must decode into exactly
/// `expected_len` bytes.
pub fn write_fixed_hex_bytes(
    out: &mut Vec<u8>,
    field: &'static str,
    hex_input: &str,
    expected_len: usize,
) -> Result<(), CborError> {
    let bytes = bytes_from_hex(field, hex_input)?;
    if bytes.len() != expected_len {
        return Err(CborError::WrongByteLength {
            field,
            expected: expected_len,
            found: bytes.len(),
        });
    }
    write_bytes(out, field, &bytes)
}

/// Write definite array of unsigned integers, at most 23 elements.
pub fn write_small_uint_array(
    out: &mut Vec<u8>,
    field: &'static str,
    values: &[u64],
) -> Result<(), CborError> {
    if values.len() > MAX_SMALL_ARRAY_LEN {
        return Err(CborError::UnsupportedLength {
            field,
            length: values.len(),
            max: MAX_SMALL_ARRAY_LEN,
        });
    }
    write_array_header(out, values.len());
    for value in values.iter() {
        write_uint(out, *value);
    }
    Ok(())
}
