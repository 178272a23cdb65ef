//! Primitive-to-field conversions.
//!
//! [`FieldValue`] names the width a value is encoded at. The width, not the
//! Rust type, decides the element count: an `i64` account index is one
//! element, an `i64` amount is two limbs.

use super::element::{CodecError, FieldElement};

/// A primitive tagged with its field encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue {
    Bool(bool),
    U8(u8),
    U16(u16),
    /// Must be non-negative. Asset indices are declared `i16` on the wire.
    I16(i16),
    U32(u32),
    /// One element; must be non-negative and below the modulus.
    I64(i64),
    /// Two elements: low 32 bits, then high 32 bits.
    U64Limbs(u64),
    /// Two elements from the unsigned bit pattern of the value.
    I64Limbs(i64),
}

impl FieldValue {
    /// Appends this value's elements to `out`.
    pub fn encode_into(self, out: &mut Vec<FieldElement>) -> Result<(), CodecError> {
        match self {
            Self::Bool(v) => out.push(FieldElement::from_bool(v)),
            Self::U8(v) => out.push(FieldElement::from_u32(u32::from(v))),
            Self::U16(v) => out.push(FieldElement::from_u32(u32::from(v))),
            Self::I16(v) => {
                if v < 0 {
                    return Err(CodecError::Negative {
                        value: i64::from(v),
                    });
                }
                out.push(FieldElement::from_u32(v as u32));
            }
            Self::U32(v) => out.push(FieldElement::from_u32(v)),
            Self::I64(v) => out.push(FieldElement::from_i64(v)?),
            Self::U64Limbs(v) => {
                let (lo, hi) = split_u64(v);
                out.push(lo);
                out.push(hi);
            }
            Self::I64Limbs(v) => {
                let (lo, hi) = split_u64(v as u64);
                out.push(lo);
                out.push(hi);
            }
        }
        Ok(())
    }

    /// Number of elements this value occupies.
    pub const fn width(self) -> usize {
        match self {
            Self::U64Limbs(_) | Self::I64Limbs(_) => 2,
            _ => 1,
        }
    }
}

/// `toFieldElements`: the ordered elements for a single value.
pub fn to_field_elements(value: FieldValue) -> Result<Vec<FieldElement>, CodecError> {
    let mut out = Vec::with_capacity(value.width());
    value.encode_into(&mut out)?;
    Ok(out)
}

/// Splits a 64-bit value into `(low, high)` 32-bit limbs.
///
/// Both limbs are below `2^32` and therefore always canonical.
pub fn split_u64(value: u64) -> (FieldElement, FieldElement) {
    let lo = FieldElement::from_u32((value & 0xFFFF_FFFF) as u32);
    let hi = FieldElement::from_u32((value >> 32) as u32);
    (lo, hi)
}

/// Inverse of [`split_u64`]: `low + (high << 32)`.
pub fn join_limbs(lo: FieldElement, hi: FieldElement) -> u64 {
    lo.as_u64() | (hi.as_u64() << 32)
}

/// Packs a byte buffer into little-endian 8-byte limbs, one element each.
pub fn pack_le_bytes(bytes: &[u8]) -> Result<Vec<FieldElement>, CodecError> {
    if bytes.len() % 8 != 0 {
        return Err(CodecError::UnalignedBytes { len: bytes.len() });
    }
    bytes
        .chunks_exact(8)
        .map(|chunk| {
            let mut limb = [0u8; 8];
            limb.copy_from_slice(chunk);
            FieldElement::from_le_bytes(limb)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn limb_roundtrip_edge_values() {
        for v in [0u64, 1, (1 << 32) - 1, 1 << 32, u64::MAX] {
            let (lo, hi) = split_u64(v);
            assert_eq!(join_limbs(lo, hi), v, "roundtrip failed for {v:#x}");
        }
    }

    #[test]
    fn limb_roundtrip_random_samples() {
        let mut rng = rand::thread_rng();
        for _ in 0..10_000 {
            let v: u64 = rng.gen();
            let (lo, hi) = split_u64(v);
            assert_eq!(join_limbs(lo, hi), v);
        }
    }

    #[test]
    fn low_limb_is_emitted_first() {
        let elems = to_field_elements(FieldValue::U64Limbs(0x0000_0002_0000_0001)).unwrap();
        assert_eq!(elems, vec![FieldElement::from_u32(1), FieldElement::from_u32(2)]);
    }

    #[test]
    fn signed_limbs_use_the_bit_pattern() {
        let elems = to_field_elements(FieldValue::I64Limbs(-1)).unwrap();
        assert_eq!(
            elems,
            vec![
                FieldElement::from_u32(u32::MAX),
                FieldElement::from_u32(u32::MAX)
            ]
        );
    }

    #[test]
    fn scalar_widths_emit_one_element() {
        for v in [
            FieldValue::Bool(true),
            FieldValue::U8(7),
            FieldValue::U16(300),
            FieldValue::I16(62),
            FieldValue::U32(u32::MAX),
            FieldValue::I64((1 << 48) - 2),
        ] {
            assert_eq!(to_field_elements(v).unwrap().len(), 1, "{v:?}");
        }
    }

    #[test]
    fn negative_scalars_are_rejected() {
        assert!(to_field_elements(FieldValue::I16(-1)).is_err());
        assert!(to_field_elements(FieldValue::I64(-5)).is_err());
    }

    #[test]
    fn pack_le_bytes_reads_each_limb_little_endian() {
        let mut bytes = [0u8; 16];
        bytes[0] = 1;
        bytes[8] = 2;
        let elems = pack_le_bytes(&bytes).unwrap();
        assert_eq!(elems, vec![FieldElement::from_u32(1), FieldElement::from_u32(2)]);
    }

    #[test]
    fn pack_le_bytes_rejects_bad_input() {
        assert_eq!(
            pack_le_bytes(&[0u8; 7]),
            Err(CodecError::UnalignedBytes { len: 7 })
        );
        assert!(pack_le_bytes(&[0xFF; 8]).is_err());
    }
}
