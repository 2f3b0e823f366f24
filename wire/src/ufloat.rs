//! UFloat16: the 16-bit non-negative floating-point time encoding used by
//! ACK delta-time fields.
//!
//! The format packs a 5-bit exponent and an 11-bit mantissa with a hidden
//! bit. Raw values below `0x1000` are denormal and encode themselves, so
//! small microsecond counts survive the trip exactly; above that the
//! encoding is lossy (the mantissa truncates) but monotonic.

/// Largest value representable by a UFloat16: mantissa `0xFFF` at the
/// maximum exponent, `0xFFF << 30`.
pub const UFLOAT16_MAX: u64 = 0xFFF << 30;

const MANTISSA_BITS: u32 = 11;
const HIDDEN_BIT: u64 = 1 << MANTISSA_BITS;
const DENORMAL_LIMIT: u64 = 1 << (MANTISSA_BITS + 1);

/// Encodes `value` as a raw UFloat16, truncating the mantissa and
/// saturating at [`UFLOAT16_MAX`].
#[must_use]
pub fn to_ufloat16(value: u64) -> u16 {
    if value < DENORMAL_LIMIT {
        // Denormal range: the value encodes itself.
        return value as u16;
    }
    if value >= UFLOAT16_MAX {
        return u16::MAX;
    }
    // Position of the hidden bit gives the exponent.
    let exponent = 63 - u64::from(value.leading_zeros()) - u64::from(MANTISSA_BITS);
    let mantissa = (value >> exponent) & (HIDDEN_BIT - 1);
    (((exponent + 1) << MANTISSA_BITS) | mantissa) as u16
}

/// Decodes a raw UFloat16 back to its value.
#[must_use]
pub const fn from_ufloat16(raw: u16) -> u64 {
    let raw = raw as u64;
    if raw < DENORMAL_LIMIT {
        return raw;
    }
    let exponent = (raw >> MANTISSA_BITS) - 1;
    let mantissa = (raw & (HIDDEN_BIT - 1)) | HIDDEN_BIT;
    mantissa << exponent
}
