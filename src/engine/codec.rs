//! 16-bit little-endian sample codec
//!
//! Saturation on encode is applied to each byte separately, not to the
//! 16-bit value: an overflowing result becomes the byte pair (127, 127),
//! which decodes to 32639 rather than 32767. The negative side becomes
//! (-128, -128), decoding to -32640. Edits and tests rely on these exact
//! bytes.

/// Byte pair written for results above `i16::MAX`
pub const POSITIVE_CLIP: [u8; 2] = [0x7F, 0x7F];

/// Byte pair written for results below `i16::MIN`
pub const NEGATIVE_CLIP: [u8; 2] = [0x80, 0x80];

/// Decode the sample stored at `(lo, hi)`
#[inline]
pub fn decode_sample(lo: u8, hi: u8) -> i16 {
    i16::from_le_bytes([lo, hi])
}

/// Encode a transform result, clipping out-of-range values per byte
#[inline]
pub fn encode_clipped(result: i64) -> [u8; 2] {
    if result > i16::MAX as i64 {
        POSITIVE_CLIP
    } else if result < i16::MIN as i64 {
        NEGATIVE_CLIP
    } else {
        [(result & 0xFF) as u8, ((result >> 8) & 0xFF) as u8]
    }
}

/// Iterate over the decoded samples of an even-length byte slice
pub fn samples(bytes: &[u8]) -> impl Iterator<Item = i16> + '_ {
    bytes
        .chunks_exact(2)
        .map(|pair| decode_sample(pair[0], pair[1]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_decode_sign_extends_high_byte() {
        assert_eq!(decode_sample(0x00, 0x00), 0);
        assert_eq!(decode_sample(0xE8, 0x03), 1000);
        assert_eq!(decode_sample(0xFF, 0xFF), -1);
        assert_eq!(decode_sample(0x00, 0x80), i16::MIN);
        assert_eq!(decode_sample(0xFF, 0x7F), i16::MAX);
    }

    #[test_case(500, [0xF4, 0x01] ; "positive")]
    #[test_case(-1, [0xFF, 0xFF] ; "minus one")]
    #[test_case(32767, [0xFF, 0x7F] ; "max")]
    #[test_case(-32768, [0x00, 0x80] ; "min")]
    fn test_encode_in_range(value: i64, expected: [u8; 2]) {
        assert_eq!(encode_clipped(value), expected);
    }

    #[test]
    fn test_encode_saturates_per_byte() {
        let high = encode_clipped(60000);
        assert_eq!(high, [127, 127]);
        assert_eq!(decode_sample(high[0], high[1]), 32639);

        let low = encode_clipped(-40000);
        assert_eq!(low, [0x80, 0x80]);
        assert_eq!(decode_sample(low[0], low[1]), -32640);
    }

    #[test]
    fn test_samples_iterator() {
        let bytes = [0xE8, 0x03, 0xFF, 0xFF, 0x00, 0x00];
        let decoded: Vec<i16> = samples(&bytes).collect();
        assert_eq!(decoded, vec![1000, -1, 0]);
    }
}
