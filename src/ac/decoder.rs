//! Implements the arithmetic coding decoder.
use crate::ac::derive_constants;
use crate::bit_buffer::BitBuffer;

/// Decodes a sequence of symbols from a bit stream produced by [`crate::AcEncoder`].
///
/// Mirrors the encoder's interval rules while tracking a live `code`
/// register fed from the bit stream. Single-use: call [`AcDecoder::decode`]
/// exactly as many times as symbols were encoded.
pub struct AcDecoder {
    max_total: u64,
    full_range: u64,
    half_range: u64,
    quarter_range: u64,
    three_quarter_range: u64,
    mask: u64,
    low: u64,
    high: u64,
    code: u64,
    bit_stream: BitBuffer,
}

impl AcDecoder {
    /// Creates a new decoder for the given precision, consuming `bit_stream`
    /// from the front. `precision` must match the value used by the
    /// encoder.
    pub fn new(precision: u32, bit_stream: BitBuffer) -> Self {
        let c = derive_constants(precision);
        let mut dec = Self {
            max_total: c.max_total,
            full_range: c.full_range,
            half_range: c.half_range,
            quarter_range: c.quarter_range,
            three_quarter_range: c.three_quarter_range,
            mask: c.mask,
            low: 0,
            high: c.mask,
            code: 0,
            bit_stream,
        };
        for _ in 0..precision {
            dec.code = (dec.code << 1) | u64::from(dec.bit_stream.pop_front_bit());
        }
        dec
    }

    /// Decodes one symbol out of `sym_count` possible symbols, given `cdf`
    /// and `cdf_bits` matching what the encoder used for this position in
    /// the stream.
    pub fn decode(&mut self, sym_count: u32, cdf: &[u32], cdf_bits: u32) -> u32 {
        let c_total = u64::from(cdf[cdf.len() - 1]);
        assert_eq!(1u64 << cdf_bits, c_total, "cdf must sum to 2^cdf_bits");

        let range = self.high - self.low + 1;
        let scaled_range = self.code - self.low;
        let scaled_value = (((scaled_range + 1) << cdf_bits) - 1) / range;
        assert!(scaled_value < c_total);

        let mut start = 0u64;
        let mut end = u64::from(sym_count);
        while end - start > 1 {
            let mid = (start + end) >> 1;
            if u64::from(cdf[mid as usize]) > scaled_value {
                end = mid;
            } else {
                start = mid;
            }
        }
        let sym = start as u32;

        let c_low = u64::from(cdf[sym as usize]);
        let c_high = u64::from(cdf[sym as usize + 1]);
        assert_ne!(c_low, c_high, "cannot decode a zero-probability symbol");
        assert!(c_total <= self.max_total, "cdf_bits exceeds max_total_bits");

        self.high = self.low + ((c_high * range) >> cdf_bits) - 1;
        self.low += (c_low * range) >> cdf_bits;

        loop {
            if self.high < self.half_range {
                // Interval already in the low half; nothing to subtract.
            } else if self.low >= self.half_range {
                self.code -= self.half_range;
                self.low -= self.half_range;
                self.high -= self.half_range;
            } else if self.low >= self.quarter_range && self.high < self.three_quarter_range {
                self.code -= self.quarter_range;
                self.low -= self.quarter_range;
                self.high -= self.quarter_range;
            } else {
                break;
            }
            self.high = (self.high << 1) | 1;
            self.low <<= 1;
            self.code = (self.code << 1) | u64::from(self.bit_stream.pop_front_bit());
        }

        sym
    }
}
