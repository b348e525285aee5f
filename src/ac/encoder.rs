//! Implements the arithmetic coding encoder.
use crate::ac::{derive_constants, DEFAULT_PRECISION};
use crate::bit_buffer::BitBuffer;

/// Encodes a sequence of symbols against caller-supplied CDFs into a bit
/// stream, maintaining a shrinking interval `[low, high]`.
///
/// Single-use per stream: call [`AcEncoder::encode`] once per symbol, in
/// order, then call [`AcEncoder::flush`] exactly once at the end.
pub struct AcEncoder {
    max_total: u64,
    full_range: u64,
    half_range: u64,
    quarter_range: u64,
    three_quarter_range: u64,
    min_range: u64,
    mask: u64,
    low: u64,
    high: u64,
    pending_bits: u64,
    bit_stream: BitBuffer,
}

impl AcEncoder {
    /// Creates a new encoder with the given interval precision (bits).
    ///
    /// `precision` must satisfy `2 <= precision <= 64`.
    pub fn new(precision: u32) -> Self {
        let c = derive_constants(precision);
        Self {
            max_total: c.max_total,
            full_range: c.full_range,
            half_range: c.half_range,
            quarter_range: c.quarter_range,
            three_quarter_range: c.three_quarter_range,
            min_range: c.min_range,
            mask: c.mask,
            low: 0,
            high: c.mask,
            pending_bits: 0,
            bit_stream: BitBuffer::new(),
        }
    }

    /// Creates a new encoder using the canonical default precision (32).
    pub fn with_default_precision() -> Self {
        Self::new(DEFAULT_PRECISION)
    }

    /// Encodes one symbol.
    ///
    /// `cdf` must have `sym_count + 1` entries, `cdf[0] == 0`, and
    /// `cdf[cdf.len() - 1] == 2^cdf_bits`. `cdf[sym] != cdf[sym + 1]` is
    /// required, encoding a zero-probability symbol is a contract
    /// violation.
    pub fn encode(&mut self, sym: u32, cdf: &[u32], cdf_bits: u32) {
        assert!(self.low < self.high, "interval collapsed before encode");
        assert_eq!(self.low & self.mask, self.low);
        assert_eq!(self.high & self.mask, self.high);

        let range = self.high - self.low + 1;
        assert!(self.min_range <= range, "interval collapse: range too small");
        assert!(range <= self.full_range);

        let c_total = u64::from(cdf[cdf.len() - 1]);
        let c_low = u64::from(cdf[sym as usize]);
        let c_high = u64::from(cdf[sym as usize + 1]);
        assert_ne!(c_low, c_high, "cannot encode a zero-probability symbol");
        assert!(c_total <= self.max_total, "cdf_bits exceeds max_total_bits");
        assert_eq!(1u64 << cdf_bits, c_total, "cdf must sum to 2^cdf_bits");

        self.high = self.low + ((c_high * range) >> cdf_bits) - 1;
        self.low += (c_low * range) >> cdf_bits;

        loop {
            if self.high < self.half_range || self.low >= self.half_range {
                let bit = self.high >= self.half_range;
                self.bit_stream.push_bit(bit);
                while self.pending_bits > 0 {
                    self.bit_stream.push_bit(!bit);
                    self.pending_bits -= 1;
                }
            } else if self.low >= self.quarter_range && self.high < self.three_quarter_range {
                self.pending_bits += 1;
                self.low -= self.quarter_range;
                self.high -= self.quarter_range;
            } else {
                break;
            }
            self.high = (self.high << 1) | 1;
            self.low <<= 1;
            self.high &= self.mask;
            self.low &= self.mask;
        }
    }

    /// Flushes the final pending bits. Call exactly once, after the last
    /// [`AcEncoder::encode`] call.
    pub fn flush(&mut self) {
        self.pending_bits += 1;
        let bit = self.low >= self.quarter_range;
        self.bit_stream.push_bit(bit);
        while self.pending_bits > 0 {
            self.bit_stream.push_bit(!bit);
            self.pending_bits -= 1;
        }
    }

    /// Returns the bit stream written so far.
    pub fn bit_stream(&self) -> &BitBuffer {
        &self.bit_stream
    }

    /// Consumes the encoder, returning the final bit stream.
    pub fn into_bit_stream(self) -> BitBuffer {
        self.bit_stream
    }
}
