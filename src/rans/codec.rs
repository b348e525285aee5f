//! Implements the rANS encode/decode state machine.
use crate::bit_buffer::BitBuffer;
use crate::rans::{derive_constants, DEFAULT_H_PRECISION, DEFAULT_T_PRECISION};

/// A single rANS `state` register plus the bit buffer it spills to / refills
/// from.
///
/// Used in one of two modes:
/// - **Interactive**: construct with [`RansCodec::new`], call
///   [`RansCodec::encode`] for each symbol, then call [`RansCodec::decode`]
///   the same number of times *without* calling [`RansCodec::flush`], this
///   yields the symbols in reverse order.
/// - **Separate**: construct with [`RansCodec::new`], encode, call
///   [`RansCodec::flush`], persist the bit stream, and later reconstruct a
///   fresh codec with [`RansCodec::from_bit_stream`] to decode.
///
/// Calling `flush` in interactive mode corrupts `state` (sets it to zero)
/// and makes any subsequent `decode` call wrong. `flush` is only meaningful
/// once, at the end of an encode-only lifetime that will be serialized.
pub struct RansCodec {
    state: u64,
    h_precision: u32,
    t_precision: u32,
    h_min: u64,
    bit_stream: BitBuffer,
}

impl RansCodec {
    /// Creates a fresh codec ready to encode, with `state` initialized to
    /// `h_min`.
    ///
    /// `h_precision`/`t_precision` must both be multiples of 8, and satisfy
    /// `t_precision < h_precision <= 2 * t_precision`.
    pub fn new(h_precision: u32, t_precision: u32) -> Self {
        let c = derive_constants(h_precision, t_precision);
        Self {
            state: c.h_min,
            h_precision,
            t_precision,
            h_min: c.h_min,
            bit_stream: BitBuffer::new(),
        }
    }

    /// Creates a fresh codec using the canonical default precisions
    /// (`H = 64`, `T = 32`).
    pub fn with_default_precision() -> Self {
        Self::new(DEFAULT_H_PRECISION, DEFAULT_T_PRECISION)
    }

    /// Reconstructs a codec for separate-mode decode from a previously
    /// flushed bit stream.
    ///
    /// Reads the trailing `h_precision / 8` bytes back into `state`,
    /// shrinking `bit_stream` in the process, so the first [`RansCodec::decode`]
    /// call sees exactly the state that was live right before `flush`.
    pub fn from_bit_stream(h_precision: u32, t_precision: u32, mut bit_stream: BitBuffer) -> Self {
        let c = derive_constants(h_precision, t_precision);
        let mut state = 0u64;
        for _ in 0..(h_precision / 8) {
            state = (state << 8) | u64::from(bit_stream.pop_back_byte());
        }
        Self {
            state,
            h_precision,
            t_precision,
            h_min: c.h_min,
            bit_stream,
        }
    }

    /// Encodes one symbol, appending to the bit stream (spilling bytes of
    /// `state` only when it would otherwise overflow).
    pub fn encode(&mut self, sym: u32, cdf: &[u32], cdf_bits: u32) {
        let c_low = u64::from(cdf[sym as usize]);
        let c_high = u64::from(cdf[sym as usize + 1]);
        assert_ne!(c_low, c_high, "cannot encode a zero-probability symbol");
        let c_range = c_high - c_low;
        let c_total = u64::from(cdf[cdf.len() - 1]);
        assert_eq!(1u64 << cdf_bits, c_total, "cdf must sum to 2^cdf_bits");
        assert!(cdf_bits <= self.h_precision, "cdf_bits must not exceed head precision");

        let mut state = self.state;
        let state_max = c_range << (self.h_precision - cdf_bits);
        if state >= state_max {
            for i in 0..(self.t_precision / 8) {
                let byte = ((state >> (8 * i)) & 0xFF) as u8;
                self.bit_stream.push_byte(byte);
            }
            state >>= self.t_precision;
            assert!(state < state_max, "rANS state invariant broken after spill");
        }
        self.state = ((state / c_range) << cdf_bits) + (state % c_range) + c_low;
    }

    /// Flushes the live `state` to the bit stream (separate mode only) and
    /// zeroes it out. Do not call in interactive mode.
    pub fn flush(&mut self) {
        for i in 0..(self.h_precision / 8) {
            let byte = ((self.state >> (8 * i)) & 0xFF) as u8;
            self.bit_stream.push_byte(byte);
        }
        self.state = 0;
    }

    /// Decodes one symbol out of `sym_count` possible symbols.
    ///
    /// In interactive mode this undoes the most recently encoded symbol
    /// that hasn't yet been decoded (LIFO). In separate mode, call this on
    /// a codec built with [`RansCodec::from_bit_stream`].
    pub fn decode(&mut self, sym_count: u32, cdf: &[u32], cdf_bits: u32) -> u32 {
        let scaled_value = self.state & ((1u64 << cdf_bits) - 1);

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
        let c_range = u64::from(cdf[sym as usize + 1]) - c_low;
        let mut state = c_range * (self.state >> cdf_bits) + scaled_value - c_low;

        if state < self.h_min {
            let mut tail = 0u64;
            for _ in 0..(self.t_precision / 8) {
                tail = (tail << 8) | u64::from(self.bit_stream.pop_back_byte());
            }
            state = (state << self.t_precision) | tail;
            assert!(state >= self.h_min, "rANS state invariant broken after refill");
        }
        self.state = state;
        sym
    }

    /// Returns the bit stream accumulated so far.
    pub fn bit_stream(&self) -> &BitBuffer {
        &self.bit_stream
    }

    /// Consumes the codec, returning the final bit stream. Typically called
    /// after [`RansCodec::flush`] in separate mode.
    pub fn into_bit_stream(self) -> BitBuffer {
        self.bit_stream
    }
}
