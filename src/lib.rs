#![warn(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::panic)]
#![deny(clippy::unwrap_used)]
//! A table-free entropy-coding library: an arithmetic coder (AC) and an
//! asymmetric numeral systems (rANS) codec, sharing a single bit-buffer
//! substrate.
//!
//! Both codecs code symbols against caller-supplied cumulative distribution
//! functions (CDFs), there is no adaptive probability model here, and no
//! self-describing framing. The caller is expected to know the alphabet,
//! the CDF, and the symbol count at decode time.
//!
//! * [`BitBuffer`], the shared append/random-access bit container, exposing
//!   both a FIFO front cursor (for AC decode) and a LIFO back cursor (for
//!   rANS decode).
//! * [`AcEncoder`] / [`AcDecoder`], a streaming arithmetic coder pair.
//! * [`RansCodec`], a single object that both encodes and decodes, in
//!   either interactive (no serialization) or separate (flush/reload) mode.
//!
//! # Example
//!
//! ```
//! use rans_ac_codec::{AcDecoder, AcEncoder};
//!
//! // Five equiprobable symbols, cdf_bits = 16.
//! let cdf = [0u32, 13107, 26214, 39321, 52428, 65536];
//!
//! let mut encoder = AcEncoder::with_default_precision();
//! for sym in [0u32, 1, 2, 3, 4] {
//!     encoder.encode(sym, &cdf, 16);
//! }
//! encoder.flush();
//!
//! let mut decoder = AcDecoder::new(32, encoder.into_bit_stream());
//! for expected in [0u32, 1, 2, 3, 4] {
//!     assert_eq!(decoder.decode(5, &cdf, 16), expected);
//! }
//! ```

#[cfg(feature = "ac")]
pub use ac::{AcDecoder, AcEncoder};
pub use bit_buffer::BitBuffer;
pub use bit_buffer_error::BitBufferError;
#[cfg(feature = "rans")]
pub use rans::RansCodec;

#[cfg(feature = "ac")]
mod ac;
mod bit_buffer;
mod bit_buffer_error;
#[cfg(feature = "rans")]
mod rans;

// Affects the following targets: avr and msp430
#[cfg(any(target_pointer_width = "8", target_pointer_width = "16"))]
compile_error!("usize needs to be at least 32 bit wide");
