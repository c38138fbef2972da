//! Benchmarks for the cmus cache decoder.
//!
//! The benches live under `benches/`; this library holds shared helpers.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod utils;
