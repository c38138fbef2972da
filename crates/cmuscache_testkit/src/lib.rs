//! # cmuscache testkit
//!
//! Test utilities for the cmus cache decoder.
//!
//! This crate provides:
//! - A layout-aware encoder for synthetic cache files
//! - Property-based test generators using proptest
//! - Temporary cache files on disk
//! - Fuzz testing harnesses
//!
//! The decoder never writes the format; the encoder here exists only so
//! tests can build inputs.
//!
//! ## Usage
//!
//! ```rust
//! use cmuscache_testkit::prelude::*;
//! use cmuscache_core::CacheLayout;
//!
//! let builder = scenarios::single_track(CacheLayout::native());
//! with_cache_file(&builder.build(), |path| {
//!     assert!(path.exists());
//! });
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod builder;
pub mod fixtures;
pub mod fuzz;
pub mod generators;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::builder::*;
    pub use crate::fixtures::*;
    pub use crate::fuzz::*;
    pub use crate::generators::*;
}

pub use builder::*;
pub use fixtures::*;
pub use fuzz::*;
pub use generators::*;
