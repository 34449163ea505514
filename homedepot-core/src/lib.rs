//! # homedepot-core
//!
//! Shared building blocks for the homedepot tools: the error taxonomy, the small set of
//! models both tools agree on (strands, fragments, chromosome sizes) and io helpers that
//! transparently handle gzip compression and all-or-nothing output files.
//!
pub mod errors;
pub mod models;
pub mod utils;

pub use errors::*;
