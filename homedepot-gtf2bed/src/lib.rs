//! # gtf-to-bed
//!
//! Turns GTF/GFF annotations into BED windows placed relative to each feature's
//! 5' end. Upstream and downstream distances are measured from a chosen anchor
//! (the feature start or end), flip with the strand, and are clamped to the
//! chromosome boundaries.
//!
//! ```rust,ignore
//! use homedepot_gtf2bed::{Gtf2BedOptions, gtf_to_bed};
//!
//! let options = Gtf2BedOptions::default();
//! let stats = gtf_to_bed("genes.gtf.gz".as_ref(), "hg38.chrom.sizes".as_ref(), "tss.bed".as_ref(), &options)?;
//! ```
pub mod annotation;
pub mod attributes;
pub mod consts;
pub mod pipeline;
pub mod window;

// Re-exports
pub use annotation::*;
pub use attributes::*;
pub use pipeline::*;
pub use window::*;
