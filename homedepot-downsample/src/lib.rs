//! # Fragment downsampling
//!
//! Brings a set of fragment files to the same sequencing depth. Every file is
//! counted (total fragment multiplicity, the sum of the count column), the
//! smallest total becomes the common target `N`, and each file is then reduced
//! to exactly `N` fragments drawn uniformly at random without replacement from
//! its multiset of fragments.
//!
//! Fragment files are gzip'd, tab-separated `chrom start end barcode count` rows;
//! lines starting with `#` are skipped.
//!
//! ```rust,ignore
//! use homedepot_downsample::{DownsampleConfig, downsample_fragment_files, read_manifest};
//! use indicatif::ProgressBar;
//!
//! let pairs = read_manifest("manifest.tsv".as_ref())?;
//! let config = DownsampleConfig { threads: 8, seed: Some(42) };
//! let summary = downsample_fragment_files(&pairs, &config, &ProgressBar::hidden())?;
//! println!("downsampled to {} fragments", summary.target);
//! ```
pub mod consts;
pub mod counter;
pub mod manifest;
pub mod multiset;
pub mod pool;
pub mod target;

// Re-exports
pub use counter::*;
pub use manifest::*;
pub use multiset::*;
pub use pool::*;
pub use target::*;
