pub mod chrom_sizes;
pub mod fragments;
pub mod strand;

// re-export for cleaner imports
pub use self::chrom_sizes::ChromSizes;
pub use self::fragments::{Fragment, FragmentKey};
pub use self::strand::Strand;
