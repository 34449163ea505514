use homedepot_core::{HomedepotError, Result};

///
/// Resolve the common downsampling depth: the smallest total fragment count
/// across all files.
///
pub fn resolve_target(totals: &[u64]) -> Result<u64> {
    totals.iter().copied().min().ok_or(HomedepotError::EmptyInput)
}
