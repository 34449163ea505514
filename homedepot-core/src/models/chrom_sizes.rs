use std::collections::HashMap;

use crate::errors::{HomedepotError, Result};

///
/// Mapping from chromosome name to its length. Immutable once loaded.
///
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChromSizes {
    sizes: HashMap<String, i64>,
}

impl ChromSizes {
    pub fn new(sizes: HashMap<String, i64>) -> Self {
        ChromSizes { sizes }
    }

    pub fn get(&self, chrom: &str) -> Option<i64> {
        self.sizes.get(chrom).copied()
    }

    ///
    /// Like [ChromSizes::get], but an absent chromosome is an error.
    ///
    pub fn length_of(&self, chrom: &str) -> Result<i64> {
        self.get(chrom)
            .ok_or_else(|| HomedepotError::UnknownChromosome(chrom.to_string()))
    }

    pub fn contains(&self, chrom: &str) -> bool {
        self.sizes.contains_key(chrom)
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}

impl FromIterator<(String, i64)> for ChromSizes {
    fn from_iter<T: IntoIterator<Item = (String, i64)>>(iter: T) -> Self {
        ChromSizes {
            sizes: iter.into_iter().collect(),
        }
    }
}
