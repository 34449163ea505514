use std::io::Write;
use std::path::Path;

use fxhash::FxHashMap;
use log::info;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::index;

use homedepot_core::models::{Fragment, FragmentKey};
use homedepot_core::utils::write_atomically;
use homedepot_core::{HomedepotError, Result};

use crate::counter::for_each_fragment;

///
/// The fragments of one file viewed as a multiset: every distinct fragment key
/// appears as many times as its count. Instead of materializing the repeated
/// elements, the multiset keeps one entry per key plus a cumulative count index,
/// so element `i` (for `i` in `0..total`) belongs to the first key whose
/// cumulative count exceeds `i`.
///
#[derive(Debug, Clone, Default)]
pub struct FragmentMultiset {
    source: String,
    keys: Vec<FragmentKey>,
    cumulative: Vec<u64>,
}

impl FragmentMultiset {
    ///
    /// Build a multiset from fragment records. Records sharing a key are merged;
    /// keys keep the order in which they were first seen. Records with a count
    /// of zero contribute nothing. Fails with `InputFormat` if the total count
    /// does not fit in a `u64`, naming the position of the offending record.
    ///
    pub fn from_fragments<I>(source: &str, fragments: I) -> Result<Self>
    where
        I: IntoIterator<Item = Fragment>,
    {
        Self::from_numbered(
            source,
            fragments
                .into_iter()
                .enumerate()
                .map(|(index, fragment)| (index + 1, fragment)),
        )
    }

    fn from_numbered<I>(source: &str, fragments: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, Fragment)>,
    {
        let mut lookup: FxHashMap<FragmentKey, usize> = FxHashMap::default();
        let mut keys: Vec<FragmentKey> = Vec::new();
        let mut counts: Vec<u64> = Vec::new();
        let mut total: u64 = 0;

        for (line, fragment) in fragments {
            if fragment.count == 0 {
                continue;
            }
            // every per-key count and prefix sum is bounded by the total
            total = total.checked_add(fragment.count).ok_or_else(|| {
                HomedepotError::input_format(source, line, "fragment count overflows")
            })?;

            match lookup.get(&fragment.key) {
                Some(&idx) => counts[idx] += fragment.count,
                None => {
                    lookup.insert(fragment.key.clone(), keys.len());
                    keys.push(fragment.key);
                    counts.push(fragment.count);
                }
            }
        }

        let cumulative = counts
            .iter()
            .scan(0u64, |acc, &count| {
                *acc += count;
                Some(*acc)
            })
            .collect();

        Ok(FragmentMultiset {
            source: source.to_string(),
            keys,
            cumulative,
        })
    }

    ///
    /// Load every fragment of a (gzip'd) fragment file into memory.
    ///
    pub fn from_file(path: &Path) -> Result<Self> {
        let mut fragments = Vec::new();
        for_each_fragment(path, |line, fragment| {
            fragments.push((line, fragment));
            Ok(())
        })?;

        Self::from_numbered(&path.display().to_string(), fragments)
    }

    /// Total multiplicity.
    pub fn total(&self) -> u64 {
        self.cumulative.last().copied().unwrap_or(0)
    }

    /// Number of distinct fragment keys.
    pub fn n_distinct(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    ///
    /// Iterate over `(key, count)` pairs in first-seen order.
    ///
    pub fn iter(&self) -> impl Iterator<Item = (&FragmentKey, u64)> {
        self.keys.iter().enumerate().map(|(idx, key)| {
            let previous = if idx == 0 { 0 } else { self.cumulative[idx - 1] };
            (key, self.cumulative[idx] - previous)
        })
    }

    ///
    /// Draw `n` elements uniformly at random without replacement and collapse them
    /// back into fragment records. Each element is equally likely, so keys with a
    /// higher count are proportionally more likely to be drawn. Keys that are never
    /// drawn are left out of the result, which keeps first-seen key order.
    ///
    /// Fails with `InsufficientData` if `n` exceeds the total multiplicity.
    ///
    pub fn downsample<R: Rng + ?Sized>(&self, n: u64, rng: &mut R) -> Result<Vec<Fragment>> {
        let total = self.total();
        let insufficient = || HomedepotError::InsufficientData {
            path: self.source.clone(),
            requested: n,
            available: total,
        };
        if n > total {
            return Err(insufficient());
        }

        let length = usize::try_from(total).map_err(|_| insufficient())?;
        let amount = usize::try_from(n).map_err(|_| insufficient())?;

        let mut positions = index::sample(rng, length, amount).into_vec();
        positions.sort_unstable();

        // positions are sorted, so a single forward walk over the cumulative index
        // assigns each one to its key
        let mut new_counts = vec![0u64; self.keys.len()];
        let mut idx = 0;
        for position in positions {
            while self.cumulative[idx] <= position as u64 {
                idx += 1;
            }
            new_counts[idx] += 1;
        }

        Ok(self
            .keys
            .iter()
            .zip(new_counts)
            .filter(|(_, count)| *count > 0)
            .map(|(key, count)| Fragment {
                key: key.clone(),
                count,
            })
            .collect())
    }
}

///
/// Get a random number generator, seeded when a seed is given.
///
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

///
/// Write fragment records as a tab-separated fragment file, all-or-nothing.
/// Gzip'd if `path` ends in `.gz`.
///
pub fn write_fragments(path: &Path, fragments: &[Fragment]) -> Result<()> {
    write_atomically(path, |out| {
        for fragment in fragments {
            writeln!(out, "{}", fragment)?;
        }
        Ok(())
    })
}

///
/// Downsample one fragment file to exactly `n` fragments.
///
/// # Arguments
/// - input: fragment file to read
/// - output: where the downsampled fragment file goes
/// - n: downsample target
/// - seed: seed for the random number generator, for reproducible output
///
/// # Returns
/// The number of distinct fragments written.
///
pub fn downsample_file(input: &Path, output: &Path, n: u64, seed: Option<u64>) -> Result<usize> {
    info!("Reading {:?}.", input);
    let multiset = FragmentMultiset::from_file(input)?;
    info!(
        "Finished reading {:?}: {} fragments, {} distinct.",
        input,
        multiset.total(),
        multiset.n_distinct()
    );

    info!("Downsampling {:?}.", input);
    let mut rng = make_rng(seed);
    let sampled = multiset.downsample(n, &mut rng)?;
    info!("Finished downsampling {:?}.", input);

    info!("Writing {:?} to {:?}.", input, output);
    write_fragments(output, &sampled)?;
    info!("Finished writing to {:?}.", output);

    Ok(sampled.len())
}
