use std::time::Instant;

use indicatif::ProgressBar;
use log::{debug, info};
use rayon::ThreadPool;
use rayon::prelude::*;

use homedepot_core::{HomedepotError, Result};

use crate::consts::DEFAULT_THREADS;
use crate::counter::count_fragments;
use crate::manifest::FilePair;
use crate::multiset::downsample_file;
use crate::target::resolve_target;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownsampleConfig {
    pub threads: usize,
    pub seed: Option<u64>,
}

impl Default for DownsampleConfig {
    fn default() -> Self {
        DownsampleConfig {
            threads: DEFAULT_THREADS,
            seed: None,
        }
    }
}

impl DownsampleConfig {
    ///
    /// Seed for the file at `index` in the manifest. Derived from the run seed so
    /// results don't depend on which worker picks up which file.
    ///
    pub fn seed_for(&self, index: usize) -> Option<u64> {
        self.seed.map(|s| s.wrapping_add(index as u64))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownsampleSummary {
    /// The common depth every file was downsampled to.
    pub target: u64,
    /// Total fragment count of each input, in manifest order.
    pub totals: Vec<u64>,
}

pub fn build_pool(threads: usize) -> Result<ThreadPool> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads.max(1))
        .build()
        .map_err(|e| HomedepotError::ThreadPool(e.to_string()))
}

///
/// Count the fragments of every input on `pool`. The first failure stops the
/// remaining work and is returned; no partial list of totals ever escapes.
///
pub fn count_all(pool: &ThreadPool, pairs: &[FilePair], progress: &ProgressBar) -> Result<Vec<u64>> {
    pool.install(|| {
        pairs
            .par_iter()
            .map(|pair| -> Result<u64> {
                let total = count_fragments(&pair.input)?;
                progress.inc(1);
                Ok(total)
            })
            .collect::<Result<Vec<u64>>>()
    })
}

///
/// Downsample every input to depth `target` on `pool`, each file independently.
///
pub fn downsample_all(
    pool: &ThreadPool,
    pairs: &[FilePair],
    target: u64,
    config: &DownsampleConfig,
    progress: &ProgressBar,
) -> Result<()> {
    pool.install(|| {
        pairs
            .par_iter()
            .enumerate()
            .try_for_each(|(index, pair)| -> Result<()> {
                downsample_file(&pair.input, &pair.output, target, config.seed_for(index))?;
                progress.inc(1);
                Ok(())
            })
    })
}

///
/// Downsample multiple fragment files to the same depth.
///
/// Runs in three phases: every input is counted in parallel; once all counts are
/// in, the target depth is the smallest of them; then every input is downsampled
/// to that depth in parallel and written to its output. Any failure while counting
/// aborts the run before a single output is written.
///
/// # Arguments
/// - pairs: input and output paths, one pair per file
/// - config: worker count and optional seed
/// - progress: progress sink, advanced once per file and phase
///
pub fn downsample_fragment_files(
    pairs: &[FilePair],
    config: &DownsampleConfig,
    progress: &ProgressBar,
) -> Result<DownsampleSummary> {
    if pairs.is_empty() {
        return Err(HomedepotError::EmptyInput);
    }

    debug!(
        "Parameters: {} files, {} threads, seed {:?}",
        pairs.len(),
        config.threads,
        config.seed
    );

    let pool = build_pool(config.threads)?;
    progress.set_length(2 * pairs.len() as u64);

    let stime = Instant::now();
    progress.set_message("Counting fragments");
    let totals = count_all(&pool, pairs, progress)?;
    debug!("Counting took {:.3}s", stime.elapsed().as_secs_f64());

    let target = resolve_target(&totals)?;
    info!("Downsample target N: {}.", target);

    let stime = Instant::now();
    progress.set_message("Downsampling");
    downsample_all(&pool, pairs, target, config, progress)?;
    debug!("Downsampling took {:.3}s", stime.elapsed().as_secs_f64());

    progress.finish_with_message("Done!");

    Ok(DownsampleSummary { target, totals })
}
