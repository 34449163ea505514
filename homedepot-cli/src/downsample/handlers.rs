use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;
use indicatif::{ProgressBar, ProgressStyle};
use log::{LevelFilter, info};

use homedepot_downsample::{DownsampleConfig, downsample_fragment_files, read_manifest};

fn make_progress_bar() -> Result<ProgressBar> {
    if log::max_level() < LevelFilter::Info {
        return Ok(ProgressBar::hidden());
    }

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg} ({eta})")?
            .progress_chars("##-"),
    );

    Ok(pb)
}

pub fn run_downsample(matches: &ArgMatches) -> Result<()> {
    let manifest = matches
        .get_one::<String>("input_file")
        .expect("A manifest of input and output fragment files is required.");

    let config = DownsampleConfig {
        threads: *matches.get_one::<usize>("threads").expect("threads has a default"),
        seed: matches.get_one::<u64>("seed").copied(),
    };

    let pairs = read_manifest(Path::new(manifest))
        .with_context(|| format!("Failed to read manifest {}", manifest))?;

    let progress = make_progress_bar()?;
    let summary = downsample_fragment_files(&pairs, &config, &progress)
        .context("Downsampling fragment files failed")?;

    info!(
        "Downsampled {} files to {} fragments each.",
        summary.totals.len(),
        summary.target
    );

    Ok(())
}
