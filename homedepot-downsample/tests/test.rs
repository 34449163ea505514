use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;
use indicatif::ProgressBar;
use pretty_assertions::assert_eq;
use rstest::*;
use tempfile::{TempDir, tempdir};

use homedepot_core::HomedepotError;
use homedepot_core::models::{Fragment, FragmentKey};
use homedepot_core::utils::get_dynamic_reader;
use homedepot_downsample::{
    DownsampleConfig, FilePair, count_fragments, downsample_file, downsample_fragment_files,
    read_manifest,
};

fn write_fragment_file(path: &Path, fragments: &[Fragment]) {
    let mut encoder = GzEncoder::new(File::create(path).unwrap(), Compression::default());
    writeln!(encoder, "# reference=GRCh38").unwrap();
    for fragment in fragments {
        writeln!(encoder, "{}", fragment).unwrap();
    }
    encoder.finish().unwrap();
}

fn read_fragment_file(path: &Path) -> HashMap<FragmentKey, u64> {
    get_dynamic_reader(path)
        .unwrap()
        .lines()
        .map(|l| l.unwrap().parse::<Fragment>().unwrap())
        .map(|f| (f.key, f.count))
        .collect()
}

fn as_map(fragments: &[Fragment]) -> HashMap<FragmentKey, u64> {
    fragments.iter().map(|f| (f.key.clone(), f.count)).collect()
}

/// Ten fragments over four keys.
fn sample_a() -> Vec<Fragment> {
    vec![
        Fragment::new("chr1", 100, 200, "AAAA", 4),
        Fragment::new("chr1", 300, 400, "BBBB", 3),
        Fragment::new("chr2", 50, 90, "AAAA", 2),
        Fragment::new("chr2", 50, 90, "CCCC", 1),
    ]
}

/// Seven fragments over three keys.
fn sample_b() -> Vec<Fragment> {
    vec![
        Fragment::new("chr1", 100, 200, "GGGG", 5),
        Fragment::new("chr3", 10, 20, "TTTT", 1),
        Fragment::new("chrX", 10, 20, "TTTT", 1),
    ]
}

#[fixture]
fn workdir() -> TempDir {
    let dir = tempdir().unwrap();
    write_fragment_file(&dir.path().join("a.tsv.gz"), &sample_a());
    write_fragment_file(&dir.path().join("b.tsv.gz"), &sample_b());
    dir
}

fn pairs(dir: &Path) -> Vec<FilePair> {
    vec![
        FilePair::new(dir.join("a.tsv.gz"), dir.join("a.ds.tsv.gz")),
        FilePair::new(dir.join("b.tsv.gz"), dir.join("b.ds.tsv.gz")),
    ]
}

#[rstest]
fn test_count_fragments(workdir: TempDir) {
    assert_eq!(count_fragments(&workdir.path().join("a.tsv.gz")).unwrap(), 10);
    assert_eq!(count_fragments(&workdir.path().join("b.tsv.gz")).unwrap(), 7);
}

#[rstest]
fn test_downsample_to_common_depth(workdir: TempDir) {
    let dir = workdir.path();
    let config = DownsampleConfig {
        threads: 2,
        seed: Some(42),
    };

    let summary = downsample_fragment_files(&pairs(dir), &config, &ProgressBar::hidden()).unwrap();
    assert_eq!(summary.totals, vec![10, 7]);
    assert_eq!(summary.target, 7);

    for (output, original) in [("a.ds.tsv.gz", sample_a()), ("b.ds.tsv.gz", sample_b())] {
        let downsampled = read_fragment_file(&dir.join(output));
        let original = as_map(&original);

        assert_eq!(downsampled.values().sum::<u64>(), 7);
        for (key, count) in &downsampled {
            assert!(*count > 0);
            assert!(*count <= original[key]);
        }
    }

    // the smallest file is kept whole
    assert_eq!(read_fragment_file(&dir.join("b.ds.tsv.gz")), as_map(&sample_b()));
}

#[rstest]
fn test_seeded_runs_are_reproducible(workdir: TempDir) {
    let dir = workdir.path();
    let config = DownsampleConfig {
        threads: 4,
        seed: Some(7),
    };

    downsample_fragment_files(&pairs(dir), &config, &ProgressBar::hidden()).unwrap();
    let first = read_fragment_file(&dir.join("a.ds.tsv.gz"));

    downsample_fragment_files(&pairs(dir), &config, &ProgressBar::hidden()).unwrap();
    let second = read_fragment_file(&dir.join("a.ds.tsv.gz"));

    assert_eq!(first, second);
}

#[rstest]
fn test_failed_count_writes_no_output(workdir: TempDir) {
    let dir = workdir.path();
    let mut pairs = pairs(dir);
    pairs.push(FilePair::new(dir.join("missing.tsv.gz"), dir.join("missing.ds.tsv.gz")));

    let err = downsample_fragment_files(&pairs, &DownsampleConfig::default(), &ProgressBar::hidden())
        .unwrap_err();

    assert!(matches!(err, HomedepotError::FileAccess { .. }));
    for pair in &pairs {
        assert!(!pair.output.exists());
    }
}

#[rstest]
fn test_malformed_input_aborts_run(workdir: TempDir) {
    let dir = workdir.path();
    let broken: PathBuf = dir.join("broken.tsv.gz");
    let mut encoder = GzEncoder::new(File::create(&broken).unwrap(), Compression::default());
    encoder.write_all(b"chr1\t100\t200\tAAAA\tmany\n").unwrap();
    encoder.finish().unwrap();

    let mut pairs = pairs(dir);
    pairs.push(FilePair::new(&broken, dir.join("broken.ds.tsv.gz")));

    let err = downsample_fragment_files(&pairs, &DownsampleConfig::default(), &ProgressBar::hidden())
        .unwrap_err();
    assert!(matches!(err, HomedepotError::InputFormat { line: 1, .. }));
    assert!(!dir.join("a.ds.tsv.gz").exists());
}

#[rstest]
fn test_downsample_file_insufficient_data(workdir: TempDir) {
    let dir = workdir.path();
    let output = dir.join("b.ds.tsv.gz");

    let err = downsample_file(&dir.join("b.tsv.gz"), &output, 8, Some(1)).unwrap_err();
    assert!(matches!(
        err,
        HomedepotError::InsufficientData {
            requested: 8,
            available: 7,
            ..
        }
    ));
    assert!(!output.exists());
}

#[rstest]
fn test_downsample_plain_output(workdir: TempDir) {
    let dir = workdir.path();
    let output = dir.join("a.ds.tsv");

    let written = downsample_file(&dir.join("a.tsv.gz"), &output, 3, Some(3)).unwrap();

    let content = fs::read_to_string(&output).unwrap();
    assert_eq!(content.lines().count(), written);
    let total: u64 = content
        .lines()
        .map(|l| l.parse::<Fragment>().unwrap().count)
        .sum();
    assert_eq!(total, 3);
}

#[rstest]
fn test_manifest_driven_run(workdir: TempDir) {
    let dir = workdir.path();
    let manifest = dir.join("manifest.tsv");
    let content: String = pairs(dir)
        .iter()
        .map(|p| format!("{}\t{}\n", p.input.display(), p.output.display()))
        .collect();
    fs::write(&manifest, content).unwrap();

    let pairs = read_manifest(&manifest).unwrap();
    let summary = downsample_fragment_files(
        &pairs,
        &DownsampleConfig {
            threads: 1,
            seed: None,
        },
        &ProgressBar::hidden(),
    )
    .unwrap();

    assert_eq!(summary.target, 7);
    assert!(dir.join("a.ds.tsv.gz").exists());
    assert!(dir.join("b.ds.tsv.gz").exists());
}
