use std::fmt::{self, Display};
use std::io::Write;
use std::path::Path;
use std::time::Instant;

use log::{debug, info};

use homedepot_core::Result;
use homedepot_core::models::{ChromSizes, Strand};
use homedepot_core::utils::{read_chrom_sizes, write_atomically};

use crate::annotation::{GenomicFeature, read_annotation};
use crate::attributes::{AnnotationFormat, parse_attributes};
use crate::consts::{DEFAULT_ATTR_ID, DEFAULT_FEATURE_TYPE};
use crate::window::{WindowSpec, compute_window};

#[derive(Debug, Clone)]
pub struct Gtf2BedOptions {
    pub input_format: AnnotationFormat,
    pub feature_type: String,
    pub window: WindowSpec,
    pub attr_id: String,
}

impl Default for Gtf2BedOptions {
    fn default() -> Self {
        Gtf2BedOptions {
            input_format: AnnotationFormat::GTF,
            feature_type: DEFAULT_FEATURE_TYPE.to_string(),
            window: WindowSpec::default(),
            attr_id: DEFAULT_ATTR_ID.to_string(),
        }
    }
}

///
/// A BED6 output row.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BedRecord {
    pub chrom: String,
    pub start: i64,
    pub end: i64,
    pub name: String,
    pub score: String,
    pub strand: Strand,
}

impl Display for BedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}",
            self.chrom, self.start, self.end, self.name, self.score, self.strand
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Gtf2BedStats {
    pub features_read: usize,
    pub features_selected: usize,
    pub records_written: usize,
}

///
/// Keep features whose chromosome is in the size table and whose type matches.
///
pub fn select_features(
    features: Vec<GenomicFeature>,
    chrom_sizes: &ChromSizes,
    feature_type: &str,
) -> Vec<GenomicFeature> {
    features
        .into_iter()
        .filter(|f| chrom_sizes.contains(&f.chrom) && f.feature_type == feature_type)
        .collect()
}

///
/// Compute the window of every feature and turn the valid ones (`start < end`)
/// into BED records named after the `attr_id` attribute. A feature without that
/// attribute gets an empty name.
///
pub fn features_to_bed(
    features: &[GenomicFeature],
    chrom_sizes: &ChromSizes,
    options: &Gtf2BedOptions,
) -> Result<Vec<BedRecord>> {
    let mut records = Vec::with_capacity(features.len());

    for feature in features {
        let (start, end) = compute_window(feature, &options.window, chrom_sizes)?;
        if start >= end {
            continue;
        }

        let name = parse_attributes(&feature.attributes, options.input_format)
            .remove(&options.attr_id)
            .unwrap_or_default();

        records.push(BedRecord {
            chrom: feature.chrom.clone(),
            start,
            end,
            name,
            score: feature.score.clone(),
            strand: feature.strand,
        });
    }

    Ok(records)
}

///
/// Write BED records, tab separated, no header. Gzip'd if `path` ends in `.gz`.
///
pub fn write_bed(path: &Path, records: &[BedRecord]) -> Result<()> {
    write_atomically(path, |out| {
        for record in records {
            writeln!(out, "{}", record)?;
        }
        Ok(())
    })
}

///
/// Extract windows around annotated features into a BED file.
///
/// # Arguments
/// - input: GTF/GFF file (optionally gzip'd)
/// - chrom_sizes: path to a chrom sizes file
/// - output: path to the BED file to write
/// - options: format, feature type, window placement and name attribute
///
pub fn gtf_to_bed(
    input: &Path,
    chrom_sizes: &Path,
    output: &Path,
    options: &Gtf2BedOptions,
) -> Result<Gtf2BedStats> {
    debug!(
        "Parameters: input={:?}, format={}, output={:?}, type={}, upstream={} ({}), downstream={} ({}), clamp={:?}, chrom sizes={:?}, attr={}",
        input,
        options.input_format,
        output,
        options.feature_type,
        options.window.upstream,
        options.window.upstream_anchor,
        options.window.downstream,
        options.window.downstream_anchor,
        options.window.clamp,
        chrom_sizes,
        options.attr_id
    );

    let stime = Instant::now();
    let features = read_annotation(input)?;
    let features_read = features.len();
    debug!(
        "Read {} features from {:?} in {:.3}s",
        features_read,
        input,
        stime.elapsed().as_secs_f64()
    );

    let stime = Instant::now();
    let chrom_sizes = read_chrom_sizes(chrom_sizes)?;
    debug!(
        "Read {} chromosome sizes in {:.3}s",
        chrom_sizes.len(),
        stime.elapsed().as_secs_f64()
    );

    let features = select_features(features, &chrom_sizes, &options.feature_type);
    let features_selected = features.len();

    let stime = Instant::now();
    let records = features_to_bed(&features, &chrom_sizes, options)?;
    debug!(
        "Transformed coordinates in {:.3}s",
        stime.elapsed().as_secs_f64()
    );

    let stime = Instant::now();
    write_bed(output, &records)?;
    debug!("Writing took {:.3}s", stime.elapsed().as_secs_f64());

    let stats = Gtf2BedStats {
        features_read,
        features_selected,
        records_written: records.len(),
    };
    info!(
        "Wrote {} of {} {} features to {:?} ({} dropped as empty windows)",
        stats.records_written,
        stats.features_selected,
        options.feature_type,
        output,
        stats.features_selected - stats.records_written
    );

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::Anchor;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn chrom_sizes() -> ChromSizes {
        [("chr1".to_string(), 5000), ("chr2".to_string(), 3000)]
            .into_iter()
            .collect()
    }

    fn feature(chrom: &str, feature_type: &str, strand: Strand, attrs: &str) -> GenomicFeature {
        let mut f = GenomicFeature::new(chrom, 1000, 2000, strand, feature_type);
        f.attributes = attrs.to_string();
        f
    }

    #[rstest]
    fn test_select_features(chrom_sizes: ChromSizes) {
        let features = vec![
            feature("chr1", "gene", Strand::Forward, ""),
            feature("chr1", "exon", Strand::Forward, ""),
            feature("chrUn", "gene", Strand::Forward, ""),
            feature("chr2", "gene", Strand::Reverse, ""),
        ];

        let selected = select_features(features, &chrom_sizes, "gene");
        let chroms: Vec<&str> = selected.iter().map(|f| f.chrom.as_str()).collect();
        assert_eq!(chroms, vec!["chr1", "chr2"]);
    }

    #[rstest]
    fn test_features_to_bed_names_and_windows(chrom_sizes: ChromSizes) {
        let features = vec![
            feature("chr1", "gene", Strand::Forward, r#"gene_id "G1"; gene_name "A";"#),
            feature("chr1", "gene", Strand::Reverse, r#"gene_name "B";"#),
        ];
        let options = Gtf2BedOptions {
            window: WindowSpec {
                upstream: 500,
                downstream: 500,
                ..WindowSpec::default()
            },
            ..Gtf2BedOptions::default()
        };

        let records = features_to_bed(&features, &chrom_sizes, &options).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].to_string(), "chr1\t500\t1500\tG1\t.\t+");
        assert_eq!(records[1].to_string(), "chr1\t1500\t2500\t\t.\t-");
    }

    #[rstest]
    fn test_features_to_bed_drops_empty_windows(chrom_sizes: ChromSizes) {
        let features = vec![feature("chr1", "gene", Strand::Forward, "")];
        let options = Gtf2BedOptions {
            window: WindowSpec {
                upstream: -600,
                upstream_anchor: Anchor::Start,
                downstream: 500,
                downstream_anchor: Anchor::Start,
                ..WindowSpec::default()
            },
            ..Gtf2BedOptions::default()
        };

        // start = 1600, end = 1500
        let records = features_to_bed(&features, &chrom_sizes, &options).unwrap();
        assert!(records.is_empty());
    }
}
