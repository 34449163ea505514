use std::io::BufRead;
use std::path::Path;

use homedepot_core::models::Strand;
use homedepot_core::utils::get_dynamic_reader;
use homedepot_core::{HomedepotError, Result};

use crate::consts::ANNOTATION_COLUMNS;

///
/// One GTF/GFF row. Coordinates are kept exactly as they appear in the file;
/// 0- or 1-based conventions are the caller's business.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenomicFeature {
    pub chrom: String,
    pub source: String,
    pub feature_type: String,
    pub start: i64,
    pub end: i64,
    pub score: String,
    pub strand: Strand,
    pub frame: String,
    pub attributes: String,
}

impl GenomicFeature {
    pub fn new(chrom: &str, start: i64, end: i64, strand: Strand, feature_type: &str) -> Self {
        GenomicFeature {
            chrom: chrom.to_string(),
            source: ".".to_string(),
            feature_type: feature_type.to_string(),
            start,
            end,
            score: ".".to_string(),
            strand,
            frame: ".".to_string(),
            attributes: String::new(),
        }
    }

    ///
    /// Parse a single tab-separated annotation line.
    ///
    pub fn from_line(line: &str) -> std::result::Result<Self, String> {
        let fields: Vec<&str> = line.trim_end_matches(['\r', '\n']).split('\t').collect();
        if fields.len() != ANNOTATION_COLUMNS {
            return Err(format!(
                "expected {} tab-separated columns, found {}",
                ANNOTATION_COLUMNS,
                fields.len()
            ));
        }

        let start = fields[3]
            .parse::<i64>()
            .map_err(|_| format!("start is not an integer: {:?}", fields[3]))?;
        let end = fields[4]
            .parse::<i64>()
            .map_err(|_| format!("end is not an integer: {:?}", fields[4]))?;
        let strand = fields[6].parse::<Strand>()?;

        Ok(GenomicFeature {
            chrom: fields[0].to_string(),
            source: fields[1].to_string(),
            feature_type: fields[2].to_string(),
            start,
            end,
            score: fields[5].to_string(),
            strand,
            frame: fields[7].to_string(),
            attributes: fields[8].to_string(),
        })
    }
}

///
/// Read every feature of a GTF or GFF file (optionally gzip'd). Comment lines
/// starting with `#` and blank lines are skipped.
///
/// # Arguments
/// - path: path to the annotation file
///
pub fn read_annotation(path: &Path) -> Result<Vec<GenomicFeature>> {
    let reader = get_dynamic_reader(path)?;
    let display_path = path.display().to_string();

    let mut features = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| HomedepotError::line_read(path, index + 1, e))?;
        if line.starts_with('#') || line.trim().is_empty() {
            continue;
        }

        let feature = GenomicFeature::from_line(&line)
            .map_err(|msg| HomedepotError::input_format(&display_path, index + 1, msg))?;
        features.push(feature);
    }

    Ok(features)
}
