use std::fmt::{self, Display};
use std::str::FromStr;

use homedepot_core::Result;
use homedepot_core::models::{ChromSizes, Strand};

use crate::annotation::GenomicFeature;

///
/// Which end of a feature a distance is measured from. `Start` is the 5' end:
/// the genomic start on the forward strand, the genomic end on the reverse strand.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    End,
}

impl FromStr for Anchor {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "start" => Ok(Anchor::Start),
            "end" => Ok(Anchor::End),
            _ => Err(format!("Invalid anchor: {:?}. Expected 'start' or 'end'", s)),
        }
    }
}

impl Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anchor::Start => write!(f, "start"),
            Anchor::End => write!(f, "end"),
        }
    }
}

///
/// How a forward-strand window whose downstream edge is anchored at the feature
/// end with a non-positive distance gets clamped.
///
/// `Normalized` clamps at 0 like every other retracting edge. `Legacy` reproduces
/// the historical `max(chrom_length, anchor + distance)`, which pins the edge at or
/// beyond the chromosome end.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClampPolicy {
    #[default]
    Normalized,
    Legacy,
}

///
/// Placement of the output window relative to each feature. Distances are signed:
/// a positive upstream distance reaches further upstream, a negative one retracts
/// the edge past the anchor.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSpec {
    pub upstream: i64,
    pub upstream_anchor: Anchor,
    pub downstream: i64,
    pub downstream_anchor: Anchor,
    pub clamp: ClampPolicy,
}

impl Default for WindowSpec {
    fn default() -> Self {
        WindowSpec {
            upstream: crate::consts::DEFAULT_UPSTREAM,
            upstream_anchor: Anchor::Start,
            downstream: crate::consts::DEFAULT_DOWNSTREAM,
            downstream_anchor: Anchor::Start,
            clamp: ClampPolicy::Normalized,
        }
    }
}

/// Move an edge toward 0 by `distance`.
fn extend_left(anchor: i64, distance: i64, chrom_length: i64) -> i64 {
    let moved = anchor.saturating_sub(distance);
    if distance > 0 {
        std::cmp::max(0, moved)
    } else {
        std::cmp::min(moved, chrom_length)
    }
}

/// Move an edge toward the chromosome end by `distance`.
fn extend_right(anchor: i64, distance: i64, chrom_length: i64) -> i64 {
    let moved = anchor.saturating_add(distance);
    if distance > 0 {
        std::cmp::min(moved, chrom_length)
    } else {
        std::cmp::max(0, moved)
    }
}

///
/// Compute the `(new_start, new_end)` window for a feature spanning `start..end`.
///
/// Pure and deterministic. The result is not guaranteed to be a valid interval:
/// callers discard windows where `new_start >= new_end`.
///
/// # Arguments
/// - start: feature start
/// - end: feature end
/// - strand: feature strand; `.` is handled like `+`
/// - spec: window placement
/// - chrom_length: length of the feature's chromosome
///
pub fn window_bounds(
    start: i64,
    end: i64,
    strand: Strand,
    spec: &WindowSpec,
    chrom_length: i64,
) -> (i64, i64) {
    if strand.is_reverse() {
        // 5' end is the genomic end, upstream grows toward the chromosome end
        let up_anchor = match spec.upstream_anchor {
            Anchor::Start => end,
            Anchor::End => start,
        };
        let down_anchor = match spec.downstream_anchor {
            Anchor::Start => end,
            Anchor::End => start,
        };

        let new_end = extend_right(up_anchor, spec.upstream, chrom_length);
        let new_start = extend_left(down_anchor, spec.downstream, chrom_length);

        (new_start, new_end)
    } else {
        let up_anchor = match spec.upstream_anchor {
            Anchor::Start => start,
            Anchor::End => end,
        };
        let down_anchor = match spec.downstream_anchor {
            Anchor::Start => start,
            Anchor::End => end,
        };

        let new_start = extend_left(up_anchor, spec.upstream, chrom_length);
        let new_end = match (spec.clamp, spec.downstream_anchor) {
            (ClampPolicy::Legacy, Anchor::End) if spec.downstream <= 0 => {
                std::cmp::max(chrom_length, down_anchor.saturating_add(spec.downstream))
            }
            _ => extend_right(down_anchor, spec.downstream, chrom_length),
        };

        (new_start, new_end)
    }
}

///
/// Compute the window for an annotated feature, looking up its chromosome length.
///
/// Fails with `UnknownChromosome` if the chromosome is missing from `chrom_sizes`;
/// features are expected to be filtered against the table beforehand.
///
pub fn compute_window(
    feature: &GenomicFeature,
    spec: &WindowSpec,
    chrom_sizes: &ChromSizes,
) -> Result<(i64, i64)> {
    let chrom_length = chrom_sizes.length_of(&feature.chrom)?;
    Ok(window_bounds(
        feature.start,
        feature.end,
        feature.strand,
        spec,
        chrom_length,
    ))
}
