use std::path::Path;

use anyhow::{Context, Result, anyhow};
use clap::ArgMatches;

use homedepot_gtf2bed::{
    Anchor, AnnotationFormat, ClampPolicy, Gtf2BedOptions, WindowSpec, gtf_to_bed,
};

pub fn run_gtf2bed(matches: &ArgMatches) -> Result<()> {
    let input = matches
        .get_one::<String>("input_file")
        .expect("An input GTF/GFF file is required.");

    let output = matches
        .get_one::<String>("output_file")
        .expect("An output file is required.");

    let chrom_sizes = matches
        .get_one::<String>("chrom_size_file")
        .expect("A chrom sizes file is required.");

    let input_format: AnnotationFormat = matches
        .get_one::<String>("input_type")
        .expect("input_type has a default")
        .parse()
        .map_err(|e: String| anyhow!(e))?;

    let upstream_anchor: Anchor = matches
        .get_one::<String>("upstream_anchor")
        .expect("upstream_anchor has a default")
        .parse()
        .map_err(|e: String| anyhow!(e))?;

    let downstream_anchor: Anchor = matches
        .get_one::<String>("downstream_anchor")
        .expect("downstream_anchor has a default")
        .parse()
        .map_err(|e: String| anyhow!(e))?;

    let clamp = match matches.get_flag("legacy-clamp") {
        true => ClampPolicy::Legacy,
        false => ClampPolicy::Normalized,
    };

    let options = Gtf2BedOptions {
        input_format,
        feature_type: matches
            .get_one::<String>("type")
            .expect("type has a default")
            .to_owned(),
        window: WindowSpec {
            upstream: *matches.get_one::<i64>("upstream").expect("upstream has a default"),
            upstream_anchor,
            downstream: *matches
                .get_one::<i64>("downstream")
                .expect("downstream has a default"),
            downstream_anchor,
            clamp,
        },
        attr_id: matches
            .get_one::<String>("attr_id")
            .expect("attr_id has a default")
            .to_owned(),
    };

    gtf_to_bed(
        Path::new(input),
        Path::new(chrom_sizes),
        Path::new(output),
        &options,
    )
    .with_context(|| format!("gtf-to-bed failed for {}", input))?;

    Ok(())
}
