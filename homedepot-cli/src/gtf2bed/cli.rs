use clap::{Arg, ArgAction, Command, value_parser};

pub use homedepot_gtf2bed::consts::*;

pub fn create_gtf2bed_cli() -> Command {
    Command::new(GTF2BED_CMD)
        .about("Extract and write sequence information from GTF/GFF to bed format.")
        .arg(
            Arg::new("input_file")
                .short('i')
                .long("input_file")
                .required(true)
                .help("Input GTF/GFF file name (optionally gzip'd)."),
        )
        .arg(
            Arg::new("input_type")
                .long("input_type")
                .value_parser(["GTF", "GFF"])
                .default_value(DEFAULT_INPUT_TYPE)
                .help("Input format"),
        )
        .arg(
            Arg::new("output_file")
                .short('o')
                .long("output_file")
                .required(true)
                .help("Output bed file name. Gzip'd if it ends in .gz."),
        )
        .arg(
            Arg::new("type")
                .short('t')
                .long("type")
                .default_value(DEFAULT_FEATURE_TYPE)
                .help("What feature to extract"),
        )
        .arg(
            Arg::new("upstream")
                .short('u')
                .long("upstream")
                .value_parser(value_parser!(i64))
                .allow_negative_numbers(true)
                .default_value(DEFAULT_UPSTREAM.to_string())
                .help("Distance to extract upstream of the anchor, can be negative"),
        )
        .arg(
            Arg::new("upstream_anchor")
                .long("upstream_anchor")
                .value_parser(["start", "end"])
                .default_value(DEFAULT_ANCHOR)
                .help("Which end to apply the upstream distance to (start means 5' end)"),
        )
        .arg(
            Arg::new("downstream")
                .short('d')
                .long("downstream")
                .value_parser(value_parser!(i64))
                .allow_negative_numbers(true)
                .default_value(DEFAULT_DOWNSTREAM.to_string())
                .help("Distance to extract downstream of the anchor, can be negative"),
        )
        .arg(
            Arg::new("downstream_anchor")
                .long("downstream_anchor")
                .value_parser(["start", "end"])
                .default_value(DEFAULT_ANCHOR)
                .help("Which end to apply the downstream distance to (start means 5' end)"),
        )
        .arg(
            Arg::new("chrom_size_file")
                .short('c')
                .long("chrom_size_file")
                .required(true)
                .help("The size of each chromosome."),
        )
        .arg(
            Arg::new("attr_id")
                .short('r')
                .long("attr_id")
                .default_value(DEFAULT_ATTR_ID)
                .help("The attribute tag to take the record name from"),
        )
        .arg(
            Arg::new("legacy-clamp")
                .long("legacy-clamp")
                .action(ArgAction::SetTrue)
                .help("Clamp forward-strand windows with a non-positive downstream distance anchored at the end to the chromosome end, as older releases did"),
        )
}
