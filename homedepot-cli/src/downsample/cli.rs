use clap::{Arg, Command, value_parser};

pub use homedepot_downsample::consts::*;

pub fn create_downsample_cli() -> Command {
    Command::new(DOWNSAMPLE_CMD)
        .about("Downsample multiple fragment files to the same coverage.")
        .arg(
            Arg::new("input_file")
                .short('i')
                .long("input_file")
                .required(true)
                .help("A tab delimited file with two columns: <input_frag>\\t<output_frag>."),
        )
        .arg(
            Arg::new("threads")
                .short('t')
                .long("threads")
                .value_parser(value_parser!(usize))
                .default_value(DEFAULT_THREADS.to_string())
                .help("Number of threads."),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_parser(value_parser!(u64))
                .help("Random seed, for reproducible output"),
        )
}
