#[cfg(feature = "downsample")]
mod downsample;
#[cfg(feature = "gtf2bed")]
mod gtf2bed;
mod logging;

use anyhow::Result;
use clap::{Arg, ArgMatches, Command};
use log::error;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "homedepot";
    pub const LOG_LEVEL_ARG: &str = "log-level";
}

fn build_parser() -> Command {
    let app = Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Tools for preparing genomic annotation and fragment files for sequencing pipelines.")
        .subcommand_required(true)
        .arg(
            Arg::new(consts::LOG_LEVEL_ARG)
                .long(consts::LOG_LEVEL_ARG)
                .global(true)
                .value_parser(logging::LOG_LEVELS)
                .default_value("info")
                .help("Set logging level"),
        );

    #[cfg(feature = "gtf2bed")]
    let app = app.subcommand(gtf2bed::cli::create_gtf2bed_cli());

    #[cfg(feature = "downsample")]
    let app = app.subcommand(downsample::cli::create_downsample_cli());

    app
}

fn run(matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        //
        // GTF/GFF TO BED
        //
        #[cfg(feature = "gtf2bed")]
        Some((gtf2bed::cli::GTF2BED_CMD, matches)) => {
            gtf2bed::handlers::run_gtf2bed(matches)?;
        }

        //
        // FRAGMENT DOWNSAMPLING
        //
        #[cfg(feature = "downsample")]
        Some((downsample::cli::DOWNSAMPLE_CMD, matches)) => {
            downsample::handlers::run_downsample(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}

fn main() {
    let app = build_parser();
    let matches = app.get_matches();

    let level = matches
        .get_one::<String>(consts::LOG_LEVEL_ARG)
        .map(String::as_str)
        .unwrap_or("info");
    logging::init_logger(level);

    if let Err(err) = run(&matches) {
        error!("{:#}", err);
        std::process::exit(1);
    }
}
