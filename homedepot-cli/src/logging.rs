use log::LevelFilter;

pub const LOG_LEVELS: [&str; 6] = ["critical", "error", "warning", "info", "debug", "notset"];

pub fn level_filter(level: &str) -> LevelFilter {
    match level {
        "critical" | "error" => LevelFilter::Error,
        "warning" => LevelFilter::Warn,
        "debug" => LevelFilter::Debug,
        "notset" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

///
/// Install the process-wide logger. Only the binary does this; library crates
/// just emit through the `log` facade.
///
pub fn init_logger(level: &str) {
    env_logger::Builder::new()
        .filter_level(level_filter(level))
        .format_timestamp_secs()
        .init();
}
