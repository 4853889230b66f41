use log::LevelFilter;

/// Install the global logger at `level`. Module filters in `RUST_LOG` still
/// apply on top.
pub fn init_logger(level: LevelFilter) {
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp_millis()
        .init();
}
