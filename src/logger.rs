use log::LevelFilter;

/// Initialize the logger with the specified default level.
///
/// `RUST_LOG` still takes precedence. Calling this again once a logger is
/// installed does nothing.
pub fn init_logger(level: LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}

#[test]
fn init_twice_is_harmless() {
    init_logger(LevelFilter::Debug);
    init_logger(LevelFilter::Trace);
    log::debug!("logger initialized");
}
