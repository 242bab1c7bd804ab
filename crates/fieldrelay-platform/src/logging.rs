use log::LevelFilter;

/// Unknown names fall back to `Info`.
pub fn parse_level(level: &str) -> LevelFilter {
    level.trim().parse().unwrap_or(LevelFilter::Info)
}

/// Installs the process logger. Safe to call more than once.
#[cfg(target_os = "android")]
pub fn init(level: &str) {
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(parse_level(level))
            .with_tag("fieldrelay"),
    );
}

/// Installs the process logger. Safe to call more than once; `RUST_LOG`
/// overrides `level`.
#[cfg(not(target_os = "android"))]
pub fn init(level: &str) {
    let _ = env_logger::Builder::new()
        .filter_level(parse_level(level))
        .parse_default_env()
        .try_init();
}
