use tracing_subscriber::EnvFilter;

/// Installs the stderr log subscriber.
///
/// `RUST_LOG` wins when set. Otherwise `-v` enables debug and `-vv` trace for
/// this tool's own targets; with neither, no subscriber is installed.
pub fn init(verbose: u8) {
    let level = match verbose {
        0 => None,
        1 => Some("debug"),
        _ => Some("trace"),
    };

    let filter = match (EnvFilter::try_from_default_env(), level) {
        (Ok(filter), _) => filter,
        (Err(_), Some(level)) => EnvFilter::new(format!("readable={level}")),
        (Err(_), None) => return,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
