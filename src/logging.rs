use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` wins when set. Otherwise `level` applies to this library and to
/// each of `targets` (typically the calling binary's crate name). Logs go to
/// stderr so stdout stays free for the conversion summary.
pub fn init_logger(level: LevelFilter, targets: &[&str]) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => EnvFilter::from_default_env(),
        None => EnvFilter::new(directives(level, targets)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn directives(level: LevelFilter, targets: &[&str]) -> String {
    std::iter::once(env!("CARGO_CRATE_NAME"))
        .chain(targets.iter().copied())
        .map(|target| format!("{}={}", target, level))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directives() {
        let directives = directives(LevelFilter::DEBUG, &["santander_ynab_web", "tower_http"]);
        assert_eq!(
            directives,
            "santander_ynab=debug,santander_ynab_web=debug,tower_http=debug"
        );
    }

    #[test]
    fn test_directives_without_targets() {
        assert_eq!(directives(LevelFilter::INFO, &[]), "santander_ynab=info");
    }
}
