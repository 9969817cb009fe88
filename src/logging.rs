//! ログ初期化

use tracing_subscriber::EnvFilter;

/// tracingのサブスクライバを設定する
///
/// `RUST_LOG` があればそれを優先し、無ければ `--verbose` 時は debug、それ以外は設定値を使う。
pub fn init_logging(level: &str, verbose: bool) {
    let default_level = if verbose { "debug" } else { level };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
