// logging.rs：日志初始化
// 日志写到标准错误，标准输出只留给面向用户的提示信息

use tracing_subscriber::EnvFilter;

/// 未设置 RUST_LOG 时使用的过滤规则
fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "warn,bing_wallpaper=debug"
    } else {
        "warn"
    }
}

/// 初始化 tracing 订阅者，RUST_LOG 优先于 `--verbose`
pub fn init_logging(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_enables_crate_debug() {
        assert_eq!(default_filter(false), "warn");
        assert!(default_filter(true).contains("bing_wallpaper=debug"));
    }
}
