// main.rs：程序入口
// 负责初始化运行时和日志、解析参数、执行一次下载并打印结果

mod cli;
mod config;
mod error;
mod logging;
mod pipeline;
mod source;
mod validate;

// 初始化多语言支持，嵌入 locales 目录下的所有翻译
rust_i18n::i18n!("locales");

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use cli::Cli;
use config::AppConfig;
use error::{DirectoryError, Stage, WallpaperError};
use rust_i18n::t;
use source::bing::BingClient;
use std::path::Path;
use std::process::ExitCode;

/// 整个流程是顺序执行的，单线程运行时就够了
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // 自动检测系统语言并设置
    let locale = std::env::var("LANG").unwrap_or_else(|_| "en".to_string());
    if locale.starts_with("zh") {
        rust_i18n::set_locale("zh-CN");
    } else {
        rust_i18n::set_locale("en");
    }

    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    if let Some(shell) = cli.completions {
        generate(shell, &mut Cli::command(), "bing-wallpaper", &mut std::io::stdout());
        return ExitCode::SUCCESS;
    }

    match run(&cli).await {
        Ok(path) => {
            println!("{}", success_message(&path));
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::debug!(error = ?e, "run failed");
            println!("{}", failure_message(&e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<std::path::PathBuf, WallpaperError> {
    let home = dirs::home_dir();
    let config = AppConfig::resolve(cli.output.as_deref(), home.as_deref())?;
    let client = BingClient::new();
    pipeline::run(&client, &config.output_dir).await
}

fn success_message(path: &Path) -> String {
    t!("download_success", path => path.display()).into_owned()
}

/// 按阶段加上前缀；目录错误本身已经说明了问题，不加前缀
fn failure_message(err: &WallpaperError) -> String {
    match err.stage() {
        Stage::User => t!("error_user", reason => err).into_owned(),
        Stage::Directory => match err {
            WallpaperError::Directory(dir_err) => directory_message(dir_err),
            _ => err.to_string(),
        },
        Stage::Fetch => t!("error_fetch_url", reason => err).into_owned(),
        Stage::Download => t!("error_download", reason => err).into_owned(),
    }
}

fn directory_message(err: &DirectoryError) -> String {
    match err {
        DirectoryError::NotFound(path) => t!("dir_not_found", path => path.display()),
        DirectoryError::Inaccessible { path, source } => {
            t!("dir_inaccessible", path => path.display(), reason => source)
        }
        DirectoryError::NotADirectory(path) => t!("dir_not_a_directory", path => path.display()),
        DirectoryError::NotReadable(path) => t!("dir_not_readable", path => path.display()),
    }
    .into_owned()
}
