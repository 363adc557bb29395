// cli.rs：命令行接口定义模块
// 使用 clap 的 derive 模式，只有一个可选的输出目录参数

use clap::Parser; // Parser: 解析命令行参数的 trait
use clap_complete::Shell; // Shell 枚举：Bash, Zsh, Fish, Elvish, PowerShell

/// 下载今天的必应每日壁纸
///
/// 用法示例:
///   bing-wallpaper
///   bing-wallpaper -o ~/Pictures/bing
#[derive(Parser, Debug)]
#[command(name = "bing-wallpaper")]
#[command(version)] // 自动从 Cargo.toml 读取 version 字段
#[command(about = "Download today's Bing wallpaper into a local directory")]
pub struct Cli {
    /// Directory to save the wallpaper (default: ~/Pictures)
    #[arg(short = 'o', long = "output", value_name = "DIR")]
    pub output: Option<String>,

    /// Print debug logs to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Print a shell completion script and exit
    #[arg(long, value_name = "SHELL")]
    pub completions: Option<Shell>,
}
