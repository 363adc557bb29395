// config.rs：配置解析模块
// 启动时一次性确定保存目录，之后以普通 PathBuf 的形式向下传递
//
// 优先级：命令行 -o > ~/.config/bing-wallpaper/config.toml > ~/Pictures

use crate::error::WallpaperError;
use serde::Deserialize;
use shellexpand::tilde;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 展开路径中的 ~ 和 $HOME
fn expand_path(path_str: &str) -> PathBuf {
    PathBuf::from(tilde(path_str).into_owned())
}

/// 映射 config.toml 的结构，只读，不会写回
#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    common: CommonConfig,
}

#[derive(Debug, Deserialize, Default)]
struct CommonConfig {
    /// 壁纸保存目录（支持 ~，相对路径则相对于 $HOME）
    output_dir: Option<String>,
}

/// 解析后的运行配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// 壁纸保存目录
    pub output_dir: PathBuf,
}

impl AppConfig {
    /// 根据命令行参数和当前用户主目录确定配置
    ///
    /// `home` 由调用方传入，测试时可以换成临时目录。
    /// 给了 `-o` 时不需要主目录，也不读取配置文件。
    pub fn resolve(cli_output: Option<&str>, home: Option<&Path>) -> Result<Self, WallpaperError> {
        if let Some(dir) = cli_output {
            return Ok(Self {
                output_dir: expand_path(dir),
            });
        }

        let home = home.ok_or(WallpaperError::UserLookup)?;
        let config_path = Self::config_path(home);

        let output_dir = match Self::load_config_from_file(&config_path)
            .and_then(|file| file.common.output_dir)
        {
            Some(dir_str) => {
                let p = expand_path(&dir_str);
                if p.is_absolute() { p } else { home.join(p) }
            }
            None => Self::default_output_dir(home),
        };

        debug!(
            dir = %output_dir.display(),
            config = %config_path.display(),
            "resolved output directory"
        );
        Ok(Self { output_dir })
    }

    /// 默认保存目录：$HOME/Pictures
    pub fn default_output_dir(home: &Path) -> PathBuf {
        home.join("Pictures")
    }

    pub fn config_path(home: &Path) -> PathBuf {
        home.join(".config").join("bing-wallpaper").join("config.toml")
    }

    /// 文件不存在或格式错误都当作没有配置
    fn load_config_from_file(path: &Path) -> Option<ConfigFile> {
        fs::read_to_string(path)
            .ok()
            .and_then(|content| toml::from_str(&content).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_config(home: &Path, content: &str) {
        let path = AppConfig::config_path(home);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn defaults_to_pictures_under_home() {
        let home = tempdir().unwrap();
        let config = AppConfig::resolve(None, Some(home.path())).unwrap();
        assert_eq!(config.output_dir, home.path().join("Pictures"));
    }

    #[test]
    fn explicit_flag_wins_without_home() {
        let config = AppConfig::resolve(Some("/srv/wallpapers"), None).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("/srv/wallpapers"));
    }

    #[test]
    fn relative_flag_is_kept_as_given() {
        let home = tempdir().unwrap();
        let config = AppConfig::resolve(Some("pics"), Some(home.path())).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("pics"));
    }

    #[test]
    fn missing_home_without_flag_is_user_lookup_error() {
        assert!(matches!(
            AppConfig::resolve(None, None),
            Err(WallpaperError::UserLookup)
        ));
    }

    #[test]
    fn config_file_overrides_default() {
        let home = tempdir().unwrap();
        write_config(home.path(), "[common]\noutput_dir = \"Wallpapers/bing\"\n");

        let config = AppConfig::resolve(None, Some(home.path())).unwrap();
        assert_eq!(config.output_dir, home.path().join("Wallpapers/bing"));
    }

    #[test]
    fn flag_overrides_config_file() {
        let home = tempdir().unwrap();
        write_config(home.path(), "[common]\noutput_dir = \"/from/config\"\n");

        let config = AppConfig::resolve(Some("/from/flag"), Some(home.path())).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("/from/flag"));
    }

    #[test]
    fn malformed_config_falls_back_to_default() {
        let home = tempdir().unwrap();
        write_config(home.path(), "this is = = not toml");

        let config = AppConfig::resolve(None, Some(home.path())).unwrap();
        assert_eq!(config.output_dir, home.path().join("Pictures"));
    }
}
