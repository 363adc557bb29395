// source/mod.rs：壁纸源模块入口
// 定义流水线依赖的网络接口，以及从 URL 推导文件名的纯函数
pub mod bing;

use crate::error::WallpaperError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use url::Url;

/// 决定保存文件名的查询参数
pub const FILE_NAME_PARAM: &str = "rf";

/// 流水线所需的两次网络操作
///
/// 生产环境由 `BingClient` 实现；测试中可以替换为不联网的实现，
/// 用来断言调用次数。
#[async_trait]
pub trait WallpaperSource {
    /// 获取今日壁纸的完整 URL
    async fn fetch_wallpaper_url(&self) -> Result<String, WallpaperError>;

    /// 下载壁纸到 `save_dir`，返回保存后的完整路径
    async fn download(&self, wallpaper_url: &str, save_dir: &Path)
    -> Result<PathBuf, WallpaperError>;
}

/// 从壁纸 URL 的 `rf` 参数取出文件名
///
/// 参数值原样使用，不做清洗；出现多次时取第一个。
pub fn extract_file_name(wallpaper_url: &str) -> Result<String, WallpaperError> {
    let parsed = Url::parse(wallpaper_url).map_err(|source| WallpaperError::UrlParse {
        url: wallpaper_url.to_string(),
        source,
    })?;

    // query_pairs() 会做百分号解码，迭代器惰性求值，find 找到第一个即停止
    parsed
        .query_pairs()
        .find(|(key, _)| key == FILE_NAME_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| WallpaperError::MissingParameter(wallpaper_url.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_rf_value_verbatim() {
        let name = extract_file_name("https://www.bing.com/th?id=XYZ&rf=MyPic.jpg").unwrap();
        assert_eq!(name, "MyPic.jpg");
    }

    #[test]
    fn real_bing_url_shape() {
        let url = concat!(
            "https://www.bing.com/th?id=OHR.Test_EN-US1234_1920x1080.jpg",
            "&rf=LaDigue_1920x1080.jpg&pid=hp"
        );
        assert_eq!(extract_file_name(url).unwrap(), "LaDigue_1920x1080.jpg");
    }

    #[test]
    fn first_rf_wins() {
        let url = "https://www.bing.com/th?rf=first.jpg&rf=second.jpg";
        assert_eq!(extract_file_name(url).unwrap(), "first.jpg");
    }

    #[test]
    fn percent_encoded_value_is_decoded() {
        let url = "https://www.bing.com/th?rf=My%20Pic.jpg";
        assert_eq!(extract_file_name(url).unwrap(), "My Pic.jpg");
    }

    #[test]
    fn missing_or_empty_rf_is_missing_parameter() {
        for url in [
            "https://www.bing.com/th?id=XYZ",
            "https://www.bing.com/th?id=XYZ&rf=",
            "https://www.bing.com/th",
        ] {
            assert!(
                matches!(extract_file_name(url), Err(WallpaperError::MissingParameter(_))),
                "{url}"
            );
        }
    }

    #[test]
    fn malformed_url_is_parse_error() {
        for url in ["/th?id=XYZ&rf=MyPic.jpg", "http://[::1", ""] {
            assert!(
                matches!(extract_file_name(url), Err(WallpaperError::UrlParse { .. })),
                "{url}"
            );
        }
    }

    #[test]
    fn extraction_is_deterministic() {
        let url = "https://www.bing.com/th?id=XYZ&rf=MyPic.jpg";
        assert_eq!(extract_file_name(url).unwrap(), extract_file_name(url).unwrap());
    }
}
