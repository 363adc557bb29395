// bing.rs：Bing 每日一图客户端模块
// 负责两次网络请求：获取图片元数据、下载图片本体

use super::{WallpaperSource, extract_file_name};
use crate::error::WallpaperError;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File};
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, warn};

/// Bing 站点根地址，元数据中的图片路径是相对于它的
pub const BING_BASE_URL: &str = "https://www.bing.com";

/// 元数据接口路径
const ARCHIVE_PATH: &str = "/HPImageArchive.aspx";

/// 固定查询参数：JSON 格式、今天（idx=0）、一张（n=1）、美国英语市场
const ARCHIVE_QUERY: [(&str, &str); 4] = [
    ("format", "js"),
    ("idx", "0"),
    ("n", "1"),
    ("mkt", "en-US"),
];

/// HPImageArchive 接口返回的顶层结构
///
/// 只声明用到的字段，其余字段 serde 会自动忽略
#[derive(Deserialize, Debug)]
pub struct ArchiveResponse {
    /// 缺少 images 字段时按空列表处理，统一走 EmptyMetadata 错误
    #[serde(default)]
    pub images: Vec<ImageDescriptor>,
}

/// 单张图片的描述
#[derive(Deserialize, Debug)]
pub struct ImageDescriptor {
    /// 相对路径，如 `/th?id=OHR.xxx_EN-US123_1920x1080.jpg&rf=xxx_1920x1080.jpg`
    pub url: String,
}

impl ArchiveResponse {
    /// 取第一张图片，拼上站点根地址
    pub fn first_wallpaper_url(&self, base_url: &str) -> Result<String, WallpaperError> {
        let first = self.images.first().ok_or(WallpaperError::EmptyMetadata)?;
        Ok(format!("{}{}", base_url, first.url))
    }
}

/// Bing 异步客户端
pub struct BingClient {
    /// HTTP 客户端（内部有连接池，两次请求复用同一个）
    client: reqwest::Client,

    /// 站点根地址，生产环境固定为 `BING_BASE_URL`
    base_url: String,
}

impl BingClient {
    pub fn new() -> Self {
        Self::with_base_url(BING_BASE_URL)
    }

    /// 指定站点根地址，测试时指向本地 mock 服务器
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl WallpaperSource for BingClient {
    async fn fetch_wallpaper_url(&self) -> Result<String, WallpaperError> {
        let url = format!("{}{}", self.base_url, ARCHIVE_PATH);
        debug!(%url, "fetching image metadata");

        let fetch_err = |source: reqwest::Error| WallpaperError::MetadataFetch {
            url: url.clone(),
            source,
        };

        // response 离开作用域时连接被释放，包括提前返回的路径
        let response = self
            .client
            .get(&url)
            .query(&ARCHIVE_QUERY[..])
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(fetch_err)?;
        let body = response.bytes().await.map_err(fetch_err)?;

        let archive: ArchiveResponse = serde_json::from_slice(&body)?;
        let wallpaper_url = archive.first_wallpaper_url(&self.base_url)?;
        debug!(%wallpaper_url, "resolved wallpaper url");
        Ok(wallpaper_url)
    }

    async fn download(
        &self,
        wallpaper_url: &str,
        save_dir: &Path,
    ) -> Result<PathBuf, WallpaperError> {
        // 先推导文件名，缺少 rf 参数时不必发第二次请求
        let file_name = extract_file_name(wallpaper_url)?;
        let (save_path, part_path) = output_paths(save_dir, &file_name);

        let transport_err = |source: reqwest::Error| WallpaperError::DownloadTransport {
            url: wallpaper_url.to_string(),
            source,
        };

        debug!(url = %wallpaper_url, "downloading wallpaper");
        let mut response = self
            .client
            .get(wallpaper_url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(transport_err)?;

        let file = File::create(&part_path)
            .await
            .map_err(|source| WallpaperError::FileIo {
                path: part_path.clone(),
                source,
            })?;
        let mut writer = BufWriter::new(file);

        // 逐块写入，不把整张图读进内存
        let copied: Result<(), WallpaperError> = async {
            while let Some(chunk) = response.chunk().await.map_err(transport_err)? {
                writer
                    .write_all(&chunk)
                    .await
                    .map_err(|source| WallpaperError::FileIo {
                        path: part_path.clone(),
                        source,
                    })?;
            }
            writer.flush().await.map_err(|source| WallpaperError::FileIo {
                path: part_path.clone(),
                source,
            })
        }
        .await;

        if let Err(e) = copied {
            drop(writer);
            discard_partial(&part_path).await;
            return Err(e);
        }
        drop(writer);

        if let Err(source) = fs::rename(&part_path, &save_path).await {
            discard_partial(&part_path).await;
            return Err(WallpaperError::FileIo {
                path: save_path,
                source,
            });
        }

        Ok(save_path)
    }
}

/// 计算最终文件路径和同目录下的临时文件路径
///
/// 文件名直接拼在目录后面：开头的 `/` 被去掉，绝对路径不会替换掉 `save_dir`；
/// 带子目录的文件名（如 `sub/pic.jpg`）保留层级，临时文件与最终文件放在同一目录。
fn output_paths(save_dir: &Path, file_name: &str) -> (PathBuf, PathBuf) {
    let save_path = save_dir.join(file_name.trim_start_matches('/'));
    let part_path = match save_path.file_name() {
        Some(name) => {
            let part_name = format!(".{}.part", name.to_string_lossy());
            save_path.with_file_name(part_name)
        }
        None => save_dir.join(".download.part"),
    };
    (save_path, part_path)
}

/// 删除写了一半的临时文件，失败只记录日志
async fn discard_partial(part_path: &Path) {
    if let Err(e) = fs::remove_file(part_path).await {
        warn!(
            path = %part_path.display(),
            error = %e,
            "failed to remove partial download"
        );
    }
}
