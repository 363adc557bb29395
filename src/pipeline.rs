// pipeline.rs：一次完整的下载流程
// 校验目录 -> 获取元数据 -> 下载图片，任何一步失败立即返回

use crate::error::WallpaperError;
use crate::source::WallpaperSource;
use crate::validate::validate_target_dir;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 执行一次下载，返回保存后的文件路径
///
/// 目录校验通过之前不会调用 `source` 的任何方法。
pub async fn run<S>(source: &S, target_dir: &Path) -> Result<PathBuf, WallpaperError>
where
    S: WallpaperSource + Sync,
{
    validate_target_dir(target_dir)?;
    debug!(dir = %target_dir.display(), "target directory validated");

    let wallpaper_url = source.fetch_wallpaper_url().await?;
    let saved = source.download(&wallpaper_url, target_dir).await?;

    info!(path = %saved.display(), "wallpaper saved");
    Ok(saved)
}
