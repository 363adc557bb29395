// error.rs：错误类型模块
// 每个流水线阶段的失败都对应一个独立的变体，由 main 统一打印并退出

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// 目标目录校验失败的原因
///
/// 校验按顺序短路：存在 -> 是目录 -> 属主可读
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("Provided directory does not exist: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Error accessing provided directory {}: {source}", .path.display())]
    Inaccessible {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Provided path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Provided directory is not readable: {}", .0.display())]
    NotReadable(PathBuf),
}

/// 程序运行中可能出现的全部错误
#[derive(Debug, Error)]
pub enum WallpaperError {
    /// 无法确定当前用户的主目录
    #[error("cannot determine the current user's home directory")]
    UserLookup,

    #[error(transparent)]
    Directory(#[from] DirectoryError),

    /// 请求元数据接口时的网络错误（含非 2xx 状态码）
    #[error("request to {url} failed: {source}")]
    MetadataFetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// 元数据 JSON 格式错误
    #[error("malformed metadata response: {0}")]
    MetadataDecode(#[from] serde_json::Error),

    #[error("no images found in the response")]
    EmptyMetadata,

    #[error("invalid wallpaper URL {url}: {source}")]
    UrlParse {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("parameter 'rf' not found in the URL: {0}")]
    MissingParameter(String),

    /// 下载图片时的网络错误（含非 2xx 状态码和中途断流）
    #[error("request to {url} failed: {source}")]
    DownloadTransport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("cannot write {}: {source}", .path.display())]
    FileIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// 错误所属的阶段，决定 main 打印时使用的前缀
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    User,
    Directory,
    Fetch,
    Download,
}

impl WallpaperError {
    pub fn stage(&self) -> Stage {
        match self {
            WallpaperError::UserLookup => Stage::User,
            WallpaperError::Directory(_) => Stage::Directory,
            WallpaperError::MetadataFetch { .. }
            | WallpaperError::MetadataDecode(_)
            | WallpaperError::EmptyMetadata => Stage::Fetch,
            WallpaperError::UrlParse { .. }
            | WallpaperError::MissingParameter(_)
            | WallpaperError::DownloadTransport { .. }
            | WallpaperError::FileIo { .. } => Stage::Download,
        }
    }
}
