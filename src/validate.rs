// validate.rs：目标目录校验模块
// 在发起任何网络请求之前确认保存目录可用

use crate::error::DirectoryError;
use std::fs::{self, Metadata};
use std::io::ErrorKind;
use std::path::Path;

/// 依次检查：路径存在、是目录、属主可读
///
/// 任何一步失败立即返回，不再继续后面的检查。
/// `fs::metadata` 会跟随符号链接，所以指向目录的链接也能通过校验。
pub fn validate_target_dir(dir: &Path) -> Result<(), DirectoryError> {
    let metadata = match fs::metadata(dir) {
        Ok(m) => m,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(DirectoryError::NotFound(dir.to_path_buf()));
        }
        Err(e) => {
            return Err(DirectoryError::Inaccessible {
                path: dir.to_path_buf(),
                source: e,
            });
        }
    };

    if !metadata.is_dir() {
        return Err(DirectoryError::NotADirectory(dir.to_path_buf()));
    }

    if !owner_readable(&metadata) {
        return Err(DirectoryError::NotReadable(dir.to_path_buf()));
    }

    Ok(())
}

/// 只看权限位中的属主读位（S_IRUSR），不考虑当前进程的实际身份
#[cfg(unix)]
fn owner_readable(metadata: &Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & (libc::S_IRUSR as u32) != 0
}

// 非 Unix 平台没有属主权限位，能 stat 到即视为可读
#[cfg(not(unix))]
fn owner_readable(_metadata: &Metadata) -> bool {
    true
}
