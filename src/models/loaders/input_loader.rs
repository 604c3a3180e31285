use crate::error::{AppError, AppResult, InputError};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tokio::fs;

/// 支持的输入扩展名：PDF 原卷，或已提取好的纯文本
const SUPPORTED_EXTENSIONS: [&str; 2] = ["pdf", "txt"];

pub fn is_supported_input(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
        .unwrap_or(false)
}

/// 确定本次要处理的文件列表
///
/// - `input` 为 `Some`：只处理该文件，文件不存在时报错
/// - `input` 为 `None`：扫描 `folder_path` 下所有支持的文件（按文件名排序），一个都没有时报错
pub async fn collect_input_files(input: Option<&Path>, folder_path: &str) -> AppResult<Vec<PathBuf>> {
    if let Some(path) = input {
        if !fs::try_exists(path).await.unwrap_or(false) {
            return Err(InputError::NotFound {
                path: path.to_path_buf(),
            }
            .into());
        }
        return Ok(vec![path.to_path_buf()]);
    }

    let folder = PathBuf::from(folder_path);
    let no_files = || -> AppError {
        InputError::NoInputFiles {
            dir: folder.clone(),
        }
        .into()
    };

    if !fs::try_exists(&folder).await.unwrap_or(false) {
        tracing::warn!("文件夹不存在: {}", folder_path);
        return Err(no_files());
    }

    let mut files = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .map_err(|e| AppError::file_read_failed(folder_path, e))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| AppError::file_read_failed(folder_path, e))?
    {
        let path = entry.path();
        if path.is_file() && is_supported_input(&path) {
            tracing::debug!(
                "发现待处理文件: {}",
                path.file_name().unwrap_or_default().to_string_lossy()
            );
            files.push(path);
        }
    }

    if files.is_empty() {
        return Err(no_files());
    }

    files.sort();
    Ok(files)
}

/// 读取一个 JSON 记录，文件不存在时返回 `None`
pub async fn load_json_record<T: DeserializeOwned>(path: &Path) -> AppResult<Option<T>> {
    if !fs::try_exists(path).await.unwrap_or(false) {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .await
        .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;

    let record = serde_json::from_str(&content)
        .map_err(|e| AppError::json(path.display().to_string(), e))?;

    Ok(Some(record))
}
