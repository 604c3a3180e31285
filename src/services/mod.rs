//! 业务能力层（Services）
//!
//! 每个服务只描述"我能做什么"：提取文本、存取科目、写出试卷、写复核日志。
//! 不关心流程顺序，流程由编排层负责。

pub mod paper_writer;
pub mod review_writer;
pub mod subject_store;
pub mod text_extractor;

pub use paper_writer::{paper_slug, PaperWriter, WrittenPaper};
pub use review_writer::{ReviewEntry, ReviewWriter};
pub use subject_store::{merge_subject, SubjectStore};
pub use text_extractor::{extractor_for, ExtractError, PdfTextExtractor, PlainTextExtractor, TextExtractor};

use crate::error::{AppError, AppResult};
use std::path::Path;

/// 以缩进格式写出 JSON，按需创建父目录，返回写出的文本
pub(crate) async fn write_pretty_json<T: serde::Serialize>(path: &Path, value: &T) -> AppResult<String> {
    let json = serde_json::to_string_pretty(value).map_err(|e| AppError::json(path.display().to_string(), e))?;
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| AppError::create_dir_failed(parent.display().to_string(), e))?;
    }
    tokio::fs::write(path, &json)
        .await
        .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))?;
    Ok(json)
}
