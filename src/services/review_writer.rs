//! 复核日志写入服务 - 业务能力层
//!
//! 只负责"写 review.txt"能力：记录每份文档中使用了默认值的字段、
//! 校验问题和数学标记数量，供人工复核。不关心流程。

use crate::error::{AppError, AppResult};
use crate::models::PaperIssue;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// 一份文档的复核条目
#[derive(Debug, Clone, Default)]
pub struct ReviewEntry<'a> {
    pub source: &'a str,
    pub defaulted: Vec<&'a str>,
    pub issues: &'a [PaperIssue],
    pub duplicates: &'a [String],
    pub math_flags: usize,
}

impl ReviewEntry<'_> {
    pub fn is_clean(&self) -> bool {
        self.defaulted.is_empty() && self.issues.is_empty() && self.duplicates.is_empty()
    }

    fn render(&self) -> String {
        let mut out = format!("[{}]\n", self.source);
        if !self.defaulted.is_empty() {
            out.push_str(&format!("  默认值字段: {}\n", self.defaulted.join(", ")));
        }
        if !self.duplicates.is_empty() {
            out.push_str(&format!("  重复题号: {}\n", self.duplicates.join(", ")));
        }
        for issue in self.issues {
            out.push_str(&format!("  {}\n", issue));
        }
        if self.math_flags > 0 {
            out.push_str(&format!("  数学标记: {}\n", self.math_flags));
        }
        out
    }
}

pub struct ReviewWriter {
    review_file_path: PathBuf,
    entries_written: AtomicUsize,
}

impl ReviewWriter {
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            review_file_path: path.into(),
            entries_written: AtomicUsize::new(0),
        }
    }

    pub fn path(&self) -> &Path {
        &self.review_file_path
    }

    /// 本次运行写入的复核记录条数
    pub fn entries_written(&self) -> usize {
        self.entries_written.load(Ordering::Relaxed)
    }

    /// 覆盖写入带时间戳的日志头
    pub async fn init(&self) -> AppResult<()> {
        let header = format!(
            "{}\n试卷转换复核日志 - {}\n{}\n\n",
            "=".repeat(60),
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            "=".repeat(60)
        );
        if let Some(parent) = self.review_file_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::create_dir_failed(parent.display().to_string(), e))?;
        }
        tokio::fs::write(&self.review_file_path, header)
            .await
            .map_err(|e| AppError::file_write_failed(self.path_string(), e))
    }

    /// 追加一条复核记录，没有需要复核的内容时什么也不写
    pub async fn write(&self, entry: &ReviewEntry<'_>) -> AppResult<()> {
        if entry.is_clean() && entry.math_flags == 0 {
            return Ok(());
        }
        debug!(
            "写入复核记录: {} | 默认字段 {} | 问题 {}",
            entry.source,
            entry.defaulted.len(),
            entry.issues.len()
        );

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.review_file_path)
            .await
            .map_err(|e| AppError::file_write_failed(self.path_string(), e))?;
        file.write_all(entry.render().as_bytes())
            .await
            .map_err(|e| AppError::file_write_failed(self.path_string(), e))?;
        file.flush()
            .await
            .map_err(|e| AppError::file_write_failed(self.path_string(), e))?;
        self.entries_written.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn path_string(&self) -> String {
        self.review_file_path.display().to_string()
    }
}
