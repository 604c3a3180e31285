//! 文本提取服务 - 能力层
//!
//! 只负责“把文档字节变成一整段文本”，不关心版面结构。失败直接向上传播。

use futures::future::BoxFuture;
use std::path::Path;
use tracing::debug;

/// 文本提取错误
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("PDF 文本提取失败: {0}")]
    Pdf(String),
    #[error("文本不是有效的 UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("提取任务异常退出: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// 文本提取能力
pub trait TextExtractor: Send + Sync {
    fn extract<'a>(&'a self, bytes: &'a [u8]) -> BoxFuture<'a, Result<String, ExtractError>>;
}

/// 基于 `pdf-extract` 的 PDF 文本提取
///
/// 解析是 CPU 密集的同步调用，放到 blocking 线程池里执行。
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract<'a>(&'a self, bytes: &'a [u8]) -> BoxFuture<'a, Result<String, ExtractError>> {
        let owned = bytes.to_vec();
        Box::pin(async move {
            let text = tokio::task::spawn_blocking(move || {
                pdf_extract::extract_text_from_mem(&owned).map_err(|e| ExtractError::Pdf(e.to_string()))
            })
            .await??;
            debug!("PDF 提取出 {} 个字符", text.chars().count());
            Ok(text)
        })
    }
}

/// 已经提取好的纯文本（.txt）
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract<'a>(&'a self, bytes: &'a [u8]) -> BoxFuture<'a, Result<String, ExtractError>> {
        Box::pin(async move { Ok(String::from_utf8(bytes.to_vec())?) })
    }
}

/// 按扩展名选择提取器，`.txt` 用纯文本，其余按 PDF 处理
pub fn extractor_for(path: &Path) -> Box<dyn TextExtractor> {
    let is_text = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("txt"))
        .unwrap_or(false);
    if is_text {
        Box::new(PlainTextExtractor)
    } else {
        Box::new(PdfTextExtractor)
    }
}
