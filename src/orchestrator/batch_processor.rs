//! 批量文档处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责确定输入、逐个转换文档并汇总结果。
//!
//! ## 核心功能
//!
//! 1. **输入发现**：单个文件，或扫描 `pdfs_dir` 下所有 `.pdf` / `.txt`
//! 2. **顺序处理**：文档一个接一个处理，不并发
//! 3. **失败隔离**：单个文档失败只记入该文档的结果，其余文档照常处理
//! 4. **结果汇报**：逐个打印输出路径与题目数，最后列出所有失败

use crate::config::Config;
use crate::error::AppResult;
use crate::models::collect_input_files;
use crate::orchestrator::paper_processor::{self, ConversionReport};
use crate::services::{extractor_for, ReviewWriter};
use crate::utils::logging::{log_documents_loaded, log_startup, print_final_stats, FinalStats};
use std::path::PathBuf;
use tracing::{error, info};

/// 应用主结构
pub struct App {
    config: Config,
    review: ReviewWriter,
}

/// 单个文档的处理结果
#[derive(Debug)]
pub struct DocumentOutcome {
    pub path: PathBuf,
    pub result: AppResult<ConversionReport>,
}

impl DocumentOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// 整批处理结果
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub outcomes: Vec<DocumentOutcome>,
}

impl BatchSummary {
    pub fn succeeded(&self) -> impl Iterator<Item = &ConversionReport> {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().ok())
    }

    pub fn failed(&self) -> impl Iterator<Item = &DocumentOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    pub fn total_math_flags(&self) -> usize {
        self.succeeded().map(|r| r.math_flags).sum()
    }

    pub fn has_failures(&self) -> bool {
        self.failed().next().is_some()
    }
}

impl App {
    /// 初始化应用（写复核日志头）
    pub async fn initialize(config: Config) -> AppResult<Self> {
        let review = ReviewWriter::with_path(&config.review_log_file);
        review.init().await?;

        log_startup(&config);

        Ok(Self { config, review })
    }

    /// 运行应用主逻辑
    ///
    /// 输入错误（找不到文件）直接返回；文档级错误收集在 [`BatchSummary`] 中。
    pub async fn run(&self, input: Option<PathBuf>) -> AppResult<BatchSummary> {
        info!("\n📁 正在确定待处理的文档...");
        let files = collect_input_files(input.as_deref(), &self.config.pdfs_dir).await?;
        log_documents_loaded(files.len());

        let mut summary = BatchSummary::default();
        for path in files {
            let result = self.process_one(&path).await;
            if let Err(e) = &result {
                error!("❌ {} 处理失败: {}", path.display(), e);
            }
            summary.outcomes.push(DocumentOutcome { path, result });
        }

        report(&summary);
        print_final_stats(&FinalStats {
            succeeded: summary.succeeded().count(),
            failed: summary.failed().count(),
            math_flags: summary.total_math_flags(),
            review_entries: self.review.entries_written(),
            review_log_file: &self.config.review_log_file,
        });

        Ok(summary)
    }

    async fn process_one(&self, path: &std::path::Path) -> AppResult<ConversionReport> {
        let extractor = extractor_for(path);
        paper_processor::convert_document(path, &self.config, &*extractor, &self.review).await
    }
}

/// 控制台报告：成功的文档写 stdout，失败列表写 stderr
fn report(summary: &BatchSummary) {
    for converted in summary.succeeded() {
        println!("Subject: {}", converted.subject_path.display());
        println!(
            "Paper:   {} ({} questions, {} math flags)",
            converted.paper_path.display(),
            converted.question_count,
            converted.math_flags
        );
    }

    let total_flags = summary.total_math_flags();
    if total_flags > 0 {
        println!("Math flags: {}", total_flags);
    }

    if summary.has_failures() {
        eprintln!("Failed documents:");
        for outcome in summary.failed() {
            if let Err(e) = &outcome.result {
                eprintln!("  {}: {}", outcome.path.display(), e);
            }
        }
    }
}
