//! 单个文档处理器 - 编排层
//!
//! ## 职责
//!
//! 把一份文档从字节转换为科目 JSON 与试卷 JSON，是文档级别的编排器。
//!
//! ## 核心流程
//!
//! 1. **读取与提取**：读文件字节，交给 `TextExtractor` 得到整段文本
//! 2. **规范化**：拆成干净的行序列
//! 3. **科目**：抽取科目信息，与已存科目合并后写回
//! 4. **试卷**：抽取封面元数据，按分组切段，逐组解析题目与答案
//! 5. **写出**：写试卷 JSON，把默认值字段和校验问题写入复核日志

use crate::config::Config;
use crate::error::{AppError, AppResult, PaperError};
use crate::models::{GroupName, Paper, PaperIssue, ProvenanceReport};
use crate::parser::{
    extract_paper_meta, extract_subject, normalize_lines, parse_group_a, parse_group_bc, populate,
    segment, PaperMeta, SubjectExtraction,
};
use crate::services::{PaperWriter, ReviewEntry, ReviewWriter, SubjectStore, TextExtractor};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// 纯文本层面的转换结果（尚未写盘）
#[derive(Debug, Clone)]
pub struct Conversion {
    pub subject: SubjectExtraction,
    pub meta: PaperMeta,
    pub paper: Paper,
    /// 因键重复被丢弃的题目
    pub duplicates: Vec<String>,
}

impl Conversion {
    /// 科目与试卷字段的来源汇总，键带 `subject.` / `paper.` 前缀
    pub fn provenance(&self) -> ProvenanceReport {
        let mut report = ProvenanceReport::default();
        report.extend_prefixed("subject", &self.subject.provenance);
        report.extend_prefixed("paper", &self.meta.provenance());
        report
    }

    pub fn issues(&self) -> Vec<PaperIssue> {
        self.paper.validate()
    }
}

/// 单个文档的处理报告
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    pub source: PathBuf,
    pub subject_path: PathBuf,
    pub paper_path: PathBuf,
    pub question_count: usize,
    pub math_flags: usize,
}

/// 把规范化后的行序列转换为科目与试卷
///
/// 科目代码优先取封面标题行，其次取科目信息中的代码；两者都没有时报错。
pub fn convert_lines(lines: &[String], config: &Config, source_name: &str) -> AppResult<Conversion> {
    let mut subject = extract_subject(lines);
    let meta = extract_paper_meta(lines);

    let code = [&meta.subject_code.value, &subject.subject.code]
        .into_iter()
        .find(|c| !c.is_empty())
        .cloned()
        .ok_or_else(|| PaperError::MissingSubjectCode {
            source_name: source_name.to_string(),
        })?;
    if !subject.subject.code.is_empty() && subject.subject.code != code {
        warn!(
            "封面科目代码 {} 与科目信息中的 {} 不一致，以封面为准",
            code, subject.subject.code
        );
    }
    subject.subject.code = code.clone();

    let mut paper = Paper::new(code, meta.title.value.clone());
    paper.paper_type = meta.paper_type.value;
    paper.year = meta.year.value.clone();
    paper.is_free = config.is_free;
    paper.price = config.default_price;

    let sections = segment(lines);
    let mut entries = parse_group_a(sections.a);
    for group in [GroupName::B, GroupName::C] {
        entries.extend(parse_group_bc(sections.get(group), group));
    }
    let duplicates = populate(&mut paper, entries);

    Ok(Conversion {
        subject,
        meta,
        paper,
        duplicates,
    })
}

/// 转换单个文档并写出所有结果
pub async fn convert_document(
    path: &Path,
    config: &Config,
    extractor: &dyn TextExtractor,
    review: &ReviewWriter,
) -> AppResult<ConversionReport> {
    let source_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    log_document_start(&source_name);

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;
    let text = extractor
        .extract(&bytes)
        .await
        .map_err(|e| AppError::extraction_failed(path.display().to_string(), e))?;

    let lines = normalize_lines(&text);
    debug!("[{}] 规范化后共 {} 行", source_name, lines.len());

    let conversion = convert_lines(&lines, config, &source_name)?;

    let provenance = conversion.provenance();
    let defaulted = provenance.defaulted();
    if !defaulted.is_empty() {
        warn!("[{}] 以下字段使用了默认值: {}", source_name, defaulted.join(", "));
    }
    let issues = conversion.issues();
    for issue in &issues {
        warn!("[{}] {}", source_name, issue);
    }

    let store = SubjectStore::new(&config.subjects_dir);
    let subject_path = store.merge_and_save(conversion.subject.subject.clone()).await?;

    let writer = PaperWriter::new(&config.papers_dir);
    let written = writer.write(&conversion.paper, &stem).await?;

    review
        .write(&ReviewEntry {
            source: &source_name,
            defaulted,
            issues: &issues,
            duplicates: &conversion.duplicates,
            math_flags: written.math_flags,
        })
        .await?;

    log_document_complete(&source_name, written.question_count, written.math_flags);

    Ok(ConversionReport {
        source: path.to_path_buf(),
        subject_path,
        paper_path: written.path,
        question_count: written.question_count,
        math_flags: written.math_flags,
    })
}

// ========== 日志辅助函数 ==========

fn log_document_start(source_name: &str) {
    info!("\n{}", "─".repeat(60));
    info!("📄 开始转换: {}", source_name);
}

fn log_document_complete(source_name: &str, question_count: usize, math_flags: usize) {
    info!(
        "✓ {} 转换完成: {} 道题, {} 个数学标记",
        source_name, question_count, math_flags
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PaperType, Provenance};
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = "\
IT301 — Mid Sem 1 Question Paper with Solutions
JISCE / UG / IT / R23 / SEM-3 / 2025-26
COMPUTER ORGANIZATION
Full Marks: 25 Time Allotted: 1.5 Hours
Group A: 5 × 1 = 5 marks
Group B: 4 × 5 = 20 marks
Group A — Multiple Choice Questions
Answer any five from the following
Q1.i: Byte (1) CO1 BL1
(a) 4 bits (b) 8 bits
Answer: (b)
Eight bits.
Group B — Short Answer Questions
Answer any three from the following
Q2: Pipelining (5) CO2 BL2
Solution
Overlap x_1 and x_2.
";

    #[test]
    fn converts_sample_lines() {
        let lines = normalize_lines(SAMPLE);
        let conversion = convert_lines(&lines, &Config::default(), "sample.txt").unwrap();

        let paper = &conversion.paper;
        assert_eq!(paper.subject_code, "IT301");
        assert_eq!(paper.title, "Mid Sem 1 Question Paper");
        assert_eq!(paper.paper_type, PaperType::MidSem1);
        assert_eq!(paper.year, "2025-26");
        assert_eq!(paper.price, 4900);
        assert!(!paper.is_free);

        let keys: Vec<_> = paper.questions().keys().cloned().collect();
        assert_eq!(keys, vec!["A1", "B1"]);
        let answer_keys: Vec<_> = paper.answers().keys().cloned().collect();
        assert_eq!(answer_keys, keys);
        assert_eq!(paper.answers()["B1"].solution, "Overlap [x_1] and [x_2].");

        assert_eq!(conversion.subject.subject.code, "IT301");
        assert_eq!(conversion.subject.subject.exam_pattern.duration_minutes, 90);
        assert_eq!(
            conversion.provenance().get("paper.title"),
            Some(Provenance::Matched)
        );
        assert!(conversion.duplicates.is_empty());
    }

    #[test]
    fn missing_code_is_an_error() {
        let lines = normalize_lines("just some text\nwithout any code");
        let err = convert_lines(&lines, &Config::default(), "blank.txt").unwrap_err();
        assert!(matches!(
            err,
            AppError::Paper(PaperError::MissingSubjectCode { .. })
        ));
    }
}
