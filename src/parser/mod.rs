//! 卷面文本解析层
//!
//! 全部为纯函数：输入规范化后的行序列，输出结构化的科目 / 试卷片段。
//!
//! ```text
//! normalize ──► subject_extractor ──► (services::subject_store 合并)
//!           ├─► paper_meta
//!           └─► segmenter ──► group_a / group_bc ──► math_flag
//! ```

pub mod group_a;
pub mod group_bc;
pub mod lines;
pub mod math_flag;
pub mod normalize;
pub mod numerals;
pub mod paper_meta;
pub mod segmenter;
pub mod subject_extractor;

use crate::models::{Answer, Paper, Question};

pub use group_a::parse_group_a;
pub use group_bc::parse_group_bc;
pub use math_flag::{count_math_flags, flag_math};
pub use normalize::{clean, normalize_lines};
pub use numerals::roman_to_int;
pub use paper_meta::{extract_paper_meta, PaperMeta};
pub use segmenter::{segment, Sections};
pub use subject_extractor::{extract_subject, SubjectExtraction};

/// 一道解析出的题目及其答案
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEntry {
    pub question: Question,
    pub answer: Answer,
}

/// 一个分组按出现顺序解析出的题目
pub type ParsedGroup = Vec<ParsedEntry>;

/// 把解析结果写入试卷，返回因键重复被丢弃的题目键
pub fn populate(paper: &mut Paper, entries: ParsedGroup) -> Vec<String> {
    let mut duplicates = Vec::new();
    for entry in entries {
        let key = entry.question.number.clone();
        if !paper.insert_entry(entry.question, entry.answer) {
            tracing::warn!("题号 {} 重复出现，保留第一次出现的内容", key);
            duplicates.push(key);
        }
    }
    duplicates
}
