//! 科目存储服务 - 业务能力层
//!
//! 以科目代码为键读写 `subjects_dir/<CODE>.json`。科目记录只合并、从不整体覆盖：
//! 已持久化的非空字段优先于新抽取的值，以保留人工修订。
//!
//! 注意：读-改-写过程没有加锁，同一科目代码的多个批次不能并发运行。

use super::write_pretty_json;
use crate::error::AppResult;
use crate::models::{load_json_record, Subject};
use std::path::PathBuf;
use tracing::{debug, info};

/// 合并新抽取的科目与已持久化的科目
///
/// 标量字段：持久化值非空（非零）时保留，否则取新值。
/// `exam_pattern` 整体合并：持久化的题型结构至少有一组时整体保留，否则整体取新值。
pub fn merge_subject(extracted: Subject, persisted: Option<&Subject>) -> Subject {
    let Some(persisted) = persisted else {
        return extracted;
    };

    Subject {
        code: keep_text(&persisted.code, extracted.code),
        name: keep_text(&persisted.name, extracted.name),
        short_name: keep_text(&persisted.short_name, extracted.short_name),
        regulation: keep_text(&persisted.regulation, extracted.regulation),
        semester: if persisted.semester != 0 {
            persisted.semester
        } else {
            extracted.semester
        },
        department: keep_text(&persisted.department, extracted.department),
        college: keep_text(&persisted.college, extracted.college),
        exam_pattern: if persisted.exam_pattern.groups.is_empty() {
            extracted.exam_pattern
        } else {
            persisted.exam_pattern.clone()
        },
    }
}

fn keep_text(persisted: &str, extracted: String) -> String {
    if persisted.is_empty() {
        extracted
    } else {
        persisted.to_string()
    }
}

/// 科目存储
#[derive(Debug, Clone)]
pub struct SubjectStore {
    subjects_dir: PathBuf,
}

impl SubjectStore {
    pub fn new(subjects_dir: impl Into<PathBuf>) -> Self {
        Self {
            subjects_dir: subjects_dir.into(),
        }
    }

    pub fn path_for(&self, code: &str) -> PathBuf {
        self.subjects_dir.join(format!("{}.json", code))
    }

    /// 读取已持久化的科目，不存在时返回 `None`
    pub async fn load(&self, code: &str) -> AppResult<Option<Subject>> {
        load_json_record(&self.path_for(code)).await
    }

    /// 读取 → 合并 → 写回，返回科目文件路径
    pub async fn merge_and_save(&self, extracted: Subject) -> AppResult<PathBuf> {
        let path = self.path_for(&extracted.code);
        let persisted = self.load(&extracted.code).await?;
        match &persisted {
            Some(_) => debug!("科目 {} 已存在，合并已有字段", extracted.code),
            None => info!("🆕 新科目: {}", extracted),
        }

        let merged = merge_subject(extracted, persisted.as_ref());
        write_pretty_json(&path, &merged).await?;
        Ok(path)
    }
}
