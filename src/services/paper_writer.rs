//! 试卷写出服务 - 业务能力层
//!
//! 试卷每次运行都整体重建并无条件覆盖，路径为 `papers_dir/<CODE>/<slug>.json`。

use super::write_pretty_json;
use crate::error::AppResult;
use crate::models::Paper;
use crate::parser::count_math_flags;
use std::path::PathBuf;
use tracing::debug;

/// 一次写出的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenPaper {
    pub path: PathBuf,
    pub math_flags: usize,
    pub question_count: usize,
}

/// 标题转文件名：小写，空白变 `_`，去掉其他非 `[a-z0-9_]` 字符
pub fn paper_slug(title: &str) -> String {
    title
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_')
        .collect()
}

#[derive(Debug, Clone)]
pub struct PaperWriter {
    papers_dir: PathBuf,
}

impl PaperWriter {
    pub fn new(papers_dir: impl Into<PathBuf>) -> Self {
        Self {
            papers_dir: papers_dir.into(),
        }
    }

    /// 计算试卷路径，标题为空（或清洗后为空）时使用 `fallback_stem`
    pub fn path_for(&self, paper: &Paper, fallback_stem: &str) -> PathBuf {
        let slug = match paper_slug(&paper.title) {
            s if s.is_empty() => paper_slug(fallback_stem),
            s => s,
        };
        self.papers_dir
            .join(&paper.subject_code)
            .join(format!("{}.json", slug))
    }

    pub async fn write(&self, paper: &Paper, fallback_stem: &str) -> AppResult<WrittenPaper> {
        let path = self.path_for(paper, fallback_stem);
        let json = write_pretty_json(&path, paper).await?;
        let math_flags = count_math_flags(&json);
        debug!("试卷已写出: {} ({} 个数学标记)", path.display(), math_flags);

        Ok(WrittenPaper {
            path,
            math_flags,
            question_count: paper.question_count(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Answer, GroupName, Question};

    #[test]
    fn slug_from_title() {
        assert_eq!(paper_slug("Mid Sem 2 Question Paper"), "mid_sem_2_question_paper");
        assert_eq!(paper_slug("End-Sem (2024)  Paper"), "endsem_2024_paper");
        assert_eq!(paper_slug("  "), "");
    }

    #[test]
    fn empty_title_falls_back_to_stem() {
        let writer = PaperWriter::new("/tmp/papers");
        let paper = Paper::new("IT301", "");
        assert_eq!(
            writer.path_for(&paper, "IT301 End Sem"),
            PathBuf::from("/tmp/papers/IT301/it301_end_sem.json")
        );
    }

    #[tokio::test]
    async fn write_overwrites_and_counts_flags() {
        let dir = std::env::temp_dir().join(format!("paper_seed_writer_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        let writer = PaperWriter::new(&dir);

        let mut paper = Paper::new("IT301", "Practice Set");
        paper.insert_entry(
            Question {
                group: GroupName::B,
                number: "B1".to_string(),
                text: "Evaluate [x^2] and [a_1]".to_string(),
                marks: 5,
                co: "CO1".to_string(),
                bl: "L2".to_string(),
                options: None,
            },
            Answer {
                question_number: String::new(),
                correct_option: None,
                solution: "[x^2] grows".to_string(),
                key_points: None,
            },
        );

        std::fs::create_dir_all(dir.join("IT301")).unwrap();
        std::fs::write(dir.join("IT301/practice_set.json"), "stale").unwrap();

        let written = writer.write(&paper, "unused").await.unwrap();
        assert_eq!(written.path, dir.join("IT301/practice_set.json"));
        assert_eq!(written.math_flags, 3);
        assert_eq!(written.question_count, 1);

        let reloaded: Paper = serde_json::from_str(&std::fs::read_to_string(&written.path).unwrap()).unwrap();
        assert_eq!(reloaded, paper);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
