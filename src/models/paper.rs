use crate::models::subject::GroupName;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 试卷类型
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaperType {
    #[default]
    EndSem,
    #[serde(rename = "mid_sem_1")]
    MidSem1,
    #[serde(rename = "mid_sem_2")]
    MidSem2,
    Practice,
}

impl PaperType {
    /// 根据标题关键字判断试卷类型，按固定优先级匹配
    pub fn classify(title: &str) -> Self {
        let lowered = title.to_lowercase().replace('-', " ");
        if lowered.contains("end sem") {
            PaperType::EndSem
        } else if lowered.contains("mid sem 1") {
            PaperType::MidSem1
        } else if lowered.contains("mid sem 2") {
            PaperType::MidSem2
        } else if lowered.contains("practice") {
            PaperType::Practice
        } else {
            PaperType::EndSem
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PaperType::EndSem => "end_sem",
            PaperType::MidSem1 => "mid_sem_1",
            PaperType::MidSem2 => "mid_sem_2",
            PaperType::Practice => "practice",
        }
    }
}

impl fmt::Display for PaperType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 选择题选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct McqOption {
    pub key: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub group: GroupName,
    pub number: String,
    pub text: String,
    pub marks: u32,
    pub co: String,
    pub bl: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<McqOption>>,
}

impl Question {
    pub fn option_keys(&self) -> impl Iterator<Item = &str> {
        self.options
            .iter()
            .flatten()
            .map(|option| option.key.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub question_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_option: Option<String>,
    pub solution: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_points: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modules_covered: Option<Vec<String>>,
}

/// 试卷
///
/// `questions` 与 `answers` 的键集合始终一致，插入只能通过 [`Paper::insert_entry`]。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paper {
    pub subject_code: String,
    pub title: String,
    #[serde(rename = "type")]
    pub paper_type: PaperType,
    pub year: String,
    pub is_free: bool,
    pub price: u32,
    #[serde(default)]
    pub metadata: PaperMetadata,
    questions: IndexMap<String, Question>,
    answers: IndexMap<String, Answer>,
}

/// 试卷校验问题（仅用于人工复核，不影响写出）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaperIssue {
    MissingAnswer { key: String },
    OrphanAnswer { key: String },
    AnswerNumberMismatch { key: String, found: String },
    OptionCount { key: String, count: usize },
    UnknownCorrectOption { key: String, option: String },
    EmptySolution { key: String },
}

impl fmt::Display for PaperIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaperIssue::MissingAnswer { key } => write!(f, "{}: 缺少答案", key),
            PaperIssue::OrphanAnswer { key } => write!(f, "{}: 答案没有对应题目", key),
            PaperIssue::AnswerNumberMismatch { key, found } => {
                write!(f, "{}: 答案题号不一致 ({})", key, found)
            }
            PaperIssue::OptionCount { key, count } => {
                write!(f, "{}: 选项数量 {} 不在 2-4 之间", key, count)
            }
            PaperIssue::UnknownCorrectOption { key, option } => {
                write!(f, "{}: 正确选项 ({}) 不在选项中", key, option)
            }
            PaperIssue::EmptySolution { key } => write!(f, "{}: 解析为空", key),
        }
    }
}

impl Paper {
    pub fn new(subject_code: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            subject_code: subject_code.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    /// 插入一道题及其答案，键取自 `question.number`。
    ///
    /// 键已存在时不插入并返回 `false`。
    pub fn insert_entry(&mut self, question: Question, mut answer: Answer) -> bool {
        let key = question.number.clone();
        if self.questions.contains_key(&key) {
            return false;
        }
        answer.question_number = key.clone();
        self.questions.insert(key.clone(), question);
        self.answers.insert(key, answer);
        true
    }

    pub fn questions(&self) -> &IndexMap<String, Question> {
        &self.questions
    }

    pub fn answers(&self) -> &IndexMap<String, Answer> {
        &self.answers
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn validate(&self) -> Vec<PaperIssue> {
        let mut issues = Vec::new();

        for (key, question) in &self.questions {
            let Some(answer) = self.answers.get(key) else {
                issues.push(PaperIssue::MissingAnswer { key: key.clone() });
                continue;
            };
            if &answer.question_number != key {
                issues.push(PaperIssue::AnswerNumberMismatch {
                    key: key.clone(),
                    found: answer.question_number.clone(),
                });
            }
            if let Some(options) = &question.options {
                if !(2..=4).contains(&options.len()) {
                    issues.push(PaperIssue::OptionCount {
                        key: key.clone(),
                        count: options.len(),
                    });
                }
            }
            if let Some(option) = &answer.correct_option {
                if !question.option_keys().any(|k| k == option) {
                    issues.push(PaperIssue::UnknownCorrectOption {
                        key: key.clone(),
                        option: option.clone(),
                    });
                }
            }
            if answer.solution.trim().is_empty() {
                issues.push(PaperIssue::EmptySolution { key: key.clone() });
            }
        }

        for key in self.answers.keys() {
            if !self.questions.contains_key(key) {
                issues.push(PaperIssue::OrphanAnswer { key: key.clone() });
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(number: &str, options: Option<Vec<McqOption>>) -> Question {
        Question {
            group: GroupName::A,
            number: number.to_string(),
            text: "text".to_string(),
            marks: 1,
            co: "CO1".to_string(),
            bl: "L1".to_string(),
            options,
        }
    }

    fn answer(solution: &str, correct_option: Option<&str>) -> Answer {
        Answer {
            question_number: String::new(),
            correct_option: correct_option.map(str::to_string),
            solution: solution.to_string(),
            key_points: None,
        }
    }

    #[test]
    fn classify_follows_priority_order() {
        assert_eq!(PaperType::classify("End Sem 2024"), PaperType::EndSem);
        assert_eq!(PaperType::classify("Mid Sem 1 Paper"), PaperType::MidSem1);
        assert_eq!(PaperType::classify("Mid-Sem 2"), PaperType::MidSem2);
        assert_eq!(PaperType::classify("Practice Set 3"), PaperType::Practice);
        assert_eq!(PaperType::classify("Sample Question Paper 1"), PaperType::EndSem);
        // "end sem" 优先于 "practice"
        assert_eq!(PaperType::classify("End Sem Practice"), PaperType::EndSem);
    }

    #[test]
    fn insert_entry_keeps_keys_aligned() {
        let mut paper = Paper::new("IT301", "Sample");
        assert!(paper.insert_entry(question("A1", None), answer("because", None)));
        assert!(!paper.insert_entry(question("A1", None), answer("again", None)));

        assert_eq!(paper.question_count(), 1);
        assert_eq!(paper.answers()["A1"].question_number, "A1");
        assert_eq!(paper.answers()["A1"].solution, "because");
    }

    #[test]
    fn validate_reports_option_problems() {
        let mut paper = Paper::new("IT301", "Sample");
        let options = vec![McqOption {
            key: "a".to_string(),
            text: "only".to_string(),
        }];
        paper.insert_entry(question("A1", Some(options)), answer(" ", Some("b")));

        let issues = paper.validate();
        assert!(issues.contains(&PaperIssue::OptionCount {
            key: "A1".to_string(),
            count: 1
        }));
        assert!(issues.contains(&PaperIssue::UnknownCorrectOption {
            key: "A1".to_string(),
            option: "b".to_string()
        }));
        assert!(issues.contains(&PaperIssue::EmptySolution {
            key: "A1".to_string()
        }));
    }

    #[test]
    fn paper_serializes_maps_and_type() {
        let mut paper = Paper::new("IT301", "Sample");
        paper.paper_type = PaperType::MidSem1;
        paper.insert_entry(question("A1", None), answer("x", None));

        let json = serde_json::to_value(&paper).unwrap();
        assert_eq!(json["type"], "mid_sem_1");
        assert!(json["questions"].is_object());
        assert_eq!(json["answers"]["A1"]["question_number"], "A1");
        assert!(json["questions"]["A1"].get("options").is_none());
        assert!(json["metadata"].as_object().unwrap().is_empty());
    }
}
