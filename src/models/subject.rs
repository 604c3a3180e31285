use serde::{Deserialize, Serialize};
use std::fmt;

/// 大题分组（A: 选择题, B: 简答题, C: 论述题）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupName {
    A,
    B,
    C,
}

impl GroupName {
    pub const ALL: [GroupName; 3] = [GroupName::A, GroupName::B, GroupName::C];

    /// 分组字母
    pub fn letter(self) -> char {
        match self {
            GroupName::A => 'A',
            GroupName::B => 'B',
            GroupName::C => 'C',
        }
    }

    /// 题型
    pub fn question_type(self) -> QuestionType {
        match self {
            GroupName::A => QuestionType::Mcq,
            GroupName::B => QuestionType::Short,
            GroupName::C => QuestionType::Long,
        }
    }

    /// 原卷中该组第一题的绝对题号（Q2 起为 B 组，Q7 起为 C 组）
    pub fn first_question_number(self) -> u32 {
        match self {
            GroupName::A => 1,
            GroupName::B => 2,
            GroupName::C => 7,
        }
    }

    /// 从字母解析（不区分大小写）
    pub fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(GroupName::A),
            'B' => Some(GroupName::B),
            'C' => Some(GroupName::C),
            _ => None,
        }
    }

    /// 题目键，例如 `A3`
    pub fn key(self, index: u32) -> String {
        format!("{}{}", self.letter(), index)
    }

    /// 显示标签，例如 `Group A`
    pub fn label(self) -> String {
        format!("Group {}", self.letter())
    }
}

impl fmt::Display for GroupName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// 题型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Mcq,
    Short,
    Long,
}

/// 考试结构中的一个大题
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub name: GroupName,
    pub label: String,
    pub instructions: String,
    pub questions_count: u32,
    pub attempt_count: u32,
    pub marks_per_question: u32,
    pub question_type: QuestionType,
}

impl Group {
    pub fn new(name: GroupName, questions_count: u32, attempt_count: u32, marks_per_question: u32) -> Self {
        Self {
            name,
            label: name.label(),
            instructions: format!(
                "Answer any {} out of {} questions",
                attempt_count, questions_count
            ),
            questions_count,
            attempt_count,
            marks_per_question,
            question_type: name.question_type(),
        }
    }
}

/// 考试结构
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExamPattern {
    pub total_marks: u32,
    pub duration_minutes: u32,
    pub groups: Vec<Group>,
}

impl ExamPattern {
    pub const DEFAULT_TOTAL_MARKS: u32 = 70;
    pub const DEFAULT_DURATION_MINUTES: u32 = 180;
}

impl Default for ExamPattern {
    fn default() -> Self {
        Self {
            total_marks: Self::DEFAULT_TOTAL_MARKS,
            duration_minutes: Self::DEFAULT_DURATION_MINUTES,
            groups: Vec::new(),
        }
    }
}

/// 科目（以 `code` 为唯一标识）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Subject {
    pub code: String,
    pub name: String,
    pub short_name: String,
    pub regulation: String,
    pub semester: u32,
    pub department: String,
    pub college: String,
    pub exam_pattern: ExamPattern,
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code, self.name)
    }
}
