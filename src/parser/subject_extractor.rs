//! 科目信息抽取
//!
//! 尽力而为：没匹配到的字段保持零值，并在来源报告中标记为 `Defaulted`，从不报错。

use crate::models::{ExamPattern, Group, GroupName, Provenance, ProvenanceReport, Subject};
use crate::parser::normalize::clean;
use crate::parser::numerals::parse_count;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

/// 只在前若干行里找科目代码、名称和院系信息
const HEADER_SCAN_LINES: usize = 30;
/// 科目名称行的最小长度
const MIN_TITLE_LEN: usize = 10;

static CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([A-Z]{2,4}\d{3})\b").expect("valid code regex"));
static TITLE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][A-Z\s&/\-,]+$").expect("valid title regex"));
static BANNER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:JISCE|JIS)\b|\b(?:COLLEGE|UNIVERSITY|INSTITUTE|DEPARTMENT|EXAMINATION|QUESTION PAPER|ANSWER KEY|SOLUTIONS)\b",
    )
    .expect("valid banner regex")
});
static INFO_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b([A-Z][A-Z0-9]*)\s*/\s*(?:UG|PG)\s*/\s*([A-Z]+)\s*/\s*(R\d+)\s*/\s*SEM\s*-?\s*(\d{1,2})")
        .expect("valid info line regex")
});
static COLLEGE_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b([A-Z][A-Za-z.]*(?:\s+[A-Z][A-Za-z.]*)*\s+(?i:college\s+of\s+engineering)[^,]*(?:,\s*\w+)?)")
        .expect("valid college regex")
});
static SHORT_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b([A-Z]{2,6})\s*[—–-]\s*(?i:answer\s+key)").expect("valid short name regex")
});
static GROUP_MARKS: Lazy<[Regex; 3]> = Lazy::new(|| {
    GroupName::ALL.map(|group| {
        Regex::new(&format!(
            r"(?i)Group\s+{}[:\s]+(\d+)\s*[×x*]\s*(\d+)\s*=\s*(\d+)\s*marks",
            group.letter()
        ))
        .expect("valid group marks regex")
    })
});
static ATTEMPT_PHRASE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)answer\s+any\s+(\w+)\s+(?:questions?\s+)?from\s+the\s+following")
        .expect("valid attempt regex")
});
static GROUP_MENTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bgroup\s+([abc])\b").expect("valid group mention regex"));
static FULL_MARKS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Full\s*Marks[:\s]+(\d+)").expect("valid full marks regex"));
static TIME_ALLOTTED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Time\s*Allotted[:\s]+(\d+(?:\.\d+)?)\s*Hours?").expect("valid time regex")
});

/// 抽取结果：科目 + 各字段来源
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubjectExtraction {
    pub subject: Subject,
    pub provenance: ProvenanceReport,
}

pub fn extract_subject(lines: &[String]) -> SubjectExtraction {
    let mut subject = Subject::default();
    let mut provenance = ProvenanceReport::default();
    let mut college_abbr = String::new();
    let mut college_full = String::new();

    for raw in lines.iter().take(HEADER_SCAN_LINES) {
        let line = clean(raw);

        if subject.code.is_empty() {
            if let Some(caps) = CODE.captures(&line) {
                subject.code = caps[1].to_string();
            }
        }

        if subject.name.is_empty() && is_title_line(&line) {
            subject.name = title_case(&line);
        }

        if let Some(caps) = INFO_LINE.captures(&line) {
            college_abbr = caps[1].to_uppercase();
            subject.department = caps[2].to_uppercase();
            subject.regulation = caps[3].to_uppercase();
            subject.semester = caps[4].parse().unwrap_or(0);
        }

        if let Some(caps) = COLLEGE_NAME.captures(&line) {
            college_full = caps[1].trim().to_string();
        }
    }

    // 完整校名优先于缩写
    subject.college = if college_full.is_empty() {
        college_abbr
    } else {
        college_full
    };

    provenance.record("code", Provenance::from_matched(!subject.code.is_empty()));
    provenance.record("name", Provenance::from_matched(!subject.name.is_empty()));
    provenance.record("department", Provenance::from_matched(!subject.department.is_empty()));
    provenance.record("regulation", Provenance::from_matched(!subject.regulation.is_empty()));
    provenance.record("semester", Provenance::from_matched(subject.semester > 0));
    provenance.record("college", Provenance::from_matched(!subject.college.is_empty()));

    let full_text = lines.join(" ");

    let (short_name, short_provenance) = short_name(&full_text, &subject.name);
    subject.short_name = short_name;
    provenance.record("short_name", short_provenance);

    let (exam_pattern, pattern_provenance) = extract_exam_pattern(lines, &full_text);
    subject.exam_pattern = exam_pattern;
    provenance.extend_prefixed("exam_pattern", &pattern_provenance);

    debug!(
        "科目抽取完成: {} | 默认字段: {:?}",
        subject,
        provenance.defaulted()
    );

    SubjectExtraction {
        subject,
        provenance,
    }
}

fn is_title_line(line: &str) -> bool {
    line.len() > MIN_TITLE_LEN && TITLE_LINE.is_match(line) && !BANNER.is_match(line)
}

/// `COMPUTER ORGANIZATION & ARCHITECTURE` → `Computer Organization & Architecture`
pub fn title_case(line: &str) -> String {
    line.split('&')
        .map(|part| {
            part.split_whitespace()
                .map(capitalize)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join(" & ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// 优先取 "COA — Answer Key"，否则用名称中长度大于 2 的单词首字母
fn short_name(full_text: &str, name: &str) -> (String, Provenance) {
    if let Some(caps) = SHORT_NAME.captures(full_text) {
        return (caps[1].to_uppercase(), Provenance::Matched);
    }
    let initials: String = name
        .split(|c: char| c.is_whitespace() || c == '&' || c == '/')
        .filter(|word| word.chars().count() > 2)
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect();
    (initials, Provenance::Defaulted)
}

fn extract_exam_pattern(lines: &[String], full_text: &str) -> (ExamPattern, ProvenanceReport) {
    let mut pattern = ExamPattern::default();
    let mut provenance = ProvenanceReport::default();
    let attempts = attempt_counts(lines);

    for (group, regex) in GroupName::ALL.into_iter().zip(GROUP_MARKS.iter()) {
        let Some(caps) = regex.captures(full_text) else {
            provenance.record(format!("groups.{}", group), Provenance::Defaulted);
            continue;
        };

        let listed: u32 = caps[1].parse().unwrap_or(0);
        let marks_each: u32 = caps[2].parse().unwrap_or(0);
        let total: u32 = caps[3].parse().unwrap_or(0);

        if marks_each == 0 || total % marks_each != 0 {
            warn!(
                "Group {} 的分值 {}×{} = {} 无法整除，忽略该组",
                group, listed, marks_each, total
            );
            provenance.record(format!("groups.{}", group), Provenance::Defaulted);
            continue;
        }

        let questions_count = total / marks_each;
        let attempt_key = format!("groups.{}.attempt_count", group);
        let mut attempt = match attempts[group_index(group)] {
            Some(count) => {
                provenance.record(attempt_key, Provenance::Matched);
                count
            }
            None => {
                provenance.record(attempt_key, Provenance::Defaulted);
                listed
            }
        };
        if attempt > questions_count {
            warn!(
                "Group {} 需作答 {} 题，超过题目总数 {}，按总数处理",
                group, attempt, questions_count
            );
            attempt = questions_count;
        }

        provenance.record(format!("groups.{}", group), Provenance::Matched);
        pattern
            .groups
            .push(Group::new(group, questions_count, attempt, marks_each));
    }

    match FULL_MARKS.captures(full_text).and_then(|c| c[1].parse().ok()) {
        Some(marks) => {
            pattern.total_marks = marks;
            provenance.record("total_marks", Provenance::Matched);
        }
        None => provenance.record("total_marks", Provenance::Defaulted),
    }

    match TIME_ALLOTTED
        .captures(full_text)
        .and_then(|c| c[1].parse::<f64>().ok())
    {
        Some(hours) => {
            pattern.duration_minutes = (hours * 60.0).round() as u32;
            provenance.record("duration_minutes", Provenance::Matched);
        }
        None => provenance.record("duration_minutes", Provenance::Defaulted),
    }

    (pattern, provenance)
}

fn group_index(group: GroupName) -> usize {
    match group {
        GroupName::A => 0,
        GroupName::B => 1,
        GroupName::C => 2,
    }
}

/// "Answer any ten from the following" 归属到最近一次提到的 Group，每组取第一次出现的
fn attempt_counts(lines: &[String]) -> [Option<u32>; 3] {
    let mut counts = [None; 3];
    let mut current: Option<GroupName> = None;

    for line in lines {
        if let Some(caps) = GROUP_MENTION.captures_iter(line).last() {
            current = caps[1].chars().next().and_then(GroupName::from_letter);
        }
        let Some(group) = current else {
            continue;
        };
        let slot = &mut counts[group_index(group)];
        if slot.is_some() {
            continue;
        }
        if let Some(caps) = ATTEMPT_PHRASE.captures(line) {
            *slot = parse_count(&caps[1]);
        }
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QuestionType;
    use pretty_assertions::assert_eq;

    fn owned(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn cover_page_scenario() {
        let lines = owned(&[
            "IT301 — Sample Question Paper",
            "COMPUTER ORGANIZATION & ARCHITECTURE",
            "JISCE / UG / IT / R23 / SEM-3 / 2025-26",
            "Full Marks: 70",
            "Time Allotted: 3 Hours",
            "Group A: 10×1 = 10 marks",
        ]);
        let SubjectExtraction {
            subject,
            provenance,
        } = extract_subject(&lines);

        assert_eq!(subject.code, "IT301");
        assert_eq!(subject.name, "Computer Organization & Architecture");
        assert_eq!(subject.department, "IT");
        assert_eq!(subject.regulation, "R23");
        assert_eq!(subject.semester, 3);
        assert_eq!(subject.college, "JISCE");
        assert_eq!(subject.short_name, "COA");
        assert_eq!(subject.exam_pattern.total_marks, 70);
        assert_eq!(subject.exam_pattern.duration_minutes, 180);
        assert_eq!(subject.exam_pattern.groups.len(), 1);

        let group = &subject.exam_pattern.groups[0];
        assert_eq!(group.name, GroupName::A);
        assert_eq!(group.questions_count, 10);
        assert_eq!(group.marks_per_question, 1);
        assert_eq!(group.attempt_count, 10);
        assert_eq!(group.question_type, QuestionType::Mcq);

        assert_eq!(provenance.get("code"), Some(Provenance::Matched));
        assert_eq!(provenance.get("short_name"), Some(Provenance::Defaulted));
        assert_eq!(
            provenance.get("exam_pattern.groups.B"),
            Some(Provenance::Defaulted)
        );
    }

    #[test]
    fn non_divisible_group_is_omitted() {
        let lines = owned(&[
            "Group A: 10×1 = 10 marks",
            "Group B: 3×4 = 15 marks",
            "Group C: 3×15 = 45 marks",
        ]);
        let subject = extract_subject(&lines).subject;
        let names: Vec<_> = subject.exam_pattern.groups.iter().map(|g| g.name).collect();
        assert_eq!(names, vec![GroupName::A, GroupName::C]);
        assert_eq!(subject.exam_pattern.groups[1].questions_count, 3);
    }

    #[test]
    fn attempt_phrases_follow_their_group_heading() {
        let lines = owned(&[
            "Group A: 12×1 = 12 marks",
            "Group B: 5×5 = 25 marks",
            "Group A — Multiple Choice Questions",
            "Answer any ten from the following (10×1=10)",
            "Group B — Short Answer Questions",
            "Answer any three from the following (3×5=15)",
        ]);
        let groups = extract_subject(&lines).subject.exam_pattern.groups;
        assert_eq!(groups[0].questions_count, 12);
        assert_eq!(groups[0].attempt_count, 10);
        assert_eq!(groups[0].instructions, "Answer any 10 out of 12 questions");
        assert_eq!(groups[1].questions_count, 5);
        assert_eq!(groups[1].attempt_count, 3);
    }

    #[test]
    fn defaults_when_nothing_matches() {
        let extraction = extract_subject(&owned(&["just some text"]));
        assert_eq!(extraction.subject.code, "");
        assert_eq!(extraction.subject.exam_pattern.total_marks, 70);
        assert_eq!(extraction.subject.exam_pattern.duration_minutes, 180);
        assert!(extraction.subject.exam_pattern.groups.is_empty());
        assert!(extraction.provenance.defaulted().contains(&"code"));
        assert!(extraction
            .provenance
            .defaulted()
            .contains(&"exam_pattern.duration_minutes"));
    }

    #[test]
    fn answer_key_short_name_and_full_college_name() {
        let lines = owned(&[
            "JIS College of Engineering, Kalyani",
            "JISCE / UG / CSE / R21 / SEM-5",
            "DESIGN & ANALYSIS OF ALGORITHMS",
            "DAA — Answer Key",
            "Time Allotted: 1.5 Hours",
        ]);
        let subject = extract_subject(&lines).subject;
        assert_eq!(subject.college, "JIS College of Engineering, Kalyani");
        assert_eq!(subject.department, "CSE");
        assert_eq!(subject.semester, 5);
        assert_eq!(subject.name, "Design & Analysis Of Algorithms");
        assert_eq!(subject.short_name, "DAA");
        assert_eq!(subject.exam_pattern.duration_minutes, 90);
    }

    #[test]
    fn banner_lines_are_not_titles() {
        let lines = owned(&["JISCE END SEMESTER EXAMINATION", "OPERATING SYSTEMS"]);
        assert_eq!(extract_subject(&lines).subject.name, "Operating Systems");
    }
}
