//! 行级词法：把规范化后的行转换成带类型的行事件，供各组状态机消费。
//!
//! 状态机只通过 [`Cursor`] 推进，游标按值传递并随解析片段一起返回。

use crate::parser::numerals::roman_to_int;
use once_cell::sync::Lazy;
use regex::Regex;

static MCQ_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^Q\d+\.([ivx]+)\s*:\s+(.+?)\s*\((\d+)\)\s+(CO\d+)\s+(BL[\d/]+)")
        .expect("valid mcq header regex")
});
static MCQ_HEADER_LIKE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^Q\d+\.[ivx]+\b").expect("valid mcq header prefix regex"));
static MCQ_OPTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\(([a-d])\)\s*(.*)$").expect("valid option regex"));
static INLINE_OPTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s\(([a-d])\)\s+").expect("valid inline option regex"));
static ANSWER_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^Answer\s*:\s*(.*)$").expect("valid answer regex"));
static ANSWER_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\(([a-d])\)\s*(.*)$").expect("valid answer key regex"));
static GROUP_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^Group\s+[BC]\b").expect("valid group boundary regex"));

static WRITTEN_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^Q(\d+)\s*:\s+(.+?)\s*\((\d+)\)\s+(CO\d+(?:/(?:CO)?\d+)*)(?:\s+(BL[\d/]+))?")
        .expect("valid written header regex")
});
static SOLUTION_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^Solution\b[\s:.\-]*(.*)$").expect("valid solution regex"));

/// 默认布鲁姆层级（简答 / 论述题标题缺省时）
pub const DEFAULT_BLOOM_LEVEL: &str = "L2";

/// 题目标题行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionHeader {
    /// 选择题为罗马数字换算后的序号（越界为 0），简答 / 论述题为原卷绝对题号
    pub ordinal: u32,
    pub title: String,
    pub marks: u32,
    pub co: String,
    pub bl: String,
}

/// `BL2` → `L2`
fn bloom_level(tag: &str) -> String {
    tag.to_uppercase().replacen("BL", "L", 1)
}

/// 选择题组中的行事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum McqLine<'a> {
    Header(QuestionHeader),
    /// 形似题头但标签不完整，只作为段落边界
    MalformedHeader(&'a str),
    Option { key: char, text: &'a str },
    Answer { key: Option<char>, rest: &'a str },
    GroupBoundary,
    Text(&'a str),
}

impl McqLine<'_> {
    pub fn is_header(&self) -> bool {
        matches!(self, McqLine::Header(_) | McqLine::MalformedHeader(_))
    }
}

/// 简答 / 论述题组中的行事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WrittenLine<'a> {
    Header(QuestionHeader),
    Solution(&'a str),
    Text(&'a str),
}

pub fn tokenize_mcq(lines: &[String]) -> Vec<McqLine<'_>> {
    let mut events = Vec::with_capacity(lines.len());
    for line in lines {
        classify_mcq_line(line, &mut events);
    }
    events
}

fn classify_mcq_line<'a>(line: &'a str, events: &mut Vec<McqLine<'a>>) {
    if let Some(caps) = MCQ_HEADER.captures(line) {
        events.push(McqLine::Header(QuestionHeader {
            ordinal: roman_to_int(&caps[1]),
            title: caps[2].trim().to_string(),
            marks: caps[3].parse().unwrap_or(0),
            co: caps[4].to_uppercase(),
            bl: bloom_level(&caps[5]),
        }));
        return;
    }
    if MCQ_HEADER_LIKE.is_match(line) {
        events.push(McqLine::MalformedHeader(line));
        return;
    }
    if let Some(caps) = MCQ_OPTION.captures(line) {
        let first_key = caps[1].chars().next().unwrap_or('a');
        let body = caps.get(2).map_or("", |m| m.as_str());
        split_inline_options(first_key, body, events);
        return;
    }
    if let Some(caps) = ANSWER_LINE.captures(line) {
        let after = caps.get(1).map_or("", |m| m.as_str());
        let event = match ANSWER_KEY.captures(after) {
            Some(key_caps) => McqLine::Answer {
                key: key_caps[1].to_lowercase().chars().next(),
                rest: key_caps.get(2).map_or("", |m| m.as_str()),
            },
            None => McqLine::Answer {
                key: None,
                rest: after,
            },
        };
        events.push(event);
        return;
    }
    if GROUP_BOUNDARY.is_match(line) {
        events.push(McqLine::GroupBoundary);
        return;
    }
    events.push(McqLine::Text(line));
}

/// `(a) foo (b) bar` 拆成两个选项事件
///
/// 只有紧接着的下一个字母才算新选项，`(d) Both (a) and (b)` 保持为一个选项。
fn split_inline_options<'a>(first_key: char, body: &'a str, events: &mut Vec<McqLine<'a>>) {
    let mut key = first_key;
    let mut start = 0;
    for caps in INLINE_OPTION.captures_iter(body) {
        let (Some(whole), Some(next_key)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let next_key = next_key.as_str().chars().next().unwrap_or(key);
        if Some(next_key) != following_key(key) {
            continue;
        }
        events.push(McqLine::Option {
            key,
            text: body[start..whole.start()].trim(),
        });
        key = next_key;
        start = whole.end();
    }
    events.push(McqLine::Option {
        key,
        text: body[start..].trim(),
    });
}

fn following_key(key: char) -> Option<char> {
    match key {
        'a' => Some('b'),
        'b' => Some('c'),
        'c' => Some('d'),
        _ => None,
    }
}

pub fn tokenize_written(lines: &[String]) -> Vec<WrittenLine<'_>> {
    lines
        .iter()
        .map(|line| {
            if let Some(caps) = WRITTEN_HEADER.captures(line) {
                WrittenLine::Header(QuestionHeader {
                    ordinal: caps[1].parse().unwrap_or(0),
                    title: caps[2].trim().to_string(),
                    marks: caps[3].parse().unwrap_or(0),
                    co: caps[4].to_uppercase(),
                    bl: caps
                        .get(5)
                        .map(|m| bloom_level(m.as_str()))
                        .unwrap_or_else(|| DEFAULT_BLOOM_LEVEL.to_string()),
                })
            } else if let Some(caps) = SOLUTION_MARKER.captures(line) {
                WrittenLine::Solution(caps.get(1).map_or("", |m| m.as_str()))
            } else {
                WrittenLine::Text(line.as_str())
            }
        })
        .collect()
}

/// 行事件游标
///
/// 可复制的轻量值，解析函数按值接收并返回推进后的游标。
#[derive(Debug)]
pub struct Cursor<'a, T> {
    items: &'a [T],
    pos: usize,
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

impl<'a, T> Cursor<'a, T> {
    pub fn new(items: &'a [T]) -> Self {
        Self { items, pos: 0 }
    }

    pub fn peek(&self) -> Option<&'a T> {
        self.items.get(self.pos)
    }

    pub fn advance(self) -> Self {
        Self {
            items: self.items,
            pos: (self.pos + 1).min(self.items.len()),
        }
    }

    pub fn is_done(&self) -> bool {
        self.pos >= self.items.len()
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// 消费满足条件的连续事件
    pub fn take_while(self, mut pred: impl FnMut(&T) -> bool) -> (&'a [T], Self) {
        let start = self.pos;
        let mut end = start;
        while end < self.items.len() && pred(&self.items[end]) {
            end += 1;
        }
        (
            &self.items[start..end],
            Self {
                items: self.items,
                pos: end,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn mcq_header_is_parsed() {
        let lines = owned(&["Q1.iv: Cache mapping (1) CO2 BL3"]);
        let events = tokenize_mcq(&lines);
        assert_eq!(
            events,
            vec![McqLine::Header(QuestionHeader {
                ordinal: 4,
                title: "Cache mapping".to_string(),
                marks: 1,
                co: "CO2".to_string(),
                bl: "L3".to_string(),
            })]
        );
    }

    #[test]
    fn out_of_range_numeral_keeps_header_with_zero_ordinal() {
        let lines = owned(&["Q1.xiii: Too far (1) CO1 BL1"]);
        match &tokenize_mcq(&lines)[0] {
            McqLine::Header(header) => assert_eq!(header.ordinal, 0),
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn header_without_tags_is_a_boundary_only() {
        let lines = owned(&["Q1.ii: Missing tags"]);
        assert_eq!(
            tokenize_mcq(&lines),
            vec![McqLine::MalformedHeader("Q1.ii: Missing tags")]
        );
    }

    #[test]
    fn inline_options_are_split() {
        let lines = owned(&["(a) 8 bits (b) 16 bits", "(c) 32 bits", "(d)"]);
        assert_eq!(
            tokenize_mcq(&lines),
            vec![
                McqLine::Option { key: 'a', text: "8 bits" },
                McqLine::Option { key: 'b', text: "16 bits" },
                McqLine::Option { key: 'c', text: "32 bits" },
                McqLine::Option { key: 'd', text: "" },
            ]
        );
    }

    #[test]
    fn option_text_referring_to_other_options_stays_whole() {
        let lines = owned(&["(d) Both (a) and (b)", "(c) None of (a)", "(a) x (c) y"]);
        assert_eq!(
            tokenize_mcq(&lines),
            vec![
                McqLine::Option { key: 'd', text: "Both (a) and (b)" },
                McqLine::Option { key: 'c', text: "None of (a)" },
                McqLine::Option { key: 'a', text: "x (c) y" },
            ]
        );
    }

    #[test]
    fn answer_line_with_and_without_key() {
        let lines = owned(&["Answer: (B) because of locality", "Answer: see below"]);
        assert_eq!(
            tokenize_mcq(&lines),
            vec![
                McqLine::Answer {
                    key: Some('b'),
                    rest: "because of locality"
                },
                McqLine::Answer {
                    key: None,
                    rest: "see below"
                },
            ]
        );
    }

    #[test]
    fn written_header_defaults_bloom_level() {
        let lines = owned(&[
            "Q2: Explain pipelining (5) CO3",
            "Q3: Compare RISC and CISC (5) CO2/CO3 BL4",
            "Solution: Pipelining overlaps stages",
        ]);
        let events = tokenize_written(&lines);
        match (&events[0], &events[1]) {
            (WrittenLine::Header(first), WrittenLine::Header(second)) => {
                assert_eq!(first.ordinal, 2);
                assert_eq!(first.bl, "L2");
                assert_eq!(second.co, "CO2/CO3");
                assert_eq!(second.bl, "L4");
            }
            other => panic!("unexpected events {:?}", other),
        }
        assert_eq!(events[2], WrittenLine::Solution("Pipelining overlaps stages"));
    }

    #[test]
    fn cursor_take_while_returns_advanced_cursor() {
        let items = [1, 2, 3, 10, 4];
        let cursor = Cursor::new(&items);
        let (small, rest) = cursor.take_while(|n| *n < 5);
        assert_eq!(small, &[1, 2, 3]);
        assert_eq!(rest.peek(), Some(&10));
        // 原游标未被修改
        assert_eq!(cursor.position(), 0);
        let rest = rest.advance().advance().advance();
        assert!(rest.is_done());
        assert_eq!(rest.position(), 5);
    }
}
