//! Group A（选择题）解析
//!
//! 每道题依次经过：题头 → 题干 → 选项 → 答案行 → 解析，每一步都可缺省。

use crate::models::{Answer, GroupName, McqOption, Question};
use crate::parser::lines::{tokenize_mcq, Cursor, McqLine, QuestionHeader};
use crate::parser::math_flag::flag_math;
use crate::parser::normalize::clean;
use crate::parser::{ParsedEntry, ParsedGroup};
use crate::utils::logging::preview;
use tracing::{debug, warn};

type McqCursor<'e, 'a> = Cursor<'e, McqLine<'a>>;

pub fn parse_group_a(lines: &[String]) -> ParsedGroup {
    let events = tokenize_mcq(lines);
    let mut entries = Vec::new();
    let mut cursor = Cursor::new(&events);

    while let Some(event) = cursor.peek() {
        match event {
            McqLine::Header(header) => {
                let (entry, next) = read_question(header, cursor.advance());
                cursor = next;
                entries.extend(entry);
            }
            McqLine::MalformedHeader(line) => {
                warn!(
                    "选择题题头缺少分值或 CO/BL 标签，已跳过: {}",
                    preview(line, 60)
                );
                cursor = cursor.advance();
            }
            _ => cursor = cursor.advance(),
        }
    }

    debug!("Group A 解析出 {} 道题", entries.len());
    entries
}

fn read_question<'e, 'a>(
    header: &QuestionHeader,
    cursor: McqCursor<'e, 'a>,
) -> (Option<ParsedEntry>, McqCursor<'e, 'a>) {
    let (body, cursor) = read_body(cursor);
    let (options, cursor) = read_options(cursor);
    let (answer_key, answer_rest, cursor) = read_answer_key(cursor);
    let (solution_lines, cursor) = read_solution(cursor);

    if header.ordinal == 0 {
        warn!("选择题序号超出 i..xii 范围，已跳过: {}", header.title);
        return (None, cursor);
    }
    let key = GroupName::A.key(header.ordinal);

    let text = if body.is_empty() {
        clean(&header.title)
    } else {
        clean(&body.join(" "))
    };

    let correct_option = match answer_key {
        Some(k) if options.iter().any(|o| o.key == k.to_string()) => Some(k.to_string()),
        Some(k) => {
            warn!("{}: 答案 ({}) 不在已解析的选项中，已忽略", key, k);
            None
        }
        None => None,
    };

    let solution = answer_rest
        .map(str::to_string)
        .into_iter()
        .chain(solution_lines)
        .collect::<Vec<_>>()
        .join("\n");

    let question = Question {
        group: GroupName::A,
        number: key.clone(),
        text: flag_math(&text),
        marks: header.marks,
        co: header.co.clone(),
        bl: header.bl.clone(),
        options: (!options.is_empty()).then_some(options),
    };
    let answer = Answer {
        question_number: key,
        correct_option,
        solution: flag_math(solution.trim()),
        key_points: None,
    };

    (Some(ParsedEntry { question, answer }), cursor)
}

/// 题干：直到第一个选项、题头、答案行或分组边界
fn read_body<'e, 'a>(cursor: McqCursor<'e, 'a>) -> (Vec<&'a str>, McqCursor<'e, 'a>) {
    let (events, cursor) = cursor.take_while(|e| matches!(e, McqLine::Text(_)));
    let body = events
        .iter()
        .filter_map(|e| match e {
            McqLine::Text(line) => Some(*line),
            _ => None,
        })
        .collect();
    (body, cursor)
}

fn read_options<'e, 'a>(cursor: McqCursor<'e, 'a>) -> (Vec<McqOption>, McqCursor<'e, 'a>) {
    let (events, cursor) = cursor.take_while(|e| matches!(e, McqLine::Option { .. }));
    let mut options: Vec<McqOption> = Vec::new();
    for event in events {
        let McqLine::Option { key, text } = event else {
            continue;
        };
        if text.is_empty() {
            continue;
        }
        let key = key.to_string();
        if options.iter().any(|o| o.key == key) {
            warn!("选项 ({}) 重复出现，保留第一次出现的内容", key);
            continue;
        }
        options.push(McqOption {
            key,
            text: flag_math(&clean(text)),
        });
    }
    (options, cursor)
}

fn read_answer_key<'e, 'a>(
    cursor: McqCursor<'e, 'a>,
) -> (Option<char>, Option<&'a str>, McqCursor<'e, 'a>) {
    match cursor.peek() {
        Some(McqLine::Answer { key, rest }) => {
            let rest = (!rest.is_empty()).then_some(*rest);
            (*key, rest, cursor.advance())
        }
        _ => (None, None, cursor),
    }
}

/// 解析：直到下一个题头或分组边界
fn read_solution<'e, 'a>(cursor: McqCursor<'e, 'a>) -> (Vec<String>, McqCursor<'e, 'a>) {
    let (events, cursor) =
        cursor.take_while(|e| !e.is_header() && !matches!(e, McqLine::GroupBoundary));
    let lines = events.iter().filter_map(render_line).collect();
    (lines, cursor)
}

/// 把解析段中被识别成其他事件的行还原成文本
fn render_line(event: &McqLine<'_>) -> Option<String> {
    match event {
        McqLine::Text(line) => Some(line.to_string()),
        McqLine::Option { key, text } => Some(format!("({}) {}", key, text).trim_end().to_string()),
        McqLine::Answer { key: Some(k), rest } => {
            Some(format!("Answer: ({}) {}", k, rest).trim_end().to_string())
        }
        McqLine::Answer { key: None, rest } => Some(format!("Answer: {}", rest).trim_end().to_string()),
        McqLine::Header(_) | McqLine::MalformedHeader(_) | McqLine::GroupBoundary => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn owned(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|s| s.to_string()).collect()
    }

    fn sample() -> Vec<String> {
        owned(&[
            "Group A — Multiple Choice Questions",
            "Answer any ten from the following",
            "Q1.i: Register size (1) CO1 BL1",
            "How many bits are in a byte?",
            "(a) 4",
            "(b) 8",
            "(c) 16",
            "(d) 32",
            "Answer: (b)",
            "A byte has 2^3 bits.",
            "Q1.ii: Cache (1) CO2 BL2",
            "(a) SRAM (b) DRAM",
            "Answer: (a) SRAM is faster",
            "Caches are built from SRAM.",
            "Q1.iii: Bus width (1) CO1 BL2",
            "(a) address",
            "(b) data",
            "(c) control",
            "Answer: (c)",
            "Control lines carry timing.",
        ])
    }

    #[test]
    fn parses_three_questions_with_options_and_answers() {
        let entries = parse_group_a(&sample());
        let keys: Vec<_> = entries.iter().map(|e| e.question.number.as_str()).collect();
        assert_eq!(keys, vec!["A1", "A2", "A3"]);

        for entry in &entries {
            let options = entry.question.options.as_ref().expect("options");
            assert!((2..=4).contains(&options.len()));
            let correct = entry.answer.correct_option.as_deref().expect("correct option");
            assert!(options.iter().any(|o| o.key == correct));
            assert_eq!(entry.answer.question_number, entry.question.number);
        }

        let first = &entries[0];
        assert_eq!(first.question.text, "How many bits are in a byte?");
        assert_eq!(first.question.co, "CO1");
        assert_eq!(first.question.bl, "L1");
        assert_eq!(first.answer.correct_option.as_deref(), Some("b"));
        assert_eq!(first.answer.solution, "A byte has [2^3] bits.");

        let second = &entries[1];
        assert_eq!(second.question.text, "Cache");
        assert_eq!(second.question.options.as_ref().map(Vec::len), Some(2));
        assert_eq!(second.answer.solution, "SRAM is faster\nCaches are built from SRAM.");
    }

    #[test]
    fn missing_options_and_answer_are_not_fatal() {
        let lines = owned(&[
            "Q1.iv: Define latency (1) CO3 BL1",
            "Latency is the delay before transfer begins.",
        ]);
        let entries = parse_group_a(&lines);
        assert_eq!(entries.len(), 1);
        let entry = &entries[0];
        assert_eq!(entry.question.number, "A4");
        assert_eq!(entry.question.options, None);
        assert_eq!(entry.answer.correct_option, None);
        // 没有选项时，后续行都作为题干
        assert_eq!(entry.question.text, "Latency is the delay before transfer begins.");
        assert_eq!(entry.answer.solution, "");
    }

    #[test]
    fn out_of_range_numeral_is_skipped() {
        let lines = owned(&[
            "Q1.xiii: Too many (1) CO1 BL1",
            "(a) x",
            "(b) y",
            "Answer: (a)",
            "Q1.v: Fine (1) CO1 BL1",
            "(a) x",
            "(b) y",
            "Answer: (b)",
        ]);
        let entries = parse_group_a(&lines);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].question.number, "A5");
    }

    #[test]
    fn answer_outside_options_is_dropped() {
        let lines = owned(&["Q1.i: Pick (1) CO1 BL1", "(a) x", "(b) y", "Answer: (d)"]);
        let entries = parse_group_a(&lines);
        assert_eq!(entries[0].answer.correct_option, None);
    }

    #[test]
    fn combined_option_keeps_its_full_text() {
        let lines = owned(&[
            "Q1.vi: Volatile memory (1) CO1 BL1",
            "(a) RAM",
            "(b) ROM",
            "(c) Disk",
            "(d) Both (a) and (b)",
            "Answer: (d)",
        ]);
        let entries = parse_group_a(&lines);
        let options = entries[0].question.options.as_ref().expect("options");
        assert_eq!(options.len(), 4);
        assert_eq!(options[3].key, "d");
        assert_eq!(options[3].text, "Both (a) and (b)");
        assert_eq!(entries[0].answer.correct_option.as_deref(), Some("d"));
    }

    #[test]
    fn solution_stops_at_group_boundary() {
        let lines = owned(&[
            "Q1.i: Pick (1) CO1 BL1",
            "(a) x",
            "(b) y",
            "Answer: (a)",
            "because x",
            "Group B — Short Answer Questions",
            "not part of A",
        ]);
        let entries = parse_group_a(&lines);
        assert_eq!(entries[0].answer.solution, "because x");
    }
}
