//! Group B / C（简答、论述题）解析
//!
//! 题号按组内顺序重新编号：原卷 Q2 起为 B1，Q7 起为 C1。

use crate::models::{Answer, GroupName, Question};
use crate::parser::lines::{tokenize_written, Cursor, QuestionHeader, WrittenLine};
use crate::parser::math_flag::flag_math;
use crate::parser::normalize::clean;
use crate::parser::{ParsedEntry, ParsedGroup};
use tracing::{debug, warn};

type WrittenCursor<'e, 'a> = Cursor<'e, WrittenLine<'a>>;

pub fn parse_group_bc(lines: &[String], group: GroupName) -> ParsedGroup {
    let events = tokenize_written(lines);
    let mut entries = Vec::new();
    let mut cursor = Cursor::new(&events);

    while let Some(event) = cursor.peek() {
        match event {
            WrittenLine::Header(header) => {
                let (entry, next) = read_question(header, group, cursor.advance());
                cursor = next;
                entries.extend(entry);
            }
            _ => cursor = cursor.advance(),
        }
    }

    debug!("Group {} 解析出 {} 道题", group, entries.len());
    entries
}

fn read_question<'e, 'a>(
    header: &QuestionHeader,
    group: GroupName,
    cursor: WrittenCursor<'e, 'a>,
) -> (Option<ParsedEntry>, WrittenCursor<'e, 'a>) {
    let (body, cursor) = cursor.take_while(|e| matches!(e, WrittenLine::Text(_)));
    let (marker_rest, cursor) = match cursor.peek() {
        Some(WrittenLine::Solution(rest)) => ((!rest.is_empty()).then_some(*rest), cursor.advance()),
        _ => (None, cursor),
    };
    let (solution, cursor) = cursor.take_while(|e| !matches!(e, WrittenLine::Header(_)));

    let start = group.first_question_number();
    if header.ordinal < start {
        warn!(
            "Group {} 的题号 Q{} 小于起始题号 Q{}，已跳过",
            group, header.ordinal, start
        );
        return (None, cursor);
    }
    let key = group.key(header.ordinal - start + 1);

    let body_text: Vec<&str> = body.iter().filter_map(line_text).collect();
    let text = if body_text.is_empty() {
        clean(&header.title)
    } else {
        clean(&body_text.join(" "))
    };

    let solution_text = marker_rest
        .into_iter()
        .chain(solution.iter().filter_map(line_text))
        .collect::<Vec<_>>()
        .join("\n");

    let question = Question {
        group,
        number: key.clone(),
        text: flag_math(&text),
        marks: header.marks,
        co: header.co.clone(),
        bl: header.bl.clone(),
        options: None,
    };
    let answer = Answer {
        question_number: key,
        correct_option: None,
        solution: flag_math(solution_text.trim()),
        key_points: None,
    };

    (Some(ParsedEntry { question, answer }), cursor)
}

fn line_text<'a>(event: &WrittenLine<'a>) -> Option<&'a str> {
    match event {
        WrittenLine::Text(line) => Some(*line),
        WrittenLine::Solution(rest) if !rest.is_empty() => Some(*rest),
        _ => None,
    }
}
