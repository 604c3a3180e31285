//! 公式标记
//!
//! 给看起来像裸写数学式的 `x^2`、`a_n` 加上 `[...]`，方便人工复核时改写成 `$...$`。
//!
//! 只有前面不是单词字符的 `[token]` 才视为已有标记；`arr[i_j]` 这类下标写法仍会被标记。

use once_cell::sync::Lazy;
use regex::Regex;

static MATH_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\w+\^\w+|\w+_\w+)\b").expect("valid math token regex"));
static MATH_FLAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[[\w^_]+\]").expect("valid math flag regex"));

const MATH_DELIMITERS: [&str; 3] = ["$", "\\(", "\\["];

fn has_math_delimiter(text: &str) -> bool {
    MATH_DELIMITERS.iter().any(|d| text.contains(d))
}

/// 已含公式定界符的文本原样返回；已加过标记的记号不会重复包裹
pub fn flag_math(text: &str) -> String {
    if has_math_delimiter(text) {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len() + 8);
    let mut last = 0;
    for m in MATH_TOKEN.find_iter(text) {
        out.push_str(&text[last..m.start()]);
        let wrapped = is_flagged(text, m.start(), m.end());
        if wrapped {
            out.push_str(m.as_str());
        } else {
            out.push('[');
            out.push_str(m.as_str());
            out.push(']');
        }
        last = m.end();
    }
    out.push_str(&text[last..]);
    out
}

/// `[token]` 且 `[` 前是开头或非单词字符
fn is_flagged(text: &str, start: usize, end: usize) -> bool {
    let Some(before) = text[..start].strip_suffix('[') else {
        return false;
    };
    let standalone = before
        .chars()
        .next_back()
        .map_or(true, |c| !(c.is_alphanumeric() || c == '_'));
    standalone && text[end..].starts_with(']')
}

/// 统计文本（通常是序列化后的试卷 JSON）中的公式标记数量
pub fn count_math_flags(text: &str) -> usize {
    MATH_FLAG.find_iter(text).count()
}
