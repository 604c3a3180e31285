/// 去掉首尾空白，并把连续空白压成一个空格
pub fn clean(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// 按行切分、规范化，并丢弃空行
pub fn normalize_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(clean)
        .filter(|line| !line.is_empty())
        .collect()
}
