use phf::phf_map;

static ROMAN: phf::Map<&'static str, u32> = phf_map! {
    "i" => 1, "ii" => 2, "iii" => 3, "iv" => 4, "v" => 5, "vi" => 6,
    "vii" => 7, "viii" => 8, "ix" => 9, "x" => 10, "xi" => 11, "xii" => 12,
};

static NUMBER_WORDS: phf::Map<&'static str, u32> = phf_map! {
    "one" => 1, "two" => 2, "three" => 3, "four" => 4, "five" => 5, "six" => 6,
    "seven" => 7, "eight" => 8, "nine" => 9, "ten" => 10, "eleven" => 11, "twelve" => 12,
};

/// 罗马数字 i..xii 转为 1..12，其余一律返回 0
pub fn roman_to_int(roman: &str) -> u32 {
    ROMAN
        .get(roman.to_lowercase().as_str())
        .copied()
        .unwrap_or(0)
}

/// 解析 "ten" / "10" 这样的数量词，无法识别或为 0 时返回 `None`
pub fn parse_count(word: &str) -> Option<u32> {
    let lowered = word.to_lowercase();
    NUMBER_WORDS
        .get(lowered.as_str())
        .copied()
        .or_else(|| lowered.parse().ok())
        .filter(|n| *n > 0)
}
