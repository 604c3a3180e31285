use crate::models::GroupName;
use once_cell::sync::Lazy;
use regex::Regex;

static MARKERS: Lazy<[(Regex, &'static str); 3]> = Lazy::new(|| {
    [
        (r"group a\s*[—–-]", "multiple choice"),
        (r"group b\s*[—–-]", "short answer"),
        (r"group c\s*[—–-]", "long answer"),
    ]
    .map(|(pattern, descriptor)| {
        (
            Regex::new(pattern).expect("valid group marker regex"),
            descriptor,
        )
    })
});

/// 三个大题各自的行切片
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sections<'a> {
    pub a: &'a [String],
    pub b: &'a [String],
    pub c: &'a [String],
}

impl<'a> Sections<'a> {
    pub fn get(&self, group: GroupName) -> &'a [String] {
        match group {
            GroupName::A => self.a,
            GroupName::B => self.b,
            GroupName::C => self.c,
        }
    }
}

/// 找到每组第一次出现的分组标题行
pub fn find_markers(lines: &[String]) -> [Option<usize>; 3] {
    let mut found = [None; 3];
    for (idx, line) in lines.iter().enumerate() {
        let lowered = line.to_lowercase();
        for (slot, (regex, descriptor)) in found.iter_mut().zip(MARKERS.iter()) {
            if slot.is_none() && regex.is_match(&lowered) && lowered.contains(*descriptor) {
                *slot = Some(idx);
            }
        }
    }
    found
}

/// 按分组标题把行序列切成 A / B / C 三段
///
/// 每段从本组标题开始，到其后最近的另一个分组标题（或末尾）为止；找不到标题的组为空切片。
pub fn segment(lines: &[String]) -> Sections<'_> {
    let markers = find_markers(lines);
    Sections {
        a: slice_from(lines, &markers, markers[0]),
        b: slice_from(lines, &markers, markers[1]),
        c: slice_from(lines, &markers, markers[2]),
    }
}

fn slice_from<'a>(lines: &'a [String], markers: &[Option<usize>; 3], start: Option<usize>) -> &'a [String] {
    let Some(start) = start else {
        return &[];
    };
    let end = markers
        .iter()
        .flatten()
        .copied()
        .filter(|idx| *idx > start)
        .min()
        .unwrap_or(lines.len());
    &lines[start..end]
}
