use crate::models::{PaperType, Provenanced, ProvenanceReport};
use crate::parser::normalize::clean;
use once_cell::sync::Lazy;
use regex::Regex;

/// 封面信息只看前 20 行
const COVER_SCAN_LINES: usize = 20;

static COVER_TITLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b([A-Z]{2,4}\d{3})\s*[—–-]\s*(.+?)\s*with\s+Solutions")
        .expect("valid cover title regex")
});
static ACADEMIC_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{4}-(?:\d{4}|\d{2}))\b").expect("valid year regex"));

/// 试卷封面元数据
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaperMeta {
    pub subject_code: Provenanced<String>,
    pub title: Provenanced<String>,
    pub year: Provenanced<String>,
    pub paper_type: Provenanced<PaperType>,
}

impl PaperMeta {
    pub fn provenance(&self) -> ProvenanceReport {
        let mut report = ProvenanceReport::default();
        report.record("subject_code", self.subject_code.provenance);
        report.record("title", self.title.provenance);
        report.record("year", self.year.provenance);
        report.record("type", self.paper_type.provenance);
        report
    }
}

/// 从封面行中取科目代码、标题、学年和试卷类型
///
/// 标题行取最后一次匹配，学年取第一次匹配。
pub fn extract_paper_meta(lines: &[String]) -> PaperMeta {
    let mut meta = PaperMeta::default();

    for raw in lines.iter().take(COVER_SCAN_LINES) {
        let line = clean(raw);

        if let Some(caps) = COVER_TITLE.captures(&line) {
            meta.subject_code = Provenanced::matched(caps[1].to_uppercase());
            meta.title = Provenanced::matched(caps[2].trim().to_string());
        }

        if !meta.year.is_matched() {
            if let Some(caps) = ACADEMIC_YEAR.captures(&line) {
                meta.year = Provenanced::matched(caps[1].to_string());
            }
        }
    }

    if meta.title.is_matched() {
        meta.paper_type = Provenanced::matched(PaperType::classify(&meta.title.value));
    }

    meta
}
