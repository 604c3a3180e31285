//! 字段来源标记
//!
//! 抽取器对每个字段记录“从文本中匹配到”还是“使用了默认值”，
//! 便于复核时区分可靠数据与猜测值。该信息不写入 JSON。

use indexmap::IndexMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    Matched,
    Defaulted,
}

impl Provenance {
    pub fn from_matched(matched: bool) -> Self {
        if matched {
            Provenance::Matched
        } else {
            Provenance::Defaulted
        }
    }
}

/// 带来源标记的值
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provenanced<T> {
    pub value: T,
    pub provenance: Provenance,
}

impl<T> Provenanced<T> {
    pub fn matched(value: T) -> Self {
        Self {
            value,
            provenance: Provenance::Matched,
        }
    }

    pub fn defaulted(value: T) -> Self {
        Self {
            value,
            provenance: Provenance::Defaulted,
        }
    }

    pub fn is_matched(&self) -> bool {
        self.provenance == Provenance::Matched
    }
}

impl<T: Default> Default for Provenanced<T> {
    fn default() -> Self {
        Self::defaulted(T::default())
    }
}

/// 字段名 → 来源，保持插入顺序
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProvenanceReport {
    fields: IndexMap<String, Provenance>,
}

impl ProvenanceReport {
    pub fn record(&mut self, field: impl Into<String>, provenance: Provenance) {
        self.fields.insert(field.into(), provenance);
    }

    pub fn get(&self, field: &str) -> Option<Provenance> {
        self.fields.get(field).copied()
    }

    /// 使用默认值的字段
    pub fn defaulted(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|(_, p)| **p == Provenance::Defaulted)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// 合并另一份报告，字段名加上前缀
    pub fn extend_prefixed(&mut self, prefix: &str, other: &ProvenanceReport) {
        for (name, provenance) in &other.fields {
            self.record(format!("{}.{}", prefix, name), *provenance);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaulted_lists_only_guessed_fields_in_order() {
        let mut report = ProvenanceReport::default();
        report.record("code", Provenance::Matched);
        report.record("name", Provenance::Defaulted);
        report.record("college", Provenance::Defaulted);
        assert_eq!(report.defaulted(), vec!["name", "college"]);
        assert_eq!(report.get("code"), Some(Provenance::Matched));
    }

    #[test]
    fn prefixed_merge() {
        let mut inner = ProvenanceReport::default();
        inner.record("year", Provenance::Defaulted);
        let mut outer = ProvenanceReport::default();
        outer.extend_prefixed("paper", &inner);
        assert_eq!(outer.defaulted(), vec!["paper.year"]);
    }
}
