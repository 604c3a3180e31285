use crate::error::{AppResult, ConfigError};
use serde::Deserialize;
use std::path::Path;

/// 程序配置文件
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// 待转换文档所在目录（批量模式）
    pub pdfs_dir: String,
    /// 科目 JSON 输出目录
    pub subjects_dir: String,
    /// 试卷 JSON 输出目录
    pub papers_dir: String,
    /// 试卷默认价格（最小货币单位）
    pub default_price: u32,
    /// 试卷默认是否免费
    pub is_free: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 人工复核日志文件
    pub review_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pdfs_dir: "seed/pdfs".to_string(),
            subjects_dir: "seed/subjects".to_string(),
            papers_dir: "seed/papers".to_string(),
            default_price: 4900,
            is_free: false,
            verbose_logging: false,
            review_log_file: "seed/review.txt".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 先读取可选的 TOML 配置文件，再叠加环境变量
    pub fn load(config_file: Option<&Path>) -> AppResult<Self> {
        match config_file {
            Some(path) => Ok(Self::from_toml_file(path)?.with_env_overrides()),
            None => Ok(Self::from_env()),
        }
    }

    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;
        let config = toml::from_str(&content).map_err(|source| ConfigError::TomlParseFailed {
            path: path.display().to_string(),
            source,
        })?;
        Ok(config)
    }

    fn with_env_overrides(self) -> Self {
        Self {
            pdfs_dir: std::env::var("PDFS_DIR").unwrap_or(self.pdfs_dir),
            subjects_dir: std::env::var("SUBJECTS_DIR").unwrap_or(self.subjects_dir),
            papers_dir: std::env::var("PAPERS_DIR").unwrap_or(self.papers_dir),
            default_price: std::env::var("DEFAULT_PRICE").ok().and_then(|v| v.parse().ok()).unwrap_or(self.default_price),
            is_free: std::env::var("PAPER_IS_FREE").ok().and_then(|v| v.parse().ok()).unwrap_or(self.is_free),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(self.verbose_logging),
            review_log_file: std::env::var("REVIEW_LOG_FILE").unwrap_or(self.review_log_file),
        }
    }

    /// 以给定根目录重设所有输出路径（测试与临时运行使用）
    pub fn rooted_at(root: &Path) -> Self {
        let join = |p: &str| root.join(p).to_string_lossy().to_string();
        Self {
            pdfs_dir: join("pdfs"),
            subjects_dir: join("subjects"),
            papers_dir: join("papers"),
            review_log_file: join("review.txt"),
            ..Self::default()
        }
    }
}
