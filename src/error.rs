use std::path::PathBuf;
use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 输入文件相关错误（整批终止）
    #[error("输入错误: {0}")]
    Input(#[from] InputError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 文本提取失败
    #[error("文本提取失败 ({path}): {source}")]
    Extraction {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// JSON 序列化/解析失败
    #[error("JSON错误 ({path}): {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
    /// 试卷内容错误
    #[error("试卷错误: {0}")]
    Paper(#[from] PaperError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 输入错误
#[derive(Debug, Error)]
pub enum InputError {
    /// 目录中没有可处理的文件
    #[error("目录 {} 中没有找到可处理的文件 (.pdf / .txt)", .dir.display())]
    NoInputFiles { dir: PathBuf },
    /// 指定的文件不存在
    #[error("文件不存在: {}", .path.display())]
    NotFound { path: PathBuf },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        source: std::io::Error,
    },
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        source: std::io::Error,
    },
    #[error("创建目录失败 ({path}): {source}")]
    CreateDirFailed {
        path: String,
        source: std::io::Error,
    },
}

/// 试卷内容错误
#[derive(Debug, Error)]
pub enum PaperError {
    /// 封面与正文都没有识别出科目代码
    #[error("无法识别科目代码: {source_name}")]
    MissingSubjectCode { source_name: String },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 配置文件读取失败
    #[error("无法读取配置文件 {path}: {source}")]
    ReadFailed {
        path: String,
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        source: toml::de::Error,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建目录创建错误
    pub fn create_dir_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::CreateDirFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建文本提取错误
    pub fn extraction_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Extraction {
            path: path.into(),
            source: Box::new(source),
        }
    }

    /// 创建 JSON 错误
    pub fn json(path: impl Into<String>, source: serde_json::Error) -> Self {
        AppError::Json {
            path: path.into(),
            source,
        }
    }

    /// 是否为整批终止的输入错误
    pub fn is_fatal(&self) -> bool {
        matches!(self, AppError::Input(_) | AppError::Config(_))
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
