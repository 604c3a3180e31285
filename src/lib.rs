//! # Paper Seed
//!
//! 把考试试卷文档（PDF 或已提取的纯文本）转换为结构化的科目 JSON 与试卷 JSON，
//! 用作题库的种子数据。
//!
//! ## 架构设计
//!
//! ### ① 数据模型层（Models）
//! - `models/` - `Subject`、`Paper`、`Question`、`Answer` 以及字段来源标记
//! - `models/loaders` - 输入文件发现与 JSON 记录读取
//!
//! ### ② 解析层（Parser）
//! - `parser/` - 纯函数：行序列 → 科目信息、封面元数据、分组、题目与答案
//! - `lines` - 把行转换为类型化事件，由各分组的状态机按游标消费
//!
//! ### ③ 业务能力层（Services）
//! - `TextExtractor` - 文档字节 → 文本
//! - `SubjectStore` - 科目读取、合并、写回
//! - `PaperWriter` - 试卷写出
//! - `ReviewWriter` - 写 review.txt 能力
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量处理，逐个文档隔离失败
//! - `orchestrator/paper_processor` - 单个文档的完整转换流程

pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod parser;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{Answer, Paper, Question, Subject};
pub use orchestrator::{App, BatchSummary, ConversionReport};
