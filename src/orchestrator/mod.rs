//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量处理和流程调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量文档处理器
//! - 确定本次要处理的文档（单个文件或整个目录）
//! - 顺序处理每份文档，单份失败不影响其余文档
//! - 输出控制台报告和全局统计
//!
//! ### `paper_processor` - 单个文档处理器
//! - 提取文本、规范化行序列
//! - 调用 parser 得到科目与试卷
//! - 调用 services 合并科目、写出试卷、写复核日志
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<PathBuf>)
//!     ↓
//! paper_processor (处理单个文档)
//!     ↓
//! parser (纯函数：行序列 → 科目 / 试卷)
//!     ↓
//! services (能力层：extract / subject_store / paper_writer / review)
//! ```

pub mod batch_processor;
pub mod paper_processor;

// 重新导出主要类型
pub use batch_processor::{App, BatchSummary, DocumentOutcome};
pub use paper_processor::{convert_document, convert_lines, Conversion, ConversionReport};
