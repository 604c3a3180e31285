/// 日志工具模块
///
/// 提供日志初始化以及日志格式化和输出的辅助函数
use crate::config::Config;
use std::borrow::Cow;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 默认过滤级别，`RUST_LOG` 优先
const DEFAULT_FILTER: &str = "paper_seed=info";
const VERBOSE_FILTER: &str = "paper_seed=debug";

/// 初始化日志订阅器
///
/// 日志写到 stderr，stdout 留给转换报告。重复调用时静默忽略。
pub fn init(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            VERBOSE_FILTER
        } else {
            DEFAULT_FILTER
        })
    });
    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 试卷文档转换模式");
    info!("📂 输入目录: {}", config.pdfs_dir);
    info!("📚 科目目录: {}", config.subjects_dir);
    info!("📝 试卷目录: {}", config.papers_dir);
    info!("{}", "=".repeat(60));
}

/// 记录文档加载信息
pub fn log_documents_loaded(total: usize) {
    info!("✓ 找到 {} 个待处理的文档", total);
    info!("💡 文档将逐个处理，单个失败不影响其他文档\n");
}

/// 一次批量运行的汇总数字
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinalStats<'a> {
    pub succeeded: usize,
    pub failed: usize,
    pub math_flags: usize,
    pub review_entries: usize,
    pub review_log_file: &'a str,
}

impl FinalStats<'_> {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }

    fn review_line(&self) -> String {
        match self.review_entries {
            0 => "📋 没有需要复核的文档".to_string(),
            n => format!("📋 {} 份文档需要复核，见 {}", n, self.review_log_file),
        }
    }
}

/// 打印最终统计信息
pub fn print_final_stats(stats: &FinalStats<'_>) {
    info!("\n{}", "=".repeat(60));
    info!(
        "📊 转换完成 ({})",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("✅ 成功: {}/{}", stats.succeeded, stats.total());
    if stats.failed > 0 {
        info!("❌ 失败: {}", stats.failed);
    }
    info!("🔢 数学标记: {}", stats.math_flags);
    info!("{}", stats.review_line());
    info!("{}", "=".repeat(60));
}

/// 单行日志预览：超过 `max_chars` 个字符时截断并以 `…` 结尾
pub fn preview(line: &str, max_chars: usize) -> Cow<'_, str> {
    match line.char_indices().nth(max_chars) {
        Some((cut, _)) => Cow::Owned(format!("{}…", &line[..cut])),
        None => Cow::Borrowed(line),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_cuts_on_char_boundaries() {
        assert_eq!(preview("试卷转换复核", 2), "试卷…");
        assert!(matches!(preview("short", 5), Cow::Borrowed("short")));
    }

    #[test]
    fn final_stats_mention_review_entries() {
        let stats = FinalStats {
            succeeded: 2,
            failed: 1,
            math_flags: 4,
            review_entries: 0,
            review_log_file: "seed/review.txt",
        };
        assert_eq!(stats.total(), 3);
        assert_eq!(stats.review_line(), "📋 没有需要复核的文档");

        let stats = FinalStats {
            review_entries: 2,
            ..stats
        };
        assert_eq!(stats.review_line(), "📋 2 份文档需要复核，见 seed/review.txt");
    }

    #[test]
    fn init_twice_does_not_panic() {
        init(false);
        init(true);
    }
}
