use anyhow::Result;
use clap::Parser;
use paper_seed::{utils::logging, App, Config};
use std::path::PathBuf;
use std::process::ExitCode;

/// 把试卷文档转换为科目 / 试卷 JSON
#[derive(Debug, Parser)]
#[command(name = "paper_seed", version, about)]
struct Cli {
    /// 单个输入文件；省略时处理 `pdfs_dir` 下的所有 .pdf / .txt
    input: Option<PathBuf>,

    /// TOML 配置文件，环境变量会覆盖其中的值
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// 返回是否所有文档都转换成功
async fn run(cli: Cli) -> Result<bool> {
    let config = Config::load(cli.config.as_deref())?;
    logging::init(config.verbose_logging);

    let app = App::initialize(config).await?;
    let summary = match app.run(cli.input).await {
        Ok(summary) => summary,
        // 没有可处理的输入：只打印原因，不带错误链
        Err(e) if e.is_fatal() => {
            eprintln!("{}", e);
            return Ok(false);
        }
        Err(e) => return Err(e.into()),
    };

    Ok(!summary.has_failures())
}
