//! # Post List Viewer - 应用核心初始化模块
//!
//! 本模块负责应用的完整初始化流程，包括：
//! - 解析命令行参数
//! - 初始化日志（`env_logger`，输出到 stderr）
//! - 加载配置并创建 API 客户端
//! - 创建单线程 tokio runtime 并启动事件循环
//!
//! ## 架构说明
//! 核心逻辑放在 `lib.rs` 而非 `main.rs` 中，`main.rs` 只调用 `run()`，
//! 测试可以直接驱动 `app::App`。
//!
//! ## 模块结构
//! - `app` - 事件循环（过滤输入 + 请求完成事件）
//! - `commands` - 配置加载和后台请求派发
//! - `models` - 数据模型（文章、显示层、配置）
//! - `services` - 核心业务逻辑（API、过滤、列表控制器、条目注册表、渲染）
//! - `utils` - 通用工具函数
//! - `error` - 错误类型

pub mod app;
pub mod commands;
pub mod error;
pub mod models;
pub mod services;
mod utils;

use std::path::PathBuf;

use clap::Parser;

use app::App;
use commands::settings::{apply_overrides, load_config};
use error::RunError;
use services::api::PostsClient;

/// 命令行参数
#[derive(Debug, Parser)]
#[command(name = "post-list-viewer", version, about = "按标题单词过滤并浏览文章列表")]
pub struct Cli {
    /// 配置文件路径（默认 ~/.mo/PostListViewer/config.json）
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// 覆盖配置中的 API 根地址
    #[arg(long)]
    pub base_url: Option<String>,

    /// 过滤文本（单次模式使用；交互模式下从 stdin 逐行读取）
    #[arg(long, default_value = "")]
    pub filter: String,

    /// 单次模式：渲染一次后退出
    #[arg(long)]
    pub once: bool,
}

/// 应用启动函数
///
/// 1. 解析命令行参数
/// 2. 初始化日志：调试构建默认 info，发布构建默认 warn，可用 `RUST_LOG` 覆盖
/// 3. 创建单线程 runtime，运行事件循环
///
/// 启动失败（配置错误、HTTP 客户端无法创建）时在 stderr 输出错误并以退出码 1 结束。
pub fn run() {
    let cli = Cli::parse();

    let default_level = if cfg!(debug_assertions) { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("创建运行时失败: {}", e);
            std::process::exit(1);
        }
    };

    let result = runtime.block_on(start(cli));
    // stdin 读取占用阻塞线程，直接后台关闭，不等待其返回
    runtime.shutdown_background();

    if let Err(e) = result {
        log::error!("{}", e);
        eprintln!("错误: {}", e);
        std::process::exit(1);
    }
}

async fn start(cli: Cli) -> Result<(), RunError> {
    let config = load_config(cli.config.as_deref()).await?;
    let config = apply_overrides(config, cli.base_url);
    log::info!("API 根地址: {}", config.api_base_url);

    let client = PostsClient::new(&config)?;
    let mut app = App::new(client, std::io::stdout());

    if cli.once {
        app.run_once(&cli.filter).await?;
    } else {
        let input = tokio::io::BufReader::new(tokio::io::stdin());
        if !cli.filter.is_empty() {
            app.set_filter(&cli.filter);
        }
        app.run_interactive(input).await?;
    }

    Ok(())
}
