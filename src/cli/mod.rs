// ============================================================================
// FaqDesk - CLI 模块
// ============================================================================
//
// 文件: src/cli/mod.rs
// 职责: CLI 命令行接口模块入口和路由
// 边界:
//   - ✅ CLI 结构定义和命令枚举
//   - ✅ 命令行参数解析配置
//   - ✅ 命令路由分发
//   - ✅ 内容存储的构建
//   - ❌ 不应包含具体命令实现逻辑
//   - ❌ 不应包含业务逻辑处理
//
// ============================================================================

pub mod delete;
pub mod edit;
pub mod init;
pub mod list;
pub mod save;
pub mod show;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use crate::core::error::EditorError;
use crate::core::memory::MemoryContentStore;
use crate::core::store::{ContentStore, HttpContentStore};
use crate::models::config::{Config, CoverageMode, RuntimeArgs};
use crate::models::locale::Locale;
use crate::t;
use crate::utils::colors::Colors;
use crate::utils::logger::Logger;
use delete::{handle_delete, DeleteArgs};
use edit::{handle_edit, EditArgs};
use init::{handle_init, InitArgs};
use list::{handle_list, ListArgs};
use save::{handle_save, SaveArgs};
use show::{handle_show, ShowArgs};

/// FaqDesk - Multi-locale FAQ content admin
#[derive(Debug, Parser)]
#[command(name = "faqdesk")]
#[command(about = "Manage multi-locale FAQ content through the site admin API")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Global verbose mode
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Interface language (zh_cn, en_us)
    #[arg(short, long, global = true)]
    pub language: Option<String>,

    /// Config file path (default: faqdesk.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Site base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Admin resource name (/api/admin/<resource>)
    #[arg(long, global = true)]
    pub resource: Option<String>,

    /// Bearer token for the admin API
    #[arg(long, global = true, env = "FAQDESK_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Request timeout (seconds, 0 = client default)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Locale coverage strategy (batched, per_record)
    #[arg(long, global = true)]
    pub coverage: Option<CoverageMode>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Disable progress spinner
    #[arg(long, global = true)]
    pub no_progress: bool,

    /// Use an in-memory store seeded with a sample record (changes are not kept)
    #[arg(long, global = true)]
    pub offline: bool,

    /// Commands
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Initialize configuration file
    Init(InitArgs),
    /// List records with their locale coverage
    List(ListArgs),
    /// Show all translations of a record
    Show(ShowArgs),
    /// Save one locale of a record (creates the record when no id is given)
    Save(SaveArgs),
    /// Delete a record and all its translations
    Delete(DeleteArgs),
    /// Interactive multi-locale editor
    Edit(EditArgs),
}

pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    Logger::init_tracing(cli.verbose);
    Config::initialize(cli.config.as_deref())?;

    // Build runtime args to override config
    let runtime_args = build_runtime_args(&cli);
    Config::merge_runtime_args(runtime_args)?;
    Colors::set_enabled(Config::get_colored());

    let offline = cli.offline;
    match cli.command {
        Commands::Init(args) => handle_init(args, cli.config),
        Commands::List(args) => handle_list(args, open_store(offline)?).await,
        Commands::Show(args) => handle_show(args, open_store(offline)?).await,
        Commands::Save(args) => handle_save(args, open_store(offline)?).await,
        Commands::Delete(args) => handle_delete(args, open_store(offline)?).await,
        Commands::Edit(args) => handle_edit(args, open_store(offline)?).await,
    }
}

/// Build runtime args from CLI arguments
fn build_runtime_args(cli: &Cli) -> RuntimeArgs {
    RuntimeArgs {
        verbose: if cli.verbose { Some(true) } else { None },
        colored: if cli.no_color { Some(false) } else { None },
        show_progress: if cli.no_progress { Some(false) } else { None },
        base_url: cli.base_url.clone(),
        resource: cli.resource.clone(),
        token: cli.token.clone(),
        timeout_secs: cli.timeout,
        page_size: None,
        coverage: cli.coverage,
        language: cli.language.clone(),
    }
}

/// 错误详情已由 notifier 输出，命令只返回失败摘要
pub(crate) fn reported(err: EditorError, summary_key: &str) -> anyhow::Error {
    tracing::debug!(error = %err, "command failed");
    anyhow::anyhow!(t!(summary_key))
}

/// 离线存储：带一条示例记录，便于在没有服务端时试用各命令
fn offline_store() -> MemoryContentStore {
    let store = MemoryContentStore::new();
    store.seed(&[
        (
            Locale::En,
            "What is FaqDesk?",
            "A command line editor for multi-language FAQ content.",
        ),
        (
            Locale::Es,
            "¿Qué es FaqDesk?",
            "Un editor de línea de comandos para contenido FAQ multilingüe.",
        ),
    ]);
    store
}

/// 构建内容存储
fn open_store(offline: bool) -> Result<Arc<dyn ContentStore>> {
    if offline {
        Logger::warn(t!("offline.notice"));
        return Ok(Arc::new(offline_store()));
    }
    let config = Config::snapshot()?;
    let store = HttpContentStore::new(&config.api)?;
    tracing::debug!(endpoint = %store.endpoint(), "using admin api");
    Ok(Arc::new(store))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn save_arguments_parse() {
        let cli = Cli::parse_from([
            "faqdesk",
            "--base-url",
            "https://cloudmlmsoftware.com",
            "save",
            "--locale",
            "es",
            "--question",
            "¿Qué es X?",
            "--answer",
            "X es Y.",
            "--id",
            "12",
        ]);
        let runtime = build_runtime_args(&cli);
        assert_eq!(
            runtime.base_url.as_deref(),
            Some("https://cloudmlmsoftware.com")
        );
        match cli.command {
            Commands::Save(args) => {
                assert_eq!(args.locale, Locale::Es);
                assert_eq!(args.id.as_deref(), Some("12"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[tokio::test]
    async fn offline_store_lists_a_sample_record() {
        let store = offline_store();
        let rows = store.list(Locale::En).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].question, "What is FaqDesk?");

        let translations = store.translations(&rows[0].id).await.unwrap();
        let locales: Vec<Locale> = translations.iter().map(|t| t.locale).collect();
        assert_eq!(locales, vec![Locale::En, Locale::Es]);
    }

    #[tokio::test]
    async fn offline_delete_removes_the_sample() {
        let store: Arc<dyn ContentStore> = Arc::new(offline_store());
        let args = DeleteArgs {
            id: "1".to_string(),
            yes: true,
        };
        handle_delete(args, store.clone()).await.unwrap();
        assert!(store.list(Locale::En).await.unwrap().is_empty());
    }

}
