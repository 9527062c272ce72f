// ============================================================================
// FaqDesk - CLI List 命令
// ============================================================================
//
// 文件: src/cli/list.rs
// 职责: 分页列表命令的 CLI 接口层
// 边界:
//   - ✅ 命令行参数定义和解析
//   - ✅ 调用列表视图加载并渲染
//   - ❌ 不应包含覆盖率计算逻辑
//   - ❌ 不应包含分页计算
//
// ============================================================================

use anyhow::Result;
use clap::Args;
use std::sync::Arc;

use crate::cli::reported;
use crate::core::listing::{ListOptions, ListView};
use crate::core::notify::ConsoleNotifier;
use crate::core::store::ContentStore;
use crate::models::config::Config;
use crate::ui::table::render_list_page;
use crate::utils::logger::Logger;
use crate::utils::spinner::Spinner;
use crate::{t, tf};

/// 列表命令参数
#[derive(Debug, Args)]
pub struct ListArgs {
    /// 页码（从 1 开始）
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,

    /// 每页条数（覆盖配置）
    #[arg(long)]
    pub page_size: Option<usize>,

    /// 显示全部页
    #[arg(short, long)]
    pub all: bool,
}

/// 根据配置构建列表视图（配置未初始化时使用默认值）
pub(crate) fn build_list_view(
    store: Arc<dyn ContentStore>,
    page_size: Option<usize>,
    spinner: &Spinner,
) -> ListView {
    let config = Config::snapshot().unwrap_or_default();
    let mut options = ListOptions::from(&config.list);
    if let Some(size) = page_size {
        options.page_size = size;
    }
    options.request_timeout = config.api.timeout();
    options.progress_callback = spinner.progress_callback();
    ListView::new(store, Arc::new(ConsoleNotifier), options)
}

pub async fn handle_list(args: ListArgs, store: Arc<dyn ContentStore>) -> Result<()> {
    let mut spinner = Spinner::start(t!("list.loading"), Config::get_show_progress());
    let mut view = build_list_view(store, args.page_size, &spinner);
    let loaded = view.load().await;
    spinner.stop();
    loaded.map_err(|err| reported(err, "list.failed"))?;

    if view.is_empty() {
        Logger::info(t!("list.empty"));
        return Ok(());
    }

    if args.all {
        for page in 1..=view.page_count() {
            render_list_page(&view, page);
        }
        return Ok(());
    }

    if args.page == 0 || args.page > view.page_count() {
        anyhow::bail!(tf!("list.page_out_of_range", args.page, view.page_count()));
    }
    render_list_page(&view, args.page);
    Ok(())
}
