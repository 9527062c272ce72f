// ============================================================================
// FaqDesk - CLI Delete 命令
// ============================================================================
//
// 文件: src/cli/delete.rs
// 职责: 确认后删除记录并重新加载列表
// 边界:
//   - ✅ 命令行参数定义和解析
//   - ✅ 删除确认（--yes 跳过）
//   - ❌ 不应包含删除请求细节
//
// ============================================================================

use anyhow::Result;
use clap::Args;
use std::sync::Arc;

use crate::cli::list::build_list_view;
use crate::cli::reported;
use crate::core::error::EditorError;
use crate::core::store::ContentStore;
use crate::models::config::Config;
use crate::models::record::{RecordId, RecordSummary};
use crate::ui::editor::confirm_delete;
use crate::utils::logger::Logger;
use crate::utils::spinner::Spinner;
use crate::{t, tf};

/// 删除命令参数
#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// 记录 ID
    pub id: String,

    /// 跳过确认
    #[arg(short, long)]
    pub yes: bool,
}

pub async fn handle_delete(args: DeleteArgs, store: Arc<dyn ContentStore>) -> Result<()> {
    let show_progress = Config::get_show_progress();
    let id = RecordId::new(args.id);

    let mut spinner = Spinner::start(t!("list.loading"), show_progress);
    let mut view = build_list_view(store, None, &spinner);
    let loaded = view.load().await;
    spinner.stop();
    loaded.map_err(|err| reported(err, "list.failed"))?;

    if view.find(&id).is_none() {
        anyhow::bail!(tf!("show.not_found", id));
    }

    let skip_prompt = args.yes;
    let confirmer = move |row: &RecordSummary| skip_prompt || confirm_delete(row);
    match view.delete(&id, &confirmer).await {
        Ok(()) => {
            Logger::info(tf!("delete.remaining", view.len()));
            Ok(())
        }
        Err(EditorError::Declined) => {
            Logger::info(t!("delete.declined"));
            Ok(())
        }
        Err(err) => Err(reported(err, "delete.failed")),
    }
}
