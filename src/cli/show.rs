// ============================================================================
// FaqDesk - CLI Show 命令
// ============================================================================
//
// 文件: src/cli/show.rs
// 职责: 显示单条记录全部翻译
// 边界:
//   - ✅ 命令行参数定义和解析
//   - ✅ 打开编辑会话并渲染草稿
//   - ❌ 不应修改记录
//
// ============================================================================

use anyhow::Result;
use clap::Args;
use std::sync::Arc;

use crate::cli::reported;
use crate::core::notify::ConsoleNotifier;
use crate::core::session::{EditorSession, LoadStatus};
use crate::core::store::ContentStore;
use crate::models::config::Config;
use crate::models::record::RecordId;
use crate::ui::editor::render_session;
use crate::utils::spinner::Spinner;
use crate::tf;

/// 显示命令参数
#[derive(Debug, Args)]
pub struct ShowArgs {
    /// 记录 ID
    pub id: String,
}

pub async fn handle_show(args: ShowArgs, store: Arc<dyn ContentStore>) -> Result<()> {
    let mut spinner = Spinner::start(tf!("show.loading", &args.id), Config::get_show_progress());
    let (session, status) = EditorSession::open(
        store,
        Arc::new(ConsoleNotifier),
        Some(RecordId::new(args.id.clone())),
    )
    .await;
    spinner.stop();

    match status {
        LoadStatus::NotFound => anyhow::bail!(tf!("show.not_found", args.id)),
        LoadStatus::Failed(err) => return Err(reported(err, "show.failed")),
        LoadStatus::Fresh | LoadStatus::Loaded(_) => {}
    }

    render_session(&session);
    session.close();
    Ok(())
}
