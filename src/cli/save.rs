// ============================================================================
// FaqDesk - CLI Save 命令
// ============================================================================
//
// 文件: src/cli/save.rs
// 职责: 非交互地保存某条记录的一个语言
// 边界:
//   - ✅ 命令行参数定义和解析
//   - ✅ 打开会话、填写草稿并保存
//   - ❌ 不应包含校验规则
//   - ❌ 不应包含 HTTP 细节
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
use crate::models::locale::Locale;
use crate::models::record::{DraftField, RecordId};
use crate::utils::logger::Logger;
use crate::utils::spinner::Spinner;
use crate::tf;

/// 保存命令参数
#[derive(Debug, Args)]
pub struct SaveArgs {
    /// 记录 ID（不指定则创建新记录）
    #[arg(long)]
    pub id: Option<String>,

    /// 语言代码 (en, es, it, de, pt, zh)
    #[arg(short = 'L', long, default_value = "en")]
    pub locale: Locale,

    /// 问题
    #[arg(short, long)]
    pub question: String,

    /// 回答
    #[arg(short, long)]
    pub answer: String,
}

pub async fn handle_save(args: SaveArgs, store: Arc<dyn ContentStore>) -> Result<()> {
    let show_progress = Config::get_show_progress();
    let notifier = Arc::new(ConsoleNotifier);

    let mut session = match args.id {
        Some(id) => {
            let mut spinner = Spinner::start(tf!("show.loading", &id), show_progress);
            let (session, status) =
                EditorSession::open(store, notifier, Some(RecordId::new(id.clone()))).await;
            spinner.stop();
            if let LoadStatus::NotFound = status {
                anyhow::bail!(tf!("show.not_found", id));
            }
            session
        }
        None => EditorSession::new(store, notifier),
    };

    session.select(args.locale);
    session.update(args.locale, DraftField::Question, args.question);
    session.update(args.locale, DraftField::Answer, args.answer);

    let mut spinner = Spinner::start(tf!("save.start", args.locale), show_progress);
    let outcome = session.save().await;
    spinner.stop();
    let outcome = outcome.map_err(|err| reported(err, "save.failed"))?;

    if outcome.created {
        Logger::info(tf!("save.next_locale_hint", outcome.id));
    }
    session.close();
    Ok(())
}
