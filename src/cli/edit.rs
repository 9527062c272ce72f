// ============================================================================
// FaqDesk - CLI Edit 命令
// ============================================================================
//
// 文件: src/cli/edit.rs
// 职责: 交互式多语言编辑（标签切换、字段修改、保存、删除）
// 边界:
//   - ✅ 交互命令解析
//   - ✅ 会话操作分发与结果展示
//   - ❌ 不应包含草稿状态管理
//   - ❌ 不应包含 HTTP 细节
//
// ============================================================================

use anyhow::Result;
use clap::Args;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::core::error::EditorError;
use crate::core::notify::ConsoleNotifier;
use crate::core::session::{EditorSession, LoadStatus};
use crate::core::store::ContentStore;
use crate::models::locale::Locale;
use crate::models::record::{DraftField, RecordId};
use crate::ui::editor::{render_draft, render_session, render_tabs};
use crate::utils::logger::Logger;
use crate::{t, tf};

/// 编辑命令参数
#[derive(Debug, Args)]
pub struct EditArgs {
    /// 要编辑的记录 ID（不指定则新建）
    #[arg(long)]
    pub id: Option<String>,
}

/// 交互命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    Tab(Locale),
    Set(DraftField, String),
    Show,
    Tabs,
    Save,
    Delete,
    Help,
    Quit,
}

/// 解析一行交互输入
pub fn parse_command(line: &str) -> Result<Option<EditCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    let command = match head.to_lowercase().as_str() {
        "tab" | "t" => EditCommand::Tab(rest.parse::<Locale>()?),
        "question" | "q" => EditCommand::Set(DraftField::Question, rest.to_string()),
        "answer" | "a" => EditCommand::Set(DraftField::Answer, rest.to_string()),
        "show" | "p" => EditCommand::Show,
        "tabs" | "ls" => EditCommand::Tabs,
        "save" | "s" => EditCommand::Save,
        "delete" | "rm" => EditCommand::Delete,
        "help" | "?" => EditCommand::Help,
        "quit" | "exit" | ":q" => EditCommand::Quit,
        other => return Err(tf!("edit.unknown_command", other)),
    };
    Ok(Some(command))
}

fn prompt(session: &EditorSession) {
    print!("{}", tf!("edit.prompt", session.active()));
    let _ = std::io::stdout().flush();
}

pub async fn handle_edit(args: EditArgs, store: Arc<dyn ContentStore>) -> Result<()> {
    let (mut session, status) = EditorSession::open(
        store,
        Arc::new(ConsoleNotifier),
        args.id.map(RecordId::new),
    )
    .await;
    if let LoadStatus::Loaded(locales) = &status {
        tracing::debug!(?locales, "editing existing record");
    }

    Logger::plain(t!("edit.help"));
    render_session(&session);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt(&session);
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                Logger::warn(message);
                continue;
            }
        };

        match command {
            EditCommand::Tab(locale) => {
                session.select(locale);
                render_tabs(&session);
                render_draft(session.draft(locale));
            }
            EditCommand::Set(field, value) => {
                let locale = session.active();
                session.update(locale, field, value);
                Logger::info(tf!("edit.field_updated", field, locale));
            }
            EditCommand::Show => render_draft(session.draft(session.active())),
            EditCommand::Tabs => render_session(&session),
            EditCommand::Save => {
                // 错误已通过 notifier 展示，草稿保留以便重试
                if session.save().await.is_ok() {
                    render_tabs(&session);
                }
            }
            EditCommand::Delete => {
                if session.record_id().is_none() {
                    Logger::warn(EditorError::NotPersisted.to_string());
                    continue;
                }
                print!("{}", t!("edit.confirm_delete"));
                let _ = std::io::stdout().flush();
                let confirmed = lines
                    .next_line()
                    .await?
                    .map(|answer| matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
                    .unwrap_or(false);
                if !confirmed {
                    Logger::info(t!("delete.declined"));
                    continue;
                }
                if session.delete().await.is_ok() {
                    render_session(&session);
                }
            }
            EditCommand::Help => Logger::plain(t!("edit.help")),
            EditCommand::Quit => break,
        }
    }

    let discarded = session.close();
    if !discarded.is_empty() {
        let codes: Vec<&str> = discarded.iter().map(Locale::code).collect();
        Logger::warn(tf!("edit.unsaved_discarded", codes.join(", ")));
    }
    Ok(())
}
