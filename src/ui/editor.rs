// ============================================================================
// FaqDesk - 编辑会话视图
// ============================================================================
//
// 文件: src/ui/editor.rs
// 职责: 语言标签栏与草稿内容的终端渲染、删除确认提示
// 边界:
//   - ✅ 标签栏（已保存/未保存/当前/有修改）
//   - ✅ 单个或全部草稿展示
//   - ✅ 删除确认交互
//   - ❌ 不应修改会话状态
//   - ❌ 不应包含网络请求
//
// ============================================================================

use colored::Colorize;
use std::io::{self, BufRead, Write};

use crate::core::session::{EditorSession, SessionMode};
use crate::models::locale::Locale;
use crate::models::record::{Draft, RecordSummary};
use crate::ui::table::truncate;
use crate::utils::colors::Colors;
use crate::utils::constants::{icons, SUMMARY_WIDTH};
use crate::utils::logger::Logger;
use crate::{t, tf};

/// 单个标签的文本
pub fn tab_label(draft: &Draft, active: bool, saved_this_session: bool) -> String {
    let marker = if draft.exists {
        icons::SAVED
    } else {
        icons::MISSING
    };
    let dirty = if draft.is_dirty() { icons::DIRTY } else { "" };
    let label = format!("{}{}{}", marker, draft.locale.code(), dirty);

    let label = if saved_this_session || draft.exists {
        Colors::green(&label)
    } else {
        Colors::dimmed(&label)
    };
    if active {
        format!("{}{}", icons::ACTIVE, label.bold())
    } else {
        format!(" {}", label)
    }
}

/// 渲染标签栏
pub fn render_tabs(session: &EditorSession) {
    let tabs = Locale::ALL
        .iter()
        .map(|locale| {
            tab_label(
                session.draft(*locale),
                session.active() == *locale,
                session.saved_locales().contains(locale),
            )
        })
        .collect::<Vec<_>>()
        .join(" ");
    Logger::plain(tabs);
}

/// 渲染会话标题
pub fn render_header(session: &EditorSession) {
    match session.mode() {
        SessionMode::New => Logger::plain(t!("show.new").bold().to_string()),
        SessionMode::Edit(id) => Logger::plain(tf!("show.title", id).bold().to_string()),
    }
}

/// 渲染单个草稿
pub fn render_draft(draft: &Draft) {
    let empty = Colors::dimmed(&t!("show.empty_field"));
    let field = |value: &str| {
        if value.trim().is_empty() {
            empty.clone()
        } else {
            value.to_string()
        }
    };
    Logger::plain(format!(
        "[{}] {}",
        draft.locale.code(),
        draft.locale.display_name()
    ));
    Logger::plain(format!("  Q: {}", field(&draft.question)));
    Logger::plain(format!("  A: {}", field(&draft.answer)));
}

/// 渲染会话中所有已保存或有修改的草稿
pub fn render_session(session: &EditorSession) {
    render_header(session);
    render_tabs(session);
    Logger::plain("───────────────────────────────────────");
    let mut shown = 0;
    for draft in session.drafts().iter() {
        if draft.exists || draft.is_dirty() {
            render_draft(draft);
            shown += 1;
        }
    }
    if shown == 0 {
        Logger::plain(Colors::dimmed(&t!("show.no_translations")));
    }
}

/// 从标准输入读取删除确认
pub fn confirm_delete(row: &RecordSummary) -> bool {
    print!(
        "{}",
        tf!(
            "delete.confirm",
            row.id,
            truncate(&row.question, SUMMARY_WIDTH)
        )
    );
    if io::stdout().flush().is_err() {
        return false;
    }

    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::DraftField;

    #[test]
    fn tab_label_marks_state() {
        colored::control::set_override(false);
        let mut draft = Draft::empty(Locale::Es);
        assert_eq!(tab_label(&draft, false, false), " ○es");

        draft.set_field(DraftField::Question, "¿Qué es X?".to_string());
        assert_eq!(tab_label(&draft, true, false), "▸○es*");

        draft.mark_persisted(None);
        assert_eq!(tab_label(&draft, false, true), " ●es");
    }
}
