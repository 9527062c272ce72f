// ============================================================================
// FaqDesk - 列表表格组件
// ============================================================================
//
// 文件: src/ui/table.rs
// 职责: 分页列表与语言覆盖徽标的终端渲染
// 边界:
//   - ✅ 单页表格渲染
//   - ✅ 语言徽标格式化
//   - ✅ 国际化文本支持
//   - ❌ 不应包含网络请求
//   - ❌ 不应包含分页计算
//
// ============================================================================

use colored::Colorize;
use std::collections::BTreeSet;

use crate::core::listing::{ListRow, ListView};
use crate::models::locale::Locale;
use crate::utils::colors::Colors;
use crate::utils::constants::{icons, SUMMARY_WIDTH};
use crate::utils::logger::Logger;
use crate::{t, tf};

/// 语言徽标，按支持顺序排列：已保存为绿色实心，未保存为灰色空心
pub fn locale_badges(locales: &BTreeSet<Locale>) -> String {
    Locale::ALL
        .iter()
        .map(|locale| {
            if locales.contains(locale) {
                Colors::green(&format!("{}{}", icons::SAVED, locale.code()))
            } else {
                Colors::dimmed(&format!("{}{}", icons::MISSING, locale.code()))
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// 截断过长的文本（按字符计）
pub fn truncate(text: &str, width: usize) -> String {
    let single_line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if single_line.chars().count() <= width {
        return single_line;
    }
    let kept: String = single_line.chars().take(width.saturating_sub(1)).collect();
    format!("{}…", kept)
}

fn render_row(row: &ListRow, id_width: usize) {
    let question = if row.summary.question.trim().is_empty() {
        Colors::dimmed(&t!("list.no_default_copy"))
    } else {
        truncate(&row.summary.question, SUMMARY_WIDTH)
    };
    Logger::plain(format!(
        "  {:<id_width$}  {}  {}",
        row.id().as_str(),
        locale_badges(&row.locales),
        question,
        id_width = id_width
    ));
}

/// 渲染列表的第 `page` 页
pub fn render_list_page(view: &ListView, page: usize) {
    if view.is_empty() {
        Logger::info(t!("list.empty"));
        return;
    }

    let rows = view.page(page);
    let id_width = view
        .rows()
        .iter()
        .map(|row| row.id().as_str().chars().count())
        .max()
        .unwrap_or(2)
        .max(2);

    Logger::plain("");
    Logger::plain(
        tf!("list.header", page, view.page_count(), view.len())
            .bold()
            .to_string(),
    );
    Logger::plain("═══════════════════════════════════════");
    Logger::plain(format!(
        "  {:<id_width$}  {}",
        "ID",
        t!("list.columns"),
        id_width = id_width
    ));
    Logger::plain("───────────────────────────────────────");
    for row in rows {
        render_row(row, id_width);
    }
    Logger::plain("");
    Logger::plain(Colors::dimmed(&t!("list.legend")));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("What is X?", 48), "What is X?");
        assert_eq!(truncate("¿Qué   es\nX?", 48), "¿Qué es X?");
        assert_eq!(truncate("abcdefgh", 5), "abcd…");
    }

    #[test]
    fn badges_list_every_supported_locale() {
        colored::control::set_override(false);
        let locales: BTreeSet<Locale> = [Locale::En, Locale::Zh].into_iter().collect();
        assert_eq!(locale_badges(&locales), "●en ○es ○it ○de ○pt ●zh");
    }
}
