// ============================================================================
// FaqDesk - 翻译草稿缓存
// ============================================================================
//
// 文件: src/core/drafts.rs
// 职责: 编辑会话内每个语言一份草稿，以及当前标签页的切换
// 边界:
//   - ✅ 草稿初始化与种子数据填充
//   - ✅ 当前语言标签切换
//   - ✅ 单语言字段修改
//   - ❌ 不应包含网络请求
//   - ❌ 不应包含保存校验与错误提示
//
// ============================================================================

use std::collections::BTreeMap;

use crate::models::locale::Locale;
use crate::models::record::{Draft, DraftField, Translation};

/// 每个支持语言一份草稿
#[derive(Debug, Clone)]
pub struct DraftCache {
    drafts: BTreeMap<Locale, Draft>,
    active: Locale,
}

impl Default for DraftCache {
    fn default() -> Self {
        Self::empty()
    }
}

impl DraftCache {
    /// 所有语言均为空草稿，当前标签为第一个支持的语言
    pub fn empty() -> Self {
        Self {
            drafts: Locale::ALL
                .iter()
                .map(|locale| (*locale, Draft::empty(*locale)))
                .collect(),
            active: Locale::ALL[0],
        }
    }

    /// 使用服务端已有翻译初始化草稿
    ///
    /// 已保存的语言标记为 exists，其余语言保持空草稿。当前标签优先选择
    /// 默认语言，其次是按支持顺序的第一个已保存语言。
    pub fn seeded(translations: Vec<Translation>) -> Self {
        let mut cache = Self::empty();
        for translation in translations {
            cache
                .drafts
                .insert(translation.locale, Draft::from_translation(translation));
        }
        cache.active = if cache.drafts[&Locale::DEFAULT].exists {
            Locale::DEFAULT
        } else {
            cache
                .existing_locales()
                .first()
                .copied()
                .unwrap_or(Locale::ALL[0])
        };
        cache
    }

    pub fn active(&self) -> Locale {
        self.active
    }

    /// 切换当前标签，不影响任何草稿内容
    pub fn select(&mut self, locale: Locale) {
        self.active = locale;
    }

    pub fn draft(&self, locale: Locale) -> &Draft {
        &self.drafts[&locale]
    }

    pub fn active_draft(&self) -> &Draft {
        self.draft(self.active)
    }

    /// 只修改指定语言的草稿
    pub fn update(&mut self, locale: Locale, field: DraftField, value: impl Into<String>) {
        if let Some(draft) = self.drafts.get_mut(&locale) {
            draft.set_field(field, value.into());
        }
    }

    /// 标记语言已保存
    pub fn mark_saved(&mut self, locale: Locale, version: Option<String>) {
        if let Some(draft) = self.drafts.get_mut(&locale) {
            draft.mark_persisted(version);
        }
    }

    /// 已在服务端持久化的语言（按支持顺序）
    pub fn existing_locales(&self) -> Vec<Locale> {
        self.drafts
            .values()
            .filter(|draft| draft.exists)
            .map(|draft| draft.locale)
            .collect()
    }

    /// 有未保存修改的语言
    pub fn dirty_locales(&self) -> Vec<Locale> {
        self.drafts
            .values()
            .filter(|draft| draft.is_dirty())
            .map(|draft| draft.locale)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Draft> {
        self.drafts.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translation(locale: Locale, question: &str, answer: &str) -> Translation {
        Translation {
            locale,
            question: question.to_string(),
            answer: answer.to_string(),
            version: None,
        }
    }

    #[test]
    fn empty_cache_selects_first_locale() {
        let cache = DraftCache::empty();
        assert_eq!(cache.active(), Locale::En);
        assert_eq!(cache.iter().count(), Locale::ALL.len());
        assert!(cache.iter().all(|draft| !draft.exists));
    }

    #[test]
    fn seeding_marks_only_persisted_locales() {
        let cache = DraftCache::seeded(vec![
            translation(Locale::Es, "¿Qué es X?", "X es Y."),
            translation(Locale::En, "What is X?", "X is Y."),
        ]);
        assert_eq!(cache.active(), Locale::En);
        assert_eq!(cache.existing_locales(), vec![Locale::En, Locale::Es]);
        for locale in [Locale::It, Locale::De, Locale::Pt, Locale::Zh] {
            let draft = cache.draft(locale);
            assert!(!draft.exists);
            assert!(draft.question.is_empty());
        }
        assert_eq!(cache.draft(Locale::Es).answer, "X es Y.");
    }

    #[test]
    fn seeding_without_default_selects_first_existing() {
        let cache = DraftCache::seeded(vec![
            translation(Locale::Zh, "什么是 X？", "X 是 Y。"),
            translation(Locale::De, "Was ist X?", "X ist Y."),
        ]);
        assert_eq!(cache.active(), Locale::De);
    }

    #[test]
    fn switching_tabs_keeps_unsaved_edits() {
        let mut cache = DraftCache::empty();
        cache.select(Locale::It);
        cache.update(Locale::It, DraftField::Question, "Che cos'è X?");
        cache.select(Locale::Pt);
        cache.update(Locale::Pt, DraftField::Answer, "X é Y.");
        cache.select(Locale::It);

        assert_eq!(cache.active_draft().question, "Che cos'è X?");
        assert!(!cache.active_draft().exists);
        assert_eq!(cache.draft(Locale::Pt).answer, "X é Y.");
        assert_eq!(cache.dirty_locales(), vec![Locale::It, Locale::Pt]);
    }
}
