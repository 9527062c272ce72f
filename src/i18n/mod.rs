// ============================================================================
// FaqDesk - 国际化模块
// ============================================================================
//
// 文件: src/i18n/mod.rs
// 职责: 国际化支持和翻译管理
// 边界:
//   - ✅ 翻译表初始化和管理
//   - ✅ 翻译宏定义和实现
//   - ✅ 语言切换支持
//   - ✅ 参数化翻译支持
//   - ❌ 不应包含具体翻译内容
//   - ❌ 不应包含业务逻辑
//   - ❌ 不应与内容语言（Locale）混用
//
// ============================================================================

pub mod en_us;
pub mod zh_cn;

/// 获取翻译文本
pub fn get_translation(key: &str) -> String {
    // 每次都从配置获取语言设置
    let language = get_language_from_config().unwrap_or_else(|| "en_us".to_string());

    lookup(table_for(&language), key)
        // 当前语言缺少的键回退到英文
        .or_else(|| lookup(en_us::TRANSLATIONS, key))
        .map(str::to_string)
        .unwrap_or_else(|| format!("Unknown translation key: {}", key))
}

/// 按界面语言选择翻译表
fn table_for(language: &str) -> &'static [(&'static str, &'static str)] {
    match language.to_lowercase().replace('-', "_").as_str() {
        "zh_cn" | "zh" => zh_cn::TRANSLATIONS,
        _ => en_us::TRANSLATIONS,
    }
}

fn lookup(table: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// 从配置获取语言设置
fn get_language_from_config() -> Option<String> {
    use crate::models::config::Config;

    Config::get_language().ok()
}

/// 简单翻译宏
#[macro_export]
macro_rules! t {
    ($key:expr) => {
        $crate::i18n::get_translation($key)
    };
}

/// 带参数翻译的辅助函数
pub fn format_with_args(template: String, args: Vec<String>) -> String {
    let mut result = template;
    for arg in args.iter() {
        // 替换第一个 {} 占位符
        if let Some(pos) = result.find("{}") {
            result.replace_range(pos..pos + 2, arg);
        }
    }
    result
}

/// 带参数的翻译宏
#[macro_export]
macro_rules! tf {
    ($key:expr, $($arg:expr),*) => {{
        let template = $crate::i18n::get_translation($key);
        let args = vec![$(format!("{}", $arg)),*];
        $crate::i18n::format_with_args(template, args)
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn tables_define_the_same_keys() {
        let en: HashSet<&str> = en_us::TRANSLATIONS.iter().map(|(k, _)| *k).collect();
        let zh: HashSet<&str> = zh_cn::TRANSLATIONS.iter().map(|(k, _)| *k).collect();
        assert_eq!(en, zh);
        assert_eq!(en.len(), en_us::TRANSLATIONS.len(), "duplicate keys");
    }

    #[test]
    fn placeholders_are_filled_in_order() {
        let text = format_with_args(
            "Saved {} translation of record {}".to_string(),
            vec!["es".to_string(), "42".to_string()],
        );
        assert_eq!(text, "Saved es translation of record 42");
    }

    #[test]
    fn language_aliases_resolve() {
        assert_eq!(lookup(table_for("zh-CN"), "list.empty"), lookup(zh_cn::TRANSLATIONS, "list.empty"));
        assert_eq!(lookup(table_for("fr"), "list.empty"), lookup(en_us::TRANSLATIONS, "list.empty"));
    }
}
