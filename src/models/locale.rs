// ============================================================================
// FaqDesk - 语言区域模型
// ============================================================================
//
// 文件: src/models/locale.rs
// 职责: 内容支持的语言区域枚举定义
// 边界:
//   - ✅ 固定的语言区域集合及其顺序
//   - ✅ 语言代码解析与显示
//   - ✅ 序列化为小写代码
//   - ❌ 不应包含界面语言（i18n）逻辑
//   - ❌ 不应包含网络请求
//
// ============================================================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 内容语言区域（与服务端共享的固定集合）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    Es,
    It,
    De,
    Pt,
    Zh,
}

impl Locale {
    /// 所有支持的语言区域，顺序即标签页顺序
    pub const ALL: [Locale; 6] = [
        Locale::En,
        Locale::Es,
        Locale::It,
        Locale::De,
        Locale::Pt,
        Locale::Zh,
    ];

    /// 默认语言区域，列表视图使用该语言的内容作为摘要
    pub const DEFAULT: Locale = Locale::En;

    /// 获取语言代码
    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Es => "es",
            Locale::It => "it",
            Locale::De => "de",
            Locale::Pt => "pt",
            Locale::Zh => "zh",
        }
    }

    /// 获取语言的显示名称
    pub fn display_name(&self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::Es => "Español",
            Locale::It => "Italiano",
            Locale::De => "Deutsch",
            Locale::Pt => "Português",
            Locale::Zh => "中文",
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale::DEFAULT
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|locale| locale.code() == code)
            .ok_or_else(|| {
                let supported: Vec<&str> = Self::ALL.iter().map(|l| l.code()).collect();
                format!(
                    "Unsupported locale: {}, supported: {}",
                    s,
                    supported.join(", ")
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_codes_case_insensitively() {
        assert_eq!("ES".parse::<Locale>().unwrap(), Locale::Es);
        assert_eq!(" zh ".parse::<Locale>().unwrap(), Locale::Zh);
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn default_is_first_supported() {
        assert_eq!(Locale::ALL[0], Locale::DEFAULT);
    }

    #[test]
    fn serializes_as_lowercase_code() {
        let json = serde_json::to_string(&Locale::De).unwrap();
        assert_eq!(json, "\"de\"");
        let back: Locale = serde_json::from_str("\"it\"").unwrap();
        assert_eq!(back, Locale::It);
    }
}
