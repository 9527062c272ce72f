// ============================================================================
// FaqDesk - 配置数据模型
// ============================================================================
//
// 文件: src/models/config.rs
// 职责: 配置文件数据结构定义和操作
// 边界:
//   - ✅ 配置文件数据结构定义
//   - ✅ 配置序列化/反序列化
//   - ✅ 配置默认值与环境变量覆盖
//   - ✅ 配置文件读写操作
//   - ❌ 不应包含网络请求
//   - ❌ 不应包含 CLI 参数解析
//
// ============================================================================

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// 默认配置文件名
pub const CONFIG_FILE_NAME: &str = "faqdesk.toml";

/// 全局配置管理器
static GLOBAL_CONFIG: std::sync::OnceLock<Arc<RwLock<Config>>> = std::sync::OnceLock::new();

/// FaqDesk 配置文件结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// 管理接口配置
    #[serde(default)]
    pub api: ApiConfig,
    /// 列表视图配置
    #[serde(default)]
    pub list: ListConfig,
    /// 输出配置
    #[serde(default)]
    pub output: OutputConfig,
    /// 国际化配置
    #[serde(default)]
    pub i18n: I18nConfig,
}

/// 管理接口配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// 站点根地址
    pub base_url: String,
    /// 资源名（/api/admin/<resource>）
    pub resource: String,
    /// Bearer 令牌
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// 请求超时时间（秒），0 表示使用 HTTP 客户端默认值
    pub timeout_secs: u64,
}

/// 列表视图配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    /// 每页条数
    pub page_size: usize,
    /// 语言覆盖率获取策略
    pub coverage: CoverageMode,
    /// 逐条获取时的最大并发数
    pub max_concurrency: usize,
}

/// 输出配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// 是否显示进度动画
    pub show_progress: bool,
    /// 是否详细输出
    pub verbose: bool,
    /// 是否彩色输出
    pub colored: bool,
}

/// 国际化配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct I18nConfig {
    /// 界面语言
    pub language: String,
}

/// 语言覆盖率获取策略
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CoverageMode {
    /// 单个批量请求
    Batched,
    /// 每条记录一个请求
    PerRecord,
}

impl CoverageMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CoverageMode::Batched => "batched",
            CoverageMode::PerRecord => "per_record",
        }
    }
}

impl Default for CoverageMode {
    fn default() -> Self {
        CoverageMode::Batched
    }
}

impl std::str::FromStr for CoverageMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "batched" => Ok(CoverageMode::Batched),
            "per_record" => Ok(CoverageMode::PerRecord),
            _ => Err(format!(
                "Unsupported coverage mode: {}, expected batched or per_record",
                s
            )),
        }
    }
}

/// CLI 运行时参数（用于覆盖配置文件）
#[derive(Debug, Clone, Default)]
pub struct RuntimeArgs {
    pub verbose: Option<bool>,
    pub colored: Option<bool>,
    pub show_progress: Option<bool>,
    pub base_url: Option<String>,
    pub resource: Option<String>,
    pub token: Option<String>,
    pub timeout_secs: Option<u64>,
    pub page_size: Option<usize>,
    pub coverage: Option<CoverageMode>,
    pub language: Option<String>,
}

/// 配置默认值 trait - 不依赖全局配置初始化
pub trait ConfigDefaults {
    fn default_base_url() -> String {
        "http://localhost:3000".to_string()
    }

    fn default_resource() -> String {
        "demo-faqs".to_string()
    }

    fn default_timeout_secs() -> u64 {
        30
    }

    fn default_page_size() -> usize {
        20
    }

    fn default_max_concurrency() -> usize {
        num_cpus::get().max(4)
    }

    fn default_show_progress() -> bool {
        true
    }

    fn default_verbose() -> bool {
        false
    }

    fn default_colored() -> bool {
        true
    }

    fn default_language() -> String {
        "en_us".to_string()
    }
}

impl ConfigDefaults for Config {}

impl Config {
    /// 初始化全局配置（程序启动时调用）
    pub fn initialize(config_path: Option<&Path>) -> anyhow::Result<()> {
        let path = config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
        let mut config = Self::load_from(&path)?;
        config.apply_env();
        GLOBAL_CONFIG
            .set(Arc::new(RwLock::new(config)))
            .map_err(|_| anyhow::anyhow!("Global config already initialized"))?;
        Ok(())
    }

    /// 加载配置文件，不存在时使用默认配置
    pub fn load_from(config_path: &Path) -> anyhow::Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config = toml::from_str(&content)?;
            tracing::debug!(path = %config_path.display(), "loaded config file");
            Ok(config)
        } else {
            tracing::debug!(path = %config_path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// 应用环境变量覆盖
    fn apply_env(&mut self) {
        if let Ok(base_url) = std::env::var("FAQDESK_BASE_URL") {
            if !base_url.trim().is_empty() {
                self.api.base_url = base_url;
            }
        }
        if let Ok(token) = std::env::var("FAQDESK_TOKEN") {
            if !token.trim().is_empty() {
                self.api.token = Some(token);
            }
        }
    }

    /// 合并运行时参数
    pub fn merge_runtime_args(args: RuntimeArgs) -> anyhow::Result<()> {
        let global_config = GLOBAL_CONFIG
            .get()
            .ok_or_else(|| anyhow::anyhow!("Global config not initialized"))?;

        let mut config = global_config
            .write()
            .map_err(|_| anyhow::anyhow!("Failed to acquire config write lock"))?;

        config.apply_runtime_args(args);
        Ok(())
    }

    /// 将运行时参数覆盖到当前配置
    pub fn apply_runtime_args(&mut self, args: RuntimeArgs) {
        if let Some(verbose) = args.verbose {
            self.output.verbose = verbose;
        }
        if let Some(colored) = args.colored {
            self.output.colored = colored;
        }
        if let Some(show_progress) = args.show_progress {
            self.output.show_progress = show_progress;
        }
        if let Some(base_url) = args.base_url {
            self.api.base_url = base_url;
        }
        if let Some(resource) = args.resource {
            self.api.resource = resource;
        }
        if let Some(token) = args.token {
            self.api.token = Some(token);
        }
        if let Some(timeout_secs) = args.timeout_secs {
            self.api.timeout_secs = timeout_secs;
        }
        if let Some(page_size) = args.page_size {
            self.list.page_size = page_size;
        }
        if let Some(coverage) = args.coverage {
            self.list.coverage = coverage;
        }
        if let Some(language) = args.language {
            self.i18n.language = language;
        }
    }

    /// 保存配置到文件
    pub fn save_to_file(&self, config_path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    /// 生成默认配置模板并保存到文件
    pub fn create_default_config_file(config_path: &Path) -> anyhow::Result<()> {
        Self::default().save_to_file(config_path)
    }

    /// 获取当前配置快照
    pub fn snapshot() -> anyhow::Result<Config> {
        let global_config = GLOBAL_CONFIG
            .get()
            .ok_or_else(|| anyhow::anyhow!("Global config not initialized"))?;

        let config = global_config
            .read()
            .map_err(|_| anyhow::anyhow!("Failed to acquire config read lock"))?;

        Ok(config.clone())
    }

    /// 获取界面语言
    pub fn get_language() -> anyhow::Result<String> {
        Ok(Self::snapshot()?.i18n.language)
    }

    /// 获取是否彩色输出（带默认值）
    pub fn get_colored() -> bool {
        Self::snapshot()
            .map(|config| config.output.colored)
            .unwrap_or_else(|_| Self::default_colored())
    }

    /// 获取是否显示进度动画（带默认值）
    pub fn get_show_progress() -> bool {
        Self::snapshot()
            .map(|config| config.output.show_progress)
            .unwrap_or_else(|_| Self::default_show_progress())
    }
}

impl ApiConfig {
    /// 请求超时，0 表示不设置
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

impl ListConfig {
    /// 每页条数，0 视为默认值
    pub fn effective_page_size(&self) -> usize {
        if self.page_size == 0 {
            Config::default_page_size()
        } else {
            self.page_size
        }
    }

    pub fn effective_max_concurrency(&self) -> usize {
        if self.max_concurrency == 0 {
            Config::default_max_concurrency()
        } else {
            self.max_concurrency
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            list: ListConfig::default(),
            output: OutputConfig::default(),
            i18n: I18nConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: Config::default_base_url(),
            resource: Config::default_resource(),
            token: None,
            timeout_secs: Config::default_timeout_secs(),
        }
    }
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            page_size: Config::default_page_size(),
            coverage: CoverageMode::default(),
            max_concurrency: Config::default_max_concurrency(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            show_progress: Config::default_show_progress(),
            verbose: Config::default_verbose(),
            colored: Config::default_colored(),
        }
    }
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            language: Config::default_language(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(config.api.resource, "demo-faqs");
        assert_eq!(config.list.effective_page_size(), 20);
        assert_eq!(config.list.coverage, CoverageMode::Batched);
    }

    #[test]
    fn saved_template_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        Config::create_default_config_file(&path).unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:3000");
        assert_eq!(config.i18n.language, "en_us");
    }

    #[test]
    fn partial_file_keeps_section_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            "[api]\nbase_url = \"https://cloudmlmsoftware.com\"\n\n[list]\ncoverage = \"per_record\"\n\n[output]\nverbose = true\n",
        )
        .unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.api.base_url, "https://cloudmlmsoftware.com");
        assert_eq!(config.api.resource, "demo-faqs");
        assert_eq!(config.api.timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.list.coverage, CoverageMode::PerRecord);
        assert_eq!(config.list.page_size, 20);
        assert!(config.output.verbose);
        assert!(config.output.colored);
        assert!(config.output.show_progress);
        assert_eq!(config.i18n.language, "en_us");
    }

    #[test]
    fn partial_api_section_builds_an_endpoint() {
        let config: Config = toml::from_str("[api]\nbase_url = \"https://cloudmlmsoftware.com\"\n").unwrap();
        let store = crate::core::store::HttpContentStore::new(&config.api).unwrap();
        assert_eq!(
            store.endpoint().as_str(),
            "https://cloudmlmsoftware.com/api/admin/demo-faqs"
        );
    }

    #[test]
    fn runtime_args_override_file_values() {
        let mut config = Config::default();
        config.apply_runtime_args(RuntimeArgs {
            base_url: Some("https://staging.example".to_string()),
            page_size: Some(5),
            coverage: Some(CoverageMode::PerRecord),
            colored: Some(false),
            ..Default::default()
        });
        assert_eq!(config.api.base_url, "https://staging.example");
        assert_eq!(config.list.effective_page_size(), 5);
        assert_eq!(config.list.coverage, CoverageMode::PerRecord);
        assert!(!config.output.colored);
        assert_eq!(config.api.resource, "demo-faqs");
    }

    #[test]
    fn zero_timeout_means_client_default() {
        let mut api = ApiConfig::default();
        assert_eq!(api.timeout(), Some(Duration::from_secs(30)));
        api.timeout_secs = 0;
        assert_eq!(api.timeout(), None);
    }
}
