//! 简化的配置管理器
//!
//! 提供统一的配置接口，支持文件配置、环境变量和默认值

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::constants;
use crate::error::{LingoError, LingoResult};

/// 站点配置
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteConfig {
    // 资源来源，二选一
    pub base_url: Option<String>,
    pub site_root: Option<PathBuf>,

    // 搜索配置
    pub pages: Vec<String>,
    pub query_param: String,
    pub context_chars: usize,
    pub escape_snippets: bool,
    pub results_heading_tag: String,

    // 语言配置
    pub supported_languages: Vec<String>,
    pub default_language: String,
    pub translation_path: String,
    pub preferences_path: Option<PathBuf>,

    // 网络配置
    pub fetch_timeout_secs: u64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            site_root: None,

            pages: constants::DEFAULT_PAGES.iter().map(|p| p.to_string()).collect(),
            query_param: constants::DEFAULT_QUERY_PARAM.to_string(),
            context_chars: constants::SNIPPET_CONTEXT_CHARS,
            escape_snippets: true,
            results_heading_tag: constants::DEFAULT_RESULTS_HEADING_TAG.to_string(),

            supported_languages: constants::SUPPORTED_LANGUAGES
                .iter()
                .map(|l| l.to_string())
                .collect(),
            default_language: constants::DEFAULT_LANGUAGE.to_string(),
            translation_path: constants::DEFAULT_TRANSLATION_PATH.to_string(),
            preferences_path: None,

            fetch_timeout_secs: constants::DEFAULT_FETCH_TIMEOUT.as_secs(),
        }
    }
}

impl SiteConfig {
    /// 验证配置
    pub fn validate(&self) -> LingoResult<()> {
        if self.pages.is_empty() {
            return Err(LingoError::Config("页面列表不能为空".to_string()));
        }

        if self.query_param.trim().is_empty() {
            return Err(LingoError::Config("查询参数名不能为空".to_string()));
        }

        if self.supported_languages.is_empty() {
            return Err(LingoError::Config("至少需要一种支持的语言".to_string()));
        }

        if !self.supported_languages.contains(&self.default_language) {
            return Err(LingoError::Config(format!(
                "默认语言 '{}' 不在支持列表 {:?} 中",
                self.default_language, self.supported_languages
            )));
        }

        if !self.translation_path.contains("{lang}") {
            return Err(LingoError::Config(
                "翻译文件路径模板必须包含 {lang}".to_string(),
            ));
        }

        if self.fetch_timeout_secs == 0 {
            return Err(LingoError::Config("抓取超时必须大于0".to_string()));
        }

        if self.results_heading_tag.trim().is_empty() {
            return Err(LingoError::Config("结果标题标签不能为空".to_string()));
        }

        if let Some(base_url) = &self.base_url {
            url::Url::parse(base_url)?;
        }

        Ok(())
    }

    /// 应用环境变量覆盖
    pub fn apply_env_overrides(&mut self) -> LingoResult<()> {
        use crate::env::{i18n, network, site, EnvVar};

        let invalid = |e: crate::env::EnvError| LingoError::Config(e.to_string());

        if let Some(base_url) = site::BaseUrl::get().map_err(invalid)? {
            tracing::info!("环境变量覆盖站点 URL: {}", base_url);
            self.base_url = Some(base_url);
        }

        if let Some(site_root) = site::SiteRoot::get().map_err(invalid)? {
            self.site_root = Some(PathBuf::from(site_root));
        }

        if let Some(pages) = site::Pages::get().map_err(invalid)? {
            self.pages = pages;
        }

        if let Some(query_param) = site::QueryParam::get().map_err(invalid)? {
            self.query_param = query_param;
        }

        if let Some(default_language) = i18n::DefaultLanguage::get().map_err(invalid)? {
            self.default_language = default_language;
        }

        if let Some(languages) = i18n::SupportedLanguages::get().map_err(invalid)? {
            self.supported_languages = languages;
        }

        if let Some(path) = i18n::TranslationPath::get().map_err(invalid)? {
            self.translation_path = path;
        }

        if let Some(path) = i18n::PreferencesPath::get().map_err(invalid)? {
            self.preferences_path = Some(PathBuf::from(path));
        }

        if let Some(timeout) = network::FetchTimeout::get().map_err(invalid)? {
            self.fetch_timeout_secs = timeout.as_secs();
        }

        Ok(())
    }

    /// 转换为Duration类型
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

/// 简化的配置管理器
///
/// 只负责合并配置文件和环境变量；调用方在应用完自己的覆盖后再调用
/// `SiteConfig::validate`。
pub struct ConfigManager {
    config: SiteConfig,
}

impl ConfigManager {
    /// 按默认搜索路径创建配置管理器
    pub fn new() -> LingoResult<Self> {
        Self::load_dotenv();

        let source = constants::CONFIG_PATHS
            .iter()
            .map(|path| PathBuf::from(shellexpand::tilde(path).as_ref()))
            .find(|path| path.exists());

        Self::from_source(source)
    }

    /// 从指定文件创建配置管理器
    pub fn from_file<P: AsRef<Path>>(path: P) -> LingoResult<Self> {
        Self::load_dotenv();
        Self::from_source(Some(path.as_ref().to_path_buf()))
    }

    fn from_source(source: Option<PathBuf>) -> LingoResult<Self> {
        let mut config = match &source {
            Some(path) => {
                tracing::info!("加载配置文件: {}", path.display());
                Self::load_from_file(path)?
            }
            None => {
                tracing::info!("未找到配置文件，使用默认配置");
                SiteConfig::default()
            }
        };

        config.apply_env_overrides()?;

        Ok(Self { config })
    }

    pub fn into_config(self) -> SiteConfig {
        self.config
    }

    /// 从指定文件加载配置
    fn load_from_file(path: &Path) -> LingoResult<SiteConfig> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            LingoError::Config(format!("读取配置文件失败: {}", e)).with_context(path.display())
        })?;

        let is_json = path.extension().map_or(false, |ext| ext == "json");
        if is_json {
            serde_json::from_str(&content)
                .map_err(|e| LingoError::Config(format!("解析JSON配置失败: {}", e)))
        } else {
            toml::from_str(&content)
                .map_err(|e| LingoError::Config(format!("解析TOML配置失败: {}", e)))
        }
    }

    /// 加载 .env 文件
    fn load_dotenv() {
        let env_files = [".env.local", ".env"];

        for env_file in &env_files {
            if Path::new(env_file).exists() && dotenv::from_filename(env_file).is_ok() {
                tracing::info!("已加载环境变量文件: {}", env_file);
                break;
            }
        }
    }

    /// 生成示例配置文件
    pub fn generate_example_config<P: AsRef<Path>>(path: P) -> LingoResult<()> {
        let config = SiteConfig::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| LingoError::Config(format!("序列化配置失败: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| LingoError::Config(format!("写入配置文件失败: {}", e)))?;

        Ok(())
    }
}
