//! 语言设置与初始语言解析

use crate::config::SiteConfig;

/// 支持的语言集合及默认语言
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageSettings {
    supported: Vec<String>,
    default: String,
}

impl LanguageSettings {
    pub fn new<I, S>(supported: I, default: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            supported: supported
                .into_iter()
                .map(|code| code.as_ref().trim().to_string())
                .collect(),
            default: default.trim().to_string(),
        }
    }

    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(&config.supported_languages, &config.default_language)
    }

    pub fn supported(&self) -> &[String] {
        &self.supported
    }

    pub fn default_language(&self) -> &str {
        &self.default
    }

    pub fn is_supported(&self, code: &str) -> bool {
        self.supported.iter().any(|supported| supported == code)
    }

    /// 确定启动时的语言：已存储的偏好 → 环境语言的主标签 → 默认语言
    pub fn resolve_initial(&self, stored: Option<&str>, locale: Option<&str>) -> String {
        if let Some(code) = stored.map(str::trim).filter(|code| self.is_supported(code)) {
            return code.to_string();
        }

        if let Some(primary) = locale.and_then(primary_subtag) {
            if self.is_supported(&primary) {
                return primary;
            }
        }

        self.default.clone()
    }
}

/// `en-US` / `pt_BR.UTF-8` → `en` / `pt`
pub fn primary_subtag(locale: &str) -> Option<String> {
    let primary = locale
        .trim()
        .split(['-', '_', '.', '@'])
        .next()?
        .to_lowercase();

    if primary.is_empty() {
        None
    } else {
        Some(primary)
    }
}
