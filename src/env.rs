//! 统一的环境变量管理系统
//!
//! 提供类型安全、可验证的环境变量管理。所有变量都以 `SITE_LINGO_` 为前缀，
//! 用于覆盖配置文件中的同名设置。

use std::env;
use std::fmt;
use std::time::Duration;

/// 环境变量解析错误
#[derive(Debug, Clone)]
pub struct EnvError {
    pub variable: String,
    pub message: String,
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Environment variable '{}': {}", self.variable, self.message)
    }
}

impl std::error::Error for EnvError {}

pub type EnvResult<T> = Result<T, EnvError>;

/// 环境变量访问器特性
pub trait EnvVar<T> {
    const NAME: &'static str;
    const DESCRIPTION: &'static str;

    fn parse(value: &str) -> EnvResult<T>;

    /// 未设置时返回 `Ok(None)`，设置但无效时返回错误
    fn get() -> EnvResult<Option<T>> {
        match env::var(Self::NAME) {
            Ok(value) if !value.trim().is_empty() => Self::parse(&value).map(Some),
            _ => Ok(None),
        }
    }

    fn get_or_default(default: T) -> T {
        match Self::get() {
            Ok(Some(value)) => value,
            _ => default,
        }
    }
}

/// 核心环境变量定义
pub mod core {
    use super::*;

    /// 日志级别
    pub struct LogLevel;
    impl EnvVar<String> for LogLevel {
        const NAME: &'static str = "SITE_LINGO_LOG_LEVEL";
        const DESCRIPTION: &'static str = "Log level: trace, debug, info, warn, error";

        fn parse(value: &str) -> EnvResult<String> {
            match value.to_lowercase().as_str() {
                "trace" | "debug" | "info" | "warn" | "error" => Ok(value.to_lowercase()),
                _ => Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: format!(
                        "Invalid log level '{}'. Use: trace, debug, info, warn, error",
                        value
                    ),
                }),
            }
        }
    }
}

/// 站点相关环境变量
pub mod site {
    use super::*;

    /// 站点根 URL
    pub struct BaseUrl;
    impl EnvVar<String> for BaseUrl {
        const NAME: &'static str = "SITE_LINGO_BASE_URL";
        const DESCRIPTION: &'static str = "Base URL pages and translation files are fetched from";

        fn parse(value: &str) -> EnvResult<String> {
            let url = value.trim();
            if url.starts_with("http://") || url.starts_with("https://") {
                Ok(url.to_string())
            } else {
                Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Base URL must start with http:// or https://".to_string(),
                })
            }
        }
    }

    /// 本地站点目录
    pub struct SiteRoot;
    impl EnvVar<String> for SiteRoot {
        const NAME: &'static str = "SITE_LINGO_SITE_ROOT";
        const DESCRIPTION: &'static str = "Local directory holding the static site";

        fn parse(value: &str) -> EnvResult<String> {
            Ok(shellexpand::tilde(value.trim()).to_string())
        }
    }

    /// 参与搜索的页面列表
    pub struct Pages;
    impl EnvVar<Vec<String>> for Pages {
        const NAME: &'static str = "SITE_LINGO_PAGES";
        const DESCRIPTION: &'static str = "Pages searched, comma-separated, in result order";

        fn parse(value: &str) -> EnvResult<Vec<String>> {
            parse_list(value, Self::NAME)
        }
    }

    /// 查询参数名
    pub struct QueryParam;
    impl EnvVar<String> for QueryParam {
        const NAME: &'static str = "SITE_LINGO_QUERY_PARAM";
        const DESCRIPTION: &'static str = "Name of the navigation query parameter";

        fn parse(value: &str) -> EnvResult<String> {
            let name = value.trim();
            if name.chars().any(|c| c.is_whitespace() || c == '&' || c == '=') {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: format!("Invalid query parameter name '{}'", name),
                });
            }
            Ok(name.to_string())
        }
    }
}

/// 语言相关环境变量
pub mod i18n {
    use super::*;

    /// 默认语言
    pub struct DefaultLanguage;
    impl EnvVar<String> for DefaultLanguage {
        const NAME: &'static str = "SITE_LINGO_DEFAULT_LANG";
        const DESCRIPTION: &'static str = "Fallback language (ISO 639-1 code)";

        fn parse(value: &str) -> EnvResult<String> {
            parse_language_code(value, Self::NAME)
        }
    }

    /// 支持的语言
    pub struct SupportedLanguages;
    impl EnvVar<Vec<String>> for SupportedLanguages {
        const NAME: &'static str = "SITE_LINGO_LANGUAGES";
        const DESCRIPTION: &'static str = "Supported languages, comma-separated";

        fn parse(value: &str) -> EnvResult<Vec<String>> {
            parse_list(value, Self::NAME)?
                .iter()
                .map(|code| parse_language_code(code, Self::NAME))
                .collect()
        }
    }

    /// 翻译文件路径模板
    pub struct TranslationPath;
    impl EnvVar<String> for TranslationPath {
        const NAME: &'static str = "SITE_LINGO_TRANSLATION_PATH";
        const DESCRIPTION: &'static str = "Translation file path template, must contain {lang}";

        fn parse(value: &str) -> EnvResult<String> {
            if !value.contains("{lang}") {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Template must contain the {lang} placeholder".to_string(),
                });
            }
            Ok(value.trim().to_string())
        }
    }

    /// 语言偏好文件
    pub struct PreferencesPath;
    impl EnvVar<String> for PreferencesPath {
        const NAME: &'static str = "SITE_LINGO_PREFERENCES";
        const DESCRIPTION: &'static str = "File storing the persisted language preference";

        fn parse(value: &str) -> EnvResult<String> {
            Ok(shellexpand::tilde(value.trim()).to_string())
        }
    }
}

/// 网络相关环境变量
pub mod network {
    use super::*;

    /// 单次抓取超时
    pub struct FetchTimeout;
    impl EnvVar<Duration> for FetchTimeout {
        const NAME: &'static str = "SITE_LINGO_FETCH_TIMEOUT";
        const DESCRIPTION: &'static str = "Per-resource fetch deadline in seconds";

        fn parse(value: &str) -> EnvResult<Duration> {
            let seconds: u64 = value.trim().parse().map_err(|_| EnvError {
                variable: Self::NAME.to_string(),
                message: "Must be a valid number of seconds".to_string(),
            })?;

            if seconds == 0 {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Timeout must be greater than 0".to_string(),
                });
            }

            if seconds > 300 {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Timeout too long (max 300 seconds)".to_string(),
                });
            }

            Ok(Duration::from_secs(seconds))
        }
    }
}

/// 辅助函数
fn parse_list(value: &str, var_name: &str) -> EnvResult<Vec<String>> {
    let items: Vec<String> = value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if items.is_empty() {
        return Err(EnvError {
            variable: var_name.to_string(),
            message: "List must contain at least one entry".to_string(),
        });
    }

    Ok(items)
}

fn parse_language_code(value: &str, var_name: &str) -> EnvResult<String> {
    let lang = value.trim().to_lowercase();
    if lang.len() != 2 || !lang.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(EnvError {
            variable: var_name.to_string(),
            message: format!("Language code '{}' must be 2 letters (ISO 639-1)", value),
        });
    }
    Ok(lang)
}

fn describe<T, V: EnvVar<T>>() -> (&'static str, &'static str) {
    (V::NAME, V::DESCRIPTION)
}

/// 所有变量的名称和说明，用于 `site-lingo env`
pub fn documented_variables() -> Vec<(&'static str, &'static str)> {
    vec![
        describe::<String, core::LogLevel>(),
        describe::<String, site::BaseUrl>(),
        describe::<String, site::SiteRoot>(),
        describe::<Vec<String>, site::Pages>(),
        describe::<String, site::QueryParam>(),
        describe::<String, i18n::DefaultLanguage>(),
        describe::<Vec<String>, i18n::SupportedLanguages>(),
        describe::<String, i18n::TranslationPath>(),
        describe::<String, i18n::PreferencesPath>(),
        describe::<Duration, network::FetchTimeout>(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_codes_are_normalized() {
        assert_eq!(i18n::DefaultLanguage::parse(" EN ").unwrap(), "en");
        assert!(i18n::DefaultLanguage::parse("eng").is_err());
        assert!(i18n::DefaultLanguage::parse("e1").is_err());
    }

    #[test]
    fn page_lists_drop_blank_entries() {
        let pages = site::Pages::parse("index.html, ,about.html,").unwrap();
        assert_eq!(pages, vec!["index.html", "about.html"]);
        assert!(site::Pages::parse(" , ").is_err());
    }

    #[test]
    fn fetch_timeout_is_bounded() {
        assert_eq!(
            network::FetchTimeout::parse("15").unwrap(),
            Duration::from_secs(15)
        );
        assert!(network::FetchTimeout::parse("0").is_err());
        assert!(network::FetchTimeout::parse("301").is_err());
        assert!(network::FetchTimeout::parse("soon").is_err());
    }

    #[test]
    fn translation_path_needs_placeholder() {
        assert!(i18n::TranslationPath::parse("locales/{lang}.json").is_ok());
        assert!(i18n::TranslationPath::parse("locales/en.json").is_err());
    }
}
