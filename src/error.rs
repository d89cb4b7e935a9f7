//! 统一错误处理
//!
//! 提供结构化错误类型和错误处理机制。资源类错误（翻译文件、页面抓取）
//! 在最底层被降级处理，只有意外错误才会传播到搜索的最外层。

use std::fmt;

use thiserror::Error;

/// 错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LingoError {
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),

    /// 网络错误
    #[error("网络错误: {0}")]
    Network(String),

    /// 非成功的HTTP状态码
    #[error("HTTP状态 {status}: {url}")]
    HttpStatus { status: u16, url: String },

    /// 超时错误
    #[error("操作超时: {0}")]
    Timeout(String),

    /// 调用方主动取消
    #[error("操作已取消: {0}")]
    Cancelled(String),

    /// 解析错误
    #[error("解析错误: {0}")]
    Parse(String),

    /// 文件读写错误
    #[error("IO错误: {0}")]
    Io(String),

    /// 不支持的语言
    #[error("不支持的语言: {0}")]
    UnsupportedLanguage(String),

    /// 内部错误
    #[error("内部错误: {0}")]
    Internal(String),
}

impl LingoError {
    /// 获取错误的严重程度
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            LingoError::Config(_) => ErrorSeverity::Critical,
            LingoError::Network(_) => ErrorSeverity::Warning,
            LingoError::HttpStatus { .. } => ErrorSeverity::Warning,
            LingoError::Timeout(_) => ErrorSeverity::Warning,
            LingoError::Cancelled(_) => ErrorSeverity::Info,
            LingoError::Parse(_) => ErrorSeverity::Error,
            LingoError::Io(_) => ErrorSeverity::Error,
            LingoError::UnsupportedLanguage(_) => ErrorSeverity::Info,
            LingoError::Internal(_) => ErrorSeverity::Critical,
        }
    }

    /// 创建带上下文的错误
    pub fn with_context<T: fmt::Display>(self, context: T) -> Self {
        match self {
            LingoError::Config(msg) => LingoError::Config(format!("{} (上下文: {})", msg, context)),
            LingoError::Network(msg) => {
                LingoError::Network(format!("{} (上下文: {})", msg, context))
            }
            LingoError::Timeout(msg) => {
                LingoError::Timeout(format!("{} (上下文: {})", msg, context))
            }
            LingoError::Cancelled(msg) => {
                LingoError::Cancelled(format!("{} (上下文: {})", msg, context))
            }
            LingoError::Parse(msg) => LingoError::Parse(format!("{} (上下文: {})", msg, context)),
            LingoError::Io(msg) => LingoError::Io(format!("{} (上下文: {})", msg, context)),
            LingoError::Internal(msg) => {
                LingoError::Internal(format!("{} (上下文: {})", msg, context))
            }
            other => other,
        }
    }
}

/// 错误严重程度
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl From<std::io::Error> for LingoError {
    fn from(error: std::io::Error) -> Self {
        LingoError::Io(error.to_string())
    }
}

impl From<serde_json::Error> for LingoError {
    fn from(error: serde_json::Error) -> Self {
        LingoError::Parse(format!("JSON解析错误: {}", error))
    }
}

impl From<toml::de::Error> for LingoError {
    fn from(error: toml::de::Error) -> Self {
        LingoError::Config(format!("TOML解析错误: {}", error))
    }
}

impl From<url::ParseError> for LingoError {
    fn from(error: url::ParseError) -> Self {
        LingoError::Config(format!("URL无效: {}", error))
    }
}

impl From<reqwest::Error> for LingoError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            LingoError::Timeout(error.to_string())
        } else if let Some(status) = error.status() {
            LingoError::HttpStatus {
                status: status.as_u16(),
                url: error.url().map(|u| u.to_string()).unwrap_or_default(),
            }
        } else {
            LingoError::Network(error.to_string())
        }
    }
}

/// 错误结果类型别名
pub type LingoResult<T> = Result<T, LingoError>;

/// 错误处理助手函数
pub mod helpers {
    use super::*;

    /// 按严重程度记录错误
    pub fn log_error(error: &LingoError) {
        match error.severity() {
            ErrorSeverity::Info => tracing::info!("{}", error),
            ErrorSeverity::Warning => tracing::warn!("{}", error),
            ErrorSeverity::Error => tracing::error!("{}", error),
            ErrorSeverity::Critical => tracing::error!("严重错误: {}", error),
        }
    }

    /// 创建配置错误
    pub fn config_error<T: fmt::Display>(msg: T) -> LingoError {
        LingoError::Config(msg.to_string())
    }
}
