//! 导航上下文与查询读取

use std::collections::HashMap;

use url::Url;

use crate::error::LingoResult;

/// 当前导航环境：查询参数和语言环境
pub trait NavigationContext {
    fn query_param(&self, name: &str) -> Option<String>;

    fn locale(&self) -> Option<String> {
        None
    }
}

/// 读取查询参数并去掉首尾空白；缺失时为空字符串
pub fn read_query(navigation: &dyn NavigationContext, param: &str) -> String {
    navigation
        .query_param(param)
        .map(|query| query.trim().to_string())
        .unwrap_or_default()
}

/// 基于页面 URL 的导航上下文
#[derive(Debug, Clone)]
pub struct UrlNavigation {
    url: Url,
    locale: Option<String>,
}

impl UrlNavigation {
    pub fn parse(url: &str) -> LingoResult<Self> {
        Ok(Self {
            url: Url::parse(url)?,
            locale: None,
        })
    }

    pub fn with_locale(mut self, locale: &str) -> Self {
        self.locale = Some(locale.to_string());
        self
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl NavigationContext for UrlNavigation {
    fn query_param(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }

    fn locale(&self) -> Option<String> {
        self.locale.clone()
    }
}

/// 直接给定参数的导航上下文（命令行、测试）
#[derive(Debug, Clone, Default)]
pub struct StaticNavigation {
    params: HashMap<String, String>,
    locale: Option<String>,
}

impl StaticNavigation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_param(mut self, name: &str, value: &str) -> Self {
        self.params.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_locale(mut self, locale: Option<String>) -> Self {
        self.locale = locale;
        self
    }
}

impl NavigationContext for StaticNavigation {
    fn query_param(&self, name: &str) -> Option<String> {
        self.params.get(name).cloned()
    }

    fn locale(&self) -> Option<String> {
        self.locale.clone()
    }
}
