use std::{env, time::Duration};

use crate::error::{Error, Result};

/// 默认请求超时
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// 默认监听地址
const DEFAULT_ADDR: &str = "0.0.0.0:3000";

/// 运行配置
///
/// 由环境变量构造，测试中可直接构造以指向 mock 服务。
#[derive(Debug, Clone)]
pub struct Config {
    /// 上游文章接口地址
    pub posts_url: String,
    /// 单次请求超时
    pub timeout: Duration,
    /// HTTP 服务监听地址
    pub addr: String,
}

impl Config {
    /// 使用指定的上游地址和默认值创建配置
    pub fn new(posts_url: impl Into<String>) -> Self {
        Self {
            posts_url: posts_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            addr: DEFAULT_ADDR.to_string(),
        }
    }

    /// 从环境变量读取配置
    ///
    /// - `WP_POSTS_URL`：必填
    /// - `WP_TIMEOUT_SECS`：可选，默认 10
    /// - `WPNOTE_ADDR`：可选，默认 `0.0.0.0:3000`
    pub fn from_env() -> Result<Self> {
        let posts_url =
            env::var("WP_POSTS_URL").map_err(|_| Error::Config("WP_POSTS_URL not set"))?;

        Self::from_parts(
            posts_url,
            env::var("WP_TIMEOUT_SECS").ok(),
            env::var("WPNOTE_ADDR").ok(),
        )
    }

    fn from_parts(
        posts_url: String,
        timeout: Option<String>,
        addr: Option<String>,
    ) -> Result<Self> {
        if posts_url.trim().is_empty() {
            return Err(Error::Config("WP_POSTS_URL is empty"));
        }

        let mut config = Self::new(posts_url.trim());

        if let Some(secs) = timeout {
            let secs: u64 = secs
                .trim()
                .parse()
                .map_err(|_| Error::Config("WP_TIMEOUT_SECS must be a whole number of seconds"))?;
            config.timeout = Duration::from_secs(secs);
        }

        if let Some(addr) = addr.filter(|a| !a.trim().is_empty()) {
            config.addr = addr.trim().to_string();
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_when_optional_values_absent() {
        let config = Config::from_parts("https://example.com/posts".into(), None, None)
            .expect("config should build");

        assert_eq!(config.posts_url, "https://example.com/posts");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.addr, "0.0.0.0:3000");
    }

    #[test]
    fn test_optional_values_override_defaults() {
        let config = Config::from_parts(
            " https://example.com/posts ".into(),
            Some("3".into()),
            Some("127.0.0.1:8080".into()),
        )
        .expect("config should build");

        assert_eq!(config.posts_url, "https://example.com/posts");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.addr, "127.0.0.1:8080");
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(matches!(
            Config::from_parts("  ".into(), None, None),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            Config::from_parts("https://example.com".into(), Some("soon".into()), None),
            Err(Error::Config(_))
        ));
    }
}
