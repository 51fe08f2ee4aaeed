use reqwest::header::{self, HeaderMap, HeaderValue};

use super::ContentSource;
use crate::{config::Config, content::RemotePost, error::Result};

/// WordPressSource 从 WordPress 风格的 JSON 接口拉取文章。
///
/// 接口返回文章数组，字段见 [`RemotePost`]。
#[derive(Clone)]
pub struct WordPressSource {
    client: reqwest::Client,
    posts_url: String,
}

impl WordPressSource {
    /// 根据配置创建文章来源
    ///
    /// ```ignore
    /// let source = WordPressSource::new(&Config::from_env()?)?;
    /// ```
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .default_headers({
                let mut header = HeaderMap::new();
                header.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
                header
            })
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            posts_url: config.posts_url.clone(),
        })
    }
}

impl ContentSource for WordPressSource {
    /// 请求上游接口并解析文章数组
    ///
    /// 非 2xx 状态码和无法解析的响应体都视为失败。
    async fn fetch_posts(&self) -> Result<Vec<RemotePost>> {
        let resp = self
            .client
            .get(&self.posts_url)
            .send()
            .await?
            .error_for_status()?;

        let body = resp.bytes().await?;
        let posts: Vec<RemotePost> = serde_json::from_slice(&body)?;

        tracing::debug!(url = %self.posts_url, count = posts.len(), "fetched posts");
        Ok(posts)
    }
}
