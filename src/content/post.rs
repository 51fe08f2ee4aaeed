use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// 文章加载失败时的标题
pub const ERROR_TITLE: &str = "Error loading post";

/// 文章加载失败时的正文
pub const ERROR_CONTENT: &str =
    "<p>Sorry, this post could not be loaded right now. Please try again later.</p>";

/// 上游返回的原始文章
///
/// 字段名与 WordPress 接口保持一致，仅在反序列化时使用。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemotePost {
    #[serde(rename = "ID")]
    pub id: u64,
    #[serde(rename = "post_title", default)]
    pub title: String,
    /// `YYYY-MM-DD HH:MM:SS`，无时区
    #[serde(rename = "post_date", default)]
    pub date: String,
    /// 可信的 HTML 正文
    #[serde(rename = "post_content", default)]
    pub content: String,
}

impl RemotePost {
    /// 文章 ID 的字符串形式，所有派生结构都以此为准
    pub fn key(&self) -> String {
        self.id.to_string()
    }
}

/// 文章列表项
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostSummary {
    pub id: String,
    pub title: String,
    /// 上游原始时间，未做格式化
    pub date: String,
}

impl From<RemotePost> for PostSummary {
    fn from(post: RemotePost) -> Self {
        Self {
            id: post.key(),
            title: post.title,
            date: post.date,
        }
    }
}

/// 单篇文章
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostDetail {
    pub id: String,
    pub title: String,
    pub date: String,
    /// 原始 HTML，不做转义
    pub content: String,
}

impl PostDetail {
    /// 请求的 ID 不存在时返回的空文章
    pub fn missing(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            date: String::new(),
            content: String::new(),
        }
    }

    /// 上游不可用时返回的错误文章，时间取当前时刻
    pub fn unavailable(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: ERROR_TITLE.to_string(),
            date: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            content: ERROR_CONTENT.to_string(),
        }
    }

    /// 是否为 [`PostDetail::missing`] 形态
    pub fn is_missing(&self) -> bool {
        self.title.is_empty() && self.date.is_empty() && self.content.is_empty()
    }
}

impl From<RemotePost> for PostDetail {
    fn from(post: RemotePost) -> Self {
        Self {
            id: post.key(),
            title: post.title,
            date: post.date,
            content: post.content,
        }
    }
}

/// 需要预生成的页面
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteKey {
    pub id: String,
}

impl From<&RemotePost> for RouteKey {
    fn from(post: &RemotePost) -> Self {
        Self { id: post.key() }
    }
}
