mod cache;
mod wordpress;

pub use self::{cache::PassCache, wordpress::WordPressSource};

use crate::{content::RemotePost, error::Result};

/// 文章来源
///
/// 每次调用都应返回上游当前的完整文章集合，顺序与上游一致。
pub trait ContentSource: Send + Sync {
    /// 拉取全部文章
    fn fetch_posts(&self) -> impl std::future::Future<Output = Result<Vec<RemotePost>>> + Send;
}

impl<S: ContentSource> ContentSource for &S {
    fn fetch_posts(&self) -> impl std::future::Future<Output = Result<Vec<RemotePost>>> + Send {
        (**self).fetch_posts()
    }
}
