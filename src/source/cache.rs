use tokio::sync::OnceCell;

use super::ContentSource;
use crate::{content::RemotePost, error::Result};

/// 单次生成过程内的文章缓存
///
/// 第一次成功的拉取结果会被后续调用复用；失败不会被缓存，下一次调用重新请求上游。
/// 缓存只在一次生成过程内有效，过程结束后随之丢弃。
pub struct PassCache<S> {
    source: S,
    posts: OnceCell<Vec<RemotePost>>,
}

impl<S: ContentSource> PassCache<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            posts: OnceCell::new(),
        }
    }

    /// 是否已缓存文章
    #[cfg(test)]
    fn is_filled(&self) -> bool {
        self.posts.initialized()
    }
}

impl<S: ContentSource> ContentSource for PassCache<S> {
    async fn fetch_posts(&self) -> Result<Vec<RemotePost>> {
        let posts = self
            .posts
            .get_or_try_init(|| self.source.fetch_posts())
            .await?;
        Ok(posts.clone())
    }
}
