use tracing::instrument;

use crate::{
    content::{PostDetail, PostSummary, RouteKey, compare_titles},
    error::Result,
    source::{ContentSource, PassCache},
};

/// 内容访问层
///
/// 负责把上游文章转换为渲染层需要的三种结构，并在上游不可用时降级。
/// 每个操作都会独立请求一次上游，彼此不共享状态；需要复用请求结果时使用 [`ContentAccess::pass`]。
#[derive(Clone)]
pub struct ContentAccess<S> {
    source: S,
}

impl<S: ContentSource> ContentAccess<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// 获取文章来源
    pub fn source(&self) -> &S {
        &self.source
    }

    /// 开始一次生成过程
    ///
    /// 返回的访问层在第一次成功拉取后复用结果，失败语义与单独调用一致。
    pub fn pass(&self) -> ContentAccess<PassCache<&S>> {
        ContentAccess::new(PassCache::new(&self.source))
    }

    /// 文章列表，按标题排序
    pub async fn try_list_summaries(&self) -> Result<Vec<PostSummary>> {
        let mut posts = self.source.fetch_posts().await?;
        posts.sort_by(|a, b| compare_titles(&a.title, &b.title));

        Ok(posts.into_iter().map(PostSummary::from).collect())
    }

    /// 需要预生成的页面，保持上游顺序
    pub async fn try_list_route_keys(&self) -> Result<Vec<RouteKey>> {
        let posts = self.source.fetch_posts().await?;

        Ok(posts.iter().map(RouteKey::from).collect())
    }

    /// 查找单篇文章
    ///
    /// 未找到时返回 [`PostDetail::missing`]，不视为错误。
    pub async fn try_get_detail(&self, requested_id: &str) -> Result<PostDetail> {
        let posts = self.source.fetch_posts().await?;

        let detail = posts
            .into_iter()
            .find(|post| post.key() == requested_id)
            .map(PostDetail::from)
            .unwrap_or_else(|| {
                tracing::info!(id = requested_id, "post not found");
                PostDetail::missing(requested_id)
            });

        Ok(detail)
    }

    /// 文章列表，上游不可用时返回空列表
    #[instrument(name = "list summaries", skip_all)]
    pub async fn list_summaries(&self) -> Vec<PostSummary> {
        match self.try_list_summaries().await {
            Ok(summaries) => {
                tracing::info!(count = summaries.len(), "listed posts");
                summaries
            }
            Err(e) => {
                tracing::error!(%e, "failed to list posts");
                Vec::new()
            }
        }
    }

    /// 预生成页面列表，上游不可用时返回空列表
    #[instrument(name = "list route keys", skip_all)]
    pub async fn list_route_keys(&self) -> Vec<RouteKey> {
        match self.try_list_route_keys().await {
            Ok(keys) => {
                tracing::info!(count = keys.len(), "listed routes");
                keys
            }
            Err(e) => {
                tracing::error!(%e, "failed to list routes");
                Vec::new()
            }
        }
    }

    /// 单篇文章，上游不可用时返回 [`PostDetail::unavailable`]
    #[instrument(name = "get detail", skip(self))]
    pub async fn get_detail(&self, requested_id: &str) -> PostDetail {
        match self.try_get_detail(requested_id).await {
            Ok(detail) => {
                if !detail.is_missing() {
                    tracing::info!(id = requested_id, "loaded post");
                }
                detail
            }
            Err(e) => {
                tracing::error!(%e, id = requested_id, "failed to load post");
                PostDetail::unavailable(requested_id)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use chrono::{DateTime, Utc};
    use tracing_subscriber::fmt::MakeWriter;

    use super::*;
    use crate::content::{ERROR_TITLE, RemotePost};

    /// 模拟上游：返回固定文章或失败，并记录请求次数
    struct FakeSource {
        posts: Option<Vec<RemotePost>>,
        calls: AtomicUsize,
    }

    impl FakeSource {
        fn ok(posts: Vec<RemotePost>) -> Self {
            Self {
                posts: Some(posts),
                calls: AtomicUsize::new(0),
            }
        }

        fn down() -> Self {
            Self {
                posts: None,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl ContentSource for FakeSource {
        async fn fetch_posts(&self) -> Result<Vec<RemotePost>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.posts {
                Some(posts) => Ok(posts.clone()),
                None => {
                    Err(io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused").into())
                }
            }
        }
    }

    /// 收集日志输出
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for LogBuffer {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn post(id: u64, title: &str, date: &str, content: &str) -> RemotePost {
        RemotePost {
            id,
            title: title.into(),
            date: date.into(),
            content: content.into(),
        }
    }

    fn sample_posts() -> Vec<RemotePost> {
        vec![
            post(3, "Beta", "2025-01-02 10:00:00", "<p>b</p>"),
            post(1, "Alpha", "2025-01-01 09:00:00", "<p>a</p>"),
        ]
    }

    #[tokio::test]
    async fn test_list_summaries_sorted_by_title() {
        let access = ContentAccess::new(FakeSource::ok(sample_posts()));

        let summaries = access.list_summaries().await;

        assert_eq!(
            summaries,
            vec![
                PostSummary {
                    id: "1".into(),
                    title: "Alpha".into(),
                    date: "2025-01-01 09:00:00".into(),
                },
                PostSummary {
                    id: "3".into(),
                    title: "Beta".into(),
                    date: "2025-01-02 10:00:00".into(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_list_summaries_follows_collation_order() {
        let titles = [
            "delta", "Charlie", "échelle", "alpha", "Bravo", "echo", "Alpha", "", "Ærø", "straße",
        ];
        let posts = titles
            .iter()
            .enumerate()
            .map(|(i, t)| post(i as u64, t, "2025-01-01 00:00:00", ""))
            .collect();
        let access = ContentAccess::new(FakeSource::ok(posts));

        let summaries = access.list_summaries().await;

        assert_eq!(
            summaries.iter().map(|s| s.title.as_str()).collect::<Vec<_>>(),
            vec![
                "", "alpha", "Alpha", "Ærø", "Bravo", "Charlie", "delta", "échelle", "echo", "straße"
            ]
        );
    }

    #[tokio::test]
    async fn test_list_route_keys_keeps_upstream_order() {
        let access = ContentAccess::new(FakeSource::ok(sample_posts()));

        let keys = access.list_route_keys().await;

        assert_eq!(
            keys,
            vec![RouteKey { id: "3".into() }, RouteKey { id: "1".into() }]
        );
    }

    #[tokio::test]
    async fn test_get_detail_found() {
        let access = ContentAccess::new(FakeSource::ok(sample_posts()));

        let detail = access.get_detail("3").await;

        assert_eq!(
            detail,
            PostDetail {
                id: "3".into(),
                title: "Beta".into(),
                date: "2025-01-02 10:00:00".into(),
                content: "<p>b</p>".into(),
            }
        );
    }

    #[tokio::test]
    async fn test_get_detail_first_match_wins() {
        let access = ContentAccess::new(FakeSource::ok(vec![
            post(7, "First", "", "<p>1</p>"),
            post(7, "Second", "", "<p>2</p>"),
        ]));

        assert_eq!(access.get_detail("7").await.title, "First");
    }

    #[tokio::test]
    async fn test_get_detail_not_found() {
        let access = ContentAccess::new(FakeSource::ok(sample_posts()));

        for id in ["99", "", "03", " 3", "abc"] {
            let detail = access.get_detail(id).await;
            assert_eq!(detail, PostDetail::missing(id), "id: {:?}", id);
            assert!(detail.is_missing());
        }
    }

    #[tokio::test]
    async fn test_get_detail_logs_not_found_once() {
        let logs = LogBuffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(logs.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let access = ContentAccess::new(FakeSource::ok(sample_posts()));
        access.get_detail("99").await;

        let output = logs.contents();
        assert_eq!(output.matches("post not found").count(), 1, "{}", output);
        assert!(!output.contains("loaded post"), "{}", output);

        access.get_detail("3").await;

        let output = logs.contents();
        assert_eq!(output.matches("loaded post").count(), 1, "{}", output);
    }

    #[tokio::test]
    async fn test_upstream_down_falls_back() {
        let access = ContentAccess::new(FakeSource::down());

        assert!(access.list_summaries().await.is_empty());
        assert!(access.list_route_keys().await.is_empty());
        assert!(access.try_list_summaries().await.is_err());

        let before = Utc::now();
        let detail = access.get_detail("5").await;
        let after = Utc::now();

        assert_eq!(detail.id, "5");
        assert_eq!(detail.title, ERROR_TITLE);
        assert!(!detail.content.is_empty());

        let date = DateTime::parse_from_rfc3339(&detail.date)
            .expect("时间格式错误")
            .with_timezone(&Utc);
        assert!(date >= before - chrono::Duration::seconds(1) && date <= after);
    }

    #[tokio::test]
    async fn test_each_operation_fetches_independently() {
        let access = ContentAccess::new(FakeSource::ok(sample_posts()));

        access.list_summaries().await;
        access.list_route_keys().await;
        access.get_detail("1").await;

        assert_eq!(access.source().calls(), 3);
    }

    #[tokio::test]
    async fn test_pass_fetches_once() {
        let access = ContentAccess::new(FakeSource::ok(sample_posts()));

        {
            let pass = access.pass();
            assert_eq!(pass.list_summaries().await.len(), 2);
            for key in pass.list_route_keys().await {
                assert_eq!(pass.get_detail(&key.id).await.id, key.id);
            }
        }

        assert_eq!(access.source().calls(), 1);
    }

    #[tokio::test]
    async fn test_pass_keeps_failure_semantics() {
        let access = ContentAccess::new(FakeSource::down());
        let pass = access.pass();

        assert!(pass.list_summaries().await.is_empty());
        assert!(pass.list_route_keys().await.is_empty());
        assert_eq!(pass.get_detail("5").await.title, ERROR_TITLE);
        assert_eq!(access.source().calls(), 3);
    }
}
