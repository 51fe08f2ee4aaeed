use std::path::Path;

use serde::Serialize;
use tokio::fs;
use tracing::instrument;

use crate::{access::ContentAccess, error::Result, source::ContentSource};

/// 一次生成过程的结果
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Snapshot {
    /// 列表中的文章数
    pub summaries: usize,
    /// 写出的文章页面数
    pub pages: usize,
}

/// 执行一次生成过程，将三种结构写入 `out_dir`
///
/// - `index.json`：文章列表
/// - `routes.json`：预生成页面
/// - `posts/<id>.json`：单篇文章
///
/// 整个过程共享一次上游请求。上游不可用时写出空列表，不会中断；文件写入失败时返回错误。
#[instrument(name = "snapshot", skip(access))]
pub async fn write_snapshot<S: ContentSource>(
    access: &ContentAccess<S>,
    out_dir: &Path,
) -> Result<Snapshot> {
    let pass = access.pass();
    let posts_dir = out_dir.join("posts");
    fs::create_dir_all(&posts_dir).await?;

    let summaries = pass.list_summaries().await;
    write_json(&out_dir.join("index.json"), &summaries).await?;

    let routes = pass.list_route_keys().await;
    write_json(&out_dir.join("routes.json"), &routes).await?;

    for route in &routes {
        let detail = pass.get_detail(&route.id).await;
        write_json(&posts_dir.join(format!("{}.json", route.id)), &detail).await?;
    }

    tracing::info!(summaries = summaries.len(), pages = routes.len(), "snapshot written");

    Ok(Snapshot {
        summaries: summaries.len(),
        pages: routes.len(),
    })
}

async fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let data = serde_json::to_vec_pretty(value)?;
    fs::write(path, data).await?;
    Ok(())
}
