use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};

use crate::{
    access::ContentAccess,
    content::{PostDetail, PostSummary, RouteKey},
    source::WordPressSource,
    state::AppState,
};

type Access = ContentAccess<WordPressSource>;

/// 配置文章相关路由。
///
/// 路由包括：
/// - `GET /posts`：文章列表，按标题排序
/// - `GET /posts/{id}`：获取单篇文章
/// - `GET /routes`：需要预生成的文章页面
///
/// 上游不可用时各接口返回降级结果，状态码始终为 200。
pub fn setup_route() -> Router<AppState> {
    Router::new()
        .route("/posts", get(post_list))
        .route("/posts/{id}", get(post))
        .route("/routes", get(route_list))
}

async fn post_list(State(access): State<Access>) -> Json<Vec<PostSummary>> {
    Json(access.list_summaries().await)
}

/// 根据 ID 获取单篇文章。
///
/// 文章不存在时返回字段为空的 [`PostDetail`]，由调用方自行判断。
async fn post(Path(id): Path<String>, State(access): State<Access>) -> Json<PostDetail> {
    Json(access.get_detail(&id).await)
}

async fn route_list(State(access): State<Access>) -> Json<Vec<RouteKey>> {
    Json(access.list_route_keys().await)
}
