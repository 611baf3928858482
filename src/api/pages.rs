use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};

use crate::{
    content::Slug,
    error::Result,
    render, sanity,
    state::{AppState, Source},
};

/// 配置页面路由。
///
/// - `GET /`：问候语和文章列表
/// - `GET /plants`：植物列表
/// - `GET /plants/{slug}`：单个植物
pub fn setup_route() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/plants", get(plant_list))
        .route("/plants/{slug}", get(plant_detail))
}

async fn index(State(source): State<Source>) -> Result<Html<String>> {
    let posts = sanity::posts(&source).await?;
    Ok(Html(render::index_page(&posts)))
}

async fn plant_list(State(source): State<Source>) -> Result<Html<String>> {
    let plants = sanity::plants(&source).await?;
    Ok(Html(render::plants_page(&plants)))
}

/// 根据 slug 渲染植物详情。
///
/// 文档不存在时返回 404 和提示页面，而不是错误。
async fn plant_detail(Path(slug): Path<String>, State(source): State<Source>) -> Result<Response> {
    let slug = Slug::new(slug)?;

    match sanity::plant(&source, &slug).await? {
        Some(plant) => Ok(Html(render::plant_page(&plant)).into_response()),
        None => {
            tracing::debug!(%slug, "plant not found");
            Ok((StatusCode::NOT_FOUND, Html(render::not_found_page())).into_response())
        }
    }
}
