use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{ContentSource, Query};
use crate::{
    content::{Plant, PlantSummary, Post, Slug},
    error::Result,
};

/// 最新 12 篇有 slug 的文章，按发布时间倒序
pub const POSTS: &str = r#"*[
  _type == "post"
  && defined(slug.current)
]|order(publishedAt desc)[0...12]{_id, title, slug, publishedAt}"#;

/// 全部植物，附带图片地址和养护指南摘要
pub const PLANTS: &str = r#"*[_type == "plant"]{
  _id,
  name,
  slug,
  description,
  "imageUrl": image.asset->url,
  careGuide->{
    title,
    watering,
    sunlight
  }
}"#;

/// 按 `$slug` 查找单个植物
pub const PLANT: &str = r#"*[_type == "plant" && slug.current == $slug][0]{
  _id,
  name,
  description,
  "imageUrl": image.asset->url,
  fact,
  careGuide->{
    title,
    wateringInstructions,
    lightRequirements,
    soilType,
    fertilizer,
    difficulty
  }
}"#;

/// 查询文章列表，保持后端返回的顺序
pub async fn posts<S: ContentSource>(source: &S) -> Result<Vec<Post>> {
    let value = source.fetch(&Query::new("posts", POSTS)).await?;
    decode_list(value)
}

/// 查询植物列表，保持后端返回的顺序
pub async fn plants<S: ContentSource>(source: &S) -> Result<Vec<PlantSummary>> {
    let value = source.fetch(&Query::new("plants", PLANTS)).await?;
    decode_list(value)
}

/// 按 slug 查询单个植物
///
/// 没有匹配的文档时返回 `Ok(None)`。
pub async fn plant<S: ContentSource>(source: &S, slug: &Slug) -> Result<Option<Plant>> {
    let query = Query::new("plant", PLANT).param("slug", slug.as_str());
    let value = source.fetch(&query).await?;
    Ok(serde_json::from_value(value)?)
}

fn decode_list<T: DeserializeOwned>(value: Value) -> Result<Vec<T>> {
    if value.is_null() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_value(value)?)
}
