mod client;
mod projection;
mod query;

pub use self::{
    client::SanityClient,
    projection::{PLANT, PLANTS, POSTS, plant, plants, posts},
    query::Query,
};

use serde_json::Value;

use crate::error::Result;

/// 内容来源
///
/// 执行一条 GROQ 查询并返回原始 JSON 结果。没有匹配文档的单文档查询返回 `null`。
pub trait ContentSource: Send + Sync {
    fn fetch(&self, query: &Query) -> impl std::future::Future<Output = Result<Value>> + Send;
}
