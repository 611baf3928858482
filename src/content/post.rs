use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{Slug, non_blank, slug, timestamp};

/// 文章投影：`{_id, title, slug, publishedAt}`
#[derive(Debug, Clone, Deserialize)]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(default, deserialize_with = "non_blank")]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "slug::current")]
    pub slug: Option<Slug>,

    #[serde(default, rename = "publishedAt", deserialize_with = "timestamp")]
    pub published_at: Option<DateTime<Utc>>,
}
