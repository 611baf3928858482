mod plant;
mod portable_text;
mod post;
mod slug;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

pub use self::{
    plant::{CareField, CareGuide, CareGuideSummary, Plant, PlantSummary},
    portable_text::{Block, ListKind, MarkDef, Node, Span, SpanNode},
    post::Post,
    slug::Slug,
};

/// 反序列化可选字符串，空白字符串视为缺失
pub(crate) fn non_blank<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

/// 反序列化 RFC 3339 时间，无法解析时记录警告并视为缺失
pub(crate) fn timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(s) = non_blank(deserializer)? else {
        return Ok(None);
    };

    match DateTime::parse_from_rfc3339(&s) {
        Ok(dt) => Ok(Some(dt.with_timezone(&Utc))),
        Err(e) => {
            tracing::warn!(%e, value = %s, "ignoring unparseable timestamp");
            Ok(None)
        }
    }
}
