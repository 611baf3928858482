use std::fmt;

use serde::{Deserialize, Deserializer};

use crate::error::{Error, Result};

/// 文档的 slug，详情页按它查找文档
///
/// 保证非空，前后空白已去除。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slug(String);

impl Slug {
    pub fn new(s: impl AsRef<str>) -> Result<Self> {
        let s = s.as_ref().trim();
        if s.is_empty() {
            return Err(Error::FormatError("slug must not be empty"));
        }
        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Deserialize)]
struct SlugObject {
    current: Option<String>,
}

/// 从 `{ "_type": "slug", "current": "..." }` 取出 `current`
pub(crate) fn current<'de, D>(deserializer: D) -> std::result::Result<Option<Slug>, D::Error>
where
    D: Deserializer<'de>,
{
    let object = Option::<SlugObject>::deserialize(deserializer)?;
    Ok(object
        .and_then(|o| o.current)
        .and_then(|s| Slug::new(s).ok()))
}
