use std::time::Duration;

use axum::extract::FromRef;

use crate::{cache::Revalidate, sanity::SanityClient};

/// 带缓存的内容来源
pub type Source = Revalidate<SanityClient>;

/// 应用程序上下文
///
/// [`AppState`] 持有带缓存的内容来源，所有请求共享同一份缓存。
#[derive(Clone, FromRef)]
pub struct AppState {
    source: Source,
}

impl AppState {
    /// 创建一个新的 [`AppState`] 实例，查询结果缓存 `revalidate` 时长
    pub fn new(client: SanityClient, revalidate: Duration) -> Self {
        Self {
            source: Revalidate::new(client, revalidate),
        }
    }

    /// 获取内容来源
    pub fn source(&self) -> &Source {
        &self.source
    }
}
