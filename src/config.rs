use std::{net::SocketAddr, path::PathBuf, time::Duration};

use crate::error::{Error, Result};

const DEFAULT_DATASET: &str = "production";
const DEFAULT_API_VERSION: &str = "2024-01-01";
const DEFAULT_REVALIDATE_SECS: u64 = 30;
const DEFAULT_LISTEN: &str = "0.0.0.0:3000";

/// 内容后端连接配置
#[derive(Debug, Clone)]
pub struct SanityConfig {
    /// 项目 ID，用于拼接默认 API 域名
    pub project_id: String,
    /// 数据集，例如 `production`
    pub dataset: String,
    /// API 版本日期，例如 `2024-01-01`
    pub api_version: String,
    /// 可选的读取 token
    pub token: Option<String>,
    /// 是否走 CDN（`apicdn.sanity.io`）
    pub use_cdn: bool,
    /// 显式指定的 API 地址，测试时指向本地 mock 服务
    pub api_host: Option<String>,
}

impl SanityConfig {
    /// 查询接口的基础地址，不带末尾 `/`
    pub fn base_url(&self) -> String {
        let host = match &self.api_host {
            Some(host) => host.trim_end_matches('/').to_string(),
            None if self.use_cdn => format!("https://{}.apicdn.sanity.io", self.project_id),
            None => format!("https://{}.api.sanity.io", self.project_id),
        };

        format!("{}/v{}/data/query/{}", host, self.api_version, self.dataset)
    }
}

/// 应用配置
#[derive(Debug, Clone)]
pub struct Config {
    pub sanity: SanityConfig,
    /// 查询结果的缓存时长，过期后重新请求
    pub revalidate: Duration,
    /// HTTP 监听地址
    pub listen: SocketAddr,
}

impl Config {
    /// 从环境变量读取配置
    ///
    /// 会先尝试加载当前目录下的 `.env` 文件；文件不存在时忽略，格式错误时报错。
    pub fn from_env() -> Result<Self> {
        if let Some(path) = check_dotenv(dotenvy::dotenv())? {
            tracing::debug!(path = %path.display(), "loaded .env");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 通过查找函数构建配置，便于在测试中替代进程环境变量
    ///
    /// - `SANITY_PROJECT_ID` 必填
    /// - `SANITY_DATASET` 默认 `production`
    /// - `SANITY_API_VERSION` 默认 `2024-01-01`
    /// - `SANITY_API_TOKEN` 可选
    /// - `SANITY_USE_CDN` 默认 `true`
    /// - `SANITY_API_HOST` 可选
    /// - `PLANTFOLIO_REVALIDATE_SECS` 默认 `30`
    /// - `PLANTFOLIO_LISTEN` 默认 `0.0.0.0:3000`
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let project_id =
            var("SANITY_PROJECT_ID").ok_or_else(|| Error::Config("SANITY_PROJECT_ID not set".into()))?;

        let use_cdn = match var("SANITY_USE_CDN") {
            Some(v) => parse_bool(&v)
                .ok_or_else(|| Error::Config(format!("SANITY_USE_CDN: invalid bool `{}`", v)))?,
            None => true,
        };

        let revalidate = match var("PLANTFOLIO_REVALIDATE_SECS") {
            Some(v) => v.trim().parse::<u64>().map_err(|e| {
                Error::Config(format!("PLANTFOLIO_REVALIDATE_SECS: {}", e))
            })?,
            None => DEFAULT_REVALIDATE_SECS,
        };

        let listen = var("PLANTFOLIO_LISTEN")
            .unwrap_or_else(|| DEFAULT_LISTEN.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| Error::Config(format!("PLANTFOLIO_LISTEN: {}", e)))?;

        Ok(Self {
            sanity: SanityConfig {
                project_id,
                dataset: var("SANITY_DATASET").unwrap_or_else(|| DEFAULT_DATASET.to_string()),
                api_version: var("SANITY_API_VERSION")
                    .map(|v| v.trim_start_matches('v').to_string())
                    .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
                token: var("SANITY_API_TOKEN"),
                use_cdn,
                api_host: var("SANITY_API_HOST"),
            },
            revalidate: Duration::from_secs(revalidate),
            listen,
        })
    }
}

/// 只忽略 `.env` 不存在的情况
fn check_dotenv(result: dotenvy::Result<PathBuf>) -> Result<Option<PathBuf>> {
    match result {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(Error::Config(format!(".env: {}", e))),
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
