use axum::http::{HeaderMap, HeaderValue};
use reqwest::header;
use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;

use super::{ContentSource, Query};
use crate::{
    config::SanityConfig,
    error::{Error, Result},
};

/// 通过 HTTP 查询接口读取内容库
///
/// 请求形如 `GET {base}/v{version}/data/query/{dataset}?query=...&$slug="..."`，
/// 参数值按 JSON 编码。
#[derive(Clone)]
pub struct SanityClient {
    client: reqwest::Client,
    base_url: String,
}

impl SanityClient {
    pub fn new(config: &SanityConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = &config.token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| Error::Config("SANITY_API_TOKEN contains invalid characters".into()))?;
            headers.insert(header::AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url(),
        })
    }
}

/// 查询接口的响应包装，只关心 `result`
#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    result: Value,
    #[serde(default)]
    ms: Option<u64>,
}

impl ContentSource for SanityClient {
    #[instrument(name = "content query", skip_all, fields(query = query.name()))]
    async fn fetch(&self, query: &Query) -> Result<Value> {
        let mut pairs = vec![("query".to_string(), query.groq().to_string())];
        pairs.extend(
            query
                .params()
                .map(|(name, value)| (format!("${}", name), value.to_string())),
        );

        let resp = self
            .client
            .get(&self.base_url)
            .query(&pairs)
            .send()
            .await?
            .error_for_status()?;

        let body: QueryResponse = resp.json().await?;
        tracing::debug!(ms = body.ms, "query finished");

        Ok(body.result)
    }
}

#[cfg(test)]
mod tests {
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{header, method, path, query_param},
    };

    use super::*;

    fn config(server: &MockServer, token: Option<&str>) -> SanityConfig {
        SanityConfig {
            project_id: "test".into(),
            dataset: "production".into(),
            api_version: "2024-01-01".into(),
            token: token.map(str::to_string),
            use_cdn: false,
            api_host: Some(server.uri()),
        }
    }

    #[tokio::test]
    async fn test_fetch_sends_query_and_params() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2024-01-01/data/query/production"))
            .and(query_param("query", "*[slug.current == $slug][0]"))
            .and(query_param("$slug", "\"fern\""))
            .and(header("authorization", "Bearer secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ms": 3,
                "query": "*[slug.current == $slug][0]",
                "result": {"_id": "p1"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = SanityClient::new(&config(&server, Some("secret"))).unwrap();
        let query = Query::new("plant", "*[slug.current == $slug][0]").param("slug", "fern");
        let value = client.fetch(&query).await.unwrap();

        assert_eq!(value["_id"], "p1");
    }

    #[tokio::test]
    async fn test_fetch_missing_result_is_null() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ms": 1})))
            .mount(&server)
            .await;

        let client = SanityClient::new(&config(&server, None)).unwrap();
        let value = client.fetch(&Query::new("q", "*[0]")).await.unwrap();

        assert!(value.is_null());
    }

    #[tokio::test]
    async fn test_fetch_backend_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = SanityClient::new(&config(&server, None)).unwrap();
        let result = client.fetch(&Query::new("q", "*")).await;

        assert!(matches!(result, Err(Error::Reqwest(_))));
    }

    #[test]
    fn test_invalid_token_is_config_error() {
        let config = SanityConfig {
            project_id: "test".into(),
            dataset: "production".into(),
            api_version: "2024-01-01".into(),
            token: Some("bad\ntoken".into()),
            use_cdn: true,
            api_host: None,
        };

        assert!(matches!(SanityClient::new(&config), Err(Error::Config(_))));
    }
}
