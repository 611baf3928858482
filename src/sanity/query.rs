use std::collections::BTreeMap;

use serde_json::Value;

/// 一条固定的 GROQ 查询及其参数
///
/// 查询文本在编译期确定，只有参数来自请求。
#[derive(Debug, Clone)]
pub struct Query {
    name: &'static str,
    groq: &'static str,
    params: BTreeMap<String, Value>,
}

impl Query {
    pub fn new(name: &'static str, groq: &'static str) -> Self {
        Self {
            name,
            groq,
            params: BTreeMap::new(),
        }
    }

    /// 绑定参数，在查询中以 `$name` 引用
    pub fn param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// 用于日志的短名称
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn groq(&self) -> &'static str {
        self.groq
    }

    pub fn params(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// 缓存键：查询文本加上按名称排序的 JSON 编码参数
    pub fn cache_key(&self) -> String {
        let mut key = self.groq.to_string();
        for (name, value) in &self.params {
            key.push_str("\n$");
            key.push_str(name);
            key.push('=');
            key.push_str(&value.to_string());
        }
        key
    }
}
