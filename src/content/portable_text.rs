use serde::Deserialize;

/// 富文本数组中的一个节点
///
/// 只识别 `block`，图片等其它类型反序列化为 [`Node::Other`]，渲染时跳过。
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "_type", rename_all = "camelCase")]
pub enum Node {
    Block(Block),
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// `normal`、`h1`..`h4`、`blockquote`
    #[serde(default = "normal_style")]
    pub style: String,

    #[serde(default)]
    pub list_item: Option<ListKind>,

    #[serde(default)]
    pub children: Vec<SpanNode>,

    #[serde(default)]
    pub mark_defs: Vec<MarkDef>,
}

fn normal_style() -> String {
    "normal".to_string()
}

impl Block {
    /// 按 key 查找注解定义
    pub fn mark_def(&self, key: &str) -> Option<&MarkDef> {
        self.mark_defs.iter().find(|def| def.key == key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ListKind {
    Bullet,
    Number,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "_type", rename_all = "camelCase")]
pub enum SpanNode {
    Span(Span),
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Span {
    #[serde(default)]
    pub text: String,

    /// 装饰（`strong`、`em`…）或指向 `markDefs` 的 key
    #[serde(default)]
    pub marks: Vec<String>,
}

/// 注解定义，目前只用到链接
#[derive(Debug, Clone, Deserialize)]
pub struct MarkDef {
    #[serde(rename = "_key")]
    pub key: String,

    #[serde(rename = "_type")]
    pub kind: String,

    #[serde(default)]
    pub href: Option<String>,
}
