use serde::Deserialize;

use super::{Node, Slug, non_blank, slug};

/// 植物列表投影
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantSummary {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(default, deserialize_with = "non_blank")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "slug::current")]
    pub slug: Option<Slug>,

    #[serde(default, deserialize_with = "non_blank")]
    pub description: Option<String>,

    /// `image.asset->url`
    #[serde(default, deserialize_with = "non_blank")]
    pub image_url: Option<String>,

    #[serde(default)]
    pub care_guide: Option<CareGuideSummary>,
}

/// 列表页引用的养护指南摘要：`careGuide->{title, watering, sunlight}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CareGuideSummary {
    #[serde(default, deserialize_with = "non_blank")]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "non_blank")]
    pub watering: Option<String>,

    #[serde(default, deserialize_with = "non_blank")]
    pub sunlight: Option<String>,
}

/// 植物详情投影
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plant {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(default, deserialize_with = "non_blank")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "non_blank")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "non_blank")]
    pub image_url: Option<String>,

    /// 富文本事实介绍
    #[serde(default)]
    pub fact: Option<Vec<Node>>,

    #[serde(default)]
    pub care_guide: Option<CareGuide>,
}

impl Plant {
    /// 有可渲染内容的事实段落，没有时返回 `None`
    pub fn fact_blocks(&self) -> Option<&[Node]> {
        self.fact
            .as_deref()
            .filter(|nodes| nodes.iter().any(|n| matches!(n, Node::Block(_))))
    }
}

/// 养护指南
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareGuide {
    #[serde(default, deserialize_with = "non_blank")]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "non_blank")]
    pub watering_instructions: Option<String>,

    #[serde(default, deserialize_with = "non_blank")]
    pub light_requirements: Option<String>,

    #[serde(default, deserialize_with = "non_blank")]
    pub soil_type: Option<String>,

    #[serde(default, deserialize_with = "non_blank")]
    pub fertilizer: Option<String>,

    #[serde(default, deserialize_with = "non_blank")]
    pub difficulty: Option<String>,
}

/// 养护指南中的一项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CareField<'a> {
    pub label: &'static str,
    pub value: &'a str,
    /// 展示时首字母大写
    pub capitalize: bool,
}

impl CareGuide {
    /// 按固定顺序返回非空的字段：浇水、光照、土壤、肥料、难度
    pub fn fields(&self) -> Vec<CareField<'_>> {
        [
            ("Watering", &self.watering_instructions, false),
            ("Light", &self.light_requirements, true),
            ("Soil", &self.soil_type, false),
            ("Fertilizer", &self.fertilizer, false),
            ("Difficulty", &self.difficulty, true),
        ]
        .into_iter()
        .filter_map(|(label, value, capitalize)| {
            value.as_deref().map(|value| CareField {
                label,
                value,
                capitalize,
            })
        })
        .collect()
    }
}
