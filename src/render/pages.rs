use super::{Markup, portable_text};
use crate::content::{CareGuide, Plant, PlantSummary, Post};

const SITE_TITLE: &str = "Elmir sine planter";
const GREETING: &str = "Hei, jeg heter Elmir og jeg elsker planter!";
const UNTITLED: &str = "Untitled";
const CONTAINER_CLASS: &str = "container mx-auto min-h-screen max-w-3xl p-8";

/// 页面外壳：`<!DOCTYPE html>`、`<head>` 和 `<body>`
fn layout(title: &str, body: impl FnOnce(&mut Markup)) -> String {
    let mut m = Markup::new();
    m.raw("<!DOCTYPE html>")
        .open("html", &[("lang", "no")])
        .open("head", &[])
        .raw(r#"<meta charset="utf-8"><meta name="viewport" content="width=device-width, initial-scale=1">"#)
        .element("title", &[], title)
        .close("head")
        .open("body", &[]);
    body(&mut m);
    m.close("body").close("html");
    m.into_string()
}

/// 首页：问候语和文章列表
pub fn index_page(posts: &[Post]) -> String {
    layout(SITE_TITLE, |m| {
        m.open("main", &[("class", CONTAINER_CLASS)]);
        m.element("p", &[("class", "mb-4 text-xl")], GREETING);
        m.element("h1", &[("class", "mb-8 text-4xl font-bold")], "Posts");

        if posts.is_empty() {
            m.element("p", &[("class", "text-gray-500")], "No posts yet.");
        } else {
            m.open("ul", &[("class", "flex flex-col gap-y-4")]);
            for post in posts {
                m.open("li", &[("class", "hover:underline"), ("data-id", post.id.as_str())]);
                m.element(
                    "h2",
                    &[("class", "text-xl font-semibold")],
                    post.title.as_deref().unwrap_or(UNTITLED),
                );
                if let Some(published) = post.published_at {
                    let datetime = published.to_rfc3339();
                    let date = published.format("%Y-%m-%d").to_string();
                    m.element("time", &[("datetime", datetime.as_str())], &date);
                }
                m.close("li");
            }
            m.close("ul");
        }

        m.close("main");
    })
}

/// 植物列表页
pub fn plants_page(plants: &[PlantSummary]) -> String {
    layout(SITE_TITLE, |m| {
        m.open("main", &[("class", CONTAINER_CLASS)]);
        m.element("p", &[("class", "mb-4 text-xl")], GREETING);
        m.element("h2", &[("class", "mb-4 text-2xl font-bold")], "Plant Collection");

        m.open("ul", &[("class", "space-y-6")]);
        for plant in plants {
            let name = plant.name.as_deref().unwrap_or_default();

            m.open(
                "li",
                &[("class", "rounded-lg border p-4 shadow-sm"), ("data-id", plant.id.as_str())],
            );
            if let Some(url) = &plant.image_url {
                m.open(
                    "img",
                    &[
                        ("src", url.as_str()),
                        ("alt", name),
                        ("class", "mb-3 h-48 w-full rounded-md object-cover"),
                    ],
                );
            }

            m.open("h3", &[("class", "text-xl font-semibold")]);
            match &plant.slug {
                Some(slug) => {
                    let href = plant_href(slug.as_str());
                    m.element("a", &[("href", href.as_str())], name);
                }
                None => {
                    m.text(name);
                }
            }
            m.close("h3");

            if let Some(description) = &plant.description {
                m.element("p", &[("class", "text-gray-700")], description);
            }

            if let Some(guide) = &plant.care_guide {
                let summary: Vec<&str> = [&guide.title, &guide.watering, &guide.sunlight]
                    .into_iter()
                    .filter_map(|v| v.as_deref())
                    .collect();
                if !summary.is_empty() {
                    m.element(
                        "p",
                        &[("class", "mt-2 text-sm text-emerald-700")],
                        &summary.join(" · "),
                    );
                }
            }
            m.close("li");
        }
        m.close("ul");

        m.close("main");
    })
}

/// 详情页地址，slug 作为单个路径段编码
fn plant_href(slug: &str) -> String {
    format!("/plants/{}", urlencoding::encode(slug))
}

/// 植物详情页
///
/// 没有图片、事实介绍或养护指南时，对应区域整体省略。
pub fn plant_page(plant: &Plant) -> String {
    let name = plant.name.as_deref().unwrap_or(UNTITLED);
    let title = format!("{} | {}", name, SITE_TITLE);

    layout(&title, |m| {
        m.open("main", &[("class", CONTAINER_CLASS)]);
        m.element("h1", &[("class", "mb-4 text-3xl font-bold")], name);

        if let Some(url) = &plant.image_url {
            m.open(
                "img",
                &[
                    ("src", url.as_str()),
                    ("alt", name),
                    ("width", "600"),
                    ("height", "400"),
                    ("class", "mb-6 rounded-lg object-cover"),
                ],
            );
        }

        if let Some(description) = &plant.description {
            m.element("p", &[("class", "text-gray-700")], description);
        }

        if let Some(blocks) = plant.fact_blocks() {
            m.open(
                "section",
                &[(
                    "class",
                    "mt-6 rounded-2xl border border-emerald-700/40 bg-emerald-900/40 p-4 sm:p-5",
                )],
            );
            m.element(
                "h2",
                &[(
                    "class",
                    "mb-2 flex items-center gap-2 text-base font-semibold text-emerald-200",
                )],
                "🧪 Plant Facts",
            );
            m.open("div", &[("class", "text-sm leading-relaxed text-emerald-50/90")]);
            portable_text::render_blocks(m, blocks);
            m.close("div");
            m.close("section");
        }

        if let Some(guide) = &plant.care_guide {
            care_guide_section(m, guide);
        }

        m.close("main");
    })
}

fn care_guide_section(m: &mut Markup, guide: &CareGuide) {
    m.open(
        "section",
        &[(
            "class",
            "mt-8 rounded-xl border border-emerald-800/50 bg-emerald-900/20 p-6",
        )],
    );
    m.element(
        "h2",
        &[("class", "mb-3 text-lg font-semibold text-emerald-100")],
        guide.title.as_deref().unwrap_or("Care Guide"),
    );

    m.open("dl", &[("class", "space-y-2 text-sm text-emerald-50")]);
    for field in guide.fields() {
        m.open("div", &[("class", "flex gap-2")]);
        m.element(
            "dt",
            &[("class", "font-semibold text-emerald-200")],
            &format!("{}:", field.label),
        );
        if field.capitalize {
            m.element("dd", &[("class", "capitalize")], field.value);
        } else {
            m.element("dd", &[], field.value);
        }
        m.close("div");
    }
    m.close("dl");

    m.close("section");
}

/// 找不到植物时的页面
pub fn not_found_page() -> String {
    layout(SITE_TITLE, |m| {
        m.element("main", &[("class", "p-8")], "Plant not found");
    })
}
