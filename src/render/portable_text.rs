use super::Markup;
use crate::content::{Block, ListKind, Node, SpanNode};

const PARAGRAPH_CLASS: &str = "mb-3 leading-relaxed text-gray-200";
const HEADING_CLASS: &str = "mt-6 mb-2 text-xl font-semibold text-emerald-300";
const STRONG_CLASS: &str = "font-semibold text-emerald-200";
const LINK_CLASS: &str = "underline decoration-emerald-400 underline-offset-2 hover:text-emerald-300";
const BULLET_CLASS: &str = "my-3 ml-6 list-disc space-y-1 text-gray-200";
const NUMBER_CLASS: &str = "my-3 ml-6 list-decimal space-y-1 text-gray-200";

/// 将富文本块渲染为 HTML
///
/// 连续的列表项合并到同一个 `<ul>`/`<ol>` 中，非 `block` 节点跳过。
pub fn render_blocks(m: &mut Markup, nodes: &[Node]) {
    let mut open_list: Option<&'static str> = None;

    for node in nodes {
        let Node::Block(block) = node else {
            continue;
        };

        match block.list_item {
            Some(kind) => {
                let tag = list_tag(kind);
                if open_list != Some(tag) {
                    if let Some(prev) = open_list.take() {
                        m.close(prev);
                    }
                    let class = if tag == "ol" { NUMBER_CLASS } else { BULLET_CLASS };
                    m.open(tag, &[("class", class)]);
                    open_list = Some(tag);
                }
                m.open("li", &[]);
                render_spans(m, block);
                m.close("li");
            }
            None => {
                if let Some(prev) = open_list.take() {
                    m.close(prev);
                }
                render_block(m, block);
            }
        }
    }

    if let Some(prev) = open_list {
        m.close(prev);
    }
}

fn list_tag(kind: ListKind) -> &'static str {
    match kind {
        ListKind::Number => "ol",
        ListKind::Bullet | ListKind::Unknown => "ul",
    }
}

fn render_block(m: &mut Markup, block: &Block) {
    let (tag, class) = match block.style.as_str() {
        "h1" => ("h1", None),
        "h2" => ("h2", Some(HEADING_CLASS)),
        "h3" => ("h3", None),
        "h4" => ("h4", None),
        "blockquote" => ("blockquote", None),
        _ => ("p", Some(PARAGRAPH_CLASS)),
    };

    match class {
        Some(class) => m.open(tag, &[("class", class)]),
        None => m.open(tag, &[]),
    };
    render_spans(m, block);
    m.close(tag);
}

fn render_spans(m: &mut Markup, block: &Block) {
    for child in &block.children {
        let SpanNode::Span(span) = child else {
            continue;
        };

        let mut closers = Vec::with_capacity(span.marks.len());
        for mark in &span.marks {
            if let Some(closer) = open_mark(m, block, mark) {
                closers.push(closer);
            }
        }

        let mut lines = span.text.split('\n');
        if let Some(first) = lines.next() {
            m.text(first);
        }
        for line in lines {
            m.raw("<br/>").text(line);
        }

        for closer in closers.into_iter().rev() {
            m.close(closer);
        }
    }
}

/// 写入标记的开始标签，返回需要关闭的标签名；未知标记不输出
fn open_mark(m: &mut Markup, block: &Block, mark: &str) -> Option<&'static str> {
    match mark {
        "strong" => {
            m.open("strong", &[("class", STRONG_CLASS)]);
            Some("strong")
        }
        "em" => {
            m.open("em", &[]);
            Some("em")
        }
        "code" => {
            m.open("code", &[]);
            Some("code")
        }
        "underline" => {
            m.open("u", &[]);
            Some("u")
        }
        "strike-through" => {
            m.open("s", &[]);
            Some("s")
        }
        key => {
            let def = block.mark_def(key)?;
            if def.kind != "link" {
                return None;
            }

            let href = def.href.as_deref().filter(|h| !h.is_empty()).unwrap_or("#");
            if href.starts_with("http") {
                m.open(
                    "a",
                    &[
                        ("href", href),
                        ("target", "_blank"),
                        ("rel", "noreferrer noopener"),
                        ("class", LINK_CLASS),
                    ],
                );
            } else {
                m.open("a", &[("href", href), ("class", LINK_CLASS)]);
            }
            Some("a")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(json: &str) -> String {
        let nodes: Vec<Node> = serde_json::from_str(json).expect("富文本解析失败");
        let mut m = Markup::new();
        render_blocks(&mut m, &nodes);
        m.into_string()
    }

    #[test]
    fn test_paragraph_and_heading() {
        let html = render(
            r#"[
                {"_type": "block", "style": "h2", "children": [{"_type": "span", "text": "Visste du?"}]},
                {"_type": "block", "children": [{"_type": "span", "text": "Bregner er eldgamle."}]}
            ]"#,
        );

        assert_eq!(
            html,
            format!(
                r#"<h2 class="{}">Visste du?</h2><p class="{}">Bregner er eldgamle.</p>"#,
                HEADING_CLASS, PARAGRAPH_CLASS
            )
        );
    }

    #[test]
    fn test_marks_nest_in_order() {
        let html = render(
            r#"[{"_type": "block", "children": [
                {"_type": "span", "text": "fet", "marks": ["strong", "em"]},
                {"_type": "span", "text": " og "},
                {"_type": "span", "text": "ukjent", "marks": ["sparkle"]}
            ]}]"#,
        );

        assert!(html.contains(&format!(
            r#"<strong class="{}"><em>fet</em></strong> og ukjent"#,
            STRONG_CLASS
        )));
    }

    #[test]
    fn test_links() {
        let html = render(
            r#"[{"_type": "block",
                "markDefs": [
                    {"_key": "ext", "_type": "link", "href": "https://example.com/?a=1&b=2"},
                    {"_key": "int", "_type": "link", "href": "/plants/fern"},
                    {"_key": "none", "_type": "link"}
                ],
                "children": [
                    {"_type": "span", "text": "ute", "marks": ["ext"]},
                    {"_type": "span", "text": "inne", "marks": ["int"]},
                    {"_type": "span", "text": "tom", "marks": ["none"]}
                ]}]"#,
        );

        assert!(html.contains(
            r#"<a href="https://example.com/?a=1&amp;b=2" target="_blank" rel="noreferrer noopener""#
        ));
        assert!(html.contains(&format!(r#"<a href="/plants/fern" class="{}">inne</a>"#, LINK_CLASS)));
        assert!(html.contains(&format!(r##"<a href="#" class="{}">tom</a>"##, LINK_CLASS)));
    }

    #[test]
    fn test_consecutive_list_items_grouped() {
        let html = render(
            r#"[
                {"_type": "block", "listItem": "bullet", "children": [{"_type": "span", "text": "a"}]},
                {"_type": "block", "listItem": "bullet", "children": [{"_type": "span", "text": "b"}]},
                {"_type": "block", "listItem": "number", "children": [{"_type": "span", "text": "1"}]},
                {"_type": "block", "children": [{"_type": "span", "text": "slutt"}]}
            ]"#,
        );

        assert_eq!(html.matches("<ul").count(), 1);
        assert_eq!(html.matches("<ol").count(), 1);
        assert!(html.contains("<li>a</li><li>b</li></ul><ol"));
        assert!(html.contains("<li>1</li></ol><p"));
    }

    #[test]
    fn test_list_closed_at_end() {
        let html = render(
            r#"[{"_type": "block", "listItem": "bullet", "children": [{"_type": "span", "text": "x"}]}]"#,
        );
        assert!(html.ends_with("</li></ul>"));
    }

    #[test]
    fn test_skips_non_blocks_and_escapes() {
        let html = render(
            r#"[
                {"_type": "image", "asset": {"_ref": "img"}},
                {"_type": "block", "children": [{"_type": "span", "text": "<b>\nlinje"}]}
            ]"#,
        );

        assert!(!html.contains("img"));
        assert!(html.contains("&lt;b&gt;<br/>linje"));
    }
}
