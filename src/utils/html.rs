//! HTML整形工具：把LLM输出整理为WordPress可直接渲染的干净HTML

use regex::Regex;
use std::sync::LazyLock;

static RE_H3: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^###\s+(.+?)\s*$").unwrap());
static RE_H2: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^##\s+(.+?)\s*$").unwrap());
static RE_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());
static RE_BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*").unwrap());
static RE_ITALIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*([^*\n]+)\*").unwrap());
static RE_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());
static RE_HTML_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<h[1-3][^>]*>(.*?)</h[1-3]>").unwrap());
static RE_STRONG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<strong>(.*?)</strong>").unwrap());
static RE_MD_HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^#\s+(.+)$").unwrap());

/// 把LLM输出整理为HTML。
///
/// 纯markdown内容直接走markdown渲染；混有HTML标签的内容只做残留
/// markdown语法（标题、链接、强调）的逐项清理并补齐段落标签。
pub fn markdownish_to_html(content: &str) -> String {
    let content = content.trim();

    if !content.contains('<') {
        return markdown::to_html(content);
    }

    let mut html = RE_H3.replace_all(content, "<h3>$1</h3>").to_string();
    html = RE_H2.replace_all(&html, "<h2>$1</h2>").to_string();
    html = RE_LINK
        .replace_all(
            &html,
            r#"<a href="$2" target="_blank" rel="noopener noreferrer">$1</a>"#,
        )
        .to_string();
    html = RE_BOLD.replace_all(&html, "<strong>$1</strong>").to_string();
    html = RE_ITALIC.replace_all(&html, "<em>$1</em>").to_string();

    // 没有任何段落标签时，按空行切分补齐<p>
    if !html.contains("<p>") {
        html = html
            .split("\n\n")
            .filter(|p| !p.trim().is_empty())
            .map(|p| {
                let p = p.trim();
                if p.starts_with('<') {
                    p.to_string()
                } else {
                    format!("<p>{}</p>", p.replace('\n', " "))
                }
            })
            .collect::<Vec<_>>()
            .join("\n\n");
    }

    html
}

/// 去除HTML标签，保留纯文本
pub fn strip_tags(html: &str) -> String {
    RE_TAG.replace_all(html, "").to_string()
}

/// 把章节标题转为HTML id使用的slug
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut prev_hyphen = false;

    for c in title.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
            prev_hyphen = false;
        } else if !prev_hyphen && !slug.is_empty() {
            slug.push('-');
            prev_hyphen = true;
        }
    }

    slug.trim_end_matches('-').to_string()
}

/// 从已有内容中提取标题：HTML标题标签优先，其次markdown标题，
/// 最后回落到首行文本
pub fn extract_title(content: &str) -> String {
    let is_html = {
        let lower = content.to_lowercase();
        lower.contains("<html") || lower.contains("<body") || lower.contains("<article")
    };

    if is_html {
        if let Some(cap) = RE_HTML_HEADING.captures(content) {
            let title = strip_tags(&cap[1]).trim().to_string();
            if !title.is_empty() {
                return title;
            }
        }
        if let Some(cap) = RE_STRONG.captures(content) {
            let title = strip_tags(&cap[1]).trim().to_string();
            if !title.is_empty() {
                return title;
            }
        }
    } else {
        if let Some(cap) = RE_MD_HEADING.captures(content) {
            return cap[1].trim().to_string();
        }
        for line in content.lines() {
            let line = line.trim();
            if !line.is_empty() && !line.starts_with('#') {
                let clean = strip_tags(line).trim().to_string();
                if !clean.is_empty() {
                    return clean;
                }
            }
        }
    }

    let first_line = content.lines().next().unwrap_or_default();
    let clean = strip_tags(first_line).trim().to_string();
    if !clean.is_empty() {
        return clean;
    }

    "AI Generated Blog Post".to_string()
}

/// 截取纯文本摘录，超长时截断并追加省略号
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_chars {
        return text.to_string();
    }
    let mut out: String = chars[..max_chars].iter().collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdownish_to_html_pure_markdown() {
        let html = markdownish_to_html("# Title\n\nSome **bold** prose.");
        assert!(html.contains("<h1>"));
        assert!(html.contains("<strong>bold</strong>"));
    }

    #[test]
    fn test_markdownish_to_html_cleans_remnants() {
        let input = "<p>intro</p>\n\n## Leftover Heading\n\nA [link](https://example.com) and **bold**.";
        let html = markdownish_to_html(input);

        assert!(html.contains("<h2>Leftover Heading</h2>"));
        assert!(html.contains(r#"<a href="https://example.com""#));
        assert!(html.contains("<strong>bold</strong>"));
        assert!(!html.contains("## "));
    }

    #[test]
    fn test_markdownish_to_html_wraps_paragraphs() {
        let input = "<h2>Heading</h2>\n\nFirst paragraph.\n\nSecond paragraph.";
        let html = markdownish_to_html(input);

        assert!(html.contains("<p>First paragraph.</p>"));
        assert!(html.contains("<p>Second paragraph.</p>"));
        // 已有的标签不再包裹
        assert!(!html.contains("<p><h2>"));
    }

    #[test]
    fn test_strip_tags() {
        assert_eq!(
            strip_tags("<p>Hello <strong>world</strong></p>"),
            "Hello world"
        );
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Why Rust Wins"), "why-rust-wins");
        assert_eq!(slugify("DeFi: 2.0 — The Sequel!"), "defi-2-0-the-sequel");
        assert_eq!(slugify("  spaces  "), "spaces");
    }

    #[test]
    fn test_extract_title_from_html_heading() {
        let content = "<article><h2>The Real Title</h2><p>body</p></article>";
        assert_eq!(extract_title(content), "The Real Title");
    }

    #[test]
    fn test_extract_title_from_markdown() {
        let content = "# Markdown Title\n\nBody text";
        assert_eq!(extract_title(content), "Markdown Title");
    }

    #[test]
    fn test_extract_title_first_line_fallback() {
        let content = "Just a plain first line\nmore text";
        assert_eq!(extract_title(content), "Just a plain first line");
    }

    #[test]
    fn test_extract_title_ultimate_fallback() {
        assert_eq!(extract_title(""), "AI Generated Blog Post");
    }

    #[test]
    fn test_excerpt() {
        assert_eq!(excerpt("short", 10), "short");
        assert_eq!(excerpt("0123456789abc", 10), "0123456789...");
    }
}
