//! 大纲规整与解析：LLM返回的大纲文本并不总是符合约定格式，
//! 这里先做规整，再拆出标题与章节列表

use regex::Regex;
use std::sync::LazyLock;

/// 章节标题里只保留字母数字、冒号、句点与空白
static RE_SECTION_TITLE_CLEAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^:\w\s.]").unwrap());

/// 大纲中的一个章节
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineSection {
    pub title: String,
    pub description: String,
}

/// 规整大纲文本：确保章节行以##开头；完全没有章节标记时
/// 按行长启发式补出章节结构
pub fn normalize_outline(outline: &str) -> String {
    let mut formatted_lines: Vec<String> = Vec::new();
    let mut has_sections = false;

    for line in outline.trim().lines() {
        let line = line.trim();
        if line.is_empty() {
            formatted_lines.push(String::new());
            continue;
        }

        let lower = line.to_lowercase();
        if (lower.starts_with("section")
            || lower.starts_with("part")
            || lower.starts_with("body")
            || lower.starts_with("main point"))
            && !line.starts_with('#')
        {
            formatted_lines.push(format!("## {}", line));
            has_sections = true;
        } else {
            if line.starts_with("# ") || line.starts_with("##") {
                has_sections = true;
            }
            formatted_lines.push(line.to_string());
        }
    }

    if has_sections {
        return formatted_lines.join("\n");
    }

    // 没有任何章节标记：首个非空行当标题，其余短行视为章节标题，
    // 长行提取前几个词作章节标题并保留原句为描述
    let mut structured: Vec<String> = Vec::new();
    let mut title_added = false;

    for line in formatted_lines {
        if line.is_empty() {
            structured.push(line);
            continue;
        }

        if !title_added && !line.starts_with('#') {
            structured.push(line);
            title_added = true;
        } else if title_added && !line.starts_with('#') {
            let word_count = line.split_whitespace().count();
            if word_count <= 8 {
                structured.push(format!("## {}", line));
            } else {
                let head: Vec<&str> = line.split_whitespace().take(4).collect();
                structured.push(format!("## {}...", head.join(" ")));
                structured.push(line);
            }
        } else {
            structured.push(line);
        }
    }

    structured.join("\n")
}

/// 解析大纲为（标题, 章节列表）
pub fn parse_outline(outline: &str) -> (Option<String>, Vec<OutlineSection>) {
    let mut title: Option<String> = None;
    let mut sections: Vec<OutlineSection> = Vec::new();
    let mut current_section: Option<String> = None;
    let mut description: Vec<String> = Vec::new();

    let mut push_section =
        |current: &mut Option<String>, description: &mut Vec<String>, sections: &mut Vec<OutlineSection>| {
            if let Some(section_title) = current.take() {
                let clean_title = RE_SECTION_TITLE_CLEAN
                    .replace_all(&section_title, "")
                    .trim()
                    .to_string();
                sections.push(OutlineSection {
                    title: clean_title,
                    description: description.join(" "),
                });
                description.clear();
            }
        };

    for line in outline.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if title.is_none() {
            title = Some(line.trim_start_matches('#').trim().to_string());
            continue;
        }

        if line.starts_with("##") {
            push_section(&mut current_section, &mut description, &mut sections);
            current_section = Some(line.trim_start_matches('#').trim().to_string());
        } else if current_section.is_some() && !line.starts_with('#') {
            // 章节描述行，去掉列表标记
            description.push(
                line.trim_start_matches('*')
                    .trim_start_matches('-')
                    .trim()
                    .to_string(),
            );
        }
    }

    push_section(&mut current_section, &mut description, &mut sections);

    (title, sections)
}

/// 大纲生成失败时的兜底结构
pub fn fallback_outline(topic_title: &str) -> String {
    format!(
        "{}\n\n## Introduction\n* Introduction to the topic\n\n## Main Point 1\n* First main point about the topic\n\n## Main Point 2\n* Second main point about the topic\n\n## Conclusion\n* Conclusion and summary",
        topic_title
    )
}

/// 解析结果为空时使用的默认章节
pub fn default_sections() -> Vec<OutlineSection> {
    vec![
        OutlineSection {
            title: "Introduction".to_string(),
            description: "Introduction to the topic".to_string(),
        },
        OutlineSection {
            title: "Main Point 1".to_string(),
            description: "First main point about the topic".to_string(),
        },
        OutlineSection {
            title: "Main Point 2".to_string(),
            description: "Second main point about the topic".to_string(),
        },
        OutlineSection {
            title: "Conclusion".to_string(),
            description: "Conclusion and summary of the topic".to_string(),
        },
    ]
}
