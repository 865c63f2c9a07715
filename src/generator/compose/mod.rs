//! 正文生成阶段。
//!
//! `Article` 模式单次推理直接产出全文；`Sectioned` 模式先生成大纲，
//! 解析后逐节撰写再拼装为HTML。大纲失败有兜底结构，章节撰写失败
//! 则整轮运行失败。

pub mod agents;
pub mod outline;

use anyhow::Result;

use crate::generator::context::GeneratorContext;
use crate::generator::memory::{MemoryScope, ScopedKeys};
use crate::generator::writer_agent::WriterAgent;
use crate::style::Structure;
use crate::types::post::{GenerationRequest, TopicProposal};
use crate::utils::html::{markdownish_to_html, slugify};

use agents::article_writer::ArticleWriter;
use agents::outline_planner::OutlinePlanner;
use agents::section_writer::SectionWriter;
use outline::{OutlineSection, default_sections, fallback_outline, normalize_outline, parse_outline};

/// 执行正文生成，返回（标题, HTML正文）
pub async fn execute(
    context: &GeneratorContext,
    request: &GenerationRequest,
) -> Result<(String, String)> {
    let topic: TopicProposal = context
        .get_from_memory(MemoryScope::DRAFT, ScopedKeys::TOPIC)
        .await
        .ok_or_else(|| anyhow::anyhow!("正文生成前必须先完成主题解析"))?;

    println!("✍️ 正在生成正文...");
    println!("   主题: {}", topic.title);
    println!("   目标字数: {}", request.target_words);
    println!("   结构模式: {}", request.structure);

    let (title, body) = match request.structure {
        Structure::Article => compose_single_pass(context, &topic, request).await?,
        Structure::Sectioned => compose_sectioned(context, &topic, request).await?,
    };

    if body.trim().is_empty() {
        anyhow::bail!("正文生成结果为空");
    }

    context
        .store_to_memory(MemoryScope::DRAFT, ScopedKeys::BODY, &body)
        .await?;

    println!("✅ 正文生成完成，约 {} 词", body.split_whitespace().count());

    Ok((title, body))
}

/// 单次推理模式：一次调用产出全文
async fn compose_single_pass(
    context: &GeneratorContext,
    topic: &TopicProposal,
    request: &GenerationRequest,
) -> Result<(String, String)> {
    let writer = ArticleWriter {
        target_words: request.target_words,
    };

    let body = writer.execute(context).await?;
    let body = markdownish_to_html(&body);

    Ok((topic.title.clone(), body))
}

/// 大纲分节模式：大纲 -> 逐节撰写 -> 拼装
async fn compose_sectioned(
    context: &GeneratorContext,
    topic: &TopicProposal,
    request: &GenerationRequest,
) -> Result<(String, String)> {
    // 1. 生成大纲（失败时回落到固定结构）
    println!("   步骤1: 生成大纲...");
    let raw_outline = match OutlinePlanner.execute(context).await {
        Ok(outline) => outline,
        Err(e) => {
            eprintln!("⚠️ 大纲生成失败: {}，使用兜底大纲", e);
            fallback_outline(&topic.title)
        }
    };

    let outline_text = normalize_outline(&raw_outline);
    context
        .store_to_memory(MemoryScope::DRAFT, ScopedKeys::OUTLINE, &outline_text)
        .await?;

    if context.config.verbose {
        println!("\n=== 大纲 ===\n{}\n============\n", outline_text);
    }

    // 2. 解析大纲
    let (parsed_title, mut sections) = parse_outline(&outline_text);
    let title = match parsed_title {
        Some(t) if !t.is_empty() => t,
        _ => {
            eprintln!("⚠️ 大纲中未找到标题，使用选题标题");
            topic.title.clone()
        }
    };
    if sections.is_empty() {
        eprintln!("⚠️ 大纲中未找到章节，使用默认结构");
        sections = default_sections();
    }

    // 3. 逐节撰写
    println!("   步骤2: 逐节撰写 ({} 节)...", sections.len());
    let section_words = section_word_budget(request.target_words, &sections);

    let mut written: Vec<(String, String)> = Vec::with_capacity(sections.len());
    for (i, section) in sections.iter().enumerate() {
        println!(
            "   生成章节 {}/{}: {}",
            i + 1,
            sections.len(),
            section.title
        );

        let writer = SectionWriter {
            post_title: title.clone(),
            section_title: section.title.clone(),
            section_description: section.description.clone(),
            outline: outline_text.clone(),
            target_words: section_words,
        };

        // 章节撰写失败是致命错误
        let content = writer.execute(context).await?;
        written.push((section.title.clone(), markdownish_to_html(&content)));
    }

    // 4. 拼装HTML
    let body = assemble_article(&written);
    Ok((title, body))
}

/// 把已撰写的章节拼装为带语义标签的HTML文章
pub fn assemble_article(sections: &[(String, String)]) -> String {
    let mut html = String::from("<article class=\"blog-post\">\n");

    for (title, content) in sections {
        let section_id = slugify(title);
        html.push_str(&format!(
            "<section class=\"content-section\" id=\"{}\">\n",
            section_id
        ));
        html.push_str(&format!("<h2>{}</h2>\n", title));
        html.push_str(content);
        html.push_str("\n</section>\n\n");
    }

    html.push_str("</article>");
    html
}

/// 按大纲章节数分摊全文字数
pub fn section_word_budget(total_words: u32, sections: &[OutlineSection]) -> u32 {
    total_words / sections.len().max(1) as u32
}
