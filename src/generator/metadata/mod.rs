//! SEO元数据生成阶段：从正文派生元描述与关键词组。
//! 可通过`--skip-meta`跳过；任何失败都降级为“无元数据”而不中断运行。

pub mod agents;

use anyhow::Result;

use crate::generator::context::GeneratorContext;
use crate::generator::memory::{MemoryScope, ScopedKeys};
use crate::generator::writer_agent::WriterAgent;
use crate::types::post::PostMetadata;
use crate::utils::html::{excerpt, strip_tags};

use agents::metadata_editor::MetadataEditor;

/// 元描述的最大长度（字符）
const META_DESCRIPTION_LIMIT: usize = 160;

/// 送入模型的正文摘录长度
const BODY_EXCERPT_CHARS: usize = 2000;

/// 执行元数据生成。跳过或失败时返回None。
pub async fn execute(
    context: &GeneratorContext,
    title: &str,
    body: &str,
) -> Result<Option<PostMetadata>> {
    if context.config.skip_meta {
        println!("⏭️ 已跳过SEO元数据生成");
        return Ok(None);
    }

    println!("🏷️ 正在生成SEO元数据...");

    let plain_excerpt = excerpt(&strip_tags(body), BODY_EXCERPT_CHARS);
    let editor = MetadataEditor {
        post_title: title.to_string(),
        body_excerpt: plain_excerpt,
        keyphrase_count: context.config.keyphrase_count,
    };

    match editor.execute(context).await {
        Ok(raw) => {
            let metadata = sanitize_metadata(raw, context.config.keyphrase_count);
            println!(
                "✅ 元数据生成完成: {} 个关键词组",
                metadata.keyphrases.len()
            );
            if let Err(e) = context
                .store_to_memory(MemoryScope::DRAFT, ScopedKeys::METADATA, &metadata)
                .await
            {
                eprintln!("⚠️ 元数据写入Memory失败: {}", e);
            }
            Ok(Some(metadata))
        }
        Err(e) => {
            eprintln!("⚠️ 元数据生成失败: {}，本次发布不带SEO元数据", e);
            Ok(None)
        }
    }
}

/// 规整模型返回的元数据：截断超长元描述，按请求数量裁剪关键词组
pub fn sanitize_metadata(raw: PostMetadata, keyphrase_count: usize) -> PostMetadata {
    PostMetadata {
        meta_description: truncate_meta_description(&raw.meta_description),
        keyphrases: clamp_keyphrases(raw.keyphrases, keyphrase_count),
    }
}

/// 元描述超过160字符时截到157并追加省略号
pub fn truncate_meta_description(description: &str) -> String {
    let chars: Vec<char> = description.chars().collect();
    if chars.len() <= META_DESCRIPTION_LIMIT {
        return description.to_string();
    }
    let mut truncated: String = chars[..META_DESCRIPTION_LIMIT - 3].iter().collect();
    truncated.push_str("...");
    truncated
}

/// 去掉空白关键词组并裁剪到请求数量
pub fn clamp_keyphrases(keyphrases: Vec<String>, count: usize) -> Vec<String> {
    keyphrases
        .into_iter()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .take(count)
        .collect()
}
