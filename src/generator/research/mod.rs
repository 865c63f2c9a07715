//! 素材检索阶段：以选题为查询收集少量来源片段，仅用于给
//! 正文生成提供事实依据，不做任何持久化

use anyhow::Result;

use crate::generator::context::GeneratorContext;
use crate::generator::memory::{MemoryScope, ScopedKeys};
use crate::search::filter_valid_hits;
use crate::types::post::{ResearchSnippet, TopicProposal};
use crate::utils::html::excerpt;

/// 单条素材保留的摘录长度
const SNIPPET_EXCERPT_CHARS: usize = 800;

/// 执行素材检索。`--no-research`时不发起任何检索调用。
pub async fn execute(context: &GeneratorContext) -> Result<Vec<ResearchSnippet>> {
    if context.config.no_research {
        println!("⏭️ 网络检索已禁用，跳过素材收集");
        context
            .store_to_memory(
                MemoryScope::DRAFT,
                ScopedKeys::RESEARCH,
                Vec::<ResearchSnippet>::new(),
            )
            .await?;
        return Ok(Vec::new());
    }

    let topic: TopicProposal = context
        .get_from_memory(MemoryScope::DRAFT, ScopedKeys::TOPIC)
        .await
        .ok_or_else(|| anyhow::anyhow!("素材检索前必须先完成主题解析"))?;

    println!("🔍 正在检索素材: {}", topic.title);

    let hits = context.search.search(&topic.title).await?;
    let valid = filter_valid_hits(hits);

    if valid.is_empty() {
        eprintln!("⚠️ 未检索到有效素材，正文将仅基于知识库生成");
    }

    let snippets: Vec<ResearchSnippet> = valid
        .into_iter()
        .take(context.config.search.max_results)
        .map(|hit| ResearchSnippet {
            title: hit.title,
            url: hit.url,
            excerpt: excerpt(&hit.content, SNIPPET_EXCERPT_CHARS),
        })
        .collect();

    println!("   收集到 {} 条素材", snippets.len());

    context
        .store_to_memory(MemoryScope::DRAFT, ScopedKeys::RESEARCH, &snippets)
        .await?;

    Ok(snippets)
}
