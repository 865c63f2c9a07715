//! 主题解析阶段：显式主题直接透传；否则构思检索查询、
//! 随机选取一篇新闻并由LLM转写为博客选题。
//! 这里是整条流水线唯一带失败兜底的环节：检索失败或结果无效时
//! 回落到默认选题。

pub mod agents;

use anyhow::Result;
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::generator::context::GeneratorContext;
use crate::generator::memory::{MemoryScope, ScopedKeys};
use crate::generator::writer_agent::WriterAgent;
use crate::search::{SearchHit, filter_valid_hits};
use crate::types::post::{ResearchSnippet, TopicProposal};

use agents::query_composer::{QueryComposer, SYSTEM_PROMPTS};
use agents::topic_editor::TopicEditor;

/// 检索查询构思失败时的兜底查询
const FALLBACK_QUERY: &str = "latest technology open source decentralization news";

/// 生成的选题标题低于该长度时视为无效
const MIN_TITLE_LEN: usize = 10;

/// 解析本轮运行的博客选题
pub async fn resolve<R: Rng>(context: &GeneratorContext, rng: &mut R) -> Result<TopicProposal> {
    // 显式指定主题时不触发任何检索与推理
    if let Some(topic) = &context.config.topic {
        println!("📌 使用指定主题: {}", topic);
        let proposal = TopicProposal {
            title: topic.clone(),
            description: String::new(),
            source_article: None,
        };
        store_topic(context, &proposal).await?;
        return Ok(proposal);
    }

    println!("🔎 未指定主题，自动从新闻检索生成选题...");

    // 1. 构思检索查询（指南与系统提示词随机化）
    let guidelines: String = context
        .get_from_memory(MemoryScope::CONTEXT, ScopedKeys::TOPIC_GUIDELINES)
        .await
        .unwrap_or_default();
    let randomized_guidelines = randomize_guidelines(&guidelines, rng);
    let system_prompt = SYSTEM_PROMPTS
        .choose(rng)
        .copied()
        .unwrap_or(SYSTEM_PROMPTS[0]);

    let composer = QueryComposer {
        randomized_guidelines,
        system_prompt,
    };
    let query = match composer.execute(context).await {
        Ok(raw) => clean_query(&raw),
        Err(e) => {
            eprintln!("⚠️ 检索查询构思失败: {}，使用兜底查询", e);
            FALLBACK_QUERY.to_string()
        }
    };
    println!("   检索查询: {}", query);

    // 2. 检索新闻并随机选取一篇有效文章
    let hits = match context.search.search(&query).await {
        Ok(hits) => filter_valid_hits(hits),
        Err(e) => {
            eprintln!("⚠️ 新闻检索失败: {}", e);
            Vec::new()
        }
    };

    let Some(article) = select_article(&hits, rng) else {
        eprintln!("⚠️ 未检索到有效文章，使用默认选题");
        let proposal = default_topic(None);
        store_topic(context, &proposal).await?;
        return Ok(proposal);
    };
    println!("   选中文章: {}", article.title);

    // 3. 由LLM把新闻转写为博客选题
    let editor = TopicEditor {
        article: article.clone(),
    };
    let proposal = match editor.execute(context).await {
        Ok(mut proposal) if proposal.title.trim().len() >= MIN_TITLE_LEN => {
            proposal.source_article = Some(snippet_from(article));
            proposal
        }
        Ok(_) => {
            eprintln!("⚠️ 生成的选题标题过短，使用默认选题");
            default_topic(Some(article))
        }
        Err(e) => {
            eprintln!("⚠️ 选题转写失败: {}，使用默认选题", e);
            default_topic(Some(article))
        }
    };

    println!("✅ 生成选题: {}", proposal.title);
    if let Some(source) = &proposal.source_article {
        println!("   来源: {}", source.url);
    }

    store_topic(context, &proposal).await?;
    Ok(proposal)
}

async fn store_topic(context: &GeneratorContext, proposal: &TopicProposal) -> Result<()> {
    context
        .store_to_memory(MemoryScope::DRAFT, ScopedKeys::TOPIC, proposal)
        .await
}

/// 检索或转写失败时的默认选题
pub fn default_topic(article: Option<&SearchHit>) -> TopicProposal {
    let current_date = chrono::Utc::now().format("%B %d, %Y");

    if let Some(article) = article
        && !article.title.is_empty()
    {
        return TopicProposal {
            title: format!("Analysis: {}", article.title),
            description: format!(
                "A detailed exploration of the implications and context behind this news as of {}.",
                current_date
            ),
            source_article: Some(snippet_from(article)),
        };
    }

    TopicProposal {
        title: "The Current State of Open Source Software".to_string(),
        description: format!(
            "An examination of open source trends and developments as of {}.",
            current_date
        ),
        source_article: None,
    }
}

/// 随机选取一篇文章
pub fn select_article<'a, R: Rng>(hits: &'a [SearchHit], rng: &mut R) -> Option<&'a SearchHit> {
    hits.choose(rng)
}

fn snippet_from(hit: &SearchHit) -> ResearchSnippet {
    ResearchSnippet {
        title: hit.title.clone(),
        url: hit.url.clone(),
        excerpt: hit.content.clone(),
    }
}

/// 对选题指南做随机删减，让每次构思的查询方向不同
pub fn randomize_guidelines<R: Rng>(guidelines: &str, rng: &mut R) -> String {
    let guidelines = guidelines.trim();
    if guidelines.is_empty() {
        return String::new();
    }

    let paragraphs: Vec<&str> = guidelines
        .split("\n\n")
        .filter(|p| !p.trim().is_empty())
        .collect();

    if paragraphs.len() > 1 {
        // 保留随机的段落子集（至少1段）
        let keep_count = rng.random_range(1..paragraphs.len());
        let mut indices =
            rand::seq::index::sample(rng, paragraphs.len(), keep_count).into_vec();
        indices.sort_unstable();
        return indices
            .into_iter()
            .map(|i| paragraphs[i])
            .collect::<Vec<_>>()
            .join("\n\n");
    }

    // 只有一段时按句子删减
    let sentences: Vec<&str> = paragraphs[0]
        .split('.')
        .filter(|s| !s.trim().is_empty())
        .collect();
    if sentences.len() > 3 {
        let keep_count = rng.random_range(2..sentences.len());
        let mut indices =
            rand::seq::index::sample(rng, sentences.len(), keep_count).into_vec();
        indices.sort_unstable();
        let kept: Vec<&str> = indices.into_iter().map(|i| sentences[i].trim()).collect();
        return format!("{}.", kept.join(". "));
    }

    guidelines.to_string()
}

/// 清理LLM返回的查询串：去掉引号与标点，避免检索API把它们当运算符
pub fn clean_query(raw: &str) -> String {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '"' | '\'' | '“' | '”' | '.' | '!' | '?' | ':'))
        .collect();
    let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");

    if cleaned.is_empty() {
        FALLBACK_QUERY.to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn hit(title: &str) -> SearchHit {
        SearchHit {
            title: title.to_string(),
            url: format!("https://example.com/{}", title.len()),
            content: "A description that is long enough to be valid.".to_string(),
        }
    }

    #[test]
    fn test_clean_query() {
        assert_eq!(
            clean_query("\"rust async runtime\" news!"),
            "rust async runtime news"
        );
        assert_eq!(clean_query("  spaced   out  "), "spaced out");
        assert_eq!(clean_query("\"\""), FALLBACK_QUERY);
    }

    #[test]
    fn test_select_article_deterministic_with_seed() {
        let hits = vec![hit("First headline"), hit("Second headline"), hit("Third")];

        let mut rng_a = StdRng::seed_from_u64(42);
        let mut rng_b = StdRng::seed_from_u64(42);

        let a = select_article(&hits, &mut rng_a).unwrap();
        let b = select_article(&hits, &mut rng_b).unwrap();
        assert_eq!(a.title, b.title);
    }

    #[test]
    fn test_select_article_empty() {
        let mut rng = StdRng::seed_from_u64(42);
        assert!(select_article(&[], &mut rng).is_none());
    }

    #[test]
    fn test_default_topic_without_article() {
        let topic = default_topic(None);
        assert!(!topic.title.is_empty());
        assert!(topic.source_article.is_none());
    }

    #[test]
    fn test_default_topic_with_article() {
        let article = hit("Major ecosystem shift announced");
        let topic = default_topic(Some(&article));

        assert_eq!(topic.title, "Analysis: Major ecosystem shift announced");
        assert!(topic.source_article.is_some());
    }

    #[test]
    fn test_randomize_guidelines_keeps_subset_of_paragraphs() {
        let guidelines = "Paragraph one about technology.\n\nParagraph two about economics.\n\nParagraph three about culture.";
        let mut rng = StdRng::seed_from_u64(7);

        let randomized = randomize_guidelines(guidelines, &mut rng);
        assert!(!randomized.is_empty());
        assert!(randomized.len() < guidelines.len());
        // 子集中的每一段都来自原文
        for paragraph in randomized.split("\n\n") {
            assert!(guidelines.contains(paragraph));
        }
    }

    #[test]
    fn test_randomize_guidelines_empty() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(randomize_guidelines("", &mut rng), "");
    }

    #[test]
    fn test_randomize_guidelines_deterministic_with_seed() {
        let guidelines = "One.\n\nTwo.\n\nThree.\n\nFour.";

        let mut rng_a = StdRng::seed_from_u64(99);
        let mut rng_b = StdRng::seed_from_u64(99);

        assert_eq!(
            randomize_guidelines(guidelines, &mut rng_a),
            randomize_guidelines(guidelines, &mut rng_b)
        );
    }
}
