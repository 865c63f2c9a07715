use crate::generator::memory::MemoryScope;
use crate::generator::writer_agent::{
    AgentDataConfig, FormatterConfig, LLMCallMode, PromptTemplate, WriterAgent,
};
use crate::types::post::PostMetadata;

/// SEO编辑 - 基于正文派生元描述与关键词组
pub struct MetadataEditor {
    pub post_title: String,
    /// 去除HTML标签后的正文摘录
    pub body_excerpt: String,
    pub keyphrase_count: usize,
}

#[async_trait::async_trait]
impl WriterAgent for MetadataEditor {
    type Output = PostMetadata;

    fn agent_kind(&self) -> String {
        "MetadataEditor".to_string()
    }

    fn memory_scope_key(&self) -> String {
        MemoryScope::DRAFT.to_string()
    }

    fn data_config(&self) -> AgentDataConfig {
        AgentDataConfig {
            required_sources: vec![],
            optional_sources: vec![],
        }
    }

    fn should_include_date(&self) -> bool {
        true
    }

    async fn provide_custom_prompt_content(
        &self,
        _context: &crate::generator::context::GeneratorContext,
    ) -> anyhow::Result<Option<String>> {
        Ok(Some(format!(
            "[POST]\nTitle: {}\n\nContent excerpt:\n{}\n",
            self.post_title, self.body_excerpt
        )))
    }

    fn prompt_template(&self) -> PromptTemplate {
        PromptTemplate {
            system_prompt:
                "You are an SEO expert who specializes in creating effective meta descriptions and keyphrases."
                    .to_string(),

            opening_instruction:
                "Based on the blog post title and content excerpt below, generate SEO metadata."
                    .to_string(),

            closing_instruction: format!(
                r#"
## Requirements:
- The meta description must be compelling, accurately summarize the content, and be 150-160 characters maximum.
- Generate exactly {} keyphrases. They should be specific, relevant to the content, and have search value.
- Ensure the meta description and keyphrases are relevant and timely."#,
                self.keyphrase_count
            ),

            llm_call_mode: LLMCallMode::Extract,
            formatter_config: FormatterConfig::default(),
        }
    }
}
