use crate::generator::memory::MemoryScope;
use crate::generator::writer_agent::{
    AgentDataConfig, DataSource, FormatterConfig, LLMCallMode, PromptTemplate, WriterAgent,
};
use crate::search::SearchHit;
use crate::types::post::TopicProposal;

/// 选题编辑 - 把一篇新闻文章转写为符合写作目标的博客选题
pub struct TopicEditor {
    pub article: SearchHit,
}

#[async_trait::async_trait]
impl WriterAgent for TopicEditor {
    type Output = TopicProposal;

    fn agent_kind(&self) -> String {
        "TopicEditor".to_string()
    }

    fn memory_scope_key(&self) -> String {
        MemoryScope::DRAFT.to_string()
    }

    fn data_config(&self) -> AgentDataConfig {
        AgentDataConfig {
            required_sources: vec![],
            optional_sources: vec![
                DataSource::GOAL_STATEMENT,
                DataSource::KNOWLEDGE_BASE,
                DataSource::STYLE_GUIDE,
            ],
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
            "[SOURCE ARTICLE]\nTitle: {}\nDescription: {}\n",
            self.article.title, self.article.content
        )))
    }

    fn prompt_template(&self) -> PromptTemplate {
        PromptTemplate {
            system_prompt:
                "You are a blog editor who turns current news into compelling, on-brand blog topics."
                    .to_string(),

            opening_instruction:
                "Based on the source article below, generate a specific blog topic that would \
                 accomplish [GOALS] and align with [KNOWLEDGE] using [STYLE]."
                    .to_string(),

            closing_instruction: r#"
## Requirements:
- Generate a specific blog title related to [SOURCE ARTICLE] that connects it to [GOALS] and [KNOWLEDGE].
- Include a brief (2-3 sentence) description of what the article should cover.
- Do not include the current year or date in the title. Keep the title short and concise.
- Optimize the title for SEO by being very short and concise using common search phrases."#
                .to_string(),

            llm_call_mode: LLMCallMode::Extract,
            formatter_config: FormatterConfig::default(),
        }
    }
}
