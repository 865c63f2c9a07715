use crate::generator::memory::MemoryScope;
use crate::generator::writer_agent::{
    AgentDataConfig, DataSource, FormatterConfig, LLMCallMode, PromptTemplate, WriterAgent,
};

/// 整篇撰写员 - 单次推理直接产出全文（article结构模式）
pub struct ArticleWriter {
    /// 全文目标字数
    pub target_words: u32,
}

#[async_trait::async_trait]
impl WriterAgent for ArticleWriter {
    type Output = String;

    fn agent_kind(&self) -> String {
        "ArticleWriter".to_string()
    }

    fn memory_scope_key(&self) -> String {
        MemoryScope::DRAFT.to_string()
    }

    fn should_include_date(&self) -> bool {
        true
    }

    fn data_config(&self) -> AgentDataConfig {
        AgentDataConfig {
            required_sources: vec![DataSource::TOPIC],
            optional_sources: vec![
                DataSource::GOAL_STATEMENT,
                DataSource::KNOWLEDGE_BASE,
                DataSource::STYLE_GUIDE,
                DataSource::RESEARCH,
            ],
        }
    }

    async fn provide_custom_prompt_content(
        &self,
        _context: &crate::generator::context::GeneratorContext,
    ) -> anyhow::Result<Option<String>> {
        Ok(Some(format!(
            "[ASSIGNMENT]\nTarget length: approximately {} words\n",
            self.target_words
        )))
    }

    fn prompt_template(&self) -> PromptTemplate {
        PromptTemplate {
            system_prompt:
                "You are a professional writer with expertise in creating engaging blog content. \
                 Format your output in clean HTML using ONLY these tags: <p> for paragraphs, <h2> \
                 and <h3> for headings, <strong> or <b> for bold text, <em> or <i> for italics, \
                 <ul>/<ol> with <li> for lists, and <a> for links. Do not use any other HTML tags."
                    .to_string(),

            opening_instruction:
                "Write a complete blog post about [TOPIC]. Write to accomplish [GOALS], use \
                 [KNOWLEDGE] to inform your writing, and write in the style of [STYLE]."
                    .to_string(),

            closing_instruction: r#"
## Requirements:
- Do not include the blog post title in the body - the publishing platform renders it separately.
- Ground factual claims in [RESEARCH] when it is provided.
- Structure the post with <h2> section headings of your own wording."#
                .to_string(),

            llm_call_mode: LLMCallMode::Prompt,
            formatter_config: FormatterConfig::default(),
        }
    }
}
