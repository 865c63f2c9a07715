use crate::generator::memory::MemoryScope;
use crate::generator::writer_agent::{
    AgentDataConfig, DataSource, FormatterConfig, LLMCallMode, PromptTemplate, WriterAgent,
};

/// 章节撰写员 - 按大纲逐节撰写正文，一个实例负责一个章节
pub struct SectionWriter {
    /// 文章标题
    pub post_title: String,
    /// 本章节标题
    pub section_title: String,
    /// 本章节描述
    pub section_description: String,
    /// 完整大纲，用于让模型掌握全文脉络
    pub outline: String,
    /// 本章节的目标字数
    pub target_words: u32,
}

#[async_trait::async_trait]
impl WriterAgent for SectionWriter {
    type Output = String;

    fn agent_kind(&self) -> String {
        "SectionWriter".to_string()
    }

    fn memory_scope_key(&self) -> String {
        MemoryScope::DRAFT.to_string()
    }

    fn should_include_date(&self) -> bool {
        true
    }

    fn data_config(&self) -> AgentDataConfig {
        AgentDataConfig {
            required_sources: vec![],
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
            "[OUTLINE]\n{}\n\n[ASSIGNMENT]\nBlog post title: {}\nSection to write: {}\nSection description: {}\nTarget length for this section: approximately {} words\n",
            self.outline,
            self.post_title,
            self.section_title,
            self.section_description,
            self.target_words
        )))
    }

    fn prompt_template(&self) -> PromptTemplate {
        PromptTemplate {
            system_prompt:
                "You are a professional writer with expertise in creating engaging blog content. \
                 Format your output in clean HTML using ONLY these tags: <p> for paragraphs, <h3> \
                 for sub-headings, <strong> or <b> for bold text, <em> or <i> for italics, \
                 <ul>/<ol> with <li> for lists, and <a> for links. Do not use any other HTML tags."
                    .to_string(),

            opening_instruction:
                "Write one section of a blog post. Connect the section to [GOALS] and [KNOWLEDGE] using [STYLE]."
                    .to_string(),

            closing_instruction: r#"
## Requirements:
- Write ONLY the section named in [ASSIGNMENT] - do not include other sections or a full blog post.
- Do not include the section heading in your response - just write the content for this section.
- Ground factual claims in [RESEARCH] when it is provided."#
                .to_string(),

            llm_call_mode: LLMCallMode::Prompt,
            formatter_config: FormatterConfig::default(),
        }
    }
}
