use crate::generator::memory::MemoryScope;
use crate::generator::writer_agent::{
    AgentDataConfig, DataSource, FormatterConfig, LLMCallMode, PromptTemplate, WriterAgent,
};

/// 大纲策划 - 为选题产出结构化的博客大纲
#[derive(Default)]
pub struct OutlinePlanner;

#[async_trait::async_trait]
impl WriterAgent for OutlinePlanner {
    type Output = String;

    fn agent_kind(&self) -> String {
        "OutlinePlanner".to_string()
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

    fn prompt_template(&self) -> PromptTemplate {
        PromptTemplate {
            system_prompt:
                "You are a professional writer with expertise in creating engaging blog content. \
                 For outlining, use ONLY plain text or markdown formatting with ## for section \
                 headers. Be creative and use your own words and style. Do not use boring headers \
                 like 'Introduction' or 'Conclusion' or 'Call to Action'. DO NOT use HTML tags or \
                 formatting in outlines."
                    .to_string(),

            opening_instruction:
                "Create a detailed outline for a blog post about [TOPIC].".to_string(),

            closing_instruction: r###"
## Format requirements:
- Only write the outline, no other text - do not include lines like --- or markdown fences.
- On the first line, write the title of the blog post.
- For each section title, start with "##" and then the section title.
- For each section description, start with a * and then the section description.
- Write to accomplish [GOALS]. Use [KNOWLEDGE] to inform your writing. Write in the style of [STYLE]."###
                .to_string(),

            llm_call_mode: LLMCallMode::Prompt,
            formatter_config: FormatterConfig::default(),
        }
    }
}
