use crate::generator::memory::MemoryScope;
use crate::generator::writer_agent::{
    AgentDataConfig, FormatterConfig, LLMCallMode, PromptTemplate, WriterAgent,
};

/// 检索查询构思员 - 基于选题指南构思一条新闻检索查询
///
/// 指南内容与系统提示词在构造时已经过随机化处理，
/// 保证多次运行产生多样化的选题方向。
pub struct QueryComposer {
    pub randomized_guidelines: String,
    pub system_prompt: &'static str,
}

/// 候选系统提示词，每次运行随机挑选其一
pub const SYSTEM_PROMPTS: [&str; 5] = [
    "You are a research assistant helping to find interesting news topics for blog posts.",
    "You are a journalist looking for trending stories in technology and finance.",
    "You are a technology enthusiast searching for the latest developments in software.",
    "You are a researcher exploring topics related to open source and decentralization.",
    "You are an editor tracking current events worth writing about.",
];

#[async_trait::async_trait]
impl WriterAgent for QueryComposer {
    type Output = String;

    fn agent_kind(&self) -> String {
        "QueryComposer".to_string()
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
        if self.randomized_guidelines.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(format!(
            "[TOPIC GUIDELINES]\n{}\n",
            self.randomized_guidelines
        )))
    }

    fn prompt_template(&self) -> PromptTemplate {
        PromptTemplate {
            system_prompt: self.system_prompt.to_string(),

            opening_instruction:
                "Based on the following guidelines for blog topics, generate a specific news \
                 search query that will find current and relevant articles."
                    .to_string(),

            closing_instruction: r#"
## Requirements:
- Generate a query that will find recent and timely news. Do NOT include a date in the query.
- Make it specific enough to find interesting current news but general enough to return results.
- Return ONLY the search query string, nothing else."#
                .to_string(),

            llm_call_mode: LLMCallMode::Prompt,
            formatter_config: FormatterConfig::default(),
        }
    }
}
