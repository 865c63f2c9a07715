use anyhow::{Result, anyhow};
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::generator::agent_executor::{AgentExecuteParams, extract, prompt};
use crate::generator::context::GeneratorContext;
use crate::generator::memory::{MemoryScope, ScopedKeys};
use crate::types::post::{ResearchSnippet, TopicProposal};
use crate::utils::html::excerpt;

/// 数据源配置 - 基于Memory Key的直接数据访问机制
#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    /// 上下文文档：原样注入prompt的自由文本
    ContextDoc { key: &'static str },
    /// 草稿数据：本轮流水线产出的结构化中间产物
    DraftData { key: &'static str },
}

impl DataSource {
    /// 预定义的常用数据源
    pub const STYLE_GUIDE: DataSource = DataSource::ContextDoc {
        key: ScopedKeys::STYLE_GUIDE,
    };
    pub const KNOWLEDGE_BASE: DataSource = DataSource::ContextDoc {
        key: ScopedKeys::KNOWLEDGE_BASE,
    };
    pub const GOAL_STATEMENT: DataSource = DataSource::ContextDoc {
        key: ScopedKeys::GOAL_STATEMENT,
    };
    pub const TOPIC_GUIDELINES: DataSource = DataSource::ContextDoc {
        key: ScopedKeys::TOPIC_GUIDELINES,
    };
    pub const TOPIC: DataSource = DataSource::DraftData {
        key: ScopedKeys::TOPIC,
    };
    pub const RESEARCH: DataSource = DataSource::DraftData {
        key: ScopedKeys::RESEARCH,
    };

    /// 数据源所在的Memory作用域
    pub fn scope(&self) -> &'static str {
        match self {
            DataSource::ContextDoc { .. } => MemoryScope::CONTEXT,
            DataSource::DraftData { .. } => MemoryScope::DRAFT,
        }
    }

    /// 数据源的Memory键
    pub fn key(&self) -> &'static str {
        match self {
            DataSource::ContextDoc { key } | DataSource::DraftData { key } => *key,
        }
    }
}

/// Agent数据配置 - 声明所需的数据源
#[derive(Debug, Clone)]
pub struct AgentDataConfig {
    /// 必需的数据源 - 缺少时执行失败
    pub required_sources: Vec<DataSource>,
    /// 可选的数据源 - 缺少时不影响执行
    pub optional_sources: Vec<DataSource>,
}

/// LLM调用方式配置
#[derive(Debug, Clone, PartialEq)]
pub enum LLMCallMode {
    /// 使用extract方法，返回特定要求的结构化数据
    Extract,
    /// 使用prompt方法，返回泛化推理文本
    Prompt,
}

/// 数据格式化配置
#[derive(Debug, Clone)]
pub struct FormatterConfig {
    /// 上下文文档截断长度
    pub doc_truncate_length: Option<usize>,
    /// 素材片段显示数量限制
    pub snippet_limit: usize,
    /// 单条素材的摘录长度
    pub snippet_excerpt_chars: usize,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            doc_truncate_length: Some(16384),
            snippet_limit: 10,
            snippet_excerpt_chars: 600,
        }
    }
}

/// Prompt模板配置
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// 系统提示词
    pub system_prompt: String,
    /// 开头的说明性指令
    pub opening_instruction: String,
    /// 结尾的强调性指令
    pub closing_instruction: String,
    /// LLM调用方式
    pub llm_call_mode: LLMCallMode,
    /// 数据格式化配置
    pub formatter_config: FormatterConfig,
}

/// 通用数据格式化器
pub struct DataFormatter {
    config: FormatterConfig,
}

impl DataFormatter {
    pub fn new(config: FormatterConfig) -> Self {
        Self { config }
    }

    /// 上下文文档在prompt中的段落标题
    fn doc_label(key: &str) -> &'static str {
        match key {
            ScopedKeys::STYLE_GUIDE => "STYLE",
            ScopedKeys::KNOWLEDGE_BASE => "KNOWLEDGE",
            ScopedKeys::GOAL_STATEMENT => "GOALS",
            ScopedKeys::TOPIC_GUIDELINES => "TOPIC GUIDELINES",
            _ => "MATERIAL",
        }
    }

    /// 格式化上下文文档
    pub fn format_context_doc(&self, key: &str, content: &str) -> String {
        let content = if let Some(limit) = self.config.doc_truncate_length {
            if content.len() > limit {
                let mut end = limit;
                while !content.is_char_boundary(end) {
                    end -= 1;
                }
                format!("{}...(已截断)", &content[..end])
            } else {
                content.to_string()
            }
        } else {
            content.to_string()
        };

        format!("[{}]\n{}\n\n", Self::doc_label(key), content)
    }

    /// 格式化选题信息
    pub fn format_topic(&self, topic: &TopicProposal) -> String {
        let mut content = format!("[TOPIC]\nTitle: {}\n", topic.title);
        if !topic.description.is_empty() {
            content.push_str(&format!("Description: {}\n", topic.description));
        }
        content.push('\n');
        content
    }

    /// 格式化检索素材
    pub fn format_research(&self, snippets: &[ResearchSnippet]) -> String {
        if snippets.is_empty() {
            return String::new();
        }

        let mut content = String::from("[RESEARCH]\n");
        for (i, snippet) in snippets.iter().take(self.config.snippet_limit).enumerate() {
            content.push_str(&format!(
                "{}. {} ({})\n   {}\n",
                i + 1,
                snippet.title,
                snippet.url,
                excerpt(&snippet.excerpt, self.config.snippet_excerpt_chars)
            ));
        }
        content.push('\n');
        content
    }
}

/// 标准的写作Agent Prompt构建器
pub struct WriterPromptBuilder {
    template: PromptTemplate,
    formatter: DataFormatter,
}

impl WriterPromptBuilder {
    pub fn new(template: PromptTemplate) -> Self {
        let formatter = DataFormatter::new(template.formatter_config.clone());
        Self {
            template,
            formatter,
        }
    }

    /// 构建标准的prompt（系统提示词和用户提示词）
    /// custom_content参数用于插入Agent特有的动态内容
    /// include_date参数控制是否包含当天日期信息
    pub async fn build_prompts(
        &self,
        context: &GeneratorContext,
        data_sources: &[DataSource],
        custom_content: Option<String>,
        include_date: bool,
    ) -> Result<(String, String)> {
        let system_prompt = self.template.system_prompt.clone();
        let user_prompt = self
            .build_standard_user_prompt(context, data_sources, custom_content, include_date)
            .await?;
        Ok((system_prompt, user_prompt))
    }

    /// 构建标准的用户提示词
    async fn build_standard_user_prompt(
        &self,
        context: &GeneratorContext,
        data_sources: &[DataSource],
        custom_content: Option<String>,
        include_date: bool,
    ) -> Result<String> {
        let mut prompt = String::new();

        // 开头说明性指令
        prompt.push_str(&self.template.opening_instruction);
        prompt.push_str("\n\n");

        // 根据参数决定是否添加当天日期（原文需要时效性信息）
        if include_date {
            let today = chrono::Utc::now().format("%B %d, %Y");
            prompt.push_str(&format!("Today's date is {}.\n\n", today));
        }

        // 收集并格式化各种数据源
        for source in data_sources {
            let (scope, key) = (source.scope(), source.key());
            match source {
                DataSource::ContextDoc { .. } => {
                    if let Some(doc) = context.get_from_memory::<String>(scope, key).await
                        && !doc.trim().is_empty()
                    {
                        prompt.push_str(&self.formatter.format_context_doc(key, &doc));
                    }
                }
                DataSource::DraftData { .. } => match key {
                    ScopedKeys::TOPIC => {
                        if let Some(topic) =
                            context.get_from_memory::<TopicProposal>(scope, key).await
                        {
                            prompt.push_str(&self.formatter.format_topic(&topic));
                        }
                    }
                    ScopedKeys::RESEARCH => {
                        if let Some(snippets) = context
                            .get_from_memory::<Vec<ResearchSnippet>>(scope, key)
                            .await
                        {
                            prompt.push_str(&self.formatter.format_research(&snippets));
                        }
                    }
                    _ => {}
                },
            }
        }

        // 插入自定义内容（如果有）
        if let Some(custom) = custom_content {
            prompt.push_str(&custom);
            prompt.push('\n');
        }

        // 结尾强调性指令
        prompt.push_str(&self.template.closing_instruction);

        Ok(prompt)
    }
}

/// 极简Agent trait - 大幅简化agent实现
#[async_trait]
pub trait WriterAgent: Send + Sync {
    /// Agent的输出类型 - 必须支持JSON序列化
    type Output: JsonSchema + for<'a> Deserialize<'a> + Serialize + Send + Sync + 'static;

    /// Agent类型标识
    fn agent_kind(&self) -> String;

    fn memory_scope_key(&self) -> String;

    /// 数据源配置
    fn data_config(&self) -> AgentDataConfig;

    /// Prompt模板配置
    fn prompt_template(&self) -> PromptTemplate;

    /// 可选的自定义prompt内容提供钩子
    /// 返回的内容将被插入到标准prompt的素材部分之后
    async fn provide_custom_prompt_content(
        &self,
        _context: &GeneratorContext,
    ) -> Result<Option<String>> {
        Ok(None)
    }

    /// 是否在prompt中包含当天日期
    /// 默认为false，只有需要时效性的agent（选题、元数据）重写为true
    fn should_include_date(&self) -> bool {
        false
    }

    /// 默认实现的execute方法 - 完全标准化，自动数据验证
    async fn execute(&self, context: &GeneratorContext) -> Result<Self::Output> {
        // 1. 获取数据配置
        let config = self.data_config();

        // 2. 检查required数据源是否可用（自动验证）
        for source in &config.required_sources {
            if !context.has_memory_data(source.scope(), source.key()).await {
                return Err(anyhow!(
                    "必需的数据源 {}:{} 不可用",
                    source.scope(),
                    source.key()
                ));
            }
        }

        // 3. 收集所有数据源（required + optional）
        let all_sources = [config.required_sources, config.optional_sources].concat();

        // 4. 使用标准模板构建prompt，并附加语气指令
        let mut template = self.prompt_template();

        let tone_instruction = context.config.tone.prompt_instruction();
        template.system_prompt = format!("{}\n\n{}", template.system_prompt, tone_instruction);

        let prompt_builder = WriterPromptBuilder::new(template.clone());

        // 获取自定义prompt内容
        let custom_content = self.provide_custom_prompt_content(context).await?;

        // 检查是否需要包含日期
        let include_date = self.should_include_date();

        let (system_prompt, user_prompt) = prompt_builder
            .build_prompts(context, &all_sources, custom_content, include_date)
            .await?;

        // 5. 根据配置选择LLM调用方式
        let params = AgentExecuteParams {
            prompt_sys: system_prompt,
            prompt_user: user_prompt,
            cache_scope: format!("{}/{}", self.memory_scope_key(), self.agent_kind()),
            log_tag: self.agent_kind().to_string(),
        };

        let result_value = match template.llm_call_mode {
            LLMCallMode::Extract => {
                let result: Self::Output = extract(context, params).await?;
                serde_json::to_value(&result)?
            }
            LLMCallMode::Prompt => {
                let result_text: String = prompt(context, params).await?;
                serde_json::to_value(&result_text)?
            }
        };

        // 6. 存储结果
        context
            .store_to_memory(
                &self.memory_scope_key(),
                &self.agent_kind(),
                result_value.clone(),
            )
            .await?;

        // 7. 返回类型化结果
        if let Ok(typed_result) = serde_json::from_value::<Self::Output>(result_value) {
            println!("✅ Sub-Agent [{}]执行完成", self.agent_kind());
            Ok(typed_result)
        } else {
            Err(anyhow!("Agent [{}] 结果反序列化失败", self.agent_kind()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_context_doc_label_and_truncation() {
        let formatter = DataFormatter::new(FormatterConfig {
            doc_truncate_length: Some(10),
            ..FormatterConfig::default()
        });

        let formatted = formatter.format_context_doc(ScopedKeys::STYLE_GUIDE, "short");
        assert!(formatted.starts_with("[STYLE]\n"));
        assert!(formatted.contains("short"));

        let long = "x".repeat(64);
        let formatted = formatter.format_context_doc(ScopedKeys::KNOWLEDGE_BASE, &long);
        assert!(formatted.starts_with("[KNOWLEDGE]\n"));
        assert!(formatted.contains("...(已截断)"));
    }

    #[test]
    fn test_format_topic() {
        let formatter = DataFormatter::new(FormatterConfig::default());
        let topic = TopicProposal {
            title: "Why Rust Wins".to_string(),
            description: "An overview.".to_string(),
            source_article: None,
        };

        let formatted = formatter.format_topic(&topic);
        assert!(formatted.contains("Title: Why Rust Wins"));
        assert!(formatted.contains("Description: An overview."));
    }

    #[test]
    fn test_format_research_limits_snippets() {
        let formatter = DataFormatter::new(FormatterConfig {
            snippet_limit: 2,
            ..FormatterConfig::default()
        });

        let snippets: Vec<ResearchSnippet> = (0..5)
            .map(|i| ResearchSnippet {
                title: format!("Article {}", i),
                url: format!("https://example.com/{}", i),
                excerpt: "Excerpt".to_string(),
            })
            .collect();

        let formatted = formatter.format_research(&snippets);
        assert!(formatted.contains("Article 0"));
        assert!(formatted.contains("Article 1"));
        assert!(!formatted.contains("Article 2"));
    }

    #[test]
    fn test_format_research_empty() {
        let formatter = DataFormatter::new(FormatterConfig::default());
        assert!(formatter.format_research(&[]).is_empty());
    }
}
