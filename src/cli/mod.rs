use crate::config::{AuthMethod, Config, LLMProvider, PostStatus};
use crate::style::{Structure, Tone};
use clap::Parser;
use std::path::PathBuf;

/// Blogsmith-RS - 由Rust与AI驱动的博客生成与发布引擎
#[derive(Parser, Debug)]
#[command(name = "Scribe (blogsmith-rs)")]
#[command(
    about = "AI-powered blog writing and publishing engine. It can resolve trending topics from web search, gather research context, compose SEO-ready articles with LLMs, and publish them to a WordPress site."
)]
#[command(author = "Sopaco")]
#[command(version)]
pub struct Args {
    /// 文章主题（缺省时自动从新闻检索生成）
    #[arg(short, long)]
    pub topic: Option<String>,

    /// 目标字数（缺省时在2000-2500内随机）
    #[arg(short, long)]
    pub length: Option<u32>,

    /// 采样温度 (0.0-1.0)
    #[arg(long)]
    pub temperature: Option<f64>,

    /// 文章语气 (persuasive, informative, conversational, analytical)
    #[arg(long)]
    pub tone: Option<String>,

    /// 文章结构 (article=单次生成, sectioned=大纲分节生成)
    #[arg(long)]
    pub structure: Option<String>,

    /// 禁用网络检索（默认启用）
    #[arg(long)]
    pub no_research: bool,

    /// 流水线重复执行次数
    #[arg(long, default_value = "1")]
    pub r#loop: u32,

    /// 跳过WordPress发布，仅生成内容
    #[arg(long)]
    pub skip_post: bool,

    /// 跳过SEO元数据生成
    #[arg(long)]
    pub skip_meta: bool,

    /// 生成的关键词组数量
    #[arg(long)]
    pub keyphrases: Option<usize>,

    /// WordPress分类名
    #[arg(long)]
    pub category_name: Option<String>,

    /// WordPress分类ID（跳过分类名查找）
    #[arg(long)]
    pub category_id: Option<u64>,

    /// 逗号分隔的标签列表
    #[arg(long)]
    pub tags: Option<String>,

    /// 发布状态 (draft, publish, pending, private)
    #[arg(long)]
    pub status: Option<String>,

    /// WordPress认证方式 (basic, jwt, application)
    #[arg(long)]
    pub auth_method: Option<String>,

    /// 使用WordPress Application Password认证
    #[arg(long)]
    pub use_application_password: bool,

    /// 从已有文件加载正文，跳过生成
    #[arg(long)]
    pub load_file: Option<PathBuf>,

    /// 生成结果另存为本地HTML文件
    #[arg(short, long)]
    pub output_file: Option<PathBuf>,

    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// LLM Provider (openai, mistral, openrouter, anthropic, deepseek)
    #[arg(long)]
    pub llm_provider: Option<String>,

    /// LLM API基地址
    #[arg(long)]
    pub llm_api_base_url: Option<String>,

    /// LLM API KEY
    #[arg(long)]
    pub llm_api_key: Option<String>,

    /// 高能效模型，优先用于常规推理任务
    #[arg(long)]
    pub model_efficient: Option<String>,

    /// 高质量模型，优先用于正文撰写，以及作为efficient失效情况下的兜底
    #[arg(long)]
    pub model_powerful: Option<String>,

    /// 最大tokens数
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// 搜索API KEY
    #[arg(long)]
    pub search_api_key: Option<String>,

    /// 是否禁用缓存
    #[arg(long)]
    pub no_cache: bool,

    /// 是否启用详细日志
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// 将CLI参数转换为配置：配置文件提供基础值，CLI参数覆盖
    pub fn into_config(self) -> Config {
        let mut config = if let Some(config_path) = &self.config {
            // 如果显式指定了配置文件路径，从该路径加载
            Config::from_file(config_path).unwrap_or_else(|_| {
                panic!("⚠️ 警告: 无法读取配置文件 {:?}", config_path)
            })
        } else {
            // 如果没有显式指定配置文件，尝试从默认位置加载
            let default_config_path = std::env::current_dir()
                .unwrap_or_else(|_| std::path::PathBuf::from("."))
                .join("blogsmith.toml");

            if default_config_path.exists() {
                Config::from_file(&default_config_path).unwrap_or_else(|_| {
                    panic!(
                        "⚠️ 警告: 无法读取默认配置文件 {:?}",
                        default_config_path
                    )
                })
            } else {
                // 默认配置文件不存在，使用默认值
                Config::default()
            }
        };

        // 内容生成选项
        if let Some(topic) = self.topic {
            config.topic = Some(topic);
        }
        if let Some(length) = self.length {
            config.target_words = Some(length);
        }
        if let Some(temperature) = self.temperature {
            config.llm.temperature = temperature;
        }
        if let Some(tone_str) = self.tone {
            if let Ok(tone) = tone_str.parse::<Tone>() {
                config.tone = tone;
            } else {
                eprintln!("⚠️ 警告: 未知的语气: {}，使用默认语气", tone_str);
            }
        }
        if let Some(structure_str) = self.structure {
            if let Ok(structure) = structure_str.parse::<Structure>() {
                config.structure = structure;
            } else {
                eprintln!("⚠️ 警告: 未知的结构模式: {}，使用默认模式", structure_str);
            }
        }
        if self.no_research {
            config.no_research = true;
        }
        config.loop_count = self.r#loop.max(1);

        // 发布选项
        if self.skip_post {
            config.skip_post = true;
        }
        if self.skip_meta {
            config.skip_meta = true;
        }
        if let Some(keyphrases) = self.keyphrases {
            config.keyphrase_count = keyphrases;
        }
        if let Some(category_name) = self.category_name {
            config.defaults.category_name = category_name;
            // 命令行显式指定分类名时，绕过配置的分类ID
            config.defaults.category_id = None;
        }
        if let Some(category_id) = self.category_id {
            config.defaults.category_id = Some(category_id);
        }
        if let Some(tags) = self.tags {
            config.defaults.tags = tags
                .split(',')
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect();
        }
        if let Some(status_str) = self.status {
            if let Ok(status) = status_str.parse::<PostStatus>() {
                config.defaults.status = status;
            } else {
                eprintln!("⚠️ 警告: 未知的发布状态: {}，使用默认状态", status_str);
            }
        }

        // 认证选项
        if let Some(auth_str) = self.auth_method {
            if let Ok(auth) = auth_str.parse::<AuthMethod>() {
                config.site.auth_method = Some(auth);
            } else {
                eprintln!("⚠️ 警告: 未知的认证方式: {}，使用默认方式", auth_str);
            }
        }
        if self.use_application_password {
            config.site.use_application_password = true;
        }

        // 文件选项
        if let Some(load_file) = self.load_file {
            config.load_file = Some(load_file);
        }
        if let Some(output_file) = self.output_file {
            config.output_file = Some(output_file);
        }

        // 覆盖LLM配置
        if let Some(provider_str) = self.llm_provider {
            if let Ok(provider) = provider_str.parse::<LLMProvider>() {
                config.llm.provider = provider;
            } else {
                eprintln!(
                    "⚠️ 警告: 未知的provider: {}，使用默认provider",
                    provider_str
                );
            }
        }
        if let Some(llm_api_base_url) = self.llm_api_base_url {
            config.llm.api_base_url = llm_api_base_url;
        }
        if let Some(llm_api_key) = self.llm_api_key {
            config.llm.api_key = llm_api_key;
        }
        if let Some(model_efficient) = self.model_efficient {
            config.llm.model_efficient = model_efficient;
        }
        if let Some(model_powerful) = self.model_powerful {
            config.llm.model_powerful = model_powerful;
        }
        if let Some(max_tokens) = self.max_tokens {
            config.llm.max_tokens = max_tokens;
        }

        // 搜索配置
        if let Some(search_api_key) = self.search_api_key {
            config.search.api_key = search_api_key;
        }

        // 缓存配置
        if self.no_cache {
            config.cache.enabled = false;
        }

        config.verbose = self.verbose;

        config
    }
}

// Include tests
#[cfg(test)]
mod tests;
