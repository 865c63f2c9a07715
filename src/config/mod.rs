use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use crate::style::{Structure, Tone};

/// LLM Provider类型
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub enum LLMProvider {
    #[serde(rename = "openai")]
    #[default]
    OpenAI,
    #[serde(rename = "moonshot")]
    Moonshot,
    #[serde(rename = "deepseek")]
    DeepSeek,
    #[serde(rename = "mistral")]
    Mistral,
    #[serde(rename = "openrouter")]
    OpenRouter,
    #[serde(rename = "anthropic")]
    Anthropic,
    #[serde(rename = "gemini")]
    Gemini,
    #[serde(rename = "ollama")]
    Ollama,
}

impl std::fmt::Display for LLMProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LLMProvider::OpenAI => write!(f, "openai"),
            LLMProvider::Moonshot => write!(f, "moonshot"),
            LLMProvider::DeepSeek => write!(f, "deepseek"),
            LLMProvider::Mistral => write!(f, "mistral"),
            LLMProvider::OpenRouter => write!(f, "openrouter"),
            LLMProvider::Anthropic => write!(f, "anthropic"),
            LLMProvider::Gemini => write!(f, "gemini"),
            LLMProvider::Ollama => write!(f, "ollama"),
        }
    }
}

impl std::str::FromStr for LLMProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(LLMProvider::OpenAI),
            "moonshot" => Ok(LLMProvider::Moonshot),
            "deepseek" => Ok(LLMProvider::DeepSeek),
            "mistral" => Ok(LLMProvider::Mistral),
            "openrouter" => Ok(LLMProvider::OpenRouter),
            "anthropic" => Ok(LLMProvider::Anthropic),
            "gemini" => Ok(LLMProvider::Gemini),
            "ollama" => Ok(LLMProvider::Ollama),
            _ => Err(format!("Unknown provider: {}", s)),
        }
    }
}

/// WordPress认证方式
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Default)]
pub enum AuthMethod {
    #[serde(rename = "basic")]
    #[default]
    Basic,
    #[serde(rename = "application")]
    Application,
    #[serde(rename = "jwt")]
    Jwt,
}

impl std::fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthMethod::Basic => write!(f, "basic"),
            AuthMethod::Application => write!(f, "application"),
            AuthMethod::Jwt => write!(f, "jwt"),
        }
    }
}

impl std::str::FromStr for AuthMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "basic" => Ok(AuthMethod::Basic),
            "application" | "application-password" => Ok(AuthMethod::Application),
            "jwt" => Ok(AuthMethod::Jwt),
            _ => Err(format!("Unknown auth method: {}", s)),
        }
    }
}

/// 文章发布状态
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Default)]
pub enum PostStatus {
    #[serde(rename = "draft")]
    #[default]
    Draft,
    #[serde(rename = "publish")]
    Publish,
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "private")]
    Private,
}

impl std::fmt::Display for PostStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PostStatus::Draft => write!(f, "draft"),
            PostStatus::Publish => write!(f, "publish"),
            PostStatus::Pending => write!(f, "pending"),
            PostStatus::Private => write!(f, "private"),
        }
    }
}

impl std::str::FromStr for PostStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(PostStatus::Draft),
            "publish" => Ok(PostStatus::Publish),
            "pending" => Ok(PostStatus::Pending),
            "private" => Ok(PostStatus::Private),
            _ => Err(format!("Unknown post status: {}", s)),
        }
    }
}

/// 应用程序配置
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    /// 文章主题，缺省时由主题解析器自动生成
    pub topic: Option<String>,

    /// 目标字数，缺省时在[2000, 2500]内随机取值
    pub target_words: Option<u32>,

    /// 文章语气
    pub tone: Tone,

    /// 文章结构模式
    pub structure: Structure,

    /// 是否禁用网络检索
    pub no_research: bool,

    /// 流水线重复执行次数
    pub loop_count: u32,

    /// 跳过远端发布
    pub skip_post: bool,

    /// 跳过SEO元数据生成
    pub skip_meta: bool,

    /// 生成的关键词组数量
    pub keyphrase_count: usize,

    /// 从已有文件加载正文，跳过生成
    pub load_file: Option<PathBuf>,

    /// 生成结果另存为本地HTML文件
    pub output_file: Option<PathBuf>,

    /// WordPress站点配置
    pub site: SiteConfig,

    /// LLM模型配置
    pub llm: LLMConfig,

    /// 搜索API配置
    pub search: SearchConfig,

    /// 上下文文档配置
    pub context: ContextConfig,

    /// 发布默认值配置
    pub defaults: PostDefaults,

    /// 缓存配置
    pub cache: CacheConfig,

    /// 是否启用详细日志
    pub verbose: bool,
}

/// WordPress站点配置
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SiteConfig {
    /// 站点地址，例如 https://blog.example.com
    pub url: String,

    /// REST API用户名
    pub username: String,

    /// REST API口令（或Application Password）
    pub password: String,

    /// 显式指定的认证方式，优先级最高
    pub auth_method: Option<AuthMethod>,

    /// 使用Application Password认证
    pub use_application_password: bool,
}

/// LLM模型配置
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LLMConfig {
    /// LLM Provider类型
    pub provider: LLMProvider,

    /// LLM API KEY
    pub api_key: String,

    /// LLM API基地址
    pub api_base_url: String,

    /// 高能效模型，优先用于常规推理任务
    pub model_efficient: String,

    /// 高质量模型，优先用于正文撰写，以及作为efficient失效情况下的兜底
    pub model_powerful: String,

    /// 最大tokens
    pub max_tokens: u32,

    /// 采样温度
    pub temperature: f64,

    /// 重试次数
    pub retry_attempts: u32,

    /// 重试间隔（毫秒）
    pub retry_delay_ms: u64,

    /// 超时时间（秒）
    pub timeout_seconds: u64,
}

/// 搜索API配置（Tavily兼容）
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SearchConfig {
    /// 搜索API KEY
    pub api_key: String,

    /// 搜索API基地址
    pub api_base_url: String,

    /// 检索深度
    pub search_depth: String,

    /// 单次检索的最大结果数
    pub max_results: usize,
}

/// 上下文文档配置：四个自由文本文件，原样注入提示词
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ContextConfig {
    /// 文风指南
    pub style_file: PathBuf,

    /// 知识库
    pub knowledge_file: PathBuf,

    /// 写作目标
    pub goal_file: PathBuf,

    /// 选题指南
    pub topics_file: PathBuf,
}

/// 发布默认值配置
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PostDefaults {
    /// 分类ID，指定后跳过分类名查找
    pub category_id: Option<u64>,

    /// 分类名
    pub category_name: String,

    /// 标签列表
    pub tags: Vec<String>,

    /// 发布状态
    pub status: PostStatus,
}

/// 缓存配置
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CacheConfig {
    /// 是否启用缓存
    pub enabled: bool,

    /// 缓存目录
    pub cache_dir: PathBuf,

    /// 缓存过期时间（小时）
    pub expire_hours: u64,
}

impl Config {
    /// 从文件加载配置
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let mut file =
            File::open(path).context(format!("Failed to open config file: {:?}", path))?;
        let mut content = String::new();
        file.read_to_string(&mut content)
            .context("Failed to read config file")?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// 启动时校验配置，任何网络调用之前执行
    pub fn validate(&self) -> Result<()> {
        if self.load_file.is_none() && self.llm.api_key.trim().is_empty() {
            bail!("LLM API key未配置，请在配置文件中设置或通过BLOGSMITH_LLM_API_KEY环境变量提供");
        }

        if !(0.0..=1.0).contains(&self.llm.temperature) {
            bail!("温度参数必须位于[0.0, 1.0]区间: {}", self.llm.temperature);
        }

        if !self.skip_post
            && (self.site.url.trim().is_empty()
                || self.site.username.trim().is_empty()
                || self.site.password.trim().is_empty())
        {
            bail!(
                "WordPress站点配置不完整，请设置site.url/site.username/site.password（或使用--skip-post仅生成内容）"
            );
        }

        if self.loop_count == 0 {
            bail!("loop_count必须大于0");
        }

        Ok(())
    }

    /// 站点地址去掉末尾斜杠后的形式
    pub fn site_base_url(&self) -> String {
        self.site.url.trim_end_matches('/').to_string()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            topic: None,
            target_words: None,
            tone: Tone::default(),
            structure: Structure::default(),
            no_research: false,
            loop_count: 1,
            skip_post: false,
            skip_meta: false,
            keyphrase_count: 5,
            load_file: None,
            output_file: None,
            site: SiteConfig::default(),
            llm: LLMConfig::default(),
            search: SearchConfig::default(),
            context: ContextConfig::default(),
            defaults: PostDefaults::default(),
            cache: CacheConfig::default(),
            verbose: false,
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            url: std::env::var("BLOGSMITH_WP_URL").unwrap_or_default(),
            username: std::env::var("BLOGSMITH_WP_USERNAME").unwrap_or_default(),
            password: std::env::var("BLOGSMITH_WP_PASSWORD").unwrap_or_default(),
            auth_method: None,
            use_application_password: false,
        }
    }
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            provider: LLMProvider::default(),
            api_key: std::env::var("BLOGSMITH_LLM_API_KEY").unwrap_or_default(),
            api_base_url: String::from("https://api.openai.com/v1"),
            model_efficient: String::from("gpt-4o-mini"),
            model_powerful: String::from("gpt-4o"),
            max_tokens: 16384,
            temperature: 0.7,
            retry_attempts: 5,
            retry_delay_ms: 5000,
            timeout_seconds: 300,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_key: std::env::var("BLOGSMITH_SEARCH_API_KEY").unwrap_or_default(),
            api_base_url: String::from("https://api.tavily.com"),
            search_depth: String::from("advanced"),
            max_results: 10,
        }
    }
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            style_file: PathBuf::from("Context_Style.md"),
            knowledge_file: PathBuf::from("Context_Knowledge.md"),
            goal_file: PathBuf::from("Context_Goal.md"),
            topics_file: PathBuf::from("Context_Topics.md"),
        }
    }
}

impl Default for PostDefaults {
    fn default() -> Self {
        Self {
            category_id: None,
            category_name: String::from("Uncategorized"),
            tags: vec![
                "ai".to_string(),
                "generated".to_string(),
                "content".to_string(),
            ],
            status: PostStatus::Draft,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            cache_dir: PathBuf::from(".blogsmith/cache"),
            expire_hours: 168,
        }
    }
}

// Include tests
#[cfg(test)]
mod tests;
