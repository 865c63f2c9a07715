use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::style::{Structure, Tone};

/// 单次运行的生成请求，构建后不再修改
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// 文章主题，缺省时由主题解析器自动生成
    pub topic: Option<String>,
    /// 目标字数
    pub target_words: u32,
    /// 采样温度 (0.0-1.0)
    pub temperature: f64,
    /// 语气
    pub tone: Tone,
    /// 结构模式
    pub structure: Structure,
    /// 是否启用网络检索
    pub research_enabled: bool,
}

/// 检索得到的素材片段，仅作为提示词上下文使用，不持久化
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchSnippet {
    pub title: String,
    pub url: String,
    /// 正文摘录
    pub excerpt: String,
}

/// 主题解析器产出的博客选题
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TopicProposal {
    /// 博客标题
    pub title: String,
    /// 2-3句的内容说明
    pub description: String,
    /// 选题来源文章（自动选题时存在）
    #[schemars(skip)]
    #[serde(default)]
    pub source_article: Option<ResearchSnippet>,
}

/// SEO元数据
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PostMetadata {
    /// 元描述，150-160字符
    pub meta_description: String,
    /// SEO关键词组
    pub keyphrases: Vec<String>,
}

/// 生成完成的博客文章，每次成功运行恰好产出一篇
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedPost {
    pub title: String,
    /// HTML正文
    pub body: String,
    /// SEO元数据，跳过或失败时为None
    pub metadata: Option<PostMetadata>,
}

/// 发布目标标识
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PublishTarget {
    /// 远端文章ID
    Remote(u64),
    /// 本地文件路径
    Local(PathBuf),
}

/// 发布结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishResult {
    pub success: bool,
    pub target: Option<PublishTarget>,
    /// 失败详情
    pub error: Option<String>,
}

impl PublishResult {
    pub fn remote(post_id: u64) -> Self {
        Self {
            success: true,
            target: Some(PublishTarget::Remote(post_id)),
            error: None,
        }
    }

    pub fn local(path: PathBuf) -> Self {
        Self {
            success: true,
            target: Some(PublishTarget::Local(path)),
            error: None,
        }
    }

    pub fn failure(detail: impl Into<String>) -> Self {
        Self {
            success: false,
            target: None,
            error: Some(detail.into()),
        }
    }
}
