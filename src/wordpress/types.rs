use serde::{Deserialize, Serialize};

use crate::types::post::PostMetadata;

/// 创建文章的请求体
#[derive(Debug, Clone, Serialize)]
pub struct PostPayload {
    pub title: String,
    pub content: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<SeoMeta>,
}

/// SEO插件识别的meta字段（Yoast与All in One SEO）
#[derive(Debug, Clone, Default, Serialize)]
pub struct SeoMeta {
    #[serde(rename = "_yoast_wpseo_metadesc", skip_serializing_if = "Option::is_none")]
    pub yoast_metadesc: Option<String>,
    #[serde(rename = "_aioseop_description", skip_serializing_if = "Option::is_none")]
    pub aioseo_description: Option<String>,
    #[serde(rename = "_yoast_wpseo_focuskw", skip_serializing_if = "Option::is_none")]
    pub yoast_focus_keyphrase: Option<String>,
    #[serde(
        rename = "_yoast_wpseo_keywordsynonyms",
        skip_serializing_if = "Option::is_none"
    )]
    pub yoast_keyphrase_synonyms: Option<String>,
}

impl SeoMeta {
    /// 由元数据生成SEO字段：首个关键词组为focus keyphrase，其余作为同义词
    pub fn from_metadata(metadata: &PostMetadata) -> Option<Self> {
        let mut meta = SeoMeta::default();
        let mut present = false;

        if !metadata.meta_description.is_empty() {
            meta.yoast_metadesc = Some(metadata.meta_description.clone());
            meta.aioseo_description = Some(metadata.meta_description.clone());
            present = true;
        }

        if let Some(primary) = metadata.keyphrases.first() {
            meta.yoast_focus_keyphrase = Some(primary.clone());
            present = true;

            if metadata.keyphrases.len() > 1 {
                meta.yoast_keyphrase_synonyms = Some(metadata.keyphrases[1..].join(", "));
            }
        }

        present.then_some(meta)
    }
}

/// 远端文章响应
#[derive(Debug, Deserialize)]
pub struct PostResponse {
    pub id: u64,
}

/// 分类/标签条目响应
#[derive(Debug, Clone, Deserialize)]
pub struct Term {
    pub id: u64,
    pub name: String,
}

/// 新建分类/标签的请求体
#[derive(Debug, Serialize)]
pub struct TermPayload {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

/// JWT令牌响应
#[derive(Debug, Deserialize)]
pub struct JwtTokenResponse {
    pub token: String,
}
