//! 搜索API客户端（Tavily兼容），为主题解析与素材检索提供新闻检索能力

pub mod error;
pub mod types;

pub use error::{Result, SearchError};
pub use types::{SearchHit, SearchRequest, SearchResponse};

use async_trait::async_trait;

use crate::config::SearchConfig;

/// 检索服务抽象，测试中可注入计数桩替代真实网络调用
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>>;
}

/// Tavily检索客户端
pub struct TavilyClient {
    client: reqwest::Client,
    config: SearchConfig,
}

impl TavilyClient {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl SearchProvider for TavilyClient {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        let request = SearchRequest {
            query: query.to_string(),
            search_depth: self.config.search_depth.clone(),
            include_answer: false,
            max_results: self.config.max_results,
        };

        let url = format!(
            "{}/search",
            self.config.api_base_url.trim_end_matches('/')
        );
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SearchError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let search_resp: SearchResponse = resp.json().await?;
        Ok(search_resp.results)
    }
}

/// 过滤掉标题或摘录过短的无效结果
pub fn filter_valid_hits(hits: Vec<SearchHit>) -> Vec<SearchHit> {
    hits.into_iter()
        .filter(|hit| {
            !hit.title.is_empty()
                && hit.title != "EOF"
                && hit.title.len() > 5
                && hit.content.len() > 20
        })
        .map(|mut hit| {
            // 清理尾部的EOF标记
            if hit.title.ends_with("EOF") {
                hit.title = hit.title.trim_end_matches("EOF").trim().to_string();
            }
            hit
        })
        .collect()
}
