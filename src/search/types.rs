use serde::{Deserialize, Serialize};

/// 检索请求体（Tavily兼容）
#[derive(Debug, Serialize)]
pub struct SearchRequest {
    pub query: String,
    pub search_depth: String,
    pub include_answer: bool,
    pub max_results: usize,
}

/// 检索响应体
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchHit>,
}

/// 单条检索结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    /// 正文摘录，Tavily返回字段名为content
    #[serde(default)]
    pub content: String,
}
