use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::{
    cache::CacheManager,
    config::Config,
    llm::client::LLMClient,
    memory::Memory,
    search::{SearchProvider, TavilyClient},
};

#[derive(Clone)]
pub struct GeneratorContext {
    /// LLM调用器，用于与AI通信。
    pub llm_client: LLMClient,
    /// 搜索API客户端
    pub search: Arc<dyn SearchProvider>,
    /// 配置
    pub config: Config,
    /// 缓存管理器
    pub cache_manager: Arc<CacheManager>,
    /// 生成器记忆
    pub memory: Arc<RwLock<Memory>>,
}

impl GeneratorContext {
    /// 创建新的生成器上下文
    pub fn new(config: Config) -> Result<Self> {
        let search = Arc::new(TavilyClient::new(config.search.clone()));
        Self::with_search_provider(config, search)
    }

    /// 使用自定义搜索实现创建上下文（测试中注入桩对象）
    pub fn with_search_provider(
        config: Config,
        search: Arc<dyn SearchProvider>,
    ) -> Result<Self> {
        let llm_client = LLMClient::new(config.clone())?;
        let cache_manager = Arc::new(CacheManager::new(config.cache.clone()));
        let memory = Arc::new(RwLock::new(Memory::new()));

        Ok(Self {
            llm_client,
            search,
            config,
            cache_manager,
            memory,
        })
    }

    /// 存储数据到 Memory
    pub async fn store_to_memory<T>(&self, scope: &str, key: &str, data: T) -> Result<()>
    where
        T: Serialize + Send + Sync,
    {
        let mut memory = self.memory.write().await;
        memory.store(scope, key, data)
    }

    /// 从 Memory 获取数据
    pub async fn get_from_memory<T>(&self, scope: &str, key: &str) -> Option<T>
    where
        T: for<'a> Deserialize<'a> + Send + Sync,
    {
        let memory = self.memory.read().await;
        memory.get(scope, key)
    }

    /// 检查Memory中是否存在指定数据
    pub async fn has_memory_data(&self, scope: &str, key: &str) -> bool {
        let memory = self.memory.read().await;
        memory.has_data(scope, key)
    }

    /// 清空指定作用域
    pub async fn clear_memory_scope(&self, scope: &str) {
        let mut memory = self.memory.write().await;
        memory.clear_scope(scope);
    }

    /// 获取Memory使用统计
    pub async fn get_memory_stats(&self) -> HashMap<String, usize> {
        let memory = self.memory.read().await;
        memory.get_usage_stats()
    }
}
