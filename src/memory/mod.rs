use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Memory元数据
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryMetadata {
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    pub data_sizes: HashMap<String, usize>,
    pub total_size: usize,
}

impl Default for MemoryMetadata {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryMetadata {
    pub fn new() -> Self {
        Self {
            created_at: Utc::now(),
            last_updated: Utc::now(),
            data_sizes: HashMap::new(),
            total_size: 0,
        }
    }
}

/// 运行期数据暂存区：流水线各阶段通过 scope:key 交接中间产物
#[derive(Debug)]
pub struct Memory {
    data: HashMap<String, Value>,
    metadata: MemoryMetadata,
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl Memory {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            metadata: MemoryMetadata::new(),
        }
    }

    /// 存储数据到指定作用域和键
    pub fn store<T>(&mut self, scope: &str, key: &str, data: T) -> Result<()>
    where
        T: Serialize,
    {
        let full_key = format!("{}:{}", scope, key);
        let serialized = serde_json::to_value(data)?;

        let data_size = serialized.to_string().len();

        if let Some(old_size) = self.metadata.data_sizes.get(&full_key) {
            self.metadata.total_size -= old_size;
        }
        self.metadata.data_sizes.insert(full_key.clone(), data_size);
        self.metadata.total_size += data_size;
        self.metadata.last_updated = Utc::now();

        self.data.insert(full_key, serialized);
        Ok(())
    }

    /// 从指定作用域和键获取数据
    pub fn get<T>(&self, scope: &str, key: &str) -> Option<T>
    where
        T: for<'a> Deserialize<'a>,
    {
        let full_key = format!("{}:{}", scope, key);

        self.data
            .get(&full_key)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    /// 检查是否存在指定数据
    pub fn has_data(&self, scope: &str, key: &str) -> bool {
        let full_key = format!("{}:{}", scope, key);
        self.data.contains_key(&full_key)
    }

    /// 列出指定作用域的所有键
    pub fn list_keys(&self, scope: &str) -> Vec<String> {
        let prefix = format!("{}:", scope);
        self.data
            .keys()
            .filter(|key| key.starts_with(&prefix))
            .map(|key| key[prefix.len()..].to_string())
            .collect()
    }

    /// 清空指定作用域，loop模式下每轮开始前调用
    pub fn clear_scope(&mut self, scope: &str) {
        let prefix = format!("{}:", scope);
        let keys: Vec<String> = self
            .data
            .keys()
            .filter(|key| key.starts_with(&prefix))
            .cloned()
            .collect();

        for key in keys {
            if let Some(size) = self.metadata.data_sizes.remove(&key) {
                self.metadata.total_size -= size;
            }
            self.data.remove(&key);
        }
        self.metadata.last_updated = Utc::now();
    }

    /// 获取内存使用统计
    pub fn get_usage_stats(&self) -> HashMap<String, usize> {
        let mut stats = HashMap::new();

        for (key, size) in &self.metadata.data_sizes {
            let scope = key.split(':').next().unwrap_or("unknown").to_string();
            *stats.entry(scope).or_insert(0) += size;
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_and_get() {
        let mut memory = Memory::new();
        memory.store("draft", "topic", "Test Topic").unwrap();

        let value: Option<String> = memory.get("draft", "topic");
        assert_eq!(value, Some("Test Topic".to_string()));
        assert!(memory.has_data("draft", "topic"));
        assert!(!memory.has_data("draft", "body"));
    }

    #[test]
    fn test_scope_isolation() {
        let mut memory = Memory::new();
        memory.store("context", "style", "a").unwrap();
        memory.store("draft", "style", "b").unwrap();

        let a: Option<String> = memory.get("context", "style");
        let b: Option<String> = memory.get("draft", "style");
        assert_eq!(a, Some("a".to_string()));
        assert_eq!(b, Some("b".to_string()));
    }

    #[test]
    fn test_list_keys() {
        let mut memory = Memory::new();
        memory.store("draft", "topic", "t").unwrap();
        memory.store("draft", "body", "b").unwrap();
        memory.store("context", "style", "s").unwrap();

        let mut keys = memory.list_keys("draft");
        keys.sort();
        assert_eq!(keys, vec!["body", "topic"]);
    }

    #[test]
    fn test_clear_scope() {
        let mut memory = Memory::new();
        memory.store("draft", "topic", "t").unwrap();
        memory.store("draft", "body", "b").unwrap();
        memory.store("context", "style", "s").unwrap();

        memory.clear_scope("draft");

        assert!(!memory.has_data("draft", "topic"));
        assert!(!memory.has_data("draft", "body"));
        assert!(memory.has_data("context", "style"));

        let stats = memory.get_usage_stats();
        assert!(!stats.contains_key("draft"));
    }

    #[test]
    fn test_usage_stats() {
        let mut memory = Memory::new();
        memory.store("draft", "topic", "t").unwrap();
        memory.store("draft", "body", "b").unwrap();

        let stats = memory.get_usage_stats();
        assert!(stats.get("draft").copied().unwrap_or(0) > 0);
    }
}
