//! Agent执行入口：统一处理缓存命中与LLM调用

use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::generator::context::GeneratorContext;

/// Agent执行参数
pub struct AgentExecuteParams {
    pub prompt_sys: String,
    pub prompt_user: String,
    /// 缓存类别，同类Agent共享一个缓存目录
    pub cache_scope: String,
    /// 日志标识
    pub log_tag: String,
}

impl AgentExecuteParams {
    fn cache_key(&self) -> String {
        format!("{}\n---\n{}", self.prompt_sys, self.prompt_user)
    }
}

/// 结构化提取执行
pub async fn extract<T>(context: &GeneratorContext, params: AgentExecuteParams) -> Result<T>
where
    T: JsonSchema + for<'a> Deserialize<'a> + Serialize + Send + Sync + 'static,
{
    let cache_key = params.cache_key();

    if let Some(cached) = context
        .cache_manager
        .get::<T>(&params.cache_scope, &cache_key)
        .await?
    {
        println!("   📦 [{}] 命中提示词缓存", params.log_tag);
        return Ok(cached);
    }

    let result = context
        .llm_client
        .extract::<T>(&params.prompt_sys, &params.prompt_user)
        .await?;

    if let Err(e) = context
        .cache_manager
        .set(&params.cache_scope, &cache_key, &result, None)
        .await
    {
        eprintln!("⚠️ [{}] 写入缓存失败: {}", params.log_tag, e);
    }

    Ok(result)
}

/// 文本推理执行
pub async fn prompt(context: &GeneratorContext, params: AgentExecuteParams) -> Result<String> {
    let cache_key = params.cache_key();

    if let Some(cached) = context
        .cache_manager
        .get::<String>(&params.cache_scope, &cache_key)
        .await?
    {
        println!("   📦 [{}] 命中提示词缓存", params.log_tag);
        return Ok(cached);
    }

    let result = context
        .llm_client
        .prompt(&params.prompt_sys, &params.prompt_user)
        .await?;

    if let Err(e) = context
        .cache_manager
        .set(&params.cache_scope, &cache_key, &result, None)
        .await
    {
        eprintln!("⚠️ [{}] 写入缓存失败: {}", params.log_tag, e);
    }

    Ok(result)
}
