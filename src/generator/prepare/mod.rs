//! 准备阶段：加载上下文文档（文风/知识库/目标/选题指南）进入Memory

use anyhow::Result;
use std::path::Path;

use crate::generator::context::GeneratorContext;
use crate::generator::memory::{MemoryScope, ScopedKeys};

/// 执行准备阶段，整个进程只需执行一次
pub async fn execute(context: &GeneratorContext) -> Result<()> {
    println!("📚 加载上下文文档...");

    let docs = [
        (ScopedKeys::STYLE_GUIDE, &context.config.context.style_file),
        (
            ScopedKeys::KNOWLEDGE_BASE,
            &context.config.context.knowledge_file,
        ),
        (ScopedKeys::GOAL_STATEMENT, &context.config.context.goal_file),
        (
            ScopedKeys::TOPIC_GUIDELINES,
            &context.config.context.topics_file,
        ),
    ];

    for (key, path) in docs {
        let content = read_markdown_file(path);
        if content.trim().is_empty() {
            eprintln!("⚠️ 上下文文档 {:?} 缺失或为空", path);
        } else if context.config.verbose {
            println!("   已加载 {:?} ({} 字节)", path, content.len());
        }
        context
            .store_to_memory(MemoryScope::CONTEXT, key, content)
            .await?;
    }

    Ok(())
}

/// 读取markdown文件，缺失或读取失败时返回空字符串
fn read_markdown_file(path: &Path) -> String {
    if !path.exists() {
        return String::new();
    }

    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("⚠️ 读取文件 {:?} 失败: {}", path, e);
            String::new()
        }
    }
}
