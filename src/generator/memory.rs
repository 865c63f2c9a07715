//! 流水线各阶段共享的Memory作用域与键定义

/// Memory作用域
pub struct MemoryScope;

impl MemoryScope {
    /// 上下文文档：启动时加载一次，整个进程生命周期内只读
    pub const CONTEXT: &'static str = "context";
    /// 草稿数据：单轮流水线的中间产物，每轮开始前清空
    pub const DRAFT: &'static str = "draft";
}

/// 各作用域下的数据键
pub struct ScopedKeys;

impl ScopedKeys {
    // context作用域
    pub const STYLE_GUIDE: &'static str = "style_guide";
    pub const KNOWLEDGE_BASE: &'static str = "knowledge_base";
    pub const GOAL_STATEMENT: &'static str = "goal_statement";
    pub const TOPIC_GUIDELINES: &'static str = "topic_guidelines";

    // draft作用域
    pub const TOPIC: &'static str = "topic";
    pub const RESEARCH: &'static str = "research";
    pub const OUTLINE: &'static str = "outline";
    pub const BODY: &'static str = "body";
    pub const METADATA: &'static str = "metadata";
}
