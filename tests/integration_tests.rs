use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use blogsmith_rs::config::Config;
use blogsmith_rs::generator::context::GeneratorContext;
use blogsmith_rs::generator::memory::{MemoryScope, ScopedKeys};
use blogsmith_rs::generator::workflow::launch_with_context;
use blogsmith_rs::generator::{prepare, topic};
use blogsmith_rs::search::{SearchHit, SearchProvider};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tempfile::TempDir;

/// 记录调用次数的检索桩
struct CountingSearch {
    calls: Arc<AtomicUsize>,
}

#[async_trait::async_trait]
impl SearchProvider for CountingSearch {
    async fn search(&self, _query: &str) -> blogsmith_rs::search::Result<Vec<SearchHit>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![])
    }
}

/// 创建一套最小的上下文文档
fn create_context_docs(dir: &Path) -> (std::path::PathBuf, std::path::PathBuf) {
    let style = dir.join("Context_Style.md");
    let knowledge = dir.join("Context_Knowledge.md");
    std::fs::write(&style, "# Style\nProfessional but conversational tone.").unwrap();
    std::fs::write(&knowledge, "# Knowledge\nThe reader knows the basics.").unwrap();
    (style, knowledge)
}

fn offline_config(dir: &Path) -> Config {
    let (style, knowledge) = create_context_docs(dir);

    let mut config = Config::default();
    config.context.style_file = style;
    config.context.knowledge_file = knowledge;
    config.context.goal_file = dir.join("missing_goal.md");
    config.context.topics_file = dir.join("missing_topics.md");
    config.cache.enabled = false;
    config.skip_post = true;
    config.skip_meta = true;
    config.no_research = true;
    config
}

#[tokio::test]
async fn test_load_file_pipeline_writes_local_html_without_remote_calls() {
    let dir = TempDir::new().unwrap();

    let source = dir.path().join("existing.html");
    std::fs::write(
        &source,
        "<article><h2>Loaded Headline</h2><p>Original body text.</p></article>",
    )
    .unwrap();
    let output = dir.path().join("published.html");

    let mut config = offline_config(dir.path());
    config.load_file = Some(source);
    config.output_file = Some(output.clone());

    let calls = Arc::new(AtomicUsize::new(0));
    let search = Arc::new(CountingSearch {
        calls: calls.clone(),
    });

    let context = GeneratorContext::with_search_provider(config, search).unwrap();
    launch_with_context(&context).await.unwrap();

    // 本地文件模式：产出一个HTML文件，不发生任何检索或CMS调用
    let written = std::fs::read_to_string(&output).unwrap();
    assert!(written.contains("Original body text."));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_explicit_topic_never_triggers_search() {
    let dir = TempDir::new().unwrap();

    let mut config = offline_config(dir.path());
    config.topic = Some("Test Topic".to_string());

    let calls = Arc::new(AtomicUsize::new(0));
    let search = Arc::new(CountingSearch {
        calls: calls.clone(),
    });

    let context = GeneratorContext::with_search_provider(config, search).unwrap();
    prepare::execute(&context).await.unwrap();

    let mut rng = StdRng::seed_from_u64(42);
    let proposal = topic::resolve(&context, &mut rng).await.unwrap();

    assert_eq!(proposal.title, "Test Topic");
    assert!(proposal.source_article.is_none());
    // 显式主题不触发检索路径
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    // 选题已写入Memory供后续阶段使用
    assert!(
        context
            .has_memory_data(MemoryScope::DRAFT, ScopedKeys::TOPIC)
            .await
    );
}

#[tokio::test]
async fn test_prepare_loads_context_docs_once() {
    let dir = TempDir::new().unwrap();
    let config = offline_config(dir.path());

    let context = GeneratorContext::new(config).unwrap();
    prepare::execute(&context).await.unwrap();

    let style: Option<String> = context
        .get_from_memory(MemoryScope::CONTEXT, ScopedKeys::STYLE_GUIDE)
        .await;
    assert!(style.unwrap().contains("Professional but conversational"));

    // 缺失文档降级为空串，不阻塞流水线
    let topics: Option<String> = context
        .get_from_memory(MemoryScope::CONTEXT, ScopedKeys::TOPIC_GUIDELINES)
        .await;
    assert_eq!(topics, Some(String::new()));
}

#[tokio::test]
async fn test_invalid_config_rejected_before_any_network_call() {
    // 缺少站点凭据且不跳过发布：启动即失败
    let mut config = Config::default();
    config.llm.api_key = "sk-test".to_string();
    config.site.url = String::new();
    config.site.username = String::new();
    config.site.password = String::new();
    config.skip_post = false;

    assert!(blogsmith_rs::launch(&config).await.is_err());
}
