#[cfg(test)]
mod tests {
    use crate::config::{
        AuthMethod, CacheConfig, Config, LLMConfig, LLMProvider, PostDefaults, PostStatus,
    };
    use crate::style::{Structure, Tone};
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert!(config.topic.is_none());
        assert!(config.target_words.is_none());
        assert_eq!(config.tone, Tone::Persuasive);
        assert_eq!(config.structure, Structure::Sectioned);
        assert!(!config.no_research);
        assert_eq!(config.loop_count, 1);
        assert!(!config.skip_post);
        assert!(!config.skip_meta);
        assert_eq!(config.keyphrase_count, 5);
        assert!(config.load_file.is_none());
        assert!(config.output_file.is_none());
        assert!(!config.verbose);
    }

    #[test]
    fn test_llm_provider_default() {
        let provider = LLMProvider::default();
        assert_eq!(provider, LLMProvider::OpenAI);
    }

    #[test]
    fn test_llm_provider_from_str() {
        assert_eq!(
            "openai".parse::<LLMProvider>().unwrap(),
            LLMProvider::OpenAI
        );
        assert_eq!(
            "moonshot".parse::<LLMProvider>().unwrap(),
            LLMProvider::Moonshot
        );
        assert_eq!(
            "deepseek".parse::<LLMProvider>().unwrap(),
            LLMProvider::DeepSeek
        );
        assert_eq!(
            "mistral".parse::<LLMProvider>().unwrap(),
            LLMProvider::Mistral
        );
        assert_eq!(
            "openrouter".parse::<LLMProvider>().unwrap(),
            LLMProvider::OpenRouter
        );
        assert_eq!(
            "anthropic".parse::<LLMProvider>().unwrap(),
            LLMProvider::Anthropic
        );
        assert_eq!(
            "gemini".parse::<LLMProvider>().unwrap(),
            LLMProvider::Gemini
        );
        assert_eq!(
            "ollama".parse::<LLMProvider>().unwrap(),
            LLMProvider::Ollama
        );

        assert!("invalid".parse::<LLMProvider>().is_err());
    }

    #[test]
    fn test_auth_method_from_str() {
        assert_eq!("basic".parse::<AuthMethod>().unwrap(), AuthMethod::Basic);
        assert_eq!(
            "application".parse::<AuthMethod>().unwrap(),
            AuthMethod::Application
        );
        assert_eq!(
            "application-password".parse::<AuthMethod>().unwrap(),
            AuthMethod::Application
        );
        assert_eq!("jwt".parse::<AuthMethod>().unwrap(), AuthMethod::Jwt);
        assert!("oauth".parse::<AuthMethod>().is_err());
    }

    #[test]
    fn test_post_status_from_str() {
        assert_eq!("draft".parse::<PostStatus>().unwrap(), PostStatus::Draft);
        assert_eq!(
            "publish".parse::<PostStatus>().unwrap(),
            PostStatus::Publish
        );
        assert_eq!(
            "pending".parse::<PostStatus>().unwrap(),
            PostStatus::Pending
        );
        assert_eq!(
            "private".parse::<PostStatus>().unwrap(),
            PostStatus::Private
        );
        assert!("trash".parse::<PostStatus>().is_err());

        assert_eq!(PostStatus::default(), PostStatus::Draft);
        assert_eq!(PostStatus::Publish.to_string(), "publish");
    }

    #[test]
    fn test_llm_config_default() {
        let config = LLMConfig::default();

        assert_eq!(config.provider, LLMProvider::OpenAI);
        // api_key may be empty if env var is not set
        assert!(!config.api_base_url.is_empty());
        assert!(!config.model_efficient.is_empty());
        assert!(!config.model_powerful.is_empty());
        assert_eq!(config.max_tokens, 16384);
        assert_eq!(config.temperature, 0.7);
        assert_eq!(config.retry_attempts, 5);
        assert_eq!(config.retry_delay_ms, 5000);
        assert_eq!(config.timeout_seconds, 300);
    }

    #[test]
    fn test_cache_config_default() {
        let config = CacheConfig::default();

        assert!(config.enabled);
        assert_eq!(config.cache_dir, PathBuf::from(".blogsmith/cache"));
        assert_eq!(config.expire_hours, 168); // 1 week
    }

    #[test]
    fn test_post_defaults() {
        let defaults = PostDefaults::default();

        assert!(defaults.category_id.is_none());
        assert_eq!(defaults.category_name, "Uncategorized");
        assert_eq!(defaults.tags, vec!["ai", "generated", "content"]);
        assert_eq!(defaults.status, PostStatus::Draft);
    }

    #[test]
    fn test_context_defaults() {
        let config = Config::default();

        assert_eq!(config.context.style_file, PathBuf::from("Context_Style.md"));
        assert_eq!(
            config.context.knowledge_file,
            PathBuf::from("Context_Knowledge.md")
        );
        assert_eq!(config.context.goal_file, PathBuf::from("Context_Goal.md"));
        assert_eq!(
            config.context.topics_file,
            PathBuf::from("Context_Topics.md")
        );
    }

    #[test]
    fn test_search_config_default() {
        let config = Config::default();

        assert_eq!(config.search.api_base_url, "https://api.tavily.com");
        assert_eq!(config.search.search_depth, "advanced");
        assert_eq!(config.search.max_results, 10);
    }

    #[test]
    fn test_validate_requires_llm_key() {
        let mut config = Config::default();
        config.llm.api_key = String::new();
        config.skip_post = true;

        assert!(config.validate().is_err());

        // load-file模式不需要LLM
        config.load_file = Some(PathBuf::from("post.html"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_requires_site_credentials() {
        let mut config = Config::default();
        config.llm.api_key = "sk-test".to_string();
        config.site.url = String::new();
        config.site.username = String::new();
        config.site.password = String::new();

        assert!(config.validate().is_err());

        config.skip_post = true;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_temperature_range() {
        let mut config = Config::default();
        config.llm.api_key = "sk-test".to_string();
        config.skip_post = true;

        config.llm.temperature = 1.5;
        assert!(config.validate().is_err());

        config.llm.temperature = 0.0;
        assert!(config.validate().is_ok());

        config.llm.temperature = 1.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_loop_count() {
        let mut config = Config::default();
        config.llm.api_key = "sk-test".to_string();
        config.skip_post = true;
        config.loop_count = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_site_base_url_strips_trailing_slash() {
        let mut config = Config::default();
        config.site.url = "https://blog.example.com/".to_string();

        assert_eq!(config.site_base_url(), "https://blog.example.com");
    }

    #[test]
    fn test_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("blogsmith.toml");

        let config_content = r#"
topic = "Rust async pitfalls"
tone = "informative"
structure = "article"
no_research = true
loop_count = 2
skip_post = false
skip_meta = false
keyphrase_count = 3
verbose = true

[site]
url = "https://blog.example.com"
username = "editor"
password = "secret"
use_application_password = true

[llm]
provider = "deepseek"
api_key = "sk-test"
api_base_url = "https://api.deepseek.com/v1"
model_efficient = "deepseek-chat"
model_powerful = "deepseek-reasoner"
max_tokens = 8192
temperature = 0.5
retry_attempts = 3
retry_delay_ms = 1000
timeout_seconds = 120

[search]
api_key = "tvly-test"
api_base_url = "https://api.tavily.com"
search_depth = "basic"
max_results = 5

[context]
style_file = "docs/style.md"
knowledge_file = "docs/knowledge.md"
goal_file = "docs/goal.md"
topics_file = "docs/topics.md"

[defaults]
category_name = "News"
tags = ["rust", "async"]
status = "publish"

[cache]
enabled = false
cache_dir = ".blogsmith/cache"
expire_hours = 24
"#;

        std::fs::write(&config_path, config_content).unwrap();

        let config = Config::from_file(&config_path).unwrap();

        assert_eq!(config.topic, Some("Rust async pitfalls".to_string()));
        assert_eq!(config.tone, Tone::Informative);
        assert_eq!(config.structure, Structure::Article);
        assert!(config.no_research);
        assert_eq!(config.loop_count, 2);
        assert_eq!(config.keyphrase_count, 3);
        assert_eq!(config.site.url, "https://blog.example.com");
        assert!(config.site.use_application_password);
        assert_eq!(config.llm.provider, LLMProvider::DeepSeek);
        assert_eq!(config.llm.temperature, 0.5);
        assert_eq!(config.search.max_results, 5);
        assert_eq!(config.context.style_file, PathBuf::from("docs/style.md"));
        assert_eq!(config.defaults.category_name, "News");
        assert_eq!(config.defaults.status, PostStatus::Publish);
        assert!(!config.cache.enabled);

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_file_missing() {
        let result = Config::from_file(&PathBuf::from("/nonexistent/blogsmith.toml"));
        assert!(result.is_err());
    }
}
