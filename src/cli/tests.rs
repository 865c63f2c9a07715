#[cfg(test)]
mod tests {
    use crate::cli::Args;
    use crate::config::{AuthMethod, LLMProvider, PostStatus};
    use crate::style::{Structure, Tone};
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn test_args_default_values() {
        let args = Args::try_parse_from(["blogsmith-rs"]).unwrap();

        assert!(args.topic.is_none());
        assert!(args.length.is_none());
        assert!(args.temperature.is_none());
        assert!(!args.no_research);
        assert_eq!(args.r#loop, 1);
        assert!(!args.skip_post);
        assert!(!args.skip_meta);
        assert!(!args.use_application_password);
        assert!(!args.no_cache);
        assert!(!args.verbose);
    }

    #[test]
    fn test_args_generation_options() {
        let args = Args::try_parse_from([
            "blogsmith-rs",
            "-t",
            "The Current State of Decentralized Finance",
            "-l",
            "2200",
            "--temperature",
            "0.8",
            "--tone",
            "informative",
            "--structure",
            "article",
            "--no-research",
            "--loop",
            "3",
        ])
        .unwrap();

        assert_eq!(
            args.topic,
            Some("The Current State of Decentralized Finance".to_string())
        );
        assert_eq!(args.length, Some(2200));
        assert_eq!(args.temperature, Some(0.8));
        assert_eq!(args.tone, Some("informative".to_string()));
        assert_eq!(args.structure, Some("article".to_string()));
        assert!(args.no_research);
        assert_eq!(args.r#loop, 3);
    }

    #[test]
    fn test_args_wordpress_options() {
        let args = Args::try_parse_from([
            "blogsmith-rs",
            "--category-name",
            "News",
            "--tags",
            "rust,async, tokio",
            "--status",
            "publish",
            "--auth-method",
            "jwt",
            "--use-application-password",
            "--keyphrases",
            "7",
        ])
        .unwrap();

        assert_eq!(args.category_name, Some("News".to_string()));
        assert_eq!(args.tags, Some("rust,async, tokio".to_string()));
        assert_eq!(args.status, Some("publish".to_string()));
        assert_eq!(args.auth_method, Some("jwt".to_string()));
        assert!(args.use_application_password);
        assert_eq!(args.keyphrases, Some(7));
    }

    #[test]
    fn test_args_llm_options() {
        let args = Args::try_parse_from([
            "blogsmith-rs",
            "--llm-provider",
            "openai",
            "--llm-api-key",
            "test-key",
            "--llm-api-base-url",
            "https://api.openai.com",
            "--model-efficient",
            "gpt-4o-mini",
            "--model-powerful",
            "gpt-4o",
            "--max-tokens",
            "2048",
        ])
        .unwrap();

        assert_eq!(args.llm_provider, Some("openai".to_string()));
        assert_eq!(args.llm_api_key, Some("test-key".to_string()));
        assert_eq!(
            args.llm_api_base_url,
            Some("https://api.openai.com".to_string())
        );
        assert_eq!(args.model_efficient, Some("gpt-4o-mini".to_string()));
        assert_eq!(args.model_powerful, Some("gpt-4o".to_string()));
        assert_eq!(args.max_tokens, Some(2048));
    }

    #[test]
    fn test_into_config_basic() {
        let args = Args::try_parse_from([
            "blogsmith-rs",
            "-t",
            "Test Topic",
            "--skip-post",
            "--skip-meta",
        ])
        .unwrap();

        let config = args.into_config();

        assert_eq!(config.topic, Some("Test Topic".to_string()));
        assert!(config.skip_post);
        assert!(config.skip_meta);
        assert_eq!(config.loop_count, 1);
    }

    #[test]
    fn test_into_config_with_overrides() {
        let args = Args::try_parse_from([
            "blogsmith-rs",
            "--tone",
            "analytical",
            "--structure",
            "sectioned",
            "--status",
            "draft",
            "--auth-method",
            "application",
            "--llm-provider",
            "deepseek",
            "--model-efficient",
            "deepseek-chat",
            "--temperature",
            "0.3",
            "--search-api-key",
            "tvly-test",
        ])
        .unwrap();

        let config = args.into_config();

        assert_eq!(config.tone, Tone::Analytical);
        assert_eq!(config.structure, Structure::Sectioned);
        assert_eq!(config.defaults.status, PostStatus::Draft);
        assert_eq!(config.site.auth_method, Some(AuthMethod::Application));
        assert_eq!(config.llm.provider, LLMProvider::DeepSeek);
        assert_eq!(config.llm.model_efficient, "deepseek-chat");
        assert_eq!(config.llm.temperature, 0.3);
        assert_eq!(config.search.api_key, "tvly-test");
    }

    #[test]
    fn test_into_config_tags_parsing() {
        let args =
            Args::try_parse_from(["blogsmith-rs", "--tags", "rust, async,, tokio "]).unwrap();

        let config = args.into_config();

        assert_eq!(config.defaults.tags, vec!["rust", "async", "tokio"]);
    }

    #[test]
    fn test_into_config_category_id_bypasses_name() {
        let args = Args::try_parse_from(["blogsmith-rs", "--category-id", "12"]).unwrap();

        let config = args.into_config();
        assert_eq!(config.defaults.category_id, Some(12));
    }

    #[test]
    fn test_into_config_category_name_clears_id() {
        let args = Args::try_parse_from(["blogsmith-rs", "--category-name", "News"]).unwrap();

        let config = args.into_config();
        assert_eq!(config.defaults.category_name, "News");
        assert!(config.defaults.category_id.is_none());
    }

    #[test]
    fn test_into_config_loop_clamped_to_one() {
        let args = Args::try_parse_from(["blogsmith-rs", "--loop", "0"]).unwrap();

        let config = args.into_config();
        assert_eq!(config.loop_count, 1);
    }

    #[test]
    fn test_into_config_no_cache() {
        let args = Args::try_parse_from(["blogsmith-rs", "--no-cache"]).unwrap();

        let config = args.into_config();
        assert!(!config.cache.enabled);
    }

    #[test]
    fn test_into_config_file_options() {
        let args = Args::try_parse_from([
            "blogsmith-rs",
            "--load-file",
            "existing.html",
            "-o",
            "out.html",
        ])
        .unwrap();

        let config = args.into_config();
        assert_eq!(config.load_file, Some(PathBuf::from("existing.html")));
        assert_eq!(config.output_file, Some(PathBuf::from("out.html")));
    }

    #[test]
    fn test_into_config_invalid_selectors_fall_back() {
        let args = Args::try_parse_from([
            "blogsmith-rs",
            "--tone",
            "shouty",
            "--structure",
            "spiral",
            "--status",
            "trash",
        ])
        .unwrap();

        let config = args.into_config();

        // 非法取值回落到默认值
        assert_eq!(config.tone, Tone::Persuasive);
        assert_eq!(config.structure, Structure::Sectioned);
        assert_eq!(config.defaults.status, PostStatus::Draft);
    }
}
