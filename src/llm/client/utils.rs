use crate::config::LLMConfig;

/// 按提示词规模挑选模型：常规规模用高能效模型并保留高质量模型兜底，
/// 超长提示词直接使用高质量模型
pub fn evaluate_befitting_model(
    llm_config: &LLMConfig,
    system_prompt: &str,
    user_prompt: &str,
) -> (String, Option<String>) {
    if system_prompt.len() + user_prompt.len() <= 32 * 1024 {
        return (
            llm_config.model_efficient.clone(),
            Some(llm_config.model_powerful.clone()),
        );
    }
    (llm_config.model_powerful.clone(), None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_prompt_prefers_efficient_model() {
        let config = LLMConfig::default();
        let (model, fallover) = evaluate_befitting_model(&config, "sys", "user");

        assert_eq!(model, config.model_efficient);
        assert_eq!(fallover, Some(config.model_powerful.clone()));
    }

    #[test]
    fn test_large_prompt_uses_powerful_model() {
        let config = LLMConfig::default();
        let big = "x".repeat(40 * 1024);
        let (model, fallover) = evaluate_befitting_model(&config, "sys", &big);

        assert_eq!(model, config.model_powerful);
        assert!(fallover.is_none());
    }
}
