use serde::{Deserialize, Serialize};

/// 文章语气类型
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Default)]
pub enum Tone {
    #[serde(rename = "persuasive")]
    #[default]
    Persuasive,
    #[serde(rename = "informative")]
    Informative,
    #[serde(rename = "conversational")]
    Conversational,
    #[serde(rename = "analytical")]
    Analytical,
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tone::Persuasive => write!(f, "persuasive"),
            Tone::Informative => write!(f, "informative"),
            Tone::Conversational => write!(f, "conversational"),
            Tone::Analytical => write!(f, "analytical"),
        }
    }
}

impl std::str::FromStr for Tone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "persuasive" => Ok(Tone::Persuasive),
            "informative" => Ok(Tone::Informative),
            "conversational" => Ok(Tone::Conversational),
            "analytical" => Ok(Tone::Analytical),
            _ => Err(format!("Unknown tone: {}", s)),
        }
    }
}

impl Tone {
    /// 获取语气的提示词指令
    pub fn prompt_instruction(&self) -> &'static str {
        match self {
            Tone::Persuasive => {
                "Write in a persuasive tone that drives the reader toward action, backing claims with concrete reasoning."
            }
            Tone::Informative => {
                "Write in an informative tone, prioritizing clarity and factual accuracy over rhetoric."
            }
            Tone::Conversational => {
                "Write in a relaxed, conversational tone, as if explaining the topic to a curious friend."
            }
            Tone::Analytical => {
                "Write in an analytical tone, weighing evidence and trade-offs before drawing conclusions."
            }
        }
    }
}

/// 文章结构类型
///
/// `Article` 单次推理直接产出全文；`Sectioned` 先生成大纲，再逐节撰写后拼装。
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Default)]
pub enum Structure {
    #[serde(rename = "article")]
    Article,
    #[serde(rename = "sectioned")]
    #[default]
    Sectioned,
}

impl std::fmt::Display for Structure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Structure::Article => write!(f, "article"),
            Structure::Sectioned => write!(f, "sectioned"),
        }
    }
}

impl std::str::FromStr for Structure {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "article" | "single" => Ok(Structure::Article),
            "sectioned" | "outline" => Ok(Structure::Sectioned),
            _ => Err(format!("Unknown structure: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_roundtrip() {
        assert_eq!("persuasive".parse::<Tone>().unwrap(), Tone::Persuasive);
        assert_eq!("Informative".parse::<Tone>().unwrap(), Tone::Informative);
        assert_eq!(
            "conversational".parse::<Tone>().unwrap(),
            Tone::Conversational
        );
        assert_eq!("analytical".parse::<Tone>().unwrap(), Tone::Analytical);
        assert!("shouty".parse::<Tone>().is_err());

        assert_eq!(Tone::Persuasive.to_string(), "persuasive");
        assert_eq!(Tone::default(), Tone::Persuasive);
    }

    #[test]
    fn test_structure_roundtrip() {
        assert_eq!("article".parse::<Structure>().unwrap(), Structure::Article);
        assert_eq!("single".parse::<Structure>().unwrap(), Structure::Article);
        assert_eq!(
            "sectioned".parse::<Structure>().unwrap(),
            Structure::Sectioned
        );
        assert_eq!(
            "outline".parse::<Structure>().unwrap(),
            Structure::Sectioned
        );
        assert!("spiral".parse::<Structure>().is_err());

        assert_eq!(Structure::default(), Structure::Sectioned);
    }

    #[test]
    fn test_tone_prompt_instruction_non_empty() {
        for tone in [
            Tone::Persuasive,
            Tone::Informative,
            Tone::Conversational,
            Tone::Analytical,
        ] {
            assert!(!tone.prompt_instruction().is_empty());
        }
    }
}
