//! Instruction template wrapped around the user's prompt.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{Error, ErrorContext};

/// Number of rewordings the instruction asks for.
pub const SUGGESTION_COUNT: usize = 3;

/// Language the instruction is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateLanguage {
    #[default]
    #[serde(alias = "en")]
    English,
    #[serde(alias = "ja")]
    Japanese,
}

impl FromStr for TemplateLanguage {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(TemplateLanguage::English),
            "ja" | "japanese" => Ok(TemplateLanguage::Japanese),
            other => Err(Error::configuration_with_context(
                format!("unsupported template language '{}'", other),
                ErrorContext::new()
                    .with_field_path("language")
                    .with_details("expected one of: en, ja"),
            )),
        }
    }
}

/// Build the instruction sent to the model. `prompt` is embedded verbatim.
pub fn build_instruction(prompt: &str, language: TemplateLanguage) -> String {
    match language {
        TemplateLanguage::English => format!(
            "Suggest {count} different improved versions of the user prompt below.\n\
             Each version should be clearer and more specific, so that an AI can understand the intent precisely \
             and give a high-quality, original answer.\n\
             Each version must stand on its own. Output only the proposed prompts, with no explanations or preamble.\n\
             Separate the versions with newlines and format them as a numbered list, like this:\n\
             \n\
             Example:\n\
             1. Proposed prompt A\n\
             2. Proposed prompt B\n\
             3. Proposed prompt C\n\
             \n\
             User prompt:\n\
             \"{prompt}\"\n\
             \n\
             Improved versions:\n",
            count = SUGGESTION_COUNT,
            prompt = prompt,
        ),
        TemplateLanguage::Japanese => format!(
            "以下のユーザープロンプトについて、{count}つの異なる改善案を提案してください。\n\
             それぞれの改善案は、より明確で、具体的で、AIが意図を正確に理解しやすく、質の高い独自の応答を引き出せるように考慮してください。\n\
             各改善案は独立しており、他の説明や前置きなしで、提案されたプロンプトのみを提示してください。\n\
             各提案は改行で区切り、以下のように番号付きリストの形式で出力してください。\n\
             \n\
             例:\n\
             1. 提案されたプロンプトA\n\
             2. 提案されたプロンプトB\n\
             3. 提案されたプロンプトC\n\
             \n\
             ユーザープロンプト:\n\
             \"{prompt}\"\n\
             \n\
             改善案:\n",
            count = SUGGESTION_COUNT,
            prompt = prompt,
        ),
    }
}

/// Recover the embedded prompt from an instruction built by [`build_instruction`].
#[cfg(test)]
pub(crate) fn embedded_prompt(instruction: &str) -> Option<&str> {
    let start = instruction.find(":\n\"")? + 3;
    let end = instruction.rfind("\"\n\n")?;
    instruction.get(start..end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instruction_embeds_prompt_verbatim() {
        let prompt = "Explain \"ownership\" in Rust\nwith examples";
        for lang in [TemplateLanguage::English, TemplateLanguage::Japanese] {
            let instruction = build_instruction(prompt, lang);
            assert_eq!(embedded_prompt(&instruction), Some(prompt));
        }
    }

    #[test]
    fn test_instruction_requests_numbered_list() {
        let instruction = build_instruction("x", TemplateLanguage::English);
        assert!(instruction.contains("Suggest 3 different improved versions"));
        assert!(instruction.contains("1. Proposed prompt A\n2. Proposed prompt B\n3. Proposed prompt C"));
        assert!(instruction.ends_with("Improved versions:\n"));
    }

    #[test]
    fn test_language_from_str() {
        assert_eq!("ja".parse::<TemplateLanguage>().unwrap(), TemplateLanguage::Japanese);
        assert_eq!(" English ".parse::<TemplateLanguage>().unwrap(), TemplateLanguage::English);
        assert_eq!("fr".parse::<TemplateLanguage>().unwrap_err().kind(), "configuration");
    }
}
