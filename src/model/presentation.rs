//! Per-model prompt formatting and response layout.

use serde::Serialize;

const DEEPSEEK_START_TOKEN: &str = "<｜begin▁of▁sentence｜>";
const DEEPSEEK_USER_PREFIX: &str = "<｜User｜>";
const DEEPSEEK_ASSISTANT_PREFIX: &str = "<｜Assistant｜>";
const THINK_START: &str = "<think>";
const THINK_END: &str = "</think>";

/// Selects the prompt format and response layout a UI applies to a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UiVariant {
    /// Plain prompt in, plain answer out.
    Generic,
    /// DeepSeek-R1 chat template with a separate reasoning section.
    DeepSeek,
}

/// A raw model response split into the parts a UI renders separately.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModelResponse {
    pub thinking: Option<String>,
    pub answer: String,
}

impl UiVariant {
    pub fn format_prompt(&self, text: &str) -> String {
        match self {
            UiVariant::Generic => text.to_string(),
            UiVariant::DeepSeek => format!(
                "{DEEPSEEK_START_TOKEN}{DEEPSEEK_USER_PREFIX}{text}{DEEPSEEK_ASSISTANT_PREFIX}"
            ),
        }
    }

    pub fn shows_thinking(&self) -> bool {
        matches!(self, UiVariant::DeepSeek)
    }

    /// Splits generated text into reasoning and answer.
    ///
    /// Works on partial output too: text after an unterminated `<think>` is
    /// still reasoning and the answer stays empty.
    pub fn split_response(&self, raw: &str) -> ModelResponse {
        if !self.shows_thinking() {
            return ModelResponse {
                thinking: None,
                answer: raw.to_string(),
            };
        }

        let body = raw.trim_start();
        let Some(after_start) = body.strip_prefix(THINK_START) else {
            return match body.split_once(THINK_END) {
                // The template may open the think block itself, so only the
                // closing marker shows up in the output.
                Some((thinking, answer)) => ModelResponse {
                    thinking: Some(thinking.trim().to_string()),
                    answer: answer.trim_start().to_string(),
                },
                None => ModelResponse {
                    thinking: None,
                    answer: raw.to_string(),
                },
            };
        };

        match after_start.split_once(THINK_END) {
            Some((thinking, answer)) => ModelResponse {
                thinking: Some(thinking.trim().to_string()),
                answer: answer.trim_start().to_string(),
            },
            None => ModelResponse {
                thinking: Some(after_start.trim().to_string()),
                answer: String::new(),
            },
        }
    }
}
