//! Wire types for the legacy `/completions` API shared by OpenAI and Azure.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(super) struct CompletionRequestDto<'a> {
    /// Azure selects the model through the deployment path instead.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) model: Option<&'a str>,
    pub(super) prompt: &'a str,
    pub(super) temperature: f32,
    pub(super) max_tokens: u32,
    #[serde(skip_serializing_if = "no_stop_sequences")]
    pub(super) stop: &'a [String],
}

fn no_stop_sequences(stop: &&[String]) -> bool {
    stop.is_empty()
}

#[derive(Debug, Deserialize)]
pub(super) struct CompletionResponseDto {
    #[serde(default)]
    pub(super) choices: Vec<CompletionChoiceDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CompletionChoiceDto {
    #[serde(default)]
    pub(super) text: String,
}

impl CompletionResponseDto {
    pub(super) fn into_text(self) -> Result<String, String> {
        self.choices
            .into_iter()
            .next()
            .map(|choice| choice.text)
            .ok_or_else(|| "response contained no choices".to_owned())
    }
}
