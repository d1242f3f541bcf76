//! AI episode summary client
//!
//! Requests a natural-language episode summary from the OpenAI
//! chat-completions API. The 100-150 word single-paragraph shape is a
//! prompt-level expectation only; the output is never validated or enforced.
//!
//! Summary generation is auxiliary display content, so failures degrade to a
//! fixed fallback string instead of propagating. Never retried.

use serde_json::json;
use std::time::Duration;

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const SUMMARY_MODEL: &str = "gpt-4o";

/// Returned for any generation failure, including a missing API key
pub const FALLBACK_SUMMARY: &str =
    "An error occurred while generating the episode summary.";

const SYSTEM_PROMPT: &str =
    "You are an expert podcast summarizer. Your task is to create concise, engaging summaries \
     of cricket podcast episodes. Focus on the main topics, key points, and interesting \
     insights. Use professional language while maintaining an engaging tone. Keep the summary \
     between 100-150 words. Format it as a single paragraph with no bullet points or numbering.";

/// Outcome of a summary request.
///
/// Tagged so callers and tests can tell genuine output from the degraded
/// fallback; the HTTP layer serves the text either way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryOutcome {
    /// Text produced by the generation service
    Generated(String),
    /// Fixed fallback after an upstream failure
    Fallback(String),
}

impl SummaryOutcome {
    pub fn text(&self) -> &str {
        match self {
            SummaryOutcome::Generated(text) | SummaryOutcome::Fallback(text) => text,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, SummaryOutcome::Fallback(_))
    }
}

/// OpenAI chat-completions client for episode summaries
pub struct SummaryClient {
    http_client: reqwest::Client,
    api_key: Option<String>,
}

impl SummaryClient {
    pub fn new(api_key: Option<String>) -> Result<Self, reqwest::Error> {
        if api_key.is_none() {
            tracing::warn!("OPENAI_API_KEY is not set; AI summary generation is disabled");
        }

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()?;

        Ok(Self { http_client, api_key })
    }

    /// Generate a summary from an episode's title and description.
    ///
    /// Input text is passed verbatim into the prompt.
    pub async fn generate_episode_summary(
        &self,
        title: &str,
        description: &str,
    ) -> SummaryOutcome {
        let api_key = match &self.api_key {
            Some(key) => key,
            None => {
                tracing::warn!("Summary requested without an API key configured");
                return SummaryOutcome::Fallback(FALLBACK_SUMMARY.to_string());
            }
        };

        let body = json!({
            "model": SUMMARY_MODEL,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                {
                    "role": "user",
                    "content": format!(
                        "Create a concise summary of this cricket podcast episode.\n\nTitle: {}\n\nDescription: {}",
                        title, description
                    ),
                },
            ],
            "temperature": 0.7,
            "max_tokens": 200,
        });

        match self.request_completion(api_key, &body).await {
            Ok(text) => SummaryOutcome::Generated(text),
            Err(err) => {
                tracing::error!("Error generating episode summary: {}", err);
                SummaryOutcome::Fallback(FALLBACK_SUMMARY.to_string())
            }
        }
    }

    async fn request_completion(
        &self,
        api_key: &str,
        body: &serde_json::Value,
    ) -> Result<String, String> {
        let response = self
            .http_client
            .post(OPENAI_API_URL)
            .bearer_auth(api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(format!("OpenAI API error {}: {}", status, text));
        }

        let payload: serde_json::Value = response.json().await.map_err(|e| e.to_string())?;
        let content = payload["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or("")
            .trim()
            .to_string();

        if content.is_empty() {
            Ok("Unable to generate summary.".to_string())
        } else {
            Ok(content)
        }
    }
}
