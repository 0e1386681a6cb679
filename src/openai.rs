use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{Error, ModelConfig, ModelType, Provider, ProviderReply, QueryOptions, TokenUsage};

const PROVIDER: Provider = Provider::OpenAi;

/// Base instruct-era models only speak the legacy completions endpoint; everything else goes through chat.
fn uses_legacy_completions(config: &ModelConfig) -> bool {
	config.model_type == ModelType::Base && config.model_identifier.contains("instruct")
}

pub async fn ask_openai(config: &ModelConfig, api_key: &str, prompt: &str, options: &QueryOptions) -> Result<ProviderReply, Error> {
	// Header {{{
	let mut headers = HeaderMap::new();
	let auth = format!("Bearer {}", api_key.trim());
	headers.insert(AUTHORIZATION, HeaderValue::from_str(&auth).map_err(|e| Error::provider(PROVIDER, e))?);
	headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
	//,}}}

	let legacy = uses_legacy_completions(config);
	let (url, payload) = match legacy {
		true => ("https://api.openai.com/v1/completions", json!({
			"model": config.model_identifier,
			"prompt": prompt,
			"max_tokens": options.max_tokens,
			"temperature": options.temperature,
		})),
		false => ("https://api.openai.com/v1/chat/completions", json!({
			"model": config.model_identifier,
			"messages": [{ "role": "user", "content": prompt }],
			"max_tokens": options.max_tokens,
			"temperature": options.temperature,
		})),
	};
	tracing::debug!(?payload);

	let response = crate::http_client(PROVIDER)?
		.post(url)
		.headers(headers)
		.json(&payload)
		.send()
		.await
		.map_err(|e| Error::provider(PROVIDER, e))?;
	if !response.status().is_success() {
		let status = response.status();
		let body = response.text().await.unwrap_or_else(|_| "<body unavailable>".to_string());
		return Err(Error::provider(PROVIDER, format!("{status}: {body}")));
	}
	let value = response.json::<Value>().await.map_err(|e| Error::provider(PROVIDER, e))?;
	tracing::debug!(?value);
	match legacy {
		true => normalize_completions(value),
		false => normalize_chat(value),
	}
}

#[derive(Debug, Default, Deserialize)]
struct OpenAiUsage {
	#[serde(default)]
	prompt_tokens: u32,
	#[serde(default)]
	completion_tokens: u32,
}
impl From<OpenAiUsage> for TokenUsage {
	fn from(usage: OpenAiUsage) -> Self {
		Self::new(usage.prompt_tokens, usage.completion_tokens)
	}
}

fn normalize_chat(value: Value) -> Result<ProviderReply, Error> {
	#[derive(Debug, Deserialize)]
	struct ChatChoice {
		message: ChatMessage,
	}
	#[derive(Debug, Deserialize)]
	struct ChatMessage {
		#[serde(default)]
		content: String,
	}
	#[derive(Debug, Deserialize)]
	struct ChatResponse {
		choices: Vec<ChatChoice>,
		#[serde(default)]
		usage: OpenAiUsage,
	}

	let response = serde_json::from_value::<ChatResponse>(value).map_err(|e| Error::provider(PROVIDER, format!("failed to parse response: {e}")))?;
	let choice = response.choices.into_iter().next().ok_or_else(|| Error::provider(PROVIDER, "response contained no choices"))?;
	Ok(ProviderReply::new(choice.message.content, response.usage.into()))
}

fn normalize_completions(value: Value) -> Result<ProviderReply, Error> {
	#[derive(Debug, Deserialize)]
	struct CompletionChoice {
		#[serde(default)]
		text: String,
	}
	#[derive(Debug, Deserialize)]
	struct CompletionsResponse {
		choices: Vec<CompletionChoice>,
		#[serde(default)]
		usage: OpenAiUsage,
	}

	let response = serde_json::from_value::<CompletionsResponse>(value).map_err(|e| Error::provider(PROVIDER, format!("failed to parse response: {e}")))?;
	let choice = response.choices.into_iter().next().ok_or_else(|| Error::provider(PROVIDER, "response contained no choices"))?;
	Ok(ProviderReply::new(choice.text.trim().to_string(), response.usage.into()))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::catalog;

	#[test]
	fn endpoint_selection_by_model_type() {
		let base = catalog::lookup(Provider::OpenAi, ModelType::Base).unwrap();
		let instruct = catalog::lookup(Provider::OpenAi, ModelType::Instruct).unwrap();
		let fine_tuned = catalog::lookup(Provider::OpenAi, ModelType::FineTuned).unwrap();
		assert!(uses_legacy_completions(base));
		assert!(!uses_legacy_completions(instruct));
		assert!(!uses_legacy_completions(fine_tuned));
	}

	#[test]
	fn normalizes_chat_response() {
		let value = json!({
			"id": "chatcmpl-1",
			"choices": [{ "index": 0, "message": { "role": "assistant", "content": "4" }, "finish_reason": "stop" }],
			"usage": { "prompt_tokens": 10, "completion_tokens": 1, "total_tokens": 11 }
		});
		let reply = normalize_chat(value).unwrap();
		assert_eq!(reply.text, "4");
		assert_eq!(reply.usage, TokenUsage::new(10, 1));
		assert_eq!(reply.usage.total(), 11);
	}

	#[test]
	fn normalizes_legacy_completions_response() {
		let value = json!({
			"choices": [{ "text": "  4\n", "index": 0 }],
			"usage": { "prompt_tokens": 5, "completion_tokens": 2 }
		});
		let reply = normalize_completions(value).unwrap();
		assert_eq!(reply.text, "4");
		assert_eq!(reply.usage, TokenUsage::new(5, 2));
	}

	#[test]
	fn missing_usage_defaults_to_zero() {
		let value = json!({
			"choices": [{ "message": { "content": "hello" } }]
		});
		let reply = normalize_chat(value).unwrap();
		assert_eq!(reply.usage, TokenUsage::default());
	}

	#[test]
	fn empty_choices_is_a_provider_error() {
		let err = normalize_chat(json!({ "choices": [] })).unwrap_err();
		assert!(!err.is_configuration());
	}
}
