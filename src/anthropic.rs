use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{Error, ModelConfig, Provider, ProviderReply, QueryOptions, TokenUsage};

const PROVIDER: Provider = Provider::Anthropic;

///docs: https://docs.claude.com/claude/reference/messages_post
pub async fn ask_anthropic(config: &ModelConfig, api_key: &str, prompt: &str, options: &QueryOptions) -> Result<ProviderReply, Error> {
	// Header {{{
	let mut headers = HeaderMap::new();
	headers.insert("x-api-key", HeaderValue::from_str(api_key.trim()).map_err(|e| Error::provider(PROVIDER, e))?);
	headers.insert("anthropic-version", HeaderValue::from_static("2023-06-01")); // API standard edition, does not influence model versions
	headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
	//,}}}

	let payload = json!({
		"model": config.model_identifier,
		"temperature": options.temperature,
		"max_tokens": options.max_tokens,
		"messages": [{ "role": "user", "content": prompt }]
	});
	tracing::debug!(?payload);

	let response = crate::http_client(PROVIDER)?
		.post("https://api.anthropic.com/v1/messages")
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
	normalize(value)
}

#[derive(Debug, Deserialize)]
struct AnthropicContent {
	#[serde(rename = "type")]
	content_type: String,
	#[serde(default)]
	text: String,
}
#[derive(Debug, Default, Deserialize)]
struct AnthropicUsage {
	#[serde(default)]
	input_tokens: u32,
	#[serde(default)]
	output_tokens: u32,
}
#[derive(Debug, Deserialize)]
struct AnthropicResponse {
	content: Vec<AnthropicContent>,
	#[serde(default)]
	stop_reason: Option<String>,
	#[serde(default)]
	usage: AnthropicUsage,
}

fn normalize(value: Value) -> Result<ProviderReply, Error> {
	let response = serde_json::from_value::<AnthropicResponse>(value).map_err(|e| Error::provider(PROVIDER, format!("failed to parse response: {e}")))?;

	if response.stop_reason.as_deref() == Some("refusal") {
		return Err(Error::provider(PROVIDER, "model refused to process the request"));
	}

	let text = response
		.content
		.iter()
		.filter(|c| c.content_type == "text")
		.map(|c| c.text.as_str())
		.collect::<Vec<_>>()
		.join("\n");
	let usage = TokenUsage::new(response.usage.input_tokens, response.usage.output_tokens);
	Ok(ProviderReply::new(text, usage))
}
