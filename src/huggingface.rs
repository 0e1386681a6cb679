use reqwest::{
	StatusCode,
	header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue},
};
use serde_json::{Value, json};

use crate::{Error, ModelConfig, Provider, ProviderReply, QueryOptions, TokenUsage};

const PROVIDER: Provider = Provider::HuggingFace;
const BASE_URL: &str = "https://api-inference.huggingface.co/models";

// Hosted inference caps generation length well below what the other providers accept.
const MAX_GENERATED_TOKENS: usize = 100;

pub async fn ask_huggingface(config: &ModelConfig, api_key: &str, prompt: &str, options: &QueryOptions) -> Result<ProviderReply, Error> {
	// Header {{{
	let mut headers = HeaderMap::new();
	let auth = format!("Bearer {}", api_key.trim());
	headers.insert(AUTHORIZATION, HeaderValue::from_str(&auth).map_err(|e| Error::provider(PROVIDER, e))?);
	headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
	//,}}}

	let payload = build_payload(config, prompt, options);
	tracing::debug!(?payload);

	let url = format!("{BASE_URL}/{}", config.model_identifier);
	let response = crate::http_client(PROVIDER)?
		.post(&url)
		.headers(headers)
		.json(&payload)
		.send()
		.await
		.map_err(|e| Error::provider(PROVIDER, e))?;
	match response.status() {
		StatusCode::SERVICE_UNAVAILABLE => return Err(Error::provider(PROVIDER, "model is loading, wait a moment and try again")),
		status if !status.is_success() => {
			let body = response.text().await.unwrap_or_else(|_| "<body unavailable>".to_string());
			return Err(Error::provider(PROVIDER, format!("{status}: {body}")));
		}
		_ => {}
	}
	let value = response.json::<Value>().await.map_err(|e| Error::provider(PROVIDER, e))?;
	tracing::debug!(?value);
	Ok(normalize(&value, prompt))
}

/// DialoGPT models take the conversational payload shape, the rest the plain text-generation one.
fn build_payload(config: &ModelConfig, prompt: &str, options: &QueryOptions) -> Value {
	match config.model_identifier.contains("DialoGPT") {
		true => json!({
			"inputs": { "text": prompt },
			"parameters": {
				"max_length": options.max_tokens.min(MAX_GENERATED_TOKENS),
				"temperature": options.temperature,
				"do_sample": true,
			}
		}),
		false => json!({
			"inputs": prompt,
			"parameters": {
				"max_new_tokens": options.max_tokens.min(MAX_GENERATED_TOKENS),
				"temperature": options.temperature,
				"return_full_text": false,
			}
		}),
	}
}

/// The inference API answers in several shapes: a list of generations, a bare object, or a plain
/// value. Extract text from whichever arrived and strip an echoed prompt prefix. The API reports
/// no token usage, so counts stay at zero.
fn normalize(value: &Value, prompt: &str) -> ProviderReply {
	let raw = match value {
		Value::Array(items) => items
			.first()
			.map(|item| generated_text(item).unwrap_or_else(|| item.to_string()))
			.unwrap_or_default(),
		Value::Object(_) => generated_text(value).unwrap_or_else(|| value.to_string()),
		other => other.to_string(),
	};
	let text = raw.strip_prefix(prompt).unwrap_or(&raw).trim().to_string();
	ProviderReply::new(text, TokenUsage::default())
}

fn generated_text(item: &Value) -> Option<String> {
	item.get("generated_text")
		.or_else(|| item.get("text"))
		.and_then(Value::as_str)
		.map(str::to_string)
}
