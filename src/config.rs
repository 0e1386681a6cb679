use std::sync::OnceLock;

use crate::{Error, Provider};

/// API keys plus generation defaults, all sourced from the environment.
#[derive(Clone, Debug)]
pub struct ApiConfig {
	pub openai_key: Option<String>,
	pub anthropic_key: Option<String>,
	pub huggingface_key: Option<String>,
	pub default_max_tokens: usize,
	pub default_temperature: f32,
}
impl Default for ApiConfig {
	fn default() -> Self {
		Self {
			openai_key: None,
			anthropic_key: None,
			huggingface_key: None,
			default_max_tokens: 1000,
			default_temperature: 0.7,
		}
	}
}
impl ApiConfig {
	pub fn from_env() -> Self {
		let defaults = Self::default();
		Self {
			openai_key: env_key("OPENAI_API_KEY"),
			anthropic_key: env_key("ANTHROPIC_API_KEY"),
			huggingface_key: env_key("HUGGINGFACE_API_KEY"),
			default_max_tokens: env_parse("DEFAULT_MAX_TOKENS", defaults.default_max_tokens),
			default_temperature: env_parse("DEFAULT_TEMPERATURE", defaults.default_temperature),
		}
	}

	/// The key for the selected provider must exist before any network call happens.
	pub fn key_for(&self, provider: Provider) -> Result<&str, Error> {
		let (key, var) = match provider {
			Provider::OpenAi => (&self.openai_key, "OPENAI_API_KEY"),
			Provider::Anthropic => (&self.anthropic_key, "ANTHROPIC_API_KEY"),
			Provider::HuggingFace => (&self.huggingface_key, "HUGGINGFACE_API_KEY"),
		};
		key.as_deref()
			.ok_or_else(|| Error::Configuration(format!("{} API key not found, set {var} in the environment", provider.label())))
	}
}

fn env_key(var: &str) -> Option<String> {
	std::env::var(var).ok().filter(|k| !k.trim().is_empty())
}

fn env_parse<T: std::str::FromStr>(var: &str, fallback: T) -> T {
	std::env::var(var).ok().and_then(|v| v.parse().ok()).unwrap_or(fallback)
}

static CONFIG: OnceLock<ApiConfig> = OnceLock::new();

/// Initialize config once at startup. If not called, `get` falls back to reading the environment.
pub fn init(config: ApiConfig) -> eyre::Result<()> {
	CONFIG.set(config).map_err(|_| eyre::eyre!("Config already initialized"))?;
	Ok(())
}

/// Get the initialized config, or load from the environment if not initialized.
pub fn get() -> ApiConfig {
	CONFIG.get_or_init(ApiConfig::from_env).clone()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn missing_key_is_a_configuration_error() {
		let config = ApiConfig::default();
		for provider in [Provider::OpenAi, Provider::Anthropic, Provider::HuggingFace] {
			let err = config.key_for(provider).unwrap_err();
			assert!(err.is_configuration());
			assert!(err.to_string().contains("API key"));
		}
	}

	#[test]
	fn present_key_is_returned() {
		let config = ApiConfig {
			anthropic_key: Some("sk-test".to_string()),
			..ApiConfig::default()
		};
		assert_eq!(config.key_for(Provider::Anthropic).unwrap(), "sk-test");
		assert!(config.key_for(Provider::OpenAi).is_err());
	}

	#[test]
	fn defaults_match_documented_values() {
		let config = ApiConfig::default();
		assert_eq!(config.default_max_tokens, 1000);
		assert!((config.default_temperature - 0.7).abs() < f32::EPSILON);
	}
}
