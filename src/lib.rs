use std::time::{Duration, Instant};

mod anthropic;
pub mod blocking;
pub mod catalog;
pub mod config;
pub mod display;
mod huggingface;
mod openai;

pub use catalog::ModelConfig;

/// Provider calls block until response or timeout, never indefinitely.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

pub(crate) fn http_client(provider: Provider) -> Result<reqwest::Client, Error> {
	reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build().map_err(|e| Error::provider(provider, e))
}

/// Ask with default generation options.
pub async fn oneshot<T: AsRef<str>>(provider: Provider, model_type: ModelType, prompt: T) -> Result<QueryResult, Error> {
	query(provider, model_type, prompt.as_ref(), QueryOptions::default()).await
}

/// Look up the (provider, model type) entry, check credentials, then make the single provider call.
/// Wall-clock time is measured around the network call only.
pub async fn query(provider: Provider, model_type: ModelType, prompt: &str, options: QueryOptions) -> Result<QueryResult, Error> {
	let model_config = catalog::lookup(provider, model_type)?;
	let api = config::get();
	let api_key = api.key_for(provider)?;

	tracing::info!("querying {} ({}) with {} model", model_config.model_identifier, provider, model_type);
	let started = Instant::now();
	let reply = match provider {
		Provider::OpenAi => openai::ask_openai(model_config, api_key, prompt, &options).await?,
		Provider::Anthropic => anthropic::ask_anthropic(model_config, api_key, prompt, &options).await?,
		Provider::HuggingFace => huggingface::ask_huggingface(model_config, api_key, prompt, &options).await?,
	};
	let elapsed = started.elapsed();

	Ok(QueryResult {
		text: reply.text,
		usage: reply.usage,
		elapsed,
		config: model_config,
	})
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, derive_more::Display)]
pub enum Provider {
	#[display("openai")]
	OpenAi,
	#[display("anthropic")]
	Anthropic,
	#[display("huggingface")]
	HuggingFace,
}
impl Provider {
	/// Human-facing vendor name, as opposed to the CLI spelling.
	pub fn label(&self) -> &'static str {
		match self {
			Self::OpenAi => "OpenAI",
			Self::Anthropic => "Anthropic",
			Self::HuggingFace => "Hugging Face",
		}
	}
}
impl std::str::FromStr for Provider {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Error> {
		Ok(match s.to_lowercase().as_str() {
			"openai" => Self::OpenAi,
			"anthropic" => Self::Anthropic,
			"huggingface" | "hugging-face" | "hugging_face" => Self::HuggingFace,
			_ => return Err(Error::Configuration(format!("unknown provider: {s}"))),
		})
	}
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, derive_more::Display)]
pub enum ModelType {
	#[display("base")]
	Base,
	#[display("instruct")]
	Instruct,
	#[display("fine_tuned")]
	FineTuned,
}
impl ModelType {
	pub fn label(&self) -> &'static str {
		match self {
			Self::Base => "Base",
			Self::Instruct => "Instruct",
			Self::FineTuned => "Fine Tuned",
		}
	}
}
impl std::str::FromStr for ModelType {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Error> {
		Ok(match s.to_lowercase().as_str() {
			"base" => Self::Base,
			"instruct" => Self::Instruct,
			"fine_tuned" | "fine-tuned" | "finetuned" => Self::FineTuned,
			_ => return Err(Error::Configuration(format!("unknown model type: {s}"))),
		})
	}
}

#[derive(Clone, Copy, Debug)]
pub struct QueryOptions {
	pub temperature: f32,
	pub max_tokens: usize,
}
impl Default for QueryOptions {
	fn default() -> Self {
		let config = config::get();
		Self {
			temperature: config.default_temperature,
			max_tokens: config.default_max_tokens,
		}
	}
}

/// Input/output token counts as reported by the provider. Zero when the provider reports nothing.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, derive_new::new)]
pub struct TokenUsage {
	pub input: u32,
	pub output: u32,
}
impl TokenUsage {
	pub fn total(&self) -> u32 {
		self.input + self.output
	}
}

/// What every provider response gets normalized into before metrics are attached.
#[derive(Debug, derive_new::new)]
pub(crate) struct ProviderReply {
	pub text: String,
	pub usage: TokenUsage,
}

#[derive(Debug)]
pub struct QueryResult {
	pub text: String,
	pub usage: TokenUsage,
	pub elapsed: Duration,
	pub config: &'static ModelConfig,
}

#[derive(Debug, derive_more::Display)]
pub enum Error {
	#[display("configuration error: {_0}")]
	Configuration(String),
	#[display("{} provider error: {message}", provider.label())]
	Provider { provider: Provider, message: String },
}
impl std::error::Error for Error {}
impl Error {
	pub(crate) fn provider(provider: Provider, message: impl std::fmt::Display) -> Self {
		Self::Provider {
			provider,
			message: message.to_string(),
		}
	}

	pub fn is_configuration(&self) -> bool {
		matches!(self, Self::Configuration(_))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parse_provider() {
		assert_eq!("openai".parse::<Provider>().unwrap(), Provider::OpenAi);
		assert_eq!("Anthropic".parse::<Provider>().unwrap(), Provider::Anthropic);
		assert_eq!("hugging-face".parse::<Provider>().unwrap(), Provider::HuggingFace);
		assert!("cohere".parse::<Provider>().unwrap_err().is_configuration());
	}

	#[test]
	fn parse_model_type() {
		assert_eq!("base".parse::<ModelType>().unwrap(), ModelType::Base);
		assert_eq!("fine_tuned".parse::<ModelType>().unwrap(), ModelType::FineTuned);
		assert_eq!("fine-tuned".parse::<ModelType>().unwrap(), ModelType::FineTuned);
		assert!("nonexistent".parse::<ModelType>().unwrap_err().is_configuration());
	}

	#[test]
	fn http_client_is_built_with_a_timeout() {
		assert_eq!(REQUEST_TIMEOUT, Duration::from_secs(60));
		for provider in [Provider::OpenAi, Provider::Anthropic, Provider::HuggingFace] {
			http_client(provider).unwrap();
		}
	}

	#[tokio::test]
	async fn unsupported_pair_fails_before_any_network_call() {
		let options = QueryOptions { temperature: 0.0, max_tokens: 10 };
		let err = query(Provider::Anthropic, ModelType::Base, "2+2=", options).await.unwrap_err();
		assert!(err.is_configuration());
	}

	#[test]
	fn display_round_trips_cli_spelling() {
		for provider in [Provider::OpenAi, Provider::Anthropic, Provider::HuggingFace] {
			assert_eq!(provider.to_string().parse::<Provider>().unwrap(), provider);
		}
		for model_type in [ModelType::Base, ModelType::Instruct, ModelType::FineTuned] {
			assert_eq!(model_type.to_string().parse::<ModelType>().unwrap(), model_type);
		}
	}
}
