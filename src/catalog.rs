use crate::{Error, ModelType, Provider};

/// Static metadata for one (provider, model type) entry. Compiled in, never mutated.
#[derive(Debug)]
pub struct ModelConfig {
	pub provider: Provider,
	pub model_type: ModelType,
	pub model_identifier: &'static str,
	pub context_window: u32,
	pub description: &'static str,
	pub strengths: &'static [&'static str],
	pub recommended_use: &'static [&'static str],
}

pub static MODELS: &[ModelConfig] = &[
	ModelConfig {
		provider: Provider::OpenAi,
		model_type: ModelType::Base,
		model_identifier: "gpt-3.5-turbo-instruct",
		context_window: 4096,
		description: "Base completion model without instruction tuning",
		strengths: &["Pre-trained on diverse text data", "Free-form continuation of arbitrary prompts"],
		recommended_use: &["Text completion", "Creative writing", "Code generation with examples"],
	},
	ModelConfig {
		provider: Provider::HuggingFace,
		model_type: ModelType::Base,
		model_identifier: "distilgpt2",
		context_window: 1024,
		description: "Smaller, faster version of GPT-2",
		strengths: &["Distilled from GPT-2", "Cheap and quick to run"],
		recommended_use: &["Text generation", "Completion", "Creative writing"],
	},
	ModelConfig {
		provider: Provider::OpenAi,
		model_type: ModelType::Instruct,
		model_identifier: "gpt-3.5-turbo",
		context_window: 16385,
		description: "Instruction-tuned chat model",
		strengths: &["RLHF fine-tuning", "Follows instructions reliably"],
		recommended_use: &["Chat", "Q&A", "Instruction following", "General assistance"],
	},
	ModelConfig {
		provider: Provider::Anthropic,
		model_type: ModelType::Instruct,
		model_identifier: "claude-3-haiku-20240307",
		context_window: 200_000,
		description: "Constitutional AI instruction-tuned model",
		strengths: &["Constitutional AI on top of RLHF", "Helpful, harmless and honest responses"],
		recommended_use: &["Complex reasoning", "Analysis", "Safe AI assistance"],
	},
	ModelConfig {
		provider: Provider::HuggingFace,
		model_type: ModelType::Instruct,
		model_identifier: "microsoft/DialoGPT-small",
		context_window: 1024,
		description: "Small conversational model",
		strengths: &["Fine-tuned for dialogue", "Conversational responses"],
		recommended_use: &["Chat", "Conversation", "Dialogue systems"],
	},
	ModelConfig {
		provider: Provider::OpenAi,
		model_type: ModelType::FineTuned,
		model_identifier: "ft:gpt-3.5-turbo",
		context_window: 16385,
		description: "Custom fine-tuned model (example)",
		strengths: &["Task-specific fine-tuning on a custom dataset", "Optimized for its target domain"],
		recommended_use: &["Specialized tasks", "Domain-specific applications"],
	},
	ModelConfig {
		provider: Provider::HuggingFace,
		model_type: ModelType::FineTuned,
		model_identifier: "microsoft/DialoGPT-medium",
		context_window: 1024,
		description: "Fine-tuned for conversational responses",
		strengths: &["Fine-tuned on Reddit conversations", "Conversational but not instruction-specific"],
		recommended_use: &["Dialogue systems", "Chatbots", "Conversational AI"],
	},
];

/// Not every provider covers every model type (no Anthropic base or fine-tuned entry).
pub fn lookup(provider: Provider, model_type: ModelType) -> Result<&'static ModelConfig, Error> {
	MODELS
		.iter()
		.find(|m| m.provider == provider && m.model_type == model_type)
		.ok_or_else(|| Error::Configuration(format!("no {model_type} model configured for provider {provider}")))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn supported_pairs_have_model_identifiers() {
		let supported = [
			(Provider::OpenAi, ModelType::Base),
			(Provider::OpenAi, ModelType::Instruct),
			(Provider::OpenAi, ModelType::FineTuned),
			(Provider::Anthropic, ModelType::Instruct),
			(Provider::HuggingFace, ModelType::Base),
			(Provider::HuggingFace, ModelType::Instruct),
			(Provider::HuggingFace, ModelType::FineTuned),
		];
		for (provider, model_type) in supported {
			let config = lookup(provider, model_type).unwrap();
			assert!(!config.model_identifier.is_empty());
			assert_eq!(config.provider, provider);
			assert_eq!(config.model_type, model_type);
			assert!(config.context_window > 0);
		}
	}

	#[test]
	fn unsupported_pairs_are_configuration_errors() {
		for model_type in [ModelType::Base, ModelType::FineTuned] {
			let err = lookup(Provider::Anthropic, model_type).unwrap_err();
			assert!(err.is_configuration(), "expected configuration error, got: {err}");
		}
	}

	#[test]
	fn no_duplicate_entries() {
		for (i, a) in MODELS.iter().enumerate() {
			for b in &MODELS[i + 1..] {
				assert!(!(a.provider == b.provider && a.model_type == b.model_type));
			}
		}
	}
}
