use clap::Parser;
use llm_probe::{ModelType, Provider, QueryOptions, config, display};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
	/// The prompt to send to the selected model
	#[clap(short, long)]
	query: String,
	#[clap(short, long, default_value = "instruct")]
	model_type: ModelType,
	#[clap(short, long, default_value = "openai")]
	provider: Provider,
	/// Sampling temperature (defaults to DEFAULT_TEMPERATURE or 0.7)
	#[clap(long)]
	temperature: Option<f32>,
	/// Response token cap (defaults to DEFAULT_MAX_TOKENS or 1000)
	#[clap(long)]
	max_tokens: Option<usize>,
}

#[tokio::main]
async fn main() {
	v_utils::clientside!();
	let cli = Cli::parse();

	let _ = config::init(config::ApiConfig::from_env());

	let mut options = QueryOptions::default();
	if let Some(temperature) = cli.temperature {
		options.temperature = temperature;
	}
	if let Some(max_tokens) = cli.max_tokens {
		options.max_tokens = max_tokens;
	}

	match llm_probe::query(cli.provider, cli.model_type, &cli.query, options).await {
		Ok(result) => display::print_summary(&cli.query, &result),
		Err(e) => {
			eprintln!("{e}");
			std::process::exit(1);
		}
	}
}
