use colored::Colorize;
use tabled::{Table, Tabled, settings::Style};

use crate::QueryResult;

#[derive(Tabled)]
struct MetricRow {
	#[tabled(rename = "Metric")]
	metric: &'static str,
	#[tabled(rename = "Value")]
	value: String,
}

#[derive(Tabled)]
struct CharacteristicRow {
	#[tabled(rename = "Characteristic")]
	characteristic: &'static str,
	#[tabled(rename = "Details")]
	details: String,
}

pub fn print_summary(prompt: &str, result: &QueryResult) {
	println!("{}", render_summary(prompt, result));
}

/// Pure formatting, kept separate from printing.
pub fn render_summary(prompt: &str, result: &QueryResult) -> String {
	let separator = "=".repeat(80).cyan();
	let mut out = String::new();

	out.push_str(&format!("{separator}\n"));
	out.push_str(&format!("{} {prompt}\n", "Query:".yellow()));
	out.push_str(&format!("{separator}\n\n"));

	out.push_str(&format!("{}\n{}\n", "Response:".green(), result.text));

	out.push_str(&format!("\n{}\n", "Response Metrics:".magenta()));
	out.push_str(&metrics_table(result));
	out.push('\n');

	out.push_str(&format!("\n{}\n", "Model Characteristics:".blue()));
	out.push_str(&characteristics_table(result));
	out.push('\n');

	out.push_str(&format!("\n{separator}"));
	out
}

fn metrics_table(result: &QueryResult) -> String {
	let rows = vec![
		MetricRow {
			metric: "Input Tokens",
			value: result.usage.input.to_string(),
		},
		MetricRow {
			metric: "Output Tokens",
			value: result.usage.output.to_string(),
		},
		MetricRow {
			metric: "Total Tokens",
			value: result.usage.total().to_string(),
		},
		MetricRow {
			metric: "Response Time",
			value: format!("{:.2}s", result.elapsed.as_secs_f64()),
		},
		MetricRow {
			metric: "Context Window",
			value: format!("{} tokens", result.config.context_window),
		},
	];
	Table::new(rows).with(Style::modern()).to_string()
}

fn characteristics_table(result: &QueryResult) -> String {
	let config = result.config;
	let rows = vec![
		CharacteristicRow {
			characteristic: "Model Name",
			details: config.model_identifier.to_string(),
		},
		CharacteristicRow {
			characteristic: "Provider",
			details: config.provider.label().to_string(),
		},
		CharacteristicRow {
			characteristic: "Type",
			details: config.model_type.label().to_string(),
		},
		CharacteristicRow {
			characteristic: "Description",
			details: config.description.to_string(),
		},
		CharacteristicRow {
			characteristic: "Strengths",
			details: config.strengths.join("; "),
		},
		CharacteristicRow {
			characteristic: "Recommended Use",
			details: config.recommended_use.join("; "),
		},
	];
	Table::new(rows).with(Style::modern()).to_string()
}
