use crate::{Error, ModelType, Provider, QueryOptions, QueryResult};

pub fn oneshot<T: AsRef<str>>(provider: Provider, model_type: ModelType, prompt: T) -> Result<QueryResult, Error> {
	let runtime = tokio::runtime::Runtime::new().unwrap();
	runtime.block_on(crate::oneshot(provider, model_type, prompt))
}

pub fn query(provider: Provider, model_type: ModelType, prompt: &str, options: QueryOptions) -> Result<QueryResult, Error> {
	let runtime = tokio::runtime::Runtime::new().unwrap();
	runtime.block_on(crate::query(provider, model_type, prompt, options))
}
