use cust_info_producer::config::ProducerConfig;
use cust_info_producer::handler;
use lambda_runtime::{run, service_fn, Error};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Read once per container; every invocation borrows it.
    let config = ProducerConfig::from_env()?;

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(config.log_level).into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = &config;
    run(service_fn(move |event| handler::function_handler(config, event))).await
}
