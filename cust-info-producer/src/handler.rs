use aws_lambda_events::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use lambda_runtime::{Error, LambdaEvent};
use tracing::{debug, error, info, instrument};

use crate::batch::{BatchAssembler, BatchResult};
use crate::clock::LambdaClock;
use crate::config::ProducerConfig;
use crate::error::GenerateError;
use crate::random::{RandomSource, RngSource};
use crate::response;

/// Lambda handler function
#[instrument(skip_all, fields(request_id = %event.context.request_id))]
pub async fn function_handler(
    config: &ProducerConfig,
    event: LambdaEvent<ApiGatewayProxyRequest>,
) -> Result<ApiGatewayProxyResponse, Error> {
    handle(config, event, RngSource::from_os).await
}

/// Runs one invocation with the random source produced by `make_random`.
/// A source that cannot be created yields a failed batch with no messages.
pub(crate) async fn handle<R, F>(
    config: &ProducerConfig,
    event: LambdaEvent<ApiGatewayProxyRequest>,
    make_random: F,
) -> Result<ApiGatewayProxyResponse, Error>
where
    R: RandomSource,
    F: FnOnce() -> Result<R, GenerateError>,
{
    match serde_json::to_string(&event.payload) {
        Ok(payload) => debug!(event = %payload, "Received event"),
        Err(e) => debug!("Received event that could not be serialized: {}", e),
    }

    let clock = LambdaClock::new(event.context.deadline);

    // Fresh generator per invocation
    let result = match make_random() {
        Ok(mut random) => BatchAssembler::new(config).assemble(&clock, &mut random),
        Err(e) => {
            error!("Failed to seed random source: {}", e);
            BatchResult::failed(Vec::new(), 0, &e)
        }
    };

    let response = response::build(&result)
        .map_err(|e| Error::from(format!("Failed to build response: {}", e)))?;

    info!(
        status = result.succeeded(),
        tot_msgs = result.total_messages(),
        bad_msgs = result.bad_messages(),
        "Produced customer info messages"
    );
    Ok(response)
}
