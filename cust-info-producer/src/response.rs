use anyhow::{Context, Result};
use aws_lambda_events::apigw::ApiGatewayProxyResponse;
use aws_lambda_events::encodings::Body;
use http::header::{HeaderValue, CONTENT_TYPE};
use http::HeaderMap;
use serde::Serialize;

use crate::batch::{BatchItem, BatchResult};

/// Transport status for every response, including failed batches. Callers
/// must read `message.status` to detect failure.
pub const STATUS_OK: i64 = 200;

#[derive(Debug, Serialize)]
struct ResponseBody<'a> {
    message: MessageSummary<'a>,
}

#[derive(Debug, Serialize)]
struct MessageSummary<'a> {
    status: bool,
    tot_msgs: usize,
    bad_msgs: usize,
    msgs: &'a [BatchItem],
    #[serde(skip_serializing_if = "Option::is_none")]
    error_message: Option<&'a str>,
}

/// Encode the JSON body for a finished batch.
pub fn body_json(result: &BatchResult) -> Result<String> {
    let body = ResponseBody {
        message: MessageSummary {
            status: result.succeeded(),
            tot_msgs: result.total_messages(),
            bad_msgs: result.bad_messages(),
            msgs: result.items(),
            error_message: result.error_message(),
        },
    };
    serde_json::to_string(&body).context("Failed to serialize response body")
}

/// Wrap a finished batch in an API Gateway proxy response.
pub fn build(result: &BatchResult) -> Result<ApiGatewayProxyResponse> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    Ok(ApiGatewayProxyResponse {
        status_code: STATUS_OK,
        headers,
        body: Some(Body::Text(body_json(result)?)),
        ..Default::default()
    })
}
