//! AWS Lambda handler for DRIP projections
//!
//! Accepts a JSON body of (partial) projection inputs and returns the full
//! projection with its analysis. A body of the form `{"budget": {...}}`
//! returns a budget summary instead.
//!
//! Supports Lambda Function URLs / API Gateway HTTP APIs.

use aws_lambda_events::apigw::{ApiGatewayV2httpRequest, ApiGatewayV2httpResponse};
use aws_lambda_events::encodings::Body;
use drip_projection::budget::BudgetInputs;
use drip_projection::inputs::parse_inputs;
use drip_projection::projection::project;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Status code and JSON body for a request
fn respond(method: &str, body: Option<&str>) -> (u16, Option<String>) {
    if method == "OPTIONS" {
        return (200, None);
    }

    match route(body.unwrap_or("")) {
        Ok(json) => (200, Some(json)),
        Err(message) => {
            log::warn!("rejected request: {}", message);
            let body = serde_json::to_string(&ErrorBody { error: message })
                .unwrap_or_else(|_| r#"{"error":"invalid request"}"#.to_string());
            (400, Some(body))
        }
    }
}

fn route(body: &str) -> Result<String, String> {
    let value: serde_json::Value = if body.trim().is_empty() {
        serde_json::Value::Object(Default::default())
    } else {
        serde_json::from_str(body).map_err(|e| format!("invalid JSON: {}", e))?
    };

    if let Some(budget) = value.get("budget") {
        let budget: BudgetInputs =
            serde_json::from_value(budget.clone()).map_err(|e| format!("invalid budget: {}", e))?;
        budget.validate().map_err(|e| e.to_string())?;
        return serde_json::to_string(&budget.summarize()).map_err(|e| e.to_string());
    }

    let inputs = parse_inputs(&value.to_string()).map_err(|e| e.to_string())?;
    let result = project(&inputs);
    log::info!(
        "projected {} years, ending balance {:.0}",
        inputs.years_to_project,
        result.analysis.ending_balance
    );
    serde_json::to_string(&result).map_err(|e| e.to_string())
}

async fn handler(event: LambdaEvent<ApiGatewayV2httpRequest>) -> Result<ApiGatewayV2httpResponse, Error> {
    let request = event.payload;
    let method = request.request_context.http.method.as_str().to_string();

    let (status, body) = respond(&method, request.body.as_deref());

    let mut response = ApiGatewayV2httpResponse {
        status_code: status as i64,
        body: body.map(Body::Text),
        ..Default::default()
    };
    response.headers.insert("content-type", "application/json".parse()?);
    response.headers.insert("access-control-allow-origin", "*".parse()?);
    response.headers.insert("access-control-allow-methods", "POST, OPTIONS".parse()?);
    response.headers.insert("access-control-allow-headers", "Content-Type".parse()?);
    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
