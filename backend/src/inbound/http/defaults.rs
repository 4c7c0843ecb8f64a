//! App-wide fallbacks: JSON extractor configuration and the unknown-route
//! handler. Both answer with the standard error payload.

use actix_web::{HttpResponse, web};
use serde_json::json;
use tracing::debug;

use crate::domain::Error;
use crate::inbound::http::ApiResult;

/// Detail code reported for undecodable JSON bodies.
pub const MALFORMED_JSON: &str = "malformed_json";

/// JSON extractor configuration mapping decode failures to `400`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        debug!(error = %err, "rejected request body");
        Error::invalid_request(format!("malformed JSON body: {err}"))
            .with_details(json!({ "code": MALFORMED_JSON }))
            .into()
    })
}

/// Default service for unmatched routes.
pub async fn not_found() -> ApiResult<HttpResponse> {
    Err(Error::not_found("resource not found"))
}
