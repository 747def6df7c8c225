//! Share endpoint, POST /.
//!
//! Hands the raw body to the dispatcher and turns its report or error into
//! the HTTP response. Handlers never write to the response themselves.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use sharehub_protocol::MessageBody;
use sharehub_services::{DispatchReport, ServiceKind, ShareError};
use std::sync::Arc;
use tracing::{info, warn};

use crate::app::AppState;

/// POST /
///
/// 200 with the tally (or the "nothing to do" message) when the whole batch
/// succeeds; otherwise the first error's message with its status.
pub async fn share_handler(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    match state.dispatcher.dispatch(&body).await {
        Ok(report) => {
            info!(shared = report.tally.total(), "share batch complete");
            report_response(report)
        }
        Err(e) => {
            warn!(
                code = e.code(),
                error = %e,
                reason = e.reason().unwrap_or_default(),
                "share batch aborted"
            );
            error_response(&e)
        }
    }
}

/// Status for each failure class. Slack payload errors answer 404 while the
/// other services answer 400; existing callers depend on this split.
pub fn status_for(err: &ShareError) -> StatusCode {
    match err {
        ShareError::MalformedBatch { .. } => StatusCode::NOT_FOUND,
        ShareError::InvalidPayload {
            service: ServiceKind::Slack,
            ..
        } => StatusCode::NOT_FOUND,
        ShareError::InvalidPayload { .. } => StatusCode::BAD_REQUEST,
        ShareError::MissingArgument { .. } => StatusCode::BAD_REQUEST,
        ShareError::SlackUnreachable { .. } => StatusCode::BAD_REQUEST,
    }
}

fn error_response(err: &ShareError) -> Response {
    (status_for(err), Json(MessageBody::new(err.to_string()))).into_response()
}

/// Facebook lines come first, one per line, followed by the JSON tally.
/// With no lines the body is plain JSON.
fn report_response(report: DispatchReport) -> Response {
    if report.tally.is_empty() {
        return (StatusCode::OK, Json(MessageBody::nothing_to_do())).into_response();
    }
    if report.lines.is_empty() {
        return (StatusCode::OK, Json(report.tally)).into_response();
    }

    let mut body = String::new();
    for line in &report.lines {
        body.push_str(line);
        body.push('\n');
    }
    body.push_str(&serde_json::to_string(&report.tally).unwrap_or_default());

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        body,
    )
        .into_response()
}
