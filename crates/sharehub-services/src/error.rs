use thiserror::Error;

use crate::service::ServiceKind;

/// Errors that abort a share batch.
///
/// The `Display` text is what callers see in the response body; the
/// `reason` fields carry the underlying cause for logs only.
#[derive(Debug, Error)]
pub enum ShareError {
    /// The request body is not a decodable batch.
    #[error("Something's up with that payload")]
    MalformedBatch { reason: String },

    /// An entry's payload does not match its service's shape.
    #[error("No marshals for {service} today.")]
    InvalidPayload {
        service: ServiceKind,
        reason: String,
    },

    /// A required payload field is empty.
    #[error("Missing argument: {field}")]
    MissingArgument { field: &'static str },

    /// The Slack webhook could not be reached or rejected the post.
    #[error("Could not connect to Slack")]
    SlackUnreachable { reason: String },
}

impl ShareError {
    /// Short error code string used in logs.
    pub fn code(&self) -> &'static str {
        match self {
            ShareError::MalformedBatch { .. } => "MALFORMED_BATCH",
            ShareError::InvalidPayload { .. } => "INVALID_PAYLOAD",
            ShareError::MissingArgument { .. } => "MISSING_ARGUMENT",
            ShareError::SlackUnreachable { .. } => "SLACK_UNREACHABLE",
        }
    }

    /// Underlying cause, if any.
    pub fn reason(&self) -> Option<&str> {
        match self {
            ShareError::MalformedBatch { reason }
            | ShareError::InvalidPayload { reason, .. }
            | ShareError::SlackUnreachable { reason } => Some(reason.as_str()),
            ShareError::MissingArgument { .. } => None,
        }
    }
}
