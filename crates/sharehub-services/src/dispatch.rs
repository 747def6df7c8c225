use sharehub_protocol::{ShareBatch, Tally};
use tracing::debug;

use crate::{
    error::ShareError,
    service::{ServiceKind, ShareOutcome, ShareReceipt},
    slack::SlackWebhook,
};

/// Result of a batch that ran to completion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub tally: Tally,
    /// Text lines produced by the shares, in batch order.
    pub lines: Vec<String>,
}

impl DispatchReport {
    fn record(&mut self, kind: ServiceKind, receipt: ShareReceipt) {
        self.tally.increment(kind.as_str());
        if let Some(line) = receipt.line {
            self.lines.push(line);
        }
    }
}

/// Routes every entry of a share batch to its service.
///
/// Entries run one after another in batch order. The first decode or share
/// error aborts the batch and nothing collected so far is returned. Entries
/// with an unrecognized type are skipped.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    slack: SlackWebhook,
}

impl Dispatcher {
    pub fn new(slack: SlackWebhook) -> Self {
        Self { slack }
    }

    pub fn slack(&self) -> &SlackWebhook {
        &self.slack
    }

    pub async fn dispatch(&self, body: &[u8]) -> Result<DispatchReport, ShareError> {
        let requests = ShareBatch::from_slice(body)
            .map_err(|e| ShareError::MalformedBatch {
                reason: e.to_string(),
            })?
            .into_requests();

        debug!(entries = requests.len(), "dispatching share batch");

        let mut report = DispatchReport::default();
        for (index, request) in requests.iter().enumerate() {
            let Some(kind) = ServiceKind::parse(&request.service_type) else {
                debug!(index, service_type = %request.service_type, "skipping unknown service type");
                continue;
            };

            let outcome = ShareOutcome::decode(kind, request.payload.as_deref())?;
            let receipt = outcome.share(&self.slack).await?;
            debug!(index, service = kind.as_str(), "share succeeded");
            report.record(kind, receipt);
        }

        Ok(report)
    }
}
