use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use crate::fold::FoldedObject;

/// Client → Server: one share batch.
/// Wire: `{ "Services": [ { "type": "slack", "payload": {...} }, ... ] }`
///
/// Keys match in any case. A missing or `null` `Services` list, or a `null`
/// body, is an empty batch.
#[derive(Debug, Default, Serialize)]
pub struct ShareBatch {
    #[serde(rename = "Services")]
    pub services: Vec<ShareRequest>,
}

impl ShareBatch {
    pub fn new(services: Vec<ShareRequest>) -> Self {
        Self { services }
    }

    /// Decode the first JSON value in `body`; anything after it is ignored.
    pub fn from_slice(body: &[u8]) -> serde_json::Result<Self> {
        let mut de = serde_json::Deserializer::from_slice(body);
        let Some(top) = Option::<FoldedObject>::deserialize(&mut de)? else {
            return Ok(Self::default());
        };

        let entries: Vec<Option<FoldedObject>> = match top.get("services") {
            Some(raw) => serde_json::from_str::<Option<Vec<_>>>(raw.get())?.unwrap_or_default(),
            None => Vec::new(),
        };

        let services = entries
            .into_iter()
            .map(|entry| ShareRequest::from_folded(entry.unwrap_or_default()))
            .collect::<serde_json::Result<_>>()?;
        Ok(Self { services })
    }

    /// Entries in processing order.
    pub fn into_requests(self) -> Vec<ShareRequest> {
        self.services
    }
}

/// A single entry of a batch.
///
/// `payload` stays undecoded until the type tag has been resolved, since its
/// shape depends on the service. `None` means the key was absent; a JSON
/// `null` is kept as a raw `null`.
#[derive(Debug, Serialize)]
pub struct ShareRequest {
    #[serde(rename = "type")]
    pub service_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Box<RawValue>>,
}

impl ShareRequest {
    pub fn new(service_type: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            service_type: service_type.into(),
            payload: serde_json::value::to_raw_value(&payload).ok(),
        }
    }

    fn from_folded(mut entry: FoldedObject) -> serde_json::Result<Self> {
        // a null type reads as "", which no service matches
        let service_type = match entry.get("type") {
            Some(raw) => serde_json::from_str::<Option<String>>(raw.get())?.unwrap_or_default(),
            None => String::new(),
        };
        Ok(Self {
            service_type,
            payload: entry.remove("payload"),
        })
    }

    /// Raw payload text, if the entry carried one.
    pub fn payload_json(&self) -> Option<&str> {
        self.payload.as_deref().map(RawValue::get)
    }
}
