use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Message returned when a batch completes without a single successful share.
pub const NOTHING_TO_DO: &str = "Looks like there is nothing for me to do here";

/// Per-service count of successful shares.
/// Wire: `{ "facebook": 1, "slack": 2 }`; a missing key means zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tally(BTreeMap<String, u32>);

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, service: &str) {
        *self.0.entry(service.to_string()).or_insert(0) += 1;
    }

    pub fn get(&self, service: &str) -> u32 {
        self.0.get(service).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum over every service.
    pub fn total(&self) -> u32 {
        self.0.values().sum()
    }
}

/// Server → Client: informational or error message.
/// Wire: `{ "message": "..." }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn nothing_to_do() -> Self {
        Self::new(NOTHING_TO_DO)
    }
}
