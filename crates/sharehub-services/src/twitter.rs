use serde::{Deserialize, Serialize};

/// Twitter payload. Sharing is a no-op; the tweet text is accepted but unused.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Twitter {
    #[serde(default)]
    pub tweet: String,
}

impl Twitter {
    pub fn share(&self) {}
}
