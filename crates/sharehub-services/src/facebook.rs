use serde::{Deserialize, Serialize};

/// Facebook payload. Both fields may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facebook {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl Facebook {
    /// The line this post contributes to the response: `"{title} is {description}"`.
    pub fn render(&self) -> String {
        format!("{} is {}", self.title, self.description)
    }
}
