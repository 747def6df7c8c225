pub mod dispatch;
pub mod error;
pub mod facebook;
pub mod service;
pub mod slack;
pub mod twitter;

pub use dispatch::{DispatchReport, Dispatcher};
pub use error::ShareError;
pub use facebook::Facebook;
pub use service::{ServiceKind, ShareOutcome, ShareReceipt};
pub use slack::{Slack, SlackWebhook};
pub use twitter::Twitter;
