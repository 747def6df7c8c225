use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::value::RawValue;
use sharehub_protocol::fold::{self, FoldedObject};

use crate::{
    error::ShareError,
    facebook::Facebook,
    slack::{Slack, SlackWebhook},
    twitter::Twitter,
};

/// The fixed set of services a batch entry can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceKind {
    Twitter,
    Facebook,
    Slack,
}

impl ServiceKind {
    pub const ALL: [ServiceKind; 3] = [
        ServiceKind::Twitter,
        ServiceKind::Facebook,
        ServiceKind::Slack,
    ];

    /// Resolve a batch entry's type tag, ignoring case.
    /// Returns `None` for anything outside the known set.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.to_lowercase().as_str() {
            "twitter" => Some(ServiceKind::Twitter),
            "facebook" => Some(ServiceKind::Facebook),
            "slack" => Some(ServiceKind::Slack),
            _ => None,
        }
    }

    /// Lower-case key used in the tally.
    pub fn as_str(self) -> &'static str {
        match self {
            ServiceKind::Twitter => "twitter",
            ServiceKind::Facebook => "facebook",
            ServiceKind::Slack => "slack",
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ServiceKind::Twitter => "Twitter",
            ServiceKind::Facebook => "Facebook",
            ServiceKind::Slack => "Slack",
        };
        f.write_str(name)
    }
}

/// A batch entry decoded into its service's payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    Twitter(Twitter),
    Facebook(Facebook),
    Slack(Slack),
}

/// What a successful share produced besides the tally increment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShareReceipt {
    /// Text line to emit ahead of the tally (Facebook only).
    pub line: Option<String>,
}

impl ShareOutcome {
    /// Decode a raw payload into the shape required by `kind`.
    ///
    /// Payload keys match in any case. A `null` payload yields the service's
    /// empty payload; a missing one fails like any other shape mismatch.
    pub fn decode(kind: ServiceKind, payload: Option<&RawValue>) -> Result<Self, ShareError> {
        let raw = payload.ok_or_else(|| ShareError::InvalidPayload {
            service: kind,
            reason: "payload is missing".to_string(),
        })?;

        match kind {
            ServiceKind::Twitter => decode_as(kind, raw).map(ShareOutcome::Twitter),
            ServiceKind::Facebook => decode_as(kind, raw).map(ShareOutcome::Facebook),
            ServiceKind::Slack => decode_as(kind, raw).map(ShareOutcome::Slack),
        }
    }

    /// Perform the share action for this entry.
    pub async fn share(&self, slack: &SlackWebhook) -> Result<ShareReceipt, ShareError> {
        match self {
            ShareOutcome::Twitter(tweet) => {
                tweet.share();
                Ok(ShareReceipt::default())
            }
            ShareOutcome::Facebook(post) => Ok(ShareReceipt {
                line: Some(post.render()),
            }),
            ShareOutcome::Slack(message) => {
                message.share(slack).await?;
                Ok(ShareReceipt::default())
            }
        }
    }
}

fn decode_as<T>(kind: ServiceKind, raw: &RawValue) -> Result<T, ShareError>
where
    T: DeserializeOwned + Default,
{
    if fold::is_null(raw) {
        return Ok(T::default());
    }
    serde_json::from_str::<FoldedObject>(raw.get())
        .and_then(|obj| obj.decode())
        .map_err(|e| ShareError::InvalidPayload {
            service: kind,
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(json: &str) -> Box<RawValue> {
        RawValue::from_string(json.to_string()).unwrap()
    }

    #[test]
    fn parse_ignores_case() {
        for tag in ["slack", "Slack", "SLACK", "sLaCk"] {
            assert_eq!(ServiceKind::parse(tag), Some(ServiceKind::Slack), "tag: {tag}");
        }
        assert_eq!(ServiceKind::parse("FaceBook"), Some(ServiceKind::Facebook));
        assert_eq!(ServiceKind::parse("TWITTER"), Some(ServiceKind::Twitter));
    }

    #[test]
    fn parse_rejects_unknown_tags() {
        for tag in ["", "linkedin", "slack ", " twitter", "face book"] {
            assert_eq!(ServiceKind::parse(tag), None, "tag: {tag:?}");
        }
    }

    #[test]
    fn tally_keys_and_display_names() {
        let keys: Vec<_> = ServiceKind::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(keys, ["twitter", "facebook", "slack"]);
        let names: Vec<_> = ServiceKind::ALL.iter().map(|k| k.to_string()).collect();
        assert_eq!(names, ["Twitter", "Facebook", "Slack"]);
    }

    #[test]
    fn decode_facebook_payload() {
        let payload = raw(r#"{"title":"Acme","description":"great","extra":1}"#);
        let outcome = ShareOutcome::decode(ServiceKind::Facebook, Some(&*payload)).unwrap();
        assert_eq!(
            outcome,
            ShareOutcome::Facebook(Facebook {
                title: "Acme".into(),
                description: "great".into(),
            })
        );
    }

    #[test]
    fn decode_fills_missing_fields_with_empty_strings() {
        let payload = raw("{}");
        let outcome = ShareOutcome::decode(ServiceKind::Slack, Some(&*payload)).unwrap();
        assert_eq!(outcome, ShareOutcome::Slack(Slack::default()));
    }

    #[test]
    fn decode_twitter_reads_tweet_key() {
        let payload = raw(r#"{"Tweet":"hello"}"#);
        let outcome = ShareOutcome::decode(ServiceKind::Twitter, Some(&*payload)).unwrap();
        assert_eq!(outcome, ShareOutcome::Twitter(Twitter { tweet: "hello".into() }));
    }

    #[test]
    fn decode_failure_names_the_service() {
        let payload = raw(r#"{"title":5}"#);
        let err = ShareOutcome::decode(ServiceKind::Facebook, Some(&*payload)).unwrap_err();
        assert_eq!(err.to_string(), "No marshals for Facebook today.");
        assert_eq!(err.code(), "INVALID_PAYLOAD");

        let payload = raw(r#""not an object""#);
        let err = ShareOutcome::decode(ServiceKind::Slack, Some(&*payload)).unwrap_err();
        assert_eq!(err.to_string(), "No marshals for Slack today.");
    }

    #[test]
    fn decode_matches_keys_in_any_case() {
        let payload = raw(r#"{"TITLE":"Acme","Description":"great"}"#);
        let outcome = ShareOutcome::decode(ServiceKind::Facebook, Some(&*payload)).unwrap();
        assert_eq!(
            outcome,
            ShareOutcome::Facebook(Facebook {
                title: "Acme".into(),
                description: "great".into(),
            })
        );

        let payload = raw(r#"{"ICON":":x:","tExT":"hi"}"#);
        let outcome = ShareOutcome::decode(ServiceKind::Slack, Some(&*payload)).unwrap();
        assert_eq!(
            outcome,
            ShareOutcome::Slack(Slack {
                icon: ":x:".into(),
                text: "hi".into(),
            })
        );
    }

    #[test]
    fn decode_null_payload_is_empty() {
        let payload = raw("null");
        for kind in ServiceKind::ALL {
            let outcome = ShareOutcome::decode(kind, Some(&*payload)).unwrap();
            let expected = match kind {
                ServiceKind::Twitter => ShareOutcome::Twitter(Twitter::default()),
                ServiceKind::Facebook => ShareOutcome::Facebook(Facebook::default()),
                ServiceKind::Slack => ShareOutcome::Slack(Slack::default()),
            };
            assert_eq!(outcome, expected);
        }
    }

    #[test]
    fn decode_null_field_is_empty() {
        let payload = raw(r#"{"title":null,"description":"x"}"#);
        let outcome = ShareOutcome::decode(ServiceKind::Facebook, Some(&*payload)).unwrap();
        assert_eq!(
            outcome,
            ShareOutcome::Facebook(Facebook {
                title: String::new(),
                description: "x".into(),
            })
        );
    }

    #[test]
    fn decode_missing_payload_is_invalid() {
        let err = ShareOutcome::decode(ServiceKind::Twitter, None).unwrap_err();
        assert!(matches!(
            err,
            ShareError::InvalidPayload {
                service: ServiceKind::Twitter,
                ..
            }
        ));
    }
}
