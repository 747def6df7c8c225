//! Source-address allow-list for the whole HTTP surface.
//!
//! Deny-by-default: an empty list blocks every caller. `"*"` allows everyone.
//! Any other entry must be a literal IPv4 or IPv6 address.

use std::collections::HashSet;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use sharehub_core::CoreError;
use tracing::warn;

use crate::app::AppState;

#[derive(Debug, Clone, Default)]
pub struct AllowList {
    any: bool,
    addrs: HashSet<IpAddr>,
}

impl AllowList {
    /// Parse configured entries. Fails on the first entry that is neither
    /// `"*"` nor an IP address.
    pub fn from_entries(entries: &[String]) -> Result<Self, CoreError> {
        let mut list = AllowList::default();
        for entry in entries {
            let entry = entry.trim();
            if entry == "*" {
                list.any = true;
                continue;
            }
            let ip: IpAddr = entry.parse().map_err(|_| CoreError::InvalidAllowEntry {
                entry: entry.to_string(),
            })?;
            list.addrs.insert(ip.to_canonical());
        }
        Ok(list)
    }

    /// IPv4-mapped IPv6 peers (`::ffff:a.b.c.d`) match their IPv4 entry.
    pub fn is_allowed(&self, ip: IpAddr) -> bool {
        self.any || self.addrs.contains(&ip.to_canonical())
    }
}

/// Middleware: reject callers outside the allow-list with 403 before they
/// reach any handler.
pub async fn ip_filter(
    State(state): State<Arc<AppState>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Response {
    if !state.allow.is_allowed(peer.ip()) {
        warn!(peer = %peer, "blocked request from address outside allow-list");
        return (StatusCode::FORBIDDEN, "Forbidden").into_response();
    }
    next.run(request).await
}
