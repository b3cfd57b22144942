//! Session-keyed purchase correlation.
//!
//! Telegram delivers the "buy" button tap and the player-id message as two
//! unrelated updates. The registry joins them: a tap records which product a
//! session picked, and the next free-text message from that same session
//! consumes the record. Messages from other sessions never see it.
//!
//! Policies:
//! - one pending purchase per session; a second `begin` replaces the first
//!   (the user changed their mind before replying);
//! - an entry is consumed exactly once by `resolve`;
//! - entries older than the configured TTL are treated as absent and dropped.
//!
//! The lock guards single map operations only and is never held across an
//! `.await`, so work for different sessions does not queue behind each other.

use crate::models::SessionId;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingPurchase {
    pub product_id: i64,
    pub created_at: Instant,
}

/// A consumed pending purchase paired with the text that completed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub product_id: i64,
    pub player_id: String,
    /// When the selection was made, not when it was resolved.
    pub selected_at: Instant,
}

pub struct PendingPurchaseRegistry {
    entries: Mutex<HashMap<SessionId, PendingPurchase>>,
    ttl: Option<Duration>,
}

impl PendingPurchaseRegistry {
    pub fn new(ttl: Option<Duration>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Returns the product id this selection superseded, if any.
    pub fn begin(&self, session: SessionId, product_id: i64) -> Option<i64> {
        let entry = PendingPurchase {
            product_id,
            created_at: Instant::now(),
        };
        let previous = self.lock().insert(session, entry);
        let superseded = previous
            .filter(|p| !self.is_expired(p))
            .map(|p| p.product_id);

        match superseded {
            Some(old) => info!(%session, old, product_id, "pending purchase replaced"),
            None => info!(%session, product_id, "pending purchase started"),
        }
        superseded
    }

    pub fn resolve(&self, session: SessionId, text: &str) -> Option<Resolution> {
        let entry = self.lock().remove(&session)?;
        if self.is_expired(&entry) {
            debug!(%session, product_id = entry.product_id, "pending purchase expired before reply");
            return None;
        }

        info!(%session, product_id = entry.product_id, "pending purchase resolved");
        Some(Resolution {
            product_id: entry.product_id,
            player_id: text.to_string(),
            selected_at: entry.created_at,
        })
    }

    /// Puts a resolved selection back with its original timestamp, so a
    /// re-prompt does not extend its lifetime. A selection made in the
    /// meantime wins; an already expired one is not restored.
    pub fn reinstate(&self, session: SessionId, resolution: &Resolution) -> bool {
        let entry = PendingPurchase {
            product_id: resolution.product_id,
            created_at: resolution.selected_at,
        };
        if self.is_expired(&entry) {
            return false;
        }
        let mut entries = self.lock();
        if entries.contains_key(&session) {
            return false;
        }
        entries.insert(session, entry);
        debug!(%session, product_id = entry.product_id, "pending purchase reinstated");
        true
    }

    /// Returns whether a live entry was removed.
    pub fn cancel(&self, session: SessionId) -> bool {
        let removed = self
            .lock()
            .remove(&session)
            .is_some_and(|p| !self.is_expired(&p));
        if removed {
            info!(%session, "pending purchase cancelled");
        }
        removed
    }

    pub fn is_pending(&self, session: SessionId) -> bool {
        self.lock()
            .get(&session)
            .is_some_and(|p| !self.is_expired(p))
    }

    /// Drops every expired entry and returns how many went.
    pub fn purge_expired(&self) -> usize {
        if self.ttl.is_none() {
            return 0;
        }
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, p| !self.is_expired(p));
        before - entries.len()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_expired(&self, entry: &PendingPurchase) -> bool {
        self.ttl
            .is_some_and(|ttl| entry.created_at.elapsed() >= ttl)
    }

    // A panic while holding the lock cannot leave the map half-written, so
    // a poisoned guard is still usable.
    fn lock(&self) -> MutexGuard<'_, HashMap<SessionId, PendingPurchase>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}
