//! Session Management
//!
//! Per-user conversation mode plus the set of users who already got the
//! welcome message. Everything lives in memory for the process lifetime;
//! awaiting modes fall back to idle once they are older than the TTL.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// Chat user identifier as handed out by the transport
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserKey(pub i64);

impl std::fmt::Display for UserKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which free-text reply the bot expects next from a user
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationMode {
    #[default]
    Idle,
    AwaitingFreeQuestion,
    AwaitingCryptoSymbol,
}

impl std::fmt::Display for ConversationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::AwaitingFreeQuestion => write!(f, "awaiting_free_question"),
            Self::AwaitingCryptoSymbol => write!(f, "awaiting_crypto_symbol"),
        }
    }
}

/// Stored state for one user
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserSession {
    pub mode: ConversationMode,
    pub updated_at: DateTime<Utc>,
}

impl UserSession {
    fn new(mode: ConversationMode) -> Self {
        Self {
            mode,
            updated_at: Utc::now(),
        }
    }

    fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.updated_at > ttl
    }
}

/// Default idle expiry for awaiting modes
pub const DEFAULT_SESSION_TTL_SECS: i64 = 30 * 60;

/// In-memory session store, shared by all handlers
pub struct SessionStore {
    sessions: RwLock<HashMap<UserKey, UserSession>>,
    seen: RwLock<HashSet<UserKey>>,
    ttl: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(Duration::seconds(DEFAULT_SESSION_TTL_SECS))
    }
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            seen: RwLock::new(HashSet::new()),
            ttl,
        }
    }

    /// Current mode; unknown and expired sessions read as `Idle`
    pub async fn mode(&self, user: UserKey) -> ConversationMode {
        self.mode_at(user, Utc::now()).await
    }

    async fn mode_at(&self, user: UserKey, now: DateTime<Utc>) -> ConversationMode {
        let sessions = self.sessions.read().await;
        match sessions.get(&user) {
            Some(session) if !session.is_expired(now, self.ttl) => session.mode,
            _ => ConversationMode::Idle,
        }
    }

    /// Set the mode and refresh the activity timestamp
    pub async fn set_mode(&self, user: UserKey, mode: ConversationMode) {
        let mut sessions = self.sessions.write().await;
        sessions.insert(user, UserSession::new(mode));
        tracing::debug!(user_id = %user, %mode, "session mode updated");
    }

    pub async fn reset(&self, user: UserKey) {
        self.set_mode(user, ConversationMode::Idle).await;
    }

    /// Record a user as seen. Returns `true` only on the very first call for that user.
    pub async fn mark_seen(&self, user: UserKey) -> bool {
        self.seen.write().await.insert(user)
    }

    /// Drop expired sessions. The seen-set is never purged.
    pub async fn purge_expired(&self) -> usize {
        self.purge_expired_at(Utc::now()).await
    }

    async fn purge_expired_at(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired(now, self.ttl));
        before - sessions.len()
    }

    /// Number of tracked sessions
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
