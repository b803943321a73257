//! OAuth2 bearer token cache.
//!
//! Holds at most one credential. Reads go through an `RwLock`; refreshes are
//! serialised by a separate mutex so concurrent callers on a cold or expired
//! cache share a single client-credentials exchange.

use std::sync::Arc;

use async_trait::async_trait;
use secrecy::SecretString;
use tokio::sync::{Mutex, RwLock};

use crate::domain::payment::PaymentError;
use crate::ports::Clock;

/// Tokens are treated as expired this long before the provider says so.
pub const SAFETY_MARGIN_MS: i64 = 5 * 60 * 1000;

/// A freshly issued access token, before expiry bookkeeping.
#[derive(Clone)]
pub struct IssuedToken {
    pub access_token: SecretString,
    /// Lifetime reported by the token endpoint.
    pub expires_in_secs: i64,
}

impl std::fmt::Debug for IssuedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssuedToken")
            .field("access_token", &"[REDACTED]")
            .field("expires_in_secs", &self.expires_in_secs)
            .finish()
    }
}

/// Source of new access tokens (the provider's token endpoint in production).
#[async_trait]
pub trait CredentialExchange: Send + Sync {
    async fn exchange(&self) -> Result<IssuedToken, PaymentError>;
}

#[derive(Clone)]
struct Credential {
    access_token: SecretString,
    expires_at_ms: i64,
}

impl Credential {
    fn is_valid_at(&self, now_ms: i64) -> bool {
        now_ms < self.expires_at_ms
    }
}

/// Process-wide cache of the provider bearer credential.
pub struct TokenCache {
    exchange: Arc<dyn CredentialExchange>,
    clock: Arc<dyn Clock>,
    credential: RwLock<Option<Credential>>,
    refresh_lock: Mutex<()>,
}

impl TokenCache {
    pub fn new(exchange: Arc<dyn CredentialExchange>, clock: Arc<dyn Clock>) -> Self {
        Self {
            exchange,
            clock,
            credential: RwLock::new(None),
            refresh_lock: Mutex::new(()),
        }
    }

    /// Returns a bearer token that is valid right now.
    ///
    /// A cached, unexpired token is returned without touching the network.
    /// Every failure is reported as `PaymentError::Auth`.
    pub async fn get_token(&self) -> Result<SecretString, PaymentError> {
        if let Some(token) = self.cached_token().await {
            return Ok(token);
        }

        let _refresh = self.refresh_lock.lock().await;

        // Another caller may have refreshed while we waited for the lock.
        if let Some(token) = self.cached_token().await {
            return Ok(token);
        }

        let issued = self.exchange.exchange().await.map_err(|e| match e {
            PaymentError::Auth(_) => e,
            other => PaymentError::auth(other.to_string()),
        })?;

        let now = self.clock.now_millis();
        let expires_at_ms = now
            .saturating_add(issued.expires_in_secs.saturating_mul(1000))
            .saturating_sub(SAFETY_MARGIN_MS);

        let mut slot = self.credential.write().await;
        if expires_at_ms > now {
            *slot = Some(Credential {
                access_token: issued.access_token.clone(),
                expires_at_ms,
            });
            tracing::debug!(expires_at_ms, "Cached new PayPal access token");
        } else {
            // Lifetime shorter than the margin: usable once, never reused.
            *slot = None;
            tracing::warn!(
                expires_in_secs = issued.expires_in_secs,
                "PayPal access token lifetime is shorter than the safety margin; not caching"
            );
        }

        Ok(issued.access_token)
    }

    /// Drops the cached credential so the next call re-exchanges.
    pub async fn invalidate(&self) {
        *self.credential.write().await = None;
    }

    /// Expiry of the cached credential, if one is held.
    pub async fn expires_at_ms(&self) -> Option<i64> {
        self.credential
            .read()
            .await
            .as_ref()
            .map(|credential| credential.expires_at_ms)
    }

    async fn cached_token(&self) -> Option<SecretString> {
        let now = self.clock.now_millis();
        let cache = self.credential.read().await;
        match cache.as_ref() {
            Some(credential) if credential.is_valid_at(now) => {
                Some(credential.access_token.clone())
            }
            _ => None,
        }
    }
}
