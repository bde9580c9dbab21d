// Copyright AGNTCY Contributors (https://github.com/agntcy)
// SPDX-License-Identifier: Apache-2.0

//! Login session of the session-aware user client.
//!
//! The session lives in a [`SessionState`] owned by the user menu and handed
//! by reference to each operation. A [`SessionMirror`] can copy it to an
//! external key-value store; the mirror never decides whether a session is
//! valid, the service does.

use std::time::Duration;

use async_trait::async_trait;
use bb8_redis::RedisConnectionManager;
use bb8_redis::bb8::{Pool, RunError};
use bb8_redis::redis::{self, RedisError};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

const KEY_PREFIX: &str = "shopctl:session:";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    #[serde(skip)]
    token: String,
    user_id: String,
    email: String,
}

impl Session {
    pub fn new(
        token: impl Into<String>,
        user_id: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            token: token.into(),
            user_id: user_id.into(),
            email: email.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

/// The session handle: empty, or the session issued by the last successful
/// login.
#[derive(Debug, Default)]
pub struct SessionState {
    current: Option<Session>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token of the active session, empty when logged out.
    pub fn token(&self) -> &str {
        self.current.as_ref().map(Session::token).unwrap_or_default()
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    /// Replace the session, returning the previous one.
    pub fn begin(&mut self, session: Session) -> Option<Session> {
        self.current.replace(session)
    }

    /// Clear the session, returning it.
    pub fn end(&mut self) -> Option<Session> {
        self.current.take()
    }
}

#[derive(Error, Debug)]
pub enum MirrorError {
    #[error("redis error: {0}")]
    Redis(#[from] RedisError),
    #[error("timed out waiting for a redis connection")]
    Timeout,
    #[error("failed to encode session: {0}")]
    Encode(#[from] serde_json::Error),
}

impl From<RunError<RedisError>> for MirrorError {
    fn from(err: RunError<RedisError>) -> Self {
        match err {
            RunError::User(e) => MirrorError::Redis(e),
            RunError::TimedOut => MirrorError::Timeout,
        }
    }
}

/// Key under which a session is mirrored.
pub fn session_key(token: &str) -> String {
    format!("{KEY_PREFIX}{token}")
}

/// Copy of the session kept outside the process.
#[async_trait]
pub trait SessionMirror: Send + Sync {
    async fn store(&self, session: &Session) -> Result<(), MirrorError>;

    async fn remove(&self, token: &str) -> Result<(), MirrorError>;
}

/// Mirror used when no session store is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopMirror;

#[async_trait]
impl SessionMirror for NoopMirror {
    async fn store(&self, _session: &Session) -> Result<(), MirrorError> {
        Ok(())
    }

    async fn remove(&self, _token: &str) -> Result<(), MirrorError> {
        Ok(())
    }
}

/// Redis-backed mirror. Sessions are written with `SET key value EX ttl`.
pub struct RedisMirror {
    pool: Pool<RedisConnectionManager>,
    ttl: Duration,
}

impl RedisMirror {
    /// Create the mirror without connecting; the first store or remove opens
    /// the connection.
    pub fn new(url: &str, ttl: Duration) -> Result<Self, MirrorError> {
        let manager = RedisConnectionManager::new(url)?;
        let pool = Pool::builder()
            .max_size(1)
            .connection_timeout(Duration::from_secs(2))
            .build_unchecked(manager);
        Ok(Self { pool, ttl })
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

#[async_trait]
impl SessionMirror for RedisMirror {
    async fn store(&self, session: &Session) -> Result<(), MirrorError> {
        let key = session_key(session.token());
        let value = serde_json::to_string(session)?;
        let mut conn = self.pool.get().await?;
        // redis rejects EX 0
        let ttl = self.ttl.as_secs().max(1);
        let _: () = redis::cmd("SET")
            .arg(&key)
            .arg(value)
            .arg("EX")
            .arg(ttl)
            .query_async(&mut *conn)
            .await?;
        debug!(%key, ttl, "mirrored session");
        Ok(())
    }

    async fn remove(&self, token: &str) -> Result<(), MirrorError> {
        let key = session_key(token);
        let mut conn = self.pool.get().await?;
        let _: () = redis::cmd("DEL").arg(&key).query_async(&mut *conn).await?;
        debug!(%key, "removed mirrored session");
        Ok(())
    }
}

/// Build the mirror for an optional store URL.
pub fn mirror_for(
    store: Option<&str>,
    ttl: Duration,
) -> Result<Box<dyn SessionMirror>, MirrorError> {
    match store {
        Some(url) => Ok(Box::new(RedisMirror::new(url, ttl)?)),
        None => Ok(Box::new(NoopMirror)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_starts_empty() {
        let state = SessionState::new();
        assert_eq!(state.token(), "");
        assert!(!state.is_active());
        assert!(state.current().is_none());
    }

    #[test]
    fn begin_and_end() {
        let mut state = SessionState::new();
        assert!(state.begin(Session::new("t-1", "u-1", "a@b.c")).is_none());
        assert_eq!(state.token(), "t-1");
        assert_eq!(state.current().unwrap().user_id(), "u-1");

        let previous = state.begin(Session::new("t-2", "u-1", "a@b.c")).unwrap();
        assert_eq!(previous.token(), "t-1");
        assert_eq!(state.token(), "t-2");

        let ended = state.end().unwrap();
        assert_eq!(ended.token(), "t-2");
        assert_eq!(state.token(), "");
        assert!(state.end().is_none());
    }

    #[test]
    fn key_is_namespaced() {
        assert_eq!(session_key("abc"), "shopctl:session:abc");
    }

    #[test]
    fn mirrored_value_omits_token() {
        let json = serde_json::to_string(&Session::new("secret", "u-1", "a@b.c")).unwrap();
        assert_eq!(json, r#"{"user_id":"u-1","email":"a@b.c"}"#);
    }

    #[tokio::test]
    async fn noop_mirror_accepts_everything() {
        let mirror = NoopMirror;
        mirror.store(&Session::new("t", "u", "e")).await.unwrap();
        mirror.remove("t").await.unwrap();
    }

    #[tokio::test]
    async fn redis_mirror_rejects_bad_url() {
        assert!(RedisMirror::new("not a url", Duration::from_secs(60)).is_err());
    }

    #[tokio::test]
    async fn redis_mirror_is_lazy() {
        let mirror = RedisMirror::new("redis://127.0.0.1:1", Duration::from_secs(60)).unwrap();
        assert_eq!(mirror.ttl(), Duration::from_secs(60));
    }

    #[tokio::test]
    async fn mirror_for_without_store_is_noop() {
        let mirror = mirror_for(None, Duration::from_secs(1)).unwrap();
        mirror.remove("anything").await.unwrap();
    }
}
