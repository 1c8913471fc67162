use crate::cache::Session;
use async_trait::async_trait;
use chrono::Duration;
use std::sync::Arc;

pub type DynSessionStore = Arc<dyn SessionStoreTrait + Send + Sync>;

/// Short-lived cache of resolved sessions. A `false`/`None` result means the
/// store could not help; callers fall back to the user repository.
#[async_trait]
pub trait SessionStoreTrait {
    async fn create_session(&self, session_id: &str, session: &Session, ttl: Duration) -> bool;
    async fn get_session(&self, session_id: &str) -> Option<Session>;
    async fn delete_session(&self, session_id: &str) -> bool;
}
