//! In-memory criteria editing sessions.
//!
//! Each session owns one `WeightAllocator`. A request takes the lock, applies a
//! single allocator operation and releases it, so no half-rebalanced map is
//! ever visible to another request.

pub mod handlers;

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::allocator::WeightAllocator;
use crate::errors::AppError;

/// Shown whenever the active weights do not add up to 100.
pub const INVALID_TOTAL_MESSAGE: &str = "Criteria percentage must equal 100";

pub struct CriteriaSession {
    pub allocator: WeightAllocator,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CriterionWeight {
    pub name: String,
    pub weight: u32,
}

/// What clients see of a session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub session_id: Uuid,
    pub criteria: Vec<CriterionWeight>,
    pub total: u32,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SessionView {
    fn of(session_id: Uuid, session: &CriteriaSession) -> Self {
        let allocator = &session.allocator;
        let valid = allocator.is_valid();
        SessionView {
            session_id,
            criteria: allocator
                .weights()
                .iter()
                .map(|(name, &weight)| CriterionWeight {
                    name: name.clone(),
                    weight,
                })
                .collect(),
            total: allocator.total(),
            valid,
            message: (!valid).then_some(INVALID_TOTAL_MESSAGE),
            created_at: session.created_at,
            updated_at: session.updated_at,
        }
    }
}

#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, CriteriaSession>>>,
    ttl: chrono::Duration,
}

impl SessionStore {
    pub fn new(ttl: chrono::Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Stores a new session and drops any that sat idle past the TTL.
    pub async fn create(&self, allocator: WeightAllocator) -> SessionView {
        let now = Utc::now();
        let id = Uuid::new_v4();
        let session = CriteriaSession {
            allocator,
            created_at: now,
            updated_at: now,
        };
        let view = SessionView::of(id, &session);

        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| now - s.updated_at <= self.ttl);
        let pruned = before - sessions.len();
        if pruned > 0 {
            info!("Pruned {pruned} idle criteria session(s)");
        }
        sessions.insert(id, session);
        debug!(session_id = %id, "criteria session created");

        view
    }

    pub async fn view(&self, id: Uuid) -> Result<SessionView, AppError> {
        let sessions = self.sessions.read().await;
        sessions
            .get(&id)
            .map(|s| SessionView::of(id, s))
            .ok_or_else(|| session_not_found(id))
    }

    /// Read-only access to a session's allocator.
    pub async fn read<T, F>(&self, id: Uuid, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&WeightAllocator) -> Result<T, AppError>,
    {
        let sessions = self.sessions.read().await;
        let session = sessions.get(&id).ok_or_else(|| session_not_found(id))?;
        f(&session.allocator)
    }

    /// Applies `f` to the session's allocator and returns its result alongside
    /// the updated view. `updated_at` only moves when `f` succeeds.
    pub async fn update<T, F>(&self, id: Uuid, f: F) -> Result<(T, SessionView), AppError>
    where
        F: FnOnce(&mut WeightAllocator) -> Result<T, AppError>,
    {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or_else(|| session_not_found(id))?;
        let value = f(&mut session.allocator)?;
        session.updated_at = Utc::now();
        Ok((value, SessionView::of(id, session)))
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        let mut sessions = self.sessions.write().await;
        sessions
            .remove(&id)
            .map(|_| debug!(session_id = %id, "criteria session dropped"))
            .ok_or_else(|| session_not_found(id))
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

fn session_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {id} not found"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_then_view() {
        let store = SessionStore::new(chrono::Duration::minutes(10));
        let allocator = WeightAllocator::with_criteria(["A", "B", "C"]).unwrap();
        let created = store.create(allocator).await;

        let view = store.view(created.session_id).await.unwrap();
        assert_eq!(view.total, 100);
        assert!(view.valid);
        assert!(view.message.is_none());
        let weights: Vec<u32> = view.criteria.iter().map(|c| c.weight).collect();
        assert_eq!(weights, vec![33, 33, 34]);
    }

    #[tokio::test]
    async fn test_failed_update_leaves_session_untouched() {
        let store = SessionStore::new(chrono::Duration::minutes(10));
        let created = store
            .create(WeightAllocator::with_criteria(["A"]).unwrap())
            .await;

        let result = store
            .update(created.session_id, |a| Ok(a.add_criterion("A")?))
            .await;
        assert!(matches!(result, Err(AppError::Conflict(_))));

        let view = store.view(created.session_id).await.unwrap();
        assert_eq!(view.criteria.len(), 1);
        assert_eq!(view.updated_at, created.updated_at);
    }

    #[tokio::test]
    async fn test_invalid_total_carries_message() {
        let store = SessionStore::new(chrono::Duration::minutes(10));
        let created = store
            .create(WeightAllocator::with_criteria(["A", "B"]).unwrap())
            .await;
        let (_, view) = store
            .update(created.session_id, |a| Ok(a.remove_criterion("B")?))
            .await
            .unwrap();
        assert_eq!(view.total, 50);
        assert!(!view.valid);
        assert_eq!(view.message, Some(INVALID_TOTAL_MESSAGE));
    }

    #[tokio::test]
    async fn test_idle_sessions_pruned_on_create() {
        let store = SessionStore::new(chrono::Duration::zero());
        let first = store.create(WeightAllocator::new()).await;
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        store.create(WeightAllocator::new()).await;

        assert_eq!(store.len().await, 1);
        assert!(matches!(
            store.view(first.session_id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_remove_unknown_session() {
        let store = SessionStore::new(chrono::Duration::minutes(10));
        assert!(matches!(
            store.remove(Uuid::new_v4()).await,
            Err(AppError::NotFound(_))
        ));
    }
}
