//! In-memory candidate source.
//!
//! Holds an owned snapshot of candidates. Useful for tests and for callers
//! that already have validated vectors in hand.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::matching::UserVector;
use crate::ports::{CandidatePool, CandidateSource, ProfileSourceError};

/// In-memory implementation of the CandidateSource port.
#[derive(Default)]
pub struct InMemoryCandidateSource {
    candidates: RwLock<Vec<UserVector>>,
}

impl InMemoryCandidateSource {
    pub fn new(candidates: Vec<UserVector>) -> Self {
        Self {
            candidates: RwLock::new(candidates),
        }
    }

    /// Adds a candidate, replacing any existing one with the same id.
    pub async fn upsert(&self, user: UserVector) {
        let mut candidates = self.candidates.write().await;
        match candidates.iter_mut().find(|c| c.user_id == user.user_id) {
            Some(existing) => *existing = user,
            None => candidates.push(user),
        }
    }

    pub async fn len(&self) -> usize {
        self.candidates.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.candidates.read().await.is_empty()
    }
}

#[async_trait]
impl CandidateSource for InMemoryCandidateSource {
    async fn load_candidates(&self) -> Result<CandidatePool, ProfileSourceError> {
        Ok(CandidatePool::new(self.candidates.read().await.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, openness: f64) -> UserVector {
        UserVector::builder(id, &[openness, 50.0, 50.0, 50.0, 50.0])
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn load_returns_snapshot() {
        let source = InMemoryCandidateSource::new(vec![user("a", 10.0), user("b", 20.0)]);

        let pool = source.load_candidates().await.unwrap();

        assert_eq!(pool.candidates.len(), 2);
        assert_eq!(pool.skipped, 0);
    }

    #[tokio::test]
    async fn upsert_replaces_by_id() {
        let source = InMemoryCandidateSource::default();
        assert!(source.is_empty().await);

        source.upsert(user("a", 10.0)).await;
        source.upsert(user("b", 20.0)).await;
        source.upsert(user("a", 90.0)).await;

        assert_eq!(source.len().await, 2);
        let pool = source.load_candidates().await.unwrap();
        assert_eq!(pool.candidates[0].traits.as_array()[0], 90.0);
    }
}
