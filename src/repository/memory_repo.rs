//! In-memory user repository, used by tests and database-less local runs

use crate::{db::HealthStatus, error::AppError, models::user::*, repository::UserRepository};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
struct Inner {
    users: HashMap<Uuid, User>,
    by_email: HashMap<String, Uuid>,
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    inner: RwLock<Inner>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前用户数量
    pub async fn len(&self) -> usize {
        self.inner.read().await.users.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner
            .by_email
            .get(email)
            .and_then(|id| inner.users.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserProfile>, AppError> {
        Ok(self
            .inner
            .read()
            .await
            .users
            .get(&id)
            .cloned()
            .map(UserProfile::from))
    }

    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut inner = self.inner.write().await;

        if inner.by_email.contains_key(&new_user.email) || inner.users.contains_key(&new_user.id) {
            return Err(AppError::Conflict);
        }

        let user = User {
            id: new_user.id,
            name: new_user.name,
            email: new_user.email,
            password_hash: new_user.password_hash,
            created_at: Utc::now(),
        };

        inner.by_email.insert(user.email.clone(), user.id);
        inner.users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn health_check(&self) -> HealthStatus {
        HealthStatus::Healthy
    }
}
