//! User repository (数据库访问层)

use crate::{
    db::{self, HealthStatus},
    error::AppError,
    models::user::*,
};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

/// Credential store. Owns the email uniqueness invariant.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// 根据邮箱精确查找用户
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// 根据 ID 查找用户（不含密码哈希）
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserProfile>, AppError>;

    /// 创建用户，邮箱重复时返回 `AppError::Conflict`
    async fn create(&self, new_user: NewUser) -> Result<User, AppError>;

    /// 存储健康检查
    async fn health_check(&self) -> HealthStatus;
}

pub struct PgUserRepository {
    db: PgPool,
}

impl PgUserRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password_hash, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserProfile>, AppError> {
        let user = sqlx::query_as::<_, UserProfile>(
            "SELECT id, name, email, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(user)
    }

    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, name, email, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, password_hash, created_at
            "#,
        )
        .bind(new_user.id)
        .bind(&new_user.name)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .fetch_one(&self.db)
        .await
        .map_err(map_insert_error)?;

        Ok(user)
    }

    async fn health_check(&self) -> HealthStatus {
        db::health_check(&self.db).await
    }
}

/// 唯一索引冲突映射为 Conflict，其余为数据库错误
fn map_insert_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return AppError::Conflict;
        }
    }
    AppError::Database(e)
}
