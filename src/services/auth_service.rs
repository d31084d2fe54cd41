//! 认证服务：注册、登录、受保护资源访问

use crate::{
    auth::{jwt::JwtService, password::PasswordHasher},
    error::AppError,
    models::{auth::*, user::*},
    repository::UserRepository,
};
use once_cell::sync::Lazy;
use std::sync::Arc;
use uuid::Uuid;

/// 未知邮箱时用于校验的哈希，使两种失败路径耗时一致
static DUMMY_HASH: Lazy<String> = Lazy::new(|| {
    PasswordHasher::new()
        .hash("dummy-password-for-timing")
        .unwrap_or_default()
});

/// 注册结果
#[derive(Debug)]
pub struct RegisteredUser {
    pub user: UserProfile,
    pub token: String,
}

pub struct AuthService {
    users: Arc<dyn UserRepository>,
    jwt_service: Arc<JwtService>,
    hasher: PasswordHasher,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, jwt_service: Arc<JwtService>) -> Self {
        Self {
            users,
            jwt_service,
            hasher: PasswordHasher::new(),
        }
    }

    /// 用户注册
    pub async fn register(&self, req: SignupRequest) -> Result<RegisteredUser, AppError> {
        let SignupFields {
            name,
            email,
            password,
        } = req.into_fields()?;

        // 预检查；并发注册由存储层唯一约束兜底
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::Conflict);
        }

        let password_hash = self.hasher.hash_blocking(password).await?;

        // 先签发令牌再写入，写入失败时不留下任何状态
        let id = Uuid::new_v4();
        let token = self.jwt_service.issue(id, &email)?;

        let user = self
            .users
            .create(NewUser {
                id,
                name,
                email,
                password_hash,
            })
            .await?;

        metrics::counter!("auth_signups_total").increment(1);
        tracing::info!(user_id = %user.id, "User registered");

        Ok(RegisteredUser {
            user: user.into(),
            token,
        })
    }

    /// 用户登录，返回新令牌
    pub async fn authenticate(&self, req: SigninRequest) -> Result<String, AppError> {
        let SigninFields { email, password } = req.into_fields()?;

        let user = self.users.find_by_email(&email).await?;

        let (stored_hash, user) = match user {
            Some(user) => (user.password_hash.clone(), Some(user)),
            None => (DUMMY_HASH.clone(), None),
        };

        let password_ok = self.hasher.verify_blocking(password, stored_hash).await?;

        let user = match user {
            Some(user) if password_ok => user,
            _ => {
                metrics::counter!("auth_signins_total", "outcome" => "failure").increment(1);
                return Err(AppError::InvalidCredentials);
            }
        };

        let token = self.jwt_service.issue(user.id, &user.email)?;

        metrics::counter!("auth_signins_total", "outcome" => "success").increment(1);
        tracing::info!(user_id = %user.id, "User signed in");

        Ok(token)
    }

    /// 校验令牌并返回对应用户
    pub async fn authorize_and_fetch(&self, token: &str) -> Result<UserProfile, AppError> {
        let claims = self.jwt_service.verify(token)?;
        self.current_user(claims.user_id).await
    }

    /// 获取已认证用户；令牌有效但用户不存在时视为无效令牌
    pub async fn current_user(&self, user_id: Uuid) -> Result<UserProfile, AppError> {
        self.users.find_by_id(user_id).await?.ok_or_else(|| {
            tracing::debug!(%user_id, "Token subject no longer resolves to a user");
            AppError::InvalidToken
        })
    }
}
