// src/services/user_service.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::auth::{User, UserRole},
    services::auth::{hash_password, verify_password},
};

#[derive(Clone)]
pub struct UserService {
    user_repo: UserRepository,
    pool: PgPool,
}

impl UserService {
    pub fn new(user_repo: UserRepository, pool: PgPool) -> Self {
        Self { user_repo, pool }
    }

    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.user_repo.list_all().await
    }

    pub async fn create_user(
        &self,
        id: &str,
        name: &str,
        password: &str,
        role: UserRole,
        is_super: bool,
    ) -> Result<User, AppError> {
        let user_id = id.trim().to_lowercase();
        let hashed_password = hash_password(password).await?;

        let user = self
            .user_repo
            .create_user(&self.pool, &user_id, name.trim(), &hashed_password, role, is_super)
            .await?;

        tracing::info!(user = %user.id, role = ?user.role, is_super = user.is_super, "Usuário criado");
        Ok(user)
    }

    pub async fn update_permission(
        &self,
        id: &str,
        role: UserRole,
        is_super: bool,
    ) -> Result<User, AppError> {
        let user_id = id.trim().to_lowercase();
        let user = self
            .user_repo
            .update_permission(&user_id, role, is_super)
            .await?
            .ok_or_else(|| AppError::UserNotFound(user_id.clone()))?;

        tracing::info!(user = %user.id, role = ?user.role, is_super = user.is_super, "Permissões alteradas");
        Ok(user)
    }

    pub async fn change_password(
        &self,
        user: &User,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        if !verify_password(current_password, &user.password_hash).await? {
            return Err(AppError::InvalidCredentials);
        }

        let hashed_password = hash_password(new_password).await?;
        if !self.user_repo.update_password(&user.id, &hashed_password).await? {
            return Err(AppError::UserNotFound(user.id.clone()));
        }
        Ok(())
    }

    /// Cria o primeiro super usuário quando a tabela está vazia.
    pub async fn ensure_bootstrap_admin(&self, id: &str, password: &str) -> Result<(), AppError> {
        if self.user_repo.count().await? > 0 {
            return Ok(());
        }

        let user = self
            .create_user(id, id, password, UserRole::Admin, true)
            .await?;
        tracing::warn!(user = %user.id, "Nenhum usuário encontrado; administrador inicial criado");
        Ok(())
    }
}
