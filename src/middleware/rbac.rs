// src/middleware/rbac.rs

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use std::marker::PhantomData;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::auth::{User, UserRole},
};

/// 1. O Trait que define uma política de acesso
pub trait AccessPolicy: Send + Sync + 'static {
    fn slug() -> &'static str;
    fn allows(user: &User) -> bool;
}

/// 2. O Extractor (Guardião). Devolve o usuário para o handler.
pub struct RequireRole<T> {
    pub user: User,
    _policy: PhantomData<T>,
}

// 3. Implementação do FromRequestParts

impl<T, S> FromRequestParts<S> for RequireRole<T>
where
    T: AccessPolicy,
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let locale = Locale::from_headers(&parts.headers);

        // A. Usuário colocado pelo auth_guard
        let user = parts
            .extensions
            .get::<User>()
            .cloned()
            .ok_or_else(|| AppError::InvalidToken.to_api_error(&locale, &app_state.i18n_store))?;

        // B. Verifica a política
        if !T::allows(&user) {
            tracing::warn!(user = %user.id, policy = T::slug(), "Acesso negado");
            return Err(AppError::Forbidden(T::slug()).to_api_error(&locale, &app_state.i18n_store));
        }

        Ok(RequireRole {
            user,
            _policy: PhantomData,
        })
    }
}

// ---
// POLÍTICAS
// ---

/// Entrada e saída de tanques.
pub struct Operator;
impl AccessPolicy for Operator {
    fn slug() -> &'static str { "op" }
    fn allows(user: &User) -> bool {
        matches!(user.role, UserRole::Op | UserRole::Admin)
    }
}

/// Zonas e cadastro de tanques.
pub struct Admin;
impl AccessPolicy for Admin {
    fn slug() -> &'static str { "admin" }
    fn allows(user: &User) -> bool {
        user.role == UserRole::Admin
    }
}

/// Edição do histórico e administração de usuários.
pub struct SuperUser;
impl AccessPolicy for SuperUser {
    fn slug() -> &'static str { "super" }
    fn allows(user: &User) -> bool {
        user.is_super
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(role: UserRole, is_super: bool) -> User {
        User {
            id: "wang".into(),
            name: "王".into(),
            password_hash: String::new(),
            role,
            is_super,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_operator_policy() {
        assert!(!Operator::allows(&user(UserRole::View, false)));
        assert!(Operator::allows(&user(UserRole::Op, false)));
        assert!(Operator::allows(&user(UserRole::Admin, false)));
    }

    #[test]
    fn test_admin_policy() {
        assert!(!Admin::allows(&user(UserRole::Op, true)));
        assert!(Admin::allows(&user(UserRole::Admin, false)));
    }

    #[test]
    fn test_super_flag_is_independent_of_role() {
        assert!(SuperUser::allows(&user(UserRole::View, true)));
        assert!(!SuperUser::allows(&user(UserRole::Admin, false)));
    }
}
