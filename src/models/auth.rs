// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

// Papéis do pátio: "view" só consulta, "op" faz entrada/saída, "admin" configura.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    View,
    Op,
    Admin,
}

// Representa um usuário vindo do banco de dados
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[schema(example = "wang")]
    pub id: String,
    #[schema(example = "王小明")]
    pub name: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    #[schema(ignore)]
    pub password_hash: String,

    pub role: UserRole,
    /// Pode editar e apagar registros de movimentação e administrar usuários.
    pub is_super: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Dados para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginUserPayload {
    #[validate(length(min = 1, message = "validation.user_id_required"))]
    #[schema(example = "wang")]
    pub id: String,
    #[validate(length(min = 1, message = "validation.password_required"))]
    pub password: String,
}

// Resposta de autenticação com o token
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub status: &'static str,
    pub token: String,
    /// Validade do token em segundos (logout por inatividade).
    pub expires_in: i64,
    pub user: User,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (ID do usuário)
    pub exp: usize,  // Expiration time
    pub iat: usize,  // Issued At
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserPayload {
    #[validate(length(min = 1, max = 64, message = "validation.user_id_required"))]
    pub id: String,
    #[validate(length(min = 1, max = 64, message = "validation.user_name_required"))]
    pub name: String,
    #[validate(length(min = 6, message = "validation.password_too_short"))]
    pub password: String,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default)]
    pub is_super: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePermissionPayload {
    pub role: UserRole,
    pub is_super: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordPayload {
    #[validate(length(min = 1, message = "validation.password_required"))]
    pub current_password: String,
    #[validate(length(min = 6, message = "validation.password_too_short"))]
    pub new_password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub status: &'static str,
    pub message: String,
    pub user: User,
}
