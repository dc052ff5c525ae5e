use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::common::i18n::I18nStore;
use crate::middleware::i18n::Locale;

// Nosso tipo de erro de domínio. Os handlers convertem para ApiError com `to_api_error`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] ValidationErrors),

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Usuário não encontrado: {0}")]
    UserNotFound(String),

    #[error("Usuário já existe: {0}")]
    UserAlreadyExists(String),

    #[error("Permissão '{0}' necessária")]
    Forbidden(&'static str),

    #[error("Tanque não encontrado no pátio: {0}")]
    TankNotFound(String),

    #[error("Zona não encontrada: {0}")]
    ZoneNotFound(String),

    #[error("Zona {zone} lotada (capacidade {capacity})")]
    ZoneFull { zone: String, capacity: i32 },

    #[error("Registro de movimentação não encontrado: {0}")]
    LogNotFound(i64),

    #[error("Horário inválido: {0}")]
    InvalidTimestamp(String),

    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

// O erro que sai pela API: `{ "status": "error", "message": ..., "details": ... }`
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({
                "status": "error",
                "message": self.message,
                "details": details,
            }),
            None => json!({
                "status": "error",
                "message": self.message,
            }),
        };
        (self.status, Json(body)).into_response()
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::InvalidTimestamp(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::UserNotFound(_)
            | AppError::TankNotFound(_)
            | AppError::ZoneNotFound(_)
            | AppError::LogNotFound(_) => StatusCode::NOT_FOUND,
            AppError::UserAlreadyExists(_) | AppError::ZoneFull { .. } => StatusCode::CONFLICT,
            AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Traduz o erro para o idioma do cliente.
    pub fn to_api_error(self, locale: &Locale, store: &I18nStore) -> ApiError {
        let status = self.status_code();

        let (key, args): (&str, Vec<(&str, String)>) = match &self {
            AppError::ValidationError(errors) => {
                let mut details = BTreeMap::new();
                collect_field_messages(errors, "", locale, store, &mut details);
                return ApiError {
                    status,
                    message: store.t(locale, "error.validation", &[]),
                    details: Some(json!(details)),
                };
            }
            AppError::InvalidCredentials => ("error.invalid_credentials", vec![]),
            AppError::InvalidToken => ("error.invalid_token", vec![]),
            AppError::UserNotFound(id) => ("error.user_not_found", vec![("id", id.clone())]),
            AppError::UserAlreadyExists(id) => ("error.user_exists", vec![("id", id.clone())]),
            AppError::Forbidden(policy) => ("error.forbidden", vec![("policy", policy.to_string())]),
            AppError::TankNotFound(id) => ("error.tank_not_found", vec![("id", id.clone())]),
            AppError::ZoneNotFound(id) => ("error.zone_not_found", vec![("id", id.clone())]),
            AppError::ZoneFull { zone, capacity } => (
                "error.zone_full",
                vec![("id", zone.clone()), ("capacity", capacity.to_string())],
            ),
            AppError::LogNotFound(id) => ("error.log_not_found", vec![("id", id.to_string())]),
            AppError::InvalidTimestamp(value) => {
                ("error.invalid_timestamp", vec![("value", value.clone())])
            }
            // O detalhe fica só no log; o cliente recebe a mensagem genérica.
            AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_) => {
                tracing::error!("Erro Interno do Servidor: {}", self);
                ("error.internal", vec![])
            }
        };

        ApiError {
            status,
            message: store.t(locale, key, &args),
            details: None,
        }
    }
}

// Achata os erros do validator (inclusive listas aninhadas) em "campo" -> mensagens.
// As mensagens declaradas nos `#[validate(...)]` são chaves do catálogo.
fn collect_field_messages(
    errors: &ValidationErrors,
    prefix: &str,
    locale: &Locale,
    store: &I18nStore,
    out: &mut BTreeMap<String, Vec<String>>,
) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                let messages = field_errors
                    .iter()
                    .map(|e| match &e.message {
                        Some(key) => store.t(locale, key, &[]),
                        None => e.code.to_string(),
                    })
                    .collect();
                out.insert(path, messages);
            }
            ValidationErrorsKind::Struct(inner) => {
                collect_field_messages(inner, &path, locale, store, out);
            }
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_field_messages(inner, &format!("{}[{}]", path, index), locale, store, out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Debug, Validate)]
    struct Probe {
        #[validate(length(min = 1, message = "validation.tank_id_required"))]
        tank_id: String,
    }

    fn store() -> I18nStore {
        I18nStore::from_embedded("zh").unwrap()
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::InvalidCredentials.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::Forbidden("admin").status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::TankNotFound("X".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::ZoneFull { zone: "Z-01".into(), capacity: 3 }.status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::InternalServerError(anyhow::anyhow!("boom")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_zone_full_message_is_translated() {
        let err = AppError::ZoneFull { zone: "Z-01".into(), capacity: 35 };
        let api = err.to_api_error(&Locale(Some("en".into())), &store());
        assert_eq!(api.status, StatusCode::CONFLICT);
        assert_eq!(api.message, "Zone Z-01 is full (35 tanks).");
        assert!(api.details.is_none());
    }

    #[test]
    fn test_validation_details_per_field() {
        let errors = Probe { tank_id: String::new() }.validate().unwrap_err();
        let api = AppError::ValidationError(errors).to_api_error(&Locale(None), &store());

        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        let details = api.details.unwrap();
        assert_eq!(details["tank_id"][0], "請填寫車號");
    }

    #[test]
    fn test_internal_error_hides_detail() {
        let api = AppError::InternalServerError(anyhow::anyhow!("senha do banco vazou"))
            .to_api_error(&Locale(Some("en".into())), &store());
        assert_eq!(api.message, "An unexpected error occurred.");
    }
}
