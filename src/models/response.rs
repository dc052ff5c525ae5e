use serde::Serialize;
use utoipa::ToSchema;

pub const STATUS_SUCCESS: &str = "success";

// Resposta simples `{status, message}` das operações sem payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "success")]
    pub status: &'static str,
    pub message: String,
}

impl MessageResponse {
    pub fn success(message: String) -> Self {
        Self {
            status: STATUS_SUCCESS,
            message,
        }
    }
}
