use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Parceiro não encontrado")]
    PartnerNotFound,

    #[error("Serviço não encontrado")]
    ServiceNotFound,

    #[error("Agendamento não encontrado")]
    AppointmentNotFound,

    // Violação do índice único de horário ativo por parceiro:
    // outro cliente reservou o mesmo horário primeiro.
    #[error("Horário indisponível")]
    SlotUnavailable,

    #[error("Transição de status inválida")]
    InvalidStatusTransition,

    #[error("Dados do cartão incompletos")]
    IncompleteCardData,

    #[error("Agendamento já avaliado")]
    AlreadyReviewed,

    // Variante para erros de banco de dados (sqlx)
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::EmailAlreadyExists => (StatusCode::CONFLICT, "Este e-mail já está em uso."),
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "E-mail ou senha inválidos."),
            AppError::InvalidToken => {
                (StatusCode::UNAUTHORIZED, "Token de autenticação inválido ou ausente.")
            }
            AppError::UserNotFound => (StatusCode::NOT_FOUND, "Usuário não encontrado."),
            AppError::PartnerNotFound => (StatusCode::NOT_FOUND, "Parceiro não encontrado."),
            AppError::ServiceNotFound => (StatusCode::NOT_FOUND, "Serviço não encontrado."),
            AppError::AppointmentNotFound => {
                (StatusCode::NOT_FOUND, "Agendamento não encontrado.")
            }
            AppError::SlotUnavailable => {
                (StatusCode::CONFLICT, "Este horário acabou de ser reservado. Escolha outro.")
            }
            AppError::InvalidStatusTransition => {
                (StatusCode::CONFLICT, "O agendamento não permite mais esta operação.")
            }
            AppError::IncompleteCardData => {
                (StatusCode::BAD_REQUEST, "Preencha todos os dados do cartão.")
            }
            AppError::AlreadyReviewed => {
                (StatusCode::CONFLICT, "Este agendamento já foi avaliado.")
            }

            // Todos os outros erros (DatabaseError, InternalServerError) viram 500.
            // O usuário vê uma mensagem genérica; o detalhe fica no log.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Erro ao processar a operação. Tente novamente mais tarde.")
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horario_ocupado_responde_409() {
        let response = AppError::SlotUnavailable.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn token_invalido_responde_401() {
        let response = AppError::InvalidToken.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn cartao_incompleto_responde_400() {
        let response = AppError::IncompleteCardData.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn erro_de_banco_responde_500() {
        let response = AppError::DatabaseError(sqlx::Error::RowNotFound).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
