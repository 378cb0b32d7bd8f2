pub mod user_repo;
pub use user_repo::UserRepository;
pub mod catalog_repo;
pub use catalog_repo::CatalogRepository;
pub mod appointment_repo;
pub use appointment_repo::AppointmentRepository;
pub mod payment_repo;
pub use payment_repo::PaymentRepository;

use crate::common::error::AppError;

/// Traduz violação de chave única para o erro de domínio do chamador
/// (horário ocupado, e-mail já cadastrado, avaliação duplicada).
/// Qualquer outro erro do banco segue o caminho normal.
pub(crate) fn remap_unique_violation(e: sqlx::Error, domain: AppError) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return domain;
        }
    }
    e.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::error::{DatabaseError, ErrorKind};
    use std::borrow::Cow;

    #[derive(Debug)]
    struct DuplicateKey;

    impl std::fmt::Display for DuplicateKey {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(
                f,
                "duplicate key value violates unique constraint \"appointments_partner_slot_active_idx\""
            )
        }
    }

    impl std::error::Error for DuplicateKey {}

    impl DatabaseError for DuplicateKey {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed("23505"))
        }

        fn kind(&self) -> ErrorKind {
            ErrorKind::UniqueViolation
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }
    }

    #[test]
    fn violacao_de_unicidade_vira_erro_de_dominio() {
        let e = sqlx::Error::Database(Box::new(DuplicateKey));
        let remapped = remap_unique_violation(e, AppError::SlotUnavailable);
        assert!(matches!(remapped, AppError::SlotUnavailable));
    }

    #[test]
    fn outros_erros_do_banco_seguem_o_caminho_normal() {
        let remapped = remap_unique_violation(sqlx::Error::RowNotFound, AppError::SlotUnavailable);
        assert!(matches!(remapped, AppError::DatabaseError(_)));
    }
}
