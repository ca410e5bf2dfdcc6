pub mod clients;
pub mod employees;
pub mod job_cards;
pub mod payment_balls;
pub mod rfqs;
pub mod sub_contracts;
pub mod tasks;
pub mod timesheets;

use sea_orm::DbErr;
use thiserror::Error;

use crate::utils::validation::ValidationErrors;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("{0}")]
    NotFound(String),

    #[error("Validation Error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Database Error: {0}")]
    Database(#[from] DbErr),
}

impl RepoError {
    pub fn not_found(entity: &str, id: &str) -> Self {
        Self::NotFound(format!("{} {} was not found", entity, id))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

pub type RepoResult<T> = Result<T, RepoError>;
