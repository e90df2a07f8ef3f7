pub mod connection;
pub mod entities;
pub mod profile;
pub mod repositories;

use hangman_types::HangmanError;
use sea_orm::DbErr;

/// Store failures surface as persistence errors
pub(crate) fn db_err(err: DbErr) -> HangmanError {
    tracing::error!("Database error: {}", err);
    HangmanError::persistence(err.to_string())
}
