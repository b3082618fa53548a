use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("A user with email {0} already exists")]
    EmailTaken(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl AppError {
    /// Classifies a failed write against `users`: unique violations become
    /// [`AppError::EmailTaken`], anything else stays a database error.
    pub fn from_user_write(err: sqlx::Error, email: &str) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::EmailTaken(email.to_string())
            }
            _ => AppError::Database(err),
        }
    }

    pub fn is_email_taken(&self) -> bool {
        matches!(self, AppError::EmailTaken(_))
    }
}
