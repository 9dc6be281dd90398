use sqlx::PgPool;

use crate::use_cases::waitlist::StoreError;

pub mod waitlist;

#[derive(Clone)]
pub struct PostgresPersistence {
    pool: PgPool,
}

impl PostgresPersistence {
    pub fn new(pool: PgPool) -> Self {
        PostgresPersistence { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();
                // PostgreSQL unique violation
                if msg.contains("duplicate key") || msg.contains("unique constraint") {
                    StoreError::Rejected {
                        message: "This email is already on the waitlist".into(),
                    }
                }
                // PostgreSQL not-null violation
                else if msg.contains("null value") && msg.contains("violates not-null") {
                    StoreError::Rejected {
                        message: "Required field is missing".into(),
                    }
                } else {
                    // Log the actual error for debugging, but don't expose details
                    tracing::error!(error = ?err, "Database error");
                    StoreError::Rejected {
                        message: String::new(),
                    }
                }
            }
            sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                StoreError::Transport(err.to_string())
            }
            _ => {
                tracing::error!(error = ?err, "Database error");
                StoreError::MalformedResponse(err.to_string())
            }
        }
    }
}
