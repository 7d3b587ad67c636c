//! Conversions from external infrastructure errors into domain errors.

use jsonwebtoken::errors::{Error as JwtError, ErrorKind as JwtErrorKind};
use r2d2::Error as PoolError;
use reqwest::Error as HttpError;
use rusqlite::Error as SqlError;
use vibekeeper_domain::VibeKeeperError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub VibeKeeperError);

impl From<InfraError> for VibeKeeperError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<VibeKeeperError> for InfraError {
    fn from(value: VibeKeeperError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoVibeKeeperError {
    fn into_vibekeeper(self) -> VibeKeeperError;
}

/* -------------------------------------------------------------------------- */
/* rusqlite::Error → VibeKeeperError */
/* -------------------------------------------------------------------------- */

impl IntoVibeKeeperError for SqlError {
    fn into_vibekeeper(self) -> VibeKeeperError {
        use rusqlite::ffi::ErrorCode;
        use rusqlite::Error as RE;

        match self {
            RE::SqliteFailure(err, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match (err.code, err.extended_code) {
                    (ErrorCode::DatabaseBusy, _) => {
                        VibeKeeperError::Database("database is busy".into())
                    }
                    (ErrorCode::DatabaseLocked, _) => {
                        VibeKeeperError::Database("database is locked".into())
                    }
                    (ErrorCode::ConstraintViolation, 2067) => {
                        VibeKeeperError::Database("unique constraint violation".into())
                    }
                    (ErrorCode::ConstraintViolation, 787) => {
                        VibeKeeperError::Database("foreign key constraint violation".into())
                    }
                    _ => VibeKeeperError::Database(format!(
                        "sqlite failure {:?} (code {}): {}",
                        err.code, err.extended_code, message
                    )),
                }
            }
            RE::QueryReturnedNoRows => {
                VibeKeeperError::NotFound("no rows returned by query".into())
            }
            RE::FromSqlConversionFailure(_, _, cause) => {
                VibeKeeperError::Database(format!("failed to convert sqlite value: {cause}"))
            }
            RE::InvalidColumnType(_, name, ty) => {
                VibeKeeperError::Database(format!("invalid column type for {name}: {ty}"))
            }
            RE::InvalidPath(path) => VibeKeeperError::Database(format!(
                "invalid database path: {}",
                path.to_string_lossy()
            )),
            other => VibeKeeperError::Database(other.to_string()),
        }
    }
}

impl From<SqlError> for InfraError {
    fn from(value: SqlError) -> Self {
        InfraError(value.into_vibekeeper())
    }
}

/* -------------------------------------------------------------------------- */
/* r2d2::Error → VibeKeeperError */
/* -------------------------------------------------------------------------- */

impl IntoVibeKeeperError for PoolError {
    fn into_vibekeeper(self) -> VibeKeeperError {
        VibeKeeperError::Database(format!("connection pool error: {self}"))
    }
}

impl From<PoolError> for InfraError {
    fn from(value: PoolError) -> Self {
        InfraError(value.into_vibekeeper())
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → VibeKeeperError */
/* -------------------------------------------------------------------------- */

impl IntoVibeKeeperError for HttpError {
    fn into_vibekeeper(self) -> VibeKeeperError {
        if self.is_timeout() {
            return VibeKeeperError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return VibeKeeperError::Network("HTTP connection failure".into());
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                401 | 403 => VibeKeeperError::Auth(message),
                404 => VibeKeeperError::NotFound(message),
                429 => VibeKeeperError::Network(message),
                400..=499 => VibeKeeperError::InvalidInput(message),
                _ => VibeKeeperError::Network(message),
            };
        }

        VibeKeeperError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_vibekeeper())
    }
}

/* -------------------------------------------------------------------------- */
/* jsonwebtoken::Error → VibeKeeperError */
/* -------------------------------------------------------------------------- */

impl IntoVibeKeeperError for JwtError {
    fn into_vibekeeper(self) -> VibeKeeperError {
        match self.kind() {
            JwtErrorKind::InvalidKeyFormat | JwtErrorKind::InvalidAlgorithmName => {
                VibeKeeperError::Config(format!("token signing misconfigured: {self}"))
            }
            // Never echo the token or the precise failure back to clients
            _ => VibeKeeperError::Auth("Invalid token".into()),
        }
    }
}

impl From<JwtError> for InfraError {
    fn from(value: JwtError) -> Self {
        InfraError(value.into_vibekeeper())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
