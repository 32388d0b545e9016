use crate::domain::rules::RuleViolation;

#[derive(thiserror::Error, Debug)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("internal error")]
    Internal(#[source] anyhow::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn not_found(entity: &str) -> Self {
        ServiceError::NotFound(format!("{entity} not found"))
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        ServiceError::Conflict(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        ServiceError::BadRequest(msg.into())
    }
}

/// Postgres `numeric_value_out_of_range`.
const NUMERIC_OUT_OF_RANGE: &str = "22003";
/// Postgres `string_data_right_truncation`.
const STRING_TOO_LONG: &str = "22001";

impl From<anyhow::Error> for ServiceError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast_ref::<sqlx::Error>() {
            Some(sqlx::Error::Database(db)) => {
                from_database_error(db.as_ref()).unwrap_or(ServiceError::Internal(err))
            }
            _ => ServiceError::Internal(err),
        }
    }
}

/// Constraint failures that a racing or out-of-range request can trigger
/// after the use case checks passed.
fn from_database_error(db: &dyn sqlx::error::DatabaseError) -> Option<ServiceError> {
    if db.is_unique_violation() {
        return Some(ServiceError::conflict("Record already exists"));
    }
    if db.is_foreign_key_violation() {
        return Some(ServiceError::NotFound(
            "Referenced record does not exist".into(),
        ));
    }
    if db.is_check_violation() {
        return Some(ServiceError::bad_request("Value violates a data constraint"));
    }
    match db.code().as_deref() {
        Some(NUMERIC_OUT_OF_RANGE) => Some(ServiceError::bad_request("Numeric value out of range")),
        Some(STRING_TOO_LONG) => Some(ServiceError::bad_request("Value too long")),
        _ => None,
    }
}

impl From<RuleViolation> for ServiceError {
    fn from(v: RuleViolation) -> Self {
        ServiceError::BadRequest(v.0)
    }
}

/// Turns a missing row into a 404 for `entity`.
pub trait OrNotFound<T> {
    fn or_not_found(self, entity: &str) -> ServiceResult<T>;
}

impl<T> OrNotFound<T> for Option<T> {
    fn or_not_found(self, entity: &str) -> ServiceResult<T> {
        self.ok_or_else(|| ServiceError::not_found(entity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_violations_become_bad_requests() {
        let err: ServiceError = RuleViolation::new("end_date must be after start_date").into();
        assert!(matches!(err, ServiceError::BadRequest(ref m) if m == "end_date must be after start_date"));
    }

    #[derive(Debug)]
    struct PgFailure {
        code: &'static str,
    }

    impl std::fmt::Display for PgFailure {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "pg error {}", self.code)
        }
    }

    impl std::error::Error for PgFailure {}

    impl sqlx::error::DatabaseError for PgFailure {
        fn message(&self) -> &str {
            "pg error"
        }

        fn code(&self) -> Option<std::borrow::Cow<'_, str>> {
            Some(self.code.into())
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

        fn kind(&self) -> sqlx::error::ErrorKind {
            use sqlx::error::ErrorKind;
            match self.code {
                "23505" => ErrorKind::UniqueViolation,
                "23503" => ErrorKind::ForeignKeyViolation,
                "23514" => ErrorKind::CheckViolation,
                _ => ErrorKind::Other,
            }
        }
    }

    fn db_error(code: &'static str) -> ServiceError {
        let err = sqlx::Error::Database(Box::new(PgFailure { code }));
        anyhow::Error::from(err).into()
    }

    #[test]
    fn constraint_failures_map_to_client_errors() {
        assert!(matches!(db_error("23505"), ServiceError::Conflict(_)));
        assert!(matches!(db_error("23503"), ServiceError::NotFound(_)));
        assert!(matches!(db_error("23514"), ServiceError::BadRequest(_)));
        assert!(matches!(db_error("22003"), ServiceError::BadRequest(_)));
        assert!(matches!(db_error("22001"), ServiceError::BadRequest(_)));
        assert!(matches!(db_error("40001"), ServiceError::Internal(_)));
        assert!(matches!(
            ServiceError::from(anyhow::anyhow!("pool timed out")),
            ServiceError::Internal(_)
        ));
    }

    #[test]
    fn missing_rows_name_the_entity() {
        let err = None::<u8>.or_not_found("Tenant").unwrap_err();
        assert_eq!(err.to_string(), "Tenant not found");
    }
}
