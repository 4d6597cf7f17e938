/// Error handling for the API server
///
/// A unified error type that maps to HTTP responses. Handlers return
/// `Result<T, ApiError>` which converts to the right status code and a JSON
/// body of the shape `{error, message, details?}`.
///
/// # Taxonomy
///
/// - `ValidationError` (422): malformed input or a foreign-key reference
///   that does not exist, with field-level detail; rejected before any
///   mutation
/// - `NotFound` (404): an id does not resolve
/// - `Forbidden` (403): the settlement guard; carries a human-readable
///   reason and is never downgraded
/// - `Conflict` (409): unique-constraint backstop
/// - `Unauthorized` (401): bad credentials at the token endpoint

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pedidos_shared::models::pedido::PedidoError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (400)
    BadRequest(String),

    /// Unauthorized (401)
    Unauthorized(String),

    /// Forbidden (403) - settlement guard violations
    Forbidden(String),

    /// Not found (404)
    NotFound(String),

    /// Conflict (409) - e.g., duplicate email or cpf
    Conflict(String),

    /// Unprocessable entity (422) - validation errors
    ValidationError(Vec<ValidationErrorDetail>),

    /// Internal server error (500)
    InternalError(String),
}

/// Validation error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    /// Field that failed validation
    pub field: String,

    /// Error message
    pub message: String,
}

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code (e.g., "not_found", "forbidden")
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Optional validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ValidationErrorDetail>>,
}

impl ApiError {
    /// Builds a single-field validation error
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError::ValidationError(vec![ValidationErrorDetail {
            field: field.into(),
            message: message.into(),
        }])
    }

    /// Collects `validator` derive output into field-level details
    ///
    /// Nested errors are flattened into dotted paths, e.g.
    /// `produtos.0.quantidade`.
    pub fn from_validation(errors: validator::ValidationErrors) -> Self {
        let mut details = Vec::new();
        collect_validation_details(&errors, "", &mut details);
        ApiError::ValidationError(details)
    }
}

fn collect_validation_details(
    errors: &validator::ValidationErrors,
    prefix: &str,
    out: &mut Vec<ValidationErrorDetail>,
) {
    use validator::ValidationErrorsKind;

    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    out.push(ValidationErrorDetail {
                        field: path.clone(),
                        message: error
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| "Validation failed".to_string()),
                    });
                }
            }
            ValidationErrorsKind::Struct(nested) => {
                collect_validation_details(nested, &path, out);
            }
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_validation_details(nested, &format!("{}.{}", path, index), out);
                }
            }
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::ValidationError(errors) => {
                write!(f, "Validation failed: {} errors", errors.len())
            }
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message, details) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg, None),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg, None),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg, None),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg, None),
            ApiError::ValidationError(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                "Request validation failed".to_string(),
                Some(errors),
            ),
            ApiError::InternalError(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_code.to_string(),
            message,
            details,
        });

        (status, body).into_response()
    }
}

/// Convert sqlx errors to API errors
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Registro não encontrado".to_string()),
            sqlx::Error::Database(db_err) => {
                // Unique-constraint backstop behind the handler pre-checks
                if let Some(constraint) = db_err.constraint() {
                    if constraint.contains("email") {
                        return ApiError::Conflict("Email já cadastrado".to_string());
                    }
                    if constraint.contains("cpf") {
                        return ApiError::Conflict("CPF já cadastrado".to_string());
                    }
                    return ApiError::Conflict(format!("Constraint violation: {}", constraint));
                }

                ApiError::InternalError(format!("Database error: {}", db_err))
            }
            _ => ApiError::InternalError(format!("Database error: {}", err)),
        }
    }
}

/// Convert pedido domain errors to API errors
///
/// Default mapping only; the pedido handlers override the Forbidden message
/// per operation to keep the exact wording of each guard response.
impl From<PedidoError> for ApiError {
    fn from(err: PedidoError) -> Self {
        match err {
            PedidoError::NaoEncontrado => ApiError::NotFound("Pedido não encontrado.".to_string()),
            PedidoError::PagamentoConcluido => {
                ApiError::Forbidden("Pedido com pagamento concluído.".to_string())
            }
            PedidoError::ProdutoNaoVinculado => {
                ApiError::NotFound("Produto não encontrado no pedido.".to_string())
            }
            PedidoError::Db(e) => e.into(),
        }
    }
}

/// Convert JWT errors to API errors
impl From<pedidos_shared::auth::jwt::JwtError> for ApiError {
    fn from(err: pedidos_shared::auth::jwt::JwtError) -> Self {
        match err {
            pedidos_shared::auth::jwt::JwtError::Expired => {
                ApiError::Unauthorized("Token expirado".to_string())
            }
            _ => ApiError::Unauthorized("Token inválido".to_string()),
        }
    }
}

/// Convert password errors to API errors
impl From<pedidos_shared::auth::password::PasswordError> for ApiError {
    fn from(err: pedidos_shared::auth::password::PasswordError) -> Self {
        ApiError::InternalError(format!("Password operation failed: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ApiError::Forbidden("Pedido fechado".to_string());
        assert_eq!(err.to_string(), "Forbidden: Pedido fechado");

        let err = ApiError::NotFound("Pedido não encontrado.".to_string());
        assert_eq!(err.to_string(), "Not found: Pedido não encontrado.");
    }

    #[test]
    fn test_validation_error_display() {
        let err = ApiError::ValidationError(vec![
            ValidationErrorDetail {
                field: "email".to_string(),
                message: "Formato de email inválido".to_string(),
            },
            ValidationErrorDetail {
                field: "cpf".to_string(),
                message: "CPF deve ter 11 caracteres".to_string(),
            },
        ]);
        assert_eq!(err.to_string(), "Validation failed: 2 errors");
    }

    #[test]
    fn test_nested_validation_paths() {
        use validator::Validate;

        #[derive(Validate)]
        struct Item {
            #[validate(range(min = 1, message = "quantidade deve ser no mínimo 1"))]
            quantidade: i32,
        }

        #[derive(Validate)]
        struct Body {
            #[validate(nested)]
            itens: Vec<Item>,
        }

        let body = Body {
            itens: vec![Item { quantidade: 1 }, Item { quantidade: 0 }],
        };

        let err = ApiError::from_validation(body.validate().unwrap_err());
        match err {
            ApiError::ValidationError(details) => {
                assert_eq!(details.len(), 1);
                assert_eq!(details[0].field, "itens.1.quantidade");
                assert_eq!(details[0].message, "quantidade deve ser no mínimo 1");
            }
            other => panic!("expected validation error, got {}", other),
        }
    }

    #[test]
    fn test_pedido_error_mapping() {
        let err: ApiError = PedidoError::NaoEncontrado.into();
        assert!(matches!(err, ApiError::NotFound(_)));

        let err: ApiError = PedidoError::PagamentoConcluido.into();
        assert!(matches!(err, ApiError::Forbidden(_)));

        let err: ApiError = PedidoError::ProdutoNaoVinculado.into();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
