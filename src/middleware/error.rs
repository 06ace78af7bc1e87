use std::fmt;

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::ValidationErrors;

use super::ctx::Ctx;

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct CtxError {
    pub error: AppError,
    pub req_id: Uuid,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppError {
    Generic { description: String },
    Unauthenticated,
    EmptyContent,
    Validation { description: String },
    ParentNotFound { ident: String },
    EntityFailIdNotFound { ident: String },
    DataUnavailable { source: String },
    DuplicateLike,
    AuthFailJwtInvalid { source: String },
    SurrealDb { source: String },
}

/// ApiError has to have the req_id to report to the client and implements IntoResponse.
pub type CtxResult<T> = core::result::Result<T, CtxError>;
/// Any error for storing before composing a response.
/// For errors that either don't affect the response, or are build before attaching the req_id.
pub type AppResult<T> = core::result::Result<T, AppError>;

impl std::error::Error for AppError {}

impl CtxError {
    pub fn from<T: Into<AppError>>(ctx: &Ctx) -> impl FnOnce(T) -> CtxError + '_ {
        |err| CtxError {
            req_id: ctx.req_id(),
            error: err.into(),
        }
    }
}

impl From<AppError> for CtxError {
    fn from(value: AppError) -> Self {
        CtxError {
            req_id: Uuid::new_v4(),
            error: value,
        }
    }
}

impl From<surrealdb::Error> for CtxError {
    fn from(value: surrealdb::Error) -> Self {
        AppError::from(value).into()
    }
}

const INTERNAL: &str = "Internal error";

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generic { description } => write!(f, "{description}"),
            Self::Unauthenticated => write!(f, "Please sign in to continue"),
            Self::EmptyContent => write!(f, "Comment cannot be empty"),
            Self::Validation { description } => write!(f, "{description}"),
            Self::ParentNotFound { .. } => write!(f, "The comment you replied to is not available"),
            Self::EntityFailIdNotFound { ident } => write!(f, "Record id= {ident} not found"),
            Self::DataUnavailable { .. } => write!(f, "Comments are unavailable right now"),
            Self::DuplicateLike => write!(f, "Already liked"),
            Self::AuthFailJwtInvalid { .. } => write!(f, "The provided JWT token is not valid"),
            Self::SurrealDb { .. } => write!(f, "{INTERNAL}"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponseBody {
    pub error: String,
    pub req_id: String,
}

impl ErrorResponseBody {
    pub fn new(error: String, req_id: Option<String>) -> Self {
        ErrorResponseBody {
            error,
            req_id: req_id.unwrap_or_else(|| Uuid::new_v4().to_string()),
        }
    }
}

impl IntoResponse for CtxError {
    fn into_response(self) -> axum::response::Response {
        let status_code = match self.error {
            AppError::Unauthenticated | AppError::AuthFailJwtInvalid { .. } => {
                StatusCode::UNAUTHORIZED
            }
            AppError::ParentNotFound { .. } | AppError::EntityFailIdNotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            AppError::EmptyContent | AppError::Validation { .. } | AppError::Generic { .. } => {
                StatusCode::BAD_REQUEST
            }
            AppError::DuplicateLike => StatusCode::CONFLICT,
            AppError::DataUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::SurrealDb { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status_code.is_server_error() {
            tracing::error!(req_id = %self.req_id, error = ?self.error, "request failed");
        } else {
            tracing::debug!(req_id = %self.req_id, error = ?self.error, "request rejected");
        }

        let body = ErrorResponseBody::new(self.error.to_string(), Some(self.req_id.to_string()));
        let mut response = (status_code, Json(body)).into_response();
        // Insert the real Error into the response - for the logger
        response.extensions_mut().insert(self.error);
        response
    }
}

// External Errors
impl From<surrealdb::Error> for AppError {
    fn from(value: surrealdb::Error) -> Self {
        Self::SurrealDb {
            source: value.to_string(),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(value: ValidationErrors) -> Self {
        let description = value
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| match &e.message {
                    Some(message) => message.to_string(),
                    None => format!("{field} is invalid"),
                })
            })
            .collect::<Vec<String>>()
            .join("\n");
        Self::Validation { description }
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(value: jsonwebtoken::errors::Error) -> Self {
        Self::AuthFailJwtInvalid {
            source: value.to_string(),
        }
    }
}

impl From<CtxError> for AppError {
    fn from(value: CtxError) -> Self {
        value.error
    }
}
