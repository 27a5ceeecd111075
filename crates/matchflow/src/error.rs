use crate::config::ConfigError;
use crate::marketplace::accounts::AccountError;
use crate::marketplace::actions::{ActionError, ActionParseError};
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    InvalidAction(ActionParseError),
    Action(ActionError),
    Account(AccountError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::InvalidAction(err) => write!(f, "{}", err),
            AppError::Action(err) => write!(f, "{}", err),
            AppError::Account(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::InvalidAction(err) => Some(err),
            AppError::Action(err) => Some(err),
            AppError::Account(err) => Some(err),
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidAction(_) => StatusCode::BAD_REQUEST,
            AppError::Action(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Account(AccountError::NoUsers | AccountError::InvalidCredentials) => {
                StatusCode::UNAUTHORIZED
            }
            AppError::Account(AccountError::EmailTaken) => StatusCode::CONFLICT,
            AppError::Account(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Config(_) | AppError::Telemetry(_) | AppError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<ActionParseError> for AppError {
    fn from(value: ActionParseError) -> Self {
        Self::InvalidAction(value)
    }
}

impl From<ActionError> for AppError {
    fn from(value: ActionError) -> Self {
        Self::Action(value)
    }
}

impl From<AccountError> for AppError {
    fn from(value: AccountError) -> Self {
        Self::Account(value)
    }
}
