use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::advisors::AdvisorTableError;
use crate::workflows::assistant::CompletionError;
use crate::workflows::grants::GrantDataError;
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
    Server(axum::Error),
    Grants(GrantDataError),
    AdvisorTable(AdvisorTableError),
    Assistant(CompletionError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Grants(err) => write!(f, "grant data error: {}", err),
            AppError::AdvisorTable(err) => write!(f, "advisor table error: {}", err),
            AppError::Assistant(err) => write!(f, "assistant error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Grants(err) => Some(err),
            AppError::AdvisorTable(err) => Some(err),
            AppError::Assistant(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Grants(_) | AppError::Assistant(_) => StatusCode::BAD_GATEWAY,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::AdvisorTable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

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

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<GrantDataError> for AppError {
    fn from(value: GrantDataError) -> Self {
        Self::Grants(value)
    }
}

impl From<AdvisorTableError> for AppError {
    fn from(value: AdvisorTableError) -> Self {
        Self::AdvisorTable(value)
    }
}

impl From<CompletionError> for AppError {
    fn from(value: CompletionError) -> Self {
        Self::Assistant(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::grants::ScrapeError;

    #[test]
    fn grant_failures_map_to_bad_gateway() {
        let err = AppError::from(GrantDataError::Scrape(ScrapeError::Status {
            url: "https://dcnr.test".to_string(),
            status: 500,
        }));
        assert!(err.to_string().starts_with("grant data error:"));
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn config_failures_are_internal() {
        let err = AppError::from(ConfigError::InvalidPort);
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
